//! HTML rendering.
//!
//! Templates are compiled into the binary. Autoescaping is off: user text is
//! escaped once on the way in (see `api::params::escape`), and anything that
//! skips that path must use the `escape` filter in the template.

use std::sync::Arc;

use anyhow::Result;
use poem::{http::StatusCode, web::Html, IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use tera::{Context, Tera};
use tracing::error;

pub mod flash;

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("pages/home.html", include_str!("../../templates/pages/home.html")),
    ("pages/team.html", include_str!("../../templates/pages/team.html")),
    ("pages/not_found.html", include_str!("../../templates/pages/not_found.html")),
    ("pages/error.html", include_str!("../../templates/pages/error.html")),
];

#[derive(Clone, Debug)]
pub struct Views {
    tera: Arc<Tera>,
}

impl Views {
    pub fn new() -> Result<Views> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        tera.autoescape_on(vec![]);
        Ok(Views { tera: Arc::new(tera) })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>> {
        let context = Context::from_serialize(data)?;
        Ok(Html(self.tera.render(name, &context)?))
    }

    pub fn not_found(&self) -> Result<Response> {
        let page = self.render("pages/not_found.html", &json!({}))?;
        Ok(page.with_status(StatusCode::NOT_FOUND).into_response())
    }

    /// Turns any error that escaped a handler into a page carrying its status.
    pub fn error_response(&self, err: poem::Error) -> Response {
        let status = err.status();
        if status == StatusCode::NOT_FOUND {
            if let Ok(page) = self.not_found() {
                return page;
            }
        }

        let message = err.to_string();
        if status.is_server_error() {
            error!(%status, "{message}");
        }

        let page = self.render(
            "pages/error.html",
            &json!({ "status": status.as_u16(), "message": message }),
        );

        match page {
            Ok(page) => page.with_status(status).into_response(),
            Err(e) => {
                error!("error page failed to render: {e:?}");
                Response::builder()
                    .status(status)
                    .body(format!("{status}\n\n{message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_compile() {
        Views::new().unwrap();
    }

    #[tokio::test]
    async fn error_message_is_escaped() {
        let views = Views::new().unwrap();
        let err = poem::Error::from_string("<b>boom</b>", StatusCode::PAYLOAD_TOO_LARGE);

        let resp = views.error_response(err);
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = resp.into_body().into_string().await.unwrap();
        assert!(body.contains("&lt;b&gt;boom&lt;&#x2F;b&gt;"));
        assert!(!body.contains("<b>boom"));
    }

    #[test]
    fn stored_text_is_rendered_verbatim() {
        let views = Views::new().unwrap();
        let page = views
            .render(
                "pages/home.html",
                &json!({
                    "teams": [{ "code": "FC1", "name": "A &amp; B", "description": "" }],
                    "flashes": [],
                }),
            )
            .unwrap();

        assert!(page.0.contains("A &amp; B"));
    }
}
