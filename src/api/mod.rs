//! HTTP surface: the route table and its middleware.

use anyhow::{anyhow, Context, Result};
use poem::{
    get,
    middleware::{CatchPanic, Tracing},
    post,
    session::{CookieConfig, CookieSession},
    web::cookie::CookieKey,
    Endpoint, EndpointExt, Response, Route,
};
use url::Url;

use crate::{config::Config, db::Db, middleware::UploadLimit, view::Views};

pub mod image;
pub mod params;
pub mod players;
pub mod teams;

/// Builds the application with every dependency handed in.
pub fn app(db: Db, views: Views, config: &Config) -> Result<impl Endpoint<Output = Response>> {
    let error_views = views.clone();

    let app = Route::new()
        .at("/", get(teams::index))
        .at("/team/:code", get(teams::show))
        .at(
            "/add-team",
            post(teams::add.with(UploadLimit::new(config.max_upload_bytes))),
        )
        .at("/add-player", post(players::add))
        .at("/delete-team/:code", get(teams::delete))
        .at("/image/:code", get(teams::image))
        .with(CookieSession::new(session_cookie(config)?))
        .with(Tracing)
        .with(CatchPanic::new())
        .data(db)
        .data(views)
        .catch_all_error(move |err| {
            let views = error_views.clone();
            async move { views.error_response(err) }
        });

    Ok(app)
}

fn session_cookie(config: &Config) -> Result<CookieConfig> {
    let key = match &config.session_secret {
        Some(secret) => CookieKey::try_from(secret.as_bytes())
            .context("SESSION_SECRET must be at least 64 bytes")?,
        None => CookieKey::generate(),
    };
    Ok(CookieConfig::signed(key))
}

/// `/team/<code>` with the code encoded as a single path segment.
pub fn team_path(code: &str) -> Result<String> {
    let mut url = Url::parse("http://localhost/team/")?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("base url cannot hold path segments"))?
        .pop_if_empty()
        .push(code);
    Ok(url.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_path_keeps_plain_codes() {
        assert_eq!(team_path("FC1").unwrap(), "/team/FC1");
    }

    #[test]
    fn team_path_encodes_separators() {
        assert_eq!(team_path("a/b c").unwrap(), "/team/a%2Fb%20c");
    }
}
