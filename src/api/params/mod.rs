use anyhow::{Context, Result};
use poem::web::Multipart;
use serde::Deserialize;

/// Escapes text for storage so it can later be placed into HTML as is.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub struct Upload {
    pub blob: Vec<u8>,
    pub content_type: Option<String>,
}

/// The add-team form, text fields already escaped.
#[derive(Default)]
pub struct AddTeamParams {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub image: Option<Upload>,
}

impl AddTeamParams {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<AddTeamParams> {
        let mut params = AddTeamParams::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "name" => params.name = Some(escape(&field.text().await?)),
                "code" => params.code = Some(escape(&field.text().await?)),
                "description" => params.description = Some(escape(&field.text().await?)),
                "website" => params.website = Some(escape(&field.text().await?)),
                "image" => {
                    // browsers send an empty, nameless part when no file was picked
                    let has_file_name = field.file_name().is_some_and(|n| !n.is_empty());
                    let content_type = field.content_type().map(str::to_owned);
                    let blob = field.bytes().await?;

                    if has_file_name && !blob.is_empty() {
                        params.image = Some(Upload { blob, content_type });
                    }
                }
                _ => continue,
            }
        }

        Ok(params)
    }

    pub fn required(field: Option<String>, name: &str) -> Result<String> {
        field.with_context(|| format!("missing form field `{name}`"))
    }
}

#[derive(Debug, Deserialize)]
pub struct AddPlayerForm {
    pub name: String,
    pub notes: String,
    pub team: String,
}

impl AddPlayerForm {
    pub fn escaped(self) -> AddPlayerForm {
        AddPlayerForm {
            name: escape(&self.name),
            notes: escape(&self.notes),
            team: escape(&self.team),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_neutralised() {
        assert_eq!(
            escape(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape("http://x/falcons?a=1"), "http://x/falcons?a=1");
        assert_eq!(escape("Zürich"), "Zürich");
    }

    #[test]
    fn player_form_escapes_every_field() {
        let form = AddPlayerForm {
            name: "<b>".into(),
            notes: "a & b".into(),
            team: "F\"C".into(),
        }
        .escaped();

        assert_eq!(form.name, "&lt;b&gt;");
        assert_eq!(form.notes, "a &amp; b");
        assert_eq!(form.team, "F&quot;C");
    }
}
