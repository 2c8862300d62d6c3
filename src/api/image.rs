use poem::{
    http::{header, StatusCode},
    Body, Response,
};

use crate::db::team::TeamImage;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Streams a stored image back with its content type, or answers 404 when the
/// row or its bytes are missing.
pub fn image_response(image: Option<TeamImage>) -> Response {
    match image {
        Some(TeamImage {
            image_data: Some(data),
            image_mime,
        }) => Response::builder()
            .content_type(image_mime.as_deref().unwrap_or(FALLBACK_MIME))
            .header(header::CONTENT_LENGTH, data.len())
            .body(Body::from_vec(data)),
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .content_type("text/plain; charset=utf-8")
            .body("no image"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_bytes_keep_their_type() {
        let resp = image_response(Some(TeamImage {
            image_data: Some(vec![1, 2, 3]),
            image_mime: Some("image/jpeg".into()),
        }));

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.content_type(), Some("image/jpeg"));
        assert_eq!(resp.headers()[header::CONTENT_LENGTH], "3");
    }

    #[test]
    fn missing_type_falls_back_to_octet_stream() {
        let resp = image_response(Some(TeamImage {
            image_data: Some(vec![0]),
            image_mime: None,
        }));

        assert_eq!(resp.content_type(), Some(FALLBACK_MIME));
    }

    #[test]
    fn no_row_or_no_bytes_is_not_found() {
        assert_eq!(image_response(None).status(), StatusCode::NOT_FOUND);

        let empty = image_response(Some(TeamImage {
            image_data: None,
            image_mime: Some("image/png".into()),
        }));
        assert_eq!(empty.status(), StatusCode::NOT_FOUND);
    }
}
