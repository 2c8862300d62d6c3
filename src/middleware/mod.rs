pub mod upload_limit;

use poem::{Endpoint, Middleware};

/// Caps the request body at `max_size` bytes.
///
/// Unlike poem's `SizeLimit` a missing `Content-Length` is accepted; such a
/// body is cut off after `max_size` bytes instead.
pub struct UploadLimit {
    max_size: usize,
}

impl UploadLimit {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

impl<E: Endpoint> Middleware<E> for UploadLimit {
    type Output = upload_limit::UploadLimitEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        upload_limit::UploadLimitEndpoint {
            inner: ep,
            max_size: self.max_size,
        }
    }
}
