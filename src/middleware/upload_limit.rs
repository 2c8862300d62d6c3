use poem::{
    error::SizedLimitError,
    web::headers::{ContentLength, HeaderMapExt},
    Body, Endpoint, Request, Result,
};
use tokio::io::AsyncReadExt;
use tracing::warn;

pub struct UploadLimitEndpoint<E> {
    pub(super) inner: E,
    pub(super) max_size: usize,
}

impl<E: Endpoint> Endpoint for UploadLimitEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, mut req: Request) -> Result<Self::Output> {
        match req.headers().typed_get::<ContentLength>() {
            Some(ContentLength(len)) if len > self.max_size as u64 => {
                warn!(len, max = self.max_size, "upload rejected");
                return Err(SizedLimitError::PayloadTooLarge.into());
            }
            Some(_) => {}
            None => {
                let body = req.take_body().into_async_read().take(self.max_size as u64);
                req.set_body(Body::from_async_read(body));
            }
        }

        self.inner.call(req).await
    }
}
