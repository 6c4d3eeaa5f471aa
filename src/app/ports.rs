use async_trait::async_trait;
use url::Url;

use crate::error::Result;

/// Plain GET returning the response body. Non-success statuses are errors.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get_text(&self, url: &Url) -> Result<String>;
}
