use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::app::ports::HttpClientPort;
use crate::constants::USER_AGENT;
use crate::error::Result;

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get_text(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}
