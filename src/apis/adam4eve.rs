use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

use crate::app::ports::HttpClientPort;
use crate::config::MarketConfig;
use crate::error::{AppraiserError, Result};
use crate::parser::PriceExtractor;
use crate::types::{PriceSample, TypeId};

/// Scrapes contract price history pages from adam4eve.
pub struct ContractPriceSource {
    http: Arc<dyn HttpClientPort>,
    extractor: Box<dyn PriceExtractor>,
    base_url: Url,
    region_id: u64,
    days: u32,
}

impl ContractPriceSource {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        extractor: Box<dyn PriceExtractor>,
        market: &MarketConfig,
    ) -> Result<Self> {
        Ok(Self {
            http,
            extractor,
            base_url: Url::parse(&market.base_url)?,
            region_id: market.region_id,
            days: market.days,
        })
    }

    pub fn history_url(&self, type_id: TypeId) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("typeID", &type_id.to_string())
            .append_pair("regionID", &self.region_id.to_string())
            .append_pair("days", &self.days.to_string());
        url
    }

    /// All price samples on the history page. An empty page is an error.
    #[instrument(skip(self))]
    pub async fn fetch_samples(&self, type_id: TypeId) -> Result<Vec<PriceSample>> {
        let url = self.history_url(type_id);
        let html = self.http.get_text(&url).await?;
        let samples = self.extractor.extract(&html);
        if samples.is_empty() {
            return Err(AppraiserError::NoPrices { type_id });
        }
        debug!("Found {} price samples", samples.len());
        Ok(samples)
    }
}
