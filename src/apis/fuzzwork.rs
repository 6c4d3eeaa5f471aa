use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

use crate::app::ports::HttpClientPort;
use crate::error::{AppraiserError, Result};
use crate::types::TypeId;

/// Name -> TypeID lookup against the fuzzwork `typeid2.php` endpoint.
pub struct TypeIdLookup {
    http: Arc<dyn HttpClientPort>,
    base_url: Url,
}

impl TypeIdLookup {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn lookup_url(&self, item_name: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("typename", item_name);
        url
    }

    /// `Ok(None)` when the service knows no item by that name.
    #[instrument(skip(self))]
    pub async fn resolve(&self, item_name: &str) -> Result<Option<TypeId>> {
        let url = self.lookup_url(item_name);
        let body = self.http.get_text(&url).await?;
        let type_id = parse_lookup_response(&body)?;
        debug!(?type_id, "Lookup finished");
        Ok(type_id)
    }
}

/// Reads the `typeID` of the first element of the response array.
/// The id may arrive as a number or a numeric string.
pub fn parse_lookup_response(body: &str) -> Result<Option<TypeId>> {
    let data: Value = serde_json::from_str(body)?;
    let entries = data.as_array().ok_or_else(|| AppraiserError::Api {
        message: "lookup response is not a JSON array".to_string(),
    })?;

    let Some(first) = entries.first() else {
        return Ok(None);
    };

    let type_id = match &first["typeID"] {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(type_id)
}
