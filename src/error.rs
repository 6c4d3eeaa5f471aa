use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppraiserError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No usable price samples for TypeID {type_id}")]
    NoPrices { type_id: u64 },
}

pub type Result<T> = std::result::Result<T, AppraiserError>;
