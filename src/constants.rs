//! Fixed endpoints, files and report labels shared across both stages.

// Default file locations (relative to the working directory)
pub const DEFAULT_CONFIG_FILE: &str = "appraiser.toml";
pub const DEFAULT_INPUT_FILE: &str = "input.txt";
pub const DEFAULT_INTERMEDIATE_FILE: &str = "eve_items_with_typeids.csv";
pub const DEFAULT_REPORT_FILE: &str = "contract_appraisal_results.csv";

// Name -> TypeID lookup service
pub const TYPEID_LOOKUP_URL: &str = "https://www.fuzzwork.co.uk/api/typeid2.php";

// Contract price history page
pub const CONTRACT_PRICE_URL: &str = "https://www.adam4eve.eu/contract_price.php";
pub const FORGE_REGION_ID: u64 = 10_000_002;
pub const LOOKBACK_DAYS: u32 = 30;
pub const REQUEST_DELAY_MS: u64 = 1_000;

pub const USER_AGENT: &str = concat!("contract_appraiser/", env!("CARGO_PKG_VERSION"));

// Intermediate CSV header
pub const INTERMEDIATE_HEADER: [&str; 3] = ["Name", "Amount", "TypeID"];

// Report layout
pub const REPORT_HEADER: [&str; 5] = [
    "Item Name",
    "Quantity",
    "TypeID",
    "Average Price (30d)",
    "Total Value (ISK)",
];
pub const NOT_AVAILABLE: &str = "N/A";
pub const TOTAL_ROW_LABEL: &str = "TOTAL VALUE";

// Outlier band around the median, inclusive
pub const MEDIAN_LOWER_BOUND: f64 = 0.7;
pub const MEDIAN_UPPER_BOUND: f64 = 1.3;

pub const THOUSAND: f64 = 1_000.0;
pub const MILLION: f64 = 1_000_000.0;
