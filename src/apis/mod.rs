pub mod adam4eve;
pub mod fuzzwork;

pub use adam4eve::ContractPriceSource;
pub use fuzzwork::TypeIdLookup;
