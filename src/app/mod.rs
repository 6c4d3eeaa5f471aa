pub mod appraise_use_case;
pub mod ports;
pub mod resolve_use_case;

pub use appraise_use_case::AppraiseUseCase;
pub use resolve_use_case::ResolveUseCase;
