pub mod error;
pub mod incentives;
pub mod metrics;
pub mod pricing;
pub mod proforma;
pub mod projection;
pub mod report;
pub mod srec;
pub mod types;

pub use error::ProFormaError;
pub use types::*;

/// Standard result type for all pro-forma operations
pub type ProFormaResult<T> = Result<T, ProFormaError>;
