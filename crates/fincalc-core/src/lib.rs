pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "interest")]
pub mod interest;

pub use error::FincalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FincalcResult<T> = Result<T, FincalcError>;
