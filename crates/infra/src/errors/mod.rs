//! Infrastructure error conversions

mod conversions;

pub use conversions::{classify_status, InfraError};
