//! Common types, credential record definitions, and errors shared across `securepass-vault` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
