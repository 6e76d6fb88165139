//! Pipeline module - orchestrates the analysis steps

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod ipa;
pub mod loader;
pub mod schema;
pub mod segment;

pub use aggregate::*;
pub use error::AnalysisError;
pub use filter::*;
pub use ipa::*;
pub use loader::*;
pub use schema::*;
pub use segment::*;
