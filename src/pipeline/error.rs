//! Error types for the analysis pipeline.
//!
//! These cover the conditions under which the regression and the derived
//! statistics are ill-posed. They are detected up front, before any
//! division or matrix factorization, so the caller never sees NaN or Inf
//! coefficients.

use thiserror::Error;

/// Errors that make the importance-performance computation ill-posed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The filtered population contains no respondents.
    #[error("no respondents match the selected filters")]
    EmptyPopulation,

    /// Too few respondents for the regression's degrees of freedom.
    #[error(
        "insufficient respondents for regression: {rows} row(s), at least {required} required"
    )]
    InsufficientSamples {
        /// Rows in the filtered population
        rows: usize,
        /// Minimum rows required (factor count + 1)
        required: usize,
    },

    /// A column is constant over the population, so standardization is undefined.
    #[error("column '{column}' has zero variance in the filtered population; widen the filter")]
    DegenerateVariance {
        /// Name of the constant column
        column: String,
    },

    /// A required column is missing, non-numeric, or contains nulls.
    #[error("column '{column}' is missing or not usable as a numeric score")]
    InvalidColumn {
        /// Name of the offending column
        column: String,
    },
}
