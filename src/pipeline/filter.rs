//! Demographic filtering of the survey population
//!
//! Filters are (column, value) selections combined with AND semantics.
//! Selections naming an unknown column or a value absent from the column's
//! observed domain are ignored rather than treated as fatal; the caller
//! gets an echo of what was applied and what was skipped.

use anyhow::Result;
use polars::prelude::*;

use super::schema::FilterSelection;

/// Why a selection was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Column is not in the filterable allow-list or not in the dataset
    UnknownColumn,
    /// Value does not occur in the column
    UnknownValue,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::UnknownColumn => write!(f, "unknown column"),
            IgnoreReason::UnknownValue => write!(f, "value not present in column"),
        }
    }
}

/// A selection that was skipped, with the reason.
#[derive(Debug, Clone)]
pub struct IgnoredFilter {
    pub selection: FilterSelection,
    pub reason: IgnoreReason,
}

/// Result of applying a set of filter selections.
#[derive(Debug)]
pub struct FilterOutcome {
    /// The row subset matching all applied selections
    pub frame: DataFrame,
    /// Selections that actually constrained the population
    pub applied: Vec<FilterSelection>,
    /// Selections that were skipped (unknown column or value)
    pub ignored: Vec<IgnoredFilter>,
}

/// Apply filter selections to the dataset with AND semantics.
///
/// Only columns named in `allowed_columns` may constrain the population.
/// "All" and empty values impose no constraint. Membership of a value is
/// checked against the column's domain in the input frame, so an unknown
/// spelling degrades to "no filter" instead of silently emptying the
/// result. A zero-row result is returned as-is; downstream computations
/// are responsible for the degenerate case.
pub fn apply_filters(
    df: &DataFrame,
    selections: &[FilterSelection],
    allowed_columns: &[String],
) -> Result<FilterOutcome> {
    let mut mask = vec![true; df.height()];
    let mut applied = Vec::new();
    let mut ignored = Vec::new();

    for selection in selections {
        if selection.is_all() {
            continue;
        }

        if !allowed_columns.iter().any(|c| c == &selection.column) {
            ignored.push(IgnoredFilter {
                selection: selection.clone(),
                reason: IgnoreReason::UnknownColumn,
            });
            continue;
        }

        let column = match df.column(selection.column.as_str()) {
            Ok(col) => col,
            Err(_) => {
                ignored.push(IgnoredFilter {
                    selection: selection.clone(),
                    reason: IgnoreReason::UnknownColumn,
                });
                continue;
            }
        };

        let rendered = column_to_string_vec(column)?;
        if !rendered
            .iter()
            .any(|v| v.as_deref() == Some(selection.value.as_str()))
        {
            ignored.push(IgnoredFilter {
                selection: selection.clone(),
                reason: IgnoreReason::UnknownValue,
            });
            continue;
        }

        for (keep, value) in mask.iter_mut().zip(rendered.iter()) {
            *keep &= value.as_deref() == Some(selection.value.as_str());
        }
        applied.push(selection.clone());
    }

    let mask_ca = BooleanChunked::from_slice("mask".into(), &mask);
    let frame = df.filter(&mask_ca)?;

    Ok(FilterOutcome {
        frame,
        applied,
        ignored,
    })
}

/// Sorted unique values observed in a column, rendered as strings.
///
/// Used to offer filter choices interactively and to echo column domains
/// in error messages.
pub fn column_domain(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let col = df.column(column)?;
    let unique = col.unique()?;

    let mut values: Vec<String> = column_to_string_vec(&unique)?
        .into_iter()
        .flatten()
        .collect();
    values.sort();
    Ok(values)
}

/// Render a column's cells as strings for equality comparison.
///
/// Integer-coded categoricals (e.g. a 0/1 participation flag) compare via
/// their canonical decimal rendering, matching how they are typed on the
/// command line.
fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        dt if dt.is_integer() => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        dt if dt.is_float() => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
