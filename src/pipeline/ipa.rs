//! Importance-Performance Analysis
//!
//! Importance is the standardized regression coefficient of each factor
//! in an ordinary-least-squares fit of standardized satisfaction on the
//! standardized factors. Performance is the factor's raw mean. Each
//! factor is then classified into one of four quadrants against midpoints
//! derived from the current result set, so the thresholds move with every
//! filter change and are never cached.

use faer::prelude::*;
use faer::Mat;
use polars::prelude::DataFrame;
use rayon::prelude::*;
use serde::Serialize;

use super::error::AnalysisError;
use super::schema::SurveySchema;
use super::segment::score_column;

/// Quadrant labels for the importance/performance grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quadrant {
    KeepDoingWell,
    ImprovePerformance,
    PossibleOverkill,
    LowPriority,
}

impl Quadrant {
    /// All quadrants in display order.
    pub fn all() -> [Quadrant; 4] {
        [
            Quadrant::KeepDoingWell,
            Quadrant::ImprovePerformance,
            Quadrant::PossibleOverkill,
            Quadrant::LowPriority,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::KeepDoingWell => "Keep doing well",
            Quadrant::ImprovePerformance => "Improve performance",
            Quadrant::PossibleOverkill => "Possible overkill",
            Quadrant::LowPriority => "Low priority",
        }
    }

    /// Long-form description for report rendering.
    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::KeepDoingWell => "High Importance, High Performance",
            Quadrant::ImprovePerformance => "High Importance, Low Performance",
            Quadrant::PossibleOverkill => "Low Importance, High Performance",
            Quadrant::LowPriority => "Low Importance, Low Performance",
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One engagement factor's derived scores and quadrant.
#[derive(Debug, Clone, Serialize)]
pub struct FactorRecord {
    /// Factor variable name
    pub factor: String,
    /// Survey dimension the factor belongs to
    pub dimension: String,
    /// Standardized regression coefficient, rounded to 3 decimals
    pub importance: f64,
    /// Raw mean score over the population, rounded to 3 decimals
    pub performance: f64,
    /// Quadrant classification against the dynamic midpoints
    pub quadrant: Quadrant,
}

/// Full result of one importance-performance pass.
#[derive(Debug, Clone, Serialize)]
pub struct IpaAnalysis {
    /// One record per schema factor, in schema order
    pub records: Vec<FactorRecord>,
    /// (max + min) / 2 over the importance values of this result set
    pub importance_midpoint: f64,
    /// (max + min) / 2 over the performance values of this result set
    pub performance_midpoint: f64,
    /// Respondents in the analyzed population
    pub respondents: usize,
}

/// Population mean and standard deviation of one column.
#[derive(Debug, Clone, Copy)]
struct ColumnStats {
    mean: f64,
    std: f64,
}

fn column_stats(values: &[f64]) -> ColumnStats {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    ColumnStats {
        mean,
        std: var.sqrt(),
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Classify a factor against the dynamic midpoints.
///
/// The high branches require strictly-greater-than on both axes; a value
/// exactly at a midpoint counts as low on that axis.
pub fn classify_quadrant(
    importance: f64,
    performance: f64,
    importance_midpoint: f64,
    performance_midpoint: f64,
) -> Quadrant {
    if importance > importance_midpoint && performance > performance_midpoint {
        Quadrant::KeepDoingWell
    } else if importance > importance_midpoint && performance <= performance_midpoint {
        Quadrant::ImprovePerformance
    } else if importance <= importance_midpoint && performance > performance_midpoint {
        Quadrant::PossibleOverkill
    } else {
        Quadrant::LowPriority
    }
}

/// Run the full importance-performance computation over the population.
///
/// Preconditions are checked before any division or factorization: the
/// population must be non-empty, carry more rows than factors, and every
/// score column must vary. Violations surface as structured errors, never
/// as NaN coefficients.
pub fn compute_ipa(df: &DataFrame, schema: &SurveySchema) -> Result<IpaAnalysis, AnalysisError> {
    let rows = df.height();
    if rows == 0 {
        return Err(AnalysisError::EmptyPopulation);
    }

    let required = schema.factors.len() + 1;
    if rows < required {
        return Err(AnalysisError::InsufficientSamples { rows, required });
    }

    let satisfaction = score_column(df, &schema.satisfaction)?;
    let factor_values: Vec<Vec<f64>> = schema
        .factors
        .iter()
        .map(|name| score_column(df, name))
        .collect::<Result<_, _>>()?;

    // Per-column moments; independent across columns.
    let factor_stats: Vec<ColumnStats> = factor_values
        .par_iter()
        .map(|values| column_stats(values))
        .collect();
    let sat_stats = column_stats(&satisfaction);

    for (name, stats) in schema.factors.iter().zip(factor_stats.iter()) {
        if stats.std == 0.0 {
            return Err(AnalysisError::DegenerateVariance {
                column: name.clone(),
            });
        }
    }
    if sat_stats.std == 0.0 {
        return Err(AnalysisError::DegenerateVariance {
            column: schema.satisfaction.clone(),
        });
    }

    // Design matrix: bias column of ones plus one standardized column per
    // factor. The bias fits ~0 on centered data but keeps the fit the
    // closed-form OLS solution.
    let k = schema.factors.len();
    let x = Mat::from_fn(rows, k + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            let stats = factor_stats[j - 1];
            (factor_values[j - 1][i] - stats.mean) / stats.std
        }
    });
    let y = Mat::from_fn(rows, 1, |i, _| (satisfaction[i] - sat_stats.mean) / sat_stats.std);

    let beta = x.qr().solve_lstsq(&y);

    let importances: Vec<f64> = (0..k).map(|j| round3(beta[(j + 1, 0)])).collect();
    let performances: Vec<f64> = factor_stats.iter().map(|s| round3(s.mean)).collect();

    let importance_midpoint = midpoint(&importances);
    let performance_midpoint = midpoint(&performances);

    let records: Vec<FactorRecord> = schema
        .factors
        .iter()
        .zip(importances.iter().zip(performances.iter()))
        .map(|(name, (&importance, &performance))| FactorRecord {
            factor: name.clone(),
            dimension: schema.dimension_label(name).to_string(),
            importance,
            performance,
            quadrant: classify_quadrant(
                importance,
                performance,
                importance_midpoint,
                performance_midpoint,
            ),
        })
        .collect();

    Ok(IpaAnalysis {
        records,
        importance_midpoint,
        performance_midpoint,
        respondents: rows,
    })
}

/// Midpoint of the observed range: (max + min) / 2.
fn midpoint(values: &[f64]) -> f64 {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (max + min) / 2.0
}
