//! Count and percentage distributions for display
//!
//! Turns the per-respondent segmentation labels into count/percentage
//! tables and groups factor records by quadrant for rendering.

use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use super::error::AnalysisError;
use super::ipa::{FactorRecord, Quadrant};

/// One label's share of the population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Build a count/percentage distribution over a sequence of labels.
///
/// Ordered by count descending, then label ascending, so equal counts
/// render deterministically. An empty input yields an empty distribution;
/// there is no division by a zero total.
pub fn distribution<S: AsRef<str>>(labels: &[S]) -> Vec<CategoryShare> {
    let total = labels.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }

    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(label, count)| CategoryShare {
            label: label.to_string(),
            count,
            percentage: 100.0 * count as f64 / total as f64,
        })
        .collect();

    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    shares
}

/// Distribution of a string label column in the frame.
pub fn column_distribution(
    df: &DataFrame,
    column: &str,
) -> Result<Vec<CategoryShare>, AnalysisError> {
    let invalid = || AnalysisError::InvalidColumn {
        column: column.to_string(),
    };

    let labels: Vec<String> = df
        .column(column)
        .map_err(|_| invalid())?
        .str()
        .map_err(|_| invalid())?
        .into_iter()
        .map(|v| v.unwrap_or("Neutral").to_string())
        .collect();

    Ok(distribution(&labels))
}

/// Factor names grouped by quadrant, in the fixed quadrant order.
///
/// Every quadrant is present even when it holds no factors, so downstream
/// rendering has a stable shape.
pub fn group_by_quadrant(records: &[FactorRecord]) -> Vec<(Quadrant, Vec<String>)> {
    Quadrant::all()
        .into_iter()
        .map(|quadrant| {
            let members: Vec<String> = records
                .iter()
                .filter(|r| r.quadrant == quadrant)
                .map(|r| r.factor.clone())
                .collect();
            (quadrant, members)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(factor: &str, quadrant: Quadrant) -> FactorRecord {
        FactorRecord {
            factor: factor.to_string(),
            dimension: "Test".to_string(),
            importance: 0.0,
            performance: 0.0,
            quadrant,
        }
    }

    #[test]
    fn test_distribution_counts_and_percentages() {
        let labels = ["A", "B", "A", "A", "B", "C"];
        let shares = distribution(&labels);

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].label, "A");
        assert_eq!(shares[0].count, 3);
        assert!((shares[0].percentage - 50.0).abs() < 1e-9);
        assert_eq!(shares[1].label, "B");
        assert_eq!(shares[2].label, "C");
    }

    #[test]
    fn test_distribution_percentages_sum_to_hundred() {
        let labels = ["x", "y", "y", "z", "z", "z", "w"];
        let shares = distribution(&labels);
        let total: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_of_empty_input_is_empty() {
        let labels: [&str; 0] = [];
        assert!(distribution(&labels).is_empty());
    }

    #[test]
    fn test_distribution_ties_break_on_label() {
        let labels = ["b", "a", "a", "b"];
        let shares = distribution(&labels);
        assert_eq!(shares[0].label, "a");
        assert_eq!(shares[1].label, "b");
    }

    #[test]
    fn test_uniform_labels() {
        let labels = vec!["Loyal Enthusiast"; 10];
        let shares = distribution(&labels);

        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].count, 10);
        assert!((shares[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_group_by_quadrant_keeps_empty_quadrants() {
        let records = vec![
            record("KD1", Quadrant::KeepDoingWell),
            record("KD2", Quadrant::KeepDoingWell),
            record("KI1", Quadrant::LowPriority),
        ];

        let groups = group_by_quadrant(&records);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].0, Quadrant::KeepDoingWell);
        assert_eq!(groups[0].1, vec!["KD1".to_string(), "KD2".to_string()]);
        assert_eq!(groups[1].0, Quadrant::ImprovePerformance);
        assert!(groups[1].1.is_empty());
        assert_eq!(groups[3].1, vec!["KI1".to_string()]);
    }

    #[test]
    fn test_column_distribution_reads_label_column() {
        let df = df! {
            "LS_Category" => ["Neutral", "Neutral", "Loyal Enthusiast"],
        }
        .unwrap();

        let shares = column_distribution(&df, "LS_Category").unwrap();
        assert_eq!(shares[0].label, "Neutral");
        assert_eq!(shares[0].count, 2);
    }
}
