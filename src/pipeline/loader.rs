//! Survey dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::schema::SurveySchema;

/// Load a survey dataset from a file (CSV or Parquet based on extension).
///
/// CSV schema inference uses `infer_schema_length` rows; pass 0 for a full
/// table scan.
pub fn load_survey(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let infer = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(infer)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    let df = lf
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    Ok(df)
}

/// Validate that the dataset carries the columns the analysis needs.
///
/// Every factor column, the satisfaction column, and the NPS column must
/// exist, cast cleanly to Float64, and contain no nulls. Malformed rows
/// are a data-preparation problem and are rejected up front.
pub fn validate_survey(df: &DataFrame, schema: &SurveySchema) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<&str> = schema
        .numeric_columns()
        .into_iter()
        .filter(|c| !present.iter().any(|p| p == c))
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Dataset is missing required survey column(s): {}",
            missing.join(", ")
        );
    }

    for name in schema.numeric_columns() {
        let column = df.column(name)?;

        if column.null_count() > 0 {
            anyhow::bail!(
                "Column '{}' contains {} null value(s); survey rows must be complete",
                name,
                column.null_count()
            );
        }

        // Non-strict casts turn unparseable values into nulls rather than
        // failing, so a widened null count means the column is not numeric.
        let casted = column.cast(&DataType::Float64).map_err(|_| {
            anyhow::anyhow!("Column '{}' must be numeric (cannot cast to Float64)", name)
        })?;
        if casted.null_count() > column.null_count() {
            anyhow::bail!("Column '{}' must be numeric (cannot cast to Float64)", name);
        }
    }

    Ok(())
}

/// Dataset shape and memory estimate for display.
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_schema() -> SurveySchema {
        SurveySchema {
            factors: vec!["F1".to_string(), "F2".to_string()],
            satisfaction: "SAT".to_string(),
            nps: "NPS".to_string(),
            engagement_anchor: "F1".to_string(),
            filter_columns: vec!["gender".to_string()],
        }
    }

    #[test]
    fn test_validate_accepts_complete_frame() {
        let df = df! {
            "F1" => [4i64, 5, 3],
            "F2" => [2i64, 3, 4],
            "SAT" => [5i64, 4, 3],
            "NPS" => [9i64, 8, 7],
            "gender" => ["F", "M", "F"],
        }
        .unwrap();

        assert!(validate_survey(&df, &tiny_schema()).is_ok());
    }

    #[test]
    fn test_validate_reports_missing_columns() {
        let df = df! {
            "F1" => [4i64, 5],
            "SAT" => [5i64, 4],
        }
        .unwrap();

        let err = validate_survey(&df, &tiny_schema()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("F2"));
        assert!(msg.contains("NPS"));
    }

    #[test]
    fn test_validate_rejects_nulls() {
        let df = df! {
            "F1" => [Some(4i64), None, Some(3)],
            "F2" => [2i64, 3, 4],
            "SAT" => [5i64, 4, 3],
            "NPS" => [9i64, 8, 7],
        }
        .unwrap();

        let err = validate_survey(&df, &tiny_schema()).unwrap_err();
        assert!(err.to_string().contains("null"));
    }

    #[test]
    fn test_validate_rejects_non_numeric() {
        let df = df! {
            "F1" => ["a", "b", "c"],
            "F2" => [2i64, 3, 4],
            "SAT" => [5i64, 4, 3],
            "NPS" => [9i64, 8, 7],
        }
        .unwrap();

        let err = validate_survey(&df, &tiny_schema()).unwrap_err();
        assert!(err.to_string().contains("numeric"));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let bad_path = dir.path().join("survey.xlsx");
        std::fs::File::create(&bad_path).unwrap();

        let result = load_survey(&bad_path, 100);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unsupported"));
    }
}
