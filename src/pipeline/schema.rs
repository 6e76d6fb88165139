//! Survey schema configuration
//!
//! The fixed column layout of the engagement survey: factor variables,
//! the satisfaction and NPS fields, and the demographic columns that may
//! be filtered on. The schema is an immutable value passed explicitly
//! into each engine rather than shared global state.

use serde::Serialize;

/// Immutable description of the survey's column layout.
#[derive(Debug, Clone)]
pub struct SurveySchema {
    /// Ordered list of engagement factor columns (the regression inputs)
    pub factors: Vec<String>,
    /// Overall-satisfaction column (the regression target)
    pub satisfaction: String,
    /// Net Promoter Score column (0-10)
    pub nps: String,
    /// Engagement anchor used by likelihood-to-stay segmentation
    pub engagement_anchor: String,
    /// Demographic columns that may be used as filters
    pub filter_columns: Vec<String>,
}

impl Default for SurveySchema {
    fn default() -> Self {
        Self {
            factors: [
                "KD1", "KD2", "KD3", "KI1", "KI2", "KI3", "KI4", "KI5", "KR1", "KR2", "KR3",
                "KR4", "KR5", "PR1", "PR2", "TU1", "TU2", "KE1", "KE2", "KE3",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            satisfaction: "SAT".to_string(),
            nps: "NPS".to_string(),
            engagement_anchor: "KE1".to_string(),
            filter_columns: [
                "unit",
                "subunit",
                "directorate",
                "division",
                "department",
                "section",
                "layer",
                "status",
                "generation",
                "gender",
                "marital",
                "education",
                "tenure_category",
                "children",
                "region",
                "participation_23",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl SurveySchema {
    /// All numeric columns the analysis requires: factors, satisfaction, NPS.
    pub fn numeric_columns(&self) -> Vec<&str> {
        let mut cols: Vec<&str> = self.factors.iter().map(|s| s.as_str()).collect();
        cols.push(self.satisfaction.as_str());
        cols.push(self.nps.as_str());
        cols
    }

    /// Human-readable dimension a factor belongs to, derived from its prefix.
    pub fn dimension_label(&self, factor: &str) -> &'static str {
        dimension_for(factor)
    }
}

/// Survey dimension labels keyed by variable prefix.
pub fn dimension_for(variable: &str) -> &'static str {
    match variable {
        v if v.starts_with("SAT") => "Overall Satisfaction",
        v if v.starts_with("KD") => "Kebutuhan Dasar",
        v if v.starts_with("KI") => "Kontribusi Individu",
        v if v.starts_with("KR") => "Kerjasama",
        v if v.starts_with("PR") => "Pertumbuhan",
        v if v.starts_with("TU") => "Tujuan",
        v if v.starts_with("KE") => "Keterlekatan",
        _ => "Unknown",
    }
}

/// A single demographic filter selection: one column, one required value.
///
/// A value of "All" (any case) or an empty string imposes no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub column: String,
    pub value: String,
}

impl FilterSelection {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether this selection is the "no constraint" sentinel.
    pub fn is_all(&self) -> bool {
        self.value.is_empty() || self.value.eq_ignore_ascii_case("all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_has_twenty_factors() {
        let schema = SurveySchema::default();
        assert_eq!(schema.factors.len(), 20);
        assert_eq!(schema.factors[0], "KD1");
        assert_eq!(schema.factors[19], "KE3");
    }

    #[test]
    fn test_numeric_columns_include_sat_and_nps() {
        let schema = SurveySchema::default();
        let cols = schema.numeric_columns();
        assert_eq!(cols.len(), 22);
        assert!(cols.contains(&"SAT"));
        assert!(cols.contains(&"NPS"));
    }

    #[test]
    fn test_dimension_labels() {
        assert_eq!(dimension_for("KD2"), "Kebutuhan Dasar");
        assert_eq!(dimension_for("KE1"), "Keterlekatan");
        assert_eq!(dimension_for("SAT"), "Overall Satisfaction");
        assert_eq!(dimension_for("XX9"), "Unknown");
    }

    #[test]
    fn test_all_sentinel() {
        assert!(FilterSelection::new("gender", "All").is_all());
        assert!(FilterSelection::new("gender", "ALL").is_all());
        assert!(FilterSelection::new("gender", "").is_all());
        assert!(!FilterSelection::new("gender", "Female").is_all());
    }
}
