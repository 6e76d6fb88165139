//! Respondent segmentation
//!
//! Each respondent receives exactly one likelihood-to-stay (LS) label and
//! one NPS label. Both classifiers are pure total functions of the row's
//! scores: satisfied/dissatisfied extremes combine with the engagement
//! anchor (LS) or the 0-10 NPS score (NPS) into four named archetypes,
//! and everyone else is Neutral. A score of exactly 3 on either axis, or
//! an NPS of 7-8, is a moderate response and lands in Neutral.

use polars::prelude::*;
use serde::Serialize;
use std::str::FromStr;

use super::error::AnalysisError;
use super::schema::SurveySchema;

/// Likelihood-to-stay archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LsCategory {
    LoyalEnthusiast,
    ContentedWanderers,
    ReluctantStayers,
    DisengagedFlightRisk,
    Neutral,
}

impl LsCategory {
    /// All categories in display order.
    pub fn all() -> [LsCategory; 5] {
        [
            LsCategory::LoyalEnthusiast,
            LsCategory::ContentedWanderers,
            LsCategory::ReluctantStayers,
            LsCategory::DisengagedFlightRisk,
            LsCategory::Neutral,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            LsCategory::LoyalEnthusiast => "Loyal Enthusiast",
            LsCategory::ContentedWanderers => "Contented Wanderers",
            LsCategory::ReluctantStayers => "Reluctant Stayers",
            LsCategory::DisengagedFlightRisk => "Disengaged Flight to Risk",
            LsCategory::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for LsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LsCategory::all()
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown LS category: '{}'", s))
    }
}

/// Net-promoter archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NpsCategory {
    BrandChampions,
    SatisfiedCritics,
    LoyalPromoters,
    VocalDetractors,
    Neutral,
}

impl NpsCategory {
    /// All categories in display order.
    pub fn all() -> [NpsCategory; 5] {
        [
            NpsCategory::BrandChampions,
            NpsCategory::SatisfiedCritics,
            NpsCategory::LoyalPromoters,
            NpsCategory::VocalDetractors,
            NpsCategory::Neutral,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            NpsCategory::BrandChampions => "Brand Champions",
            NpsCategory::SatisfiedCritics => "Satisfied Critics",
            NpsCategory::LoyalPromoters => "Loyal Promoters",
            NpsCategory::VocalDetractors => "Vocal Detractors",
            NpsCategory::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for NpsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for NpsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NpsCategory::all()
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown NPS category: '{}'", s))
    }
}

/// Name of the derived LS label column.
pub const LS_COLUMN: &str = "LS_Category";
/// Name of the derived NPS label column.
pub const NPS_COLUMN: &str = "NPS_Category";

/// Classify a respondent's likelihood to stay. First match wins.
pub fn classify_ls(sat: f64, engagement: f64) -> LsCategory {
    if sat >= 4.0 && engagement >= 4.0 {
        LsCategory::LoyalEnthusiast
    } else if sat >= 4.0 && engagement <= 2.0 {
        LsCategory::ContentedWanderers
    } else if sat <= 2.0 && engagement >= 4.0 {
        LsCategory::ReluctantStayers
    } else if sat <= 2.0 && engagement <= 2.0 {
        LsCategory::DisengagedFlightRisk
    } else {
        LsCategory::Neutral
    }
}

/// Classify a respondent on the NPS axis. First match wins.
pub fn classify_nps(sat: f64, nps: f64) -> NpsCategory {
    if sat >= 4.0 && nps >= 9.0 {
        NpsCategory::BrandChampions
    } else if sat >= 4.0 && nps <= 6.0 {
        NpsCategory::SatisfiedCritics
    } else if sat <= 2.0 && nps >= 9.0 {
        NpsCategory::LoyalPromoters
    } else if sat <= 2.0 && nps <= 6.0 {
        NpsCategory::VocalDetractors
    } else {
        NpsCategory::Neutral
    }
}

/// Append `LS_Category` and `NPS_Category` columns to the frame.
///
/// Every row is classified independently; the input columns are read once
/// and the frame is otherwise left untouched.
pub fn attach_segments(
    df: &DataFrame,
    schema: &SurveySchema,
) -> Result<DataFrame, AnalysisError> {
    let sat = score_column(df, &schema.satisfaction)?;
    let engagement = score_column(df, &schema.engagement_anchor)?;
    let nps = score_column(df, &schema.nps)?;

    let ls_labels: Vec<&str> = sat
        .iter()
        .zip(engagement.iter())
        .map(|(&s, &e)| classify_ls(s, e).label())
        .collect();
    let nps_labels: Vec<&str> = sat
        .iter()
        .zip(nps.iter())
        .map(|(&s, &n)| classify_nps(s, n).label())
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(LS_COLUMN.into(), ls_labels))
        .map_err(|_| AnalysisError::InvalidColumn {
            column: LS_COLUMN.to_string(),
        })?;
    out.with_column(Series::new(NPS_COLUMN.into(), nps_labels))
        .map_err(|_| AnalysisError::InvalidColumn {
            column: NPS_COLUMN.to_string(),
        })?;

    Ok(out)
}

/// Read a numeric score column as a dense f64 vector.
pub(crate) fn score_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, AnalysisError> {
    let invalid = || AnalysisError::InvalidColumn {
        column: name.to_string(),
    };

    let column = df.column(name).map_err(|_| invalid())?;
    let casted = column.cast(&DataType::Float64).map_err(|_| invalid())?;
    let ca = casted.f64().map_err(|_| invalid())?;

    let values: Vec<f64> = ca.into_iter().flatten().collect();
    if values.len() != df.height() {
        // Nulls present - the loader should have rejected these rows.
        return Err(invalid());
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ls_archetypes() {
        assert_eq!(classify_ls(5.0, 5.0), LsCategory::LoyalEnthusiast);
        assert_eq!(classify_ls(4.0, 4.0), LsCategory::LoyalEnthusiast);
        assert_eq!(classify_ls(4.0, 2.0), LsCategory::ContentedWanderers);
        assert_eq!(classify_ls(1.0, 5.0), LsCategory::ReluctantStayers);
        assert_eq!(classify_ls(2.0, 1.0), LsCategory::DisengagedFlightRisk);
    }

    #[test]
    fn test_ls_moderates_fall_through_to_neutral() {
        assert_eq!(classify_ls(3.0, 3.0), LsCategory::Neutral);
        assert_eq!(classify_ls(3.0, 5.0), LsCategory::Neutral);
        assert_eq!(classify_ls(5.0, 3.0), LsCategory::Neutral);
        assert_eq!(classify_ls(2.0, 3.0), LsCategory::Neutral);
    }

    #[test]
    fn test_nps_archetypes() {
        assert_eq!(classify_nps(5.0, 10.0), NpsCategory::BrandChampions);
        assert_eq!(classify_nps(4.0, 9.0), NpsCategory::BrandChampions);
        assert_eq!(classify_nps(4.0, 6.0), NpsCategory::SatisfiedCritics);
        assert_eq!(classify_nps(2.0, 9.0), NpsCategory::LoyalPromoters);
        assert_eq!(classify_nps(1.0, 0.0), NpsCategory::VocalDetractors);
    }

    #[test]
    fn test_nps_passives_fall_through_to_neutral() {
        assert_eq!(classify_nps(5.0, 7.0), NpsCategory::Neutral);
        assert_eq!(classify_nps(5.0, 8.0), NpsCategory::Neutral);
        assert_eq!(classify_nps(2.0, 8.0), NpsCategory::Neutral);
        assert_eq!(classify_nps(3.0, 10.0), NpsCategory::Neutral);
    }

    #[test]
    fn test_classification_is_total_over_score_grid() {
        // Every (SAT, KE1, NPS) combination maps to one of the enumerated
        // labels; the match arms make anything else unrepresentable.
        for sat in 1..=5 {
            for ke1 in 1..=5 {
                let ls = classify_ls(sat as f64, ke1 as f64);
                assert!(LsCategory::all().contains(&ls));
            }
            for nps in 0..=10 {
                let label = classify_nps(sat as f64, nps as f64);
                assert!(NpsCategory::all().contains(&label));
            }
        }
    }

    #[test]
    fn test_attach_segments_adds_label_columns() {
        let schema = SurveySchema {
            factors: vec!["KE1".to_string()],
            satisfaction: "SAT".to_string(),
            nps: "NPS".to_string(),
            engagement_anchor: "KE1".to_string(),
            filter_columns: vec![],
        };
        let df = df! {
            "SAT" => [5i64, 1, 3],
            "KE1" => [5i64, 1, 3],
            "NPS" => [10i64, 0, 7],
        }
        .unwrap();

        let labeled = attach_segments(&df, &schema).unwrap();

        let ls: Vec<Option<&str>> = labeled
            .column(LS_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            ls,
            vec![
                Some("Loyal Enthusiast"),
                Some("Disengaged Flight to Risk"),
                Some("Neutral")
            ]
        );

        let nps: Vec<Option<&str>> = labeled
            .column(NPS_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            nps,
            vec![
                Some("Brand Champions"),
                Some("Vocal Detractors"),
                Some("Neutral")
            ]
        );
    }

    #[test]
    fn test_attach_segments_empty_frame() {
        let schema = SurveySchema {
            factors: vec![],
            satisfaction: "SAT".to_string(),
            nps: "NPS".to_string(),
            engagement_anchor: "KE1".to_string(),
            filter_columns: vec![],
        };
        let df = df! {
            "SAT" => Vec::<i64>::new(),
            "KE1" => Vec::<i64>::new(),
            "NPS" => Vec::<i64>::new(),
        }
        .unwrap();

        let labeled = attach_segments(&df, &schema).unwrap();
        assert_eq!(labeled.height(), 0);
        assert!(labeled.column(LS_COLUMN).is_ok());
    }

    #[test]
    fn test_category_round_trips_from_str() {
        for c in LsCategory::all() {
            assert_eq!(c.label().parse::<LsCategory>().unwrap(), c);
        }
        for c in NpsCategory::all() {
            assert_eq!(c.label().parse::<NpsCategory>().unwrap(), c);
        }
        assert!("Moonwalkers".parse::<LsCategory>().is_err());
    }
}
