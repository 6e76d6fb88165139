//! Analysis export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    group_by_quadrant, CategoryShare, FactorRecord, FilterSelection, IpaAnalysis,
};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Quadra version
    pub quadra_version: String,
    /// Input file path
    pub input_file: String,
    /// Demographic filters that constrained the population
    pub filters: Vec<FilterSelection>,
    /// Secondary likelihood-to-stay category filter, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ls_filter: Option<String>,
    /// Secondary NPS category filter, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nps_filter: Option<String>,
    /// Respondents in the full dataset
    pub respondents_total: usize,
    /// Respondents after filtering
    pub respondents_filtered: usize,
}

/// Factor names that landed in one quadrant
#[derive(Serialize)]
pub struct QuadrantGroup {
    pub quadrant: String,
    pub factors: Vec<String>,
}

/// The importance-performance section of the export
#[derive(Serialize)]
pub struct IpaSection {
    pub importance_midpoint: f64,
    pub performance_midpoint: f64,
    pub factors: Vec<FactorRecord>,
    pub quadrants: Vec<QuadrantGroup>,
}

/// Complete analysis export with metadata
#[derive(Serialize)]
pub struct AnalysisExport {
    /// Metadata about the analysis run
    pub metadata: AnalysisMetadata,
    /// Importance-performance results; absent when the population was
    /// too small or degenerate for the regression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipa: Option<IpaSection>,
    /// Likelihood-to-stay distribution
    pub ls_distribution: Vec<CategoryShare>,
    /// NPS distribution
    pub nps_distribution: Vec<CategoryShare>,
}

/// Parameters for the analysis export
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub filters: &'a [FilterSelection],
    pub ls_filter: Option<&'a str>,
    pub nps_filter: Option<&'a str>,
    pub respondents_total: usize,
    pub respondents_filtered: usize,
}

/// Build the export structure from one run's results.
pub fn build_export(
    ipa: Option<&IpaAnalysis>,
    ls_distribution: &[CategoryShare],
    nps_distribution: &[CategoryShare],
    params: &ExportParams,
) -> AnalysisExport {
    let ipa_section = ipa.map(|analysis| IpaSection {
        importance_midpoint: analysis.importance_midpoint,
        performance_midpoint: analysis.performance_midpoint,
        factors: analysis.records.clone(),
        quadrants: group_by_quadrant(&analysis.records)
            .into_iter()
            .map(|(quadrant, factors)| QuadrantGroup {
                quadrant: quadrant.label().to_string(),
                factors,
            })
            .collect(),
    });

    AnalysisExport {
        metadata: AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            quadra_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            filters: params.filters.to_vec(),
            ls_filter: params.ls_filter.map(|s| s.to_string()),
            nps_filter: params.nps_filter.map(|s| s.to_string()),
            respondents_total: params.respondents_total,
            respondents_filtered: params.respondents_filtered,
        },
        ipa: ipa_section,
        ls_distribution: ls_distribution.to_vec(),
        nps_distribution: nps_distribution.to_vec(),
    }
}

/// Write the analysis export to a JSON file.
pub fn export_analysis(
    ipa: Option<&IpaAnalysis>,
    ls_distribution: &[CategoryShare],
    nps_distribution: &[CategoryShare],
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = build_export(ipa, ls_distribution, nps_distribution, params);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize analysis to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis to {}", output_path.display()))?;

    Ok(())
}
