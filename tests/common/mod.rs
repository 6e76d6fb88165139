//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::Path;

/// Deterministic generator for fixture values (64-bit LCG).
///
/// Keeps fixtures reproducible across runs without pulling a PRNG into
/// every test; the high bits are well-mixed enough for survey-scale data.
pub struct FixtureRng {
    state: u64,
}

impl FixtureRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 33
    }

    /// Uniform value in 0..bound
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// The 20 factor variables in schema order.
pub const FACTORS: [&str; 20] = [
    "KD1", "KD2", "KD3", "KI1", "KI2", "KI3", "KI4", "KI5", "KR1", "KR2", "KR3", "KR4", "KR5",
    "PR1", "PR2", "TU1", "TU2", "KE1", "KE2", "KE3",
];

/// Build a complete synthetic survey DataFrame.
///
/// All 16 demographic columns, the 20 factor columns (scores 1-5), SAT
/// (1-5), and NPS (0-10). Deterministic for a given seed.
pub fn survey_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = FixtureRng::new(seed);
    let mut columns: Vec<Column> = Vec::new();

    for name in FACTORS {
        let values: Vec<i64> = (0..rows).map(|_| rng.below(5) as i64 + 1).collect();
        columns.push(Column::new(name.into(), values));
    }

    let sat: Vec<i64> = (0..rows).map(|_| rng.below(5) as i64 + 1).collect();
    columns.push(Column::new("SAT".into(), sat));

    let nps: Vec<i64> = (0..rows).map(|_| rng.below(11) as i64).collect();
    columns.push(Column::new("NPS".into(), nps));

    let categorical: [(&str, &[&str]); 15] = [
        ("unit", &["U1", "U2"]),
        ("subunit", &["S1", "S2"]),
        ("directorate", &["D1", "D2"]),
        ("division", &["DV1", "DV2"]),
        ("department", &["DP1", "DP2"]),
        ("section", &["SC1", "SC2"]),
        ("layer", &["L1", "L2", "L3"]),
        ("status", &["Permanent", "Contract"]),
        ("generation", &["GenX", "GenY", "GenZ"]),
        ("gender", &["Female", "Male"]),
        ("marital", &["Single", "Married"]),
        ("education", &["HighSchool", "Bachelor", "Master"]),
        ("tenure_category", &["0-5", "5-10", "10+"]),
        ("children", &["0", "1", "2"]),
        ("region", &["West", "East", "Central"]),
    ];
    for (name, choices) in categorical {
        let values: Vec<&str> = (0..rows)
            .map(|_| choices[rng.below(choices.len() as u64) as usize])
            .collect();
        columns.push(Column::new(name.into(), values));
    }

    let participation: Vec<i64> = (0..rows).map(|_| rng.below(2) as i64).collect();
    columns.push(Column::new("participation_23".into(), participation));

    DataFrame::new(columns).unwrap()
}

/// Write a DataFrame to a CSV file for loader and CLI tests.
#[allow(dead_code)]
pub fn write_survey_csv(df: &mut DataFrame, path: &Path) {
    let mut file = std::fs::File::create(path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
}
