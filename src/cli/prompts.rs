//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Select};
use polars::prelude::DataFrame;

use crate::pipeline::{column_domain, FilterSelection, SurveySchema};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Interactively collect demographic filter selections.
///
/// Loops: confirm adding a filter, pick a column from the allow-list,
/// pick a value from the column's observed domain ("All" first, meaning
/// no constraint). Returns the accumulated selections.
pub fn prompt_filters(df: &DataFrame, schema: &SurveySchema) -> Result<Vec<FilterSelection>> {
    let mut selections = Vec::new();

    while confirm_step("Add a demographic filter?")? {
        let column_idx = Select::new()
            .with_prompt("Filter column")
            .items(&schema.filter_columns)
            .default(0)
            .interact()?;
        let column = schema.filter_columns[column_idx].clone();

        let mut choices = vec!["All".to_string()];
        choices.extend(column_domain(df, &column)?);

        let value_idx = Select::new()
            .with_prompt(format!("Value for '{}'", column))
            .items(&choices)
            .default(0)
            .interact()?;

        selections.push(FilterSelection::new(column, choices[value_idx].clone()));
    }

    Ok(selections)
}
