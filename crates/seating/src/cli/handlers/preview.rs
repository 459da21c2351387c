use anyhow::Result;
use clap::ArgMatches;
use seating_core::{compute_layout, render_preview, GridSnapshot};
use serde_json::json;

use crate::cli::params::{assemble, load_engine_config};

pub fn handle(matches: &ArgMatches) -> Result<()> {
    let config = load_engine_config(matches)?;
    let (params, mut warnings) = assemble(matches, &config.defaults)?;
    let outcome = compute_layout(&params, config.stage_depth)?;
    warnings.extend(outcome.warnings.iter().cloned());

    if matches.get_flag("json") {
        let output = json!({
            "grid": GridSnapshot::of(&outcome.grid),
            "layout": outcome.result,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", render_preview(&outcome.grid));
    println!();
    println!(
        "{} x {} grid, {} tables",
        outcome.grid.cols(),
        outcome.grid.rows(),
        outcome.table_count()
    );
    for warning in &warnings {
        println!("warning: {warning}");
    }
    Ok(())
}
