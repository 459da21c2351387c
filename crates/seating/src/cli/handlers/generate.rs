use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;
use seating_core::{
    compute_layout, render_preview, ArtifactStore, EntityType, Error, LayoutOutcome,
    LayoutWarning,
};
use serde::Serialize;

use crate::cli::params::{assemble, describe_stagger, load_engine_config};

/// What `generate --json` prints
#[derive(Debug, Serialize)]
pub struct GenerateSummary {
    pub artifact: String,
    pub cols: u32,
    pub rows: u32,
    pub stage_cells: usize,
    pub head_table_cells: usize,
    pub tables: usize,
    pub warnings: Vec<LayoutWarning>,
}

impl GenerateSummary {
    fn new(artifact: &Path, outcome: &LayoutOutcome, warnings: Vec<LayoutWarning>) -> Self {
        Self {
            artifact: artifact.display().to_string(),
            cols: outcome.grid.cols(),
            rows: outcome.grid.rows(),
            stage_cells: outcome.result.of_kind(EntityType::Stage).count(),
            head_table_cells: outcome.result.of_kind(EntityType::HeadTable).count(),
            tables: outcome.table_count(),
            warnings,
        }
    }
}

pub fn handle(matches: &ArgMatches) -> Result<()> {
    let config = load_engine_config(matches)?;
    let (params, mut warnings) = assemble(matches, &config.defaults)?;

    let mut outcome = compute_layout(&params, config.stage_depth)?;
    warnings.append(&mut outcome.warnings);

    if let Some(path) = matches.get_one::<String>("display-names") {
        let names = read_display_names(Path::new(path))?;
        warnings.extend(outcome.result.apply_display_names(&names));
    }

    let path = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or(config.artifact_path);
    let store = ArtifactStore::new(path);
    store.overwrite(&outcome.result)?;

    let summary = GenerateSummary::new(store.path(), &outcome, warnings);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if matches.get_flag("preview") {
        println!("{}", render_preview(&outcome.grid));
        println!();
    }

    println!("Wrote {}", summary.artifact);
    println!("  Grid:        {} x {}", summary.cols, summary.rows);
    println!("  Stage:       {} cells ({})", summary.stage_cells, params.stage_location);
    println!("  Head table:  {} cells", summary.head_table_cells);
    match summary.tables {
        0 => println!("  Tables:      none"),
        n => println!("  Tables:      T1..T{n}"),
    }
    println!("  Staggered:   {}", describe_stagger(&params.staggered_columns));
    for warning in &summary.warnings {
        println!("warning: {warning}");
    }
    Ok(())
}

fn read_display_names(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}: {e}", path.display())))?;
    let names = serde_json::from_str(&content).map_err(|e| {
        Error::parse(format!(
            "{} must be a JSON object of id -> name: {e}",
            path.display()
        ))
    })?;
    Ok(names)
}
