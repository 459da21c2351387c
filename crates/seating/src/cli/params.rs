//! Assemble `LayoutParameters` from config defaults, a parameter file and flags
//!
//! Precedence, lowest first: configured defaults, `--params` file, flags.
//! Keys missing from the parameter file keep the configured default.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use seating_core::params::parse_choice;
use seating_core::{
    config, parse_block_coords, parse_staggered_columns, EngineConfig, Error, HeadTableSpec,
    LayoutParameters, LayoutWarning,
};
use serde_json::Value;

/// Engine config from `--config`, or the normal hierarchy
pub fn load_engine_config(matches: &ArgMatches) -> Result<EngineConfig> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => config::load_config_from(Path::new(path))?,
        None => config::load_config()?,
    };
    Ok(config)
}

/// Parameters for one computation plus any dropped loose-input entries
pub fn assemble(
    matches: &ArgMatches,
    defaults: &LayoutParameters,
) -> Result<(LayoutParameters, Vec<LayoutWarning>)> {
    let base = match matches.get_one::<String>("params") {
        Some(path) => load_params_file(Path::new(path), defaults)?,
        None => defaults.clone(),
    };
    apply_flags(base, matches)
}

fn load_params_file(path: &Path, defaults: &LayoutParameters) -> Result<LayoutParameters> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}: {e}", path.display())))?;

    let overrides: Value = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content)
            .map_err(|e| Error::parse(format!("Failed to parse {}: {e}", path.display())))?
    } else {
        serde_json::from_str(&content)
            .map_err(|e| Error::parse(format!("Failed to parse {}: {e}", path.display())))?
    };

    let Value::Object(overrides) = overrides else {
        return Err(Error::parse(format!(
            "{} must contain a table of parameters",
            path.display()
        ))
        .into());
    };

    let mut merged = serde_json::to_value(defaults).context("Failed to encode default parameters")?;
    if let Value::Object(base) = &mut merged {
        base.extend(overrides);
    }

    serde_json::from_value(merged)
        .map_err(|e| Error::configuration(format!("Invalid parameters in {}: {e}", path.display())))
        .map_err(Into::into)
}

fn apply_flags(
    mut params: LayoutParameters,
    matches: &ArgMatches,
) -> Result<(LayoutParameters, Vec<LayoutWarning>)> {
    let mut warnings = Vec::new();

    if let Some(raw) = matches.get_one::<String>("stage-location") {
        params.stage_location = parse_choice("stage_location", raw)?;
    }
    if let Some(width) = matches.get_one::<u32>("stage-width") {
        params.stage_front_width = *width;
    }
    if let Some(raw) = matches.get_one::<String>("stage-alignment") {
        params.stage_alignment = parse_choice("stage_alignment", raw)?;
    }
    if let Some(depth) = matches.get_one::<u32>("depth") {
        params.guest_area_depth = *depth;
    }
    if let Some(width) = matches.get_one::<u32>("width") {
        params.guest_area_width = *width;
    }
    if let Some(raw) = matches.get_one::<String>("axis") {
        params.numbering_primary_axis = parse_choice("numbering_primary_axis", raw)?;
    }
    if let Some(raw) = matches.get_one::<String>("corner") {
        params.numbering_start_corner = parse_choice("numbering_start_corner", raw)?;
    }

    params.head_table_spec = head_table_from_flags(params.head_table_spec.take(), matches)?;

    for raw in matches.get_many::<String>("block").into_iter().flatten() {
        params.manual_block_coords.insert(parse_block_flag(raw)?);
    }
    if let Some(raw) = matches.get_one::<String>("blocks-json") {
        let (coords, dropped) = parse_block_coords(raw);
        params.manual_block_coords.extend(coords);
        warnings.extend(dropped);
    }

    params
        .staggered_columns
        .extend(matches.get_many::<u32>("stagger").into_iter().flatten().copied());
    if let Some(raw) = matches.get_one::<String>("stagger-json") {
        let (columns, dropped) = parse_staggered_columns(raw);
        params.staggered_columns.extend(columns);
        warnings.extend(dropped);
    }

    Ok((params, warnings))
}

const HEAD_TABLE_FLAGS: [&str; 5] = [
    "ht-alignment",
    "ht-gap",
    "ht-row",
    "ht-block-leading",
    "ht-block-behind",
];

fn head_table_from_flags(
    current: Option<HeadTableSpec>,
    matches: &ArgMatches,
) -> Result<Option<HeadTableSpec>> {
    if matches.get_flag("no-head-table") {
        return Ok(None);
    }

    let size = matches
        .get_one::<String>("head-table")
        .map(String::as_str)
        .map(parse_size)
        .transpose()?;
    let touched = size.is_some()
        || HEAD_TABLE_FLAGS
            .iter()
            .any(|id| matches.value_source(id) == Some(clap::parser::ValueSource::CommandLine));
    if !touched {
        return Ok(current);
    }

    let mut spec = match (current, size) {
        (Some(spec), _) => spec,
        (None, Some(_)) => HeadTableSpec::default(),
        (None, None) => {
            return Err(Error::configuration(
                "--ht-* flags adjust a head table; add --head-table WIDTHxDEPTH to place one",
            )
            .into());
        }
    };
    if let Some((width, depth)) = size {
        spec.use_head_table = true;
        spec.width = width;
        spec.depth = depth;
    }
    if let Some(raw) = matches.get_one::<String>("ht-alignment") {
        spec.alignment = parse_choice("head_table.alignment", raw)?;
    }
    if let Some(gap) = matches.get_one::<u32>("ht-gap") {
        spec.gap_from_stage = *gap;
    }
    if let Some(row) = matches.get_one::<i32>("ht-row") {
        spec.row_index_in_zone = *row;
    }
    if matches.get_flag("ht-block-leading") {
        spec.block_leading_space = true;
    }
    if matches.get_flag("ht-block-behind") {
        spec.blocks_behind = true;
    }
    Ok(Some(spec))
}

/// `2x1` -> `(2, 1)`
fn parse_size(raw: &str) -> Result<(u32, u32)> {
    let parsed = raw
        .trim()
        .split_once(['x', 'X'])
        .and_then(|(w, d)| Some((w.trim().parse().ok()?, d.trim().parse().ok()?)));
    parsed.ok_or_else(|| {
        Error::parse(format!("invalid head table size '{raw}', expected WIDTHxDEPTH like 2x1"))
            .into()
    })
}

/// `3,-1` -> `(3, -1)`
fn parse_block_flag(raw: &str) -> Result<(i64, i64)> {
    let parsed = raw
        .split_once(',')
        .and_then(|(x, y)| Some((x.trim().parse().ok()?, y.trim().parse().ok()?)));
    parsed.ok_or_else(|| {
        Error::parse(format!("invalid --block '{raw}', expected X,Y like 0,3")).into()
    })
}

/// Distinct staggered columns, for summaries
pub fn describe_stagger(columns: &BTreeSet<u32>) -> String {
    if columns.is_empty() {
        "none".to_string()
    } else {
        columns
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
