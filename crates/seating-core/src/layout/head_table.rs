//! Head table placement
//!
//! All validation runs against a plan before the grid is touched, so a
//! rejected head table leaves no gap, head-table or blocked cells behind.
//! Positions are computed in guest-relative `(c, d)` coordinates; see
//! [`GridGeometry`].

use std::ops::Range;

use tracing::debug;

use crate::dimension::GridGeometry;
use crate::entity::TableEntity;
use crate::grid::{Cell, CellState, Grid};
use crate::params::HeadTableSpec;
use crate::{Error, Result};

/// Validated head-table footprint
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeadTablePlan {
    /// Depth rows reserved next to the stage
    gap: Range<u32>,
    /// Cross-axis span of the table
    cross: Range<u32>,
    /// Depth span of the table
    depth: Range<u32>,
    /// Absolute cells with their relative `(c, d)` coordinates
    cells: Vec<(Cell, (u32, u32))>,
}

/// Reserve the gap, place the head table and apply its blocking rules.
///
/// # Errors
///
/// Returns `Error::Configuration` when the table would reach past the gap into
/// the stage, run past the guest-area depth, be wider than the guest area, or
/// land on a stage cell. The grid is unchanged on error.
pub fn place_head_table(
    grid: &mut Grid,
    geometry: &GridGeometry,
    spec: &HeadTableSpec,
) -> Result<Vec<TableEntity>> {
    let plan = plan(grid, geometry, spec)?;

    for d in plan.gap.clone() {
        for c in 0..geometry.cross_len() {
            if let Some(cell) = geometry.to_absolute(c, d) {
                if grid.get(cell) == Some(CellState::Empty) {
                    grid.promote(cell, CellState::BlockedGap);
                }
            }
        }
    }

    let entities: Vec<TableEntity> = plan
        .cells
        .iter()
        .filter(|(cell, _)| grid.promote(*cell, CellState::HeadTable))
        .map(|(cell, _)| TableEntity::head_table(*cell))
        .collect();

    if spec.row_index_in_zone > 0 && spec.block_leading_space {
        let leading = plan.gap.end..plan.depth.start;
        let blocked = block_region(grid, geometry, plan.cross.clone(), leading);
        debug!(blocked, "blocked leading space before head table");
    }

    if spec.blocks_behind {
        let blocked: usize = plan
            .cells
            .iter()
            .map(|&(_, (c, d))| {
                block_region(grid, geometry, c..c + 1, d + 1..geometry.guest_depth())
            })
            .sum();
        debug!(blocked, "blocked area behind head table");
    }

    debug!(
        cells = entities.len(),
        near_edge = plan.depth.start,
        cross_start = plan.cross.start,
        "placed head table"
    );
    Ok(entities)
}

fn plan(grid: &Grid, geometry: &GridGeometry, spec: &HeadTableSpec) -> Result<HeadTablePlan> {
    let guest_depth = geometry.guest_depth();
    let cross_len = geometry.cross_len();
    let gap = spec.gap_from_stage;

    let near = i64::from(gap) + i64::from(spec.row_index_in_zone);
    if near < 0 {
        return Err(Error::configuration(format!(
            "head table row_index_in_zone {} reaches past the {gap}-row gap into the stage",
            spec.row_index_in_zone
        )));
    }
    if near + i64::from(spec.depth) > i64::from(guest_depth) {
        return Err(Error::configuration(format!(
            "head table at row {near} with depth {} runs past the guest area depth {guest_depth}",
            spec.depth
        )));
    }
    if spec.width > cross_len {
        return Err(Error::configuration(format!(
            "head table width {} is wider than the guest area ({cross_len})",
            spec.width
        )));
    }

    let near = u32::try_from(near)
        .map_err(|_| Error::configuration(format!("head table row {near} is out of range")))?;
    let cross_start = spec.alignment.start_offset(cross_len, spec.width);
    let cross = cross_start..cross_start + spec.width;
    let depth = near..near + spec.depth;

    let mut cells = Vec::new();
    for d in depth.clone() {
        for c in cross.clone() {
            let cell = geometry.to_absolute(c, d).ok_or_else(|| {
                Error::configuration(format!(
                    "head table cell ({c}, {d}) falls outside the guest area"
                ))
            })?;
            match grid.get(cell) {
                Some(CellState::Stage) => {
                    return Err(Error::configuration(format!(
                        "head table cell {cell} overlaps the stage"
                    )))
                }
                Some(state) if state.is_permanent() || !state.can_become(CellState::HeadTable) => {
                    return Err(Error::configuration(format!(
                        "head table cell {cell} is already {state}"
                    )))
                }
                Some(_) => cells.push((cell, (c, d))),
                None => {
                    return Err(Error::configuration(format!(
                        "head table cell {cell} is outside the grid"
                    )))
                }
            }
        }
    }

    Ok(HeadTablePlan {
        gap: 0..gap.min(guest_depth),
        cross,
        depth,
        cells,
    })
}

/// Block every empty or gap cell in the relative region, returning how many
/// cells changed.
fn block_region(
    grid: &mut Grid,
    geometry: &GridGeometry,
    cross: Range<u32>,
    depth: Range<u32>,
) -> usize {
    let mut blocked = 0;
    for d in depth {
        for c in cross.clone() {
            let Some(cell) = geometry.to_absolute(c, d) else {
                continue;
            };
            if matches!(
                grid.get(cell),
                Some(CellState::Empty | CellState::BlockedGap)
            ) && grid.promote(cell, CellState::Blocked)
            {
                blocked += 1;
            }
        }
    }
    blocked
}
