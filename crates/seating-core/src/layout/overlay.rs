//! Manual reservations

use std::collections::BTreeSet;

use tracing::warn;

use crate::grid::{CellState, Grid};
use crate::warning::LayoutWarning;

/// Block each requested cell that is on the grid and not stage or head table.
///
/// Applying the same set twice leaves the grid as applying it once.
pub fn apply_manual_blocks(grid: &mut Grid, coords: &BTreeSet<(i64, i64)>) -> Vec<LayoutWarning> {
    let mut warnings = Vec::new();

    for &(x, y) in coords {
        let Some(cell) = grid.cell_at(x, y) else {
            warnings.push(LayoutWarning::OutOfGrid { x, y });
            continue;
        };
        match grid.get(cell) {
            Some(state) if state.is_permanent() => {
                warnings.push(LayoutWarning::ReservedCell {
                    x: cell.x,
                    y: cell.y,
                    state,
                });
            }
            Some(_) => {
                grid.promote(cell, CellState::Blocked);
            }
            None => warnings.push(LayoutWarning::OutOfGrid { x, y }),
        }
    }

    for warning in &warnings {
        warn!(%warning, "manual block skipped");
    }
    warnings
}
