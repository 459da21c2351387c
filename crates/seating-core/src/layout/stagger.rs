//! Half-unit rendering offset for selected guest columns

use std::collections::BTreeSet;

use tracing::debug;

use crate::dimension::GridGeometry;
use crate::entity::{Position, TableEntity};
use crate::grid::Cell;

use super::numbering::NumberedTable;

/// 1-based index of `cell` along the guest-area cross axis
#[must_use]
pub fn visual_index(geometry: &GridGeometry, cell: Cell) -> Option<u32> {
    geometry.to_relative(cell).map(|(c, _)| c + 1)
}

/// Rendered position of a table cell. Only the stage-normal coordinate moves;
/// occupancy stays on the whole cell.
#[must_use]
pub fn rendered_position(
    geometry: &GridGeometry,
    cell: Cell,
    staggered: &BTreeSet<u32>,
) -> Position {
    let position = Position::of_cell(cell);
    let shifted = visual_index(geometry, cell).is_some_and(|index| staggered.contains(&index));
    if !shifted {
        return position;
    }

    if geometry.stage_is_horizontal() {
        Position {
            y: position.y.plus_half(),
            ..position
        }
    } else {
        Position {
            x: position.x.plus_half(),
            ..position
        }
    }
}

/// Whether a rendered coordinate carries a half-unit offset
#[must_use]
pub const fn is_staggered(position: Position) -> bool {
    !(position.x.is_whole() && position.y.is_whole())
}

/// Turn numbered cells into `normal` entities with stagger applied
#[must_use]
pub fn table_entities(
    geometry: &GridGeometry,
    tables: &[NumberedTable],
    staggered: &BTreeSet<u32>,
) -> Vec<TableEntity> {
    let entities: Vec<TableEntity> = tables
        .iter()
        .map(|table| {
            TableEntity::normal(
                table.number,
                rendered_position(geometry, table.cell, staggered),
            )
        })
        .collect();

    let shifted = entities
        .iter()
        .filter(|e| is_staggered(e.position))
        .count();
    debug!(shifted, columns = staggered.len(), "applied stagger");
    entities
}
