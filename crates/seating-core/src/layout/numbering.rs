//! Guest table numbering
//!
//! The guest area is walked as two nested loops. Which axis is the outer loop
//! comes from the numbering axis; which way each loop runs comes from
//! [`traversal_directions`], a fixed table over stage side and start corner.

use tracing::debug;

use crate::dimension::GridGeometry;
use crate::grid::{Cell, CellState, Grid};
use crate::params::{NumberingAxis, StageLocation, StartCorner};

/// A table number assigned to a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedTable {
    pub number: u32,
    pub cell: Cell,
}

/// `(reverse_cross, reverse_normal)` for each stage side and start corner.
///
/// "Reverse" means walking from the high absolute coordinate down, so that
/// the walk starts in the requested corner.
#[must_use]
pub const fn traversal_directions(location: StageLocation, corner: StartCorner) -> (bool, bool) {
    use StageLocation::{Bottom, Left, Right, Top};
    use StartCorner::{BackLeft, BackRight, FrontLeft, FrontRight};

    match (location, corner) {
        (Top, FrontLeft) => (false, true),
        (Top, FrontRight) => (true, true),
        (Top, BackLeft) => (false, false),
        (Top, BackRight) => (true, false),

        (Bottom, FrontLeft) => (false, false),
        (Bottom, FrontRight) => (true, false),
        (Bottom, BackLeft) => (false, true),
        (Bottom, BackRight) => (true, true),

        (Left, FrontLeft) => (false, false),
        (Left, FrontRight) => (true, false),
        (Left, BackLeft) => (false, true),
        (Left, BackRight) => (true, true),

        (Right, FrontLeft) => (false, true),
        (Right, FrontRight) => (true, true),
        (Right, BackLeft) => (false, false),
        (Right, BackRight) => (true, false),
    }
}

fn axis_values(start: u32, len: u32, reverse: bool) -> Vec<u32> {
    let values = start..start + len;
    if reverse {
        values.rev().collect()
    } else {
        values.collect()
    }
}

/// Number every still-empty guest cell `1..=K` in traversal order.
pub fn number_tables(
    grid: &mut Grid,
    geometry: &GridGeometry,
    axis: NumberingAxis,
    corner: StartCorner,
) -> Vec<NumberedTable> {
    let (reverse_cross, reverse_normal) = traversal_directions(geometry.stage_location, corner);
    let (cross_origin, normal_origin) = geometry.axes_of(geometry.guest_origin);

    let cross = axis_values(cross_origin, geometry.cross_len(), reverse_cross);
    let normal = axis_values(normal_origin, geometry.guest_depth(), reverse_normal);

    let order: Vec<Cell> = match axis {
        NumberingAxis::TowardsStage => normal
            .iter()
            .flat_map(|&n| cross.iter().map(move |&c| (c, n)))
            .map(|(c, n)| geometry.cell_from_axes(c, n))
            .collect(),
        NumberingAxis::ParallelToStage => cross
            .iter()
            .flat_map(|&c| normal.iter().map(move |&n| (c, n)))
            .map(|(c, n)| geometry.cell_from_axes(c, n))
            .collect(),
    };

    let mut next = 1;
    let mut tables = Vec::new();
    for cell in order {
        if grid.get(cell) == Some(CellState::Empty) && grid.promote(cell, CellState::Table(next)) {
            tables.push(NumberedTable { number: next, cell });
            next += 1;
        }
    }

    debug!(
        tables = tables.len(),
        axis = %axis,
        corner = %corner,
        reverse_cross,
        reverse_normal,
        "numbered guest tables"
    );
    tables
}
