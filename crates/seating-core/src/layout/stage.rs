//! Stage footprint placement

use tracing::debug;

use crate::dimension::GridGeometry;
use crate::entity::TableEntity;
use crate::grid::{CellState, Grid};
use crate::params::LayoutParameters;

/// Write the stage into `grid` and return one entity per stage cell.
///
/// The footprint is `stage_front_width x stage_depth`, clamped to the grid,
/// aligned along the cross axis and pinned to the grid edge the stage sits on.
/// Band cells beside a narrower stage are blocked; nobody is seated there.
pub fn place_stage(
    grid: &mut Grid,
    geometry: &GridGeometry,
    params: &LayoutParameters,
) -> Vec<TableEntity> {
    let cross_len = geometry.grid_cross_len();
    let normal_len = geometry.grid_normal_len();

    let front = params.stage_front_width.clamp(1, cross_len);
    let depth = geometry.stage_depth.clamp(1, normal_len);

    let cross_start = params
        .stage_alignment
        .start_offset(cross_len, front)
        .min(cross_len - front);
    let normal_start = if geometry.depth_ascending() {
        0
    } else {
        normal_len - depth
    };

    let band = normal_start..normal_start + depth;

    let entities: Vec<TableEntity> = band
        .clone()
        .flat_map(|normal| (cross_start..cross_start + front).map(move |cross| (cross, normal)))
        .map(|(cross, normal)| geometry.cell_from_axes(cross, normal))
        .filter(|cell| grid.promote(*cell, CellState::Stage))
        .map(TableEntity::stage)
        .collect();

    let wings = band
        .flat_map(|normal| (0..cross_len).map(move |cross| (cross, normal)))
        .map(|(cross, normal)| geometry.cell_from_axes(cross, normal))
        .filter(|cell| grid.promote(*cell, CellState::Blocked))
        .count();

    debug!(
        cells = entities.len(),
        wings,
        alignment = %params.stage_alignment,
        cross_start,
        "placed stage"
    );
    entities
}
