//! Layout pipeline
//!
//! One call to [`compute_layout`] owns a fresh [`Grid`] and runs the placement
//! steps in order:
//!
//! 1. dimensioning ([`GridGeometry::derive`])
//! 2. stage ([`stage::place_stage`])
//! 3. head table, when enabled ([`head_table::place_head_table`])
//! 4. manual reservations ([`overlay::apply_manual_blocks`])
//! 5. numbering and stagger ([`numbering::number_tables`],
//!    [`stagger::table_entities`])
//!
//! Any `Error::Configuration` aborts the whole computation; nothing is
//! returned that a caller could persist.

pub mod head_table;
pub mod numbering;
pub mod overlay;
pub mod stage;
pub mod stagger;

use tracing::{debug, info_span};

use crate::artifact::LayoutResult;
use crate::dimension::GridGeometry;
use crate::grid::Grid;
use crate::params::LayoutParameters;
use crate::warning::LayoutWarning;
use crate::Result;

/// Everything a successful computation produced
#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    pub result: LayoutResult,
    pub grid: Grid,
    pub geometry: GridGeometry,
    pub warnings: Vec<LayoutWarning>,
}

impl LayoutOutcome {
    /// Number of guest tables assigned
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.result.normal_count()
    }
}

/// Compute a complete layout for `params`
///
/// # Errors
///
/// Returns `Error::Configuration` when the parameters fail validation or the
/// head table cannot be placed.
pub fn compute_layout(params: &LayoutParameters, stage_depth: u32) -> Result<LayoutOutcome> {
    let span = info_span!(
        "compute_layout",
        stage = %params.stage_location,
        depth = params.guest_area_depth,
        width = params.guest_area_width
    );
    let _guard = span.enter();

    let geometry = GridGeometry::derive(params, stage_depth)?;
    let mut grid = Grid::new(geometry.cols, geometry.rows);

    let mut entities = stage::place_stage(&mut grid, &geometry, params);

    if let Some(spec) = params.active_head_table() {
        entities.extend(head_table::place_head_table(&mut grid, &geometry, spec)?);
    }

    let warnings = overlay::apply_manual_blocks(&mut grid, &params.manual_block_coords);

    let tables = numbering::number_tables(
        &mut grid,
        &geometry,
        params.numbering_primary_axis,
        params.numbering_start_corner,
    );
    entities.extend(stagger::table_entities(
        &geometry,
        &tables,
        &params.staggered_columns,
    ));

    let result = LayoutResult::from_entities(entities);
    debug!(
        entities = result.len(),
        tables = tables.len(),
        warnings = warnings.len(),
        "layout computed"
    );

    Ok(LayoutOutcome {
        result,
        grid,
        geometry,
        warnings,
    })
}
