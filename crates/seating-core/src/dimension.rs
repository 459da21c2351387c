//! Grid extents and the stage-relative coordinate frame
//!
//! Every placement step after dimensioning works in guest-relative `(c, d)`
//! coordinates: `c` runs along the stage front from the guest-area origin and
//! `d` is the distance from the stage (0 = the row or column touching it).
//! [`GridGeometry::to_absolute`] is the single place that maps those back to
//! grid `(x, y)` for each stage side.

use tracing::debug;

use crate::grid::Cell;
use crate::params::{LayoutParameters, StageLocation};
use crate::{Error, Result};

/// Default stage depth in grid units
pub const STAGE_DEPTH: u32 = 1;

/// Largest grid accepted, in cells
pub const MAX_GRID_CELLS: u64 = 1_000_000;

/// How the guest-relative frame sits on the absolute grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Orientation {
    /// Cross axis is `x` (otherwise `y`)
    cross_is_x: bool,
    /// `d` grows with the absolute normal coordinate
    depth_ascending: bool,
}

const fn orientation(location: StageLocation) -> Orientation {
    match location {
        StageLocation::Top => Orientation {
            cross_is_x: true,
            depth_ascending: false,
        },
        StageLocation::Bottom => Orientation {
            cross_is_x: true,
            depth_ascending: true,
        },
        StageLocation::Left => Orientation {
            cross_is_x: false,
            depth_ascending: true,
        },
        StageLocation::Right => Orientation {
            cross_is_x: false,
            depth_ascending: false,
        },
    }
}

/// Output of the dimensioning step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub cols: u32,
    pub rows: u32,
    /// Bottom-left cell of the guest area
    pub guest_origin: Cell,
    /// Guest area `(width, height)` on the absolute axes
    pub guest_extent: (u32, u32),
    pub stage_location: StageLocation,
    pub stage_depth: u32,
}

impl GridGeometry {
    /// Derive grid extents from the stage side and guest-area sizes
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` for zero sizes, a zero stage depth, or a
    /// grid larger than [`MAX_GRID_CELLS`].
    pub fn derive(params: &LayoutParameters, stage_depth: u32) -> Result<Self> {
        if stage_depth == 0 {
            return Err(Error::configuration("stage depth must be at least 1"));
        }
        params.validate()?;

        let depth = params.guest_area_depth;
        let width = params.guest_area_width;
        let location = params.stage_location;
        let span = depth.checked_add(stage_depth).ok_or_else(|| {
            Error::configuration(format!(
                "guest area depth {depth} plus stage depth {stage_depth} overflows the grid"
            ))
        })?;
        let cells = u64::from(span) * u64::from(width);
        if cells > MAX_GRID_CELLS {
            return Err(Error::configuration(format!(
                "grid of {cells} cells exceeds the limit of {MAX_GRID_CELLS}"
            )));
        }

        let geometry = match location {
            StageLocation::Top | StageLocation::Bottom => Self {
                cols: width,
                rows: span,
                guest_origin: Cell::new(
                    0,
                    if location == StageLocation::Bottom {
                        stage_depth
                    } else {
                        0
                    },
                ),
                guest_extent: (width, depth),
                stage_location: location,
                stage_depth,
            },
            StageLocation::Left | StageLocation::Right => Self {
                cols: span,
                rows: width,
                guest_origin: Cell::new(
                    if location == StageLocation::Left {
                        stage_depth
                    } else {
                        0
                    },
                    0,
                ),
                guest_extent: (depth, width),
                stage_location: location,
                stage_depth,
            },
        };

        debug!(
            cols = geometry.cols,
            rows = geometry.rows,
            stage = %location,
            "derived grid geometry"
        );
        Ok(geometry)
    }

    #[must_use]
    pub const fn stage_is_horizontal(&self) -> bool {
        self.stage_location.is_horizontal()
    }

    /// Guest-area length along the stage front
    #[must_use]
    pub const fn cross_len(&self) -> u32 {
        if orientation(self.stage_location).cross_is_x {
            self.guest_extent.0
        } else {
            self.guest_extent.1
        }
    }

    /// Guest-area length away from the stage
    #[must_use]
    pub const fn guest_depth(&self) -> u32 {
        if orientation(self.stage_location).cross_is_x {
            self.guest_extent.1
        } else {
            self.guest_extent.0
        }
    }

    /// Grid length along the cross axis
    #[must_use]
    pub const fn grid_cross_len(&self) -> u32 {
        if orientation(self.stage_location).cross_is_x {
            self.cols
        } else {
            self.rows
        }
    }

    /// Grid length along the stage-normal axis
    #[must_use]
    pub const fn grid_normal_len(&self) -> u32 {
        if orientation(self.stage_location).cross_is_x {
            self.rows
        } else {
            self.cols
        }
    }

    /// Whether absolute normal coordinates grow away from the stage
    #[must_use]
    pub const fn depth_ascending(&self) -> bool {
        orientation(self.stage_location).depth_ascending
    }

    /// Build an absolute cell from cross and normal coordinates
    #[must_use]
    pub const fn cell_from_axes(&self, cross: u32, normal: u32) -> Cell {
        if orientation(self.stage_location).cross_is_x {
            Cell::new(cross, normal)
        } else {
            Cell::new(normal, cross)
        }
    }

    /// Split an absolute cell into `(cross, normal)` coordinates
    #[must_use]
    pub const fn axes_of(&self, cell: Cell) -> (u32, u32) {
        if orientation(self.stage_location).cross_is_x {
            (cell.x, cell.y)
        } else {
            (cell.y, cell.x)
        }
    }

    /// Map guest-relative `(c, d)` onto the grid; `None` outside the guest area
    #[must_use]
    pub fn to_absolute(&self, c: u32, d: u32) -> Option<Cell> {
        let depth = self.guest_depth();
        if c >= self.cross_len() || d >= depth {
            return None;
        }
        let (cross_origin, normal_origin) = self.axes_of(self.guest_origin);
        let normal = if self.depth_ascending() {
            normal_origin + d
        } else {
            normal_origin + (depth - 1 - d)
        };
        Some(self.cell_from_axes(cross_origin + c, normal))
    }

    /// Inverse of [`Self::to_absolute`]
    #[must_use]
    pub fn to_relative(&self, cell: Cell) -> Option<(u32, u32)> {
        let (cross, normal) = self.axes_of(cell);
        let (cross_origin, normal_origin) = self.axes_of(self.guest_origin);
        let c = cross.checked_sub(cross_origin)?;
        let offset = normal.checked_sub(normal_origin)?;
        let depth = self.guest_depth();
        if c >= self.cross_len() || offset >= depth {
            return None;
        }
        let d = if self.depth_ascending() {
            offset
        } else {
            depth - 1 - offset
        };
        Some((c, d))
    }

    /// Whether `cell` lies in the guest area
    #[must_use]
    pub fn in_guest_area(&self, cell: Cell) -> bool {
        self.to_relative(cell).is_some()
    }
}
