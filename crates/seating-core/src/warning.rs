//! Non-fatal issues surfaced next to a successful layout

use std::fmt;

use serde::Serialize;

use crate::grid::CellState;

/// A dropped input entry; the computation carried on without it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// Entry had the wrong shape or was not numeric
    MalformedInput { field: String, detail: String },
    /// Manual reservation outside the grid
    OutOfGrid { x: i64, y: i64 },
    /// Manual reservation on a stage or head-table cell
    ReservedCell { x: u32, y: u32, state: CellState },
    /// Display name for an id that is not in the layout
    UnknownEntity { id: String },
}

impl LayoutWarning {
    pub fn malformed(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput { field, detail } => {
                write!(f, "ignored malformed {field} entry: {detail}")
            }
            Self::OutOfGrid { x, y } => {
                write!(f, "manual block ({x}, {y}) is outside the grid")
            }
            Self::ReservedCell { x, y, state } => {
                write!(f, "manual block ({x}, {y}) overlaps {state}, skipped")
            }
            Self::UnknownEntity { id } => write!(f, "no entity with id '{id}'"),
        }
    }
}
