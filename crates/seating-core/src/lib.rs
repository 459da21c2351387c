//! Seating-core - banquet seating grid layout engine
//!
//! This crate provides:
//! - Layout parameters and grid geometry
//! - The placement pipeline: stage, head table, manual blocks, numbering
//! - The persisted id -> entity artifact and its store
//! - Engine configuration loading
//! - Seat lookup and per-conversation disambiguation
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod macros;

pub mod artifact;
pub mod config;
pub mod dimension;
pub mod entity;
pub mod error;
pub mod grid;
pub mod input;
pub mod layout;
pub mod lookup;
pub mod params;
pub mod preview;
pub mod warning;

pub use artifact::{ArtifactStore, GridSnapshot, LayoutResult};
pub use config::EngineConfig;
pub use dimension::{GridGeometry, STAGE_DEPTH};
pub use entity::{EntityType, HalfUnits, Position, TableEntity};
pub use error::{Error, Result};
pub use grid::{Cell, CellState, Grid};
pub use input::{parse_block_coords, parse_staggered_columns};
pub use layout::{compute_layout, LayoutOutcome};
pub use lookup::{ConversationContexts, GuestDirectory, GuestRecord, Resolution, SeatLookup};
pub use params::{
    Alignment, HeadTableSpec, LayoutParameters, NumberingAxis, StageLocation, StartCorner,
};
pub use preview::render_preview;
pub use warning::LayoutWarning;
