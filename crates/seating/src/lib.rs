//! Seating - banquet seating chart layout generator
//!
//! Command-line front end for `seating-core`: assembles layout parameters,
//! runs the engine and manages the shared artifact.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
