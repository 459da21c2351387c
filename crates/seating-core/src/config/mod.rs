//! Engine configuration
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: `<config dir>/seating/config.toml`
//! 3. Project config: `.seating/config.toml`
//! 4. Environment variables: `SEATING_*`
//! 5. CLI flags (command-specific)
//!
//! # Example Config
//!
//! ```toml
//! stage_depth = 1
//! artifact_path = "table_locations.json"
//!
//! [defaults]
//! stage_location = "TOP"
//! guest_area_depth = 8
//! guest_area_width = 5
//! numbering_start_corner = "BACK_LEFT"
//! ```

mod load;
mod merge;
mod types;
mod validate;

#[cfg(test)]
mod tests_loading;

pub use load::{
    global_config_path, load_config, load_config_from, load_toml_file, project_config_path,
};
pub use types::{ConfigLayer, EngineConfig, DEFAULT_ARTIFACT_PATH};
