//! Configuration structure definitions

use serde::{Deserialize, Serialize};

use crate::dimension::STAGE_DEPTH;
use crate::params::LayoutParameters;

/// Artifact file written when nothing else is configured
pub const DEFAULT_ARTIFACT_PATH: &str = "table_locations.json";

/// Fully resolved engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Stage depth in grid units
    pub stage_depth: u32,
    /// Where the layout artifact lives
    pub artifact_path: String,
    /// Request values used when a caller leaves a field out
    pub defaults: LayoutParameters,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stage_depth: STAGE_DEPTH,
            artifact_path: DEFAULT_ARTIFACT_PATH.to_string(),
            defaults: LayoutParameters::default(),
        }
    }
}

/// One config file; absent keys leave the lower layer untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub stage_depth: Option<u32>,
    pub artifact_path: Option<String>,
    pub defaults: Option<LayoutParameters>,
}
