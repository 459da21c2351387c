//! Layer merging
//!
//! Each merge returns a new config; the upper layer wins key by key.

use super::types::{ConfigLayer, EngineConfig};

impl EngineConfig {
    /// Apply a file layer on top of this config
    #[must_use]
    pub fn merge(self, layer: ConfigLayer) -> Self {
        Self {
            stage_depth: layer.stage_depth.unwrap_or(self.stage_depth),
            artifact_path: layer.artifact_path.unwrap_or(self.artifact_path),
            defaults: layer.defaults.unwrap_or(self.defaults),
        }
    }
}
