//! Configuration validation

use super::types::EngineConfig;
use crate::{Error, Result};

impl EngineConfig {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` when the stage depth is zero, the
    /// artifact path is blank or the default request parameters are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.stage_depth == 0 {
            return Err(Error::invalid_config("stage_depth must be at least 1"));
        }

        if self.artifact_path.trim().is_empty() {
            return Err(Error::invalid_config(
                "artifact_path cannot be empty - unset it or provide a file path",
            ));
        }

        self.defaults
            .validate()
            .map_err(|e| Error::invalid_config(format!("[defaults] {e}")))
    }
}
