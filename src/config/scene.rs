use super::traits::ConfigSection;
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Distance from the camera at which new nodes are placed
    pub place_depth: f64,
    pub scale_up: f64,
    pub scale_down: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            place_depth: 15.0,
            scale_up: 1.1,
            scale_down: 0.9,
        }
    }
}

impl ConfigSection for SceneConfig {
    fn section_name() -> &'static str {
        "scene"
    }

    fn validate(&self) -> Result<(), AlgolabError> {
        if self.place_depth <= 0.0 {
            return Err(AlgolabError::Configuration(
                "Place depth must be positive".to_string()
            ));
        }
        if self.scale_up <= 1.0 || self.scale_down <= 0.0 || self.scale_down >= 1.0 {
            return Err(AlgolabError::Configuration(
                "Scale steps must satisfy scale_up > 1 and 0 < scale_down < 1".to_string()
            ));
        }
        Ok(())
    }
}
