use super::traits::ConfigSection;
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub n_clusters: usize,
    pub n_init: usize,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            n_clusters: 128,
            n_init: 10,
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

impl ConfigSection for ClusteringConfig {
    fn section_name() -> &'static str {
        "clustering"
    }

    fn validate(&self) -> Result<(), AlgolabError> {
        if self.n_clusters == 0 {
            return Err(AlgolabError::Configuration(
                "Number of clusters must be positive".to_string()
            ));
        }
        if self.n_init == 0 || self.max_iter == 0 {
            return Err(AlgolabError::Configuration(
                "n_init and max_iter must be positive".to_string()
            ));
        }
        if self.tolerance < 0.0 {
            return Err(AlgolabError::Configuration(
                "Tolerance must not be negative".to_string()
            ));
        }
        Ok(())
    }
}
