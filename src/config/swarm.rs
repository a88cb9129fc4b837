use super::traits::ConfigSection;
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};

/// Built-in test functions selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveKind {
    Rastrigin,
    Sphere,
    /// Count of genes equal to the target phrase's character codes
    TargetMatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSwarmConfig {
    pub objective: ObjectiveKind,
    pub num_particles: usize,
    pub max_epochs: usize,
    pub dim: usize,
    pub min_x: f64,
    pub max_x: f64,
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
    /// Defaults to the largest absolute bound when unset
    pub max_velocity: Option<f64>,
    pub target_error: Option<f64>,
}

impl Default for ParticleSwarmConfig {
    fn default() -> Self {
        Self {
            objective: ObjectiveKind::Rastrigin,
            num_particles: 50,
            max_epochs: 100,
            dim: 3,
            min_x: -10.0,
            max_x: 10.0,
            inertia: 0.729,
            cognitive: 1.49445,
            social: 1.49445,
            max_velocity: None,
            target_error: None,
        }
    }
}

impl ParticleSwarmConfig {
    pub fn velocity_limit(&self) -> f64 {
        self.max_velocity
            .unwrap_or_else(|| self.min_x.abs().max(self.max_x.abs()))
    }
}

impl ConfigSection for ParticleSwarmConfig {
    fn section_name() -> &'static str {
        "particle_swarm"
    }

    fn validate(&self) -> Result<(), AlgolabError> {
        if self.num_particles == 0 {
            return Err(AlgolabError::Configuration(
                "Swarm needs at least one particle".to_string()
            ));
        }
        if self.dim == 0 {
            return Err(AlgolabError::Configuration(
                "Problem dimension must be positive".to_string()
            ));
        }
        if self.min_x >= self.max_x {
            return Err(AlgolabError::Configuration(format!(
                "Invalid bounds [{}, {}]",
                self.min_x, self.max_x
            )));
        }
        if self.objective == ObjectiveKind::TargetMatch {
            return Err(AlgolabError::Configuration(
                "Particle swarm minimizes; TargetMatch is only supported by the bee colony".to_string()
            ));
        }
        if let Some(v) = self.max_velocity {
            if v <= 0.0 {
                return Err(AlgolabError::Configuration(
                    "Max velocity must be positive".to_string()
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BeeColonyConfig {
    pub objective: ObjectiveKind,
    /// Phrase used by `TargetMatch`
    pub target: String,
    pub swarm_size: usize,
    pub max_cycles: usize,
    /// Scout threshold, `0.5 * swarm_size * dim` when unset
    pub max_unimproved_trials: Option<usize>,
    /// Used by the continuous objectives
    pub dim: usize,
    pub min_x: f64,
    pub max_x: f64,
}

impl Default for BeeColonyConfig {
    fn default() -> Self {
        Self {
            objective: ObjectiveKind::TargetMatch,
            target: "supercalifragilistic".to_string(),
            swarm_size: 100,
            max_cycles: 5000,
            max_unimproved_trials: None,
            dim: 5,
            min_x: -5.12,
            max_x: 5.12,
        }
    }
}

impl ConfigSection for BeeColonyConfig {
    fn section_name() -> &'static str {
        "bee_colony"
    }

    fn validate(&self) -> Result<(), AlgolabError> {
        if self.swarm_size < 2 {
            return Err(AlgolabError::Configuration(
                "Bee colony needs at least two bees".to_string()
            ));
        }
        match self.objective {
            ObjectiveKind::TargetMatch => {
                if self.target.is_empty() || !self.target.chars().all(|c| c.is_ascii_lowercase()) {
                    return Err(AlgolabError::Configuration(
                        "Bee colony target must be a non-empty lowercase ascii word".to_string()
                    ));
                }
            }
            _ => {
                if self.dim == 0 {
                    return Err(AlgolabError::Configuration(
                        "Problem dimension must be positive".to_string()
                    ));
                }
                if self.min_x >= self.max_x {
                    return Err(AlgolabError::Configuration(format!(
                        "Invalid bounds [{}, {}]",
                        self.min_x, self.max_x
                    )));
                }
            }
        }
        Ok(())
    }
}
