pub mod objective;
pub mod particle;
pub mod bee_colony;

use crate::engines::report::RunInfo;
use serde::{Deserialize, Serialize};

pub use bee_colony::{Hive, Honeybee};
pub use objective::{Bounds, Direction, FnObjective, Objective, Rastrigin, Sphere, TargetMatch};
pub use particle::{Coefficients, Particle, ParticleSwarm};

/// Outcome of a swarm run; `history` holds the best value before the first
/// iteration and after each one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmReport {
    pub run: RunInfo,
    pub objective: String,
    pub best_position: Vec<f64>,
    pub best_description: String,
    pub best_value: f64,
    pub iterations: usize,
    pub converged: bool,
    pub history: Vec<f64>,
}
