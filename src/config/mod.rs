pub mod traits;
pub mod evolution;
pub mod swarm;
pub mod clustering;
pub mod scene;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{EvolutionConfig, SelectionMethod};
pub use swarm::{BeeColonyConfig, ObjectiveKind, ParticleSwarmConfig};
pub use clustering::ClusteringConfig;
pub use scene::SceneConfig;
pub use traits::ConfigSection;
