use super::{
    clustering::ClusteringConfig,
    evolution::EvolutionConfig,
    scene::SceneConfig,
    swarm::{BeeColonyConfig, ParticleSwarmConfig},
    traits::ConfigSection,
};
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `ALGOLAB__EVOLUTION__POPULATION_SIZE=200`
pub const ENV_PREFIX: &str = "ALGOLAB";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub particle_swarm: ParticleSwarmConfig,
    pub bee_colony: BeeColonyConfig,
    pub clustering: ClusteringConfig,
    pub scene: SceneConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AlgolabError> {
        self.evolution.validate()?;
        self.particle_swarm.validate()?;
        self.bee_colony.validate()?;
        self.clustering.validate()?;
        self.scene.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layer defaults, an optional TOML file and `ALGOLAB__*` environment variables
    pub fn load(&self, path: Option<&Path>) -> Result<(), AlgolabError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            if !path.exists() {
                return Err(AlgolabError::Configuration(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(
                config::File::from(path).format(config::FileFormat::Toml),
            );
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);

        *self.write_guard()? = config;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AlgolabError> {
        self.load(Some(path.as_ref()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AlgolabError> {
        let config = self.get()?;
        let toml_str = toml::to_string_pretty(&config)?;

        std::fs::write(path, toml_str)
            .map_err(|e| AlgolabError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, AlgolabError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| AlgolabError::Configuration("Config lock poisoned".to_string()))
    }

    /// Apply `f` and keep the result only if it still validates
    pub fn update<F>(&self, f: F) -> Result<(), AlgolabError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self.write_guard()?;
        let mut candidate = guard.clone();
        f(&mut candidate);
        candidate.validate()?;
        *guard = candidate;
        Ok(())
    }

    fn write_guard(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, AlgolabError> {
        self.config
            .write()
            .map_err(|_| AlgolabError::Configuration("Config lock poisoned".to_string()))
    }
}
