use algolab::config::{AppConfig, ConfigManager, ObjectiveKind, SelectionMethod};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.evolution.target, "To be or not to be.");
    assert_eq!(config.evolution.selection_method, SelectionMethod::MatingPool);
    assert_eq!(config.bee_colony.objective, ObjectiveKind::TargetMatch);
    assert_eq!(config.clustering.n_clusters, 128);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("algolab.toml");

    let manager = ConfigManager::new();
    manager
        .update(|c| {
            c.evolution.population_size = 321;
            c.particle_swarm.target_error = Some(0.5);
            c.scene.place_depth = 20.0;
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    let config = loaded.get().unwrap();
    assert_eq!(config.evolution.population_size, 321);
    assert_eq!(config.particle_swarm.target_error, Some(0.5));
    assert_eq!(config.particle_swarm.max_velocity, None);
    assert_eq!(config.scene.place_depth, 20.0);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[evolution]\ntarget = \"Hello\"\nselection_method = \"Tournament\"").unwrap();

    let manager = ConfigManager::new();
    manager.load(Some(file.path())).unwrap();
    let config = manager.get().unwrap();
    assert_eq!(config.evolution.target, "Hello");
    assert_eq!(config.evolution.selection_method, SelectionMethod::Tournament);
    assert_eq!(config.evolution.population_size, 500);
    assert_eq!(config.bee_colony.target, "supercalifragilistic");
}

#[test]
fn test_invalid_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[evolution]\nmutation_rate = 2.0").unwrap();

    let manager = ConfigManager::new();
    assert!(manager.load(Some(file.path())).is_err());
    assert_eq!(manager.get().unwrap().evolution.mutation_rate, 0.008);

    let missing = manager.load(Some(std::path::Path::new("/nonexistent/algolab.toml")));
    assert!(missing.is_err());
}

#[test]
fn test_failed_update_leaves_config_untouched() {
    let manager = ConfigManager::new();
    let result = manager.update(|c| {
        c.clustering.n_init = 3;
        c.clustering.n_clusters = 0;
    });
    assert!(result.is_err());
    let config = manager.get().unwrap();
    assert_eq!(config.clustering.n_init, 10);
    assert_eq!(config.clustering.n_clusters, 128);
}

#[test]
fn test_environment_overrides_file() {
    std::env::set_var("ALGOLAB__CLUSTERING__MAX_ITER", "42");
    let manager = ConfigManager::new();
    let result = manager.load(None);
    std::env::remove_var("ALGOLAB__CLUSTERING__MAX_ITER");

    result.unwrap();
    assert_eq!(manager.get().unwrap().clustering.max_iter, 42);
}
