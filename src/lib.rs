//! Small numeric demos: a phrase-evolving genetic algorithm, particle swarm and
//! artificial bee colony optimizers, k-means color quantization, color-space
//! conversion, a headless 3D scene editor and quintic trajectory generation.

pub mod config;
pub mod engines;
pub mod color;
pub mod scene;
pub mod trajectory;
pub mod error;

pub use error::{AlgolabError, Result};
