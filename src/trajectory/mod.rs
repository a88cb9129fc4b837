pub mod quintic;

pub use quintic::{Trajectory, TrajectoryGenerator, TrajectoryPoint};
