pub mod math;
pub mod aabb;
pub mod node;
pub mod editor;
pub mod script;

pub use aabb::Aabb;
pub use editor::Scene;
pub use math::{Mat4, Vec3};
pub use node::{Node, Shape, COLORS, MAX_COLOR, MIN_COLOR};
pub use script::{NodeSummary, SceneReport, SceneScript};
