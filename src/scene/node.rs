use super::aabb::Aabb;
use super::math::{self, uniform_scaling, Mat4, Vec3};
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_COLOR: usize = 0;
pub const MAX_COLOR: usize = 9;

/// RGB palette indexed by `Node::color_index`
pub const COLORS: [[f64; 3]; MAX_COLOR + 1] = [
    [1.0, 1.0, 1.0],
    [0.05, 0.05, 0.9],
    [0.05, 0.9, 0.05],
    [0.9, 0.05, 0.05],
    [0.9, 0.9, 0.0],
    [0.1, 0.8, 0.7],
    [0.7, 0.2, 0.7],
    [0.7, 0.7, 0.7],
    [0.4, 0.4, 0.4],
    [0.0, 0.0, 0.0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Sphere,
    Cube,
    /// Three stacked spheres
    SnowFigure,
}

impl FromStr for Shape {
    type Err = AlgolabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sphere" => Ok(Shape::Sphere),
            "cube" => Ok(Shape::Cube),
            "figure" | "snowfigure" => Ok(Shape::SnowFigure),
            other => Err(AlgolabError::Scene(format!("Unknown shape '{}'", other))),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Sphere => f.write_str("sphere"),
            Shape::Cube => f.write_str("cube"),
            Shape::SnowFigure => f.write_str("figure"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub shape: Shape,
    pub color_index: usize,
    pub aabb: Aabb,
    pub translation: Mat4,
    pub scaling: Mat4,
    pub selected: bool,
    /// Distance from the camera at which the node was last picked
    pub depth: f64,
    /// Eye-space point where the pick ray hit
    pub selected_loc: Option<Vec3>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(shape: Shape, color_index: usize) -> Self {
        let mut node = Self {
            shape,
            color_index: color_index.min(MAX_COLOR),
            aabb: Aabb::new(Vec3::zeros(), Vec3::repeat(0.5)),
            translation: Mat4::identity(),
            scaling: Mat4::identity(),
            selected: false,
            depth: 0.0,
            selected_loc: None,
            children: Vec::new(),
        };

        if shape == Shape::SnowFigure {
            node.children = [(-0.6, 1.0), (0.1, 0.8), (0.75, 0.7)]
                .iter()
                .map(|&(offset, scale)| {
                    let mut sphere = Node::new(Shape::Sphere, MIN_COLOR);
                    sphere.translate(0.0, offset, 0.0);
                    sphere.scaling = node.scaling * uniform_scaling(scale);
                    sphere
                })
                .collect();
            node.aabb = Aabb::new(Vec3::zeros(), Vec3::new(0.5, 1.1, 0.5));
        }

        node
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.translation *= math::translation(&Vec3::new(x, y, z));
    }

    /// Multiply the node's scale and bounding box by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.scaling *= uniform_scaling(factor);
        self.aabb.scale(factor);
    }

    pub fn rotate_color(&mut self, forward: bool) {
        let span = MAX_COLOR - MIN_COLOR + 1;
        let offset = self.color_index - MIN_COLOR;
        let next = if forward { offset + 1 } else { offset + span - 1 };
        self.color_index = MIN_COLOR + next % span;
    }

    pub fn color(&self) -> [f64; 3] {
        COLORS[self.color_index]
    }

    pub fn select(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn position(&self) -> Vec3 {
        math::position(&self.translation)
    }

    pub fn scale_factor(&self) -> f64 {
        self.scaling[(0, 0)]
    }

    /// Ray test in the space `modelview` maps into
    pub fn pick(&self, start: Vec3, direction: Vec3, modelview: &Mat4) -> Option<f64> {
        let inverse_scaling = self.scaling.try_inverse()?;
        let model = *modelview * self.translation * inverse_scaling;
        self.aabb.ray_hit(start, direction, &model)
    }
}
