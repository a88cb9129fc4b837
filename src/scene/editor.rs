use super::math::{transform_point, Mat4, Vec3};
use super::node::{Node, Shape, MAX_COLOR, MIN_COLOR};
use crate::config::scene::SceneConfig;
use crate::config::traits::ConfigSection;
use crate::engines::report::seeded_rng;
use crate::error::AlgolabError;
use rand::rngs::StdRng;
use rand::Rng;

/// Flat list of nodes with a single selection
pub struct Scene {
    nodes: Vec<Node>,
    selected: Option<usize>,
    config: SceneConfig,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: SceneConfig, seed: Option<u64>) -> Result<Self, AlgolabError> {
        config.validate()?;
        Ok(Self {
            nodes: Vec::new(),
            selected: None,
            config,
            rng: seeded_rng(seed),
        })
    }

    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Node> {
        self.selected.map(|i| &self.nodes[i])
    }

    fn selected_mut(&mut self) -> Option<&mut Node> {
        match self.selected {
            Some(i) => self.nodes.get_mut(i),
            None => None,
        }
    }

    /// Select the closest node hit by the ray, clearing any previous selection
    pub fn pick(&mut self, start: Vec3, direction: Vec3, modelview: &Mat4) -> Option<usize> {
        if let Some(node) = self.selected_mut() {
            node.select(false);
        }
        self.selected = None;

        let mut closest: Option<(usize, f64)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(distance) = node.pick(start, direction, modelview) {
                if closest.map_or(true, |(_, best)| distance < best) {
                    closest = Some((i, distance));
                }
            }
        }

        let (index, distance) = closest?;
        let node = &mut self.nodes[index];
        node.select(true);
        node.depth = distance;
        node.selected_loc = Some(start + direction * distance);
        self.selected = Some(index);
        log::debug!("Picked node {} ({}) at depth {:.3}", index, node.shape, distance);
        Some(index)
    }

    pub fn rotate_selected_color(&mut self, forward: bool) -> bool {
        match self.selected_mut() {
            Some(node) => {
                node.rotate_color(forward);
                true
            }
            None => false,
        }
    }

    pub fn scale_selected(&mut self, up: bool) -> bool {
        let factor = if up { self.config.scale_up } else { self.config.scale_down };
        match self.selected_mut() {
            Some(node) => {
                node.scale(factor);
                true
            }
            None => false,
        }
    }

    /// Drag the selection along a new ray, keeping its pick depth
    pub fn move_selected(&mut self, start: Vec3, direction: Vec3, inv_modelview: &Mat4) -> bool {
        let node = match self.selected_mut() {
            Some(node) => node,
            None => return false,
        };

        let new_loc = start + direction * node.depth;
        let old_loc = node.selected_loc.unwrap_or(new_loc);
        let world = inv_modelview.transform_vector(&(new_loc - old_loc));

        node.translate(world.x, world.y, world.z);
        node.selected_loc = Some(new_loc);
        true
    }

    /// Place a new node `place_depth` along the ray, converted to world space
    pub fn place(&mut self, shape: Shape, start: Vec3, direction: Vec3, inv_modelview: &Mat4) -> usize {
        let color_index = self.rng.gen_range(MIN_COLOR..=MAX_COLOR);
        let mut node = Node::new(shape, color_index);

        let eye = start + direction * self.config.place_depth;
        let world = transform_point(inv_modelview, &eye);
        node.translate(world.x, world.y, world.z);

        log::debug!("Placed {} at ({:.3}, {:.3}, {:.3})", shape, world.x, world.y, world.z);
        self.add_node(node)
    }
}
