use super::editor::Scene;
use super::math::{translation, Mat4, Vec3};
use super::node::{Node, Shape};
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};

/// Snapshot of one node for reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSummary {
    pub index: usize,
    pub shape: Shape,
    pub color_index: usize,
    pub position: Vec3,
    pub scale: f64,
    pub selected: bool,
}

impl NodeSummary {
    fn of(index: usize, node: &Node) -> Self {
        Self {
            index,
            shape: node.shape,
            color_index: node.color_index,
            position: node.position(),
            scale: node.scale_factor(),
            selected: node.selected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneReport {
    pub log: Vec<String>,
    pub nodes: Vec<NodeSummary>,
}

pub fn summarize(scene: &Scene) -> Vec<NodeSummary> {
    scene
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| NodeSummary::of(i, node))
        .collect()
}

/// Drives a `Scene` from text commands, one per line:
///
/// ```text
/// camera <x> <y> <z>
/// place <sphere|cube|figure> <dx> <dy> <dz>
/// pick <dx> <dy> <dz>
/// move <dx> <dy> <dz>
/// scale <up|down>
/// color <next|prev>
/// list
/// ```
///
/// Rays start at the camera; directions are in eye space and get normalized.
pub struct SceneScript {
    scene: Scene,
    modelview: Mat4,
    inv_modelview: Mat4,
    log: Vec<String>,
}

impl SceneScript {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            modelview: Mat4::identity(),
            inv_modelview: Mat4::identity(),
            log: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn run(mut self, script: &str) -> Result<SceneReport, AlgolabError> {
        for (number, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.execute(line)
                .map_err(|e| AlgolabError::Scene(format!("line {}: {}", number + 1, e)))?;
        }
        Ok(SceneReport {
            log: self.log,
            nodes: summarize(&self.scene),
        })
    }

    pub fn execute(&mut self, line: &str) -> Result<(), AlgolabError> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match command {
            "camera" => {
                let eye = parse_vec(&args)?;
                self.modelview = translation(&(-eye));
                self.inv_modelview = translation(&eye);
                self.log.push(format!("camera at ({:.3}, {:.3}, {:.3})", eye.x, eye.y, eye.z));
            }
            "place" => {
                let (shape, rest) = args
                    .split_first()
                    .ok_or_else(|| AlgolabError::Scene("place needs a shape".to_string()))?;
                let shape: Shape = shape.parse()?;
                let direction = parse_direction(rest)?;
                let index = self.scene.place(shape, Vec3::zeros(), direction, &self.inv_modelview);
                let position = self.scene.nodes()[index].position();
                self.log.push(format!(
                    "placed {} #{} at ({:.3}, {:.3}, {:.3})",
                    shape, index, position.x, position.y, position.z
                ));
            }
            "pick" => {
                let direction = parse_direction(&args)?;
                match self.scene.pick(Vec3::zeros(), direction, &self.modelview) {
                    Some(index) => self.log.push(format!("picked #{}", index)),
                    None => self.log.push("picked nothing".to_string()),
                }
            }
            "move" => {
                let direction = parse_direction(&args)?;
                if self.scene.move_selected(Vec3::zeros(), direction, &self.inv_modelview) {
                    self.log_selected("moved");
                } else {
                    self.log.push("nothing selected".to_string());
                }
            }
            "scale" => {
                let up = parse_toggle(&args, "up", "down")?;
                if self.scene.scale_selected(up) {
                    self.log_selected("scaled");
                } else {
                    self.log.push("nothing selected".to_string());
                }
            }
            "color" => {
                let forward = parse_toggle(&args, "next", "prev")?;
                if self.scene.rotate_selected_color(forward) {
                    self.log_selected("recolored");
                } else {
                    self.log.push("nothing selected".to_string());
                }
            }
            "list" => {
                for summary in summarize(&self.scene) {
                    self.log.push(format!(
                        "#{} {} color={} pos=({:.3}, {:.3}, {:.3}) scale={:.3}{}",
                        summary.index,
                        summary.shape,
                        summary.color_index,
                        summary.position.x,
                        summary.position.y,
                        summary.position.z,
                        summary.scale,
                        if summary.selected { " *" } else { "" }
                    ));
                }
            }
            other => {
                return Err(AlgolabError::Scene(format!("Unknown command '{}'", other)));
            }
        }
        Ok(())
    }

    fn log_selected(&mut self, verb: &str) {
        if let (Some(index), Some(node)) = (self.scene.selected_index(), self.scene.selected()) {
            let p = node.position();
            let line = format!(
                "{} #{} -> pos=({:.3}, {:.3}, {:.3}) scale={:.3} color={}",
                verb, index, p.x, p.y, p.z, node.scale_factor(), node.color_index
            );
            self.log.push(line);
        }
    }
}

fn parse_vec(args: &[&str]) -> Result<Vec3, AlgolabError> {
    if args.len() != 3 {
        return Err(AlgolabError::Scene(format!("expected 3 numbers, got {}", args.len())));
    }
    let mut v = [0.0; 3];
    for (slot, arg) in v.iter_mut().zip(args) {
        *slot = arg
            .parse::<f64>()
            .map_err(|e| AlgolabError::Scene(format!("'{}': {}", arg, e)))?;
    }
    Ok(Vec3::new(v[0], v[1], v[2]))
}

fn parse_direction(args: &[&str]) -> Result<Vec3, AlgolabError> {
    parse_vec(args)?
        .try_normalize(f64::EPSILON)
        .ok_or_else(|| AlgolabError::Scene("ray direction must not be zero".to_string()))
}

fn parse_toggle(args: &[&str], yes: &str, no: &str) -> Result<bool, AlgolabError> {
    match args.first().copied() {
        Some(word) if word == yes => Ok(true),
        Some(word) if word == no => Ok(false),
        _ => Err(AlgolabError::Scene(format!("expected '{}' or '{}'", yes, no))),
    }
}
