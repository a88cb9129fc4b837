use crate::config::swarm::ObjectiveKind;
use crate::error::AlgolabError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Minimize,
    Maximize,
}

/// A function the swarms search over
pub trait Objective: Send + Sync {
    fn name(&self) -> &str;
    fn evaluate(&self, x: &[f64]) -> f64;

    /// Human readable rendering of a candidate
    fn describe(&self, x: &[f64]) -> String {
        let parts: Vec<String> = x.iter().map(|v| format!("{:.4}", v)).collect();
        format!("[{}]", parts.join(", "))
    }
}

/// Rastrigin function, global minimum 0 at the origin
pub struct Rastrigin;

impl Objective for Rastrigin {
    fn name(&self) -> &str {
        "rastrigin"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos() + 10.0)
            .sum()
    }
}

pub struct Sphere;

impl Objective for Sphere {
    fn name(&self) -> &str {
        "sphere"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }
}

/// Scores a vector of character codes by how many equal the target's
pub struct TargetMatch {
    codes: Vec<f64>,
}

impl TargetMatch {
    pub fn new(target: &str) -> Self {
        Self {
            codes: target.chars().map(|c| c as u32 as f64).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Objective for TargetMatch {
    fn name(&self) -> &str {
        "target-match"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter()
            .zip(&self.codes)
            .filter(|(gene, code)| gene.round() == **code)
            .count() as f64
    }

    fn describe(&self, x: &[f64]) -> String {
        x.iter()
            .map(|v| char::from_u32(v.round().max(0.0) as u32).unwrap_or('?'))
            .collect()
    }
}

/// Wraps a closure so ad-hoc functions can be optimized
pub struct FnObjective<F> {
    name: String,
    f: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        (self.f)(x)
    }
}

pub fn continuous_objective(kind: ObjectiveKind) -> Result<Box<dyn Objective>, AlgolabError> {
    match kind {
        ObjectiveKind::Rastrigin => Ok(Box::new(Rastrigin)),
        ObjectiveKind::Sphere => Ok(Box::new(Sphere)),
        ObjectiveKind::TargetMatch => Err(AlgolabError::InvalidInput(
            "TargetMatch needs a target phrase".to_string(),
        )),
    }
}

/// Per-dimension search box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Bounds {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, AlgolabError> {
        if lower.len() != upper.len() {
            return Err(AlgolabError::DimensionMismatch {
                expected: lower.len(),
                actual: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(AlgolabError::InvalidInput("Bounds must have at least one dimension".to_string()));
        }
        if let Some(i) = (0..lower.len()).find(|&i| lower[i] > upper[i]) {
            return Err(AlgolabError::InvalidInput(format!(
                "Lower bound {} exceeds upper bound {} in dimension {}",
                lower[i], upper[i], i
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn uniform(dim: usize, lower: f64, upper: f64) -> Result<Self, AlgolabError> {
        Self::new(vec![lower; dim], vec![upper; dim])
    }

    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn clamp(&self, dim: usize, value: f64) -> f64 {
        value.max(self.lower[dim]).min(self.upper[dim])
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| lo + rng.gen::<f64>() * (hi - lo))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rastrigin_minimum_at_origin() {
        assert!(Rastrigin.evaluate(&[0.0, 0.0, 0.0]).abs() < 1e-12);
        assert!(Rastrigin.evaluate(&[1.0, 0.5]) > 0.0);
    }

    #[test]
    fn test_target_match_counts_and_describes() {
        let objective = TargetMatch::new("abc");
        let x = [97.0, 98.0, 120.0];
        assert_eq!(objective.evaluate(&x), 2.0);
        assert_eq!(objective.describe(&x), "abx");
    }

    #[test]
    fn test_bounds_reject_inverted() {
        assert!(Bounds::new(vec![1.0], vec![0.0]).is_err());
        assert!(Bounds::new(vec![0.0, 0.0], vec![1.0]).is_err());
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        assert_eq!(bounds.clamp(0, 3.0), 1.0);
        assert_eq!(bounds.clamp(1, -3.0), -1.0);
    }
}
