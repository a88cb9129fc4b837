use crate::error::AlgolabError;
use nalgebra::{Matrix6, Vector6};
use serde::{Deserialize, Serialize};

pub type Axis3 = [f64; 3];

/// Boundary conditions for a minimum-jerk style quintic path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryGenerator {
    pub start_pos: Axis3,
    pub goal_pos: Axis3,
    pub start_vel: Axis3,
    pub goal_vel: Axis3,
    pub start_acc: Axis3,
    pub goal_acc: Axis3,
    pub duration: f64,
}

/// Per-axis coefficients `[c5, c4, c3, c2, c1, c0]` of
/// `p(t) = c5 t^5 + c4 t^4 + c3 t^3 + c2 t^2 + c1 t + c0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub duration: f64,
    pub coefficients: [[f64; 6]; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub t: f64,
    pub position: Axis3,
    pub velocity: Axis3,
    pub acceleration: Axis3,
}

impl TrajectoryGenerator {
    pub fn new(start_pos: Axis3, goal_pos: Axis3, duration: f64) -> Self {
        Self {
            start_pos,
            goal_pos,
            start_vel: [0.0; 3],
            goal_vel: [0.0; 3],
            start_acc: [0.0; 3],
            goal_acc: [0.0; 3],
            duration,
        }
    }

    pub fn with_velocities(mut self, start: Axis3, goal: Axis3) -> Self {
        self.start_vel = start;
        self.goal_vel = goal;
        self
    }

    pub fn with_accelerations(mut self, start: Axis3, goal: Axis3) -> Self {
        self.start_acc = start;
        self.goal_acc = goal;
        self
    }

    fn boundary_matrix(&self) -> Matrix6<f64> {
        let t = self.duration;
        Matrix6::from_row_slice(&[
            0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
            t.powi(5), t.powi(4), t.powi(3), t.powi(2), t, 1.0,
            0.0, 0.0, 0.0, 0.0, 1.0, 0.0,
            5.0 * t.powi(4), 4.0 * t.powi(3), 3.0 * t.powi(2), 2.0 * t, 1.0, 0.0,
            0.0, 0.0, 0.0, 2.0, 0.0, 0.0,
            20.0 * t.powi(3), 12.0 * t.powi(2), 6.0 * t, 2.0, 0.0, 0.0,
        ])
    }

    pub fn solve(&self) -> Result<Trajectory, AlgolabError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(AlgolabError::Trajectory(format!(
                "Duration must be positive, got {}",
                self.duration
            )));
        }
        let conditions = [
            self.start_pos, self.goal_pos, self.start_vel,
            self.goal_vel, self.start_acc, self.goal_acc,
        ];
        if conditions.iter().flatten().any(|v| !v.is_finite()) {
            return Err(AlgolabError::Trajectory(
                "Boundary conditions must be finite".to_string(),
            ));
        }

        let lu = self.boundary_matrix().lu();
        let mut coefficients = [[0.0; 6]; 3];
        for (axis, out) in coefficients.iter_mut().enumerate() {
            let b = Vector6::new(
                self.start_pos[axis],
                self.goal_pos[axis],
                self.start_vel[axis],
                self.goal_vel[axis],
                self.start_acc[axis],
                self.goal_acc[axis],
            );
            let x = lu.solve(&b).ok_or_else(|| {
                AlgolabError::Trajectory("Boundary condition system is singular".to_string())
            })?;
            out.copy_from_slice(x.as_slice());
        }

        log::debug!("Quintic coefficients: {:?}", coefficients);
        Ok(Trajectory {
            duration: self.duration,
            coefficients,
        })
    }
}

impl Trajectory {
    fn eval(&self, t: f64, derivative: usize) -> Axis3 {
        let mut out = [0.0; 3];
        for (axis, c) in self.coefficients.iter().enumerate() {
            out[axis] = c
                .iter()
                .enumerate()
                .map(|(i, coefficient)| {
                    let power = 5 - i;
                    if power < derivative {
                        return 0.0;
                    }
                    let factor: f64 = ((power - derivative + 1)..=power).map(|p| p as f64).product();
                    factor * coefficient * t.powi((power - derivative) as i32)
                })
                .sum();
        }
        out
    }

    pub fn position(&self, t: f64) -> Axis3 {
        self.eval(t, 0)
    }

    pub fn velocity(&self, t: f64) -> Axis3 {
        self.eval(t, 1)
    }

    pub fn acceleration(&self, t: f64) -> Axis3 {
        self.eval(t, 2)
    }

    /// `n` evenly spaced samples over `[0, duration]`
    pub fn sample(&self, n: usize) -> Vec<TrajectoryPoint> {
        let point = |t: f64| TrajectoryPoint {
            t,
            position: self.position(t),
            velocity: self.velocity(t),
            acceleration: self.acceleration(t),
        };
        match n {
            0 => Vec::new(),
            1 => vec![point(0.0)],
            _ => (0..n)
                .map(|i| point(self.duration * i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_matrix_at_unit_duration() {
        let generator = TrajectoryGenerator::new([0.0; 3], [1.0; 3], 1.0);
        let a = generator.boundary_matrix();
        assert_eq!(a.row(1).sum(), 6.0);
        assert_eq!(a.row(5).sum(), 40.0);
        assert!(a.lu().is_invertible());
    }

    #[test]
    fn test_polynomial_derivatives() {
        let trajectory = Trajectory {
            duration: 2.0,
            coefficients: [[1.0, 0.0, 0.0, 0.0, 0.0, 0.0]; 3],
        };
        assert_eq!(trajectory.position(2.0)[0], 32.0);
        assert_eq!(trajectory.velocity(2.0)[1], 80.0);
        assert_eq!(trajectory.acceleration(2.0)[2], 160.0);
    }
}
