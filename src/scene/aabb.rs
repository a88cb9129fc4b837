use super::math::{position, row_axis, Mat4, Vec3};
use serde::{Deserialize, Serialize};

const EPSILON: f64 = 0.000001;
const FAR: f64 = 100000.0;

/// Axis aligned bounding box; `size` holds the half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub size: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    pub fn scale(&mut self, s: f64) {
        self.size = self.size * s;
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size
    }

    /// Slab test of the ray against this box oriented by `model`.
    /// Returns the entry distance along `direction` on a hit.
    pub fn ray_hit(&self, origin: Vec3, direction: Vec3, model: &Mat4) -> Option<f64> {
        let aabb_min = self.min();
        let aabb_max = self.max();
        let mut t_min = 0.0;
        let mut t_max = FAR;

        let delta = position(model) - origin;

        for axis in 0..3 {
            let axis_dir = row_axis(model, axis);
            let e = axis_dir.dot(&delta);
            let f = direction.dot(&axis_dir);
            let (lo, hi) = (aabb_min[axis], aabb_max[axis]);

            if f.abs() > EPSILON {
                let mut t1 = (e + lo) / f;
                let mut t2 = (e + hi) / f;
                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }
                if t2 < t_max {
                    t_max = t2;
                }
                if t1 > t_min {
                    t_min = t1;
                }
                if t_max < t_min {
                    return None;
                }
            } else if lo - e > EPSILON || hi - e < -EPSILON {
                // parallel to the slab and outside it
                return None;
            }
        }

        Some(t_min)
    }
}
