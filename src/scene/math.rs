use nalgebra::{Matrix4, Point3, Vector3};

pub type Vec3 = Vector3<f64>;

/// Homogeneous transform acting on column vectors
pub type Mat4 = Matrix4<f64>;

pub fn translation(offset: &Vec3) -> Mat4 {
    Mat4::new_translation(offset)
}

pub fn uniform_scaling(factor: f64) -> Mat4 {
    Mat4::new_scaling(factor)
}

/// Translation column
pub fn position(m: &Mat4) -> Vec3 {
    m.fixed_view::<3, 1>(0, 3).into_owned()
}

/// First three entries of row `i`
pub fn row_axis(m: &Mat4, i: usize) -> Vec3 {
    m.fixed_view::<1, 3>(i, 0).transpose()
}

pub fn transform_point(m: &Mat4, p: &Vec3) -> Vec3 {
    m.transform_point(&Point3::from(*p)).coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_of_translation_and_scaling() {
        let m = translation(&Vec3::new(1.0, -2.0, 3.0)) * uniform_scaling(2.0);
        let inv = m.try_inverse().unwrap();
        let p = Vec3::new(0.5, 0.25, -4.0);
        let back = transform_point(&inv, &transform_point(&m, &p));
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        let flat = Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.try_inverse().is_none());
    }

    #[test]
    fn test_position_and_axes() {
        let m = translation(&Vec3::new(5.0, 6.0, 7.0)) * uniform_scaling(3.0);
        assert_eq!(position(&m), Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(row_axis(&m, 1), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(m.transform_vector(&Vec3::new(1.0, 0.0, 0.0)), Vec3::new(3.0, 0.0, 0.0));
    }
}
