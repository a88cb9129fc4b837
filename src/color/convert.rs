use super::spaces::{Color, ColorSpace, Matrix3, Whitepoint};
use crate::error::AlgolabError;
use nalgebra::Vector3;

// kappa * epsilon == 8
const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

fn mat_mul(m: &Matrix3, v: &Color) -> Color {
    (m * Vector3::from(*v)).into()
}

fn xyz_to_srgb_matrix(whitepoint: Whitepoint) -> Result<Matrix3, AlgolabError> {
    whitepoint.srgb_to_xyz_matrix().try_inverse().ok_or_else(|| {
        AlgolabError::ColorRange(format!("sRGB matrix for {} is singular", whitepoint))
    })
}

fn compand(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn decompand(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

pub fn hsv_to_srgb(color: &Color) -> Color {
    let h = color[0] / 60.0;
    let s = color[1] / 100.0;
    let v = color[2] / 100.0;
    let hi = (h.floor() as i64).rem_euclid(6);

    let f = h - h.floor();
    let p = 255.0 * v * (1.0 - s);
    let q = 255.0 * v * (1.0 - s * f);
    let t = 255.0 * v * (1.0 - s * (1.0 - f));
    let v = 255.0 * v;

    match hi {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

pub fn srgb_to_hsv(color: &Color) -> Color {
    let [r, g, b] = [color[0] / 255.0, color[1] / 255.0, color[2] / 255.0];

    let v = r.max(g).max(b);
    let chroma = v - r.min(g).min(b);
    let s = if v == 0.0 { 0.0 } else { chroma / v };
    let mut h = if chroma == 0.0 {
        0.0
    } else if v == r {
        60.0 * ((g - b) / chroma)
    } else if v == g {
        60.0 * (2.0 + (b - r) / chroma)
    } else {
        60.0 * (4.0 + (r - g) / chroma)
    };
    if h < 0.0 {
        h += 360.0;
    }

    [h, 100.0 * s, 100.0 * v]
}

pub fn cmy_to_srgb(color: &Color) -> Color {
    color.map(|c| 255.0 * (1.0 - c / 100.0))
}

pub fn srgb_to_cmy(color: &Color) -> Color {
    color.map(|c| 100.0 * (1.0 - c / 255.0))
}

/// XYZ in [0, 100] to sRGB, clamped to the displayable gamut
pub fn xyz_to_srgb(color: &Color, whitepoint: Whitepoint) -> Result<Color, AlgolabError> {
    let xyz = color.map(|c| c / 100.0);
    let linear = mat_mul(&xyz_to_srgb_matrix(whitepoint)?, &xyz);
    Ok(linear.map(|c| 255.0 * compand(c).clamp(0.0, 1.0)))
}

pub fn srgb_to_xyz(color: &Color, whitepoint: Whitepoint) -> Color {
    let linear = color.map(|c| decompand(c / 255.0));
    mat_mul(&whitepoint.srgb_to_xyz_matrix(), &linear).map(|c| 100.0 * c)
}

pub fn cielab_to_xyz(color: &Color, whitepoint: Whitepoint) -> Color {
    let [l, a, b] = *color;
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let x = if fx.powi(3) > EPSILON { fx.powi(3) } else { (116.0 * fx - 16.0) / KAPPA };
    let y = if l > KAPPA * EPSILON { fy.powi(3) } else { l / KAPPA };
    let z = if fz.powi(3) > EPSILON { fz.powi(3) } else { (116.0 * fz - 16.0) / KAPPA };

    let white = whitepoint.xyz();
    [x * white[0], y * white[1], z * white[2]]
}

pub fn xyz_to_cielab(color: &Color, whitepoint: Whitepoint) -> Color {
    let white = whitepoint.xyz();
    let f = |t: f64| {
        if t > EPSILON {
            t.cbrt()
        } else {
            (KAPPA * t + 16.0) / 116.0
        }
    };
    let fx = f(color[0] / white[0]);
    let fy = f(color[1] / white[1]);
    let fz = f(color[2] / white[2]);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Range check for the spaces that have a bounded domain
pub fn validate(color: &Color, space: ColorSpace) -> Result<(), AlgolabError> {
    if color.iter().any(|c| !c.is_finite()) {
        return Err(AlgolabError::ColorRange(format!("{:?} has a non-finite component", color)));
    }

    let in_range = |lo: f64, hi: f64| color.iter().all(|c| (lo..=hi).contains(c));
    match space {
        ColorSpace::Srgb if !in_range(0.0, 255.0) => Err(AlgolabError::ColorRange(
            "sRGB components (r, g, b) must be in [0, 255]".to_string(),
        )),
        ColorSpace::Hsv if !(0.0..360.0).contains(&color[0]) => Err(AlgolabError::ColorRange(
            "HSV component h must be in [0, 360)".to_string(),
        )),
        ColorSpace::Hsv if !(0.0..=100.0).contains(&color[1]) || !(0.0..=100.0).contains(&color[2]) => {
            Err(AlgolabError::ColorRange(
                "HSV components s and v must be in [0, 100]".to_string(),
            ))
        }
        ColorSpace::Cmy if !in_range(0.0, 100.0) => Err(AlgolabError::ColorRange(
            "CMY components (c, m, y) must be in [0, 100]".to_string(),
        )),
        ColorSpace::Xyz if color.iter().any(|c| *c < 0.0) => Err(AlgolabError::ColorRange(
            "XYZ components must not be negative".to_string(),
        )),
        ColorSpace::Cielab if !(0.0..=100.0).contains(&color[0]) => Err(AlgolabError::ColorRange(
            "CIELAB lightness L* must be in [0, 100]".to_string(),
        )),
        _ => Ok(()),
    }
}

fn to_srgb(color: &Color, from: ColorSpace, whitepoint: Whitepoint) -> Result<Color, AlgolabError> {
    match from {
        ColorSpace::Srgb => Ok(*color),
        ColorSpace::Hsv => Ok(hsv_to_srgb(color)),
        ColorSpace::Cmy => Ok(cmy_to_srgb(color)),
        ColorSpace::Xyz => xyz_to_srgb(color, whitepoint),
        ColorSpace::Cielab => xyz_to_srgb(&cielab_to_xyz(color, whitepoint), whitepoint),
    }
}

fn from_srgb(color: &Color, to: ColorSpace, whitepoint: Whitepoint) -> Color {
    match to {
        ColorSpace::Srgb => *color,
        ColorSpace::Hsv => srgb_to_hsv(color),
        ColorSpace::Cmy => srgb_to_cmy(color),
        ColorSpace::Xyz => srgb_to_xyz(color, whitepoint),
        ColorSpace::Cielab => xyz_to_cielab(&srgb_to_xyz(color, whitepoint), whitepoint),
    }
}

/// Convert between any two spaces, going through sRGB
pub fn convert(
    color: &Color,
    from: ColorSpace,
    to: ColorSpace,
    whitepoint: Whitepoint,
) -> Result<Color, AlgolabError> {
    validate(color, from)?;
    if from == to {
        return Ok(*color);
    }
    let srgb = to_srgb(color, from, whitepoint)?;
    Ok(from_srgb(&srgb, to, whitepoint))
}

/// `RGB(200, 100, 20)` style rendering; sRGB is printed without decimals
pub fn format_color(color: &Color, space: ColorSpace, precision: usize) -> String {
    let precision = if space == ColorSpace::Srgb { 0 } else { precision };
    let parts: Vec<String> = color.iter().map(|c| format!("{:.*}", precision, c)).collect();
    format!("{}({})", space.alias().to_uppercase(), parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_inverse_is_identity() {
        for whitepoint in [Whitepoint::D50, Whitepoint::D65] {
            let m = whitepoint.srgb_to_xyz_matrix();
            let product = m * xyz_to_srgb_matrix(whitepoint).unwrap();
            assert!((product - Matrix3::identity()).norm() < 1e-12);
        }
    }

    #[test]
    fn test_matrix_product_matches_rows() {
        let m = Whitepoint::D65.srgb_to_xyz_matrix();
        let white = mat_mul(&m, &[1.0, 1.0, 1.0]);
        assert!((white[0] - 0.9504700).abs() < 1e-7);
        assert!((white[1] - 1.0000001).abs() < 1e-7);
    }

    #[test]
    fn test_companding_round_trip() {
        for v in [0.0, 0.002, 0.04, 0.5, 1.0] {
            assert!((compand(decompand(v)) - v).abs() < 1e-12);
        }
    }
}
