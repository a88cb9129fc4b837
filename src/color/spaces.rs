use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Color = [f64; 3];
pub type Matrix3 = nalgebra::Matrix3<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    Srgb,
    Hsv,
    Cmy,
    Xyz,
    Cielab,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 5] = [
        ColorSpace::Srgb,
        ColorSpace::Hsv,
        ColorSpace::Cmy,
        ColorSpace::Xyz,
        ColorSpace::Cielab,
    ];

    pub fn alias(&self) -> &'static str {
        match self {
            ColorSpace::Srgb => "rgb",
            ColorSpace::Hsv => "hsv",
            ColorSpace::Cmy => "cmy",
            ColorSpace::Xyz => "xyz",
            ColorSpace::Cielab => "cielab",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

impl FromStr for ColorSpace {
    type Err = AlgolabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" | "srgb" => Ok(ColorSpace::Srgb),
            "hsv" => Ok(ColorSpace::Hsv),
            "cmy" => Ok(ColorSpace::Cmy),
            "xyz" => Ok(ColorSpace::Xyz),
            "lab" | "cielab" => Ok(ColorSpace::Cielab),
            other => Err(AlgolabError::InvalidInput(format!(
                "Unknown color space '{}' (expected rgb, hsv, cmy, xyz or cielab)",
                other
            ))),
        }
    }
}

/// CIE standard illuminants, XYZ normalized to Y = 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Whitepoint {
    /// 5003 K, horizon light
    D50,
    /// 6504 K, noon daylight
    #[default]
    D65,
}

impl Whitepoint {
    pub fn xyz(&self) -> Color {
        match self {
            Whitepoint::D50 => [96.42, 100.00, 82.51],
            Whitepoint::D65 => [95.04, 100.00, 108.88],
        }
    }

    /// Linear sRGB in [0, 1] to XYZ in [0, 1]
    pub fn srgb_to_xyz_matrix(&self) -> Matrix3 {
        match self {
            Whitepoint::D50 => Matrix3::new(
                0.4360747, 0.3850649, 0.1430804,
                0.2225045, 0.7168786, 0.0606169,
                0.0139322, 0.0971045, 0.7141733,
            ),
            Whitepoint::D65 => Matrix3::new(
                0.4124564, 0.3575761, 0.1804375,
                0.2126729, 0.7151522, 0.0721750,
                0.0193339, 0.1191920, 0.9503041,
            ),
        }
    }
}

impl FromStr for Whitepoint {
    type Err = AlgolabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "D50" => Ok(Whitepoint::D50),
            "D65" => Ok(Whitepoint::D65),
            other => Err(AlgolabError::InvalidInput(format!(
                "Unknown whitepoint '{}' (expected D50 or D65)",
                other
            ))),
        }
    }
}

impl fmt::Display for Whitepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Whitepoint::D50 => f.write_str("D50"),
            Whitepoint::D65 => f.write_str("D65"),
        }
    }
}
