//! sRGB to CIELAB conversion under the D50 illuminant.
//!
//! The catalog's precomputed Lab values were generated with a D50-adapted
//! sRGB matrix, so every conversion here must use the same matrix and
//! reference white. Mixing in D65 would bias every distance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::validation::is_valid_hex;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color format '{input}': {reason}")]
    InvalidColorFormat { input: String, reason: String },
}

/// D50 reference white tristimulus values (Y normalized to 1)
pub const D50_WHITE: [f64; 3] = [0.96422, 1.0, 0.82521];

/// Linear sRGB to XYZ, Bradford-adapted to D50
const SRGB_TO_XYZ_D50: [[f64; 3]; 3] = [
    [0.436_074_7, 0.385_064_9, 0.143_080_4],
    [0.222_504_5, 0.716_878_6, 0.060_616_9],
    [0.013_932_2, 0.097_104_5, 0.714_173_3],
];

/// Below this encoded value the sRGB transfer function is linear
const SRGB_LINEAR_THRESHOLD: f64 = 0.04045;

/// Below this ratio the CIELAB nonlinearity switches to its linear branch
const LAB_EPSILON: f64 = 0.008_856;
const LAB_LINEAR_SLOPE: f64 = 7.787;
const LAB_LINEAR_OFFSET: f64 = 16.0 / 116.0;

/// An 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-digit hex color, optionally prefixed with `#`.
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidColorFormat` naming the input if it is not
    /// exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = |reason: String| ColorError::InvalidColorFormat {
            input: hex.to_string(),
            reason,
        };

        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !is_valid_hex(hex) {
            let reason = if digits.chars().all(|c| c.is_ascii_hexdigit()) {
                format!("expected 6 hex digits, got {}", digits.chars().count())
            } else {
                "contains non-hex characters".to_string()
            };
            return Err(invalid(reason));
        }

        // Validated above: six ASCII hex digits, so slicing and parsing cannot fail
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|e| invalid(e.to_string()))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Canonical `#RRGGBB` form (uppercase)
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to CIELAB (D50)
    #[must_use]
    pub fn to_lab(self) -> Lab {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let [m0, m1, m2] = SRGB_TO_XYZ_D50;
        let x = r * m0[0] + g * m0[1] + b * m0[2];
        let y = r * m1[0] + g * m1[1] + b * m1[2];
        let z = r * m2[0] + g * m2[1] + b * m2[2];

        Lab::from_xyz_d50(x, y, z)
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// CIELAB coordinates. Serialized as `[L, a, b]` to match the catalog files.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Lab {
    /// Lightness (0 to 100)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }

    /// CIE76 ΔE to another point
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        crate::matching::distance::delta_e(self, other)
    }

    fn from_xyz_d50(x: f64, y: f64, z: f64) -> Self {
        let [xn, yn, zn] = D50_WHITE;
        let fx = lab_f(x / xn);
        let fy = lab_f(y / yn);
        let fz = lab_f(z / zn);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<[f64; 3]> for Lab {
    fn from([l, a, b]: [f64; 3]) -> Self {
        Self { l, a, b }
    }
}

impl From<Lab> for [f64; 3] {
    fn from(lab: Lab) -> Self {
        lab.to_array()
    }
}

impl std::fmt::Display for Lab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L={:.1} a={:.1} b={:.1}", self.l, self.a, self.b)
    }
}

/// Convert a hex color straight to CIELAB (D50).
///
/// # Errors
///
/// Returns `ColorError::InvalidColorFormat` if `hex` is not a 6-digit hex color.
pub fn to_lab(hex: &str) -> Result<Lab, ColorError> {
    Ok(Rgb::from_hex(hex)?.to_lab())
}

fn srgb_to_linear(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= SRGB_LINEAR_THRESHOLD {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_LINEAR_SLOPE * t + LAB_LINEAR_OFFSET
    }
}
