//! HSV, RGB and hex color conversions

use std::{error, fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Color used when a hex string cannot be parsed
pub const FALLBACK_COLOR: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Hue in degrees [0, 360), saturation and value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    BadLength(usize),
    BadDigit,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ColorParseError::*;
        match self {
            BadLength(l) => write!(f, "Failed to parse color: expected 6 hex digits, got {l}"),
            BadDigit => write!(f, "Failed to parse color: not a hex digit"),
        }
    }
}

impl error::Error for ColorParseError {}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// `#rrggbb` or `rrggbb`, either case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        use ColorParseError::*;
        if digits.len() != 6 {
            return Err(BadLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BadDigit);
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| BadDigit);
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// NaN and infinities become 0, everything else is clamped to [0, 1]
fn unit(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn channel(x: f64) -> u8 {
    (unit(x) * 255.0).round() as u8
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = if hsv.h.is_finite() { hsv.h.rem_euclid(360.0) } else { 0.0 };
    let (s, v) = (unit(hsv.s), unit(hsv.v));

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h / 60.0) as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(channel(r + m), channel(g + m), channel(b + m))
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut h = 0.0;
    if delta != 0.0 {
        h = if max == r {
            ((g - b) / delta) % 6.0
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        h *= 60.0;
        if h < 0.0 {
            h += 360.0;
        }
    }

    let s = if max == 0.0 { 0.0 } else { delta / max };
    Hsv::new(h, s, max)
}

/// Lowercase `#rrggbb`
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_string()
}

/// Parse a hex color, falling back to [`FALLBACK_COLOR`] on malformed input
pub fn hex_to_rgb(hex: &str) -> Rgb {
    hex.trim().parse().unwrap_or(FALLBACK_COLOR)
}
