use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Straight-alpha sRGB color with `f64` channels in `[0, 1]`.
///
/// Parses from and prints as `#rrggbb` / `#rrggbbaa` hex.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgba<f64>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{input}': {reason}")]
pub struct ColorParseError {
    pub input: String,
    pub reason: &'static str,
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba8(red, green, blue, u8::MAX)
    }

    pub fn rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        let f = |c: u8| f64::from(c) / 255.0;
        Self::new(f(red), f(green), f(blue), f(alpha))
    }

    pub fn yellow() -> Self {
        Self::rgb8(255, 255, 0)
    }

    pub fn blue() -> Self {
        Self::rgb8(0, 0, 255)
    }

    pub fn cyan() -> Self {
        Self::rgb8(0, 255, 255)
    }

    /// Channel-wise linear interpolation, alpha included. `t == 0` returns `self` exactly.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        if t == 0.0 {
            return self;
        }
        let (r0, g0, b0, a0) = self.0.into_components();
        let (r1, g1, b1, a1) = other.0.into_components();
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Color::new(mix(r0, r1), mix(g0, g1), mix(b0, b1), mix(a0, a1))
    }

    /// Channels quantized to bytes, in `(r, g, b, a)` order.
    pub fn to_rgba8(self) -> (u8, u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = self.0.into_components();
        (q(r), q(g), q(b), q(a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.to_rgba8();
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ColorParseError {
            input: s.to_string(),
            reason,
        };
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err("expected hex digits"));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err("expected hex digits"))
        };

        match hex.len() {
            6 => Ok(Self::rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err("expected #rrggbb or #rrggbbaa")),
        }
    }
}
