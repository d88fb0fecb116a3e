//! Value-to-color gradients laid out on the dial's circular arc.
//!
//! A [`GradientWheel`] keeps two views of the same stop list. The lookup view is
//! the normalized linear gradient over `[0, 1]` and answers [`GradientWheel::color_at`].
//! The rendering view is the same stops compressed onto the drawn arc and rotated
//! so that the middle of the gradient sits at offset 0 of a conical gradient,
//! the top of the dial.

use crate::angle::AngularConfig;
use crate::color::Color;
use crate::domain::ValueDomain;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradientError {
    #[error("Gradient needs at least one stop")]
    Empty,
    #[error("Stop offset {0} is outside [0, 1]")]
    InvalidOffset(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientWheel {
    lookup: Vec<GradientStop>,
    rendering: Vec<GradientStop>,
}

impl GradientWheel {
    /// Builds a wheel for the default 280 degree arc.
    pub fn build(stops: impl IntoIterator<Item = GradientStop>) -> Result<Self, GradientError> {
        Self::with_geometry(stops, &AngularConfig::default())
    }

    pub fn with_geometry(
        stops: impl IntoIterator<Item = GradientStop>,
        geometry: &AngularConfig,
    ) -> Result<Self, GradientError> {
        let lookup = normalize(stops)?;
        let rendering = rephase(&lookup, geometry.arc_fraction());
        log::debug!(
            "Built gradient wheel with {} stops over a {} degree arc",
            lookup.len(),
            geometry.angle_range()
        );
        Ok(Self { lookup, rendering })
    }

    /// Swaps in a new stop list. On error the current stops are kept.
    pub fn replace_stops(
        &mut self,
        stops: impl IntoIterator<Item = GradientStop>,
        geometry: &AngularConfig,
    ) -> Result<(), GradientError> {
        *self = Self::with_geometry(stops, geometry)?;
        Ok(())
    }

    /// Normalized, un-rephased stops sorted by offset, always spanning `0.0..=1.0`.
    pub fn lookup_stops(&self) -> &[GradientStop] {
        &self.lookup
    }

    /// Stops for painting a conical gradient, sorted by offset.
    pub fn rendering_stops(&self) -> &[GradientStop] {
        &self.rendering
    }

    pub fn color_at(&self, value: f64, domain: &ValueDomain) -> Color {
        self.sample(domain.fraction(value))
    }

    /// Color at position `t` of the linear gradient; `t` is clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (Some(first), Some(last)) = (self.lookup.first(), self.lookup.last()) else {
            return Color::new(0.0, 0.0, 0.0, 1.0);
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        // first index whose offset is beyond t, always in 1..len here
        let upper = self.lookup.partition_point(|s| s.offset <= t);
        let (lo, hi) = (&self.lookup[upper - 1], &self.lookup[upper]);
        if lo.offset == t {
            return lo.color;
        }
        let frac = (t - lo.offset) / (hi.offset - lo.offset);
        lo.color.lerp(hi.color, frac)
    }
}

fn normalize(
    stops: impl IntoIterator<Item = GradientStop>,
) -> Result<Vec<GradientStop>, GradientError> {
    let mut unique: Vec<GradientStop> = Vec::new();
    for stop in stops {
        if !(0.0..=1.0).contains(&stop.offset) {
            return Err(GradientError::InvalidOffset(stop.offset));
        }
        // -0.0 and 0.0 are the same offset
        let stop = GradientStop::new(stop.offset + 0.0, stop.color);
        match unique.iter_mut().find(|s| s.offset == stop.offset) {
            Some(existing) => existing.color = stop.color,
            None => unique.push(stop),
        }
    }
    unique.sort_by(|a, b| a.offset.total_cmp(&b.offset));

    let (first, last) = match (unique.first(), unique.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(GradientError::Empty),
    };
    if first.offset > 0.0 {
        unique.insert(0, GradientStop::new(0.0, first.color));
    }
    if last.offset < 1.0 {
        unique.push(GradientStop::new(1.0, last.color));
    }
    Ok(unique)
}

fn rephase(stops: &[GradientStop], range: f64) -> Vec<GradientStop> {
    let half = range * 0.5;
    let mut rephased: Vec<GradientStop> = stops
        .iter()
        .map(|stop| {
            let offset = stop.offset * range - half;
            let offset = if offset < 0.0 { offset + 1.0 } else { offset };
            GradientStop::new(offset, stop.color)
        })
        .collect();
    rephased.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    rephased
}

/// Built-in stop lists.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Yellow through red, magenta, blue, cyan and green back to yellow.
    #[default]
    Rainbow,
    /// Single cyan stop, the plain regulator's bar color.
    Cyan,
}

impl Preset {
    pub fn stops(&self) -> Vec<GradientStop> {
        match self {
            Preset::Rainbow => vec![
                GradientStop::new(0.0, Color::rgb8(255, 255, 0)),
                GradientStop::new(0.125, Color::rgb8(255, 0, 0)),
                GradientStop::new(0.375, Color::rgb8(255, 0, 255)),
                GradientStop::new(0.5, Color::rgb8(0, 0, 255)),
                GradientStop::new(0.625, Color::rgb8(0, 255, 255)),
                GradientStop::new(0.875, Color::rgb8(0, 255, 0)),
                GradientStop::new(1.0, Color::rgb8(255, 255, 0)),
            ],
            Preset::Cyan => vec![GradientStop::new(0.0, Color::cyan())],
        }
    }

    pub fn wheel(&self, geometry: &AngularConfig) -> Result<GradientWheel, GradientError> {
        GradientWheel::with_geometry(self.stops(), geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn yellow_blue_yellow() -> Vec<GradientStop> {
        vec![
            GradientStop::new(0.0, Color::yellow()),
            GradientStop::new(0.5, Color::blue()),
            GradientStop::new(1.0, Color::yellow()),
        ]
    }

    #[test]
    fn test_empty_stops_fail() {
        assert_eq!(GradientWheel::build(Vec::<GradientStop>::new()), Err(GradientError::Empty));
    }

    #[test]
    fn test_invalid_offsets_fail() {
        let bad = [1.5, -0.1, f64::NAN];
        for offset in bad {
            let result = GradientWheel::build(vec![GradientStop::new(offset, Color::blue())]);
            assert!(matches!(result, Err(GradientError::InvalidOffset(_))));
        }
    }

    #[test]
    fn test_normalization_fills_ends_and_dedups() {
        let red = Color::rgb8(255, 0, 0);
        let wheel = GradientWheel::build(vec![
            GradientStop::new(0.7, Color::yellow()),
            GradientStop::new(0.3, Color::blue()),
            GradientStop::new(0.7, red),
        ])
        .unwrap();

        let offsets: Vec<f64> = wheel.lookup_stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.3, 0.7, 1.0]);
        assert_eq!(wheel.lookup_stops()[0].color, Color::blue());
        assert_eq!(wheel.lookup_stops()[2].color, red);
        assert_eq!(wheel.lookup_stops()[3].color, red);
    }

    #[test]
    fn test_midpoint_rephases_to_zero() {
        let wheel = GradientWheel::build(vec![GradientStop::new(0.5, Color::blue())]).unwrap();
        let first = wheel.rendering_stops()[0];
        assert_eq!(first.offset, 0.0);
        assert_eq!(first.color, Color::blue());
    }

    #[test]
    fn test_rendering_offsets_wrap_around_the_gap() {
        let wheel = GradientWheel::build(yellow_blue_yellow()).unwrap();
        let range = 280.0 / 360.0;
        let offsets: Vec<f64> = wheel.rendering_stops().iter().map(|s| s.offset).collect();

        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets[0], 0.0);
        assert!((offsets[1] - range / 2.0).abs() < 1e-12);
        assert!((offsets[2] - (1.0 - range / 2.0)).abs() < 1e-12);
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_color_at_endpoints() {
        let d = ValueDomain::new(0.0, 100.0, 0.0);
        let red = Color::rgb8(255, 0, 0);
        let wheel = GradientWheel::build(vec![
            GradientStop::new(0.2, red),
            GradientStop::new(0.8, Color::blue()),
        ])
        .unwrap();

        assert_eq!(wheel.color_at(0.0, &d), red);
        assert_eq!(wheel.color_at(100.0, &d), Color::blue());
        assert_eq!(wheel.color_at(-50.0, &d), red);
        assert_eq!(wheel.color_at(500.0, &d), Color::blue());
    }

    #[test]
    fn test_color_at_stop_is_exact() {
        let d = ValueDomain::new(0.0, 100.0, 0.0);
        let wheel = GradientWheel::build(yellow_blue_yellow()).unwrap();
        assert_eq!(wheel.color_at(50.0, &d), Color::blue());
    }

    #[test]
    fn test_color_at_interpolates_alpha() {
        let wheel = GradientWheel::build(vec![
            GradientStop::new(0.0, Color::new(0.0, 0.0, 0.0, 0.0)),
            GradientStop::new(1.0, Color::new(1.0, 1.0, 1.0, 1.0)),
        ])
        .unwrap();
        assert_eq!(wheel.sample(0.25), Color::new(0.25, 0.25, 0.25, 0.25));
    }

    #[test]
    fn test_color_at_is_repeatable() {
        let d = ValueDomain::new(-1.0, 3.0, 0.0);
        let wheel = Preset::Rainbow.wheel(&AngularConfig::default()).unwrap();
        for i in 0..100 {
            let v = -1.0 + i as f64 * 0.04;
            let (a, b) = (wheel.color_at(v, &d), wheel.color_at(v, &d));
            assert_eq!(a.to_string(), b.to_string());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_replace_stops_keeps_old_on_error() {
        let geometry = AngularConfig::default();
        let mut wheel = GradientWheel::build(yellow_blue_yellow()).unwrap();
        let before = wheel.clone();

        assert!(wheel.replace_stops(Vec::<GradientStop>::new(), &geometry).is_err());
        assert_eq!(wheel, before);

        wheel
            .replace_stops(vec![GradientStop::new(0.0, Color::cyan())], &geometry)
            .unwrap();
        assert_eq!(wheel.sample(0.9), Color::cyan());
    }

    #[test]
    fn test_presets_build() {
        for preset in Preset::iter() {
            let name = preset.to_string();
            assert_eq!(name.parse::<Preset>().unwrap(), preset);
            let wheel = preset.wheel(&AngularConfig::default()).unwrap();
            assert_eq!(wheel.lookup_stops()[0].offset, 0.0);
        }
        assert_eq!("RAINBOW".parse::<Preset>().unwrap(), Preset::Rainbow);
    }
}
