use crate::domain::ValueDomain;
use crate::geometry::{self, DegenerateInput, Point};

pub const DEFAULT_START_ANGLE: f64 = -130.0;
pub const DEFAULT_ANGLE_RANGE: f64 = 280.0;

/// Geometry of the dial's drawable arc.
///
/// `start_angle` follows the arc-drawing convention (counter-clockwise positive,
/// y up), so the default `-130` puts the minimum at screen bearing 130, lower left.
/// The arc then sweeps clockwise through the top for `angle_range` degrees. The
/// undrawn gap below is split at `dead_zone_end`: drags past the maximum up to the
/// split pin to the maximum, drags beyond it pin to the minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularConfig {
    start_angle: f64,
    angle_range: f64,
    dead_zone_end: f64,
}

impl Default for AngularConfig {
    fn default() -> Self {
        Self::new(DEFAULT_START_ANGLE, DEFAULT_ANGLE_RANGE)
    }
}

impl AngularConfig {
    /// `angle_range` outside `(0, 360]` falls back to the default range.
    pub fn new(start_angle: f64, angle_range: f64) -> Self {
        let angle_range = if angle_range > 0.0 && angle_range <= 360.0 {
            angle_range
        } else {
            log::warn!(
                "Angle range {} is out of range of (0, 360], using {} instead",
                angle_range,
                DEFAULT_ANGLE_RANGE
            );
            DEFAULT_ANGLE_RANGE
        };
        let start_angle = if start_angle.is_finite() {
            start_angle
        } else {
            log::warn!("Start angle {start_angle} is not finite, using {DEFAULT_START_ANGLE}");
            DEFAULT_START_ANGLE
        };

        Self {
            start_angle,
            angle_range,
            dead_zone_end: angle_range + (360.0 - angle_range) / 2.0,
        }
    }

    /// Moves the split inside the dead zone; clamped to `[angle_range, 360]`.
    pub fn with_dead_zone_end(mut self, end: f64) -> Self {
        if !end.is_nan() {
            self.dead_zone_end = end.clamp(self.angle_range, 360.0);
        }
        self
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn angle_range(&self) -> f64 {
        self.angle_range
    }

    pub fn dead_zone_start(&self) -> f64 {
        self.angle_range
    }

    pub fn dead_zone_end(&self) -> f64 {
        self.dead_zone_end
    }

    /// Offset that moves the arc's minimum to phased angle 0 (230 for the defaults).
    pub fn phase_offset(&self) -> f64 {
        self.start_angle.rem_euclid(360.0)
    }

    /// Share of the full circle covered by the drawn arc.
    pub fn arc_fraction(&self) -> f64 {
        self.angle_range / 360.0
    }

    pub fn phased_angle(&self, bearing: f64) -> f64 {
        (bearing + self.phase_offset()).rem_euclid(360.0)
    }

    /// Folds a phased angle in the dead zone onto the nearer end of the arc.
    pub fn snap(&self, angle: f64) -> f64 {
        if angle > self.dead_zone_end && angle < 360.0 {
            0.0
        } else if angle > self.angle_range {
            self.angle_range
        } else {
            angle.max(0.0)
        }
    }

    /// Value for an already phased angle.
    pub fn angle_to_value(&self, angle: f64, domain: &ValueDomain) -> f64 {
        let angle = self.snap(angle);
        domain.lerp(angle / self.angle_range)
    }

    pub fn bearing_to_value(&self, bearing: f64, domain: &ValueDomain) -> f64 {
        self.angle_to_value(self.phased_angle(bearing), domain)
    }

    pub fn pointer_to_value(
        &self,
        center: Point,
        pointer: Point,
        domain: &ValueDomain,
    ) -> Result<f64, DegenerateInput> {
        let bearing = geometry::bearing(center, pointer)?;
        Ok(self.bearing_to_value(bearing, domain))
    }

    /// Indicator rotation for `value`, centered on the top of the dial:
    /// `-angle_range / 2` at the minimum, `+angle_range / 2` at the maximum.
    pub fn value_to_indicator_angle(&self, value: f64, domain: &ValueDomain) -> f64 {
        let half = self.angle_range * 0.5;
        domain.fraction(value) * self.angle_range - half
    }

    /// Sweep of the value bar, in degrees clockwise from the start of the arc.
    pub fn bar_extent(&self, value: f64, domain: &ValueDomain) -> f64 {
        domain.fraction(value) * self.angle_range
    }
}
