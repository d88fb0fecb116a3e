/// A `[min, max]` range together with a value that always lies inside it.
///
/// Every mutation clamps before storing, so `min <= value <= max` holds after
/// each call returns. NaN inputs are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDomain {
    min: f64,
    max: f64,
    value: f64,
}

impl Default for ValueDomain {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            value: 0.0,
        }
    }
}

impl ValueDomain {
    /// Builds a domain the same way `set_domain` followed by `set_value` would.
    pub fn new(min: f64, max: f64, value: f64) -> Self {
        let mut domain = Self::default();
        domain.set_domain(min, max);
        domain.set_value(value);
        domain
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Position of `value` inside the domain as `[0, 1]`. A zero-width domain yields 0.
    ///
    /// Operands are halved first so `max - min` stays finite for bounds near `f64::MAX`.
    pub fn fraction(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        let f = (value * 0.5 - self.min * 0.5) / (self.max * 0.5 - self.min * 0.5);
        if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
    }

    /// Value at `fraction` of the span, clamped into the domain. The ends are exact.
    pub fn lerp(&self, fraction: f64) -> f64 {
        if fraction.is_nan() || fraction <= 0.0 {
            return self.min;
        }
        if fraction >= 1.0 {
            return self.max;
        }
        self.clamp((1.0 - fraction) * self.min + fraction * self.max)
    }

    /// Degrees of rotation per unit of value. Infinite for a zero-width domain.
    pub fn angle_step(&self, angle_range: f64) -> f64 {
        angle_range / self.span()
    }

    /// Returns the stored (clamped) value, or `None` if `value` was NaN.
    pub fn set_value(&mut self, value: f64) -> Option<f64> {
        if value.is_nan() {
            log::warn!("Ignoring NaN value");
            return None;
        }
        self.value = self.clamp(value);
        Some(self.value)
    }

    /// Sets `min`, clamped so it never exceeds the current `max`, and re-clamps the value.
    pub fn set_min(&mut self, min: f64) {
        if min.is_nan() {
            log::warn!("Ignoring NaN minimum");
            return;
        }
        self.min = min.min(self.max);
        self.value = self.clamp(self.value);
    }

    /// Sets `max`, clamped so it never falls below the current `min`, and re-clamps the value.
    pub fn set_max(&mut self, max: f64) {
        if max.is_nan() {
            log::warn!("Ignoring NaN maximum");
            return;
        }
        self.max = max.max(self.min);
        self.value = self.clamp(self.value);
    }

    /// Replaces both bounds at once. `min` is taken as given; `max` is raised to `min`
    /// when it would be lower.
    pub fn set_domain(&mut self, min: f64, max: f64) {
        if min.is_nan() || max.is_nan() {
            log::warn!("Ignoring NaN domain [{min}, {max}]");
            return;
        }
        self.min = min;
        self.max = max.max(min);
        self.value = self.clamp(self.value);
    }
}
