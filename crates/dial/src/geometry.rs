use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position in widget-local screen space (+y points down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("pointer at ({x}, {y}) has no bearing from the center")]
pub struct DegenerateInput {
    pub x: f64,
    pub y: f64,
}

/// Bearing in degrees from `center` to `pointer`, in `[0, 360)`.
///
/// 0 points along +x and angles grow clockwise on screen.
pub fn bearing(center: Point, pointer: Point) -> Result<f64, DegenerateInput> {
    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
    if (dx == 0.0 && dy == 0.0) || !dx.is_finite() || !dy.is_finite() {
        return Err(DegenerateInput {
            x: pointer.x,
            y: pointer.y,
        });
    }

    let theta = dy.atan2(dx).to_degrees();
    let theta = if theta < 0.0 { theta + 360.0 } else { theta };
    // tiny negative atan2 results round up to exactly 360
    Ok(if theta >= 360.0 { 0.0 } else { theta })
}
