//! Angular input mapping and circular gradients for rotary dial controls.

mod macros;

pub mod angle;
pub mod color;
pub mod domain;
pub mod geometry;
pub mod gradient;
pub mod label;

pub use angle::AngularConfig;
pub use color::Color;
pub use domain::ValueDomain;
pub use geometry::{DegenerateInput, Point};
pub use gradient::{GradientError, GradientStop, GradientWheel, Preset};
pub use label::{Decimals, Unit};
