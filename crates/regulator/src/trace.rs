//! Line-oriented pointer scripts for driving a [`Regulator`] without a UI.
//!
//! ```text
//! center 125 125
//! press 125 25
//! move 200 125
//! release
//! ```

use crate::state::{PointerAction, Regulator};
use dial::Point;
use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Center(Point),
    Press(Point),
    Move(Point),
    Release,
    Set(f64),
    Min(f64),
    Max(f64),
    On,
    Off,
}

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let cmd = words.next().ok_or("empty step")?;
        let args = words
            .map(|w| w.parse::<f64>().map_err(|_| format!("'{w}' is not a number")))
            .collect::<Result<Vec<_>, _>>()?;

        let point = || match args[..] {
            [x, y] => Ok(Point::new(x, y)),
            _ => Err(format!("'{cmd}' takes X Y")),
        };
        let number = || match args[..] {
            [v] => Ok(v),
            _ => Err(format!("'{cmd}' takes one value")),
        };
        let bare = |step| {
            if args.is_empty() {
                Ok(step)
            } else {
                Err(format!("'{cmd}' takes no arguments"))
            }
        };

        match cmd.to_ascii_lowercase().as_str() {
            "center" => point().map(Step::Center),
            "press" => point().map(Step::Press),
            "move" => point().map(Step::Move),
            "release" => bare(Step::Release),
            "set" => number().map(Step::Set),
            "min" => number().map(Step::Min),
            "max" => number().map(Step::Max),
            "on" => bare(Step::On),
            "off" => bare(Step::Off),
            other => Err(format!("unknown step '{other}'")),
        }
    }
}

/// Parses a script, skipping blank lines and `#` comments.
pub fn parse(reader: impl BufRead) -> Result<Vec<Step>, TraceError> {
    let mut steps = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let step = line.parse().map_err(|reason| TraceError::Parse {
            line: idx + 1,
            reason,
        })?;
        steps.push(step);
    }
    Ok(steps)
}

/// Feeds steps to a regulator, tracking the current rotation center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replay {
    center: Point,
}

impl Replay {
    pub fn new(center: Point) -> Self {
        Self { center }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn apply(&mut self, regulator: &mut Regulator, step: Step) -> PointerAction {
        log::debug!("Replaying {:?}", step);
        match step {
            Step::Center(p) => {
                self.center = p;
                PointerAction::default()
            }
            Step::Press(p) => regulator.press(self.center, p),
            Step::Move(p) => regulator.drag_to(self.center, p),
            Step::Release => regulator.release(),
            Step::Set(v) => {
                regulator.set_value(v);
                PointerAction::new(true, false)
            }
            Step::Min(v) => {
                regulator.set_min_value(v);
                PointerAction::new(true, false)
            }
            Step::Max(v) => {
                regulator.set_max_value(v);
                PointerAction::new(true, false)
            }
            Step::On => {
                regulator.switch_on();
                PointerAction::new(true, false)
            }
            Step::Off => {
                regulator.switch_off();
                PointerAction::new(true, false)
            }
        }
    }
}
