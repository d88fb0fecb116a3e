use crate::state::{Mode, Regulator, RingArea};
use dial::{
    AngularConfig, Color, Decimals, GradientError, GradientStop, GradientWheel, Preset, Unit,
    ValueDomain,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub decimals: Decimals,
    pub unit: Unit,
    pub start_angle: f64,
    pub angle_range: f64,
    pub dead_zone_end: Option<f64>,
    pub mode: Mode,
    pub bar_color: Color,
    pub gradient: Preset,
    pub stops: Vec<GradientStop>,
    pub ring: Option<RingArea>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            value: 0.0,
            decimals: Decimals::default(),
            unit: Unit::default(),
            start_angle: dial::angle::DEFAULT_START_ANGLE,
            angle_range: dial::angle::DEFAULT_ANGLE_RANGE,
            dead_zone_end: None,
            mode: Mode::default(),
            bar_color: Color::cyan(),
            gradient: Preset::default(),
            stops: Vec::new(),
            ring: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid gradient: {0}")]
    Gradient(#[from] GradientError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Config {
    pub fn geometry(&self) -> AngularConfig {
        let geometry = AngularConfig::new(self.start_angle, self.angle_range);
        match self.dead_zone_end {
            Some(end) => geometry.with_dead_zone_end(end),
            None => geometry,
        }
    }

    /// Explicit `stops` win over the `gradient` preset.
    pub fn wheel(&self) -> Result<GradientWheel, GradientError> {
        let geometry = self.geometry();
        if self.stops.is_empty() {
            self.gradient.wheel(&geometry)
        } else {
            GradientWheel::with_geometry(self.stops.iter().copied(), &geometry)
        }
    }

    pub fn build_regulator(&self) -> Result<Regulator, ConfigError> {
        let geometry = self.geometry();
        let domain = ValueDomain::new(self.min, self.max, self.value);

        let regulator = match self.mode {
            Mode::Plain => Regulator::new(domain, geometry),
            Mode::Color => Regulator::with_gradient(domain, geometry, self.wheel()?),
        }
        .with_decimals(self.decimals)
        .with_unit(self.unit.clone())
        .with_bar_color(self.bar_color);

        Ok(match self.ring {
            Some(ring) => regulator.with_ring(ring),
            None => regulator,
        })
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "regulators", "regulator")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads `path` (or the default location) layered under `REGULATOR_*` variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(path.is_some()))
        .add_source(config::Environment::with_prefix("REGULATOR"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Writes the commented default config unless a file already exists there.
pub fn write_default_config(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(s: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_parses() {
        let c = from_toml(DEFAULT_CONFIG);
        assert_eq!((c.min, c.max, c.value), (0.0, 100.0, 0.0));
        assert_eq!(c.unit.as_str(), "%");
        assert_eq!(c.mode, Mode::Plain);
        assert_eq!(c.bar_color, Color::cyan());
        assert_eq!(c.gradient, Preset::Rainbow);
        assert!(c.stops.is_empty());
        assert!(c.ring.is_none());
    }

    #[test]
    fn test_color_mode_with_stops() {
        let c = from_toml(
            r##"
            mode = "Color"
            decimals = 9

            [[stops]]
            offset = 0.0
            color = "#ffff00"

            [[stops]]
            offset = 0.5
            color = "#0000ff"

            [ring]
            inner_radius = 10.0
            outer_radius = 20.0
            "##,
        );
        assert_eq!(c.decimals, Decimals::new(2));

        let mut reg = c.build_regulator().unwrap();
        assert_eq!(reg.mode(), Mode::Color);
        reg.set_value(50.0);
        assert_eq!(reg.color(), Some(Color::blue()));
        reg.set_value(100.0);
        assert_eq!(reg.color(), Some(Color::blue()));
    }

    #[test]
    fn test_invalid_stops_fail_to_build() {
        let c = Config {
            mode: Mode::Color,
            stops: vec![GradientStop::new(2.0, Color::blue())],
            ..Config::default()
        };
        assert!(matches!(
            c.build_regulator(),
            Err(ConfigError::Gradient(GradientError::InvalidOffset(_)))
        ));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let c = from_toml("max = 10.0\nvalue = 25.0\nangle_range = 300.0");
        let reg = c.build_regulator().unwrap();
        assert_eq!(reg.value(), 10.0);
        assert_eq!(reg.geometry().angle_range(), 300.0);
        assert_eq!(reg.geometry().phase_offset(), 230.0);
        assert_eq!(reg.mode(), Mode::Plain);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = std::env::temp_dir().join(format!("regulator-env-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(&path, "max = 5.0\nangle_range = 280.0\n").unwrap();

        // only this test touches REGULATOR_DEAD_ZONE_END
        unsafe { std::env::set_var("REGULATOR_DEAD_ZONE_END", "300") };
        let loaded = load_config(Some(&path));
        unsafe { std::env::remove_var("REGULATOR_DEAD_ZONE_END") };

        let c = loaded.unwrap();
        assert_eq!(c.max, 5.0);
        assert_eq!(c.dead_zone_end, Some(300.0));
        assert_eq!(c.geometry().dead_zone_end(), 300.0);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_default_config_does_not_overwrite() {
        let dir = std::env::temp_dir().join(format!("regulator-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(&path, "max = 5.0\n").unwrap();

        let written = write_default_config(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "max = 5.0\n");
        let c = load_config(Some(&path)).unwrap();
        assert_eq!(c.max, 5.0);

        fs_err::remove_dir_all(&dir).unwrap();
    }
}
