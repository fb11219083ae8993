use std::path::Path;

use glam::DVec3;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    lattice::MAX_RESOLUTION,
};

/// Settings of a run, usually loaded from a TOML file.
///
/// Every field has a default, so an empty file (or no file at all) reproduces the stock
/// simulation: a 30³ lattice over [-3, 3]³, a unit wave packet and a point mass with `G = 0.1`.
///
/// ```
/// # use psi_lens::config::Config;
/// let config = Config::from_toml_str(
///     r#"
///     [gravity]
///     gravitational_constant = 0.25
///
///     [view]
///     zoom = 80.0
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.gravity.gravitational_constant, 0.25);
/// assert_eq!(config.lattice.resolution, 30);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Sampling lattice.
    pub lattice: LatticeConfig,
    /// Wave packet parameters.
    pub field: FieldConfig,
    /// Central mass parameters.
    pub gravity: GravityConfig,
    /// Initial view and input step sizes.
    pub view: ViewConfig,
    /// Output surface and pacing.
    pub display: DisplayConfig,
}

/// Lattice section of a [`Config`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeConfig {
    /// Samples per axis.
    pub resolution: usize,
    /// Lower bound of every axis.
    pub min: f64,
    /// Upper bound of every axis.
    pub max: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            resolution: 30,
            min: -3.0,
            max: 3.0,
        }
    }
}

/// Field section of a [`Config`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Width of the gaussian envelope.
    pub sigma: f64,
    /// Angular frequency.
    pub omega: f64,
    /// Wave vector.
    pub k: [f64; 3],
    /// Time at which the field is sampled to seed intensities.
    pub time: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            omega: 1.0,
            k: [1.0; 3],
            time: 0.0,
        }
    }
}

impl FieldConfig {
    /// The wave vector as a [`DVec3`].
    pub fn wave_vector(&self) -> DVec3 {
        DVec3::from_array(self.k)
    }
}

/// Gravity section of a [`Config`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GravityConfig {
    /// Coupling constant of the central mass.
    pub gravitational_constant: f64,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 0.1,
        }
    }
}

/// View section of a [`Config`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Initial zoom.
    pub zoom: f64,
    /// Degrees added or removed per frame while an arrow key is held.
    pub angle_step: f64,
    /// Zoom added or removed per frame while a zoom key is held.
    pub zoom_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom: 50.0,
            angle_step: 10.0,
            zoom_step: 25.0,
        }
    }
}

/// Display section of a [`Config`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Surface width used by headless runs and by windowed runs when not fullscreen.
    pub width: u32,
    /// Surface height used by headless runs and by windowed runs when not fullscreen.
    pub height: u32,
    /// Open the window fullscreen.
    pub fullscreen: bool,
    /// Frames per second the pacer aims for.
    pub target_fps: u32,
    /// Render this many frames into an in-memory frame buffer instead of opening a window.
    pub headless_frames: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1300,
            height: 700,
            fullscreen: true,
            target_fps: 60,
            headless_frames: None,
        }
    }
}

impl Config {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");

        Ok(config)
    }

    /// Checks that the configuration describes a simulation that can be built.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Err(Error::Invalid(message.to_owned()));

        if self.lattice.resolution < 2 {
            return invalid("lattice.resolution must be at least 2");
        }
        if self.lattice.resolution > MAX_RESOLUTION {
            return Err(Error::Invalid(format!(
                "lattice.resolution must be at most {MAX_RESOLUTION}"
            )));
        }
        if !(self.lattice.min < self.lattice.max) {
            return invalid("lattice.min must be smaller than lattice.max");
        }
        if !(self.field.sigma > 0.0) {
            return invalid("field.sigma must be positive");
        }
        if !(self.gravity.gravitational_constant >= 0.0) {
            return invalid("gravity.gravitational_constant must not be negative");
        }
        if self.display.target_fps == 0 {
            return invalid("display.target_fps must be positive");
        }
        if self.display.width == 0 || self.display.height == 0 {
            return invalid("display.width and display.height must be positive");
        }
        if i32::try_from(self.display.width).is_err()
            || i32::try_from(self.display.height).is_err()
        {
            return invalid("display.width and display.height must fit in an i32");
        }

        Ok(())
    }
}
