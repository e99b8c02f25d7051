//! Configuration module for the soap film widgets.
//!
//! This module defines the parameter groups for the three widget models:
//! the connected-bubble pressure experiment, the Steiner soap film comparison,
//! and the thin-film color slider.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters for the connected-bubbles pressure experiment.
///
/// Units are pedagogical rather than SI: radii are slider units and the
/// surface tension is chosen so pressures land in a readable range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressureFlowParameters {
    /// Surface tension coefficient (sigma in P = 2 sigma / r)
    #[serde(default = "default_surface_tension")]
    pub surface_tension: f64,

    /// Flow-rate constant k in dV = (P_a - P_b) * k * dt
    #[serde(default = "default_flow_rate")]
    pub flow_rate: f64,

    /// Fixed simulation time step in seconds (one animation frame)
    #[serde(default = "default_time_step")]
    pub time_step: f64,

    /// Radius below which a bubble is considered collapsed
    #[serde(default = "default_collapse_radius")]
    pub collapse_radius: f64,

    /// Lower bound of the radius sliders
    #[serde(default = "default_min_slider_radius")]
    pub min_slider_radius: f64,

    /// Upper bound of the radius sliders
    #[serde(default = "default_max_slider_radius")]
    pub max_slider_radius: f64,

    /// Initial radius of bubble A
    #[serde(default = "default_initial_radius_a")]
    pub initial_radius_a: f64,

    /// Initial radius of bubble B
    #[serde(default = "default_initial_radius_b")]
    pub initial_radius_b: f64,
}

fn default_surface_tension() -> f64 {
    1.0
}

fn default_flow_rate() -> f64 {
    0.05
}

fn default_time_step() -> f64 {
    1.0 / 60.0 // one frame at 60fps
}

fn default_collapse_radius() -> f64 {
    0.1
}

fn default_min_slider_radius() -> f64 {
    0.3
}

fn default_max_slider_radius() -> f64 {
    2.0
}

fn default_initial_radius_a() -> f64 {
    0.6
}

fn default_initial_radius_b() -> f64 {
    1.2
}

impl Default for PressureFlowParameters {
    fn default() -> Self {
        Self {
            surface_tension: default_surface_tension(),
            flow_rate: default_flow_rate(),
            time_step: default_time_step(),
            collapse_radius: default_collapse_radius(),
            min_slider_radius: default_min_slider_radius(),
            max_slider_radius: default_max_slider_radius(),
            initial_radius_a: default_initial_radius_a(),
            initial_radius_b: default_initial_radius_b(),
        }
    }
}

/// Parameters for the Steiner tree comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteinerParameters {
    /// Side length of the square whose corners are connected
    #[serde(default = "default_side")]
    pub side: f64,
}

fn default_side() -> f64 {
    1.0
}

impl Default for SteinerParameters {
    fn default() -> Self {
        Self {
            side: default_side(),
        }
    }
}

/// Parameters for the thin-film color slider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmParameters {
    /// Lower bound of the thickness slider (nm)
    #[serde(default)]
    pub min_thickness_nm: f64,

    /// Upper bound of the thickness slider (nm)
    #[serde(default = "default_max_thickness")]
    pub max_thickness_nm: f64,

    /// Slider increment (nm)
    #[serde(default = "default_slider_step")]
    pub slider_step_nm: f64,

    /// Thickness shown when the article first renders (nm)
    #[serde(default = "default_initial_thickness")]
    pub initial_thickness_nm: f64,
}

fn default_max_thickness() -> f64 {
    1000.0
}

fn default_slider_step() -> f64 {
    10.0
}

fn default_initial_thickness() -> f64 {
    300.0
}

impl Default for FilmParameters {
    fn default() -> Self {
        Self {
            min_thickness_nm: 0.0,
            max_thickness_nm: default_max_thickness(),
            slider_step_nm: default_slider_step(),
            initial_thickness_nm: default_initial_thickness(),
        }
    }
}

/// Complete widget configuration combining all parameter groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Connected-bubbles pressure experiment
    #[serde(default)]
    pub pressure: PressureFlowParameters,

    /// Steiner soap film comparison
    #[serde(default)]
    pub steiner: SteinerParameters,

    /// Thin-film color slider
    #[serde(default)]
    pub film: FilmParameters,
}

impl WidgetConfig {
    /// Load configuration from a JSON file.
    ///
    /// Missing groups and fields fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        serde_json::from_str(&contents).map_err(|error| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Save configuration to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|error| ConfigError::Serialize { error })?;
        fs::write(path.as_ref(), contents).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Error types for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error when reading or writing configuration files
    Io {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
    /// JSON parsing error
    Parse {
        path: std::path::PathBuf,
        error: serde_json::Error,
    },
    /// JSON serialization error
    Serialize { error: serde_json::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(
                    formatter,
                    "Failed to read/write config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Parse { path, error } => {
                write!(
                    formatter,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Serialize { error } => {
                write!(formatter, "Failed to serialize config: {}", error)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { error, .. } => Some(error),
            ConfigError::Parse { error, .. } => Some(error),
            ConfigError::Serialize { error } => Some(error),
        }
    }
}
