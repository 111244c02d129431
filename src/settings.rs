//! Layered runtime settings.
//!
//! Sources, lowest priority first: built-in defaults, an optional settings
//! file, `PROBWATCH_*` environment variables (nested keys use `__`, e.g.
//! `PROBWATCH_SAMPLER__STEP=20`), then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use probwatch_core::{SamplerConfig, DEFAULT_CAPACITY};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::ui::ThemeMode;

/// How the initial theme is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Saved preference, else terminal background detection.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeChoice {
    /// Resolve to a concrete mode. `detect` is only called when neither an
    /// explicit choice nor a saved preference is available.
    pub fn resolve(self, saved: Option<ThemeMode>, detect: impl FnOnce() -> ThemeMode) -> ThemeMode {
        match self {
            ThemeChoice::Light => ThemeMode::Light,
            ThemeChoice::Dark => ThemeMode::Dark,
            ThemeChoice::Auto => saved.unwrap_or_else(detect),
        }
    }
}

/// Runtime settings after all layers are merged.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tick interval as a duration string ("3s", "500ms").
    pub interval: String,
    /// History cap.
    pub capacity: usize,
    pub sampler: SamplerConfig,
    /// Seed for a reproducible random walk.
    pub seed: Option<u64>,
    pub theme: ThemeChoice,
    /// Where the theme preference is stored.
    pub prefs_path: Option<PathBuf>,
    /// Write logs here; logging is off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: "3s".to_string(),
            capacity: DEFAULT_CAPACITY,
            sampler: SamplerConfig::default(),
            seed: None,
            theme: ThemeChoice::Auto,
            prefs_path: None,
            log_file: None,
        }
    }
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub interval: Option<String>,
    pub capacity: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub seed: Option<u64>,
    pub theme: Option<ThemeChoice>,
    pub prefs_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// `PROBWATCH_CAPACITY`, `PROBWATCH_SAMPLER__STEP`, ...
fn environment() -> Environment {
    Environment::with_prefix("PROBWATCH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load defaults, then `file` (if any), then the environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with(file, environment())
    }

    fn load_with(file: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(env)
            .build()
            .context("Failed to load settings")?;

        config.try_deserialize().context("Invalid settings")
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(interval) = overrides.interval {
            self.interval = interval;
        }
        if let Some(capacity) = overrides.capacity {
            self.capacity = capacity;
        }
        if let Some(min) = overrides.min {
            self.sampler.min = min;
        }
        if let Some(max) = overrides.max {
            self.sampler.max = max;
        }
        if let Some(step) = overrides.step {
            self.sampler.step = step;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if overrides.prefs_path.is_some() {
            self.prefs_path = overrides.prefs_path;
        }
        if overrides.log_file.is_some() {
            self.log_file = overrides.log_file;
        }
    }

    /// Parsed tick interval.
    pub fn interval(&self) -> Result<Duration> {
        let interval = parse_duration(&self.interval)
            .with_context(|| format!("Invalid interval '{}'", self.interval))?;
        if interval.is_zero() {
            bail!("Interval must be greater than zero");
        }
        Ok(interval)
    }

    /// Check every field that the core would otherwise reject later.
    pub fn validate(&self) -> Result<()> {
        self.interval()?;
        if self.capacity == 0 {
            bail!("Capacity must be at least 1");
        }
        self.sampler.validate()?;
        Ok(())
    }
}
