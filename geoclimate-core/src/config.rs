//! Configuration file support for GeoClimate
//!
//! Loads lane defaults and stress multipliers from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.geoclimaterc.json` in the working directory
//! 3. `geoclimate.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::lane::{TransportMode, WeightingProfile};
use crate::scenario::StressMultipliers;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Session file used when neither the config nor the CLI names one
pub const DEFAULT_SESSION_PATH: &str = ".geoclimate/session.json";

/// GeoClimate configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoclimateConfig {
    /// Weighting profile name (default: "Balanced")
    #[serde(default)]
    pub weighting: Option<String>,

    /// Transport mode (default: "sea")
    #[serde(default)]
    pub mode: Option<String>,

    /// Apply the conflict bump for conflict origins (default: true)
    #[serde(default)]
    pub include_conflict: Option<bool>,

    /// Stress multipliers for the scenario lab
    #[serde(default)]
    pub stress: Option<StressConfig>,

    /// Session file path (default: `.geoclimate/session.json`)
    #[serde(default)]
    pub session: Option<PathBuf>,
}

/// Stress multipliers; omitted dimensions use the scenario defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StressConfig {
    /// Geopolitical multiplier (default: 1.1)
    pub geo: Option<f64>,
    /// Climate multiplier (default: 1.2)
    pub climate: Option<f64>,
    /// Logistics multiplier (default: 1.1)
    pub logistics: Option<f64>,
    /// Cyber multiplier (default: 1.0)
    pub cyber: Option<f64>,
}

impl StressConfig {
    fn multipliers(&self) -> StressMultipliers {
        let defaults = StressMultipliers::default();
        StressMultipliers {
            geo: self.geo.unwrap_or(defaults.geo),
            climate: self.climate.unwrap_or(defaults.climate),
            logistics: self.logistics.unwrap_or(defaults.logistics),
            cyber: self.cyber.unwrap_or(defaults.cyber),
        }
    }
}

/// Resolved configuration with parsed names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub weighting: WeightingProfile,
    pub mode: TransportMode,
    pub include_conflict: bool,
    pub stress: StressMultipliers,
    pub session_path: PathBuf,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl GeoclimateConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.weighting {
            if WeightingProfile::parse(name).is_none() {
                let known: Vec<&str> = WeightingProfile::ALL.iter().map(|w| w.as_str()).collect();
                anyhow::bail!(
                    "unknown weighting '{}' (expected one of: {})",
                    name,
                    known.join(", ")
                );
            }
        }

        if let Some(ref name) = self.mode {
            if TransportMode::parse(name).is_none() {
                let known: Vec<&str> = TransportMode::ALL.iter().map(|m| m.as_str()).collect();
                anyhow::bail!(
                    "unknown mode '{}' (expected one of: {})",
                    name,
                    known.join(", ")
                );
            }
        }

        if let Some(ref stress) = self.stress {
            stress.multipliers().validate()?;
        }

        if let Some(ref session) = self.session {
            if session.as_os_str().is_empty() {
                anyhow::bail!("session path must not be empty");
            }
        }

        Ok(())
    }

    /// Resolve config into parsed form ready for use
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let weighting = self
            .weighting
            .as_deref()
            .and_then(WeightingProfile::parse)
            .unwrap_or_default();
        let mode = self
            .mode
            .as_deref()
            .and_then(TransportMode::parse)
            .unwrap_or(TransportMode::Sea);
        let stress = self
            .stress
            .as_ref()
            .map(StressConfig::multipliers)
            .unwrap_or_default();

        Ok(ResolvedConfig {
            weighting,
            mode,
            include_conflict: self.include_conflict.unwrap_or(true),
            stress,
            session_path: self
                .session
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH)),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        GeoclimateConfig::default().resolve()
    }
}

/// Discover and load a config file from a directory
///
/// Search order:
/// 1. `.geoclimaterc.json`
/// 2. `geoclimate.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(root: &Path) -> Result<Option<(GeoclimateConfig, PathBuf)>> {
    for name in [".geoclimaterc.json", "geoclimate.config.json"] {
        let path = root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<GeoclimateConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: GeoclimateConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `root`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(root)? {
            Some((config, path)) => (config, Some(path)),
            None => (GeoclimateConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
