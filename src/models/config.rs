use anyhow::Context;
use bead_quant::{BeadColor, Catalog, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{EnhanceOptions, PatternOptions};
use crate::error::PatternError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Default pattern options, overridable per request
    #[serde(default)]
    pub pattern: PatternOptions,

    /// Default image adjustments, overridable per request
    #[serde(default)]
    pub enhance: EnhanceOptions,

    #[serde(default)]
    pub costing: CostingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Extra font directory for pattern labels
    #[serde(default)]
    pub fonts_dir: Option<PathBuf>,
}

/// Purchasing and physical bead figures.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CostingConfig {
    #[serde(default = "default_price_per_bag")]
    pub price_per_bag: f64,

    #[serde(default = "default_beads_per_bag")]
    pub beads_per_bag: u32,

    /// Center-to-center bead distance on the board
    #[serde(default = "default_bead_pitch_mm")]
    pub bead_pitch_mm: f64,

    #[serde(default = "default_bead_weight_g")]
    pub bead_weight_g: f64,
}

fn default_price_per_bag() -> f64 {
    1.0
}

fn default_beads_per_bag() -> u32 {
    1000
}

fn default_bead_pitch_mm() -> f64 {
    5.0
}

fn default_bead_weight_g() -> f64 {
    0.06
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            price_per_bag: default_price_per_bag(),
            beads_per_bag: default_beads_per_bag(),
            bead_pitch_mm: default_bead_pitch_mm(),
            bead_weight_g: default_bead_weight_g(),
        }
    }
}

impl CostingConfig {
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.beads_per_bag == 0 {
            return Err(PatternError::InvalidInput(
                "beads_per_bag must be greater than 0".to_string(),
            ));
        }
        if !self.price_per_bag.is_finite() || self.price_per_bag < 0.0 {
            return Err(PatternError::InvalidInput(format!(
                "price_per_bag must be >= 0, got {}",
                self.price_per_bag
            )));
        }
        let pitch_ok = self.bead_pitch_mm.is_finite() && self.bead_pitch_mm > 0.0;
        let weight_ok = self.bead_weight_g.is_finite() && self.bead_weight_g >= 0.0;
        if !pitch_ok || !weight_ok {
            return Err(PatternError::InvalidInput(
                "bead pitch must be positive and weight non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Catalog source.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// YAML list of `{code, hex}` replacing the built-in catalog
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    code: String,
    hex: String,
}

impl CatalogConfig {
    /// Built-in catalog unless a file is configured.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.file {
            Some(path) => load_catalog_file(path),
            None => Ok(Catalog::builtin().clone()),
        }
    }
}

/// Parse a catalog YAML document.
pub fn parse_catalog(yaml: &str) -> anyhow::Result<Catalog> {
    let entries: Vec<CatalogEntry> = serde_yaml::from_str(yaml).context("Invalid catalog YAML")?;
    let beads = entries
        .into_iter()
        .map(|e| {
            let rgb: Rgb = e
                .hex
                .parse()
                .with_context(|| format!("Bad color for bead {}: {}", e.code, e.hex))?;
            Ok(BeadColor::new(e.code, rgb))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Catalog::from_entries(beads)?)
}

fn load_catalog_file(path: &Path) -> anyhow::Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = parse_catalog(&content)?;
    tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded bead catalog");
    Ok(catalog)
}

/// External text-to-image service.
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Image generation endpoint; generation is disabled when unset
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Environment variable holding the bearer token
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default = "default_image_size")]
    pub size: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key_env() -> String {
    "BEADSMITH_API_KEY".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: default_api_key_env(),
            model: None,
            size: default_image_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` (default `config.yaml`), falling back to defaults.
    pub fn load() -> Self {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.yaml".to_string());
        Self::load_from_path(Path::new(&path))
    }

    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        width_beads = config.pattern.width_beads,
                        custom_catalog = config.catalog.file.is_some(),
                        generator = config.generator.endpoint.is_some(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
