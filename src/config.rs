//! Analysis configuration.
//!
//! Handles loading, validating, and merging a `pixprint.toml` file on top of
//! the stock defaults. Every knob the algorithms expose lives here so callers
//! can tune them without touching code.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [palette]
//! color_count = 5               # Number of representative colors (K)
//! iterations = 10               # Fixed clustering passes
//! sample_size = 100             # Longest edge of the analysis sample
//! strategy = "kmeans"           # "kmeans" or "bucket"
//! bucket_step = 10              # Channel rounding step for "bucket"
//! monochromatic_threshold = 0.8 # Dominant share needed to call an image monochromatic
//!
//! [hashing]
//! algorithm = "dhash"           # "dhash" or "ahash"
//! similarity_threshold = 0.9    # Minimum similarity for two images to match
//!
//! [quality]
//! divisor = 10.0                # sqrt(variance) / divisor
//! cap = 100.0                   # Upper bound of the score
//! max_pixels = 40000000         # Pixel ceiling (0 = unbounded)
//! oversize = "downsample"       # "downsample" or "reject"
//!
//! [processing]
//! max_processes = 4             # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::hash::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Palette extraction settings.
    pub palette: PaletteConfig,
    /// Perceptual hash settings.
    pub hashing: HashConfig,
    /// Sharpness scoring settings.
    pub quality: QualityConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl AnalysisConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.palette;
        if p.color_count == 0 {
            return Err(ConfigError::Validation(
                "palette.color_count must be at least 1".into(),
            ));
        }
        if p.iterations == 0 {
            return Err(ConfigError::Validation(
                "palette.iterations must be at least 1".into(),
            ));
        }
        if p.sample_size == 0 {
            return Err(ConfigError::Validation(
                "palette.sample_size must be at least 1".into(),
            ));
        }
        if p.bucket_step == 0 {
            return Err(ConfigError::Validation(
                "palette.bucket_step must be 1-255".into(),
            ));
        }
        if !(0.0..=1.0).contains(&p.monochromatic_threshold) {
            return Err(ConfigError::Validation(
                "palette.monochromatic_threshold must be 0-1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.hashing.similarity_threshold) {
            return Err(ConfigError::Validation(
                "hashing.similarity_threshold must be 0-1".into(),
            ));
        }
        let q = &self.quality;
        if !(q.divisor > 0.0) {
            return Err(ConfigError::Validation(
                "quality.divisor must be positive".into(),
            ));
        }
        if !(q.cap > 0.0 && q.cap <= 100.0) {
            return Err(ConfigError::Validation(
                "quality.cap must be in (0, 100]".into(),
            ));
        }
        if (1..9).contains(&q.max_pixels) {
            return Err(ConfigError::Validation(
                "quality.max_pixels must be 0 (unbounded) or at least 9".into(),
            ));
        }
        Ok(())
    }
}

/// Which color reduction to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantizeStrategy {
    /// Deterministically seeded iterative clustering.
    #[default]
    KMeans,
    /// Round channels to a step and count. Cheaper, coarser.
    Bucket,
}

/// Palette extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub color_count: usize,
    pub iterations: usize,
    pub sample_size: u32,
    pub strategy: QuantizeStrategy,
    pub bucket_step: u8,
    pub monochromatic_threshold: f64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            color_count: 5,
            iterations: 10,
            sample_size: 100,
            strategy: QuantizeStrategy::KMeans,
            bucket_step: 10,
            monochromatic_threshold: 0.8,
        }
    }
}

/// Perceptual hash settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashConfig {
    pub algorithm: HashAlgorithm,
    pub similarity_threshold: f64,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::DHash,
            similarity_threshold: 0.9,
        }
    }
}

/// What to do with a buffer above `quality.max_pixels`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Fit the buffer under the ceiling through the codec, then score.
    #[default]
    Downsample,
    /// Refuse with [`QualityError::TooLarge`](crate::quality::QualityError::TooLarge).
    Reject,
}

/// Sharpness scoring settings.
///
/// `divisor` and `cap` are empirical: they map Laplacian standard deviation
/// onto a 0–100 range and carry no physical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityConfig {
    pub divisor: f64,
    pub cap: f64,
    /// Pixel ceiling; 0 disables it.
    pub max_pixels: u64,
    pub oversize: OversizePolicy,
}

impl QualityConfig {
    /// The pixel ceiling, if one is set.
    pub fn pixel_ceiling(&self) -> Option<u64> {
        (self.max_pixels > 0).then_some(self.max_pixels)
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            divisor: 10.0,
            cap: 100.0,
            max_pixels: 40_000_000,
            oversize: OversizePolicy::Downsample,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never below 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(AnalysisConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse TOML text, merge it over the stock defaults, and validate.
pub fn parse_config(content: &str) -> Result<AnalysisConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: AnalysisConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file is an error here: the caller asked for this path explicitly.
/// Use [`AnalysisConfig::default`] when no file is given.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `pixprint.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pixprint configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Palette extraction
# ---------------------------------------------------------------------------
[palette]
# Number of representative colors to extract.
color_count = 5

# Clustering passes. Always runs exactly this many; there is no early exit.
iterations = 10

# The image is downsampled to fit inside sample_size x sample_size before
# clustering. Larger samples are slower and rarely change the result.
sample_size = 100

# "kmeans": iterative clustering with deterministic seeds (recommended).
# "bucket": round each channel to bucket_step and count (faster, coarser).
strategy = "kmeans"
bucket_step = 10

# Share of the sample the dominant color needs for "monochromatic".
monochromatic_threshold = 0.8

# ---------------------------------------------------------------------------
# Perceptual hashing
# ---------------------------------------------------------------------------
[hashing]
# "dhash" (gradient based) or "ahash" (mean based). Both are 64 bits.
algorithm = "dhash"

# Minimum similarity (1 - distance / 64) for two images to count as duplicates.
similarity_threshold = 0.9

# ---------------------------------------------------------------------------
# Sharpness scoring
# ---------------------------------------------------------------------------
[quality]
# score = round(min(cap, sqrt(laplacian_variance) / divisor))
# Both numbers are heuristics, not calibrated units.
divisor = 10.0
cap = 100.0

# Pixel ceiling for scoring. 0 scores buffers of any size.
max_pixels = 40000000

# "downsample": shrink oversized buffers under the ceiling first.
# "reject": refuse oversized buffers with an error.
oversize = "downsample"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for batch commands.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
