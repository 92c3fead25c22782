use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{ProjectionParams, Result};

/// Top-level configuration structure for the application.
///
/// Every section falls back to its defaults when omitted, so a partial JSON
/// document such as `{"sampler": {"resolution": 64}}` is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sampler: SamplerConfig,
    pub layout: LayoutConfig,
    pub projection: ProjectionConfig,
    pub capture: CaptureConfig,
}

impl AppConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(?path, "loaded configuration");
        Ok(config)
    }
}

/// Controls how raw captures are reduced to amplitude vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Number of amplitude buckets produced per capture.
    pub resolution: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { resolution: 32 }
    }
}

/// Pixel spacing used by the rectangular layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub bar_gap: f32,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    pub max_stack_count: usize,
    /// Bar count of the gap-less full bars style.
    pub full_bar_count: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bar_gap: 1.0,
            horizontal_padding: 2.0,
            vertical_padding: 4.0,
            max_stack_count: 32,
            full_bar_count: 20,
        }
    }
}

/// Default circular projection parameters, used by scenes that do not
/// drive their own radius set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub inner_radius_ratio: f32,
    pub outer_radius_ratio: f32,
    pub angle_offset: f32,
    pub stretch_radius_ratio: f32,
    pub stretch_pow: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::from(ProjectionParams::default())
    }
}

impl From<ProjectionParams> for ProjectionConfig {
    fn from(params: ProjectionParams) -> Self {
        Self {
            inner_radius_ratio: params.inner_radius_ratio,
            outer_radius_ratio: params.outer_radius_ratio,
            angle_offset: params.angle_offset,
            stretch_radius_ratio: params.stretch_radius_ratio,
            stretch_pow: params.stretch_pow,
        }
    }
}

impl From<&ProjectionConfig> for ProjectionParams {
    fn from(config: &ProjectionConfig) -> Self {
        Self {
            inner_radius_ratio: config.inner_radius_ratio,
            outer_radius_ratio: config.outer_radius_ratio,
            angle_offset: config.angle_offset,
            stretch_radius_ratio: config.stretch_radius_ratio,
            stretch_pow: config.stretch_pow,
        }
    }
}

/// Settings for the capture boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Declared capture size requested from the platform.
    pub capture_size: usize,
    /// Gaps between frames longer than this are reported as zero.
    pub stale_after_ms: u64,
    /// Emit a capture-rate log line every this many captures. Zero disables it.
    pub log_every: u64,
}

impl CaptureConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capture_size: 128,
            stale_after_ms: 200,
            log_every: 100,
        }
    }
}
