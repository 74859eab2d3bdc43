use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Everything the scope needs at startup. Fixed once loaded; there is no
/// runtime reload. Any subset of fields may appear in the config file,
/// the rest keep their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub api_url: String,
    pub graph_width: f32,
    pub graph_height: f32,
    pub line_color: [u8; 3],
    pub line_width: f32,
    pub background_color: [u8; 3],
    pub grid_color: [u8; 3],
    /// Tick delay for the update scheduler, in milliseconds.
    pub animation_speed_ms: u64,
    /// Window capacity: how many samples are visible at once.
    pub points_to_show: usize,
    /// Assumed cadence of the fetched series. The estimator trusts this
    /// value; it is never derived from the data.
    pub sampling_rate_hz: f32,
    /// Start in simulated mode instead of hitting the endpoint.
    pub simulate: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/ecg".to_owned(),
            graph_width: 800.0,
            graph_height: 300.0,
            line_color: [0, 230, 118],
            line_width: 2.0,
            background_color: [10, 10, 15],
            grid_color: [0, 60, 40],
            animation_speed_ms: 10,
            points_to_show: 150,
            sampling_rate_hz: 250.0,
            simulate: false,
        }
    }
}

impl ScopeConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config =
            serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.animation_speed_ms)
    }
}
