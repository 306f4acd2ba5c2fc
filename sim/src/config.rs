use hoops_shared::config::SceneConfig;
use serde::{Deserialize, Serialize};

/// Host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    /// Frames simulated per second
    pub tick_rate_hz: u32,
    /// Frame snapshots sent per second
    pub frame_rate_hz: u32,
    pub scene: SceneConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            frame_rate_hz: 30,
            scene: SceneConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_rate_hz == 0 {
            return Err("tick_rate_hz must be > 0".to_string());
        }
        if self.frame_rate_hz == 0 || self.frame_rate_hz > self.tick_rate_hz {
            return Err("frame_rate_hz must be in 1..=tick_rate_hz".to_string());
        }
        self.scene.validate()
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &str) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {}", path, e))?;
        let config: SimConfig = serde_json::from_str(&text)
            .map_err(|e| format!("cannot parse config {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Ticks between two frame snapshots.
    pub fn frame_every_n_ticks(&self) -> u32 {
        (self.tick_rate_hz / self.frame_rate_hz.max(1)).max(1)
    }
}
