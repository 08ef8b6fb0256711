//! Monitor configuration: defaults, TOML file, capacity derivation

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use crate::core::EvaluationPolicy;
use crate::error::Result;
use crate::types::Region;
use crate::{frames_for, DEFAULT_DURATION_SECS, DEFAULT_FPS};

/// Sizing and policy of a monitor's windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Frames per second of the pose pipeline
    pub fps: u32,
    /// Seconds an incorrect posture must be held
    pub duration_secs: u32,
    /// Overrides the derived back window size
    pub back_capacity: Option<usize>,
    /// Overrides the derived neck window size
    pub neck_capacity: Option<usize>,
    pub policy: EvaluationPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            duration_secs: DEFAULT_DURATION_SECS,
            back_capacity: None,
            neck_capacity: None,
            policy: EvaluationPolicy::default(),
        }
    }
}

impl MonitorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Window size for a region. An explicit 0 is passed through so that
    /// window construction rejects it.
    pub fn capacity(&self, region: Region) -> usize {
        let explicit = match region {
            Region::Back => self.back_capacity,
            Region::Neck => self.neck_capacity,
        };
        explicit.unwrap_or_else(|| frames_for(self.duration_secs, self.fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity_derived_from_rate() {
        let config = MonitorConfig::default();
        assert_eq!(config.capacity(Region::Back), 95);
        assert_eq!(config.capacity(Region::Neck), 95);
    }

    #[test]
    fn test_explicit_capacity_wins() {
        let config = MonitorConfig {
            neck_capacity: Some(7),
            ..MonitorConfig::default()
        };
        assert_eq!(config.capacity(Region::Back), 95);
        assert_eq!(config.capacity(Region::Neck), 7);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: MonitorConfig = toml::from_str("fps = 30\npolicy = \"literal\"\n").unwrap();
        assert_eq!(config.fps, 30);
        assert_eq!(config.duration_secs, DEFAULT_DURATION_SECS);
        assert_eq!(config.policy, EvaluationPolicy::Literal);
        assert_eq!(config.capacity(Region::Back), 150);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("postureguard_cfg_{}.toml", std::process::id()));
        let config = MonitorConfig {
            back_capacity: Some(12),
            ..MonitorConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = MonitorConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
