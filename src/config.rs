//! Configuration types for the telemetry pipeline

use crate::error::ConfigError;
use crate::protocol::UniversalKey;
use crate::sync::SyncConfig;
use crate::tags::TagSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Rewrite precision time stamps onto wall-clock time (looped playback)
    pub loop_playback: bool,

    /// Verify packet checksums
    pub verify_checksum: bool,

    /// Accepted packet designators, MISB hex notation
    pub accepted_designators: Vec<String>,

    /// Stream synchronization settings
    pub sync: SyncConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            loop_playback: false,
            verify_checksum: true,
            accepted_designators: [
                TagSet::UasLocalSet,
                TagSet::SecurityLocalSet,
                TagSet::VmtiLocalSet,
            ]
            .iter()
            .filter_map(TagSet::designator)
            .map(|key| key.to_string())
            .collect(),
            sync: SyncConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Configuration for replaying a recorded stream in a loop
    pub fn looped_playback() -> Self {
        Self {
            loop_playback: true,
            ..Default::default()
        }
    }

    /// Configuration with custom synchronization settings
    pub fn with_sync(sync: SyncConfig) -> Self {
        Self {
            sync,
            ..Default::default()
        }
    }

    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values and designators
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sync.tolerance_secs.is_finite() || self.sync.tolerance_secs < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.tolerance_secs",
                reason: format!(
                    "must be a finite non-negative number, got {}",
                    self.sync.tolerance_secs
                ),
            });
        }
        self.designators().map(|_| ())
    }

    /// Parsed accepted designators
    ///
    /// Every entry must parse and introduce a known local set.
    pub fn designators(&self) -> Result<Vec<UniversalKey>, ConfigError> {
        self.accepted_designators
            .iter()
            .map(|text| {
                let key = UniversalKey::parse(text)?;
                TagSet::from_designator(&key)
                    .map(|_| key)
                    .ok_or_else(|| ConfigError::InvalidDesignator(text.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert!(!config.loop_playback);
        assert!(config.verify_checksum);
        assert_eq!(config.accepted_designators.len(), 3);
        assert_eq!(config.designators().unwrap().len(), 3);
        assert_eq!(config.sync.max_pending, 64);
    }

    #[test]
    fn test_looped_playback() {
        let config = PipelineConfig::looped_playback();
        assert!(config.loop_playback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_designators() {
        let mut config = PipelineConfig::default();
        config.accepted_designators = vec!["06 0E 2B".into()];
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDesignator(_))));

        // well-formed key, but no local set behind it
        config.accepted_designators =
            vec!["06 0E 2B 34 00 00 00 00 00 00 00 00 00 00 00 00".into()];
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDesignator(_))));
    }

    #[test]
    fn test_invalid_tolerance() {
        let config = PipelineConfig::with_sync(SyncConfig {
            tolerance_secs: -1.0,
            ..SyncConfig::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "sync.tolerance_secs", .. })
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "loop_playback": true,
                "accepted_designators": ["06 0E 2B 34 02 0B 01 01 0E 01 03 01 01 00 00 00"],
                "sync": {{ "tolerance_secs": 0.1 }}
            }}"#
        )
        .unwrap();

        let config = PipelineConfig::from_json_file(file.path()).unwrap();
        assert!(config.loop_playback);
        assert!(config.verify_checksum);
        assert_eq!(config.designators().unwrap(), vec![TagSet::UasLocalSet
            .designator()
            .unwrap()]);
        assert_eq!(config.sync.tolerance_secs, 0.1);
        assert_eq!(config.sync.max_frames, 256);
    }

    #[test]
    fn test_from_json_file_errors() {
        assert!(matches!(
            PipelineConfig::from_json_file("/nonexistent/klv.json"),
            Err(ConfigError::Unreadable { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            PipelineConfig::from_json_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
