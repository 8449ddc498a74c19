use crate::error::{Result, SandboxError};
use crate::resources::Settings;
use serde::Deserialize;
use std::path::Path;

/// Keys bound to sandbox actions, matched case-insensitively.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    pub spawn: char,
    pub delete: char,
    pub reset: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            spawn: 'n',
            delete: 'd',
            reset: 'r',
        }
    }
}

/// Startup configuration, loadable from JSON.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SandboxConfig {
    pub settings: Settings,
    /// Seeds element choice and id suffixes; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Random atoms spawned across the viewport at startup.
    pub initial_atoms: usize,
    pub keys: KeyBindings,
}

impl SandboxConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SandboxConfig = serde_json::from_str(json).map_err(SandboxError::Config)?;
        config.settings.validated()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::TimeMode;

    #[test]
    fn full_config_parses() {
        let json = r#"{
            "settings": { "timeMode": "constant", "iterationsPerSecond": 120, "calculateAngles": false },
            "seed": 42,
            "initialAtoms": 5,
            "keys": { "spawn": "a" }
        }"#;
        let config = SandboxConfig::from_json_str(json).unwrap();
        assert_eq!(config.settings.time_mode, TimeMode::Constant);
        assert_eq!(config.settings.iterations_per_second, 120.0);
        assert!(!config.settings.calculate_angles);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.initial_atoms, 5);
        assert_eq!(config.keys.spawn, 'a');
        assert_eq!(config.keys.delete, 'd');
    }

    #[test]
    fn empty_object_is_default() {
        let config = SandboxConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SandboxConfig::default());
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let json = r#"{ "settings": { "iterationsPerSecond": 1000 } }"#;
        let err = SandboxConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, SandboxError::InvalidSettings(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SandboxConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SandboxError::Io(_)));
    }
}
