//! Speaker configuration loaded from YAML.
//!
//! ```yaml
//! name: node-1
//! pod_cidrs:
//!   - 10.244.1.0/24
//!   - fd00:10:244:1::/64
//! withdraw_on_shutdown: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// Default announcer name used in log spans.
pub const DEFAULT_NAME: &str = "bgp-speaker";

/// Settings for the bgp-speaker daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeakerConfig {
    /// Name of this announcer in logs
    pub name: String,

    /// Prefixes announced at startup. Entries are not validated here;
    /// malformed ones are skipped at announce time.
    pub pod_cidrs: Vec<String>,

    /// Withdraw all routes from every peer on shutdown
    pub withdraw_on_shutdown: bool,
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            pod_cidrs: Vec::new(),
            withdraw_on_shutdown: true,
        }
    }
}

impl SpeakerConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: SpeakerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("name", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SpeakerConfig::default();
        assert_eq!(config.name, "bgp-speaker");
        assert!(config.pod_cidrs.is_empty());
        assert!(config.withdraw_on_shutdown);
    }

    #[test]
    fn test_parse_full() {
        let yaml = "\
name: node-1
pod_cidrs:
  - 10.244.1.0/24
  - bad-cidr
withdraw_on_shutdown: false
";
        let config = SpeakerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config,
            SpeakerConfig {
                name: "node-1".to_string(),
                pod_cidrs: vec!["10.244.1.0/24".to_string(), "bad-cidr".to_string()],
                withdraw_on_shutdown: false,
            }
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = SpeakerConfig::from_yaml_str("pod_cidrs: [10.0.0.0/24]").unwrap();
        assert_eq!(config.name, DEFAULT_NAME);
        assert!(config.withdraw_on_shutdown);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = SpeakerConfig::from_yaml_str("name: '  '").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SpeakerConfig::from_yaml_str("peers: [192.0.2.1]").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: from-file").unwrap();

        let config = SpeakerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.name, "from-file");
    }

    #[test]
    fn test_from_missing_file() {
        let err = SpeakerConfig::from_file("/nonexistent/bgp-speaker.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
