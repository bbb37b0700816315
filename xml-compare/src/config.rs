use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use xml_compare_core::CompareOptions;

/// Contents of an options file.
///
/// ```toml
/// [compare]
/// normalize_whitespace = true
/// element_order = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub compare: CompareOptions,
}

/// Errors returned when loading an options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load comparison options from a TOML file.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&raw, path.display().to_string())
}

fn parse_config(raw: &str, path: String) -> Result<ConfigFile, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use xml_compare_core::CompareOptions;

    use super::{parse_config, ConfigError, ConfigFile};

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("", "inline".to_string()).expect("parse");
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.compare, CompareOptions::default());
    }

    #[test]
    fn reads_compare_table_and_ignores_unknown_keys() {
        let raw = r#"
[compare]
normalise_whitespace = true
element_order = false
max_depth = 64
validate_params = true

[report]
color = "never"
"#;
        let config = parse_config(raw, "inline".to_string()).expect("parse");
        assert_eq!(
            config.compare,
            CompareOptions {
                normalize_whitespace: true,
                element_order: false,
                equate_nil_and_empty: false,
                max_depth: Some(64),
            }
        );
    }

    #[test]
    fn wrong_value_type_is_a_parse_error() {
        let err = parse_config("[compare]\nelement_order = \"yes\"\n", "bad.toml".to_string())
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
