//! Optional configuration file.
//!
//! Deserialized from a TOML file passed with `--config`:
//!
//! ```toml
//! baseline = "maxtext_fp8"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::NormalizeError;
use crate::normalize::DEFAULT_BASELINE;

/// Normalizer settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Test name each group is normalized against.
    pub baseline: Option<String>,
}

impl NormalizeConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, NormalizeError> {
        toml::from_str(text).map_err(|e| NormalizeError::Config {
            path: path.to_path_buf(),
            message: e.message().to_owned(),
        })
    }

    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, NormalizeError> {
        let text = std::fs::read_to_string(path).map_err(|e| NormalizeError::io(path, e))?;
        Self::from_toml(&text, path)
    }

    /// Effective baseline: `cli` if given, then this config, then the default.
    pub fn baseline<'a>(&'a self, cli: Option<&'a str>) -> &'a str {
        cli.or(self.baseline.as_deref()).unwrap_or(DEFAULT_BASELINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_precedence() {
        let path = Path::new("normalize.toml");
        let empty = NormalizeConfig::from_toml("", path).unwrap();
        assert_eq!(empty.baseline(None), DEFAULT_BASELINE);

        let cfg = NormalizeConfig::from_toml("baseline = \"bf16\"\n", path).unwrap();
        assert_eq!(cfg.baseline(None), "bf16");
        assert_eq!(cfg.baseline(Some("fp32")), "fp32");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = NormalizeConfig::from_toml("baselines = \"x\"\n", Path::new("n.toml")).unwrap_err();
        assert!(matches!(err, NormalizeError::Config { .. }));
    }
}
