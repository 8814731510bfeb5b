use crate::DEFAULT_ENDPOINT;
use crate::error::ConfigError;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// User-tunable settings, read from an optional TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Prediction endpoint the upload is posted to.
    pub endpoint: String,
    /// Longest edge of the preview image, in pixels.
    pub preview_max_dimension: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            preview_max_dimension: 512,
        }
    }
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url =
            Url::parse(&self.endpoint).map_err(|_| ConfigError::Endpoint(self.endpoint.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Endpoint(self.endpoint.clone()));
        }
        if self.preview_max_dimension == 0 {
            return Err(ConfigError::PreviewSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config = AppConfig::load(dir.path().join("ctscan.toml"))?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("ctscan.toml");
        writeln!(File::create(&path)?, "endpoint = \"https://scans.example/predict/\"")?;

        let config = AppConfig::load(&path)?;
        assert_eq!(config.endpoint, "https://scans.example/predict/");
        assert_eq!(config.preview_max_dimension, 512);
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("ctscan.toml");
        writeln!(File::create(&path)?, "retries = 3")?;
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
        Ok(())
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let config = AppConfig {
            endpoint: "ftp://127.0.0.1/predict".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Endpoint(_))));
    }

    #[test]
    fn zero_preview_size_is_rejected() {
        let config = AppConfig {
            preview_max_dimension: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::PreviewSize)));
    }
}
