// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};

const MEBIBYTE: u64 = 1024 * 1024;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    pub fn level_filter(&self) -> LevelFilter {
        match self.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContentConfig {
    /// Content document path, relative to the runtime root.
    #[serde(default = "default_content_file")]
    pub file: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            file: default_content_file(),
        }
    }
}

fn default_content_file() -> String {
    "data/content.json".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadConfig {
    /// Upload root, relative to the runtime root.
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    /// URL prefix uploaded files are served under.
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

impl UploadConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * MEBIBYTE
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_file_size_mb: default_max_file_size_mb(),
            public_path: default_public_path(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_max_file_size_mb() -> u64 {
    50
}

fn default_public_path() -> String {
    "/uploads".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub logging: LoggingConfig,
    pub content: ContentConfig,
    pub upload: UploadConfig,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        serde_yaml::from_str(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        Self::load(root)?.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        Self::validate_server(&self.server)?;
        Self::validate_logging(&self.logging)?;
        Self::validate_content(&self.content)?;
        Self::validate_upload(&self.upload)?;

        Ok(ValidatedConfig {
            server: self.server,
            app: self.app,
            logging: self.logging,
            content: self.content,
            upload: self.upload,
        })
    }

    fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
        if server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Server host must not be empty".to_string(),
            ));
        }
        if server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be non-zero".to_string(),
            ));
        }
        if server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "Server workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        match logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "Logging level must be one of trace, debug, info, warn, error, got: {}",
                other
            ))),
        }
    }

    fn validate_content(content: &ContentConfig) -> Result<(), ConfigError> {
        validate_relative_path("content.file", &content.file)
    }

    fn validate_upload(upload: &UploadConfig) -> Result<(), ConfigError> {
        validate_relative_path("upload.dir", &upload.dir)?;

        let max_file_size_mb = upload.max_file_size_mb;
        if !(1..=1024).contains(&max_file_size_mb) {
            return Err(ConfigError::ValidationError(format!(
                "Upload max_file_size_mb must be between 1 and 1024, got: {}",
                max_file_size_mb
            )));
        }

        let public_path = &upload.public_path;
        if !public_path.starts_with('/') || public_path.len() < 2 || public_path.ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "Upload public_path must start with '/' and not end with '/', got: {}",
                public_path
            )));
        }
        if public_path.starts_with("/api") {
            return Err(ConfigError::ValidationError(format!(
                "Upload public_path must not shadow the /api routes, got: {}",
                public_path
            )));
        }

        Ok(())
    }
}

fn validate_relative_path(label: &str, value: &str) -> Result<(), ConfigError> {
    let path = Path::new(value);
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} must not be empty",
            label
        )));
    }
    let escapes_root = path
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
    if escapes_root {
        return Err(ConfigError::ValidationError(format!(
            "{} must be a relative path inside the runtime root, got: {}",
            label, value
        )));
    }
    Ok(())
}

#[cfg(test)]
pub fn test_config() -> ValidatedConfig {
    ValidatedConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: 1,
        },
        app: AppConfig {
            name: "TaraTours".to_string(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
        content: ContentConfig::default(),
        upload: UploadConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::TestFixtureRoot;

    const MINIMAL_CONFIG: &str = "server:\n  host: \"127.0.0.1\"\n  port: 3000\n\napp:\n  name: \"TaraTours\"\n\nlogging:\n  level: \"info\"\n";

    #[test]
    fn load_applies_section_defaults() {
        let fixture = TestFixtureRoot::new_unique("config-defaults").unwrap();
        fs::write(fixture.path().join("config.yaml"), MINIMAL_CONFIG).unwrap();

        let config = Config::load_and_validate(fixture.path()).expect("valid config");
        assert_eq!(config.server.workers, 4);
        assert_eq!(config.content.file, "data/content.json");
        assert_eq!(config.upload.dir, "uploads");
        assert_eq!(config.upload.max_file_size_mb, 50);
        assert_eq!(config.upload.max_file_size_bytes(), 50 * 1024 * 1024);
        assert_eq!(config.upload.public_path, "/uploads");
    }

    #[test]
    fn load_reports_missing_file() {
        let fixture = TestFixtureRoot::new_unique("config-missing").unwrap();
        let err = Config::load(fixture.path()).expect_err("no config file");
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn load_reports_missing_section() {
        let fixture = TestFixtureRoot::new_unique("config-missing-section").unwrap();
        fs::write(
            fixture.path().join("config.yaml"),
            "server:\n  host: \"127.0.0.1\"\n  port: 3000\n",
        )
        .unwrap();
        let err = Config::load(fixture.path()).expect_err("app section missing");
        assert!(err.to_string().contains("app"));
    }

    #[test]
    fn validate_logging_rejects_unknown_level() {
        let logging = LoggingConfig {
            level: "verbose".to_string(),
        };
        assert!(Config::validate_logging(&logging).is_err());
        let logging = LoggingConfig {
            level: "DEBUG".to_string(),
        };
        assert!(Config::validate_logging(&logging).is_ok());
        assert_eq!(logging.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn validate_server_rejects_zero_workers() {
        let mut config = test_config();
        config.server.workers = 0;
        assert!(Config::validate_server(&config.server).is_err());
    }

    #[test]
    fn validate_upload_rejects_out_of_range_size() {
        let mut upload = UploadConfig::default();
        upload.max_file_size_mb = 0;
        assert!(Config::validate_upload(&upload).is_err());
        upload.max_file_size_mb = 2048;
        assert!(Config::validate_upload(&upload).is_err());
    }

    #[test]
    fn validate_upload_rejects_bad_public_path() {
        for public_path in ["uploads", "/uploads/", "/", "/api/files"] {
            let upload = UploadConfig {
                public_path: public_path.to_string(),
                ..UploadConfig::default()
            };
            assert!(
                Config::validate_upload(&upload).is_err(),
                "{} should be rejected",
                public_path
            );
        }
    }

    #[test]
    fn validate_paths_must_stay_inside_root() {
        let content = ContentConfig {
            file: "../content.json".to_string(),
        };
        assert!(Config::validate_content(&content).is_err());
        let upload = UploadConfig {
            dir: "/var/uploads".to_string(),
            ..UploadConfig::default()
        };
        assert!(Config::validate_upload(&upload).is_err());
    }
}
