// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::{ConfigError, ValidatedConfig};
use crate::content::ContentStore;
use crate::uploads::UploadRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub content_file: PathBuf,
    /// Created lazily by the upload registry, not here.
    pub uploads_dir: PathBuf,
}

impl RuntimePaths {
    pub fn from_root(root: &Path, config: &ValidatedConfig) -> Result<Self, ConfigError> {
        let root_path = if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root.to_path_buf()
        };

        if !root_path.exists() {
            fs::create_dir_all(&root_path).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "Failed to create runtime root '{}': {}",
                    root_path.display(),
                    e
                ))
            })?;
        }

        let root_canonical = root_path.canonicalize().map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to canonicalize runtime root '{}': {}",
                root_path.display(),
                e
            ))
        })?;

        let config_file = root_canonical.join("config.yaml");
        let content_file = root_canonical.join(&config.content.file);
        let uploads_dir = root_canonical.join(&config.upload.dir);

        let content_dir = content_file.parent().ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "Content file '{}' has no parent directory",
                content_file.display()
            ))
        })?;
        ensure_dir_exists(content_dir)?;

        Ok(Self {
            root: root_canonical,
            config_file,
            content_file,
            uploads_dir,
        })
    }

    pub fn content_store(&self) -> ContentStore {
        ContentStore::new(self.content_file.clone())
    }

    pub fn upload_registry(&self, config: &ValidatedConfig) -> UploadRegistry {
        UploadRegistry::new(
            self.uploads_dir.clone(),
            config.upload.public_path.clone(),
            config.upload.max_file_size_bytes(),
        )
    }
}

fn ensure_dir_exists(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to create directory '{}': {}",
                path.display(),
                e
            ))
        })?;
    }

    ensure_dir_writable(path, "Directory must be writable")
}

fn ensure_dir_writable(path: &Path, context: &str) -> Result<(), ConfigError> {
    if !path.is_dir() {
        return Err(ConfigError::ValidationError(format!(
            "{} (not a directory): {}",
            context,
            path.display()
        )));
    }

    let check_name = format!(".taratours-write-check-{}", Uuid::new_v4());
    let check_path = path.join(check_name);

    let check_result = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&check_path);

    match check_result {
        Ok(_) => {
            if let Err(err) = fs::remove_file(&check_path) {
                return Err(ConfigError::ValidationError(format!(
                    "{} (unable to clean write-check file {}): {}",
                    context,
                    check_path.display(),
                    err
                )));
            }
            Ok(())
        }
        Err(err) => Err(ConfigError::ValidationError(format!(
            "{} ({}): {}",
            context,
            path.display(),
            err
        ))),
    }
}
