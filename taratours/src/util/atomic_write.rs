// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::errors::{StoreError, StoreResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const TEMP_SUFFIX: &str = ".tmp";

/// Bytes staged in a hidden sibling of `target`. Nothing is visible at
/// `target` until one of the commit methods succeeds; a staged file that is
/// dropped uncommitted is removed.
pub(crate) struct StagedFile {
    file: fs::File,
    temp_path: PathBuf,
    target: PathBuf,
    label: String,
}

impl StagedFile {
    pub(crate) fn create(target: &Path, label: &str) -> StoreResult<Self> {
        let parent = parent_dir(target, label)?;
        let file_name = target
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StoreError::storage(format!(
                    "{} path '{}' has no usable file name",
                    label,
                    target.display()
                ))
            })?;
        let temp_path = parent.join(format!(
            "{}{}{}",
            temp_file_prefix(file_name),
            Uuid::new_v4().simple(),
            TEMP_SUFFIX
        ));
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .map_err(|err| {
                StoreError::storage(format!(
                    "Failed to stage {} file in '{}': {}",
                    label,
                    parent.display(),
                    err
                ))
            })?;
        Ok(Self {
            file,
            temp_path,
            target: target.to_path_buf(),
            label: label.to_string(),
        })
    }

    pub(crate) fn write_all(&mut self, bytes: &[u8]) -> StoreResult<()> {
        self.file.write_all(bytes).map_err(|err| {
            StoreError::storage(format!("Failed to write {} data: {}", self.label, err))
        })
    }

    /// Publishes over whatever is at the target. Readers see the previous
    /// file or the complete new one.
    pub(crate) fn commit_replace(self) -> StoreResult<()> {
        self.sync()?;
        #[cfg(unix)]
        {
            // Keep the mode an operator gave the published file.
            if let Ok(metadata) = fs::metadata(&self.target) {
                let _ = fs::set_permissions(&self.temp_path, metadata.permissions());
            }
        }
        fs::rename(&self.temp_path, &self.target).map_err(|err| {
            StoreError::storage(format!(
                "Failed to replace {} file '{}': {}",
                self.label,
                self.target.display(),
                err
            ))
        })?;
        self.sync_parent();
        Ok(())
    }

    /// Publishes only when nothing exists at the target yet. Returns `false`
    /// and leaves the existing file untouched otherwise.
    pub(crate) fn commit_new(self) -> StoreResult<bool> {
        self.sync()?;
        match fs::hard_link(&self.temp_path, &self.target) {
            Ok(()) => {
                self.sync_parent();
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(StoreError::storage(format!(
                "Failed to create {} file '{}': {}",
                self.label,
                self.target.display(),
                err
            ))),
        }
    }

    fn sync(&self) -> StoreResult<()> {
        self.file.sync_all().map_err(|err| {
            StoreError::storage(format!("Failed to sync {} data: {}", self.label, err))
        })
    }

    fn sync_parent(&self) {
        #[cfg(unix)]
        {
            if let Some(parent) = self.target.parent()
                && let Err(err) = fs::File::open(parent).and_then(|dir| dir.sync_all())
            {
                log::warn!("{} directory sync failed: {}", self.label, err);
            }
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // After a rename the temp path is gone; after a hard link or a failed
        // commit it still names the staged bytes.
        let _ = fs::remove_file(&self.temp_path);
    }
}

/// Atomically replaces `path` with `bytes`.
pub(crate) fn replace_file(path: &Path, label: &str, bytes: &[u8]) -> StoreResult<()> {
    let mut staged = StagedFile::create(path, label)?;
    staged.write_all(bytes)?;
    staged.commit_replace()
}

/// Creates `path` with `bytes` unless a file is already there. Returns
/// whether this call created it.
pub(crate) fn create_file(path: &Path, label: &str, bytes: &[u8]) -> StoreResult<bool> {
    let mut staged = StagedFile::create(path, label)?;
    staged.write_all(bytes)?;
    staged.commit_new()
}

pub(crate) fn temp_file_prefix(file_name: &str) -> String {
    format!(".{}.", file_name)
}

fn parent_dir<'a>(target: &'a Path, label: &str) -> StoreResult<&'a Path> {
    target.parent().ok_or_else(|| {
        StoreError::storage(format!(
            "{} path '{}' has no parent directory",
            label,
            target.display()
        ))
    })
}
