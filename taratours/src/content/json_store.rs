// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::errors::{StoreError, StoreResult};
use crate::util::atomic_write::{create_file, replace_file};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Reads and decodes a JSON file. A missing or unreadable file is a storage
/// failure; bytes that do not decode into `T` are a corrupt document.
pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path, label: &str) -> StoreResult<T> {
    let content = fs::read(path).map_err(|err| {
        StoreError::storage(format!(
            "Failed to read {} file '{}': {}",
            label,
            path.display(),
            err
        ))
    })?;
    serde_json::from_slice(&content).map_err(|err| {
        StoreError::corrupt(format!(
            "Failed to parse {} file '{}': {}",
            label,
            path.display(),
            err
        ))
    })
}

pub(crate) fn write_json_file<T: Serialize>(
    path: &Path,
    label: &str,
    value: &T,
) -> StoreResult<()> {
    replace_file(path, label, &encode(label, value)?)
}

/// Like [`write_json_file`], but never replaces an existing file. Returns
/// whether the file was created.
pub(crate) fn create_json_file<T: Serialize>(
    path: &Path,
    label: &str,
    value: &T,
) -> StoreResult<bool> {
    create_file(path, label, &encode(label, value)?)
}

fn encode<T: Serialize>(label: &str, value: &T) -> StoreResult<Vec<u8>> {
    let mut content = serde_json::to_vec_pretty(value)
        .map_err(|err| StoreError::storage(format!("Failed to serialize {}: {}", label, err)))?;
    content.push(b'\n');
    Ok(content)
}
