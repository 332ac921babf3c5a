// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::errors::{StoreError, StoreErrorKind, StoreResult};
use crate::uploads::naming::{MediaPartition, generate_stored_name};
use crate::util::atomic_write::create_file;
use crate::util::mime_helper::effective_mime_type;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const UPLOAD_LABEL: &str = "upload";
const MEBIBYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUpload {
    pub url: String,
    pub stored_name: String,
    #[serde(skip)]
    pub partition: MediaPartition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadListing {
    pub images: Vec<UploadEntry>,
    pub videos: Vec<UploadEntry>,
}

/// Type-partitioned store for uploaded media. Stored blobs are never
/// modified or removed.
#[derive(Debug, Clone)]
pub struct UploadRegistry {
    root: PathBuf,
    public_path: String,
    max_bytes: u64,
}

impl UploadRegistry {
    pub fn new(root: PathBuf, public_path: String, max_bytes: u64) -> Self {
        Self {
            root,
            public_path,
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Rejects a body of `len` bytes when it exceeds the upload limit.
    pub fn check_size(&self, len: u64) -> StoreResult<()> {
        if len > self.max_bytes {
            return Err(StoreError::new(
                StoreErrorKind::PayloadTooLarge,
                format!(
                    "Upload exceeds maximum size of {} MB",
                    self.max_bytes / MEBIBYTE
                ),
            ));
        }
        Ok(())
    }

    fn partition_dir(&self, partition: MediaPartition) -> PathBuf {
        self.root.join(partition.dir_name())
    }

    fn public_url(&self, partition: MediaPartition, name: &str) -> String {
        format!("{}/{}/{}", self.public_path, partition.dir_name(), name)
    }

    /// Stores `payload` under a freshly generated name and returns its
    /// public URL.
    pub fn store(
        &self,
        payload: &[u8],
        declared_mime: &str,
        original_name: &str,
    ) -> StoreResult<StoredUpload> {
        if payload.is_empty() {
            return Err(StoreError::new(
                StoreErrorKind::NoFileProvided,
                "No file uploaded",
            ));
        }
        self.check_size(payload.len() as u64)?;

        let mime = effective_mime_type(declared_mime, original_name, payload);
        let partition = MediaPartition::classify(&mime);
        let dir = self.partition_dir(partition);
        fs::create_dir_all(&dir).map_err(|err| {
            StoreError::storage(format!(
                "Failed to create upload directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let stored_name = generate_stored_name(original_name);
        let target = dir.join(&stored_name);
        if !create_file(&target, UPLOAD_LABEL, payload)? {
            return Err(StoreError::storage(format!(
                "Stored name '{}' is already taken",
                stored_name
            )));
        }
        info!(
            "Stored upload '{}' ({}, {} bytes) as {}/{}",
            original_name,
            mime,
            payload.len(),
            partition,
            stored_name
        );

        Ok(StoredUpload {
            url: self.public_url(partition, &stored_name),
            stored_name,
            partition,
        })
    }

    /// Lists stored blobs per partition, sorted by name. A missing or
    /// unreadable partition lists as empty.
    pub fn list(&self) -> UploadListing {
        UploadListing {
            images: self.list_partition(MediaPartition::Images),
            videos: self.list_partition(MediaPartition::Videos),
        }
    }

    fn list_partition(&self, partition: MediaPartition) -> Vec<UploadEntry> {
        let dir = self.partition_dir(partition);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to list uploads in {}: {}", dir.display(), err);
                }
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();

        names
            .into_iter()
            .map(|name| UploadEntry {
                url: self.public_url(partition, &name),
                name,
            })
            .collect()
    }
}
