// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::Utc;
use std::fmt;
use std::path::Path;
use uuid::Uuid;

/// Upload subdirectory a blob is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaPartition {
    Images,
    Videos,
}

impl MediaPartition {
    pub const ALL: [MediaPartition; 2] = [MediaPartition::Images, MediaPartition::Videos];

    pub fn dir_name(self) -> &'static str {
        match self {
            MediaPartition::Images => "images",
            MediaPartition::Videos => "videos",
        }
    }

    /// `image/*` goes to images. Everything else, unknown types included,
    /// goes to videos.
    pub fn classify(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("image/") {
            MediaPartition::Images
        } else {
            MediaPartition::Videos
        }
    }
}

impl fmt::Display for MediaPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Lower-cased extension of `original_name`, or `None` when it has none or
/// contains anything but ASCII letters and digits.
pub fn normalized_extension(original_name: &str) -> Option<String> {
    let ext = Path::new(original_name).extension()?.to_str()?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// `<unix-millis>-<random>[.ext]`. The random part is a v4 uuid, so two
/// uploads in the same millisecond still get distinct names.
pub fn generate_stored_name(original_name: &str) -> String {
    let stem = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    );
    match normalized_extension(original_name) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}
