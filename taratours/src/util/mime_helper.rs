// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::path::Path;

const GENERIC_MIME: &str = "application/octet-stream";

/// Detect MIME type using content-based detection (infer) with fallback to extension-based (mime_guess)
pub fn detect_mime_type(file_name: &str, file_content: &[u8]) -> String {
    if let Some(mime_type) = infer::get(file_content) {
        return mime_type.mime_type().to_string();
    }

    let mime_guess = mime_guess::from_path(Path::new(file_name));
    if let Some(mime_type) = mime_guess.first() {
        return mime_type.to_string();
    }

    GENERIC_MIME.to_string()
}

/// The declared type wins unless it is missing or the generic binary type,
/// in which case the payload itself is inspected.
pub fn effective_mime_type(declared: &str, file_name: &str, file_content: &[u8]) -> String {
    let declared = declared
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if declared.is_empty() || declared == GENERIC_MIME {
        return detect_mime_type(file_name, file_content);
    }
    declared
}
