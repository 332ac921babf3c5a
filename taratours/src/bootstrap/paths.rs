// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action};
use crate::config::ValidatedConfig;
use crate::runtime_paths::RuntimePaths;
use std::path::Path;

/// Resolves the runtime paths and seeds the content document if none
/// exists. Returns whether the seed was written. An existing document is
/// never touched, even when it fails to load.
pub fn ensure_paths(
    root: &Path,
    config: &ValidatedConfig,
) -> Result<(RuntimePaths, bool), BootstrapError> {
    let runtime_paths = RuntimePaths::from_root(root, config).map_err(BootstrapError::Config)?;

    let created_content = runtime_paths.content_store().initialize()?.is_some();
    if created_content {
        log_action(format!(
            "created default content document {}",
            runtime_paths.content_file.display()
        ));
    }

    Ok((runtime_paths, created_content))
}
