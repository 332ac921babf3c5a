// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::ValidatedConfig;
use crate::content::ContentStore;
use crate::runtime_paths::RuntimePaths;
use crate::uploads::UploadRegistry;
use crate::util::BlockingPool;

pub struct AppState {
    pub app_name: String,
    pub runtime_paths: RuntimePaths,
    pub content_store: ContentStore,
    pub upload_registry: UploadRegistry,
    pub blocking: BlockingPool,
}

impl AppState {
    pub fn new(config: &ValidatedConfig, runtime_paths: RuntimePaths) -> Self {
        Self {
            app_name: config.app.name.clone(),
            content_store: runtime_paths.content_store(),
            upload_registry: runtime_paths.upload_registry(config),
            runtime_paths,
            blocking: BlockingPool::default(),
        }
    }

    pub fn with_blocking_pool(mut self, blocking: BlockingPool) -> Self {
        self.blocking = blocking;
        self
    }
}
