// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::errors::{StoreError, StoreErrorKind, StoreResult};
use std::sync::Arc;
use tokio::sync::Semaphore;

const DEFAULT_WORKERS: usize = 4;

/// Bounds how many store and upload operations touch the file system at
/// once. Work runs on tokio's blocking threads; when every slot is taken the
/// caller gets a `Busy` error right away instead of queueing.
#[derive(Clone)]
pub struct BlockingPool {
    slots: Arc<Semaphore>,
}

impl BlockingPool {
    pub fn new(workers: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(workers)),
        }
    }

    pub async fn run<F, R>(&self, operation: &'static str, task: F) -> StoreResult<R>
    where
        F: FnOnce() -> StoreResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let Ok(slot) = self.slots.clone().try_acquire_owned() else {
            return Err(StoreError::new(
                StoreErrorKind::Busy,
                format!("Server is busy, try again ({} rejected)", operation),
            ));
        };

        let joined = tokio::task::spawn_blocking(move || {
            let result = task();
            drop(slot);
            result
        })
        .await;
        joined.unwrap_or_else(|err| {
            Err(StoreError::new(
                StoreErrorKind::Internal,
                format!("{} did not complete: {}", operation, err),
            ))
        })
    }
}

impl Default for BlockingPool {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}
