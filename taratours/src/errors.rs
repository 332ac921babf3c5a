// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    StorageUnavailable,
    CorruptDocument,
    Validation,
    NoFileProvided,
    PayloadTooLarge,
    Busy,
    Internal,
}

impl StoreErrorKind {
    /// Stable kebab-case label used in API error bodies and headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreErrorKind::StorageUnavailable => "storage-unavailable",
            StoreErrorKind::CorruptDocument => "corrupt-document",
            StoreErrorKind::Validation => "validation",
            StoreErrorKind::NoFileProvided => "no-file-provided",
            StoreErrorKind::PayloadTooLarge => "payload-too-large",
            StoreErrorKind::Busy => "busy",
            StoreErrorKind::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreError {
    kind: StoreErrorKind,
    message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::StorageUnavailable, message)
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::CorruptDocument, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Validation, message)
    }

    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} error: {}", self.kind, self.message)
    }
}

impl Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;
