// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod naming;
pub mod registry;

pub use naming::{MediaPartition, generate_stored_name, normalized_extension};
pub use registry::{StoredUpload, UploadEntry, UploadListing, UploadRegistry};
