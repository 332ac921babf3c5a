// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub(crate) mod atomic_write;
pub mod blocking;
pub mod mime_helper;
pub mod test_fixtures;

// Re-export commonly used items for convenience
pub use blocking::BlockingPool;
pub use mime_helper::{detect_mime_type, effective_mime_type};
pub use test_fixtures::TestFixtureRoot;
