// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod collections;
pub(crate) mod json_store;
pub mod model;
pub mod seed;
pub mod store;

pub use collections::{CollectionItem, CollectionKind, Section, SectionKind, next_id};
pub use model::{
    About, Contact, ContentDocument, Destination, Hero, NavEntry, Safari, Service, Settings,
    Testimonial,
};
pub use seed::seed_document;
pub use store::{ContentStore, LoadOutcome};
