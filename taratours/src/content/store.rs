// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::collections::{CollectionItem, Section, id_space_exhausted};
use crate::content::json_store::{create_json_file, read_json_file, write_json_file};
use crate::content::model::{ContentDocument, NavEntry};
use crate::content::seed::seed_document;
use crate::errors::{StoreError, StoreResult};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const DOCUMENT_LABEL: &str = "content";

/// Result of [`ContentStore::load_or_seed`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub document: ContentDocument,
    /// Set when the stored document could not be loaded and the seed
    /// document was substituted.
    pub fallback: Option<StoreError>,
}

/// Durable home of the [`ContentDocument`].
///
/// Every call goes to disk; nothing is cached between calls. Mutating
/// operations are load-modify-save without locking, so two concurrent writers
/// race and the last save wins. Each save is an atomic file replace, so a
/// reader sees either the old or the new document.
#[derive(Debug, Clone)]
pub struct ContentStore {
    content_file: PathBuf,
}

impl ContentStore {
    pub fn new(content_file: PathBuf) -> Self {
        Self { content_file }
    }

    pub fn path(&self) -> &Path {
        &self.content_file
    }

    /// Writes the seed document when no document exists yet. Returns the
    /// seed when this call created the file and `None` when a document was
    /// already there, including one another writer created concurrently.
    pub fn initialize(&self) -> StoreResult<Option<ContentDocument>> {
        if self.content_file.exists() {
            return Ok(None);
        }
        if let Some(parent) = self.content_file.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                StoreError::storage(format!(
                    "Failed to create content directory '{}': {}",
                    parent.display(),
                    err
                ))
            })?;
        }
        let document = seed_document();
        if !create_json_file(&self.content_file, DOCUMENT_LABEL, &document)? {
            debug!(
                "Content document at {} appeared during initialization; keeping it",
                self.content_file.display()
            );
            return Ok(None);
        }
        info!(
            "Created seed content document at {}",
            self.content_file.display()
        );
        Ok(Some(document))
    }

    pub fn load(&self) -> StoreResult<ContentDocument> {
        read_json_file(&self.content_file, DOCUMENT_LABEL)
    }

    /// Loads the document, substituting the seed document on failure.
    ///
    /// This is the admin dashboard's fallback for callers that render content
    /// directly. It is a presentation policy, not a storage guarantee: the
    /// failure is returned in [`LoadOutcome::fallback`]. The HTTP API does
    /// not use it and reports the load error instead.
    pub fn load_or_seed(&self) -> LoadOutcome {
        match self.load() {
            Ok(document) => LoadOutcome {
                document,
                fallback: None,
            },
            Err(err) => {
                warn!("Serving seed content document: {}", err);
                LoadOutcome {
                    document: seed_document(),
                    fallback: Some(err),
                }
            }
        }
    }

    /// Validates and persists the full document, replacing the previous one.
    pub fn save(&self, document: &ContentDocument) -> StoreResult<()> {
        document.validate()?;
        write_json_file(&self.content_file, DOCUMENT_LABEL, document)?;
        debug!("Saved content document to {}", self.content_file.display());
        Ok(())
    }

    pub fn items<T: CollectionItem>(&self) -> StoreResult<Vec<T>> {
        let document = self.load()?;
        Ok(T::items(&document).clone())
    }

    pub fn next_id<T: CollectionItem>(&self) -> StoreResult<u64> {
        self.load()?
            .next_id::<T>()
            .ok_or_else(|| id_space_exhausted(T::KIND))
    }

    /// Stores `item` and returns it as persisted, including its id.
    pub fn upsert_item<T: CollectionItem>(&self, item: T) -> StoreResult<T> {
        let mut document = self.load()?;
        let stored = document.upsert_item(item)?;
        self.save(&document)?;
        info!(
            "Stored {} entry {}",
            T::KIND,
            stored.id().unwrap_or_default()
        );
        Ok(stored)
    }

    /// Removes the entry with `id`. A missing id is not an error and does not
    /// rewrite the file; the return value says whether anything was removed.
    pub fn delete_item<T: CollectionItem>(&self, id: u64) -> StoreResult<bool> {
        let mut document = self.load()?;
        if !document.delete_item::<T>(id) {
            debug!("No {} entry with id {} to delete", T::KIND, id);
            return Ok(false);
        }
        self.save(&document)?;
        info!("Deleted {} entry {}", T::KIND, id);
        Ok(true)
    }

    pub fn upsert_nav_entry(
        &self,
        index: Option<usize>,
        entry: NavEntry,
    ) -> StoreResult<Vec<NavEntry>> {
        let mut document = self.load()?;
        document.upsert_nav_entry(index, entry)?;
        self.save(&document)?;
        Ok(document.navigation)
    }

    pub fn delete_nav_entry(&self, index: usize) -> StoreResult<Vec<NavEntry>> {
        let mut document = self.load()?;
        document.delete_nav_entry(index)?;
        self.save(&document)?;
        Ok(document.navigation)
    }

    pub fn replace_section(&self, section: Section) -> StoreResult<()> {
        let mut document = self.load()?;
        document.replace_section(section);
        self.save(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::{Hero, Safari, Service, Testimonial};
    use crate::errors::StoreErrorKind;
    use crate::util::atomic_write::StagedFile;
    use crate::util::test_fixtures::TestFixtureRoot;

    fn store_in(fixture: &TestFixtureRoot) -> ContentStore {
        ContentStore::new(fixture.path().join("data").join("content.json"))
    }

    fn safari(title: &str) -> Safari {
        Safari {
            title: title.to_string(),
            description: "Game drives".to_string(),
            price: "$1,299".to_string(),
            duration: "7 Days".to_string(),
            country: "Kenya".to_string(),
            ..Safari::default()
        }
    }

    #[test]
    fn initialize_writes_seed_once() {
        let fixture = TestFixtureRoot::new_unique("store-init").unwrap();
        let store = store_in(&fixture);

        let created = store.initialize().unwrap().expect("seed written");
        assert_eq!(store.load().unwrap(), created);

        let mut edited = created.clone();
        edited.hero.badge = "Edited".to_string();
        store.save(&edited).unwrap();

        assert!(store.initialize().unwrap().is_none());
        assert_eq!(store.load().unwrap().hero.badge, "Edited");
    }

    #[test]
    fn concurrent_initialize_creates_exactly_one_document() {
        let fixture = TestFixtureRoot::new_unique("store-init-race").unwrap();
        let store = store_in(&fixture);

        let created = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| store.initialize().unwrap()))
                .collect();
            handles
                .into_iter()
                .filter_map(|handle| handle.join().unwrap())
                .count()
        });
        assert_eq!(created, 1);
        assert_eq!(store.load().unwrap(), seed_document());
    }

    #[test]
    fn initialize_never_replaces_a_document_written_by_someone_else() {
        let fixture = TestFixtureRoot::new_unique("store-init-existing").unwrap();
        let store = store_in(&fixture);
        let mut other = seed_document();
        other.contact.email = "other@taratours.com".to_string();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        assert!(create_json_file(store.path(), "content", &other).unwrap());

        assert!(store.initialize().unwrap().is_none());
        assert_eq!(store.load().unwrap(), other);
    }

    #[test]
    fn load_missing_document_is_storage_unavailable() {
        let fixture = TestFixtureRoot::new_unique("store-missing").unwrap();
        let err = store_in(&fixture).load().expect_err("no document yet");
        assert_eq!(err.kind(), StoreErrorKind::StorageUnavailable);
    }

    #[test]
    fn load_corrupt_document_reports_and_falls_back() {
        let fixture = TestFixtureRoot::new_unique("store-corrupt").unwrap();
        let store = store_in(&fixture);
        store.initialize().unwrap();
        fs::write(store.path(), "{\"services\": 12}").unwrap();

        let err = store.load().expect_err("wrong shape");
        assert_eq!(err.kind(), StoreErrorKind::CorruptDocument);

        let outcome = store.load_or_seed();
        assert_eq!(outcome.document, seed_document());
        assert_eq!(
            outcome.fallback.map(|err| err.kind()),
            Some(StoreErrorKind::CorruptDocument)
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let fixture = TestFixtureRoot::new_unique("store-round-trip").unwrap();
        let store = store_in(&fixture);
        store.initialize().unwrap();

        let mut document = seed_document();
        document.hero = Hero {
            badge: "New".to_string(),
            ..Hero::default()
        };
        document.safaris.push(Safari {
            id: Some(7),
            ..safari("Masai Mara")
        });
        document.testimonials.push(Testimonial {
            id: Some(1),
            name: "Amani".to_string(),
            text: "Unforgettable".to_string(),
            rating: 4,
            location: "Nairobi, Kenya".to_string(),
        });
        document.navigation[0].active = None;

        store.save(&document).unwrap();
        assert_eq!(store.load().unwrap(), document);
    }

    #[test]
    fn save_rejects_invalid_document_and_keeps_previous() {
        let fixture = TestFixtureRoot::new_unique("store-save-invalid").unwrap();
        let store = store_in(&fixture);
        let seed = store.initialize().unwrap().unwrap();

        let mut document = seed.clone();
        document.services[1].id = Some(1);
        let err = store.save(&document).expect_err("duplicate ids");
        assert_eq!(err.kind(), StoreErrorKind::Validation);
        assert_eq!(store.load().unwrap(), seed);
    }

    #[test]
    fn upserted_ids_increase_across_calls() {
        let fixture = TestFixtureRoot::new_unique("store-upsert-ids").unwrap();
        let store = store_in(&fixture);
        store.initialize().unwrap();

        let mut previous = 0;
        for title in ["Masai Mara", "Serengeti", "Bwindi"] {
            let stored = store.upsert_item(safari(title)).unwrap();
            let id = stored.id.unwrap();
            assert!(id > previous);
            previous = id;
        }
        let safaris: Vec<Safari> = store.items().unwrap();
        assert_eq!(safaris.len(), 3);
        assert_eq!(store.next_id::<Safari>().unwrap(), 4);
    }

    #[test]
    fn upsert_replaces_in_place_on_disk() {
        let fixture = TestFixtureRoot::new_unique("store-upsert-replace").unwrap();
        let store = store_in(&fixture);
        store.initialize().unwrap();

        let mut flights = store.items::<Service>().unwrap()[2].clone();
        flights.title = "Air Tickets".to_string();
        store.upsert_item(flights).unwrap();

        let services: Vec<Service> = store.items().unwrap();
        assert_eq!(services.len(), 4);
        assert_eq!(services[2].title, "Air Tickets");
        assert_eq!(services[2].id, Some(3));
    }

    #[test]
    fn invalid_upsert_leaves_collection_unchanged() {
        let fixture = TestFixtureRoot::new_unique("store-upsert-invalid").unwrap();
        let store = store_in(&fixture);
        store.initialize().unwrap();
        let before: Vec<Service> = store.items().unwrap();

        let err = store
            .upsert_item(Service {
                title: String::new(),
                description: "No title".to_string(),
                ..Service::default()
            })
            .expect_err("empty title");
        assert_eq!(err.kind(), StoreErrorKind::Validation);
        assert_eq!(store.items::<Service>().unwrap(), before);
    }

    #[test]
    fn delete_is_idempotent() {
        let fixture = TestFixtureRoot::new_unique("store-delete").unwrap();
        let store = store_in(&fixture);
        store.initialize().unwrap();

        assert!(store.delete_item::<Service>(2).unwrap());
        assert!(!store.delete_item::<Service>(2).unwrap());
        let document = store.load().unwrap();
        assert!(document.services.iter().all(|s| s.id != Some(2)));
        assert_eq!(document.services.len(), 3);
    }

    #[test]
    fn nav_operations_persist() {
        let fixture = TestFixtureRoot::new_unique("store-nav").unwrap();
        let store = store_in(&fixture);
        store.initialize().unwrap();

        let navigation = store
            .upsert_nav_entry(
                None,
                NavEntry {
                    text: "Blog".to_string(),
                    link: "blog.html".to_string(),
                    active: None,
                },
            )
            .unwrap();
        assert_eq!(navigation.len(), 9);
        assert_eq!(navigation[8].text, "Blog");

        let navigation = store.delete_nav_entry(0).unwrap();
        assert_eq!(navigation[0].text, "Safaris");
        assert_eq!(store.load().unwrap().navigation, navigation);

        let err = store.delete_nav_entry(20).expect_err("out of range");
        assert_eq!(err.kind(), StoreErrorKind::Validation);
    }

    #[test]
    fn replace_section_swaps_whole_record() {
        let fixture = TestFixtureRoot::new_unique("store-section").unwrap();
        let store = store_in(&fixture);
        store.initialize().unwrap();

        store
            .replace_section(Section::Hero(Hero {
                badge: "Only badge".to_string(),
                ..Hero::default()
            }))
            .unwrap();
        let hero = store.load().unwrap().hero;
        assert_eq!(hero.badge, "Only badge");
        assert_eq!(hero.video, "");
    }

    #[test]
    fn interrupted_write_never_exposes_partial_document() {
        let fixture = TestFixtureRoot::new_unique("store-interrupted").unwrap();
        let store = store_in(&fixture);
        let seed = store.initialize().unwrap().unwrap();

        let mut updated = seed.clone();
        updated.contact.email = "bookings@taratours.com".to_string();
        let bytes = serde_json::to_vec_pretty(&updated).unwrap();
        let mut staged = StagedFile::create(store.path(), "content").unwrap();
        staged.write_all(&bytes[..bytes.len() / 2]).unwrap();
        drop(staged);
        assert_eq!(store.load().unwrap(), seed);

        store.save(&updated).unwrap();
        assert_eq!(store.load().unwrap(), updated);
    }
}
