// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::model::{
    About, Contact, ContentDocument, Destination, Hero, NavEntry, Safari, Service, Settings,
    Testimonial,
};
use crate::errors::{StoreError, StoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Services,
    Safaris,
    Destinations,
    Testimonials,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Services,
        CollectionKind::Safaris,
        CollectionKind::Destinations,
        CollectionKind::Testimonials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Services => "services",
            CollectionKind::Safaris => "safaris",
            CollectionKind::Destinations => "destinations",
            CollectionKind::Testimonials => "testimonials",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| format!("Unknown collection '{}'", value))
    }
}

/// An id-keyed entry of one of the document's ordered collections.
pub trait CollectionItem: Clone + Serialize + DeserializeOwned + Send + 'static {
    const KIND: CollectionKind;

    fn id(&self) -> Option<u64>;
    fn set_id(&mut self, id: u64);
    /// Field name and value of every field that must be non-empty.
    fn required_fields(&self) -> [(&'static str, &str); 2];
    fn items(document: &ContentDocument) -> &Vec<Self>;
    fn items_mut(document: &mut ContentDocument) -> &mut Vec<Self>;

    fn validate(&self) -> StoreResult<()> {
        for (field, value) in self.required_fields() {
            if value.is_empty() {
                return Err(StoreError::validation(format!(
                    "{} entry requires a non-empty '{}'",
                    Self::KIND,
                    field
                )));
            }
        }
        Ok(())
    }
}

macro_rules! titled_item {
    ($item:ty, $kind:expr, $field:ident) => {
        impl CollectionItem for $item {
            const KIND: CollectionKind = $kind;

            fn id(&self) -> Option<u64> {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = Some(id);
            }

            fn required_fields(&self) -> [(&'static str, &str); 2] {
                [
                    ("title", self.title.as_str()),
                    ("description", self.description.as_str()),
                ]
            }

            fn items(document: &ContentDocument) -> &Vec<Self> {
                &document.$field
            }

            fn items_mut(document: &mut ContentDocument) -> &mut Vec<Self> {
                &mut document.$field
            }
        }
    };
}

titled_item!(Service, CollectionKind::Services, services);
titled_item!(Safari, CollectionKind::Safaris, safaris);
titled_item!(Destination, CollectionKind::Destinations, destinations);

impl CollectionItem for Testimonial {
    const KIND: CollectionKind = CollectionKind::Testimonials;

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    fn required_fields(&self) -> [(&'static str, &str); 2] {
        [("name", self.name.as_str()), ("text", self.text.as_str())]
    }

    fn items(document: &ContentDocument) -> &Vec<Self> {
        &document.testimonials
    }

    fn items_mut(document: &mut ContentDocument) -> &mut Vec<Self> {
        &mut document.testimonials
    }
}

/// `1 + max(ids)`, or 1 for a collection without ids. `None` once the
/// maximum id is `u64::MAX`. Deleting the highest id and adding again hands
/// the same id out a second time.
pub fn next_id<T: CollectionItem>(items: &[T]) -> Option<u64> {
    items
        .iter()
        .filter_map(|item| item.id())
        .max()
        .unwrap_or(0)
        .checked_add(1)
}

pub(crate) fn id_space_exhausted(kind: CollectionKind) -> StoreError {
    StoreError::validation(format!("{} id space exhausted", kind))
}

/// Whole-record replacement of one of the flat sections.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Hero(Hero),
    About(About),
    Contact(Contact),
    Settings(Settings),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    About,
    Contact,
    Settings,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Contact => "contact",
            SectionKind::Settings => "settings",
        }
    }

    /// Decodes a JSON record into the section this kind names.
    pub fn decode(&self, value: serde_json::Value) -> Result<Section, serde_json::Error> {
        Ok(match self {
            SectionKind::Hero => Section::Hero(serde_json::from_value(value)?),
            SectionKind::About => Section::About(serde_json::from_value(value)?),
            SectionKind::Contact => Section::Contact(serde_json::from_value(value)?),
            SectionKind::Settings => Section::Settings(serde_json::from_value(value)?),
        })
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hero" => Ok(SectionKind::Hero),
            "about" => Ok(SectionKind::About),
            "contact" => Ok(SectionKind::Contact),
            "settings" => Ok(SectionKind::Settings),
            other => Err(format!("Unknown section '{}'", other)),
        }
    }
}

impl ContentDocument {
    pub fn next_id<T: CollectionItem>(&self) -> Option<u64> {
        next_id(T::items(self))
    }

    /// Replaces the entry with the same id in place, or appends the item
    /// under a freshly assigned id. Invalid items leave the document untouched.
    pub fn upsert_item<T: CollectionItem>(&mut self, mut item: T) -> StoreResult<T> {
        item.validate()?;
        let existing = item
            .id()
            .and_then(|id| T::items(self).iter().position(|entry| entry.id() == Some(id)));
        match existing {
            Some(position) => {
                T::items_mut(self)[position] = item.clone();
            }
            None => {
                let id = self
                    .next_id::<T>()
                    .ok_or_else(|| id_space_exhausted(T::KIND))?;
                item.set_id(id);
                T::items_mut(self).push(item.clone());
            }
        }
        Ok(item)
    }

    /// Returns whether an entry was removed.
    pub fn delete_item<T: CollectionItem>(&mut self, id: u64) -> bool {
        let items = T::items_mut(self);
        let before = items.len();
        items.retain(|entry| entry.id() != Some(id));
        items.len() != before
    }

    /// `None` appends; `Some(index)` replaces the entry at that position.
    /// Returns the position the entry ended up at.
    pub fn upsert_nav_entry(
        &mut self,
        index: Option<usize>,
        entry: NavEntry,
    ) -> StoreResult<usize> {
        validate_nav_entry(&entry)?;
        match index {
            Some(index) if index < self.navigation.len() => {
                self.navigation[index] = entry;
                Ok(index)
            }
            Some(index) => Err(nav_index_out_of_range(index, self.navigation.len())),
            None => {
                self.navigation.push(entry);
                Ok(self.navigation.len() - 1)
            }
        }
    }

    pub fn delete_nav_entry(&mut self, index: usize) -> StoreResult<NavEntry> {
        if index >= self.navigation.len() {
            return Err(nav_index_out_of_range(index, self.navigation.len()));
        }
        Ok(self.navigation.remove(index))
    }

    pub fn replace_section(&mut self, section: Section) {
        match section {
            Section::Hero(hero) => self.hero = hero,
            Section::About(about) => self.about = about,
            Section::Contact(contact) => self.contact = contact,
            Section::Settings(settings) => self.settings = settings,
        }
    }

    /// Presence checks on every item and nav entry plus per-collection id
    /// uniqueness.
    pub fn validate(&self) -> StoreResult<()> {
        validate_items(&self.services)?;
        validate_items(&self.safaris)?;
        validate_items(&self.destinations)?;
        validate_items(&self.testimonials)?;
        for entry in &self.navigation {
            validate_nav_entry(entry)?;
        }
        Ok(())
    }
}

fn validate_items<T: CollectionItem>(items: &[T]) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for item in items {
        item.validate()?;
        if let Some(id) = item.id()
            && !seen.insert(id)
        {
            return Err(StoreError::validation(format!(
                "{} contains duplicate id {}",
                T::KIND,
                id
            )));
        }
    }
    Ok(())
}

fn validate_nav_entry(entry: &NavEntry) -> StoreResult<()> {
    if entry.text.is_empty() {
        return Err(StoreError::validation(
            "navigation entry requires a non-empty 'text'",
        ));
    }
    if entry.link.is_empty() {
        return Err(StoreError::validation(
            "navigation entry requires a non-empty 'link'",
        ));
    }
    Ok(())
}

fn nav_index_out_of_range(index: usize, len: usize) -> StoreError {
    StoreError::validation(format!(
        "navigation index {} is out of range ({} entries)",
        index, len
    ))
}
