// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};

/// The whole editable site. Persisted as one JSON file and always replaced
/// wholesale on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDocument {
    pub hero: Hero,
    pub services: Vec<Service>,
    pub safaris: Vec<Safari>,
    pub destinations: Vec<Destination>,
    pub testimonials: Vec<Testimonial>,
    pub about: About,
    pub contact: Contact,
    pub navigation: Vec<NavEntry>,
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub badge: String,
    pub title1: String,
    pub title2: String,
    pub title3: String,
    pub subtitle: String,
    pub video: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Safari {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub image: String,
    // Display strings such as "$1,299", "7 Days" and "4.9 (128)".
    pub price: String,
    pub duration: String,
    pub rating: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub image: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub text: String,
    pub rating: u8,
    pub location: String,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            text: String::new(),
            rating: 5,
            location: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct About {
    pub story_title: String,
    pub story_desc: String,
    pub company_name: String,
    pub company_desc: String,
    pub vision: String,
    pub mission: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub whatsapp: String,
}

/// Navigation entries are addressed by position; they carry no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavEntry {
    pub text: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub site_title: String,
    pub site_description: String,
    pub site_keywords: String,
    pub logo: String,
}
