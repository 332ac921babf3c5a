// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::model::{About, Contact, ContentDocument, Hero, NavEntry, Service, Settings};

/// Document written on first run and served when the stored one cannot be
/// loaded.
pub fn seed_document() -> ContentDocument {
    ContentDocument {
        hero: Hero {
            badge: "East Africa's Premier Safari Experts".to_string(),
            title1: "Discover".to_string(),
            title2: "East Africa's".to_string(),
            title3: "Untamed Wildlife".to_string(),
            subtitle: "Experience the magic of Kenya, Tanzania, Uganda, Rwanda & Congo with expert safari guides. Personalized safaris, hassle-free travel services, and unforgettable adventures await.".to_string(),
            video: "images/vid1.mp4".to_string(),
        },
        services: vec![
            seed_service(
                1,
                "fas fa-paw",
                "Wildlife Safaris",
                "Expert-guided safaris across Kenya, Tanzania, Uganda, Rwanda & Congo with professional wildlife guides.",
                "safaris.html",
            ),
            seed_service(
                2,
                "fas fa-campground",
                "Safari Lodges",
                "Authentic safari lodges and tented camps in the heart of East Africa's national parks.",
                "hotels.html",
            ),
            seed_service(
                3,
                "fas fa-plane",
                "Flight Tickets",
                "Domestic and international flights to East Africa's major airports and safari destinations.",
                "flights.html",
            ),
            seed_service(
                4,
                "fas fa-passport",
                "Visa Processing",
                "East Africa visa assistance for Kenya, Tanzania, Uganda, Rwanda & Congo.",
                "visa.html",
            ),
        ],
        safaris: Vec::new(),
        destinations: Vec::new(),
        testimonials: Vec::new(),
        about: About {
            story_title: "Our Story Our Pride".to_string(),
            story_desc: "We specialize in crafting unforgettable safaris and tours while ensuring that our operations directly benefit the communities in which we work.".to_string(),
            company_name: "TaraTours".to_string(),
            company_desc: "TaraTours is a Destination Management Company (DMC) dedicated to providing world-class safari and travel experiences.".to_string(),
            vision: String::new(),
            mission: String::new(),
        },
        contact: Contact {
            phone: "+256 703 900 937".to_string(),
            email: "info@taratours.com".to_string(),
            address: String::new(),
            whatsapp: "+256703900937".to_string(),
        },
        navigation: vec![
            seed_nav("Home", "index.html", true),
            seed_nav("Safaris", "safaris.html", false),
            seed_nav("Tours", "tours.html", false),
            seed_nav("Lodges", "hotels.html", false),
            seed_nav("Flights", "flights.html", false),
            seed_nav("Visa", "visa.html", false),
            seed_nav("About", "about.html", false),
            seed_nav("Contact", "contact.html", false),
        ],
        settings: Settings {
            site_title: "TaraTours".to_string(),
            site_description: "TaraTours - Your trusted partner for East African safaris, tours, hotels, flights, and visa processing.".to_string(),
            site_keywords: "safari tours, East Africa, Kenya safari, Tanzania safari, Uganda gorilla trekking".to_string(),
            logo: "images/logo/logo.png".to_string(),
        },
    }
}

fn seed_service(id: u64, icon: &str, title: &str, description: &str, link: &str) -> Service {
    Service {
        id: Some(id),
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        link: link.to_string(),
    }
}

fn seed_nav(text: &str, link: &str, active: bool) -> NavEntry {
    NavEntry {
        text: text.to_string(),
        link: link.to_string(),
        active: active.then_some(true),
    }
}
