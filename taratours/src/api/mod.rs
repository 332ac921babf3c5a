// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

mod content;
pub mod error;
mod health;
mod navigation;
mod uploads;

const JSON_BODY_LIMIT_BYTES: usize = 4 * 1024 * 1024;

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT_BYTES)
        .error_handler(error::json_payload_error)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health))
            .route("/content", web::get().to(content::get_content))
            .route("/content", web::post().to(content::save_content))
            .route(
                "/content/sections/{section}",
                web::put().to(content::replace_section),
            )
            .route(
                "/content/{collection}",
                web::get().to(content::list_collection),
            )
            .route(
                "/content/{collection}",
                web::post().to(content::upsert_collection_item),
            )
            .route(
                "/content/{collection}/{id}",
                web::delete().to(content::delete_collection_item),
            )
            .route("/navigation", web::post().to(navigation::upsert_nav_entry))
            .route(
                "/navigation/{index}",
                web::delete().to(navigation::delete_nav_entry),
            )
            .route("/upload", web::post().to(uploads::upload_file))
            .route("/uploads", web::get().to(uploads::list_uploads)),
    );
}
