// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::error::run_store;
use crate::app_state::AppState;
use crate::content::NavEntry;

#[derive(Deserialize)]
pub struct NavEntryRequest {
    /// Position to replace; absent appends.
    #[serde(default)]
    index: Option<usize>,
    entry: NavEntry,
}

pub async fn upsert_nav_entry(
    state: web::Data<AppState>,
    body: web::Json<NavEntryRequest>,
) -> HttpResponse {
    let NavEntryRequest { index, entry } = body.into_inner();
    let store = state.content_store.clone();
    match run_store(&state, "store navigation entry", move || {
        store.upsert_nav_entry(index, entry)
    })
    .await
    {
        Ok(navigation) => HttpResponse::Ok().json(navigation),
        Err(response) => response,
    }
}

pub async fn delete_nav_entry(state: web::Data<AppState>, path: web::Path<usize>) -> HttpResponse {
    let index = path.into_inner();
    let store = state.content_store.clone();
    match run_store(&state, "delete navigation entry", move || {
        store.delete_nav_entry(index)
    })
    .await
    {
        Ok(navigation) => HttpResponse::Ok().json(navigation),
        Err(response) => response,
    }
}
