// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::Value;

use super::error::{json_error_response, not_found_response, run_store};
use crate::app_state::AppState;
use crate::content::{
    CollectionItem, CollectionKind, ContentDocument, Destination, Safari, SectionKind, Service,
    Testimonial,
};
use crate::errors::StoreErrorKind;

#[derive(Serialize)]
struct SaveResponse {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    deleted: bool,
}

/// Calls `$handler::<T>` with the item type of a collection kind.
macro_rules! with_collection {
    ($kind:expr, $handler:ident ( $($arg:expr),* )) => {
        match $kind {
            CollectionKind::Services => $handler::<Service>($($arg),*).await,
            CollectionKind::Safaris => $handler::<Safari>($($arg),*).await,
            CollectionKind::Destinations => $handler::<Destination>($($arg),*).await,
            CollectionKind::Testimonials => $handler::<Testimonial>($($arg),*).await,
        }
    };
}

fn parse_collection(name: &str) -> Result<CollectionKind, HttpResponse> {
    name.parse::<CollectionKind>()
        .map_err(|message| not_found_response(&message))
}

/// A missing or unreadable document is reported, not papered over; falling
/// back to the seed is the admin client's call.
pub async fn get_content(state: web::Data<AppState>) -> HttpResponse {
    let store = state.content_store.clone();
    match run_store(&state, "load content", move || store.load()).await {
        Ok(document) => HttpResponse::Ok().json(document),
        Err(response) => response,
    }
}

pub async fn save_content(
    state: web::Data<AppState>,
    document: web::Json<ContentDocument>,
) -> HttpResponse {
    let store = state.content_store.clone();
    let document = document.into_inner();
    match run_store(&state, "save content", move || store.save(&document)).await {
        Ok(()) => HttpResponse::Ok().json(SaveResponse {
            success: true,
            message: "Content saved successfully",
        }),
        Err(response) => response,
    }
}

pub async fn list_collection(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let kind = match parse_collection(&path) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    with_collection!(kind, list_items(&state))
}

async fn list_items<T: CollectionItem>(state: &AppState) -> HttpResponse {
    let store = state.content_store.clone();
    match run_store(state, "list collection", move || store.items::<T>()).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(response) => response,
    }
}

pub async fn upsert_collection_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let kind = match parse_collection(&path) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    with_collection!(kind, upsert_item(&state, body.into_inner()))
}

async fn upsert_item<T: CollectionItem>(state: &AppState, body: Value) -> HttpResponse {
    let item: T = match serde_json::from_value(body) {
        Ok(item) => item,
        Err(err) => {
            return json_error_response(
                &format!("Invalid {} entry: {}", T::KIND, err),
                StoreErrorKind::Validation.as_str(),
                StatusCode::BAD_REQUEST,
            );
        }
    };
    let store = state.content_store.clone();
    match run_store(state, "store collection item", move || store.upsert_item(item)).await {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(response) => response,
    }
}

pub async fn delete_collection_item(
    state: web::Data<AppState>,
    path: web::Path<(String, u64)>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    let kind = match parse_collection(&collection) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    with_collection!(kind, delete_item(&state, id))
}

async fn delete_item<T: CollectionItem>(state: &AppState, id: u64) -> HttpResponse {
    let store = state.content_store.clone();
    match run_store(state, "delete collection item", move || {
        store.delete_item::<T>(id)
    })
    .await
    {
        Ok(deleted) => HttpResponse::Ok().json(DeleteResponse {
            success: true,
            deleted,
        }),
        Err(response) => response,
    }
}

pub async fn replace_section(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let kind = match path.parse::<SectionKind>() {
        Ok(kind) => kind,
        Err(message) => return not_found_response(&message),
    };
    let section = match kind.decode(body.into_inner()) {
        Ok(section) => section,
        Err(err) => {
            return json_error_response(
                &format!("Invalid {} section: {}", kind.as_str(), err),
                StoreErrorKind::Validation.as_str(),
                StatusCode::BAD_REQUEST,
            );
        }
    };

    let store = state.content_store.clone();
    match run_store(state.get_ref(), "replace section", move || {
        store.replace_section(section)
    })
    .await
    {
        Ok(()) => HttpResponse::Ok().json(SaveResponse {
            success: true,
            message: "Section saved successfully",
        }),
        Err(response) => response,
    }
}
