// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::header;
use actix_web::web::BytesMut;
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

use super::error::{run_store, store_error_response};
use crate::app_state::AppState;
use crate::errors::StoreError;

#[derive(Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Serialize)]
struct UploadResponse {
    success: bool,
    url: String,
    filename: String,
}

/// Raw-body upload. The declared media type is the request's
/// `Content-Type`; the original name comes from `?filename=`. The body is
/// read in chunks and abandoned as soon as it passes the upload limit.
pub async fn upload_file(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    mut payload: web::Payload,
) -> HttpResponse {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                let err = StoreError::validation(format!("Failed to read upload body: {}", err));
                return store_error_response("store upload", &err);
            }
        };
        body.extend_from_slice(&chunk);
        if let Err(err) = state.upload_registry.check_size(body.len() as u64) {
            return store_error_response("store upload", &err);
        }
    }
    let body = body.freeze();

    let declared_mime = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let original_name = query.into_inner().filename.unwrap_or_default();

    let registry = state.upload_registry.clone();
    match run_store(&state, "store upload", move || {
        registry.store(&body, &declared_mime, &original_name)
    })
    .await
    {
        Ok(stored) => HttpResponse::Ok().json(UploadResponse {
            success: true,
            url: stored.url,
            filename: stored.stored_name,
        }),
        Err(response) => response,
    }
}

pub async fn list_uploads(state: web::Data<AppState>) -> HttpResponse {
    let registry = state.upload_registry.clone();
    match run_store(&state, "list uploads", move || Ok(registry.list())).await {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(response) => response,
    }
}
