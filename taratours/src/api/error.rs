// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::errors::{StoreError, StoreErrorKind, StoreResult};
use actix_web::{HttpRequest, HttpResponse, error, http::StatusCode};
use serde::Serialize;

#[derive(Serialize)]
struct ApiErrorResponse<'a> {
    error: &'a str,
    kind: &'a str,
}

pub(crate) fn json_error_response(message: &str, kind: &str, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(ApiErrorResponse {
        error: message,
        kind,
    })
}

pub(crate) fn store_error_status(kind: StoreErrorKind) -> StatusCode {
    match kind {
        StoreErrorKind::Validation | StoreErrorKind::NoFileProvided => StatusCode::BAD_REQUEST,
        StoreErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        StoreErrorKind::Busy => StatusCode::SERVICE_UNAVAILABLE,
        StoreErrorKind::StorageUnavailable
        | StoreErrorKind::CorruptDocument
        | StoreErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client errors carry their message. Server-side failures are logged in
/// full and answered with a generic message.
pub(crate) fn store_error_response(operation: &str, err: &StoreError) -> HttpResponse {
    let status = store_error_status(err.kind());
    if err.kind() == StoreErrorKind::Busy {
        log::warn!("Failed to {}: {}", operation, err);
        return json_error_response("Server is busy, try again", err.kind().as_str(), status);
    }
    if status.is_server_error() {
        log::error!("Failed to {}: {}", operation, err);
        return json_error_response("An internal error occurred", err.kind().as_str(), status);
    }
    log::debug!("Rejected {}: {}", operation, err);
    json_error_response(err.message(), err.kind().as_str(), status)
}

pub(crate) fn not_found_response(message: &str) -> HttpResponse {
    json_error_response(message, "not-found", StatusCode::NOT_FOUND)
}

/// Runs a store operation on the blocking pool and maps its failure to a
/// response.
pub(crate) async fn run_store<F, R>(
    state: &AppState,
    operation: &'static str,
    task: F,
) -> Result<R, HttpResponse>
where
    F: FnOnce() -> StoreResult<R> + Send + 'static,
    R: Send + 'static,
{
    state
        .blocking
        .run(operation, task)
        .await
        .map_err(|err| store_error_response(operation, &err))
}

/// Error handler for `web::JsonConfig`: malformed bodies become validation
/// errors in the usual error shape.
pub fn json_payload_error(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let (status, kind) = match &err {
        error::JsonPayloadError::Overflow { .. }
        | error::JsonPayloadError::OverflowKnownLength { .. } => (
            StatusCode::PAYLOAD_TOO_LARGE,
            StoreErrorKind::PayloadTooLarge,
        ),
        _ => (StatusCode::BAD_REQUEST, StoreErrorKind::Validation),
    };
    let response = json_error_response(&err.to_string(), kind.as_str(), status);
    error::InternalError::from_response(err, response).into()
}
