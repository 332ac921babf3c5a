// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use taratours::api;
use taratours::app_state::AppState;
use taratours::config::{
    AppConfig, ContentConfig, LoggingConfig, ServerConfig, UploadConfig, ValidatedConfig,
};
use taratours::content::{ContentDocument, ContentStore, seed_document};
use taratours::runtime_paths::RuntimePaths;
use taratours::util::BlockingPool;
use taratours::util::test_fixtures::TestFixtureRoot;

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub runtime_paths: RuntimePaths,
    pub app_state: Arc<AppState>,
}

impl TestHarness {
    /// Runtime root with the seed document already stored.
    pub fn new() -> Self {
        let harness = Self::empty();
        harness
            .content_store()
            .initialize()
            .expect("seed content");
        harness
    }

    /// Runtime root without a content document.
    pub fn empty() -> Self {
        Self::with_config(build_config())
    }

    pub fn with_config(config: ValidatedConfig) -> Self {
        let fixture = TestFixtureRoot::new_unique("api-test-suite").expect("fixture root");
        let runtime_paths = fixture.runtime_paths().expect("runtime paths");
        fs::create_dir_all(&runtime_paths.uploads_dir).expect("uploads dir");
        let app_state = Arc::new(
            AppState::new(&config, runtime_paths.clone()).with_blocking_pool(BlockingPool::new(4)),
        );

        Self {
            fixture,
            config: Arc::new(config),
            runtime_paths,
            app_state,
        }
    }

    pub fn content_store(&self) -> ContentStore {
        self.runtime_paths.content_store()
    }

    pub fn stored_document(&self) -> ContentDocument {
        self.content_store().load().expect("stored document")
    }

    pub fn write_raw_document(&self, contents: &str) {
        fs::write(&self.runtime_paths.content_file, contents).expect("raw document");
    }
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::from(harness.app_state.clone()))
        .app_data(api::json_config())
        .configure(api::configure)
        .service(actix_files::Files::new(
            &harness.config.upload.public_path,
            harness.runtime_paths.uploads_dir.clone(),
        ))
}

pub fn build_config() -> ValidatedConfig {
    ValidatedConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            workers: 1,
        },
        app: AppConfig {
            name: "TaraTours Test".to_string(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
        content: ContentConfig::default(),
        upload: UploadConfig {
            dir: "uploads".to_string(),
            max_file_size_mb: 2,
            public_path: "/uploads".to_string(),
        },
    }
}

pub fn seed_json() -> Value {
    serde_json::to_value(seed_document()).expect("seed json")
}

pub fn ids(items: &Value) -> Vec<u64> {
    items
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_u64))
        .collect()
}
