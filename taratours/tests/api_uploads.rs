// This file is part of the product TaraTours.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

async fn read_json(resp: actix_web::dev::ServiceResponse) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("json body")
}

fn upload_request(filename: &str, content_type: &str, payload: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri(&format!("/api/upload?filename={}", filename))
        .insert_header(("Content-Type", content_type.to_string()))
        .set_payload(payload)
}

#[actix_web::test]
async fn upload_image_returns_public_url() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = upload_request("photo.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    assert_eq!(json["success"], true);

    let url = json["url"].as_str().expect("url");
    let filename = json["filename"].as_str().expect("filename");
    assert!(url.starts_with("/uploads/images/"));
    assert!(url.ends_with(".jpg"));
    assert_eq!(url, format!("/uploads/images/{}", filename));
    assert!(
        harness
            .runtime_paths
            .uploads_dir
            .join("images")
            .join(filename)
            .is_file()
    );
}

#[actix_web::test]
async fn uploaded_file_is_served_statically() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = upload_request("logo.png", "image/png", PNG_MAGIC.to_vec()).to_request();
    let resp = test::call_service(&app, req).await;
    let url = read_json(resp).await["url"]
        .as_str()
        .expect("url")
        .to_string();

    let req = test::TestRequest::get().uri(&url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), PNG_MAGIC.as_slice());
}

#[actix_web::test]
async fn upload_video_and_unknown_types_go_to_videos() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = upload_request("safari.mp4", "video/mp4", b"frames".to_vec()).to_request();
    let resp = test::call_service(&app, req).await;
    let url = read_json(resp).await["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/videos/"));
    assert!(url.ends_with(".mp4"));

    let req = upload_request("itinerary.pdf", "application/pdf", b"%PDF-1.7".to_vec()).to_request();
    let resp = test::call_service(&app, req).await;
    let url = read_json(resp).await["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/videos/"));
}

#[actix_web::test]
async fn upload_with_generic_type_is_sniffed() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = upload_request("banner", "application/octet-stream", PNG_MAGIC.to_vec()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let url = read_json(resp).await["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/images/"));
}

#[actix_web::test]
async fn identical_names_get_distinct_urls() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let mut urls = Vec::new();
    for _ in 0..2 {
        let req = upload_request("photo.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]).to_request();
        let resp = test::call_service(&app, req).await;
        urls.push(read_json(resp).await["url"].as_str().unwrap().to_string());
    }
    assert_ne!(urls[0], urls[1]);
}

#[actix_web::test]
async fn empty_upload_is_rejected() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = upload_request("photo.jpg", "image/jpeg", Vec::new()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = read_json(resp).await;
    assert_eq!(json["kind"], "no-file-provided");
    assert_eq!(json["error"], "No file uploaded");
}

#[actix_web::test]
async fn oversize_upload_is_rejected() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let limit = harness.config.upload.max_file_size_bytes() as usize;
    let req = upload_request("big.mp4", "video/mp4", vec![0u8; limit + 1]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(read_json(resp).await["kind"], "payload-too-large");

    let req = test::TestRequest::get().uri("/api/uploads").to_request();
    let resp = test::call_service(&app, req).await;
    let listing = read_json(resp).await;
    assert!(listing["videos"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn upload_far_over_the_limit_keeps_json_error_shape() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let limit = harness.config.upload.max_file_size_bytes() as usize;
    let req = upload_request("huge.mp4", "video/mp4", vec![0u8; limit + 2 * 1024 * 1024])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = read_json(resp).await;
    assert_eq!(json["kind"], "payload-too-large");
    assert!(json["error"].as_str().unwrap().contains("maximum size"));
}

#[actix_web::test]
async fn list_uploads_on_fresh_root_is_empty() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/api/uploads").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    assert_eq!(json, serde_json::json!({"images": [], "videos": []}));
}

#[actix_web::test]
async fn list_uploads_reports_stored_files() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = upload_request("lion.png", "image/png", PNG_MAGIC.to_vec()).to_request();
    let resp = test::call_service(&app, req).await;
    let uploaded = read_json(resp).await;

    let req = test::TestRequest::get().uri("/api/uploads").to_request();
    let resp = test::call_service(&app, req).await;
    let json = read_json(resp).await;
    let images = json["images"].as_array().expect("images");
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["name"], uploaded["filename"]);
    assert_eq!(images[0]["url"], uploaded["url"]);
    assert!(json["videos"].as_array().unwrap().is_empty());
}
