// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The facade against a real HTTP client and a real slot store, with the
//! photo service played by wiremock.

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booth_cloud::CloudPhotoClient;
use booth_config::BoothConfig;
use booth_config::model::ApiConfig;
use booth_core::{SystemClock, Clock, is_valid_share_code};
use booth_persistence::PhotoPersistence;
use booth_storage::{LocalPhotoStore, MemorySlotStore};
use booth_test_utils::RecordingCompressor;
use booth_test_utils::fixtures::{inline_draft, sunset_draft};

fn persistence_for(base_url: &str) -> PhotoPersistence {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        auth_token: None,
        timeout_secs: 5,
    };
    let cloud = CloudPhotoClient::new(&config).unwrap();
    let local = LocalPhotoStore::new(
        Arc::new(MemorySlotStore::unbounded()),
        Arc::new(RecordingCompressor::new()),
    );
    PhotoPersistence::new(Arc::new(cloud), local)
}

#[tokio::test]
async fn reachable_cloud_leaves_local_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/photos/upload/public/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "srv-1",
            "originalImageUrl": "https://cdn.test/srv-1_original.jpg",
            "processedImageUrl": "https://cdn.test/srv-1_processed.jpg",
            "backgroundId": "bg1",
            "backgroundName": "Sunset",
            "shareCode": "SRV001",
            "createdAt": "2024-05-01T12:00:00Z",
            "prompt": "smile"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let persistence = persistence_for(&server.uri());
    let before = persistence.local().get_all().await;
    let saved = persistence.save(sunset_draft()).await.unwrap();

    assert!(saved.is_cloud());
    assert_eq!(saved.id(), "srv-1");
    assert_eq!(saved.created_at(), 1_714_564_800_000);
    assert_eq!(persistence.local().get_all().await, before);
}

#[tokio::test]
async fn server_error_falls_back_to_local_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"error": "Failed to upload photo"})),
        )
        .mount(&server)
        .await;

    let persistence = persistence_for(&server.uri());
    let saved = persistence.save(sunset_draft()).await.unwrap();

    assert!(!saved.is_cloud());
    assert!(is_valid_share_code(saved.share_code()));
    assert_eq!(persistence.local().get_all().await.len(), 1);
}

#[tokio::test]
async fn unreachable_cloud_saves_locally_with_fresh_identity() {
    let persistence = persistence_for("http://127.0.0.1:9");
    let now = SystemClock.now_millis();
    let saved = persistence.save(sunset_draft()).await.unwrap();

    assert_eq!(saved.background_id(), "bg1");
    assert_eq!(saved.share_code().len(), 6);
    assert!(is_valid_share_code(saved.share_code()));
    assert!((saved.created_at() - now).abs() < 1_000);
}

#[tokio::test]
async fn unknown_share_code_is_none_everywhere() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/photos/ZZZZZZ"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Photo not found"})))
        .mount(&server)
        .await;

    let persistence = persistence_for(&server.uri());
    assert!(persistence.get_by_share_code("ZZZZZZ").await.is_none());

    let offline = persistence_for("http://127.0.0.1:9");
    assert!(offline.get_by_share_code("ZZZZZZ").await.is_none());
}

#[tokio::test]
async fn twelve_offline_saves_keep_ten() {
    let persistence = persistence_for("http://127.0.0.1:9");
    let mut saved = Vec::new();
    for i in 0..12 {
        saved.push(persistence.save(inline_draft(&i.to_string())).await.unwrap());
    }

    let all = persistence.local().get_all().await;
    assert_eq!(all.len(), 10);
    assert!(all.iter().all(|p| p.id != saved[0].id()));
    assert!(all.iter().all(|p| p.id != saved[1].id()));
}

#[tokio::test]
async fn from_config_opens_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nested").join("booth.db");
    let toml = format!(
        "[api]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n\n[storage]\ndatabase_path = {:?}\n",
        db.display().to_string()
    );
    let config: BoothConfig = booth_config::load_and_validate_str(&toml).unwrap();

    let persistence = PhotoPersistence::from_config(&config).await.unwrap();
    let saved = persistence.save(inline_draft("disk")).await.unwrap();
    assert!(db.exists());

    let reopened = PhotoPersistence::from_config(&config).await.unwrap();
    let found = reopened.get_by_share_code(saved.share_code()).await.unwrap();
    assert_eq!(found.id(), saved.id());
    assert_eq!(reopened.share_url("ABC123"), "https://pictureme.now/share/ABC123");
}
