// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote photo service.
//!
//! Provides [`CloudPhotoClient`] which handles URL construction, optional
//! bearer authentication, status interpretation and response normalization.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use booth_config::model::ApiConfig;
use booth_core::{BoothError, Clock, CloudPhoto, PhotoCloud, PhotoUpload, SystemClock};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};
use url::Url;

use crate::tls::enforce_https;
use crate::wire::{WirePhoto, error_detail};

/// REST client for the photo service.
///
/// Endpoints, relative to the configured base URL:
/// - `POST /api/photos/upload/public/`
/// - `GET /api/photos/{shareCode}`
/// - `GET /api/photos`
/// - `DELETE /api/photos/{id}`
#[derive(Clone)]
pub struct CloudPhotoClient {
    client: reqwest::Client,
    base_url: Url,
    clock: Arc<dyn Clock>,
}

impl CloudPhotoClient {
    /// Creates a client from the `[api]` configuration section.
    ///
    /// The base URL is upgraded to HTTPS unless it points at the loopback
    /// interface.
    pub fn new(config: &ApiConfig) -> Result<Self, BoothError> {
        let base_url = enforce_https(&config.base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(token) = config.auth_token.as_deref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                BoothError::Config(format!("invalid auth token header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()
            .map_err(|e| BoothError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            clock: Arc::new(SystemClock),
        })
    }

    /// Clock used when the service omits or garbles `createdAt`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BoothError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BoothError::Config(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_photo(&self, response: reqwest::Response) -> Result<CloudPhoto, BoothError> {
        let wire: WirePhoto = response.json().await.map_err(malformed)?;
        Ok(wire.into_cloud_photo(self.clock.now_millis()))
    }
}

fn transport(e: reqwest::Error) -> BoothError {
    BoothError::Transport {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

fn malformed(e: reqwest::Error) -> BoothError {
    BoothError::Transport {
        message: format!("malformed response from photo service: {e}"),
        source: Some(Box::new(e)),
    }
}

async fn failure_message(response: reqwest::Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    (status, error_detail(status.as_u16(), &body))
}

#[async_trait]
impl PhotoCloud for CloudPhotoClient {
    async fn upload(&self, upload: &PhotoUpload) -> Result<CloudPhoto, BoothError> {
        let url = self.endpoint(&["api", "photos", "upload", "public", ""])?;
        let response = self
            .client
            .post(url)
            .json(upload)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!(status = %status, "upload response received");
        if !status.is_success() {
            let (status, message) = failure_message(response).await;
            warn!(status = %status, error = %message, "photo upload rejected");
            return Err(BoothError::Upload {
                status: Some(status.as_u16()),
                message,
            });
        }

        let photo = self.read_photo(response).await?;
        info!(id = %photo.id, share_code = %photo.share_code, "photo uploaded");
        Ok(photo)
    }

    async fn fetch_by_share_code(&self, share_code: &str) -> Result<Option<CloudPhoto>, BoothError> {
        let url = self.endpoint(&["api", "photos", share_code])?;
        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        debug!(status = %status, share_code, "lookup response received");
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let (status, message) = failure_message(response).await;
            return Err(BoothError::Server {
                status: status.as_u16(),
                message,
            });
        }

        self.read_photo(response).await.map(Some)
    }

    async fn fetch_all(&self) -> Result<Vec<CloudPhoto>, BoothError> {
        let url = self.endpoint(&["api", "photos"])?;
        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let (status, message) = failure_message(response).await;
            return Err(BoothError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let wire: Vec<WirePhoto> = response.json().await.map_err(malformed)?;
        let now = self.clock.now_millis();
        let photos: Vec<CloudPhoto> = wire.into_iter().map(|w| w.into_cloud_photo(now)).collect();
        debug!(count = photos.len(), "fetched cloud photos");
        Ok(photos)
    }

    async fn delete(&self, id: &str) -> bool {
        let url = match self.endpoint(&["api", "photos", id]) {
            Ok(url) => url,
            Err(e) => {
                warn!(id, error = %e, "cannot build delete URL");
                return false;
            }
        };
        match self.client.delete(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    info!(id, "cloud photo deleted");
                } else {
                    debug!(id, status = %status, "cloud delete refused");
                }
                status.is_success()
            }
            Err(e) => {
                warn!(id, error = %e, "cloud delete failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_core::{PhotoDraft, PhotoImages};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> CloudPhotoClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            auth_token: None,
            timeout_secs: 5,
        };
        CloudPhotoClient::new(&config).unwrap()
    }

    fn test_upload() -> PhotoUpload {
        PhotoDraft::new(PhotoImages::inline(
            "data:image/png;base64,AAA",
            "data:image/png;base64,BBB",
        ))
        .with_background("bg1", "Sunset")
        .with_prompt("smile")
        .to_upload()
        .unwrap()
    }

    fn photo_json(id: &str, code: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "originalImageUrl": format!("https://cdn.test/{id}_original.jpg"),
            "processedImageUrl": format!("https://cdn.test/{id}_processed.jpg"),
            "backgroundId": "bg1",
            "backgroundName": "Sunset",
            "shareCode": code,
            "createdAt": 1_700_000_000_000_i64,
            "prompt": "smile"
        })
    }

    #[test]
    fn endpoint_keeps_base_path_and_trailing_slash() {
        let client = test_client("http://localhost:3001/backend/");
        let url = client
            .endpoint(&["api", "photos", "upload", "public", ""])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/backend/api/photos/upload/public/");
    }

    #[test]
    fn endpoint_escapes_segments() {
        let client = test_client("http://localhost:3001");
        let url = client.endpoint(&["api", "photos", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/photos/a%2Fb%20c");
    }

    #[test]
    fn remote_base_is_upgraded() {
        let client = test_client("http://photos.example.com");
        assert_eq!(client.base_url().scheme(), "https");
    }

    #[tokio::test]
    async fn upload_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/photos/upload/public/"))
            .and(body_partial_json(serde_json::json!({
                "originalImageBase64": "data:image/png;base64,AAA",
                "processedImageBase64": "data:image/png;base64,BBB",
                "backgroundId": "bg1",
                "backgroundName": "Sunset",
                "prompt": "smile"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(photo_json("c1", "QWE123")))
            .expect(1)
            .mount(&server)
            .await;

        let photo = test_client(&server.uri()).upload(&test_upload()).await.unwrap();
        assert_eq!(photo.id, "c1");
        assert_eq!(photo.share_code, "QWE123");
        assert_eq!(photo.created_at, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn upload_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(201).set_body_json(photo_json("c2", "ASD456")))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiConfig {
            base_url: server.uri(),
            auth_token: Some("s3cret".into()),
            timeout_secs: 5,
        };
        let client = CloudPhotoClient::new(&config).unwrap();
        assert!(client.upload(&test_upload()).await.is_ok());
    }

    #[tokio::test]
    async fn upload_error_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "Failed to upload photo"})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .upload(&test_upload())
            .await
            .unwrap_err();
        match err {
            BoothError::Upload { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "Failed to upload photo");
            }
            other => panic!("expected Upload error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upload_with_garbage_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .upload(&test_upload())
            .await
            .unwrap_err();
        assert!(matches!(err, BoothError::Transport { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn fetch_by_share_code_found_and_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/photos/QWE123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(photo_json("c1", "QWE123")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/photos/ZZZZZZ"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Photo not found"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let found = client.fetch_by_share_code("QWE123").await.unwrap().unwrap();
        assert_eq!(found.background_name, "Sunset");
        assert!(client.fetch_by_share_code("ZZZZZZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_by_share_code_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .fetch_by_share_code("QWE123")
            .await
            .unwrap_err();
        match err {
            BoothError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "500: boom");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_all_normalizes_every_record() {
        let server = MockServer::start().await;
        let mut second = photo_json("c2", "ASD456");
        second["createdAt"] = serde_json::json!("1690000000000");
        Mock::given(method("GET"))
            .and(path("/api/photos"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([photo_json("c1", "QWE123"), second])),
            )
            .mount(&server)
            .await;

        let photos = test_client(&server.uri()).fetch_all().await.unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[1].created_at, 1_690_000_000_000);
    }

    #[tokio::test]
    async fn fetch_all_fails_on_non_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).fetch_all().await.unwrap_err();
        assert!(matches!(err, BoothError::Server { status: 503, .. }));
    }

    #[tokio::test]
    async fn delete_reports_status_without_failing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/photos/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/photos/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.delete("c1").await);
        assert!(!client.delete("gone").await);
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        // Nothing listens on the discard port.
        let client = test_client("http://127.0.0.1:9");
        let err = client.fetch_all().await.unwrap_err();
        assert!(err.is_remote());
        assert!(matches!(err, BoothError::Transport { .. }));
        assert!(!client.delete("c1").await);
    }
}
