pub(crate) mod download;
pub(crate) mod upload;

pub use upload::UploadUrlResponse;

use crate::store::ObjectStore;
use serde::Serialize;
use std::{collections::HashMap, sync::Arc, time::Duration};

/// Expiry window for pre-signed upload URLs.
pub const UPLOAD_URL_EXPIRATION: Duration = Duration::from_secs(5 * 60);

/// Expiry window for pre-signed download URLs. Longer than the upload window
/// since redirects may be followed asynchronously by browsers and CDNs.
pub const DOWNLOAD_URL_EXPIRATION: Duration = Duration::from_secs(60 * 60);

/// Content type pinned into pre-signed PUT URLs, so the client's upload must
/// declare the same type for the signature to match.
pub const DEFAULT_UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Inbound transport record, one per invocation. Never mutated.
#[derive(Debug, Clone, Default)]
pub struct GatewayRequest {
  pub http_method: Option<String>,
  pub body: Option<String>,
  pub path_parameters: HashMap<String, String>,
}

/// Outbound transport record, immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
  pub status_code: u16,
  pub headers: Option<HashMap<String, String>>,
  pub body: String,
}

impl GatewayResponse {
  pub(crate) fn json<T>(status_code: u16, body: &T) -> Self
  where
    T: Serialize + ?Sized,
  {
    match serde_json::to_string(body) {
      Ok(body) => Self {
        status_code,
        headers: None,
        body,
      },
      Err(error) => {
        log::error!("Cannot serialize response body: {}", error);
        Self::message(500, "Internal server error")
      }
    }
  }

  pub(crate) fn message(status_code: u16, message: &str) -> Self {
    Self {
      status_code,
      headers: None,
      body: serde_json::json!({ "message": message }).to_string(),
    }
  }

  pub(crate) fn redirect(location: &str) -> Self {
    let mut headers = HashMap::new();
    headers.insert("Location".to_string(), location.to_string());

    Self {
      status_code: 307,
      headers: Some(headers),
      body: String::new(),
    }
  }
}

/// Stateless entry point of the gateway: validates one request, delegates to
/// the store collaborator and builds exactly one response. Store failures are
/// translated at this boundary; `handle` never fails.
pub struct GatewayHandler {
  store: Arc<dyn ObjectStore>,
  bucket: String,
}

impl GatewayHandler {
  pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
    Self {
      store,
      bucket: bucket.into(),
    }
  }

  pub async fn handle(&self, request: GatewayRequest) -> GatewayResponse {
    match request.http_method.as_deref() {
      None => GatewayResponse::message(400, "Missing httpMethod in event"),
      Some("POST") => upload::handle_upload(self.store.as_ref(), &self.bucket, &request),
      Some("GET") => download::handle_download(self.store.as_ref(), &self.bucket, &request).await,
      Some(_) => GatewayResponse::message(405, "Method not allowed"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::{ObjectStore, StoreError};
  use async_trait::async_trait;
  use std::time::Duration;

  #[derive(Default)]
  struct FakeStore {
    existing_keys: Vec<&'static str>,
    fail_signing: bool,
    fail_head: bool,
  }

  #[async_trait]
  impl ObjectStore for FakeStore {
    fn sign_put(
      &self,
      bucket: &str,
      key: &str,
      expires_in: Duration,
      content_type: Option<&str>,
    ) -> Result<String, StoreError> {
      if self.fail_signing {
        return Err(StoreError::SignatureError("signer unavailable".to_string()));
      }
      Ok(format!(
        "https://s3.example.test/{}/{}?X-Amz-Expires={}&Content-Type={}",
        bucket,
        key,
        expires_in.as_secs(),
        content_type.unwrap_or_default()
      ))
    }

    fn sign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String, StoreError> {
      if self.fail_signing {
        return Err(StoreError::SignatureError("signer unavailable".to_string()));
      }
      Ok(format!(
        "https://s3.example.test/{}/{}?X-Amz-Expires={}",
        bucket,
        key,
        expires_in.as_secs()
      ))
    }

    async fn head(&self, _bucket: &str, key: &str) -> Result<(), StoreError> {
      if self.fail_head {
        return Err(StoreError::RequestError("probe failed".to_string()));
      }
      if self.existing_keys.contains(&key) {
        Ok(())
      } else {
        Err(StoreError::NotFound)
      }
    }
  }

  fn handler(store: FakeStore) -> GatewayHandler {
    GatewayHandler::new(Arc::new(store), "test-bucket")
  }

  fn post(body: &str) -> GatewayRequest {
    GatewayRequest {
      http_method: Some("POST".to_string()),
      body: Some(body.to_string()),
      path_parameters: HashMap::new(),
    }
  }

  fn get(key: &str) -> GatewayRequest {
    let mut path_parameters = HashMap::new();
    path_parameters.insert("key".to_string(), key.to_string());
    GatewayRequest {
      http_method: Some("GET".to_string()),
      body: None,
      path_parameters,
    }
  }

  fn body_json(response: &GatewayResponse) -> serde_json::Value {
    serde_json::from_str(&response.body).expect("response body should be JSON")
  }

  #[tokio::test]
  async fn upload_returns_signed_url() {
    let response = handler(FakeStore::default())
      .handle(post(r#"{"filename": "test.txt"}"#))
      .await;

    assert_eq!(response.status_code, 200);
    let body = body_json(&response);
    assert_eq!(body["filename"], "test.txt");
    assert_eq!(body["expires_in"], 300);
    let upload_url = body["upload_url"].as_str().unwrap();
    assert!(upload_url.contains("test-bucket/test.txt"));
    assert!(upload_url.contains("X-Amz-Expires=300"));
  }

  #[tokio::test]
  async fn upload_pins_default_content_type() {
    let response = handler(FakeStore::default())
      .handle(post(r#"{"filename": "test.txt"}"#))
      .await;

    let body = body_json(&response);
    assert!(body["upload_url"]
      .as_str()
      .unwrap()
      .contains("Content-Type=application/octet-stream"));
  }

  #[tokio::test]
  async fn upload_without_filename_is_rejected() {
    let response = handler(FakeStore::default()).handle(post("{}")).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
      body_json(&response)["message"],
      "Missing filename in request body"
    );
  }

  #[tokio::test]
  async fn upload_with_empty_filename_is_rejected() {
    let response = handler(FakeStore::default())
      .handle(post(r#"{"filename": ""}"#))
      .await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
      body_json(&response)["message"],
      "Missing filename in request body"
    );
  }

  #[tokio::test]
  async fn upload_with_absent_body_is_rejected_as_missing_filename() {
    let request = GatewayRequest {
      http_method: Some("POST".to_string()),
      body: None,
      path_parameters: HashMap::new(),
    };
    let response = handler(FakeStore::default()).handle(request).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
      body_json(&response)["message"],
      "Missing filename in request body"
    );
  }

  #[tokio::test]
  async fn upload_with_malformed_body_is_invalid() {
    let response = handler(FakeStore::default())
      .handle(post("{not json"))
      .await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body_json(&response)["message"], "Invalid request");
  }

  #[tokio::test]
  async fn upload_signing_failure_is_opaque() {
    let store = FakeStore {
      fail_signing: true,
      ..Default::default()
    };
    let response = handler(store)
      .handle(post(r#"{"filename": "test.txt"}"#))
      .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body_json(&response)["message"], "Internal server error");
  }

  #[tokio::test]
  async fn download_redirects_to_signed_url() {
    let store = FakeStore {
      existing_keys: vec!["report.pdf"],
      ..Default::default()
    };
    let response = handler(store).handle(get("report.pdf")).await;

    assert_eq!(response.status_code, 307);
    assert!(response.body.is_empty());
    let location = response
      .headers
      .as_ref()
      .and_then(|headers| headers.get("Location"))
      .expect("redirect should carry a Location header");
    assert!(location.contains("report.pdf"));
    assert!(location.contains("X-Amz-Expires=3600"));
  }

  #[tokio::test]
  async fn download_missing_object_is_not_found() {
    let response = handler(FakeStore::default()).handle(get("missing.txt")).await;

    assert_eq!(response.status_code, 404);
    assert_eq!(body_json(&response)["message"], "File not found");
  }

  #[tokio::test]
  async fn download_without_key_is_rejected() {
    let request = GatewayRequest {
      http_method: Some("GET".to_string()),
      body: None,
      path_parameters: HashMap::new(),
    };
    let response = handler(FakeStore::default()).handle(request).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body_json(&response)["message"], "Missing file key in path");
  }

  #[tokio::test]
  async fn download_probe_failure_is_opaque() {
    let store = FakeStore {
      fail_head: true,
      ..Default::default()
    };
    let response = handler(store).handle(get("report.pdf")).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body_json(&response)["message"], "Internal server error");
  }

  #[tokio::test]
  async fn unsupported_method_is_rejected() {
    let request = GatewayRequest {
      http_method: Some("DELETE".to_string()),
      body: None,
      path_parameters: HashMap::new(),
    };
    let response = handler(FakeStore::default()).handle(request).await;

    assert_eq!(response.status_code, 405);
    assert_eq!(body_json(&response)["message"], "Method not allowed");
  }

  #[tokio::test]
  async fn missing_method_is_rejected() {
    let response = handler(FakeStore::default())
      .handle(GatewayRequest::default())
      .await;

    assert_eq!(response.status_code, 400);
    assert_eq!(
      body_json(&response)["message"],
      "Missing httpMethod in event"
    );
  }

  #[tokio::test]
  async fn identical_requests_yield_identical_responses() {
    let store = FakeStore {
      existing_keys: vec!["report.pdf"],
      ..Default::default()
    };
    let handler = handler(store);

    let first = handler.handle(get("report.pdf")).await;
    let second = handler.handle(get("report.pdf")).await;
    assert_eq!(first, second);

    let first = handler.handle(post(r#"{"filename": "test.txt"}"#)).await;
    let second = handler.handle(post(r#"{"filename": "test.txt"}"#)).await;
    assert_eq!(first, second);
  }
}
