#[cfg(feature = "server")]
pub mod s3;

use async_trait::async_trait;
use std::{
  fmt::{Debug, Display, Formatter},
  time::Duration,
};

/// Credential-signing and metadata facade over the backing object store.
///
/// One instance is built at process start and injected into the gateway
/// handler, so tests can substitute a fake without patching global state.
#[async_trait]
pub trait ObjectStore: Send + Sync {
  /// Produces a capability URL valid for a single PUT of `key` within the
  /// expiry window. When `content_type` is set, the client's PUT must carry
  /// the same content type for the signature to match.
  fn sign_put(
    &self,
    bucket: &str,
    key: &str,
    expires_in: Duration,
    content_type: Option<&str>,
  ) -> Result<String, StoreError>;

  /// Produces a capability URL valid for GETs of `key` within the expiry
  /// window.
  fn sign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String, StoreError>;

  /// Metadata-only existence probe, no content retrieval.
  async fn head(&self, bucket: &str, key: &str) -> Result<(), StoreError>;
}

pub enum StoreError {
  /// The probed object does not exist.
  NotFound,
  /// The signing facility rejected the request.
  SignatureError(String),
  /// Any other store-side failure.
  RequestError(String),
}

impl Debug for StoreError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreError::NotFound => write!(f, "Object not found"),
      StoreError::SignatureError(error) => write!(f, "Signature: {:?}", error),
      StoreError::RequestError(error) => write!(f, "Store request: {:?}", error),
    }
  }
}

impl Display for StoreError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self)
  }
}

impl std::error::Error for StoreError {}
