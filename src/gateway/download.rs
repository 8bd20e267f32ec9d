use crate::{
  gateway::{GatewayRequest, GatewayResponse, DOWNLOAD_URL_EXPIRATION},
  store::{ObjectStore, StoreError},
};

/// Probes the object's existence, then redirects to a pre-signed GET URL.
/// The probe must complete first since its outcome gates the 404 branch.
pub(crate) async fn handle_download(
  store: &dyn ObjectStore,
  bucket: &str,
  request: &GatewayRequest,
) -> GatewayResponse {
  let key = request
    .path_parameters
    .get("key")
    .map(String::as_str)
    .unwrap_or_default();
  if key.is_empty() {
    return GatewayResponse::message(400, "Missing file key in path");
  }

  match store.head(bucket, key).await {
    Ok(()) => {}
    Err(StoreError::NotFound) => {
      return GatewayResponse::message(404, "File not found");
    }
    Err(error) => {
      log::error!("Error probing object {}: {}", key, error);
      return GatewayResponse::message(500, "Internal server error");
    }
  }

  match store.sign_get(bucket, key, DOWNLOAD_URL_EXPIRATION) {
    Ok(download_url) => {
      log::debug!("Generated download URL for {}", key);
      GatewayResponse::redirect(&download_url)
    }
    Err(error) => {
      log::error!("Error generating download URL: {}", error);
      GatewayResponse::message(500, "Internal server error")
    }
  }
}
