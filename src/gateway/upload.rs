use crate::{
  gateway::{GatewayRequest, GatewayResponse, DEFAULT_UPLOAD_CONTENT_TYPE, UPLOAD_URL_EXPIRATION},
  store::ObjectStore,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UploadUrlResponse {
  pub upload_url: String,
  pub filename: String,
  pub expires_in: u64,
}

/// Issues a pre-signed PUT URL for the filename named in the request body.
pub(crate) fn handle_upload(
  store: &dyn ObjectStore,
  bucket: &str,
  request: &GatewayRequest,
) -> GatewayResponse {
  // An absent or empty body is tolerated and reads as an empty object.
  let raw_body = request.body.as_deref().unwrap_or("");
  let body: serde_json::Value = if raw_body.trim().is_empty() {
    serde_json::Value::Object(serde_json::Map::new())
  } else {
    match serde_json::from_str(raw_body) {
      Ok(body) => body,
      Err(error) => {
        log::debug!("Malformed upload request body: {}", error);
        return GatewayResponse::message(400, "Invalid request");
      }
    }
  };

  let filename = body
    .get("filename")
    .and_then(|value| value.as_str())
    .unwrap_or_default();
  if filename.is_empty() {
    return GatewayResponse::message(400, "Missing filename in request body");
  }

  match store.sign_put(
    bucket,
    filename,
    UPLOAD_URL_EXPIRATION,
    Some(DEFAULT_UPLOAD_CONTENT_TYPE),
  ) {
    Ok(upload_url) => GatewayResponse::json(
      200,
      &UploadUrlResponse {
        upload_url,
        filename: filename.to_string(),
        expires_in: UPLOAD_URL_EXPIRATION.as_secs(),
      },
    ),
    Err(error) => {
      log::error!("Error generating upload URL: {}", error);
      GatewayResponse::message(500, "Internal server error")
    }
  }
}
