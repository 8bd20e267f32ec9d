use crate::{
  gateway::{GatewayHandler, GatewayRequest},
  to_transport_reply,
};
use std::{collections::HashMap, sync::Arc};
use warp::{hyper::body::Bytes, Filter, Rejection, Reply};

/// Issue a pre-signed upload URL
#[utoipa::path(
  post,
  path = "/files",
  tag = "Files",
  request_body(
    content = String,
    description = "JSON object naming the file to upload, e.g. {\"filename\": \"report.pdf\"}",
    content_type = "application/json"
  ),
  responses(
    (status = 200, description = "Pre-signed upload URL", body = UploadUrlResponse),
    (status = 400, description = "Missing filename in request body"),
  ),
)]
pub(crate) fn route(
  handler: &Arc<GatewayHandler>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
  let handler = handler.clone();

  warp::path("files")
    .and(warp::path::end())
    .and(warp::post())
    .and(warp::body::bytes())
    .and(warp::any().map(move || handler.clone()))
    .and_then(|body: Bytes, handler: Arc<GatewayHandler>| async move {
      let request = GatewayRequest {
        http_method: Some("POST".to_string()),
        body: Some(String::from_utf8_lossy(&body).into_owned()),
        path_parameters: HashMap::new(),
      };

      to_transport_reply(&handler.handle(request).await)
    })
}
