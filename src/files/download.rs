use crate::{
  gateway::{GatewayHandler, GatewayRequest},
  to_transport_reply,
};
use std::{collections::HashMap, sync::Arc};
use warp::{Filter, Rejection, Reply};

/// Redirect to a pre-signed download URL
#[utoipa::path(
  get,
  path = "/files/{key}",
  tag = "Files",
  responses(
    (status = 307, description = "Redirect to pre-signed URL for downloading the object"),
    (status = 404, description = "File not found"),
  ),
  params(
    ("key" = String, Path, description = "Key of the object to download")
  ),
)]
pub(crate) fn route(
  handler: &Arc<GatewayHandler>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
  let handler = handler.clone();

  warp::path!("files" / String)
    .and(warp::get())
    .and(warp::any().map(move || handler.clone()))
    .and_then(|key: String, handler: Arc<GatewayHandler>| async move {
      let mut path_parameters = HashMap::new();
      path_parameters.insert("key".to_string(), key);

      let request = GatewayRequest {
        http_method: Some("GET".to_string()),
        body: None,
        path_parameters,
      };

      to_transport_reply(&handler.handle(request).await)
    })
}
