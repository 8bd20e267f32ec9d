pub mod gateway;
pub mod store;

#[cfg(feature = "server")]
mod error;
#[cfg(feature = "server")]
mod files;
#[cfg(feature = "server")]
mod open_api;
#[cfg(feature = "server")]
mod s3_configuration;

#[cfg(feature = "server")]
pub use server::*;

#[cfg(feature = "server")]
mod server {
  pub use crate::{
    error::Error, open_api::*, s3_configuration::S3Configuration, store::s3::S3ObjectStore,
  };

  use crate::gateway::{GatewayHandler, GatewayResponse};
  use std::sync::Arc;
  use warp::{
    hyper::{
      header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
      Body, Response,
    },
    Filter, Rejection, Reply,
  };

  pub fn routes(
    handler: &Arc<GatewayHandler>,
  ) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    crate::files::routes(handler)
  }

  pub fn request_builder() -> warp::http::response::Builder {
    warp::hyper::Response::builder()
      .header(ACCESS_CONTROL_ALLOW_HEADERS, "*")
      .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
  }

  /// Renders the handler's transport record verbatim: status, headers, body.
  pub(crate) fn to_transport_reply(
    gateway_response: &GatewayResponse,
  ) -> Result<Response<Body>, Rejection> {
    let mut builder = request_builder().status(gateway_response.status_code);

    if let Some(headers) = &gateway_response.headers {
      for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
      }
    }

    if !gateway_response.body.is_empty() {
      builder = builder.header(CONTENT_TYPE, "application/json");
    }

    builder
      .body(Body::from(gateway_response.body.clone()))
      .map_err(|error| warp::reject::custom(Error::HttpError(error)))
  }
}
