pub(crate) mod download;
pub(crate) mod upload;

use crate::gateway::GatewayHandler;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

pub(crate) fn routes(
  handler: &Arc<GatewayHandler>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
  upload::route(handler).or(download::route(handler))
}
