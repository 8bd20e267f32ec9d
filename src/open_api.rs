use std::{str::FromStr, sync::Arc};
use utoipa::OpenApi;
use utoipa_swagger_ui::Config;
use warp::{
  hyper::{header::CONTENT_TYPE, Response, StatusCode, Uri},
  path::{FullPath, Tail},
  Filter, Rejection, Reply,
};

#[derive(OpenApi)]
#[openapi(
  paths(crate::files::upload::route, crate::files::download::route),
  components(schemas(crate::gateway::UploadUrlResponse)),
  tags(
    (name = "Files", description = "Pre-signed file upload and download API")
  )
)]
struct ApiDoc;

pub fn api_doc() -> utoipa::openapi::OpenApi {
  ApiDoc::openapi()
}

pub fn swagger_route(
  path: &str,
  open_api_route: &str,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
  let open_api_route = format!("/{}", open_api_route.trim_start_matches('/'));
  let config = Arc::new(Config::from(open_api_route));

  let path = path
    .trim_start_matches('/')
    .trim_end_matches('/')
    .to_string();

  warp::path(path.clone())
    .and(warp::get())
    .and(warp::path::full())
    .and(warp::path::tail())
    .and(warp::any().map(move || config.clone()))
    .and(warp::any().map(move || path.clone()))
    .and_then(serve_swagger)
}

async fn serve_swagger(
  full_path: FullPath,
  tail: Tail,
  config: Arc<Config<'static>>,
  path: String,
) -> Result<Box<dyn Reply + 'static>, Rejection> {
  let path = format!("/{}/", path);
  if full_path.as_str() == path.trim_end_matches('/') {
    return Ok(Box::new(warp::redirect::found(
      Uri::from_str(&path).unwrap(),
    )));
  }

  let path = tail.as_str();
  match utoipa_swagger_ui::serve(path, config) {
    Ok(file) => {
      if let Some(file) = file {
        Ok(Box::new(
          Response::builder()
            .header(CONTENT_TYPE, file.content_type)
            .body(file.bytes),
        ))
      } else {
        Ok(Box::new(StatusCode::NOT_FOUND))
      }
    }
    Err(error) => Ok(Box::new(
      Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .body(error.to_string()),
    )),
  }
}
