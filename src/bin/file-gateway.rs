use clap::Parser;
use file_gateway::{gateway::GatewayHandler, S3Configuration, S3ObjectStore};
use rusoto_signature::Region;
use serde_json::json;
use simple_logger::SimpleLogger;
use std::{convert::Infallible, str::FromStr, sync::Arc};
use warp::{
  hyper::{header::ACCESS_CONTROL_ALLOW_METHODS, Body, StatusCode},
  Filter, Rejection, Reply,
};

/// File gateway issuing pre-signed upload and download URLs for a private S3 bucket
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
  /// Sets the bucket holding the gateway's files
  #[clap(long, value_parser, name = "bucket-name", env = "BUCKET_NAME")]
  bucket_name: String,

  /// Sets the AWS Access Key ID
  #[clap(
    long,
    value_parser,
    name = "aws-access-key-id",
    env = "AWS_ACCESS_KEY_ID"
  )]
  aws_access_key_id: String,

  /// Sets the AWS Secret Access Key
  #[clap(
    long,
    value_parser,
    name = "aws-secret-access-key",
    env = "AWS_SECRET_ACCESS_KEY"
  )]
  aws_secret_access_key: String,

  /// Sets the AWS Region
  #[clap(
    long,
    value_parser,
    name = "aws-region",
    env = "AWS_REGION",
    default_value = "us-east-1"
  )]
  aws_region: String,

  /// Sets the AWS Hostname (required for non-AWS S3 endpoint)
  #[clap(short, long, value_parser, env = "AWS_HOSTNAME")]
  aws_hostname: Option<String>,

  /// Sets the port number to serve the gateway
  #[clap(short, long, value_parser, env = "PORT", default_value_t = 8000)]
  port: u16,

  /// Sets the level of verbosity
  #[clap(short, long, parse(from_occurrences))]
  verbose: usize,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
  let args = Args::parse();

  let log_level = match args.verbose {
    0 => log::LevelFilter::Error,
    1 => log::LevelFilter::Warn,
    2 => log::LevelFilter::Info,
    3 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  SimpleLogger::new().with_level(log_level).init().unwrap();

  let region = if let Some(aws_hostname) = args.aws_hostname {
    Region::Custom {
      name: args.aws_region,
      endpoint: aws_hostname,
    }
  } else {
    Region::from_str(&args.aws_region)
      .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidInput, error.to_string()))?
  };

  let s3_configuration = S3Configuration::new(
    &args.aws_access_key_id,
    &args.aws_secret_access_key,
    region,
  );

  let store = S3ObjectStore::new(&s3_configuration)
    .map_err(|error| std::io::Error::new(std::io::ErrorKind::Other, error.to_string()))?;

  let handler = Arc::new(GatewayHandler::new(Arc::new(store), args.bucket_name));

  start(handler, args.port).await;

  Ok(())
}

async fn start(handler: Arc<GatewayHandler>, port: u16) {
  let routes = root()
    .or(options())
    .or(file_gateway::routes(&handler))
    .or(doc())
    .recover(handle_rejection);

  warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}

fn root() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
  warp::path::end().and(warp::get()).map(|| {
    format!(
      "File Gateway (version {})\nAPI documentation on: /swagger-ui/",
      env!("CARGO_PKG_VERSION")
    )
  })
}

fn options() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
  warp::options().map(|| {
    file_gateway::request_builder()
      .header(ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS, POST")
      .body(Body::empty())
      .unwrap()
  })
}

fn doc() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
  let open_api_doc = file_gateway::api_doc();

  let api_doc = warp::path("api-doc.json")
    .and(warp::get())
    .map(move || warp::reply::json(&open_api_doc));

  let swagger = file_gateway::swagger_route("swagger-ui", "api-doc.json");

  api_doc.or(swagger)
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
  if err.is_not_found() {
    return Ok(StatusCode::NOT_FOUND.into_response());
  }

  if err.find::<warp::reject::MethodNotAllowed>().is_some() {
    return Ok(
      warp::reply::with_status(
        warp::reply::json(&json!({ "message": "Method not allowed" })),
        StatusCode::METHOD_NOT_ALLOWED,
      )
      .into_response(),
    );
  }

  if let Some(error) = err.find::<file_gateway::Error>() {
    log::error!("{}", error);
  } else {
    log::error!("Unhandled rejection: {:?}", err);
  }
  Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
