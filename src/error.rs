use std::fmt::{Debug, Display, Formatter};
use warp::reject::Reject;

pub enum Error {
  HttpError(warp::http::Error),
}

impl Debug for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::HttpError(error) => {
        write!(f, "HTTP: {:?}", error)
      }
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self)
  }
}

impl std::error::Error for Error {}

impl Reject for Error {}
