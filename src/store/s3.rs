use crate::{
  s3_configuration::S3Configuration,
  store::{ObjectStore, StoreError},
};
use async_trait::async_trait;
use rusoto_core::RusotoError;
use rusoto_credential::AwsCredentials;
use rusoto_s3::{
  util::{PreSignedRequest, PreSignedRequestOption},
  GetObjectRequest, HeadObjectError, HeadObjectRequest, PutObjectRequest, S3Client, S3,
};
use std::{convert::TryFrom, time::Duration};

/// S3-backed store collaborator. Pre-signed URLs are computed locally from the
/// static credentials; only the existence probe performs a network round-trip.
pub struct S3ObjectStore {
  s3_configuration: S3Configuration,
  client: S3Client,
}

impl S3ObjectStore {
  pub fn new(s3_configuration: &S3Configuration) -> Result<Self, StoreError> {
    let client = S3Client::try_from(s3_configuration)
      .map_err(|error| StoreError::RequestError(format!("Cannot create S3 client: {:?}", error)))?;

    Ok(Self {
      s3_configuration: s3_configuration.clone(),
      client,
    })
  }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
  fn sign_put(
    &self,
    bucket: &str,
    key: &str,
    expires_in: Duration,
    content_type: Option<&str>,
  ) -> Result<String, StoreError> {
    let credentials = AwsCredentials::from(&self.s3_configuration);

    let put_object = PutObjectRequest {
      bucket: bucket.to_string(),
      key: key.to_string(),
      content_type: content_type.map(String::from),
      ..Default::default()
    };

    let presigned_url = put_object.get_presigned_url(
      self.s3_configuration.region(),
      &credentials,
      &PreSignedRequestOption { expires_in },
    );

    Ok(presigned_url)
  }

  fn sign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String, StoreError> {
    let credentials = AwsCredentials::from(&self.s3_configuration);

    let get_object = GetObjectRequest {
      bucket: bucket.to_string(),
      key: key.to_string(),
      ..Default::default()
    };

    let presigned_url = get_object.get_presigned_url(
      self.s3_configuration.region(),
      &credentials,
      &PreSignedRequestOption { expires_in },
    );

    Ok(presigned_url)
  }

  async fn head(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
    let request = HeadObjectRequest {
      bucket: bucket.to_string(),
      key: key.to_string(),
      ..Default::default()
    };

    match self.client.head_object(request).await {
      Ok(_output) => Ok(()),
      Err(RusotoError::Service(HeadObjectError::NoSuchKey(_))) => Err(StoreError::NotFound),
      // S3 answers HEAD on a missing key with a bare 404, which rusoto
      // surfaces as an unknown response rather than a service error.
      Err(RusotoError::Unknown(response)) if response.status.as_u16() == 404 => {
        Err(StoreError::NotFound)
      }
      Err(error) => Err(StoreError::RequestError(error.to_string())),
    }
  }
}
