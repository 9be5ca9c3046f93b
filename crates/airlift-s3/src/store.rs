// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `S3Store`: the production `ObjectStore` implementation.

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::debug;

use airlift_core::{AirliftError, ObjectHead, ObjectStore};

/// Connection options for [`S3Store::connect`].
///
/// At least one of `region`/`endpoint` must be set; the plan resolution in
/// `airlift-config` enforces this before a store is ever constructed.
#[derive(Debug, Clone, Default)]
pub struct S3Options {
    /// AWS region override.
    pub region: Option<String>,
    /// Endpoint URL override; enables path-style addressing.
    pub endpoint: Option<String>,
    /// Static access key id. The SDK default provider chain is used when
    /// credentials are not supplied here.
    pub access_key_id: Option<String>,
    /// Static secret access key.
    pub secret_access_key: Option<String>,
}

/// Object store gateway backed by the AWS SDK S3 client.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl std::fmt::Debug for S3Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Store").finish_non_exhaustive()
    }
}

impl S3Store {
    /// Build a client from the SDK's shared config plus the given overrides.
    ///
    /// Inherits HTTP client, retry config, and the default credential
    /// provider chain from the SDK config, then applies region, endpoint,
    /// and static-credential overrides on top.
    pub async fn connect(options: S3Options) -> Result<Self, AirliftError> {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        if let Some(region) = options.region {
            builder = builder.region(Region::new(region));
        }

        if let Some(endpoint) = options.endpoint {
            // S3-compatible servers generally do not support virtual-hosted
            // bucket addressing.
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (options.access_key_id, options.secret_access_key)
        {
            builder = builder.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "airlift-config",
            ));
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
        })
    }

    /// Wrap a pre-built client (library embedding, tests).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Convert an SDK timestamp to chrono.
fn to_chrono(dt: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(dt.secs(), dt.subsec_nanos())
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), AirliftError> {
        debug!(bucket, key, bytes = body.len(), "put object");
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(body.to_vec()))
            .send()
            .await
            .map_err(|e| AirliftError::store(format!("failed to put `{key}`"), e))?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, AirliftError> {
        debug!(bucket, key, "get object");
        match self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => {
                let data = output.body.collect().await.map_err(|e| {
                    AirliftError::store(format!("failed to read body of `{key}`"), e)
                })?;
                Ok(Some(data.into_bytes()))
            }
            // NoSuchKey is a valid "absent" state, not an error.
            Err(err) if is_no_such_key(&err) => Ok(None),
            Err(err) => Err(AirliftError::store(format!("failed to get `{key}`"), err)),
        }
    }

    async fn list_objects(
        &self,
        bucket: &str,
        key_prefix: &str,
    ) -> Result<Vec<ObjectHead>, AirliftError> {
        debug!(bucket, key_prefix, "list objects");
        let mut heads = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let request = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(key_prefix)
                .set_continuation_token(continuation.take());

            let output = request.send().await.map_err(|e| {
                AirliftError::store(format!("failed to list `{key_prefix}*`"), e)
            })?;

            for object in output.contents() {
                let Some(key) = object.key() else { continue };
                heads.push(ObjectHead {
                    key: key.to_string(),
                    last_modified: object.last_modified().and_then(to_chrono),
                });
            }

            match output.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(heads)
    }
}

/// True when a get failed because the object does not exist.
fn is_no_such_key(
    err: &aws_sdk_s3::error::SdkError<aws_sdk_s3::operation::get_object::GetObjectError>,
) -> bool {
    err.as_service_error()
        .map(|e| e.is_no_such_key())
        .unwrap_or(false)
}
