// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Various types for multipart copy API requests and responses

use crate::s3::error::StoreError;
use crate::s3::utils::UtcTime;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Bucket and key of an object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub object: String,
}

impl ObjectLocation {
    pub fn new<S1: Into<String>, S2: Into<String>>(bucket: S1, object: S2) -> Self {
        Self {
            bucket: bucket.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.object)
    }
}

/// Object level directives applied to the copied object when the multipart
/// session is created. Only the fields that are set are sent to the store.
#[derive(Clone, Debug, Default, PartialEq, TypedBuilder, Serialize)]
pub struct ObjectDirectives {
    /// Canned ACL, e.g. `private` or `public-read`.
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<UtcTime>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_disposition: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_language: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    /// User metadata, sent as `x-amz-meta-*` headers.
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<BTreeMap<String, String>>,
}

/// Argument for [copy_object_multipart()](crate::s3::client::MultipartCopyClient::copy_object_multipart)
///
/// # Examples
///
/// ```
/// use s3_multipart_copy::s3::types::{CopyRequest, ObjectDirectives, ObjectLocation};
///
/// let request = CopyRequest::builder()
///     .source(ObjectLocation::new("source-bucket", "videos/raw.mp4"))
///     .destination(ObjectLocation::new("archive-bucket", "videos/raw.mp4"))
///     .object_size(70_000_000)
///     .part_size(50_000_000)
///     .directives(ObjectDirectives::builder().content_type("video/mp4").build())
///     .context(serde_json::json!({"request_id": "abc"}))
///     .build();
/// assert_eq!(request.part_size, Some(50_000_000));
/// ```
#[derive(Clone, Debug, TypedBuilder, Serialize)]
pub struct CopyRequest {
    pub source: ObjectLocation,
    pub destination: ObjectLocation,
    /// Total size of the source object in bytes.
    pub object_size: u64,
    /// Desired part size; the client's default part size is used when absent.
    #[builder(default, setter(strip_option))]
    pub part_size: Option<u64>,
    #[builder(default)]
    pub directives: ObjectDirectives,
    /// Opaque request context, carried into every log record.
    #[builder(default, setter(into, strip_option))]
    pub context: Option<serde_json::Value>,
    /// Time budget for the whole copy, measured from the start of
    /// [copy_object_multipart()](crate::s3::client::MultipartCopyClient::copy_object_multipart).
    ///
    /// Session creation is not bounded, since without an upload ID there is
    /// nothing to clean up. Once the budget runs out, in-flight part copies or
    /// the completion are dropped and the session is aborted with
    /// [`Error::DeadlineExceeded`](crate::s3::error::Error::DeadlineExceeded)
    /// as the cause. Requires a tokio runtime with the time driver enabled.
    #[builder(default, setter(strip_option))]
    pub deadline: Option<Duration>,
}

/// Inclusive byte range of the source object copied as one part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PartitionRange {
    pub part_number: u16,
    pub start: u64,
    pub end: u64,
}

impl PartitionRange {
    /// Number of bytes covered by the range.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value of the `x-amz-copy-source-range` header, `bytes=<start>-<end>`.
    pub fn to_range_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

/// Multipart session opened on the destination object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadSession {
    pub destination: ObjectLocation,
    pub upload_id: String,
}

impl fmt::Display for UploadSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload {} of {}", self.upload_id, self.destination)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Part {
    pub number: u16,
    pub etag: String,
}

/// Ordered part list used to complete a multipart session. Part numbers are
/// always `1..=N` in the order the parts were submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompletionManifest(Vec<Part>);

impl CompletionManifest {
    pub(crate) fn new(parts: Vec<Part>) -> Self {
        CompletionManifest(parts)
    }

    pub fn parts(&self) -> &[Part] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Part reported by [MultipartStore::list_parts].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ListedPart {
    pub number: u16,
    pub etag: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

// region: store arguments and responses

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateMultipartUploadArgs {
    pub destination: ObjectLocation,
    pub directives: ObjectDirectives,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateMultipartUploadResponse {
    pub bucket: String,
    pub object: String,
    pub upload_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadPartCopyArgs {
    pub destination: ObjectLocation,
    pub upload_id: String,
    pub part_number: u16,
    /// Percent-encoded `bucket/key` of the source object.
    pub copy_source: String,
    /// Byte range formatted as `bytes=<start>-<end>`.
    pub copy_source_range: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UploadPartCopyResponse {
    pub etag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompleteMultipartUploadArgs {
    pub destination: ObjectLocation,
    pub upload_id: String,
    pub manifest: CompletionManifest,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompleteMultipartUploadResponse {
    pub bucket: String,
    pub object: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub etag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AbortMultipartUploadArgs {
    pub destination: ObjectLocation,
    pub upload_id: String,
}

pub type ListPartsArgs = AbortMultipartUploadArgs;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ListPartsResponse {
    pub bucket: String,
    pub object: String,
    pub upload_id: String,
    pub is_truncated: bool,
    pub parts: Vec<ListedPart>,
}

// endregion: store arguments and responses

/// Object store operations needed to run a multipart copy.
///
/// Transport concerns (retries, timeouts, authentication) belong to the
/// implementation; every call either returns the parsed store response or a
/// [`StoreError`].
#[async_trait]
pub trait MultipartStore: Send + Sync {
    /// [CreateMultipartUpload](https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateMultipartUpload.html)
    async fn create_multipart_upload(
        &self,
        args: CreateMultipartUploadArgs,
    ) -> Result<CreateMultipartUploadResponse, StoreError>;

    /// [UploadPartCopy](https://docs.aws.amazon.com/AmazonS3/latest/API/API_UploadPartCopy.html)
    async fn upload_part_copy(
        &self,
        args: UploadPartCopyArgs,
    ) -> Result<UploadPartCopyResponse, StoreError>;

    /// [CompleteMultipartUpload](https://docs.aws.amazon.com/AmazonS3/latest/API/API_CompleteMultipartUpload.html)
    async fn complete_multipart_upload(
        &self,
        args: CompleteMultipartUploadArgs,
    ) -> Result<CompleteMultipartUploadResponse, StoreError>;

    /// [AbortMultipartUpload](https://docs.aws.amazon.com/AmazonS3/latest/API/API_AbortMultipartUpload.html)
    async fn abort_multipart_upload(&self, args: AbortMultipartUploadArgs)
    -> Result<(), StoreError>;

    /// [ListParts](https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListParts.html)
    async fn list_parts(&self, args: ListPartsArgs) -> Result<ListPartsResponse, StoreError>;
}
