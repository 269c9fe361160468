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

//! Multipart copy of a single large object.
//!
//! A copy runs as:
//!
//! 1. validate the request and plan the partitions;
//! 2. open a multipart session on the destination;
//! 3. copy every partition concurrently and wait for all of them;
//! 4. complete the session with the ordered part manifest.
//!
//! When step 3 or 4 fails or outlives the request deadline, the session is
//! aborted and checked for leftover parts; the result of that cleanup is
//! what the caller receives.

mod abort;
mod complete;
mod initiate;
mod part_copy;
mod partition;

pub use complete::prepare_completion_manifest;
pub use partition::*;

use crate::s3::error::Error;
use crate::s3::logger::{CopyLogger, LogRecord};
use crate::s3::types::{
    CompleteMultipartUploadResponse, CopyRequest, MultipartStore, PartitionRange, UploadSession,
};
use crate::s3::utils::{check_bucket_name, check_object_name};
use serde_json::Value;
use std::future::Future;
use std::num::NonZeroUsize;
use tokio::time::Instant;

/// Maximum object size accepted by the store.
pub const MAX_OBJECT_SIZE: u64 = 1024 * MAX_PART_SIZE; // 5 TiB

/// Canned ACL applied when the request sets none.
pub const DEFAULT_COPIED_OBJECT_PERMISSIONS: &str = "private";

/// Tunables of a [`MultipartCopyClient`](crate::s3::client::MultipartCopyClient).
#[derive(Clone, Debug)]
pub struct CopySettings {
    pub default_part_size: u64,
    pub min_part_size: u64,
    pub max_concurrent_parts: Option<NonZeroUsize>,
    pub default_acl: String,
}

impl Default for CopySettings {
    fn default() -> Self {
        Self {
            default_part_size: DEFAULT_COPY_PART_SIZE,
            min_part_size: MIN_PART_SIZE,
            max_concurrent_parts: None,
            default_acl: DEFAULT_COPIED_OBJECT_PERMISSIONS.to_owned(),
        }
    }
}

/// Checks the request against the store limits and returns its partitions.
pub fn validate_request(
    request: &CopyRequest,
    settings: &CopySettings,
) -> Result<Vec<PartitionRange>, Error> {
    check_bucket_name(&request.source.bucket, false)?;
    check_object_name(&request.source.object)?;
    check_bucket_name(&request.destination.bucket, false)?;
    check_object_name(&request.destination.object)?;

    if request.object_size > MAX_OBJECT_SIZE {
        return Err(Error::InvalidArgument(format!(
            "object size {} is not supported; maximum allowed 5TiB",
            request.object_size
        )));
    }

    let part_size = request.part_size.unwrap_or(settings.default_part_size);
    if part_size > MAX_PART_SIZE {
        return Err(Error::InvalidArgument(format!(
            "part size {part_size} is not supported; maximum allowed 5GiB"
        )));
    }

    let partitions = calculate_partitions(request.object_size, part_size, settings.min_part_size)?;
    if let Some(r) = partitions.iter().find(|r| r.len() > MAX_PART_SIZE) {
        return Err(Error::InvalidArgument(format!(
            "part {} would be {} bytes; maximum allowed 5GiB",
            r.part_number,
            r.len()
        )));
    }

    Ok(partitions)
}

/// One multipart copy run: the collaborators plus the request context that
/// every log record carries.
pub(crate) struct MultipartCopy<'a> {
    store: &'a dyn MultipartStore,
    logger: &'a dyn CopyLogger,
    context: Option<&'a Value>,
}

impl<'a> MultipartCopy<'a> {
    pub(crate) fn new(
        store: &'a dyn MultipartStore,
        logger: &'a dyn CopyLogger,
        context: Option<&'a Value>,
    ) -> Self {
        Self {
            store,
            logger,
            context,
        }
    }

    pub(crate) async fn run(
        self,
        request: &CopyRequest,
        settings: &CopySettings,
    ) -> Result<CompleteMultipartUploadResponse, Error> {
        let deadline = request.deadline.map(|budget| Instant::now() + budget);
        let partitions = validate_request(request, settings)?;

        let session = self
            .initiate(
                &request.destination,
                &request.directives,
                &settings.default_acl,
            )
            .await?;

        let copy_parts = self.copy_parts(
            &session,
            &request.source,
            &partitions,
            settings.max_concurrent_parts,
        );
        let results = match self.until(deadline, &session, copy_parts).await {
            Ok(v) => v,
            Err(e) => return Err(self.abort(session, e).await),
        };

        let manifest = prepare_completion_manifest(&results);
        let complete = self.complete(&session, manifest);
        match self.until(deadline, &session, complete).await {
            Ok(v) => Ok(v),
            Err(e) => Err(self.abort(session, e).await),
        }
    }

    /// Runs `fut` to completion, or until `deadline` when one is set.
    async fn until<T, F>(
        &self,
        deadline: Option<Instant>,
        session: &UploadSession,
        fut: F,
    ) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        let Some(deadline) = deadline else {
            return fut.await;
        };

        match tokio::time::timeout_at(deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                self.logger.error(
                    &LogRecord::new("multipart copy deadline exceeded")
                        .context(self.context)
                        .upload_id(&session.upload_id),
                );
                Err(Error::DeadlineExceeded {
                    upload_id: session.upload_id.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::error::ErrorKind;
    use crate::s3::types::ObjectLocation;

    fn request(object_size: u64, part_size: Option<u64>) -> CopyRequest {
        let builder = CopyRequest::builder()
            .source(ObjectLocation::new("source_bucket", "object_key"))
            .destination(ObjectLocation::new("destination_bucket", "copied_object_name"))
            .object_size(object_size);
        match part_size {
            Some(v) => builder.part_size(v).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn test_validate_uses_default_part_size() {
        let partitions = validate_request(&request(100_000_000, None), &CopySettings::default()).unwrap();
        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[1].to_range_value(), "bytes=50000000-99999999");
    }

    #[test]
    fn test_validate_rejects_bad_requests() {
        let settings = CopySettings::default();

        let err = validate_request(&request(0, None), &settings).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = validate_request(&request(10, Some(0)), &settings).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = validate_request(&request(MAX_OBJECT_SIZE + 1, None), &settings).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = validate_request(&request(10, Some(MAX_PART_SIZE + 1)), &settings).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut req = request(10, None);
        req.destination.object = String::new();
        let err = validate_request(&req, &settings).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut req = request(10, None);
        req.source.bucket = "a".into();
        let err = validate_request(&req, &settings).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_validate_rejects_oversized_merged_part() {
        // the 1 byte remainder is merged into a part that is already 5GiB
        let err = validate_request(
            &request(2 * MAX_PART_SIZE + 1, Some(MAX_PART_SIZE)),
            &CopySettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
