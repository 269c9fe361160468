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

//! Client for multipart copy of large objects

use crate::s3::error::Error;
use crate::s3::logger::{CopyLogger, LogFacade, LogRecord};
use crate::s3::multipart_copy::{CopySettings, MultipartCopy};
use crate::s3::types::{CompleteMultipartUploadResponse, CopyRequest, MultipartStore};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Copies large objects through server-side multipart copy.
///
/// The client is cheap to clone; clones share the store and logger.
///
/// # Examples
///
/// ```no_run
/// use s3_multipart_copy::s3::client::MultipartCopyClientBuilder;
/// use s3_multipart_copy::s3::http_store::HttpStore;
/// use s3_multipart_copy::s3::types::{CopyRequest, ObjectLocation};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = HttpStore::new("http://localhost:9000/")?;
/// let client = MultipartCopyClientBuilder::new()
///     .store(Arc::new(store))
///     .build()?;
///
/// let request = CopyRequest::builder()
///     .source(ObjectLocation::new("source-bucket", "big-object"))
///     .destination(ObjectLocation::new("destination-bucket", "big-object-copy"))
///     .object_size(12_000_000_000)
///     .build();
///
/// let resp = client.copy_object_multipart(&request).await?;
/// println!("copied, etag {}", resp.etag);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MultipartCopyClient {
    store: Arc<dyn MultipartStore>,
    logger: Arc<dyn CopyLogger>,
    settings: CopySettings,
}

impl fmt::Debug for MultipartCopyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartCopyClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl MultipartCopyClient {
    pub fn settings(&self) -> &CopySettings {
        &self.settings
    }

    /// Copies `request.source` to `request.destination` in parts.
    ///
    /// Returns the store's completion response, or an [`Error`]. Once the
    /// multipart session exists, any failure is followed by an abort and the
    /// error returned is the outcome of that abort; the failure that caused
    /// it is available through [`Error::root_cause`].
    pub async fn copy_object_multipart(
        &self,
        request: &CopyRequest,
    ) -> Result<CompleteMultipartUploadResponse, Error> {
        MultipartCopy::new(
            self.store.as_ref(),
            self.logger.as_ref(),
            request.context.as_ref(),
        )
        .run(request, &self.settings)
        .await
    }
}

/// Builder for [`MultipartCopyClient`].
#[derive(Default)]
pub struct MultipartCopyClientBuilder {
    store: Option<Arc<dyn MultipartStore>>,
    logger: Option<Arc<dyn CopyLogger>>,
    settings: CopySettings,
}

impl MultipartCopyClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the object store the copies run against. Required.
    pub fn store(mut self, store: Arc<dyn MultipartStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the structured logger. If not set, records go to the `log` facade.
    pub fn logger(mut self, logger: Arc<dyn CopyLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Part size used for requests that do not set one.
    pub fn default_part_size(mut self, part_size: u64) -> Self {
        self.settings.default_part_size = part_size;
        self
    }

    /// Smallest part the store accepts; shorter trailing remainders are merged
    /// into the previous part.
    pub fn min_part_size(mut self, min_part_size: u64) -> Self {
        self.settings.min_part_size = min_part_size;
        self
    }

    /// Limit the number of part copies in flight. If not set, all parts of a
    /// copy are started at once.
    pub fn max_concurrent_parts(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.settings.max_concurrent_parts = limit;
        self
    }

    /// Canned ACL for copies whose request sets none.
    pub fn default_acl<S: Into<String>>(mut self, acl: S) -> Self {
        self.settings.default_acl = acl.into();
        self
    }

    pub fn build(self) -> Result<MultipartCopyClient, Error> {
        let store = self.store.ok_or_else(|| {
            Error::InvalidCollaborator("no object store provided".into())
        })?;
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(LogFacade) as Arc<dyn CopyLogger>);

        if self.settings.default_part_size == 0 {
            return Err(Error::InvalidCollaborator(
                "default part size must be greater than zero".into(),
            ));
        }
        if self.settings.min_part_size == 0 {
            return Err(Error::InvalidCollaborator(
                "minimum part size must be greater than zero".into(),
            ));
        }
        if self.settings.default_acl.trim().is_empty() {
            return Err(Error::InvalidCollaborator(
                "default ACL cannot be empty".into(),
            ));
        }

        logger.info(&LogRecord::new("S3 client initialized successfully"));

        Ok(MultipartCopyClient {
            store,
            logger,
            settings: self.settings,
        })
    }
}
