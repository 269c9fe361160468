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

use super::MultipartCopy;
use crate::s3::error::{Error, PartFailure};
use crate::s3::logger::LogRecord;
use crate::s3::types::{
    ObjectLocation, PartitionRange, UploadPartCopyArgs, UploadPartCopyResponse, UploadSession,
};
use crate::s3::utils::encode_copy_source;
use futures_util::stream::{self, StreamExt};
use std::num::NonZeroUsize;

impl MultipartCopy<'_> {
    async fn copy_part(
        &self,
        session: &UploadSession,
        copy_source: &str,
        range: PartitionRange,
    ) -> Result<UploadPartCopyResponse, PartFailure> {
        let args = UploadPartCopyArgs {
            destination: session.destination.clone(),
            upload_id: session.upload_id.clone(),
            part_number: range.part_number,
            copy_source: copy_source.to_owned(),
            copy_source_range: range.to_range_value(),
        };

        match self.store.upload_part_copy(args).await {
            Ok(resp) => {
                self.logger.info(
                    &LogRecord::new(format!("CopyPart {} succeeded", range.part_number))
                        .context(self.context)
                        .upload_id(&session.upload_id)
                        .part_number(range.part_number)
                        .details(&resp),
                );
                Ok(resp)
            }
            Err(e) => {
                self.logger.error(
                    &LogRecord::new(format!("CopyPart {} failed", range.part_number))
                        .context(self.context)
                        .upload_id(&session.upload_id)
                        .part_number(range.part_number)
                        .error(&e),
                );
                Err(PartFailure {
                    part_number: range.part_number,
                    source: e,
                })
            }
        }
    }

    /// Copies every partition under `session` and returns the responses in
    /// partition order.
    ///
    /// At most `max_concurrent` copies are in flight, all of them when
    /// `None`. A failed part does not stop its siblings: every copy settles
    /// before the failures are reported together as [`Error::PartCopyFailed`].
    pub(crate) async fn copy_parts(
        &self,
        session: &UploadSession,
        source: &ObjectLocation,
        partitions: &[PartitionRange],
        max_concurrent: Option<NonZeroUsize>,
    ) -> Result<Vec<UploadPartCopyResponse>, Error> {
        let copy_source = encode_copy_source(source);
        let limit = max_concurrent
            .map_or(partitions.len(), NonZeroUsize::get)
            .max(1);

        // `buffered` yields in submission order regardless of completion order.
        let results: Vec<Result<UploadPartCopyResponse, PartFailure>> = stream::iter(
            partitions
                .iter()
                .copied()
                .map(|range| self.copy_part(session, &copy_source, range)),
        )
        .buffered(limit)
        .collect()
        .await;

        let mut responses = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(resp) => responses.push(resp),
                Err(failure) => failures.push(failure),
            }
        }

        if !failures.is_empty() {
            return Err(Error::PartCopyFailed {
                upload_id: session.upload_id.clone(),
                failures,
            });
        }

        self.logger.info(
            &LogRecord::new("copied all parts successfully")
                .context(self.context)
                .upload_id(&session.upload_id)
                .details(&responses),
        );

        Ok(responses)
    }
}
