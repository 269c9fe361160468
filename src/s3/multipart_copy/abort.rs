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
use crate::s3::error::{Error, StoreError};
use crate::s3::logger::LogRecord;
use crate::s3::types::{AbortMultipartUploadArgs, ListPartsResponse, UploadSession};

impl MultipartCopy<'_> {
    /// Aborts `session` after `cause` and verifies that no parts remain.
    ///
    /// The returned error is always a cleanup outcome carrying `cause`:
    /// * [`Error::AbortRequestFailed`] when the abort request, or the
    ///   list-parts check after it, fails;
    /// * [`Error::AbortIncomplete`] when parts are still listed after a
    ///   successful abort;
    /// * [`Error::MultipartCopyAborted`] when the session was cleaned up.
    pub(crate) async fn abort(&self, session: UploadSession, cause: Error) -> Error {
        self.logger.error(
            &LogRecord::new("aborting multipart copy")
                .context(self.context)
                .upload_id(&session.upload_id)
                .error(&cause),
        );

        let args = AbortMultipartUploadArgs {
            destination: session.destination.clone(),
            upload_id: session.upload_id.clone(),
        };

        if let Err(e) = self.store.abort_multipart_upload(args.clone()).await {
            return self.abort_failed(session, cause, e);
        }

        let parts_list = match self.store.list_parts(args).await {
            Ok(v) => v,
            // The store already released the upload, so nothing is left behind.
            Err(e) if e.is_no_such_upload() => ListPartsResponse {
                bucket: session.destination.bucket.clone(),
                object: session.destination.object.clone(),
                upload_id: session.upload_id.clone(),
                ..Default::default()
            },
            Err(e) => return self.abort_failed(session, cause, e),
        };

        if !parts_list.parts.is_empty() {
            self.logger.error(
                &LogRecord::new("abort multipart copy failed, copy parts were not removed")
                    .context(self.context)
                    .upload_id(&session.upload_id)
                    .details(&parts_list),
            );
            return Error::AbortIncomplete {
                session,
                cause: Box::new(cause),
                parts: parts_list.parts,
            };
        }

        self.logger.info(
            &LogRecord::new("multipart copy aborted successfully")
                .context(self.context)
                .upload_id(&session.upload_id)
                .details(&parts_list),
        );
        Error::MultipartCopyAborted {
            session,
            cause: Box::new(cause),
        }
    }

    fn abort_failed(&self, session: UploadSession, cause: Error, source: StoreError) -> Error {
        self.logger.error(
            &LogRecord::new("abort multipart copy failed")
                .context(self.context)
                .upload_id(&session.upload_id)
                .error(&source),
        );
        Error::AbortRequestFailed {
            session,
            cause: Box::new(cause),
            source,
        }
    }
}
