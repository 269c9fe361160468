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
use crate::s3::error::Error;
use crate::s3::logger::LogRecord;
use crate::s3::types::{CreateMultipartUploadArgs, ObjectDirectives, ObjectLocation, UploadSession};

impl MultipartCopy<'_> {
    /// Opens the multipart session on the destination object.
    ///
    /// The ACL falls back to `default_acl`; every other directive is passed
    /// on only when set. A failure here needs no cleanup since no session
    /// exists yet.
    pub(crate) async fn initiate(
        &self,
        destination: &ObjectLocation,
        directives: &ObjectDirectives,
        default_acl: &str,
    ) -> Result<UploadSession, Error> {
        let mut directives = directives.clone();
        if directives.acl.is_none() {
            directives.acl = Some(default_acl.to_owned());
        }

        let args = CreateMultipartUploadArgs {
            destination: destination.clone(),
            directives,
        };

        match self.store.create_multipart_upload(args).await {
            Ok(resp) => {
                self.logger.info(
                    &LogRecord::new("multipart copy initiated successfully")
                        .context(self.context)
                        .upload_id(&resp.upload_id)
                        .details(&resp),
                );
                Ok(UploadSession {
                    destination: destination.clone(),
                    upload_id: resp.upload_id,
                })
            }
            Err(e) => {
                self.logger.error(
                    &LogRecord::new("multipart copy failed to initiate")
                        .context(self.context)
                        .error(&e),
                );
                Err(Error::SessionInitiationFailed {
                    destination: destination.clone(),
                    source: e,
                })
            }
        }
    }
}
