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
use crate::s3::types::{
    CompleteMultipartUploadArgs, CompleteMultipartUploadResponse, CompletionManifest, Part,
    UploadPartCopyResponse, UploadSession,
};

/// Builds the completion manifest from part copy responses given in
/// submission order. Part numbers are assigned from the position in
/// `results`, never from anything the store echoed back.
pub fn prepare_completion_manifest(results: &[UploadPartCopyResponse]) -> CompletionManifest {
    CompletionManifest::new(
        results
            .iter()
            .enumerate()
            .map(|(index, resp)| Part {
                number: (index + 1) as u16,
                etag: resp.etag.clone(),
            })
            .collect(),
    )
}

impl MultipartCopy<'_> {
    pub(crate) async fn complete(
        &self,
        session: &UploadSession,
        manifest: CompletionManifest,
    ) -> Result<CompleteMultipartUploadResponse, Error> {
        let args = CompleteMultipartUploadArgs {
            destination: session.destination.clone(),
            upload_id: session.upload_id.clone(),
            manifest,
        };

        match self.store.complete_multipart_upload(args).await {
            Ok(resp) => {
                self.logger.info(
                    &LogRecord::new("multipart copy completed successfully")
                        .context(self.context)
                        .upload_id(&session.upload_id)
                        .details(&resp),
                );
                Ok(resp)
            }
            Err(e) => {
                self.logger.error(
                    &LogRecord::new("multipart copy failed to complete")
                        .context(self.context)
                        .upload_id(&session.upload_id)
                        .error(&e),
                );
                Err(Error::CompletionFailed {
                    upload_id: session.upload_id.clone(),
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resp(etag: &str) -> UploadPartCopyResponse {
        UploadPartCopyResponse {
            etag: etag.into(),
            last_modified: Some("2024-01-01T00:00:00.000Z".into()),
        }
    }

    #[test]
    fn test_manifest_numbers_follow_submission_order() {
        let manifest = prepare_completion_manifest(&[resp("c"), resp("a"), resp("b")]);
        assert_eq!(
            manifest.parts(),
            &[
                Part {
                    number: 1,
                    etag: "c".into()
                },
                Part {
                    number: 2,
                    etag: "a".into()
                },
                Part {
                    number: 3,
                    etag: "b".into()
                },
            ]
        );
    }

    #[test]
    fn test_manifest_strips_extra_fields() {
        let manifest = prepare_completion_manifest(&[resp("1a1b2s3d2f1e2g3sfsgdsg")]);
        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            serde_json::json!([{"number": 1, "etag": "1a1b2s3d2f1e2g3sfsgdsg"}])
        );
    }

    #[test]
    fn test_manifest_empty() {
        assert!(prepare_completion_manifest(&[]).is_empty());
    }
}
