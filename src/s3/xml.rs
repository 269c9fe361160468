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

//! XML documents exchanged with S3 for multipart uploads

use crate::s3::error::{ErrorResponse, StoreError};
use crate::s3::types::{
    CompleteMultipartUploadResponse, CompletionManifest, CreateMultipartUploadResponse,
    ListPartsResponse, ListedPart, ObjectLocation, UploadPartCopyResponse,
};
use crate::s3::utils::{get_default_text, get_option_text, get_text};
use bytes::{Buf, Bytes, BytesMut};
use xmltree::Element;

/// Parses a response body. An `<Error>` document is turned into
/// [`StoreError::S3Error`], since S3 can report failures with a 200 status.
pub(crate) fn parse_document(body: Bytes) -> Result<Element, StoreError> {
    let root = Element::parse(body.reader()).map_err(|e| StoreError::Xml(e.to_string()))?;
    if root.name == "Error" {
        return Err(StoreError::S3Error(ErrorResponse::from_element(&root)?));
    }
    Ok(root)
}

fn trim_etag(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}

pub(crate) fn parse_create_multipart_upload(
    body: Bytes,
    destination: &ObjectLocation,
) -> Result<CreateMultipartUploadResponse, StoreError> {
    let root = parse_document(body)?;

    let upload_id = get_text(&root, "UploadId")?;
    if upload_id.is_empty() {
        return Err(StoreError::Xml("empty <UploadId> in response".into()));
    }

    Ok(CreateMultipartUploadResponse {
        bucket: get_option_text(&root, "Bucket").unwrap_or_else(|| destination.bucket.clone()),
        object: get_option_text(&root, "Key").unwrap_or_else(|| destination.object.clone()),
        upload_id,
    })
}

pub(crate) fn parse_copy_part_result(body: Bytes) -> Result<UploadPartCopyResponse, StoreError> {
    let root = parse_document(body)?;

    Ok(UploadPartCopyResponse {
        etag: trim_etag(&get_text(&root, "ETag")?),
        last_modified: get_option_text(&root, "LastModified"),
    })
}

pub(crate) fn parse_complete_multipart_upload(
    body: Bytes,
    destination: &ObjectLocation,
    version_id: Option<String>,
) -> Result<CompleteMultipartUploadResponse, StoreError> {
    let root = parse_document(body)?;

    Ok(CompleteMultipartUploadResponse {
        bucket: get_option_text(&root, "Bucket").unwrap_or_else(|| destination.bucket.clone()),
        object: get_option_text(&root, "Key").unwrap_or_else(|| destination.object.clone()),
        location: get_option_text(&root, "Location"),
        etag: trim_etag(&get_default_text(&root, "ETag")),
        version_id,
    })
}

pub(crate) fn parse_list_parts(body: Bytes) -> Result<ListPartsResponse, StoreError> {
    let root = parse_document(body)?;

    let mut parts = Vec::new();
    for part in root
        .children
        .iter()
        .filter_map(|node| node.as_element())
        .filter(|e| e.name == "Part")
    {
        let number = get_text(part, "PartNumber")?
            .parse::<u16>()
            .map_err(|e| StoreError::Xml(format!("invalid <PartNumber>: {e}")))?;
        let size = match get_option_text(part, "Size") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|e| StoreError::Xml(format!("invalid <Size>: {e}")))?,
            None => 0,
        };
        parts.push(ListedPart {
            number,
            etag: trim_etag(&get_default_text(part, "ETag")),
            size,
            last_modified: get_option_text(part, "LastModified"),
        });
    }

    Ok(ListPartsResponse {
        bucket: get_default_text(&root, "Bucket"),
        object: get_default_text(&root, "Key"),
        upload_id: get_default_text(&root, "UploadId"),
        is_truncated: get_default_text(&root, "IsTruncated").eq_ignore_ascii_case("true"),
        parts,
    })
}

/// Builds the `<CompleteMultipartUpload>` request body.
pub(crate) fn complete_multipart_upload_body(manifest: &CompletionManifest) -> Bytes {
    // Set capacity of the byte-buffer based on the part count - attempting
    // to avoid extra allocations when building the XML payload.
    let mut data = BytesMut::with_capacity(100 * manifest.len() + 100);
    data.extend_from_slice(b"<CompleteMultipartUpload>");
    for part in manifest.parts() {
        data.extend_from_slice(b"<Part><PartNumber>");
        data.extend_from_slice(part.number.to_string().as_bytes());
        data.extend_from_slice(b"</PartNumber><ETag>");
        data.extend_from_slice(part.etag.as_bytes());
        data.extend_from_slice(b"</ETag></Part>");
    }
    data.extend_from_slice(b"</CompleteMultipartUpload>");
    data.freeze()
}
