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

//! Path-style S3 REST implementation of [`MultipartStore`]

use crate::s3::error::{ErrorResponse, StoreError};
use crate::s3::header_constants::*;
use crate::s3::types::{
    AbortMultipartUploadArgs, CompleteMultipartUploadArgs, CompleteMultipartUploadResponse,
    CreateMultipartUploadArgs, CreateMultipartUploadResponse, ListPartsArgs, ListPartsResponse,
    MultipartStore, ObjectDirectives, ObjectLocation, UploadPartCopyArgs, UploadPartCopyResponse,
};
use crate::s3::utils::{Multimap, merge, to_http_header_value, urlencode, urlencode_object_key};
use crate::s3::xml;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use url::Url;

/// Multipart store talking to an S3 compatible endpoint over HTTP.
///
/// Requests are sent unsigned; when the endpoint sits behind a gateway that
/// expects a token, attach it with [`HttpStore::extra_headers`].
#[derive(Clone, Debug)]
pub struct HttpStore {
    http_client: reqwest::Client,
    base_url: Url,
    extra_headers: Multimap,
}

impl HttpStore {
    /// Returns a store for the given endpoint, e.g. `http://localhost:9000/`.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Other(format!("invalid base url {base_url}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(StoreError::Other(format!(
                "unsupported scheme {} in base url",
                base_url.scheme()
            )));
        }
        if base_url.query().is_some() {
            return Err(StoreError::Other(
                "base url must not contain a query".into(),
            ));
        }

        let mut builder = reqwest::Client::builder()
            .no_gzip()
            .user_agent(format!(
                "s3-multipart-copy ({}; {}) s3-multipart-copy/{}",
                std::env::consts::OS,
                std::env::consts::ARCH,
                env!("CARGO_PKG_VERSION")
            ));

        #[cfg(feature = "http2")]
        {
            builder = builder.http2_adaptive_window(true);
        }

        Ok(HttpStore {
            http_client: builder.build()?,
            base_url,
            extra_headers: Multimap::new(),
        })
    }

    /// Replaces the underlying HTTP client, e.g. to configure timeouts or TLS.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Headers sent with every request.
    pub fn extra_headers(mut self, extra_headers: Multimap) -> Self {
        self.extra_headers = extra_headers;
        self
    }

    fn build_url(&self, location: &ObjectLocation, query: &[(&str, &str)]) -> String {
        let mut url = String::from(self.base_url.as_str().trim_end_matches('/'));
        url.push('/');
        url.push_str(&location.bucket);
        url.push('/');
        url.push_str(&urlencode_object_key(
            location.object.strip_prefix('/').unwrap_or(&location.object),
        ));

        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            if !value.is_empty() {
                url.push('=');
                url.push_str(&urlencode(value));
            }
        }
        url
    }

    async fn execute(
        &self,
        method: Method,
        location: &ObjectLocation,
        query: &[(&str, &str)],
        headers: Multimap,
        body: Option<Bytes>,
    ) -> Result<reqwest::Response, StoreError> {
        let mut all_headers = self.extra_headers.clone();
        merge(&mut all_headers, &headers);

        let mut req = self
            .http_client
            .request(method, self.build_url(location, query));
        for (key, values) in all_headers.iter_all() {
            for value in values {
                req = req.header(key, value);
            }
        }
        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status_code = resp.status().as_u16();
        let body = resp.bytes().await?;
        Err(error_from_body(status_code, body))
    }
}

/// Converts an unsuccessful response into a [`StoreError`], preferring the
/// S3 error document when the body carries one.
fn error_from_body(status_code: u16, mut body: Bytes) -> StoreError {
    if !body.is_empty() {
        let raw = String::from_utf8_lossy(&body).to_string();
        return match ErrorResponse::parse(&mut body) {
            Ok(er) => StoreError::S3Error(er),
            Err(_) => StoreError::InvalidResponse(status_code, raw),
        };
    }
    StoreError::InvalidResponse(status_code, String::new())
}

/// Request headers for the directives that are set.
pub(crate) fn into_headers(directives: &ObjectDirectives) -> Multimap {
    let mut headers = Multimap::new();

    let mut insert = |key: &str, value: &Option<String>| {
        if let Some(v) = value {
            headers.insert(key.to_string(), v.to_string());
        }
    };
    insert(X_AMZ_ACL, &directives.acl);
    insert(CONTENT_TYPE, &directives.content_type);
    insert(CONTENT_DISPOSITION, &directives.content_disposition);
    insert(CONTENT_ENCODING, &directives.content_encoding);
    insert(CONTENT_LANGUAGE, &directives.content_language);
    insert(CACHE_CONTROL, &directives.cache_control);
    insert(
        X_AMZ_SERVER_SIDE_ENCRYPTION,
        &directives.server_side_encryption,
    );
    insert(X_AMZ_STORAGE_CLASS, &directives.storage_class);

    if let Some(expires) = directives.expires {
        headers.insert(EXPIRES.to_string(), to_http_header_value(expires));
    }

    if let Some(user_metadata) = &directives.user_metadata {
        for (key, value) in user_metadata {
            let key = key.to_lowercase();
            let key = match key.starts_with(X_AMZ_META_PREFIX) {
                true => key,
                false => format!("{X_AMZ_META_PREFIX}{key}"),
            };
            headers.insert(key, value.to_string());
        }
    }

    headers
}

#[async_trait]
impl MultipartStore for HttpStore {
    async fn create_multipart_upload(
        &self,
        args: CreateMultipartUploadArgs,
    ) -> Result<CreateMultipartUploadResponse, StoreError> {
        let resp = self
            .execute(
                Method::POST,
                &args.destination,
                &[("uploads", "")],
                into_headers(&args.directives),
                None,
            )
            .await?;
        xml::parse_create_multipart_upload(resp.bytes().await?, &args.destination)
    }

    async fn upload_part_copy(
        &self,
        args: UploadPartCopyArgs,
    ) -> Result<UploadPartCopyResponse, StoreError> {
        let mut headers = Multimap::new();
        headers.insert(X_AMZ_COPY_SOURCE.into(), args.copy_source);
        headers.insert(X_AMZ_COPY_SOURCE_RANGE.into(), args.copy_source_range);

        let part_number = args.part_number.to_string();
        let resp = self
            .execute(
                Method::PUT,
                &args.destination,
                &[("partNumber", &part_number), ("uploadId", &args.upload_id)],
                headers,
                None,
            )
            .await?;
        xml::parse_copy_part_result(resp.bytes().await?)
    }

    async fn complete_multipart_upload(
        &self,
        args: CompleteMultipartUploadArgs,
    ) -> Result<CompleteMultipartUploadResponse, StoreError> {
        let mut headers = Multimap::new();
        headers.insert(CONTENT_TYPE.into(), "application/xml".into());

        let resp = self
            .execute(
                Method::POST,
                &args.destination,
                &[("uploadId", &args.upload_id)],
                headers,
                Some(xml::complete_multipart_upload_body(&args.manifest)),
            )
            .await?;

        let version_id = resp
            .headers()
            .get(X_AMZ_VERSION_ID)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        xml::parse_complete_multipart_upload(resp.bytes().await?, &args.destination, version_id)
    }

    async fn abort_multipart_upload(
        &self,
        args: AbortMultipartUploadArgs,
    ) -> Result<(), StoreError> {
        self.execute(
            Method::DELETE,
            &args.destination,
            &[("uploadId", &args.upload_id)],
            Multimap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    async fn list_parts(&self, args: ListPartsArgs) -> Result<ListPartsResponse, StoreError> {
        let resp = self
            .execute(
                Method::GET,
                &args.destination,
                &[("uploadId", &args.upload_id)],
                Multimap::new(),
                None,
            )
            .await?;
        xml::parse_list_parts(resp.bytes().await?)
    }
}
