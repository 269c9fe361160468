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

//! # S3 multipart copy (`s3-multipart-copy`)
//!
//! Server-side copy of large objects between locations of an Amazon S3
//! compatible store, using the multipart upload API: the object is split into
//! byte ranges, every range is copied concurrently with `UploadPartCopy`, and
//! the upload is completed with the resulting part manifest. When a part or
//! the completion fails, the upload is aborted and the residual parts are
//! verified, so callers learn whether billable orphaned parts were left behind.
//!
//! The store is a collaborator behind the [`s3::types::MultipartStore`] trait;
//! [`s3::http_store::HttpStore`] implements it over plain S3 REST requests.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use s3_multipart_copy::s3::MultipartCopyClientBuilder;
//! use s3_multipart_copy::s3::http_store::HttpStore;
//! use s3_multipart_copy::s3::types::{CopyRequest, ObjectLocation};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = HttpStore::new("http://localhost:9000/").unwrap();
//!     let client = MultipartCopyClientBuilder::new()
//!         .store(Arc::new(store))
//!         .build()
//!         .unwrap();
//!
//!     let request = CopyRequest::builder()
//!         .source(ObjectLocation::new("my-bucket", "my-object"))
//!         .destination(ObjectLocation::new("my-bucket", "my-object-copy"))
//!         .object_size(120_000_000)
//!         .build();
//!
//!     let resp = client
//!         .copy_object_multipart(&request)
//!         .await
//!         .expect("copy failed");
//!
//!     println!("copied object etag: {}", resp.etag);
//! }
//! ```
//!
//! ## Design
//! - [`s3::MultipartCopyClient`] holds the injected store and logger; there is no global state
//! - Each step of a copy lives in its own module under [`s3::multipart_copy`]
//! - Failures are reported through [`s3::error::Error`]; cleanup outcomes carry the triggering failure

#![allow(clippy::result_large_err)]
pub mod s3;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
