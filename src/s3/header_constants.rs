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

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
pub const CONTENT_ENCODING: &str = "Content-Encoding";
pub const CONTENT_LANGUAGE: &str = "Content-Language";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const EXPIRES: &str = "Expires";

pub const X_AMZ_ACL: &str = "x-amz-acl";

pub const X_AMZ_SERVER_SIDE_ENCRYPTION: &str = "x-amz-server-side-encryption";

pub const X_AMZ_STORAGE_CLASS: &str = "x-amz-storage-class";

pub const X_AMZ_META_PREFIX: &str = "x-amz-meta-";

pub const X_AMZ_VERSION_ID: &str = "x-amz-version-id";

pub const X_AMZ_COPY_SOURCE: &str = "x-amz-copy-source";

pub const X_AMZ_COPY_SOURCE_RANGE: &str = "x-amz-copy-source-range";
