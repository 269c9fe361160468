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

//! Various utility and helper functions

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use multimap::MultiMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
pub use urlencoding::encode as urlencode;
use xmltree::Element;

use crate::s3::error::{Error, StoreError};
use crate::s3::types::ObjectLocation;

/// Date and time with UTC timezone
pub type UtcTime = DateTime<Utc>;

/// Multimap for string key and string value
pub type Multimap = MultiMap<String, String>;

/// Maximum length of an object key in bytes.
pub const MAX_OBJECT_NAME_LENGTH: usize = 1024;

/// Merges two multimaps.
pub fn merge(m1: &mut Multimap, m2: &Multimap) {
    for (key, values) in m2.iter_all() {
        for value in values {
            m1.insert(key.to_string(), value.to_string());
        }
    }
}

/// Gets HTTP header value of given time
pub fn to_http_header_value(time: UtcTime) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

// Characters left untouched by ECMAScript `encodeURIComponent`.
const URI_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const OBJECT_KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Percent-encodes a string as a single URI component, so `/`, `+`, `?`,
/// `=` and `&` are all escaped.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT_ENCODE_SET).collect()
}

/// Percent-encodes an object key for use in a request path, keeping `/`.
pub fn urlencode_object_key(key: &str) -> String {
    utf8_percent_encode(key, OBJECT_KEY_ENCODE_SET).collect()
}

/// Builds the value of the `x-amz-copy-source` header for the given source:
/// the joined `bucket/key` path encoded as one URI component.
///
/// # Examples
///
/// ```
/// use s3_multipart_copy::s3::types::ObjectLocation;
/// use s3_multipart_copy::s3::utils::encode_copy_source;
///
/// let src = ObjectLocation::new("source-bucket", "+?=/&_-.txt");
/// assert_eq!(encode_copy_source(&src), "source-bucket%2F%2B%3F%3D%2F%26_-.txt");
/// ```
pub fn encode_copy_source(source: &ObjectLocation) -> String {
    let mut path = String::with_capacity(source.bucket.len() + source.object.len() + 1);
    path.push_str(&source.bucket);
    if !source.object.starts_with('/') {
        path.push('/');
    }
    path.push_str(&source.object);
    encode_uri_component(&path)
}

/// Validates given bucket name
pub fn check_bucket_name(bucket_name: &str, strict: bool) -> Result<(), Error> {
    if bucket_name.trim().is_empty() {
        return Err(Error::InvalidArgument(String::from(
            "bucket name cannot be empty",
        )));
    }

    if bucket_name.len() < 3 {
        return Err(Error::InvalidArgument(String::from(
            "bucket name cannot be less than 3 characters",
        )));
    }

    if bucket_name.len() > 63 {
        return Err(Error::InvalidArgument(String::from(
            "bucket name cannot be greater than 63 characters",
        )));
    }

    lazy_static! {
        static ref IPV4_REGEX: Regex = Regex::new(r"^((25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])$").unwrap();
        static ref VALID_BUCKET_NAME_REGEX: Regex =
            Regex::new("^[A-Za-z0-9][A-Za-z0-9\\.\\-_:]{1,61}[A-Za-z0-9]$").unwrap();
        static ref VALID_BUCKET_NAME_STRICT_REGEX: Regex =
            Regex::new("^[a-z0-9][a-z0-9\\.\\-]{1,61}[a-z0-9]$").unwrap();
    }

    if IPV4_REGEX.is_match(bucket_name) {
        return Err(Error::InvalidArgument(format!(
            "bucket name '{bucket_name}' cannot be an IP address"
        )));
    }

    if bucket_name.contains("..") || bucket_name.contains(".-") || bucket_name.contains("-.") {
        return Err(Error::InvalidArgument(format!(
            "bucket name '{bucket_name}' contains invalid successive characters '..', '.-' or '-.'"
        )));
    }

    if strict {
        if !VALID_BUCKET_NAME_STRICT_REGEX.is_match(bucket_name) {
            return Err(Error::InvalidArgument(format!(
                "bucket name '{bucket_name}' does not follow S3 standards strictly"
            )));
        }
    } else if !VALID_BUCKET_NAME_REGEX.is_match(bucket_name) {
        return Err(Error::InvalidArgument(format!(
            "bucket name '{bucket_name}' does not follow S3 standards"
        )));
    }

    Ok(())
}

/// Validates given object name
pub fn check_object_name(object_name: &str) -> Result<(), Error> {
    if object_name.is_empty() {
        return Err(Error::InvalidArgument(String::from(
            "object name cannot be empty",
        )));
    }

    if object_name.len() > MAX_OBJECT_NAME_LENGTH {
        return Err(Error::InvalidArgument(format!(
            "object name cannot be greater than {MAX_OBJECT_NAME_LENGTH} bytes"
        )));
    }

    Ok(())
}

/// Gets text value of given XML element for given tag.
pub fn get_text(element: &Element, tag: &str) -> Result<String, StoreError> {
    Ok(element
        .get_child(tag)
        .ok_or(StoreError::Xml(format!("<{}> tag not found", tag)))?
        .get_text()
        .ok_or(StoreError::Xml(format!("text of <{}> tag not found", tag)))?
        .to_string())
}

/// Gets optional text value of given XML element for given tag.
pub fn get_option_text(element: &Element, tag: &str) -> Option<String> {
    if let Some(v) = element.get_child(tag) {
        return Some(v.get_text().unwrap_or_default().to_string());
    }

    None
}

/// Gets default text value of given XML element for given tag.
pub fn get_default_text(element: &Element, tag: &str) -> String {
    element.get_child(tag).map_or(String::new(), |v| {
        v.get_text().unwrap_or_default().to_string()
    })
}
