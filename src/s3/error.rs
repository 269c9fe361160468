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

//! Error definitions for multipart copy operations

use crate::s3::types::{ListedPart, ObjectLocation, UploadSession};
use crate::s3::utils::get_default_text;
use bytes::{Buf, Bytes};
use std::fmt;
use thiserror::Error;
use xmltree::Element;

/// Error code returned by the store when an upload ID no longer exists.
pub const NO_SUCH_UPLOAD: &str = "NoSuchUpload";

#[derive(Clone, Debug, Default, PartialEq)]
/// Error response for S3 operations
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub resource: String,
    pub request_id: String,
    pub host_id: String,
    pub bucket_name: String,
    pub object_name: String,
}

impl ErrorResponse {
    pub fn parse(body: &mut Bytes) -> Result<ErrorResponse, StoreError> {
        let root = Element::parse(body.reader()).map_err(|e| StoreError::Xml(e.to_string()))?;
        Self::from_element(&root)
    }

    pub(crate) fn from_element(root: &Element) -> Result<ErrorResponse, StoreError> {
        if root.name != "Error" {
            return Err(StoreError::Xml(format!(
                "expected <Error> document, got <{}>",
                root.name
            )));
        }

        Ok(ErrorResponse {
            code: get_default_text(root, "Code"),
            message: get_default_text(root, "Message"),
            resource: get_default_text(root, "Resource"),
            request_id: get_default_text(root, "RequestId"),
            host_id: get_default_text(root, "HostId"),
            bucket_name: get_default_text(root, "BucketName"),
            object_name: get_default_text(root, "Key"),
        })
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code: {}, message: {}, resource: {}, request_id: {}, host_id: {}, bucket_name: {}, object_name: {}",
            self.code,
            self.message,
            self.resource,
            self.request_id,
            self.host_id,
            self.bucket_name,
            self.object_name,
        )
    }
}

/// Errors reported by a [`MultipartStore`](crate::s3::types::MultipartStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("s3 operation failed; {0}")]
    S3Error(ErrorResponse),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response received; status code: {0}; body: {1}")]
    InvalidResponse(u16, String),

    #[error("xml error: {0}")]
    Xml(String),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Returns the S3 error code, if the store answered with an error document.
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::S3Error(er) => Some(er.code.as_str()),
            _ => None,
        }
    }

    /// Returns true if the store reported that the upload ID does not exist.
    pub fn is_no_such_upload(&self) -> bool {
        self.code() == Some(NO_SUCH_UPLOAD)
    }
}

/// Failure of a single part copy.
#[derive(Debug)]
pub struct PartFailure {
    pub part_number: u16,
    pub source: StoreError,
}

impl fmt::Display for PartFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part {}: {}", self.part_number, self.source)
    }
}

/// Fieldless discriminant of [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCollaborator,
    InvalidArgument,
    SessionInitiationFailed,
    PartCopyFailed,
    DeadlineExceeded,
    CompletionFailed,
    AbortRequestFailed,
    AbortIncomplete,
    MultipartCopyAborted,
}

/// Error definitions
///
/// Once a multipart session exists, a failed copy always surfaces as one of
/// the cleanup outcomes (`AbortRequestFailed`, `AbortIncomplete` or
/// `MultipartCopyAborted`). The failure that triggered the cleanup is kept in
/// `cause` and is available through [`Error::root_cause`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid collaborator: {0}")]
    InvalidCollaborator(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("multipart copy failed to initiate for {destination}: {source}")]
    SessionInitiationFailed {
        destination: ObjectLocation,
        source: StoreError,
    },

    #[error("{} of the part copies failed for upload {upload_id}: {}", .failures.len(), join_failures(.failures))]
    PartCopyFailed {
        upload_id: String,
        failures: Vec<PartFailure>,
    },

    #[error("multipart copy deadline exceeded for upload {upload_id}")]
    DeadlineExceeded { upload_id: String },

    #[error("multipart copy failed to complete for upload {upload_id}: {source}")]
    CompletionFailed {
        upload_id: String,
        source: StoreError,
    },

    #[error("abort multipart copy failed for {session} after: {cause}; {source}")]
    AbortRequestFailed {
        session: UploadSession,
        cause: Box<Error>,
        source: StoreError,
    },

    #[error("abort procedure passed but {} copy parts were not removed for {session} after: {cause}", .parts.len())]
    AbortIncomplete {
        session: UploadSession,
        cause: Box<Error>,
        parts: Vec<ListedPart>,
    },

    #[error("multipart copy aborted for {session} after: {cause}")]
    MultipartCopyAborted {
        session: UploadSession,
        cause: Box<Error>,
    },
}

fn join_failures(failures: &[PartFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCollaborator(_) => ErrorKind::InvalidCollaborator,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::SessionInitiationFailed { .. } => ErrorKind::SessionInitiationFailed,
            Error::PartCopyFailed { .. } => ErrorKind::PartCopyFailed,
            Error::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            Error::CompletionFailed { .. } => ErrorKind::CompletionFailed,
            Error::AbortRequestFailed { .. } => ErrorKind::AbortRequestFailed,
            Error::AbortIncomplete { .. } => ErrorKind::AbortIncomplete,
            Error::MultipartCopyAborted { .. } => ErrorKind::MultipartCopyAborted,
        }
    }

    /// Returns the failure that started the cleanup for the abort outcomes,
    /// and `self` for every other error.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::AbortRequestFailed { cause, .. }
            | Error::AbortIncomplete { cause, .. }
            | Error::MultipartCopyAborted { cause, .. } => cause.root_cause(),
            _ => self,
        }
    }

    /// Returns the upload session the error refers to, if one was created.
    pub fn session(&self) -> Option<&UploadSession> {
        match self {
            Error::AbortRequestFailed { session, .. }
            | Error::AbortIncomplete { session, .. }
            | Error::MultipartCopyAborted { session, .. } => Some(session),
            _ => None,
        }
    }
}
