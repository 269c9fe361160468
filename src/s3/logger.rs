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

//! Structured logging for multipart copy operations

use serde::Serialize;
use serde_json::Value;

/// Log target used by [`LogFacade`].
pub const LOG_TARGET: &str = "s3_multipart_copy";

/// A structured log record. Unset fields are omitted when serialized.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LogRecord {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl LogRecord {
    pub fn new<S: Into<String>>(msg: S) -> Self {
        Self {
            msg: msg.into(),
            ..Default::default()
        }
    }

    pub fn context(mut self, context: Option<&Value>) -> Self {
        self.context = context.cloned();
        self
    }

    pub fn upload_id<S: Into<String>>(mut self, upload_id: S) -> Self {
        self.upload_id = Some(upload_id.into());
        self
    }

    pub fn part_number(mut self, part_number: u16) -> Self {
        self.part_number = Some(part_number);
        self
    }

    pub fn error<E: ToString + ?Sized>(mut self, error: &E) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// Attaches a serializable value, typically a store response.
    pub fn details<T: Serialize + ?Sized>(mut self, details: &T) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }
}

/// Leveled, structured logger used by the multipart copy client.
pub trait CopyLogger: Send + Sync {
    fn info(&self, record: &LogRecord);
    fn error(&self, record: &LogRecord);
}

/// [`CopyLogger`] that renders records as single-line JSON through the
/// [`log`] facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacade;

impl LogFacade {
    fn render(record: &LogRecord) -> String {
        serde_json::to_string(record).unwrap_or_else(|_| record.msg.clone())
    }
}

impl CopyLogger for LogFacade {
    fn info(&self, record: &LogRecord) {
        log::info!(target: LOG_TARGET, "{}", Self::render(record));
    }

    fn error(&self, record: &LogRecord) {
        log::error!(target: LOG_TARGET, "{}", Self::render(record));
    }
}
