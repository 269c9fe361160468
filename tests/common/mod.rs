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

#![allow(dead_code)]

pub mod responder;

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use s3_multipart_copy::s3::error::{ErrorResponse, NO_SUCH_UPLOAD, StoreError};
use s3_multipart_copy::s3::logger::{CopyLogger, LogRecord};
use s3_multipart_copy::s3::types::{
    AbortMultipartUploadArgs, CompleteMultipartUploadArgs, CompleteMultipartUploadResponse,
    CreateMultipartUploadArgs, CreateMultipartUploadResponse, ListPartsArgs, ListPartsResponse,
    ListedPart, MultipartStore, UploadPartCopyArgs, UploadPartCopyResponse,
};
use s3_multipart_copy::s3::{MultipartCopyClient, MultipartCopyClientBuilder};

pub const UPLOAD_ID: &str = "1a2b3c4d";
pub const ETAG: &str = "1a1b2s3d2f1e2g3sfsgdsg";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn s3_error(code: &str) -> StoreError {
    StoreError::S3Error(ErrorResponse {
        code: code.to_string(),
        message: format!("{code} injected by mock store"),
        ..Default::default()
    })
}

/// Every request the mock store received, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateMultipartUpload(CreateMultipartUploadArgs),
    UploadPartCopy(UploadPartCopyArgs),
    CompleteMultipartUpload(CompleteMultipartUploadArgs),
    AbortMultipartUpload(AbortMultipartUploadArgs),
    ListParts(ListPartsArgs),
}

/// What `list_parts` answers after an abort.
#[derive(Clone, Debug, Default)]
pub enum ListPartsOutcome {
    #[default]
    Empty,
    Residual(Vec<ListedPart>),
    NoSuchUpload,
    Fail,
}

/// In-memory store with failure injection.
#[derive(Debug, Default)]
pub struct MockStore {
    pub fail_create: bool,
    pub failing_parts: HashSet<u16>,
    pub fail_complete: bool,
    pub fail_abort: bool,
    pub list_parts: ListPartsOutcome,
    /// Fixed delay applied to each part copy.
    pub part_delay: Duration,
    /// Upper bound of the random delay added to each part copy.
    pub max_part_delay: Duration,

    pub calls: Mutex<Vec<Call>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn part_copies(&self) -> Vec<UploadPartCopyArgs> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::UploadPartCopy(args) => Some(args),
                _ => None,
            })
            .collect()
    }

    pub fn count<F: Fn(&Call) -> bool>(&self, f: F) -> usize {
        self.calls().iter().filter(|c| f(c)).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn random_delay(&self) {
        let mut ms = self.part_delay.as_millis() as u64;
        let max = self.max_part_delay.as_millis() as u64;
        if max > 0 {
            ms += rand::random_range(1..=max);
        }
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

#[async_trait]
impl MultipartStore for MockStore {
    async fn create_multipart_upload(
        &self,
        args: CreateMultipartUploadArgs,
    ) -> Result<CreateMultipartUploadResponse, StoreError> {
        let destination = args.destination.clone();
        self.record(Call::CreateMultipartUpload(args));
        if self.fail_create {
            return Err(s3_error("AccessDenied"));
        }
        Ok(CreateMultipartUploadResponse {
            bucket: destination.bucket,
            object: destination.object,
            upload_id: UPLOAD_ID.to_string(),
        })
    }

    async fn upload_part_copy(
        &self,
        args: UploadPartCopyArgs,
    ) -> Result<UploadPartCopyResponse, StoreError> {
        let part_number = args.part_number;
        self.record(Call::UploadPartCopy(args));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.random_delay().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_parts.contains(&part_number) {
            return Err(s3_error("InternalError"));
        }
        Ok(UploadPartCopyResponse {
            etag: format!("{ETAG}-{part_number}"),
            last_modified: Some("2024-03-05T07:08:09.000Z".to_string()),
        })
    }

    async fn complete_multipart_upload(
        &self,
        args: CompleteMultipartUploadArgs,
    ) -> Result<CompleteMultipartUploadResponse, StoreError> {
        let destination = args.destination.clone();
        self.record(Call::CompleteMultipartUpload(args));
        if self.fail_complete {
            return Err(s3_error("InvalidPart"));
        }
        Ok(CompleteMultipartUploadResponse {
            bucket: destination.bucket.clone(),
            object: destination.object.clone(),
            location: Some(format!("http://localhost:9000/{destination}")),
            etag: format!("{ETAG}-final"),
            version_id: None,
        })
    }

    async fn abort_multipart_upload(
        &self,
        args: AbortMultipartUploadArgs,
    ) -> Result<(), StoreError> {
        self.record(Call::AbortMultipartUpload(args));
        if self.fail_abort {
            return Err(s3_error("InternalError"));
        }
        Ok(())
    }

    async fn list_parts(&self, args: ListPartsArgs) -> Result<ListPartsResponse, StoreError> {
        let resp = ListPartsResponse {
            bucket: args.destination.bucket.clone(),
            object: args.destination.object.clone(),
            upload_id: args.upload_id.clone(),
            ..Default::default()
        };
        self.record(Call::ListParts(args));
        match &self.list_parts {
            ListPartsOutcome::Empty => Ok(resp),
            ListPartsOutcome::Residual(parts) => Ok(ListPartsResponse {
                parts: parts.clone(),
                ..resp
            }),
            ListPartsOutcome::NoSuchUpload => Err(s3_error(NO_SUCH_UPLOAD)),
            ListPartsOutcome::Fail => Err(s3_error("SlowDown")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Logger keeping every record in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<(Level, LogRecord)>>,
}

impl MemoryLogger {
    pub fn records(&self) -> Vec<(Level, LogRecord)> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, r)| r.msg).collect()
    }

    pub fn find(&self, msg: &str) -> Option<(Level, LogRecord)> {
        self.records().into_iter().find(|(_, r)| r.msg == msg)
    }
}

impl CopyLogger for MemoryLogger {
    fn info(&self, record: &LogRecord) {
        self.records.lock().unwrap().push((Level::Info, record.clone()));
    }

    fn error(&self, record: &LogRecord) {
        self.records.lock().unwrap().push((Level::Error, record.clone()));
    }
}

pub struct TestContext {
    pub store: Arc<MockStore>,
    pub logger: Arc<MemoryLogger>,
    pub client: MultipartCopyClient,
}

impl TestContext {
    pub fn new(store: MockStore) -> Self {
        Self::with_builder(store, |b| b)
    }

    pub fn with_builder<F>(store: MockStore, configure: F) -> Self
    where
        F: FnOnce(MultipartCopyClientBuilder) -> MultipartCopyClientBuilder,
    {
        init_logger();
        let store = Arc::new(store);
        let logger = Arc::new(MemoryLogger::default());
        let client = configure(
            MultipartCopyClientBuilder::new()
                .store(store.clone())
                .logger(logger.clone()),
        )
        .build()
        .unwrap();
        Self {
            store,
            logger,
            client,
        }
    }
}
