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

//! Splitting a source object into byte ranges copied as separate parts

use crate::s3::error::Error;
use crate::s3::types::PartitionRange;

/// Part size used when the request does not set one.
pub const DEFAULT_COPY_PART_SIZE: u64 = 50_000_000;
pub const MIN_PART_SIZE: u64 = 5 * 1024 * 1024; // 5 MiB
pub const MAX_PART_SIZE: u64 = 1024 * MIN_PART_SIZE; // 5 GiB
pub const MAX_MULTIPART_COUNT: u16 = 10_000;

/// Returns the ordered, non-overlapping inclusive ranges covering
/// `[0, object_size)`.
///
/// Every range but the last is `part_size` long. A trailing remainder of at
/// least `min_part_size` bytes becomes its own part; a shorter remainder is
/// appended to the previous part instead, since the store rejects undersized
/// parts.
///
/// # Examples
///
/// ```
/// use s3_multipart_copy::s3::multipart_copy::calculate_partitions;
///
/// let ranges = calculate_partitions(70_000_000, 50_000_000, 5_000_000).unwrap();
/// assert_eq!(ranges.len(), 2);
/// assert_eq!(ranges[1].to_range_value(), "bytes=50000000-69999999");
/// ```
pub fn calculate_partitions(
    object_size: u64,
    part_size: u64,
    min_part_size: u64,
) -> Result<Vec<PartitionRange>, Error> {
    if object_size == 0 {
        return Err(Error::InvalidArgument(
            "object size must be greater than zero".into(),
        ));
    }
    if part_size == 0 {
        return Err(Error::InvalidArgument(
            "part size must be greater than zero".into(),
        ));
    }

    if object_size <= part_size {
        return Ok(vec![PartitionRange {
            part_number: 1,
            start: 0,
            end: object_size - 1,
        }]);
    }

    let whole = object_size / part_size;
    let remainder = object_size % part_size;
    let trailing = remainder > 0 && remainder >= min_part_size;
    let part_count = whole + u64::from(trailing);

    if part_count > u64::from(MAX_MULTIPART_COUNT) {
        return Err(Error::InvalidArgument(format!(
            "object size {object_size} and part size {part_size} make more than {MAX_MULTIPART_COUNT} parts"
        )));
    }

    let mut partitions: Vec<PartitionRange> = (0..whole)
        .map(|i| PartitionRange {
            part_number: (i + 1) as u16,
            start: i * part_size,
            end: (i + 1) * part_size - 1,
        })
        .collect();

    if trailing {
        partitions.push(PartitionRange {
            part_number: (whole + 1) as u16,
            start: whole * part_size,
            end: object_size - 1,
        });
    } else if remainder > 0 {
        if let Some(last) = partitions.last_mut() {
            last.end += remainder;
        }
    }

    Ok(partitions)
}
