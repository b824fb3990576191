// Dweve YASD - Bulk Record Transfer Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types shared by readers, writers and the remote API seam.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the YASD crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading sources, writing targets or talking to the
/// remote record service.
///
/// Format crates convert their own error enums into [`Error::Format`] at the
/// [`RowReader`](crate::RowReader) / [`RecordWriter`](crate::RecordWriter)
/// boundary so the pipeline deals with a single type.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened, read or written.
    #[error("I/O error for '{path}': {source}")]
    Io {
        /// The file path involved
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },

    /// A stream (stdout, stderr, in-memory buffer) failed.
    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),

    /// The encoding name is not one of UTF-8, Shift-JIS or EUC-JP.
    #[error("unsupported encoding '{0}'")]
    UnsupportedEncoding(String),

    /// Bytes could not be decoded with the declared encoding.
    #[error("invalid {encoding} text at line {line}")]
    Decode {
        /// Encoding name
        encoding: &'static str,
        /// Line number (1-based)
        line: usize,
    },

    /// A data row does not have as many cells as the header row.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        /// Row number (1-based)
        row: usize,
        /// Header cell count
        expected: usize,
        /// Cell count of the offending row
        actual: usize,
    },

    /// A fixed-width line ended before a field boundary.
    #[error("line {line} is too short for the fixed-width layout: needs {needed} bytes, has {actual}")]
    ShortLine {
        /// Line number (1-based)
        line: usize,
        /// Bytes required up to the failing field boundary
        needed: usize,
        /// Bytes available on the line
        actual: usize,
    },

    /// The requested worksheet is not part of the workbook.
    #[error("sheet '{0}' does not exist")]
    MissingSheet(String),

    /// The source ended before a header row was found.
    #[error("source has no header row")]
    MissingHeader,

    /// Format-specific parse or render failure.
    #[error("{format} error: {message}")]
    Format {
        /// Format name ("CSV", "JSON", ...)
        format: &'static str,
        /// Detailed message, including row context when known
        message: String,
    },

    /// The header mapping file is unreadable or malformed.
    #[error("mapping file '{path}': {message}")]
    Mapping {
        /// Mapping file path
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Invalid run configuration detected before any remote call.
    #[error("configuration error: {0}")]
    Config(String),

    /// A whole remote call failed (transport, authentication, fault).
    #[error("remote {operation} failed: {message}")]
    Api {
        /// Remote operation name
        operation: String,
        /// Fault or transport message
        message: String,
    },

    /// The remote service answered a batch with the wrong number of results.
    #[error("remote {operation} returned {actual} results for {expected} records")]
    ResultCount {
        /// Remote operation name
        operation: String,
        /// Records submitted
        expected: usize,
        /// Results received
        actual: usize,
    },
}

impl Error {
    /// Create an I/O error with file path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a format error.
    pub fn format(format: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            format,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a remote API error.
    pub fn api(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = Error::io(
            "accounts.csv",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("accounts.csv"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_row_width_display() {
        let err = Error::RowWidth {
            row: 7,
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "row 7 has 2 cells, expected 3");
    }

    #[test]
    fn test_short_line_names_line() {
        let err = Error::ShortLine {
            line: 12,
            needed: 16,
            actual: 9,
        };
        assert!(err.to_string().contains("line 12"));
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::api("create", "INVALID_SESSION_ID");
        assert_eq!(err.to_string(), "remote create failed: INVALID_SESSION_ID");
    }
}
