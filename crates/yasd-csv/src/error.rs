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

//! Error types for delimited and fixed-width files.

use thiserror::Error;

/// Delimited / fixed-width error types.
///
/// # Examples
///
/// ```
/// use yasd_csv::CsvError;
///
/// let err = CsvError::Parse {
///     line: 42,
///     message: "unequal lengths".to_string(),
/// };
/// assert!(err.to_string().contains("line 42"));
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// Parse error at a specific line.
    #[error("CSV parse error at line {line}: {message}")]
    Parse {
        /// Line number where the error occurred (1-based)
        line: u64,
        /// Detailed error message
        message: String,
    },

    /// The fixed-width layout is unusable.
    ///
    /// ```
    /// use yasd_csv::CsvError;
    ///
    /// let err = CsvError::Layout("width 0 at position 2".to_string());
    /// assert_eq!(err.to_string(), "Invalid fixed-width layout: width 0 at position 2");
    /// ```
    #[error("Invalid fixed-width layout: {0}")]
    Layout(String),

    /// Error from the underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// I/O error during reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result` with `CsvError`.
pub type Result<T> = std::result::Result<T, CsvError>;

impl CsvError {
    /// Convert a `csv` library error, keeping its line number when known.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => CsvError::Parse {
                line: pos.line(),
                message: err.to_string(),
            },
            None => CsvError::CsvLib(err),
        }
    }
}

impl From<CsvError> for yasd_core::Error {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::Io(e) => yasd_core::Error::Stream(e),
            other => yasd_core::Error::format("CSV", other.to_string()),
        }
    }
}
