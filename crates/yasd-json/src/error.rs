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

//! Error types for JSON sources and targets.

use thiserror::Error;

/// JSON error types.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The document is not valid JSON.
    #[error("JSON parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-based)
        line: usize,
        /// Parser message
        message: String,
    },

    /// The document root is not an array of objects.
    #[error("Root must be a JSON array, found {0}")]
    InvalidRoot(&'static str),

    /// An entry of the array (or a line of a JSON Lines file) is not an object.
    ///
    /// ```
    /// use yasd_json::JsonError;
    ///
    /// let err = JsonError::NotAnObject { entry: 3, found: "string" };
    /// assert_eq!(err.to_string(), "Entry 3 must be an object, found string");
    /// ```
    #[error("Entry {entry} must be an object, found {found}")]
    NotAnObject {
        /// Entry number (1-based)
        entry: usize,
        /// JSON type found instead
        found: &'static str,
    },

    /// Serialization failure.
    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// I/O error during reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result` with `JsonError`.
pub type Result<T> = std::result::Result<T, JsonError>;

impl JsonError {
    pub(crate) fn parse(err: serde_json::Error, line_offset: usize) -> Self {
        if err.is_io() {
            return JsonError::Io(err.into());
        }
        JsonError::Parse {
            line: err.line() + line_offset,
            message: err.to_string(),
        }
    }
}

impl From<JsonError> for yasd_core::Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(e) => yasd_core::Error::Stream(e),
            other => yasd_core::Error::format("JSON", other.to_string()),
        }
    }
}

/// JSON type name used in messages.
pub fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
