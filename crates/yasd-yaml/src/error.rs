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

//! Error types for YAML sources and targets.

use thiserror::Error;

/// YAML error types.
#[derive(Error, Debug)]
pub enum YamlError {
    /// YAML parsing failed
    #[error("YAML parse error: {0}")]
    Parse(String),

    /// Root element must be a sequence
    #[error("Root must be a YAML sequence, found {found}")]
    InvalidRoot { found: &'static str },

    /// Non-string key encountered in mapping
    #[error("Non-string keys not supported, found {key_type} at path {path}")]
    NonStringKey { key_type: &'static str, path: String },

    /// The document is not a sequence of mappings
    #[error("{0}")]
    Shape(#[from] yasd_json::JsonError),

    /// YAML serialization failed
    #[error("YAML serialization error: {0}")]
    Serialize(String),

    /// I/O error during reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for YamlError {
    fn from(err: serde_yaml::Error) -> Self {
        YamlError::Parse(err.to_string())
    }
}

impl From<YamlError> for yasd_core::Error {
    fn from(err: YamlError) -> Self {
        match err {
            YamlError::Io(e) => yasd_core::Error::Stream(e),
            other => yasd_core::Error::format("YAML", other.to_string()),
        }
    }
}
