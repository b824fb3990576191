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

//! Error types for credential encryption.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for cipher operations.
pub type CipherResult<T> = Result<T, CipherError>;

/// Errors that can occur while encrypting, decrypting or managing keys.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Key material has the wrong length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Text is not valid base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Ciphertext length or PKCS#7 padding is invalid (wrong key or
    /// corrupted data).
    #[error("decryption failed: {0}")]
    Padding(&'static str),

    /// Decrypted bytes are not UTF-8.
    #[error("decrypted credential is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A key file already exists and rotation was not requested.
    #[error("key file '{0}' already exists; use --rotate to replace it")]
    KeyExists(PathBuf),

    /// No home directory to derive the default key path from.
    #[error("cannot determine the home directory for the default key path")]
    NoHomeDir,

    /// Key file I/O failed.
    #[error("key file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CipherError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
