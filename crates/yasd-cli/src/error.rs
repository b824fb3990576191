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

//! Error type for CLI commands.
//!
//! Library errors are wrapped transparently so the message printed by the
//! binary is the one the library produced.

use thiserror::Error;
use yasd_cipher::CipherError;

/// Errors reported by `yasd` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading, writing, mapping or a remote call failed.
    #[error(transparent)]
    Transfer(#[from] yasd_core::Error),

    /// Key handling or credential decryption failed.
    #[error("credential error: {0}")]
    Cipher(#[from] CipherError),

    /// A required option was not given.
    #[error("{0} is required")]
    MissingArgument(&'static str),

    /// An option value is invalid.
    #[error("invalid --{name}: {message}")]
    InvalidArgument {
        /// Option name without dashes
        name: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl CliError {
    /// Create an invalid-argument error.
    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

impl From<yasd_csv::CsvError> for CliError {
    fn from(err: yasd_csv::CsvError) -> Self {
        Self::Transfer(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CliError::MissingArgument("username").to_string(),
            "username is required"
        );
        assert_eq!(
            CliError::invalid("encoding", "unsupported encoding 'latin1'").to_string(),
            "invalid --encoding: unsupported encoding 'latin1'"
        );
        let core = CliError::from(yasd_core::Error::config("source has no Id column"));
        assert_eq!(
            core.to_string(),
            "configuration error: source has no Id column"
        );
    }
}
