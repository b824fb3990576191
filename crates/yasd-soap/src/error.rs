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

//! Error types for the SOAP client.

use thiserror::Error;

/// Result alias for SOAP operations.
pub type Result<T> = std::result::Result<T, SoapError>;

/// Errors raised while talking to the partner API.
#[derive(Debug, Error)]
pub enum SoapError {
    /// The HTTP request could not be sent or its body not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status and no SOAP fault.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The server returned a SOAP fault.
    #[error("{code}: {message}")]
    Fault {
        /// `faultcode` text (e.g. `sf:INVALID_LOGIN`)
        code: String,
        /// `faultstring` text
        message: String,
    },

    /// The response is not well-formed XML.
    #[error("malformed response: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The request envelope could not be written.
    #[error("envelope error: {0}")]
    Envelope(#[from] quick_xml::Error),

    /// A required element is missing from the response.
    #[error("response has no <{0}> element")]
    MissingElement(&'static str),
}

impl SoapError {
    /// Convert into the pipeline error for the named remote operation.
    pub fn into_api(self, operation: &str) -> yasd_core::Error {
        yasd_core::Error::api(operation, self.to_string())
    }
}
