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

//! Blocking SOAP client for the partner API.
//!
//! [`SoapClient`] implements [`yasd_core::RecordApi`]. It logs in once,
//! then sends every call to the returned server URL with the session
//! header. Query calls carry `QueryOptions.batchSize`. SOAP faults and
//! transport failures surface as [`yasd_core::Error::Api`].
//!
//! The HTTP layer sits behind the [`Transport`] trait so envelopes and
//! responses can be exercised without a network.
//!
//! # Examples
//!
//! ```no_run
//! use yasd_core::RecordApi;
//! use yasd_soap::{LoginConfig, SoapClient};
//!
//! let config = LoginConfig {
//!     username: "user@example.com".into(),
//!     password: "secret".into(),
//!     ..Default::default()
//! };
//! let mut client = SoapClient::login(&config)?;
//! let page = client.query("SELECT Id, Name FROM Account")?;
//! println!("{} records", page.records.len());
//! # Ok::<(), yasd_core::Error>(())
//! ```

mod client;
pub mod envelope;
mod error;
pub mod response;

pub use client::{
    HttpTransport, LoginConfig, SoapClient, Transport, DEFAULT_API_VERSION, DEFAULT_ENDPOINT,
    DEFAULT_QUERY_BATCH_SIZE,
};
pub use error::{Result, SoapError};
pub use response::Session;
