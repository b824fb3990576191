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

//! Blocking partner-API client.

use crate::envelope::{self, Call, Headers};
use crate::error::{Result, SoapError};
use crate::response::{self, Session};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use yasd_core::{QueryPage, Record, RecordApi, RecordResult, TypeDescription};

/// Default login host.
pub const DEFAULT_ENDPOINT: &str = "login.salesforce.com";

/// Default partner API version.
pub const DEFAULT_API_VERSION: &str = "38.0";

/// Default number of records per query page.
pub const DEFAULT_QUERY_BATCH_SIZE: usize = 500;

/// Longest response body kept in a [`SoapError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Login parameters.
#[derive(Clone)]
pub struct LoginConfig {
    /// User name
    pub username: String,
    /// Password, already decrypted, including any security token
    pub password: String,
    /// Login host, e.g. `login.salesforce.com` or `test.salesforce.com`
    pub endpoint: String,
    /// API version, e.g. `38.0`
    pub api_version: String,
    /// Records per query page (`QueryOptions.batchSize`)
    pub query_batch_size: usize,
    /// Request timeout; zero disables it
    pub timeout: Duration,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            query_batch_size: DEFAULT_QUERY_BATCH_SIZE,
            timeout: Duration::from_secs(120),
        }
    }
}

impl LoginConfig {
    /// `https://{endpoint}/services/Soap/u/{api_version}`.
    pub fn login_url(&self) -> String {
        format!(
            "https://{}/services/Soap/u/{}",
            self.endpoint, self.api_version
        )
    }
}

impl fmt::Debug for LoginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("query_batch_size", &self.query_batch_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Sends one envelope and returns the response body.
///
/// Implementations return the body for any status that carries a SOAP
/// envelope; the partner API reports faults with HTTP 500.
pub trait Transport {
    /// POST `body` to `url` with the given `SOAPAction`.
    fn post(&self, url: &str, action: &str, body: String) -> Result<String>;
}

/// [`Transport`] over a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, action: &str, body: String) -> Result<String> {
        let response = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=UTF-8")
            .header("SOAPAction", action)
            .body(body)
            .send()?;
        let status = response.status();
        let text = response.text()?;
        if status.is_success() || text.contains("Fault>") {
            return Ok(text);
        }
        let mut body = text;
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        Err(SoapError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// A logged-in partner-API session.
///
/// Every call after login goes to the server URL returned by login and
/// carries the session header.
pub struct SoapClient<T = HttpTransport> {
    transport: T,
    session: Session,
    query_batch_size: usize,
}

impl SoapClient<HttpTransport> {
    /// Log in over HTTPS.
    pub fn login(config: &LoginConfig) -> yasd_core::Result<Self> {
        let transport = HttpTransport::new(config.timeout).map_err(|e| e.into_api("login"))?;
        Self::login_with(transport, config)
    }
}

impl<T: Transport> SoapClient<T> {
    /// Log in through a custom transport.
    pub fn login_with(transport: T, config: &LoginConfig) -> yasd_core::Result<Self> {
        let url = config.login_url();
        debug!(url = %url, username = %config.username, "logging in");
        let call = Call::Login {
            username: &config.username,
            password: &config.password,
        };
        let session = envelope::build(&call, Headers::default())
            .and_then(|body| transport.post(&url, call.name(), body))
            .and_then(|xml| response::parse_login(&xml))
            .map_err(|e| e.into_api("login"))?;
        debug!(
            server_url = %session.server_url,
            organization_id = %session.organization_id,
            "logged in"
        );
        Ok(Self {
            transport,
            session,
            query_batch_size: config.query_batch_size,
        })
    }

    /// Session data returned by login.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn send<R>(
        &self,
        call: Call<'_>,
        parse: impl FnOnce(&str) -> Result<R>,
    ) -> yasd_core::Result<R> {
        let query_batch_size = matches!(call, Call::Query(_) | Call::QueryMore(_))
            .then_some(self.query_batch_size);
        let headers = Headers {
            session_id: Some(&self.session.session_id),
            query_batch_size,
        };
        debug!(operation = call.name(), "sending request");
        envelope::build(&call, headers)
            .and_then(|body| {
                self.transport
                    .post(&self.session.server_url, call.name(), body)
            })
            .and_then(|xml| parse(&xml))
            .map_err(|e| e.into_api(call.name()))
    }
}

impl<T: Transport> RecordApi for SoapClient<T> {
    fn organization_id(&self) -> &str {
        &self.session.organization_id
    }

    fn create(&mut self, records: &[Record]) -> yasd_core::Result<Vec<RecordResult>> {
        self.send(Call::Create(records), response::parse_results)
    }

    fn update(&mut self, records: &[Record]) -> yasd_core::Result<Vec<RecordResult>> {
        self.send(Call::Update(records), response::parse_results)
    }

    fn upsert(
        &mut self,
        external_id_field: &str,
        records: &[Record],
    ) -> yasd_core::Result<Vec<RecordResult>> {
        self.send(
            Call::Upsert {
                external_id_field,
                records,
            },
            response::parse_results,
        )
    }

    fn delete(&mut self, ids: &[String]) -> yasd_core::Result<Vec<RecordResult>> {
        self.send(Call::Delete(ids), response::parse_results)
    }

    fn undelete(&mut self, ids: &[String]) -> yasd_core::Result<Vec<RecordResult>> {
        self.send(Call::Undelete(ids), response::parse_results)
    }

    fn query(&mut self, query: &str) -> yasd_core::Result<QueryPage> {
        self.send(Call::Query(query), response::parse_query)
    }

    fn query_more(&mut self, locator: &str) -> yasd_core::Result<QueryPage> {
        self.send(Call::QueryMore(locator), response::parse_query)
    }

    fn describe(&mut self, type_name: &str) -> yasd_core::Result<TypeDescription> {
        self.send(Call::DescribeSObject(type_name), response::parse_describe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url() {
        let config = LoginConfig {
            endpoint: "test.salesforce.com".into(),
            ..Default::default()
        };
        assert_eq!(
            config.login_url(),
            "https://test.salesforce.com/services/Soap/u/38.0"
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let config = LoginConfig {
            password: "hunter2".into(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
