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

//! Query export.

use crate::config::{ExportConfig, LoginConfig};
use crate::error::CliError;
use crate::formats;
use crate::pipeline::{self, ExportSummary};
use tracing::info;
use yasd_core::{RecordApi, RecordWriter};
use yasd_soap::SoapClient;

/// An export run with its output already open.
pub struct ExportJob {
    query: String,
    writer: Box<dyn RecordWriter>,
}

impl ExportJob {
    /// Check the query and open the output.
    ///
    /// `SELECT *` is only expanded once logged in; every other query has its
    /// select list checked here.
    pub fn prepare(config: &ExportConfig) -> Result<Self, CliError> {
        let query = config.query.trim();
        if query.is_empty() {
            return Err(CliError::MissingArgument("query"));
        }
        if !is_select_star(query) {
            pipeline::query_columns(query)?;
        }
        Ok(Self {
            query: query.to_string(),
            writer: formats::open_target(config)?,
        })
    }

    /// Run the query through `api` and write every page.
    pub fn run<A: RecordApi + ?Sized>(mut self, api: &mut A) -> Result<ExportSummary, CliError> {
        let summary = pipeline::export(api, &self.query, self.writer.as_mut())?;
        info!(
            pages = summary.pages,
            records = summary.records,
            "export finished"
        );
        Ok(summary)
    }
}

fn is_select_star(query: &str) -> bool {
    let mut words = query.split_whitespace();
    matches!(
        (words.next(), words.next()),
        (Some(select), Some("*")) if select.eq_ignore_ascii_case("select")
    )
}

/// Prepare the run, log in and export.
pub fn export(config: &ExportConfig, login: &LoginConfig) -> Result<ExportSummary, CliError> {
    let job = ExportJob::prepare(config)?;
    let mut client = SoapClient::login(login)?;
    job.run(&mut client)
}
