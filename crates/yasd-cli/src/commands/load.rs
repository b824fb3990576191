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

//! Insert, update, upsert, delete and undelete.

use crate::config::{LoadConfig, LoginConfig};
use crate::error::CliError;
use crate::formats;
use crate::pipeline::{self, LoadRequest, ReferenceCache, ResponseRouter, TransferSummary};
use std::io::Write;
use tracing::info;
use yasd_core::{FieldMap, HeaderedRows, Operation, RecordApi, RowReader};
use yasd_soap::SoapClient;

/// A load run with every local resource already open.
pub struct LoadJob {
    rows: HeaderedRows<Box<dyn RowReader>>,
    mapping: Option<FieldMap>,
    router: ResponseRouter<Box<dyn Write>, Box<dyn Write>>,
    operation: Operation,
    type_name: String,
    insert_nulls: bool,
}

impl LoadJob {
    /// Open the source, read its header, load the mapping and create the
    /// result streams.
    pub fn prepare(config: &LoadConfig) -> Result<Self, CliError> {
        if config.type_name.is_empty() {
            return Err(CliError::MissingArgument("type"));
        }
        let rows = HeaderedRows::new(formats::open_source(config)?)?;
        let mapping = config.mapping.as_ref().map(FieldMap::load).transpose()?;
        let router = ResponseRouter::open(
            config.success_file.as_deref(),
            config.error_file.as_deref(),
            config.encoding,
        )?;
        info!(
            operation = %config.operation,
            type_name = %config.type_name,
            source = %config.source.display(),
            columns = rows.header().len(),
            "source opened"
        );
        Ok(Self {
            rows,
            mapping,
            router,
            operation: config.operation.clone(),
            type_name: config.type_name.clone(),
            insert_nulls: config.insert_nulls,
        })
    }

    /// Transfer every row through `api`.
    pub fn run<A: RecordApi + ?Sized>(mut self, api: &mut A) -> Result<TransferSummary, CliError> {
        let mut cache = ReferenceCache::new();
        let request = LoadRequest {
            operation: &self.operation,
            type_name: &self.type_name,
            mapping: self.mapping.as_ref(),
            insert_nulls: self.insert_nulls,
        };
        Ok(pipeline::load(
            self.rows,
            api,
            &mut cache,
            &mut self.router,
            request,
        )?)
    }
}

/// Prepare the run, log in and transfer.
pub fn load(config: &LoadConfig, login: &LoginConfig) -> Result<TransferSummary, CliError> {
    let job = LoadJob::prepare(config)?;
    let mut client = SoapClient::login(login)?;
    job.run(&mut client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::SourceFormat;
    use std::fs;
    use yasd_core::FieldValue;
    use yasd_test::{fixtures, MockApi};

    #[test]
    fn test_job_writes_result_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("accounts.csv");
        fs::write(&source, "Name\nAcme\nBeta\n").unwrap();
        let config = LoadConfig {
            type_name: "Account".into(),
            source,
            success_file: Some(dir.path().join("ok.csv")),
            error_file: Some(dir.path().join("err.csv")),
            ..Default::default()
        };

        let mut api = MockApi::new().fail_record(1, "DUPLICATE_VALUE");
        let summary = LoadJob::prepare(&config).unwrap().run(&mut api).unwrap();
        assert_eq!((summary.successes, summary.failures), (1, 1));
        assert_eq!(
            fs::read_to_string(dir.path().join("ok.csv")).unwrap(),
            format!("{}\n", yasd_test::mock_id(0))
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("err.csv")).unwrap(),
            "DUPLICATE_VALUE\n"
        );
    }

    #[test]
    fn test_mapping_file_applied() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("contacts.json");
        fs::write(&source, r#"[{"Surname": "Lovelace"}]"#).unwrap();
        let mapping = dir.path().join("map.yaml");
        fs::write(&mapping, "Surname: LastName\n").unwrap();
        let config = LoadConfig {
            type_name: "Contact".into(),
            source,
            format: SourceFormat::Json,
            mapping: Some(mapping),
            success_file: Some(dir.path().join("ok.csv")),
            error_file: Some(dir.path().join("err.csv")),
            ..Default::default()
        };

        let mut api = MockApi::new();
        LoadJob::prepare(&config).unwrap().run(&mut api).unwrap();
        assert!(api.submitted_records()[0].field("LastName").is_some());
    }

    #[test]
    fn test_semicolon_source_via_delimiter_option() {
        use crate::cli::SourceArgs;
        use clap::Parser;
        use std::ffi::OsString;

        #[derive(Parser)]
        struct Source {
            #[command(flatten)]
            args: SourceArgs,
        }

        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("accounts.csv");
        fs::write(&source, "Name;Phone\nAcme, Inc.;555-0100\n").unwrap();
        let argv: Vec<OsString> = vec![
            "test".into(),
            "-t".into(),
            "Account".into(),
            "--delimiter".into(),
            ";".into(),
            "-f".into(),
            source.into(),
            "--success-file".into(),
            dir.path().join("ok.csv").into(),
            "--error-file".into(),
            dir.path().join("err.csv").into(),
        ];
        let config = Source::parse_from(argv)
            .args
            .into_config(Operation::Insert)
            .unwrap();

        let mut api = MockApi::new();
        LoadJob::prepare(&config).unwrap().run(&mut api).unwrap();
        let records = api.submitted_records();
        let record = records[0];
        assert_eq!(record.fields().len(), 2);
        assert_eq!(record.field("Name"), Some(&FieldValue::text("Acme, Inc.")));
        assert_eq!(record.field("Phone"), Some(&FieldValue::text("555-0100")));
    }

    #[test]
    fn test_missing_source_fails_before_any_call() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoadConfig {
            type_name: "Account".into(),
            source: dir.path().join("missing.csv"),
            ..Default::default()
        };
        assert!(matches!(
            LoadJob::prepare(&config),
            Err(CliError::Transfer(yasd_core::Error::Io { .. }))
        ));
    }

    #[test]
    fn test_type_required() {
        let config = LoadConfig::default();
        assert!(matches!(
            LoadJob::prepare(&config),
            Err(CliError::MissingArgument("type"))
        ));
    }

    #[test]
    fn test_fixture_update_resolves_references() {
        let dir = tempfile::tempdir().unwrap();
        let source = fixtures::temp_file(".csv", fixtures::ACCOUNTS_CSV.as_bytes());
        let config = LoadConfig {
            operation: Operation::Update,
            type_name: "Account".into(),
            source: source.path().to_path_buf(),
            success_file: Some(dir.path().join("ok.csv")),
            error_file: Some(dir.path().join("err.csv")),
            ..Default::default()
        };
        let mut api = MockApi::new().with_description(fixtures::account_description());
        let summary = LoadJob::prepare(&config).unwrap().run(&mut api).unwrap();
        assert_eq!(summary.records, 3);
        assert_eq!(api.describe_count(), 1);
    }
}
