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

//! Argument groups shared between commands.
//!
//! Each group converts itself into the typed configuration the command
//! layer works with. Conversion validates values but opens nothing.

use crate::commands;
use crate::config::{
    ExportConfig, LoadConfig, LoginConfig, DEFAULT_ERROR_FILE, DEFAULT_SUCCESS_FILE,
};
use crate::error::CliError;
use crate::formats::{parse_delimiter, SourceFormat, TargetFormat};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use yasd_core::{Encoding, Operation};
use yasd_csv::FixedWidthLayout;
use yasd_soap::{DEFAULT_API_VERSION, DEFAULT_ENDPOINT, DEFAULT_QUERY_BATCH_SIZE};
use yasd_xlsx::DEFAULT_SHEET;

/// Stream path meaning stderr for result files and stdout for output.
const STD_STREAM: &str = "-";

/// Login options.
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// User name
    #[arg(short, long, env = "SALESFORCE_USERNAME")]
    pub username: Option<String>,

    /// Password with security token; encrypted when --key is given
    #[arg(short, long, env = "SALESFORCE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Login host
    #[arg(short, long, env = "SALESFORCE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Partner API version
    #[arg(long, env = "SALESFORCE_APIVERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Key file that decrypts --password
    #[arg(long, value_name = "FILE")]
    pub key: Option<PathBuf>,

    /// Request timeout in seconds, 0 for none
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,
}

impl LoginArgs {
    /// Check credentials and decrypt the password.
    pub fn into_config(self, query_batch_size: usize) -> Result<LoginConfig, CliError> {
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or(CliError::MissingArgument("username"))?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(CliError::MissingArgument("password"))?;
        let password = commands::resolve_password(&password, self.key.as_deref())?;
        Ok(LoginConfig {
            username,
            password,
            endpoint: self.endpoint,
            api_version: self.api_version,
            query_batch_size,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

/// Source options of the load commands.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Source file
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Destination type, e.g. Account
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_name: String,

    /// Encoding of the source and the result files (utf8, sjis, euc-jp)
    #[arg(long, default_value = "utf8")]
    pub encoding: String,

    /// Delimiter of delimited sources (csv, tsv)
    #[arg(long)]
    pub mode: Option<String>,

    /// Field delimiter of delimited sources, one character or `tab`;
    /// overrides --mode and the file extension
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Source format (csv, tsv, xlsx, json, jsonl, yaml, fixed); taken from
    /// the file extension when omitted
    #[arg(long)]
    pub format: Option<String>,

    /// YAML file renaming source columns to field names
    #[arg(short, long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Entries to skip first: physical rows before the header row for
    /// delimited text and spreadsheets, data entries for JSON, YAML and
    /// fixed-width sources
    #[arg(long, default_value_t = 0)]
    pub start_row: usize,

    /// Worksheet of spreadsheet sources
    #[arg(long, default_value = DEFAULT_SHEET)]
    pub sheet: String,

    /// Column widths of fixed-width sources, e.g. 6,7,3
    #[arg(long, value_name = "LIST")]
    pub widths: Option<String>,

    /// Column names of fixed-width sources, e.g. Id,Name,Rank
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Success file, - for stderr
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SUCCESS_FILE)]
    pub success_file: String,

    /// Error file, - for stderr
    #[arg(long, value_name = "FILE", default_value = DEFAULT_ERROR_FILE)]
    pub error_file: String,

    /// Send empty cells as explicit nulls
    #[arg(long)]
    pub insert_nulls: bool,
}

impl SourceArgs {
    /// Build the load configuration for `operation`.
    pub fn into_config(self, operation: Operation) -> Result<LoadConfig, CliError> {
        let encoding = parse_encoding(&self.encoding)?;
        let layout = match &self.widths {
            Some(widths) => {
                let layout = FixedWidthLayout::parse(widths)
                    .map_err(|e| CliError::invalid("widths", e.to_string()))?;
                if self.columns.is_empty() {
                    Some(layout)
                } else {
                    Some(
                        layout
                            .with_columns(self.columns.clone())
                            .map_err(|e| CliError::invalid("columns", e.to_string()))?,
                    )
                }
            }
            None if !self.columns.is_empty() => {
                return Err(CliError::invalid("columns", "needs --widths"))
            }
            None => None,
        };
        let delimiter = self.delimiter.as_deref().map(parse_delimiter).transpose()?;
        let format = match (&layout, &self.format) {
            (Some(_), None) => SourceFormat::FixedWidth,
            _ => SourceFormat::detect(&self.file, self.format.as_deref(), self.mode.as_deref())?
                .with_delimiter(delimiter),
        };

        Ok(LoadConfig {
            operation,
            type_name: self.type_name,
            source: self.file,
            format,
            encoding,
            start_row: self.start_row,
            sheet: self.sheet,
            layout,
            mapping: self.mapping,
            insert_nulls: self.insert_nulls,
            success_file: stream_path(self.success_file),
            error_file: stream_path(self.error_file),
        })
    }
}

/// Options of the export command.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Query to run; SELECT * FROM T selects every field of T
    #[arg(short, long)]
    pub query: String,

    /// Output file, stdout when omitted or -
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (csv, tsv, json, jsonl, yaml, xlsx, debug); taken from
    /// the output extension when omitted
    #[arg(long)]
    pub format: Option<String>,

    /// Delimiter of delimited output (csv, tsv)
    #[arg(long)]
    pub mode: Option<String>,

    /// Field delimiter of delimited output, one character or `tab`;
    /// overrides --mode and the output extension
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Output encoding (utf8, sjis, euc-jp)
    #[arg(long, default_value = "utf8")]
    pub encoding: String,

    /// Worksheet name of spreadsheet output
    #[arg(long, default_value = DEFAULT_SHEET)]
    pub sheet: String,

    /// Records per query page
    #[arg(long, default_value_t = DEFAULT_QUERY_BATCH_SIZE)]
    pub batch_size: usize,
}

impl ExportArgs {
    /// Build the export configuration.
    pub fn into_config(self) -> Result<ExportConfig, CliError> {
        let output = self
            .output
            .filter(|path| path.as_os_str() != STD_STREAM);
        let delimiter = self.delimiter.as_deref().map(parse_delimiter).transpose()?;
        let format = TargetFormat::detect(
            output.as_deref(),
            self.format.as_deref(),
            self.mode.as_deref(),
        )?
        .with_delimiter(delimiter);
        Ok(ExportConfig {
            query: self.query,
            output,
            format,
            encoding: parse_encoding(&self.encoding)?,
            sheet: self.sheet,
        })
    }
}

fn parse_encoding(name: &str) -> Result<Encoding, CliError> {
    name.parse()
        .map_err(|e: yasd_core::Error| CliError::invalid("encoding", e.to_string()))
}

fn stream_path(value: String) -> Option<PathBuf> {
    (value != STD_STREAM).then(|| PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Source {
        #[command(flatten)]
        args: SourceArgs,
    }

    #[derive(Parser)]
    struct Export {
        #[command(flatten)]
        args: ExportArgs,
    }

    fn source(args: &[&str]) -> Result<LoadConfig, CliError> {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        Source::parse_from(argv).args.into_config(Operation::Insert)
    }

    #[test]
    fn test_source_defaults() {
        let config = source(&["-f", "a.csv", "-t", "Account"]).unwrap();
        assert_eq!(config.format, SourceFormat::Delimited(b','));
        assert_eq!(config.encoding, Encoding::Utf8);
        assert_eq!(config.sheet, "import");
        assert_eq!(config.success_file, Some(PathBuf::from("./success.csv")));
        assert_eq!(config.error_file, Some(PathBuf::from("./error.csv")));
    }

    #[test]
    fn test_dash_means_stderr() {
        let config = source(&[
            "-f",
            "a.csv",
            "-t",
            "Account",
            "--success-file",
            "-",
            "--error-file",
            "-",
        ])
        .unwrap();
        assert_eq!(config.success_file, None);
        assert_eq!(config.error_file, None);
    }

    #[test]
    fn test_widths_imply_fixed_width() {
        let config = source(&[
            "-f",
            "a.csv",
            "-t",
            "Account",
            "--widths",
            "3,5",
            "--columns",
            "Code,Name",
        ])
        .unwrap();
        assert_eq!(config.format, SourceFormat::FixedWidth);
        assert!(config.layout.is_some());

        let err = source(&["-f", "a.dat", "-t", "A", "--widths", "3", "--columns", "a,b"])
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { name: "columns", .. }));
        let err = source(&["-f", "a.dat", "-t", "A", "--columns", "a"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { name: "columns", .. }));
    }

    #[test]
    fn test_delimiter_option() {
        let config = source(&["-f", "a.csv", "-t", "A", "--delimiter", ";"]).unwrap();
        assert_eq!(config.format, SourceFormat::Delimited(b';'));
        let config = source(&["-f", "a.txt", "-t", "A", "--mode", "csv", "--delimiter", "tab"])
            .unwrap();
        assert_eq!(config.format, SourceFormat::Delimited(b'\t'));
        let err = source(&["-f", "a.csv", "-t", "A", "--delimiter", "||"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { name: "delimiter", .. }));

        let config = Export::parse_from(["test", "-q", "q", "-o", "out.tsv", "--delimiter", "|"])
            .args
            .into_config()
            .unwrap();
        assert_eq!(config.format, TargetFormat::Delimited(b'|'));
    }

    #[test]
    fn test_start_row_help_names_both_meanings() {
        use clap::CommandFactory;

        let command = Source::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "start_row")
            .and_then(|arg| arg.get_help())
            .unwrap()
            .to_string();
        assert!(help.contains("rows before the header row"));
        assert!(help.contains("data entries for JSON, YAML and"));
    }

    #[test]
    fn test_bad_encoding() {
        let err = source(&["-f", "a.csv", "-t", "A", "--encoding", "latin1"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { name: "encoding", .. }));
    }

    #[test]
    fn test_export_to_stdout() {
        let config = Export::parse_from(["test", "-q", "SELECT Id FROM Account", "-o", "-"])
            .args
            .into_config()
            .unwrap();
        assert_eq!(config.output, None);
        assert_eq!(config.format, TargetFormat::Delimited(b','));

        let config = Export::parse_from(["test", "-q", "q", "-o", "out.yaml"])
            .args
            .into_config()
            .unwrap();
        assert_eq!(config.format, TargetFormat::Yaml);
    }

    #[test]
    fn test_login_requires_credentials() {
        let login = LoginArgs {
            username: None,
            password: Some("x".into()),
            endpoint: DEFAULT_ENDPOINT.into(),
            api_version: DEFAULT_API_VERSION.into(),
            key: None,
            timeout: 120,
        };
        assert!(matches!(
            login.clone().into_config(500),
            Err(CliError::MissingArgument("username"))
        ));

        let login = LoginArgs {
            username: Some("ada@example.com".into()),
            password: Some(String::new()),
            ..login
        };
        assert!(matches!(
            login.into_config(500),
            Err(CliError::MissingArgument("password"))
        ));
    }
}
