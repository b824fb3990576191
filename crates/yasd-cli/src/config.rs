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

//! Typed run configuration.
//!
//! Command-line arguments are converted into these structs before any file
//! is opened or any remote call is made. The defaults mirror the CLI
//! defaults.

use crate::formats::{SourceFormat, TargetFormat};
use std::path::PathBuf;
use yasd_core::{Encoding, Operation};
use yasd_csv::FixedWidthLayout;

pub use yasd_soap::LoginConfig;

/// Default success stream path.
pub const DEFAULT_SUCCESS_FILE: &str = "./success.csv";

/// Default error stream path.
pub const DEFAULT_ERROR_FILE: &str = "./error.csv";

/// Configuration of a load run (insert, update, upsert, delete, undelete).
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Mutation to perform
    pub operation: Operation,
    /// Destination type, e.g. `Account`
    pub type_name: String,
    /// Source file
    pub source: PathBuf,
    /// How to read the source
    pub format: SourceFormat,
    /// Source and result-stream encoding
    pub encoding: Encoding,
    /// Leading physical rows to skip
    pub start_row: usize,
    /// Worksheet read from spreadsheet sources
    pub sheet: String,
    /// Column layout for fixed-width sources
    pub layout: Option<FixedWidthLayout>,
    /// Header mapping file
    pub mapping: Option<PathBuf>,
    /// Send empty cells as explicit nulls
    pub insert_nulls: bool,
    /// Success stream; `None` writes to stderr
    pub success_file: Option<PathBuf>,
    /// Error stream; `None` writes to stderr
    pub error_file: Option<PathBuf>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            operation: Operation::Insert,
            type_name: String::new(),
            source: PathBuf::new(),
            format: SourceFormat::Delimited(b','),
            encoding: Encoding::Utf8,
            start_row: 0,
            sheet: yasd_xlsx::DEFAULT_SHEET.to_string(),
            layout: None,
            mapping: None,
            insert_nulls: false,
            success_file: Some(PathBuf::from(DEFAULT_SUCCESS_FILE)),
            error_file: Some(PathBuf::from(DEFAULT_ERROR_FILE)),
        }
    }
}

/// Configuration of an export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Query text; `SELECT * FROM T` is expanded before it is sent
    pub query: String,
    /// Output file; `None` writes to stdout
    pub output: Option<PathBuf>,
    /// How to render records
    pub format: TargetFormat,
    /// Output encoding
    pub encoding: Encoding,
    /// Worksheet name for spreadsheet output
    pub sheet: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            output: None,
            format: TargetFormat::Delimited(b','),
            encoding: Encoding::Utf8,
            sheet: yasd_xlsx::DEFAULT_SHEET.to_string(),
        }
    }
}
