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

//! Reader and writer selection.
//!
//! The variant is chosen once per run, from an explicit `--format` or from
//! the file extension, and handed to the pipeline as a trait object.

use crate::config::{ExportConfig, LoadConfig};
use crate::error::CliError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use yasd_core::{DebugWriter, Error, RecordWriter, RowReader};
use yasd_csv::{
    DelimitedReader, DelimitedWriter, FixedWidthLayout, FixedWidthReader, ReadConfig, WriteConfig,
};
use yasd_json::{DocumentReader, JsonLayout, JsonLinesWriter, JsonWriter};
use yasd_xlsx::{SheetReader, SheetWriter};
use yasd_yaml::{YamlReader, YamlWriter};

/// Input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with the given delimiter
    Delimited(u8),
    /// Spreadsheet workbook
    Spreadsheet,
    /// JSON array of objects
    Json,
    /// One JSON object per line
    JsonLines,
    /// YAML sequence of mappings
    Yaml,
    /// Fixed-width lines
    FixedWidth,
}

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// Delimited text with the given delimiter
    Delimited(u8),
    /// JSON array of objects
    Json,
    /// One JSON object per line
    JsonLines,
    /// YAML sequence of mappings
    Yaml,
    /// `.xlsx` workbook
    Spreadsheet,
    /// Pretty `Debug` dump of every record
    Debug,
}

/// Delimiter selected by `--mode`.
fn mode_delimiter(mode: Option<&str>) -> Result<u8, CliError> {
    match mode.map(str::to_ascii_lowercase).as_deref() {
        None | Some("") | Some("csv") | Some("c") => Ok(b','),
        Some("tsv") | Some("t") => Ok(b'\t'),
        Some(other) => Err(CliError::invalid(
            "mode",
            format!("'{other}' is not one of csv, tsv"),
        )),
    }
}

/// Parse `--delimiter`: one ASCII character, or `tab`.
pub fn parse_delimiter(value: &str) -> Result<u8, CliError> {
    if value == "tab" || value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [b'"' | b'\r' | b'\n'] => Err(CliError::invalid(
            "delimiter",
            "quotes and line breaks cannot delimit fields",
        )),
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(CliError::invalid(
            "delimiter",
            format!("'{value}' is not a single ASCII character"),
        )),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

impl SourceFormat {
    /// Pick the input format.
    ///
    /// `format` wins over the extension; `mode` only affects delimited
    /// sources. Unknown extensions are read as delimited text.
    pub fn detect(path: &Path, format: Option<&str>, mode: Option<&str>) -> Result<Self, CliError> {
        let delimiter = mode_delimiter(mode)?;
        let name = match format {
            Some(format) => format.to_ascii_lowercase(),
            None => extension(path),
        };
        Ok(match name.as_str() {
            "csv" if mode.is_none() => Self::Delimited(b','),
            "tsv" if mode.is_none() => Self::Delimited(b'\t'),
            "xlsx" | "xlsm" | "xls" | "ods" => Self::Spreadsheet,
            "json" => Self::Json,
            "jsonl" | "ndjson" => Self::JsonLines,
            "yaml" | "yml" => Self::Yaml,
            "dat" | "fixed" => Self::FixedWidth,
            _ if format.is_some() && !matches!(name.as_str(), "csv" | "tsv") => {
                return Err(CliError::invalid(
                    "format",
                    format!("'{name}' is not a supported source format"),
                ))
            }
            _ => Self::Delimited(delimiter),
        })
    }

    /// Replace the delimiter of a delimited source; other formats ignore it.
    pub fn with_delimiter(self, delimiter: Option<u8>) -> Self {
        match (self, delimiter) {
            (Self::Delimited(_), Some(delimiter)) => Self::Delimited(delimiter),
            (format, _) => format,
        }
    }
}

impl TargetFormat {
    /// Pick the output format; delimited text when nothing says otherwise.
    pub fn detect(
        output: Option<&Path>,
        format: Option<&str>,
        mode: Option<&str>,
    ) -> Result<Self, CliError> {
        let delimiter = mode_delimiter(mode)?;
        let name = match (format, output) {
            (Some(format), _) => format.to_ascii_lowercase(),
            (None, Some(path)) => extension(path),
            (None, None) => String::new(),
        };
        Ok(match name.as_str() {
            "csv" if mode.is_none() => Self::Delimited(b','),
            "tsv" if mode.is_none() => Self::Delimited(b'\t'),
            "json" => Self::Json,
            "jsonl" | "ndjson" => Self::JsonLines,
            "yaml" | "yml" => Self::Yaml,
            "xlsx" => Self::Spreadsheet,
            "debug" | "pp" => Self::Debug,
            _ if format.is_some() && !matches!(name.as_str(), "csv" | "tsv") => {
                return Err(CliError::invalid(
                    "format",
                    format!("'{name}' is not a supported output format"),
                ))
            }
            _ => Self::Delimited(delimiter),
        })
    }

    /// Replace the delimiter of delimited output; other formats ignore it.
    pub fn with_delimiter(self, delimiter: Option<u8>) -> Self {
        match (self, delimiter) {
            (Self::Delimited(_), Some(delimiter)) => Self::Delimited(delimiter),
            (format, _) => format,
        }
    }
}

/// Open the configured source.
pub fn open_source(config: &LoadConfig) -> yasd_core::Result<Box<dyn RowReader>> {
    let path = config.source.as_path();
    let reader: Box<dyn RowReader> = match config.format {
        SourceFormat::Delimited(delimiter) => Box::new(DelimitedReader::open(
            path,
            ReadConfig {
                delimiter,
                encoding: config.encoding,
                start_row: config.start_row,
            },
        )?),
        SourceFormat::Spreadsheet => {
            Box::new(SheetReader::open(path, &config.sheet, config.start_row)?)
        }
        SourceFormat::Json => Box::new(DocumentReader::open(
            path,
            JsonLayout::Array,
            config.encoding,
            config.start_row,
        )?),
        SourceFormat::JsonLines => Box::new(DocumentReader::open(
            path,
            JsonLayout::Lines,
            config.encoding,
            config.start_row,
        )?),
        SourceFormat::Yaml => Box::new(YamlReader::open(path, config.encoding, config.start_row)?),
        SourceFormat::FixedWidth => {
            let layout: FixedWidthLayout = config
                .layout
                .clone()
                .ok_or_else(|| Error::config("fixed-width sources need --widths"))?;
            Box::new(FixedWidthReader::open(
                path,
                layout,
                config.encoding,
                config.start_row,
            )?)
        }
    };
    Ok(reader)
}

/// Open the configured export target.
pub fn open_target(config: &ExportConfig) -> yasd_core::Result<Box<dyn RecordWriter>> {
    let out: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| Error::io(path, e))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let writer: Box<dyn RecordWriter> = match config.format {
        TargetFormat::Delimited(delimiter) => Box::new(DelimitedWriter::new(
            out,
            WriteConfig {
                delimiter,
                encoding: config.encoding,
                ..Default::default()
            },
        )),
        TargetFormat::Json => Box::new(JsonWriter::new(out, config.encoding)),
        TargetFormat::JsonLines => Box::new(JsonLinesWriter::new(out, config.encoding)),
        TargetFormat::Yaml => Box::new(YamlWriter::new(out, config.encoding)),
        TargetFormat::Spreadsheet => Box::new(SheetWriter::new(out, &config.sheet)?),
        TargetFormat::Debug => Box::new(DebugWriter::new(out)),
    };
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(name: &str) -> SourceFormat {
        SourceFormat::detect(Path::new(name), None, None).unwrap()
    }

    #[test]
    fn test_source_by_extension() {
        assert_eq!(source("a.csv"), SourceFormat::Delimited(b','));
        assert_eq!(source("a.TSV"), SourceFormat::Delimited(b'\t'));
        assert_eq!(source("a.xlsx"), SourceFormat::Spreadsheet);
        assert_eq!(source("a.ods"), SourceFormat::Spreadsheet);
        assert_eq!(source("a.ndjson"), SourceFormat::JsonLines);
        assert_eq!(source("a.yml"), SourceFormat::Yaml);
        assert_eq!(source("a.dat"), SourceFormat::FixedWidth);
        assert_eq!(source("a.txt"), SourceFormat::Delimited(b','));
        assert_eq!(source("noext"), SourceFormat::Delimited(b','));
    }

    #[test]
    fn test_mode_and_format_override() {
        let path = Path::new("a.csv");
        assert_eq!(
            SourceFormat::detect(path, None, Some("tsv")).unwrap(),
            SourceFormat::Delimited(b'\t')
        );
        assert_eq!(
            SourceFormat::detect(path, Some("fixed"), None).unwrap(),
            SourceFormat::FixedWidth
        );
        assert!(SourceFormat::detect(path, Some("parquet"), None).is_err());
        assert!(SourceFormat::detect(path, None, Some("pipe")).is_err());
    }

    #[test]
    fn test_delimiter_override() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        for bad in ["", ";;", "\"", "\u{a7}"] {
            assert!(matches!(
                parse_delimiter(bad),
                Err(CliError::InvalidArgument { name: "delimiter", .. })
            ));
        }

        let tsv = SourceFormat::detect(Path::new("a.tsv"), None, None).unwrap();
        assert_eq!(tsv.with_delimiter(Some(b'|')), SourceFormat::Delimited(b'|'));
        assert_eq!(tsv.with_delimiter(None), SourceFormat::Delimited(b'\t'));
        assert_eq!(
            SourceFormat::Json.with_delimiter(Some(b'|')),
            SourceFormat::Json
        );
        assert_eq!(
            TargetFormat::Delimited(b',').with_delimiter(Some(b';')),
            TargetFormat::Delimited(b';')
        );
        assert_eq!(
            TargetFormat::Yaml.with_delimiter(Some(b';')),
            TargetFormat::Yaml
        );
    }

    #[test]
    fn test_target_detection() {
        assert_eq!(
            TargetFormat::detect(None, None, None).unwrap(),
            TargetFormat::Delimited(b',')
        );
        assert_eq!(
            TargetFormat::detect(None, None, Some("t")).unwrap(),
            TargetFormat::Delimited(b'\t')
        );
        let out = PathBuf::from("out.jsonl");
        assert_eq!(
            TargetFormat::detect(Some(&out), None, None).unwrap(),
            TargetFormat::JsonLines
        );
        assert_eq!(
            TargetFormat::detect(Some(&out), Some("debug"), None).unwrap(),
            TargetFormat::Debug
        );
        assert_eq!(
            TargetFormat::detect(None, Some("xlsx"), None).unwrap(),
            TargetFormat::Spreadsheet
        );
    }

    #[test]
    fn test_fixed_width_needs_layout() {
        let config = LoadConfig {
            source: PathBuf::from("input.dat"),
            format: SourceFormat::FixedWidth,
            ..Default::default()
        };
        assert!(matches!(open_source(&config), Err(Error::Config(_))));
    }
}
