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

//! Per-record result routing.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;
use yasd_core::{Encoding, Error, RecordResult, Result};
use yasd_csv::{DelimitedWriter, WriteConfig};

/// Writes each result to the success or error stream.
///
/// Successes become a one-column row holding the remote identifier;
/// failures a one-column row holding the error messages joined with `:`.
/// Both streams are flushed after every batch.
pub struct ResponseRouter<S: Write, E: Write> {
    success: DelimitedWriter<S>,
    error: DelimitedWriter<E>,
    routed: usize,
}

impl ResponseRouter<Box<dyn Write>, Box<dyn Write>> {
    /// Open the result streams; `None` writes to stderr.
    pub fn open(
        success: Option<&Path>,
        error: Option<&Path>,
        encoding: Encoding,
    ) -> Result<Self> {
        Ok(Self::new(sink(success)?, sink(error)?, encoding))
    }
}

fn sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path).map_err(|e| Error::io(path, e))?),
        None => Box::new(io::stderr()),
    })
}

impl<S: Write, E: Write> ResponseRouter<S, E> {
    /// Route into the given sinks.
    pub fn new(success: S, error: E, encoding: Encoding) -> Self {
        let config = WriteConfig {
            encoding,
            ..Default::default()
        };
        Self {
            success: DelimitedWriter::new(success, config.clone()),
            error: DelimitedWriter::new(error, config),
            routed: 0,
        }
    }

    /// Route one batch of results, in order.
    pub fn handle(&mut self, results: &[RecordResult]) -> Result<()> {
        for result in results {
            self.routed += 1;
            match result {
                RecordResult::Success { id } => {
                    self.success.write_row([id.as_str()])?;
                }
                RecordResult::Failure { .. } => {
                    let message = result.joined_errors();
                    warn!(record = self.routed, error = %message, "record rejected");
                    self.error.write_row([message.as_str()])?;
                }
            }
        }
        self.success.flush()?;
        self.error.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_in_order() {
        let mut ok = Vec::new();
        let mut failed = Vec::new();
        {
            let mut router = ResponseRouter::new(&mut ok, &mut failed, Encoding::Utf8);
            router
                .handle(&[
                    RecordResult::success("001A"),
                    RecordResult::failure("x"),
                    RecordResult::success("001C"),
                ])
                .unwrap();
        }
        assert_eq!(String::from_utf8(ok).unwrap(), "001A\n001C\n");
        assert_eq!(String::from_utf8(failed).unwrap(), "x\n");
    }

    #[test]
    fn test_joins_and_quotes_messages() {
        let mut ok = Vec::new();
        let mut failed = Vec::new();
        {
            let mut router = ResponseRouter::new(&mut ok, &mut failed, Encoding::Utf8);
            router
                .handle(&[RecordResult::Failure {
                    errors: vec!["Required fields are missing: [Name, Type]".into(), "dup".into()],
                }])
                .unwrap();
        }
        assert!(ok.is_empty());
        assert_eq!(
            String::from_utf8(failed).unwrap(),
            "\"Required fields are missing: [Name, Type]:dup\"\n"
        );
    }

    #[test]
    fn test_flushes_every_batch() {
        let dir = tempfile::tempdir().unwrap();
        let success = dir.path().join("success.csv");
        let error = dir.path().join("error.csv");
        let mut router =
            ResponseRouter::open(Some(&success), Some(&error), Encoding::Utf8).unwrap();
        router.handle(&[RecordResult::success("001A")]).unwrap();
        assert_eq!(std::fs::read_to_string(&success).unwrap(), "001A\n");
        router.handle(&[RecordResult::failure("bad")]).unwrap();
        assert_eq!(std::fs::read_to_string(&error).unwrap(), "bad\n");
    }
}
