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

//! YASD command-line interface

use clap::Parser;
use std::process::ExitCode;
use yasd_cli::cli::Commands;
use yasd_cli::logging;

/// YASD - bulk record transfer toolkit
///
/// Loads flat files into a remote record API in batches and exports query
/// results back to flat files.
///
/// # Examples
///
/// ```bash
/// # Insert accounts, writing ids to success.csv and rejections to error.csv
/// yasd insert -u ada@example.com -p "$PASSWORD" -t Account -f accounts.csv
///
/// # Export contacts as JSON
/// yasd export -q "SELECT Id, LastName FROM Contact" -o contacts.json
///
/// # Store an encrypted password
/// yasd generate-key && yasd encrypt
/// ```
#[derive(Parser)]
#[command(name = "yasd")]
#[command(author, version, about = "YASD - bulk record transfer toolkit", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
