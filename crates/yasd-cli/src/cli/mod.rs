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

//! Command definitions and dispatch.
//!
//! Every load command shares [`LoginArgs`] and [`SourceArgs`]; export
//! shares the login options and adds [`ExportArgs`]. The key commands work
//! offline.

mod args;

pub use args::{ExportArgs, LoginArgs, SourceArgs};

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;
use std::path::PathBuf;
use tracing::info;
use yasd_cipher::KeyFile;
use yasd_core::{Operation, ID_FIELD};
use yasd_soap::DEFAULT_QUERY_BATCH_SIZE;

/// Top-level commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use yasd_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// let cli = Cli::parse_from(["yasd", "generate-key", "--key", "/tmp/yasd-key"]);
/// cli.command.execute().unwrap();
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Export query results to a file
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        login: LoginArgs,

        #[command(flatten)]
        target: ExportArgs,
    },

    /// Create one record per source row
    #[command(visible_alias = "i")]
    Insert {
        #[command(flatten)]
        login: LoginArgs,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Update records identified by the Id column
    #[command(visible_alias = "u")]
    Update {
        #[command(flatten)]
        login: LoginArgs,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Insert or update records matched on an external id field
    Upsert {
        #[command(flatten)]
        login: LoginArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// External id field used for matching
        #[arg(short = 'k', long, default_value = ID_FIELD)]
        upsert_key: String,
    },

    /// Delete records listed in the Id column
    #[command(visible_alias = "d")]
    Delete {
        #[command(flatten)]
        login: LoginArgs,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Restore deleted records listed in the Id column
    Undelete {
        #[command(flatten)]
        login: LoginArgs,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Create the key file used to encrypt passwords
    GenerateKey {
        /// Key file, ~/.config/yasd/key by default
        #[arg(long, value_name = "FILE")]
        key: Option<PathBuf>,

        /// Replace an existing key file
        #[arg(long)]
        rotate: bool,
    },

    /// Encrypt a password for use with --key
    Encrypt {
        /// Key file, ~/.config/yasd/key by default
        #[arg(long, value_name = "FILE")]
        key: Option<PathBuf>,

        /// Password to encrypt; prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: invalid options, unreadable local
    /// files, credential failures or a failed remote call. Records the
    /// remote system rejects are written to the error file and do not make
    /// the command fail.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Export { login, target } => {
                let batch_size = target.batch_size;
                if batch_size == 0 {
                    return Err(CliError::invalid("batch-size", "must be positive"));
                }
                let config = target.into_config()?;
                let login = login.into_config(batch_size)?;
                commands::export(&config, &login)?;
                Ok(())
            }
            Commands::Insert { login, source } => run_load(Operation::Insert, login, source),
            Commands::Update { login, source } => run_load(Operation::Update, login, source),
            Commands::Upsert {
                login,
                source,
                upsert_key,
            } => run_load(
                Operation::Upsert {
                    external_id_field: upsert_key,
                },
                login,
                source,
            ),
            Commands::Delete { login, source } => run_load(Operation::Delete, login, source),
            Commands::Undelete { login, source } => run_load(Operation::Undelete, login, source),
            Commands::GenerateKey { key, rotate } => commands::generate_key(&key_path(key)?, rotate),
            Commands::Encrypt { key, password } => {
                commands::encrypt_password(password, &key_path(key)?)
            }
        }
    }
}

fn run_load(operation: Operation, login: LoginArgs, source: SourceArgs) -> Result<(), CliError> {
    let config = source.into_config(operation)?;
    let login = login.into_config(DEFAULT_QUERY_BATCH_SIZE)?;
    let summary = commands::load(&config, &login)?;
    if summary.failures > 0 {
        info!(
            failures = summary.failures,
            "some records were rejected; see the error file"
        );
    }
    Ok(())
}

fn key_path(key: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match key {
        Some(path) => Ok(path),
        None => Ok(KeyFile::default_path()?),
    }
}
