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

//! Key generation and password encryption.

use crate::error::CliError;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, info};
use yasd_cipher::{decrypt, encrypt, KeyFile};

/// Create a key file at `path` and report where it went.
pub fn generate_key(path: &Path, rotate: bool) -> Result<(), CliError> {
    KeyFile::create(path, rotate)?;
    info!(path = %path.display(), rotate, "key generated");
    println!("{}", path.display());
    Ok(())
}

/// Encrypt a password with the key at `key_path` and print the ciphertext.
///
/// Without `password` the password is read from one line of stdin after a
/// prompt on stderr. The key is loaded first so a bad key fails before the
/// prompt.
pub fn encrypt_password(password: Option<String>, key_path: &Path) -> Result<(), CliError> {
    let key = KeyFile::load(key_path)?;
    let password = match password {
        Some(password) => password,
        None => {
            eprint!("Password: ");
            io::stderr().flush().map_err(yasd_core::Error::from)?;
            read_password(io::stdin().lock())?
        }
    };
    if password.is_empty() {
        return Err(CliError::invalid("password", "password is empty"));
    }
    println!("{}", encrypt(&password, &key)?);
    Ok(())
}

fn read_password<R: BufRead>(mut input: R) -> Result<String, CliError> {
    let mut line = String::new();
    input.read_line(&mut line).map_err(yasd_core::Error::from)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// The login password, decrypted with the key at `key` when one is given.
///
/// Runs before login, so a wrong key or corrupted ciphertext never reaches
/// the remote system.
pub fn resolve_password(password: &str, key: Option<&Path>) -> Result<String, CliError> {
    match key {
        None => Ok(password.to_string()),
        Some(path) => {
            debug!(key = %path.display(), "decrypting password");
            let key = KeyFile::load(path)?;
            Ok(decrypt(password.trim(), &key)?)
        }
    }
}
