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

//! Credential keys and key files.
//!
//! A key file holds the base64 text of 32 random bytes. It is created with
//! owner-only permissions (0600, parent directories 0700) and is never
//! overwritten unless rotation is requested.

use crate::error::{CipherError, CipherResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Size of credential keys in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// An AES-256 key, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CredentialKey {
    bytes: [u8; KEY_SIZE],
}

impl CredentialKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Decodes a key from base64 text. Surrounding whitespace is ignored.
    pub fn from_base64(text: &str) -> CipherResult<Self> {
        let decoded = Zeroizing::new(STANDARD.decode(text.trim())?);
        let bytes: [u8; KEY_SIZE] =
            decoded
                .as_slice()
                .try_into()
                .map_err(|_| CipherError::InvalidKeyLength {
                    expected: KEY_SIZE,
                    actual: decoded.len(),
                })?;
        Ok(Self { bytes })
    }

    /// Base64 text of the key.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(STANDARD.encode(self.bytes))
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Generates a key from the operating system RNG.
pub fn generate_key() -> CredentialKey {
    let mut bytes = [0u8; KEY_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    let key = CredentialKey::from_bytes(bytes);
    bytes.zeroize();
    key
}

/// Key file operations.
pub struct KeyFile;

impl KeyFile {
    /// `~/.config/yasd/key`.
    pub fn default_path() -> CipherResult<PathBuf> {
        let dirs = directories::BaseDirs::new().ok_or(CipherError::NoHomeDir)?;
        Ok(dirs.home_dir().join(".config").join("yasd").join("key"))
    }

    /// Generate a key and store it at `path`.
    ///
    /// Fails with [`CipherError::KeyExists`] when anything already sits at
    /// `path` and `rotate` is false. The existence check and the create are
    /// one exclusive open, so a racing writer or a dangling symlink is never
    /// overwritten.
    pub fn create(path: impl AsRef<Path>, rotate: bool) -> CipherResult<CredentialKey> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_private_dir(parent).map_err(|e| CipherError::io(parent, e))?;
        }

        let key = generate_key();
        let mut file = open_private(path, rotate).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => CipherError::KeyExists(path.to_path_buf()),
            _ => CipherError::io(path, e),
        })?;
        let text = key.to_base64();
        file.write_all(text.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .and_then(|_| file.sync_all())
            .map_err(|e| CipherError::io(path, e))?;
        Ok(key)
    }

    /// Read and validate the key stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> CipherResult<CredentialKey> {
        let path = path.as_ref();
        let text = Zeroizing::new(fs::read_to_string(path).map_err(|e| CipherError::io(path, e))?);
        CredentialKey::from_base64(&text)
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

fn open_options(replace: bool) -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    options.write(true);
    if replace {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options
}

#[cfg(unix)]
fn open_private(path: &Path, replace: bool) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = open_options(replace).mode(0o600).open(path)?;
    // mode() only applies when the file is created
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path, replace: bool) -> std::io::Result<fs::File> {
    open_options(replace).open(path)
}
