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

//! Key file creation, rotation and loading.

use yasd_cipher::{decrypt, encrypt, CipherError, KeyFile};

#[test]
fn test_create_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config").join("yasd").join("key");

    let created = KeyFile::create(&path, false).unwrap();
    let loaded = KeyFile::load(&path).unwrap();
    assert_eq!(created.as_bytes(), loaded.as_bytes());

    let stored = encrypt("tiger", &created).unwrap();
    assert_eq!(decrypt(&stored, &loaded).unwrap(), "tiger");
}

#[test]
fn test_create_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key");
    let first = KeyFile::create(&path, false).unwrap();

    let err = KeyFile::create(&path, false).unwrap_err();
    assert!(matches!(err, CipherError::KeyExists(_)));
    assert!(err.to_string().contains("--rotate"));
    assert_eq!(KeyFile::load(&path).unwrap().as_bytes(), first.as_bytes());
}

#[test]
fn test_create_keeps_foreign_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key");
    std::fs::write(&path, "not a key\n").unwrap();

    assert!(matches!(
        KeyFile::create(&path, false),
        Err(CipherError::KeyExists(_))
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not a key\n");
}

#[cfg(unix)]
#[test]
fn test_create_does_not_follow_dangling_symlink() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("elsewhere");
    let path = dir.path().join("key");
    std::os::unix::fs::symlink(&target, &path).unwrap();

    assert!(matches!(
        KeyFile::create(&path, false),
        Err(CipherError::KeyExists(_))
    ));
    assert!(!target.exists());
}

#[test]
fn test_rotate_replaces_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key");
    let first = KeyFile::create(&path, false).unwrap();
    let second = KeyFile::create(&path, true).unwrap();

    assert_ne!(first.as_bytes(), second.as_bytes());
    assert_eq!(KeyFile::load(&path).unwrap().as_bytes(), second.as_bytes());
}

#[cfg(unix)]
#[test]
fn test_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("yasd");
    let path = parent.join("key");
    KeyFile::create(&path, false).unwrap();

    let file_mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(file_mode & 0o777, 0o600);
    let dir_mode = std::fs::metadata(&parent).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);
}

#[test]
fn test_load_rejects_malformed_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key");
    std::fs::write(&path, "c2hvcnQ=\n").unwrap();
    assert!(matches!(
        KeyFile::load(&path),
        Err(CipherError::InvalidKeyLength { actual: 5, .. })
    ));
}

#[test]
fn test_load_missing_file_names_path() {
    let err = KeyFile::load("/nonexistent/yasd/key").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/yasd/key"));
}
