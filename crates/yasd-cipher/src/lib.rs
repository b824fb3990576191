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

//! Credential protection for YASD.
//!
//! Passwords can be stored encrypted instead of in clear text. A random
//! AES-256 key is generated once into a key file; `yasd encrypt` prints the
//! encrypted form of a password, and load/export commands decrypt it just
//! before login.
//!
//! # Examples
//!
//! ```
//! use yasd_cipher::{decrypt, encrypt, generate_key};
//!
//! let key = generate_key();
//! let stored = encrypt("s3cret", &key)?;
//! assert_eq!(decrypt(&stored, &key)?, "s3cret");
//! # Ok::<(), yasd_cipher::CipherError>(())
//! ```

mod cipher;
mod error;
mod key;

pub use cipher::{decrypt, encrypt, BLOCK_SIZE};
pub use error::{CipherError, CipherResult};
pub use key::{generate_key, CredentialKey, KeyFile, KEY_SIZE};
