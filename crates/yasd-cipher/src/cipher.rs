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

//! AES-256-CBC credential encryption.
//!
//! Wire format: base64(IV || AES-256-CBC(PKCS#7(plaintext))) with a fresh
//! random 16-byte IV per call. PKCS#7 always appends 1 to 16 bytes, so a
//! block-aligned plaintext gains a full block of padding.

use crate::error::{CipherError, CipherResult};
use crate::key::CredentialKey;
use aes::Aes256;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::Zeroizing;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes; also the IV size.
pub const BLOCK_SIZE: usize = 16;

/// Encrypts a credential.
///
/// The output is `16 + 16k` bytes before base64 encoding, where `k` is the
/// number of padded plaintext blocks.
pub fn encrypt(plaintext: &str, key: &CredentialKey) -> CipherResult<String> {
    let mut iv = [0u8; BLOCK_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let encryptor = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv).map_err(|_| {
        CipherError::InvalidKeyLength {
            expected: crate::KEY_SIZE,
            actual: key.as_bytes().len(),
        }
    })?;
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut out = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(out))
}

/// Decrypts a credential produced by [`encrypt`].
///
/// Fails with [`CipherError::Padding`] when the ciphertext is not a
/// positive number of whole blocks after the IV, or when the padding is
/// malformed: a pad byte of 0, above 16, or pad bytes that disagree. A
/// wrong key usually produces malformed padding, but not always.
pub fn decrypt(encoded: &str, key: &CredentialKey) -> CipherResult<String> {
    let data = STANDARD.decode(encoded.trim())?;
    if data.len() < 2 * BLOCK_SIZE || data.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::Padding(
            "ciphertext must be the IV plus a positive number of 16-byte blocks",
        ));
    }

    let (iv, ciphertext) = data.split_at(BLOCK_SIZE);
    let decryptor = Aes256CbcDec::new_from_slices(key.as_bytes(), iv).map_err(|_| {
        CipherError::InvalidKeyLength {
            expected: crate::KEY_SIZE,
            actual: key.as_bytes().len(),
        }
    })?;
    let plain = Zeroizing::new(
        decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CipherError::Padding("invalid PKCS#7 padding"))?,
    );
    Ok(String::from_utf8(plain.to_vec())?)
}
