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

//! Text encoding support for sources and sinks.
//!
//! Records are always handled as UTF-8 internally. Readers wrap their byte
//! stream with [`Encoding::decode_reader`]; writers wrap their sink with
//! [`Encoding::encode_writer`]. Fixed-width sources decode each field slice
//! separately with [`Encoding::decode_field`] because their widths are
//! measured in encoded bytes.

use crate::error::{Error, Result};
use encoding_rs::{EUC_JP, SHIFT_JIS, UTF_8};
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

/// A byte source decoded to UTF-8.
pub type DecodeReader<R> = DecodeReaderBytes<R, Vec<u8>>;

/// Supported text encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 (a leading byte order mark is stripped on read)
    #[default]
    Utf8,
    /// Shift-JIS (Windows-31J)
    ShiftJis,
    /// EUC-JP
    EucJp,
}

impl Encoding {
    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::ShiftJis => "Shift-JIS",
            Self::EucJp => "EUC-JP",
        }
    }

    fn codec(self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::ShiftJis => SHIFT_JIS,
            Self::EucJp => EUC_JP,
        }
    }

    /// Wrap a byte source so that it yields UTF-8.
    ///
    /// Malformed sequences are replaced with U+FFFD rather than failing the
    /// whole read.
    pub fn decode_reader<R: Read>(self, reader: R) -> DecodeReader<R> {
        DecodeReaderBytesBuilder::new()
            .encoding(Some(self.codec()))
            .build(reader)
    }

    /// Decode one field slice without replacement.
    ///
    /// Returns `None` when the bytes are not valid in this encoding, which
    /// happens for example when a fixed-width boundary splits a multi-byte
    /// character.
    pub fn decode_field(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        self.codec()
            .decode_without_bom_handling_and_without_replacement(bytes)
    }

    /// Wrap a UTF-8 sink so that it receives bytes in this encoding.
    pub fn encode_writer<W: Write>(self, writer: W) -> EncodeWriter<W> {
        EncodeWriter::new(writer, self)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTF8" | "UTF-8" | "UTF_8" => Ok(Self::Utf8),
            "SJIS" | "SHIFT-JIS" | "SHIFT_JIS" | "SHIFTJIS" => Ok(Self::ShiftJis),
            "EUC-JP" | "EUCJP" | "EUC_JP" => Ok(Self::EucJp),
            _ => Err(Error::UnsupportedEncoding(s.to_string())),
        }
    }
}

/// A [`Write`] adapter that re-encodes UTF-8 input.
///
/// Input may arrive split in the middle of a multi-byte character (the `csv`
/// crate flushes whole buffers), so an incomplete trailing sequence is held
/// back until the next write. Characters that do not exist in the target
/// encoding are written as numeric character references.
pub struct EncodeWriter<W: Write> {
    inner: W,
    encoding: Encoding,
    pending: Vec<u8>,
}

impl<W: Write> EncodeWriter<W> {
    fn new(inner: W, encoding: Encoding) -> Self {
        Self {
            inner,
            encoding,
            pending: Vec::new(),
        }
    }

    /// Get a reference to the wrapped sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the sink. Any incomplete trailing sequence is discarded.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for EncodeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.encoding == Encoding::Utf8 {
            return self.inner.write(buf);
        }

        self.pending.extend_from_slice(buf);
        let complete = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };

        if complete > 0 {
            let text = std::str::from_utf8(&self.pending[..complete])
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let (encoded, _, _) = self.encoding.codec().encode(text);
            self.inner.write_all(&encoded)?;
            self.pending.drain(..complete);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encoding_names() {
        assert_eq!("utf8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("sjis".parse::<Encoding>().unwrap(), Encoding::ShiftJis);
        assert_eq!("Shift_JIS".parse::<Encoding>().unwrap(), Encoding::ShiftJis);
        assert_eq!("euc-jp".parse::<Encoding>().unwrap(), Encoding::EucJp);
        assert!(matches!(
            "latin1".parse::<Encoding>(),
            Err(Error::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_decode_reader_shift_jis() {
        // "あ,i" in Shift-JIS
        let bytes: &[u8] = &[0x82, 0xa0, b',', b'i'];
        let mut out = String::new();
        Encoding::ShiftJis
            .decode_reader(bytes)
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "あ,i");
    }

    #[test]
    fn test_decode_reader_strips_utf8_bom() {
        let bytes: &[u8] = b"\xef\xbb\xbfName";
        let mut out = String::new();
        Encoding::Utf8
            .decode_reader(bytes)
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "Name");
    }

    #[test]
    fn test_decode_field_rejects_split_character() {
        assert_eq!(Encoding::ShiftJis.decode_field(&[0x82, 0xa0]).unwrap(), "あ");
        assert!(Encoding::ShiftJis.decode_field(&[0x82]).is_none());
        assert!(Encoding::Utf8.decode_field(&[0xe3, 0x81]).is_none());
    }

    #[test]
    fn test_encode_writer_handles_split_input() {
        let mut writer = Encoding::EucJp.encode_writer(Vec::new());
        let text = "あい".as_bytes();
        writer.write_all(&text[..2]).unwrap();
        writer.write_all(&text[2..4]).unwrap();
        writer.write_all(&text[4..]).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.into_inner(), vec![0xa4, 0xa2, 0xa4, 0xa4]);
    }

    #[test]
    fn test_encode_writer_utf8_passthrough() {
        let mut writer = Encoding::Utf8.encode_writer(Vec::new());
        writer.write_all("あ".as_bytes()).unwrap();
        assert_eq!(writer.get_ref().as_slice(), "あ".as_bytes());
    }
}
