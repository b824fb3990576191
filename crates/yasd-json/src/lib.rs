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

//! JSON support for YASD.
//!
//! - [`DocumentReader`] reads a JSON array of objects or a JSON Lines file
//!   as a table; it is also the table builder behind the YAML source
//! - [`JsonWriter`] and [`JsonLinesWriter`] render query results
//!
//! # Examples
//!
//! ```
//! use yasd_core::{Encoding, HeaderedRows};
//! use yasd_json::{DocumentReader, JsonLayout};
//!
//! let input = r#"[{"Name": "Acme"}, {"Name": "Beta", "Phone": "555"}]"#;
//! let reader = DocumentReader::from_reader(input.as_bytes(), JsonLayout::Array, Encoding::Utf8, 0)?;
//! let mut rows = HeaderedRows::new(reader)?;
//!
//! assert_eq!(rows.header(), ["Name", "Phone"]);
//! assert_eq!(rows.next_data_row()?.unwrap().cells, vec!["Acme", ""]);
//! # Ok::<(), yasd_core::Error>(())
//! ```

mod error;
mod reader;
mod writer;

pub use error::{type_name, JsonError, Result};
pub use reader::{cell_text, DocumentReader, JsonLayout};
pub use writer::{JsonLinesWriter, JsonWriter};
