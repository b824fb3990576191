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

//! YAML support for YASD.
//!
//! - [`YamlReader`] reads a sequence of mappings as a table
//! - [`YamlWriter`] renders query results as a sequence of mappings
//!
//! # Examples
//!
//! ```
//! use yasd_core::{Encoding, HeaderedRows};
//! use yasd_yaml::YamlReader;
//!
//! let input = "- Name: Acme\n  Phone: 555-0100\n- Name: Beta\n";
//! let reader = YamlReader::from_reader(input.as_bytes(), Encoding::Utf8, 0)?;
//! let mut rows = HeaderedRows::new(reader)?;
//!
//! assert_eq!(rows.header(), ["Name", "Phone"]);
//! rows.next_data_row()?;
//! assert_eq!(rows.next_data_row()?.unwrap().cells, vec!["Beta", ""]);
//! # Ok::<(), yasd_core::Error>(())
//! ```

mod error;
mod reader;
mod writer;

pub use error::YamlError;
pub use reader::YamlReader;
pub use writer::YamlWriter;
