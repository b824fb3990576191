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

//! Source documents in every input format.
//!
//! The CSV, JSON and YAML fixtures describe the same three accounts, with
//! header `Id, Name, Owner.Email`.

use std::io::Write;
use tempfile::NamedTempFile;

/// Three accounts as CSV.
pub const ACCOUNTS_CSV: &str = "\
Id,Name,Owner.Email
001000000000001,Acme,ada@example.com
001000000000002,\"Beta, Inc\",grace@example.com
001000000000003,Gamma,
";

/// Three accounts as a JSON array.
pub const ACCOUNTS_JSON: &str = r#"[
  {"Id": "001000000000001", "Name": "Acme", "Owner.Email": "ada@example.com"},
  {"Id": "001000000000002", "Name": "Beta, Inc", "Owner.Email": "grace@example.com"},
  {"Id": "001000000000003", "Name": "Gamma", "Owner.Email": null}
]
"#;

/// Three accounts as a YAML sequence.
pub const ACCOUNTS_YAML: &str = "\
- Id: '001000000000001'
  Name: Acme
  Owner.Email: ada@example.com
- Id: '001000000000002'
  Name: Beta, Inc
  Owner.Email: grace@example.com
- Id: '001000000000003'
  Name: Gamma
";

/// CSV with a `Name` column and `rows` data rows (`Account 1`, `Account 2`, ...).
pub fn names_csv(rows: usize) -> String {
    let mut csv = String::from("Name\n");
    for i in 1..=rows {
        csv.push_str(&format!("Account {i}\n"));
    }
    csv
}

/// Write `contents` to a named temporary file with the given suffix.
///
/// The file is deleted when the returned handle is dropped.
pub fn temp_file(suffix: &str, contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("yasd-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
