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

//! Workbook tests: write with `SheetWriter`, read back with `SheetReader`.

use std::fs::File;
use yasd_core::{Error, FieldValue, HeaderedRows, Record, RecordWriter};
use yasd_xlsx::{SheetReader, SheetWriter};

fn write_workbook(path: &std::path::Path, sheet: &str) {
    let columns = vec!["Id".to_string(), "Name".to_string()];
    let mut writer = SheetWriter::new(File::create(path).unwrap(), sheet).unwrap();
    writer.header(&columns).unwrap();
    for (id, name) in [("0001", "Acme"), ("0002", "Beta")] {
        let mut record = Record::new("Account").with_id(id);
        record.set_field("Name", FieldValue::text(name));
        writer.write(&columns, &record).unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn test_written_sheet_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accounts.xlsx");
    write_workbook(&path, "import");

    let reader = SheetReader::open(&path, "import", 0).unwrap();
    let mut rows = HeaderedRows::new(reader).unwrap();
    assert_eq!(rows.header(), ["Id", "Name"]);
    assert_eq!(rows.next_data_row().unwrap().unwrap().cells, vec!["0001", "Acme"]);
    assert_eq!(rows.next_data_row().unwrap().unwrap().cells, vec!["0002", "Beta"]);
    assert!(rows.next_data_row().unwrap().is_none());
}

#[test]
fn test_missing_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accounts.xlsx");
    write_workbook(&path, "export");

    match SheetReader::open(&path, "import", 0) {
        Err(Error::MissingSheet(name)) => assert_eq!(name, "import"),
        Err(other) => panic!("expected MissingSheet, got {other}"),
        Ok(_) => panic!("expected MissingSheet"),
    }
}

#[test]
fn test_missing_workbook() {
    let err = SheetReader::open("/nonexistent/book.xlsx", "import", 0)
        .err()
        .unwrap();
    assert!(matches!(err, Error::Io { .. }));
}
