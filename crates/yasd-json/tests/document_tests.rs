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

//! File-based tests for JSON sources and targets.

use yasd_core::{Encoding, FieldValue, HeaderedRows, Record, RecordWriter};
use yasd_json::{DocumentReader, JsonLayout, JsonLinesWriter};
use yasd_test::fixtures;

#[test]
fn test_json_file_source() {
    let file = fixtures::temp_file(".json", fixtures::ACCOUNTS_JSON.as_bytes());
    let reader = DocumentReader::open(file.path(), JsonLayout::Array, Encoding::Utf8, 0).unwrap();
    let mut rows = HeaderedRows::new(reader).unwrap();

    assert_eq!(rows.header(), ["Id", "Name", "Owner.Email"]);
    let mut count = 0;
    while rows.next_data_row().unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 3);
}

#[test]
fn test_shift_jis_json_lines_round_trip() {
    let mut record = Record::new("Account");
    record.set_field("Name", FieldValue::text("株式会社"));
    let columns = vec!["Name".to_string()];

    let mut writer = JsonLinesWriter::new(Vec::new(), Encoding::ShiftJis);
    writer.write(&columns, &record).unwrap();
    writer.finish().unwrap();
    let bytes = writer.into_inner();
    assert!(std::str::from_utf8(&bytes).is_err());

    let file = fixtures::temp_file(".jsonl", &bytes);
    let reader =
        DocumentReader::open(file.path(), JsonLayout::Lines, Encoding::ShiftJis, 0).unwrap();
    let mut rows = HeaderedRows::new(reader).unwrap();
    assert_eq!(rows.next_data_row().unwrap().unwrap().cells, vec!["株式会社"]);
}
