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

//! Query export.

use tracing::debug;
use yasd_core::{Error, RecordApi, RecordWriter, Result};

/// Counts reported at the end of an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Result pages fetched
    pub pages: usize,
    /// Records written
    pub records: usize,
}

/// Run `query` and write every record through `writer`.
///
/// The header is written once, before the first record. Pages are fetched
/// with `query_more` until the service reports the last one. The writer is
/// finished even when a page fails, so everything already written reaches
/// the sink.
pub fn export<A, W>(api: &mut A, query: &str, writer: &mut W) -> Result<ExportSummary>
where
    A: RecordApi + ?Sized,
    W: RecordWriter + ?Sized,
{
    let query = expand_query(api, query)?;
    let columns = query_columns(&query)?;
    let written = write_pages(api, &query, &columns, writer);
    let finished = writer.finish();
    let summary = written?;
    finished?;
    Ok(summary)
}

fn write_pages<A, W>(
    api: &mut A,
    query: &str,
    columns: &[String],
    writer: &mut W,
) -> Result<ExportSummary>
where
    A: RecordApi + ?Sized,
    W: RecordWriter + ?Sized,
{
    let mut summary = ExportSummary::default();
    let mut page = api.query(query)?;
    writer.header(columns)?;
    loop {
        summary.pages += 1;
        for record in &page.records {
            writer.write(columns, record)?;
        }
        summary.records += page.records.len();
        debug!(
            page = summary.pages,
            records = page.records.len(),
            "wrote query page"
        );
        match page.locator.take() {
            Some(locator) => page = api.query_more(&locator)?,
            None => return Ok(summary),
        }
    }
}

/// Expand `SELECT * FROM T` into every field of `T`.
///
/// Any other query is returned unchanged.
pub fn expand_query<A: RecordApi + ?Sized>(api: &mut A, query: &str) -> Result<String> {
    let Some((select_list, rest)) = split_select(query) else {
        return Ok(query.to_string());
    };
    if select_list.trim() != "*" {
        return Ok(query.to_string());
    }
    let type_name: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if type_name.is_empty() {
        return Err(Error::config(format!("malformed query: {query}")));
    }
    let fields = api.describe(&type_name)?.field_names();
    Ok(format!("SELECT {} FROM {}", fields.join(","), rest.trim_start()))
}

/// Column names of a query's select list, trimmed.
///
/// Dotted relationship paths are allowed. Function calls, aggregates and
/// subqueries are not, since their output columns have no field path.
pub fn query_columns(query: &str) -> Result<Vec<String>> {
    let (select_list, _) =
        split_select(query).ok_or_else(|| Error::config(format!("malformed query: {query}")))?;
    if select_list.contains(|c: char| c == '(' || c == ')') {
        return Err(Error::config(
            "functions and subqueries are not supported in exported queries",
        ));
    }
    let columns: Vec<String> = select_list
        .split(',')
        .map(|column| column.trim().to_string())
        .collect();
    if columns.iter().any(String::is_empty) {
        return Err(Error::config(format!("malformed query: {query}")));
    }
    Ok(columns)
}

/// Split `SELECT <list> FROM <rest>` into list and rest. Keywords match
/// case-insensitively and must be delimited by whitespace.
fn split_select(query: &str) -> Option<(&str, &str)> {
    let query = query.trim();
    let keyword = query.get(..6)?;
    if !keyword.eq_ignore_ascii_case("select") {
        return None;
    }
    let after = &query[6..];
    if !after.starts_with(|c: char| c.is_ascii_whitespace()) {
        return None;
    }
    let from = find_keyword(after, "from")?;
    Some((&after[..from], &after[from + 4..]))
}

fn find_keyword(haystack: &str, keyword: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets
    let lower = haystack.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut start = 0;
    while let Some(pos) = lower[start..].find(keyword) {
        let at = start + pos;
        let end = at + keyword.len();
        let before = at > 0 && bytes[at - 1].is_ascii_whitespace();
        let after = bytes.get(end).is_some_and(u8::is_ascii_whitespace);
        if before && after {
            return Some(at);
        }
        start = end;
    }
    None
}
