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

//! Source-to-API load loop.

use crate::pipeline::builder::RecordBuilder;
use crate::pipeline::dispatcher::{BatchDispatcher, TransferSummary};
use crate::pipeline::reference::ReferenceCache;
use crate::pipeline::router::ResponseRouter;
use std::io::Write;
use tracing::info;
use yasd_core::{FieldMap, HeaderedRows, Operation, RecordApi, Result, RowReader};

/// What to load and how.
#[derive(Debug, Clone, Copy)]
pub struct LoadRequest<'a> {
    /// Mutation to perform
    pub operation: &'a Operation,
    /// Destination type
    pub type_name: &'a str,
    /// Header mapping, applied once
    pub mapping: Option<&'a FieldMap>,
    /// Send empty cells as explicit nulls
    pub insert_nulls: bool,
}

/// Read every data row, build its record and submit it in batches.
///
/// Stops at the first source, configuration or remote-call error.
/// Per-record rejections are routed, not returned.
pub fn load<R, A, S, E>(
    mut rows: HeaderedRows<R>,
    api: &mut A,
    cache: &mut ReferenceCache,
    router: &mut ResponseRouter<S, E>,
    request: LoadRequest<'_>,
) -> Result<TransferSummary>
where
    R: RowReader,
    A: RecordApi + ?Sized,
    S: Write,
    E: Write,
{
    rows.map_header(request.mapping);
    let builder = RecordBuilder::new(
        request.operation,
        request.type_name,
        rows.header(),
        request.insert_nulls,
        cache,
        api,
    )?;

    let mut dispatcher = BatchDispatcher::new(api, router, request.operation.clone());
    while let Some(row) = rows.next_data_row()? {
        dispatcher.push(builder.build(&row))?;
    }
    let summary = dispatcher.finish()?;
    rows.close()?;

    info!(
        operation = %request.operation,
        type_name = request.type_name,
        batches = summary.batches,
        records = summary.records,
        successes = summary.successes,
        failures = summary.failures,
        "load finished"
    );
    Ok(summary)
}
