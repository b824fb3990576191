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

//! The batch transfer pipeline.
//!
//! Load: rows from a [`RowReader`](yasd_core::RowReader) are turned into
//! records by the [`RecordBuilder`], grouped by the [`BatchDispatcher`] and
//! submitted through a [`RecordApi`](yasd_core::RecordApi); the
//! [`ResponseRouter`] writes each per-record result to the success or error
//! stream.
//!
//! Export: [`export`] pages through a query and renders each record with a
//! [`RecordWriter`](yasd_core::RecordWriter).

pub mod builder;
pub mod dispatcher;
pub mod export;
pub mod load;
pub mod reference;
pub mod router;

pub use builder::RecordBuilder;
pub use dispatcher::{BatchDispatcher, TransferSummary, BATCH_SIZE};
pub use export::{expand_query, export, query_columns, ExportSummary};
pub use load::{load, LoadRequest};
pub use reference::ReferenceCache;
pub use router::ResponseRouter;
