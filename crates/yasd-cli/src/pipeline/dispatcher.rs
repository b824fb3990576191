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

//! Fixed-size batching of built records.

use crate::pipeline::router::ResponseRouter;
use std::io::Write;
use tracing::debug;
use yasd_core::{Error, Operation, Record, RecordApi, RecordResult, Result};

/// Records per remote call.
pub const BATCH_SIZE: usize = 200;

/// Counts reported at the end of a load run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferSummary {
    /// Remote calls made
    pub batches: usize,
    /// Records submitted
    pub records: usize,
    /// Records accepted
    pub successes: usize,
    /// Records rejected
    pub failures: usize,
}

/// Accumulates records and submits them in batches of [`BATCH_SIZE`].
///
/// One batch is in flight at a time. The router sees each batch's results
/// before the next record is accepted. The trailing partial batch is sent
/// by [`finish`](Self::finish); an empty batch is never sent.
pub struct BatchDispatcher<'a, A: ?Sized, S: Write, E: Write> {
    api: &'a mut A,
    router: &'a mut ResponseRouter<S, E>,
    operation: Operation,
    pending: Vec<Record>,
    summary: TransferSummary,
}

impl<'a, A, S, E> BatchDispatcher<'a, A, S, E>
where
    A: RecordApi + ?Sized,
    S: Write,
    E: Write,
{
    /// Create a dispatcher for one operation.
    pub fn new(api: &'a mut A, router: &'a mut ResponseRouter<S, E>, operation: Operation) -> Self {
        Self {
            api,
            router,
            operation,
            pending: Vec::with_capacity(BATCH_SIZE),
            summary: TransferSummary::default(),
        }
    }

    /// Queue a record, submitting the batch once it is full.
    pub fn push(&mut self, record: Record) -> Result<()> {
        self.pending.push(record);
        if self.pending.len() >= BATCH_SIZE {
            self.submit()?;
        }
        Ok(())
    }

    /// Submit the trailing batch and return the run's counts.
    pub fn finish(mut self) -> Result<TransferSummary> {
        if !self.pending.is_empty() {
            self.submit()?;
        }
        Ok(self.summary)
    }

    fn submit(&mut self) -> Result<()> {
        let batch = std::mem::take(&mut self.pending);
        self.summary.batches += 1;
        debug!(
            operation = %self.operation,
            batch = self.summary.batches,
            size = batch.len(),
            "submitting batch"
        );

        let results = self.call(&batch)?;
        if results.len() != batch.len() {
            return Err(Error::ResultCount {
                operation: self.operation.name().to_string(),
                expected: batch.len(),
                actual: results.len(),
            });
        }

        self.router.handle(&results)?;
        self.summary.records += batch.len();
        let accepted = results.iter().filter(|r| r.is_success()).count();
        self.summary.successes += accepted;
        self.summary.failures += results.len() - accepted;
        Ok(())
    }

    fn call(&mut self, batch: &[Record]) -> Result<Vec<RecordResult>> {
        match &self.operation {
            Operation::Insert => self.api.create(batch),
            Operation::Update => self.api.update(batch),
            Operation::Upsert { external_id_field } => self.api.upsert(external_id_field, batch),
            Operation::Delete => self.api.delete(&ids(batch)),
            Operation::Undelete => self.api.undelete(&ids(batch)),
        }
    }
}

fn ids(batch: &[Record]) -> Vec<String> {
    batch
        .iter()
        .map(|record| record.id.clone().unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yasd_core::Encoding;
    use yasd_test::{Call, MockApi};

    fn run(api: &mut MockApi, operation: Operation, count: usize) -> Result<TransferSummary> {
        let mut ok: Vec<u8> = Vec::new();
        let mut failed: Vec<u8> = Vec::new();
        let mut router = ResponseRouter::new(&mut ok, &mut failed, Encoding::Utf8);
        let mut dispatcher = BatchDispatcher::new(api, &mut router, operation);
        for i in 0..count {
            dispatcher.push(Record::new("Account").with_id(format!("001{i:012}")))?;
        }
        dispatcher.finish()
    }

    #[test]
    fn test_batch_boundaries() {
        for (count, expected) in [
            (0, vec![]),
            (1, vec![1]),
            (200, vec![200]),
            (201, vec![200, 1]),
            (450, vec![200, 200, 50]),
        ] {
            let mut api = MockApi::new();
            let summary = run(&mut api, Operation::Insert, count).unwrap();
            assert_eq!(api.batch_sizes(), expected, "{count} records");
            assert_eq!(summary.batches, expected.len());
            assert_eq!(summary.records, count);
        }
    }

    #[test]
    fn test_delete_sends_ids() {
        let mut api = MockApi::new();
        run(&mut api, Operation::Delete, 2).unwrap();
        assert_eq!(
            api.calls(),
            &[Call::Delete(vec![
                "001000000000000".to_string(),
                "001000000000001".to_string()
            ])]
        );
    }

    #[test]
    fn test_upsert_carries_key() {
        let mut api = MockApi::new();
        let operation = Operation::Upsert {
            external_id_field: "Code__c".into(),
        };
        run(&mut api, operation, 1).unwrap();
        assert!(matches!(
            &api.calls()[0],
            Call::Upsert { external_id_field, .. } if external_id_field == "Code__c"
        ));
    }

    #[test]
    fn test_summary_counts_failures() {
        let mut api = MockApi::new().fail_record(1, "x").fail_record(250, "y");
        let summary = run(&mut api, Operation::Insert, 300).unwrap();
        assert_eq!(summary.successes, 298);
        assert_eq!(summary.failures, 2);
    }

    #[test]
    fn test_result_count_mismatch_is_fatal() {
        let mut api = MockApi::new().short_results();
        let err = run(&mut api, Operation::Update, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::ResultCount {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_call_failure_aborts() {
        let mut api = MockApi::new().failing_calls("INVALID_SESSION_ID");
        let err = run(&mut api, Operation::Insert, 250).unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
        assert_eq!(api.batch_sizes(), vec![200]);
    }
}
