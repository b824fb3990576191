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

//! Property tests for batching and result routing.

use proptest::prelude::*;
use yasd_cli::pipeline::{load, LoadRequest, ReferenceCache, ResponseRouter, BATCH_SIZE};
use yasd_core::{Encoding, HeaderedRows, Operation};
use yasd_csv::{DelimitedReader, ReadConfig};
use yasd_test::{fixtures, MockApi};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every row is submitted exactly once, in full batches plus one
    /// trailing partial batch, and every result lands in exactly one stream.
    #[test]
    fn prop_batches_cover_every_row(rows in 0usize..1000, failing in proptest::collection::btree_set(0usize..1000, 0..20)) {
        let csv = fixtures::names_csv(rows);
        let mut api = failing
            .iter()
            .fold(MockApi::new(), |api, &ordinal| api.fail_record(ordinal, "x"));
        let mut cache = ReferenceCache::new();
        let (mut ok, mut failed) = (Vec::<u8>::new(), Vec::<u8>::new());

        let summary = {
            let reader = DelimitedReader::from_reader(csv.as_bytes(), ReadConfig::default());
            let mut router = ResponseRouter::new(&mut ok, &mut failed, Encoding::Utf8);
            let request = LoadRequest {
                operation: &Operation::Insert,
                type_name: "Account",
                mapping: None,
                insert_nulls: false,
            };
            load(HeaderedRows::new(reader).unwrap(), &mut api, &mut cache, &mut router, request)
                .unwrap()
        };

        let sizes = api.batch_sizes();
        prop_assert_eq!(sizes.len(), rows.div_ceil(BATCH_SIZE));
        prop_assert!(sizes.iter().all(|&size| size > 0 && size <= BATCH_SIZE));
        prop_assert!(sizes.iter().rev().skip(1).all(|&size| size == BATCH_SIZE));
        prop_assert_eq!(sizes.iter().sum::<usize>(), rows);

        let rejected = failing.iter().filter(|&&ordinal| ordinal < rows).count();
        prop_assert_eq!(summary.failures, rejected);
        prop_assert_eq!(summary.successes + summary.failures, rows);
        prop_assert_eq!(String::from_utf8(ok).unwrap().lines().count(), rows - rejected);
        prop_assert_eq!(String::from_utf8(failed).unwrap().lines().count(), rejected);
    }
}
