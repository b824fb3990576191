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

//! Relationship lookups for reference columns.

use std::collections::HashMap;
use tracing::debug;
use yasd_core::{Error, RecordApi, Result};

/// Relationship name to referenced type, per organization and type.
///
/// Each (organization, type) pair is described once, the first time one of
/// its relationships is looked up.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    entries: HashMap<(String, String), HashMap<String, String>>,
}

impl ReferenceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of described types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been described yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Type referenced by `relationship` on `type_name`.
    ///
    /// Fails with a configuration error when the type has no such
    /// relationship.
    pub fn referenced_type<A: RecordApi + ?Sized>(
        &mut self,
        api: &mut A,
        type_name: &str,
        relationship: &str,
    ) -> Result<String> {
        let key = (api.organization_id().to_string(), type_name.to_string());
        if !self.entries.contains_key(&key) {
            debug!(type_name, organization = %key.0, "describing type");
            let relationships = api.describe(type_name)?.relationships();
            self.entries.insert(key.clone(), relationships);
        }
        self.entries
            .get(&key)
            .and_then(|relationships| relationships.get(relationship))
            .cloned()
            .ok_or_else(|| {
                Error::config(format!(
                    "{type_name} has no relationship named '{relationship}'"
                ))
            })
    }
}
