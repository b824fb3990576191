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

//! Records and type descriptions.

use yasd_core::{FieldDescription, FieldValue, Record, TypeDescription};

fn field(name: &str, field_type: &str) -> FieldDescription {
    FieldDescription {
        name: name.to_string(),
        field_type: field_type.to_string(),
        relationship_name: None,
        reference_to: Vec::new(),
    }
}

fn reference(name: &str, relationship: &str, target: &str) -> FieldDescription {
    FieldDescription {
        name: name.to_string(),
        field_type: "reference".to_string(),
        relationship_name: Some(relationship.to_string()),
        reference_to: vec![target.to_string()],
    }
}

/// `Account`: Id, Name, OwnerId (`Owner` -> User), ParentId (`Parent` -> Account).
pub fn account_description() -> TypeDescription {
    TypeDescription {
        name: "Account".to_string(),
        fields: vec![
            field("Id", "id"),
            field("Name", "string"),
            reference("OwnerId", "Owner", "User"),
            reference("ParentId", "Parent", "Account"),
        ],
    }
}

/// `Contact`: Id, LastName, Email, AccountId (`Account`) and the custom
/// lookup `Company__c` (`Company__r` -> Account).
pub fn contact_description() -> TypeDescription {
    TypeDescription {
        name: "Contact".to_string(),
        fields: vec![
            field("Id", "id"),
            field("LastName", "string"),
            field("Email", "email"),
            reference("AccountId", "Account", "Account"),
            reference("Company__c", "Company__r", "Account"),
        ],
    }
}

/// An account as returned by a query, with an owner reference.
pub fn account(id: &str, name: &str, owner_email: Option<&str>) -> Record {
    let mut record = Record::new("Account").with_id(id);
    record.set_field("Id", FieldValue::text(id));
    record.set_field("Name", FieldValue::text(name));
    match owner_email {
        Some(email) => {
            let mut owner = Record::new("User");
            owner.set_field("Email", FieldValue::text(email));
            record.set_field("Owner", FieldValue::reference(owner));
        }
        None => record.set_field("Owner", FieldValue::Null),
    }
    record
}
