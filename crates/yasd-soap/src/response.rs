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

//! Response parsing.
//!
//! Elements are matched by local name; namespace prefixes vary between
//! server versions.

use crate::error::{Result, SoapError};
use roxmltree::{Document, Node};
use yasd_core::{FieldDescription, FieldValue, QueryPage, Record, RecordResult, TypeDescription};

const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Session data returned by `login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Endpoint for every later call
    pub server_url: String,
    /// Value of the `SessionHeader`
    pub session_id: String,
    /// Organization the user belongs to
    pub organization_id: String,
}

/// Parse a `loginResponse`.
pub fn parse_login(xml: &str) -> Result<Session> {
    let doc = Document::parse(xml)?;
    let result = result_nodes(&doc)?
        .next()
        .ok_or(SoapError::MissingElement("result"))?;
    let organization_id = child(result, "userInfo")
        .and_then(|info| child_text(info, "organizationId"))
        .ok_or(SoapError::MissingElement("organizationId"))?;
    Ok(Session {
        server_url: child_text(result, "serverUrl")
            .ok_or(SoapError::MissingElement("serverUrl"))?
            .to_string(),
        session_id: child_text(result, "sessionId")
            .ok_or(SoapError::MissingElement("sessionId"))?
            .to_string(),
        organization_id: organization_id.to_string(),
    })
}

/// Parse the results of create, update, upsert, delete or undelete.
///
/// Failed results carry the `message` of every `errors` element in order.
pub fn parse_results(xml: &str) -> Result<Vec<RecordResult>> {
    let doc = Document::parse(xml)?;
    let results = result_nodes(&doc)?
        .map(|result| {
            if child_text(result, "success") == Some("true") {
                RecordResult::success(child_text(result, "id").unwrap_or_default())
            } else {
                let errors = children(result, "errors")
                    .map(|error| child_text(error, "message").unwrap_or_default().to_string())
                    .collect();
                RecordResult::Failure { errors }
            }
        })
        .collect();
    Ok(results)
}

/// Parse a `queryResponse` or `queryMoreResponse`.
pub fn parse_query(xml: &str) -> Result<QueryPage> {
    let doc = Document::parse(xml)?;
    let result = result_nodes(&doc)?
        .next()
        .ok_or(SoapError::MissingElement("result"))?;
    let records = children(result, "records").map(parse_sobject).collect();
    let done = child_text(result, "done") != Some("false");
    let locator = if done {
        None
    } else {
        child_text(result, "queryLocator")
            .filter(|locator| !locator.is_empty())
            .map(str::to_string)
    };
    Ok(QueryPage { records, locator })
}

/// Parse a `describeSObjectResponse`.
pub fn parse_describe(xml: &str) -> Result<TypeDescription> {
    let doc = Document::parse(xml)?;
    let result = result_nodes(&doc)?
        .next()
        .ok_or(SoapError::MissingElement("result"))?;
    let fields = children(result, "fields")
        .map(|field| FieldDescription {
            name: child_text(field, "name").unwrap_or_default().to_string(),
            field_type: child_text(field, "type").unwrap_or_default().to_string(),
            relationship_name: child_text(field, "relationshipName")
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            reference_to: children(field, "referenceTo")
                .filter_map(|target| target.text())
                .map(str::to_string)
                .collect(),
        })
        .collect();
    Ok(TypeDescription {
        name: child_text(result, "name").unwrap_or_default().to_string(),
        fields,
    })
}

/// Convert one `records` element (or a nested relationship) into a record.
///
/// The first non-empty `Id` becomes the identifier; the partner API repeats
/// it when the query selects `Id` explicitly.
fn parse_sobject(node: Node<'_, '_>) -> Record {
    let mut record = Record::new(child_text(node, "type").unwrap_or_default());
    for element in node.children().filter(Node::is_element) {
        let name = element.tag_name().name();
        match name {
            "type" => {}
            "Id" => {
                if record.id.is_none() {
                    record.id = element.text().filter(|id| !id.is_empty()).map(str::to_string);
                }
            }
            _ if is_nil(element) => record.set_field(name, FieldValue::Null),
            _ if element.children().any(|c| c.is_element()) => {
                record.set_field(name, FieldValue::reference(parse_sobject(element)))
            }
            _ => record.set_field(name, FieldValue::text(element.text().unwrap_or_default())),
        }
    }
    record
}

/// Check for a fault, then yield the `result` elements of the response.
fn result_nodes<'a, 'input>(
    doc: &'a Document<'input>,
) -> Result<impl Iterator<Item = Node<'a, 'input>>> {
    let body = doc
        .root_element()
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "Body")
        .ok_or(SoapError::MissingElement("Body"))?;
    if let Some(fault) = child(body, "Fault") {
        return Err(SoapError::Fault {
            code: child_text(fault, "faultcode").unwrap_or_default().to_string(),
            message: child_text(fault, "faultstring")
                .unwrap_or_default()
                .to_string(),
        });
    }
    let response = body
        .children()
        .find(|n| n.is_element())
        .ok_or(SoapError::MissingElement("response"))?;
    Ok(children(response, "result"))
}

fn is_nil(node: Node<'_, '_>) -> bool {
    node.attribute((XSI_NS, "nil")) == Some("true")
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

fn child_text<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'static str) -> Option<&'a str> {
    child(node, name).map(|n| n.text().unwrap_or_default())
}
