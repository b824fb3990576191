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

//! Request envelopes for the partner API.
//!
//! Envelopes are written with `quick_xml`. Text content is escaped by the
//! writer. sObjects are written as `type`, `fieldsToNull`, `Id`, then the
//! fields in name order, with reference values nested as sObjects.

use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use yasd_core::{FieldValue, Record};

const SOAP_ENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const PARTNER_NS: &str = "urn:partner.soap.sforce.com";
const SOBJECT_NS: &str = "urn:sobject.partner.soap.sforce.com";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Call-level headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headers<'a> {
    /// Session id from login; omitted for the login call itself
    pub session_id: Option<&'a str>,
    /// Query page size; only sent with query calls
    pub query_batch_size: Option<usize>,
}

/// Body of one partner-API call.
#[derive(Debug, Clone, Copy)]
pub enum Call<'a> {
    Login {
        username: &'a str,
        password: &'a str,
    },
    Create(&'a [Record]),
    Update(&'a [Record]),
    Upsert {
        external_id_field: &'a str,
        records: &'a [Record],
    },
    Delete(&'a [String]),
    Undelete(&'a [String]),
    Query(&'a str),
    QueryMore(&'a str),
    DescribeSObject(&'a str),
}

impl Call<'_> {
    /// Operation element name, also used as the `SOAPAction`.
    pub fn name(&self) -> &'static str {
        match self {
            Call::Login { .. } => "login",
            Call::Create(_) => "create",
            Call::Update(_) => "update",
            Call::Upsert { .. } => "upsert",
            Call::Delete(_) => "delete",
            Call::Undelete(_) => "undelete",
            Call::Query(_) => "query",
            Call::QueryMore(_) => "queryMore",
            Call::DescribeSObject(_) => "describeSObject",
        }
    }
}

/// Render a complete request envelope.
pub fn build(call: &Call<'_>, headers: Headers<'_>) -> Result<String> {
    let mut w = Writer::new(Vec::new());
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut envelope = BytesStart::new("soapenv:Envelope");
    envelope.push_attribute(("xmlns:soapenv", SOAP_ENV));
    envelope.push_attribute(("xmlns:urn", PARTNER_NS));
    envelope.push_attribute(("xmlns:sf", SOBJECT_NS));
    envelope.push_attribute(("xmlns:xsi", XSI_NS));
    w.write_event(Event::Start(envelope))?;

    start(&mut w, "soapenv:Header")?;
    if let Some(session_id) = headers.session_id {
        start(&mut w, "urn:SessionHeader")?;
        text_element(&mut w, "urn:sessionId", session_id)?;
        end(&mut w, "urn:SessionHeader")?;
    }
    if let Some(size) = headers.query_batch_size {
        start(&mut w, "urn:QueryOptions")?;
        text_element(&mut w, "urn:batchSize", &size.to_string())?;
        end(&mut w, "urn:QueryOptions")?;
    }
    end(&mut w, "soapenv:Header")?;

    start(&mut w, "soapenv:Body")?;
    let operation = format!("urn:{}", call.name());
    start(&mut w, &operation)?;
    match call {
        Call::Login { username, password } => {
            text_element(&mut w, "urn:username", username)?;
            text_element(&mut w, "urn:password", password)?;
        }
        Call::Create(records) | Call::Update(records) => {
            for record in *records {
                write_sobject(&mut w, "urn:sObjects", record)?;
            }
        }
        Call::Upsert {
            external_id_field,
            records,
        } => {
            text_element(&mut w, "urn:externalIDFieldName", external_id_field)?;
            for record in *records {
                write_sobject(&mut w, "urn:sObjects", record)?;
            }
        }
        Call::Delete(ids) | Call::Undelete(ids) => {
            for id in *ids {
                text_element(&mut w, "urn:ids", id)?;
            }
        }
        Call::Query(query) => text_element(&mut w, "urn:queryString", query)?,
        Call::QueryMore(locator) => text_element(&mut w, "urn:queryLocator", locator)?,
        Call::DescribeSObject(type_name) => text_element(&mut w, "urn:sObjectType", type_name)?,
    }
    end(&mut w, &operation)?;
    end(&mut w, "soapenv:Body")?;
    end(&mut w, "soapenv:Envelope")?;

    // Every piece written above came from &str
    Ok(String::from_utf8_lossy(&w.into_inner()).into_owned())
}

fn write_sobject(w: &mut Writer<Vec<u8>>, element: &str, record: &Record) -> Result<()> {
    start(w, element)?;
    text_element(w, "sf:type", &record.type_name)?;
    for name in record.fields_to_null() {
        text_element(w, "sf:fieldsToNull", name)?;
    }
    if let Some(id) = &record.id {
        text_element(w, "sf:Id", id)?;
    }
    for (name, value) in record.fields() {
        match value {
            FieldValue::Text(text) => text_element(w, name, text)?,
            FieldValue::Reference(nested) => write_sobject(w, name, nested)?,
            FieldValue::Null => {
                let mut nil = BytesStart::new(name.as_str());
                nil.push_attribute(("xsi:nil", "true"));
                w.write_event(Event::Empty(nil))?;
            }
        }
    }
    end(w, element)
}

fn start(w: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end(w: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element(w: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    start(w, name)?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, name)
}
