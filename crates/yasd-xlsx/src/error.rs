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

//! Error types for spreadsheet sources and targets.

use thiserror::Error;

/// Spreadsheet error types.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The workbook could not be opened or a sheet could not be read.
    #[error("Spreadsheet read error: {0}")]
    Read(#[from] calamine::Error),

    /// The workbook could not be built or saved.
    #[error("Spreadsheet write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// More columns than a worksheet can hold.
    ///
    /// ```
    /// use yasd_xlsx::SheetError;
    ///
    /// let err = SheetError::TooManyColumns(20000);
    /// assert_eq!(err.to_string(), "20000 columns exceed the worksheet limit");
    /// ```
    #[error("{0} columns exceed the worksheet limit")]
    TooManyColumns(usize),

    /// I/O error while writing the saved workbook.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SheetError> for yasd_core::Error {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::Io(e) => yasd_core::Error::Stream(e),
            other => yasd_core::Error::format("spreadsheet", other.to_string()),
        }
    }
}
