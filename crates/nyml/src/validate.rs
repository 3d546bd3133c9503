// Dweve NYML - Numeric YAML with Includes
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

//! Boundary to an external schema validator.
//!
//! NYML does not interpret schemas. A validator receives the fully loaded
//! document (includes resolved) and the schema location, and either accepts
//! it or describes the first violation it found.

use crate::value::Value;
use std::path::Path;
use thiserror::Error;

/// Rejection from a [`SchemaValidator`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Schema validation failed against '{schema}': {message}")]
pub struct ValidationError {
    /// Schema the document was checked against.
    pub schema: String,
    /// Human-readable description of the first violation.
    pub message: String,
}

impl ValidationError {
    pub fn new(schema: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            schema: schema.as_ref().display().to_string(),
            message: message.into(),
        }
    }
}

/// Checks a document against a schema file.
pub trait SchemaValidator {
    fn validate(&self, document: &Value, schema: &Path) -> Result<(), ValidationError>;
}

impl<F> SchemaValidator for F
where
    F: Fn(&Value, &Path) -> Result<(), ValidationError>,
{
    fn validate(&self, document: &Value, schema: &Path) -> Result<(), ValidationError> {
        self(document, schema)
    }
}
