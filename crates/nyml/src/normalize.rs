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

//! Numeric normalization before writing.
//!
//! [`normalize`] walks a document depth-first and replaces every
//! [`Value::Numeric`] and [`Value::Array`] leaf with native scalars and
//! sequences. Sequences are walked element by element, so records nested in
//! lists are normalized too. Mapping entries whose value ends up as an empty
//! mapping are removed.
//!
//! A leaf without a native representation stays in place. It is logged with
//! `tracing::warn!` and listed in the returned [`NormalizeReport`]; the pass
//! itself never fails.

use crate::value::Value;
use std::fmt;
use tracing::warn;

/// A leaf left unconverted by [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSkipped {
    /// Location of the leaf, e.g. `root.blades[2].chord`.
    pub path: String,
    /// Source type of the leaf.
    pub kind: String,
}

impl fmt::Display for ConversionSkipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type conversion skipped at {}: {}", self.path, self.kind)
    }
}

/// Outcome of a normalization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    /// Number of foreign leaves replaced with native values.
    pub converted: usize,
    /// Number of empty-mapping entries removed.
    pub elided: usize,
    /// Leaves that kept their foreign type.
    pub skipped: Vec<ConversionSkipped>,
}

impl NormalizeReport {
    /// True when every foreign leaf was converted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Normalizes `document` in place.
pub fn normalize(document: &mut Value) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    let mut path = String::from("root");
    visit(document, &mut path, &mut report);
    report
}

/// Returns a normalized copy of `document`.
pub fn normalized(document: &Value) -> Value {
    let mut copy = document.clone();
    normalize(&mut copy);
    copy
}

fn visit(value: &mut Value, path: &mut String, report: &mut NormalizeReport) {
    match value {
        Value::Mapping(map) => {
            let mut empty = Vec::new();
            for (key, child) in map.iter_mut() {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                visit(child, path, report);
                path.truncate(len);
                if matches!(child, Value::Mapping(inner) if inner.is_empty()) {
                    empty.push(key.clone());
                }
            }
            report.elided += empty.len();
            for key in empty {
                map.shift_remove(&key);
            }
        }
        Value::Sequence(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{}]", i));
                visit(item, path, report);
                path.truncate(len);
            }
        }
        Value::Numeric(scalar) => match scalar.to_native() {
            Some(native) => {
                *value = native;
                report.converted += 1;
            }
            None => skip(path, scalar.kind().name(), report),
        },
        Value::Array(array) => match array.to_nested() {
            Some(nested) => {
                *value = nested;
                report.converted += 1;
            }
            None => skip(path, array.dtype_name(), report),
        },
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {}
    }
}

fn skip(path: &str, kind: &str, report: &mut NormalizeReport) {
    let skipped = ConversionSkipped {
        path: path.to_string(),
        kind: kind.to_string(),
    };
    warn!("{}", skipped);
    report.skipped.push(skipped);
}
