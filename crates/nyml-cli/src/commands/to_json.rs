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

//! To-JSON command - write a loaded document as JSON

use super::{load_document, reading_codec, write_output};
use crate::error::CliError;

/// Load `file` (includes resolved) and write it as JSON.
///
/// Numeric values are written natively; NaN and infinite floats become
/// `null`.
///
/// # Errors
///
/// Returns `Err` if loading, serialization or writing fails.
pub fn to_json(file: &str, output: Option<&str>, pretty: bool) -> Result<(), CliError> {
    let document = load_document(file, &reading_codec(true))?;

    let mut json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    json.push('\n');

    write_output(&json, output)
}
