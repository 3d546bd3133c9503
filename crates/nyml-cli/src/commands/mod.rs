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

//! CLI command implementations

mod check;
mod resolve;
mod to_json;

pub use check::{check, Summary};
pub use resolve::{resolve, ResolveOptions};
pub use to_json::to_json;

use crate::error::CliError;
use nyml::{Codec, CodecConfig, Value};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Load a document, reporting failures against `file`.
pub fn load_document(file: &str, codec: &Codec) -> Result<Value, CliError> {
    nyml::load_with(file, codec).map_err(|e| CliError::load(file, e))
}

/// Codec for reading, with or without include resolution.
pub fn reading_codec(include: bool) -> Codec {
    Codec::new(CodecConfig::builder().include(include).build())
}

/// Write output to a file or stdout.
///
/// # Errors
///
/// Returns `Err` if writing fails.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error(Path::new("<stdout>"), e)),
    }
}
