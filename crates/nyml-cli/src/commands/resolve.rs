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

//! Resolve command - inline includes and write a normalized document

use super::{load_document, write_output};
use crate::error::CliError;
use nyml::{normalize, Codec, CodecConfig};
use tracing::{info, warn};

/// Options for [`resolve`].
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Numeric sequences up to this depth render inline.
    pub inline_depth: usize,
    /// Resolve `!include` tags.
    pub include: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            inline_depth: nyml::codec::DEFAULT_INLINE_DEPTH,
            include: true,
        }
    }
}

/// Load `file` with its includes and write it as one YAML document.
///
/// # Errors
///
/// Returns `Err` if loading fails, if a value cannot be written, or if the
/// output cannot be written.
pub fn resolve(file: &str, output: Option<&str>, options: &ResolveOptions) -> Result<(), CliError> {
    let codec = Codec::new(
        CodecConfig::builder()
            .include(options.include)
            .inline_depth(options.inline_depth)
            .build(),
    );

    let mut document = load_document(file, &codec)?;
    let report = normalize(&mut document);
    for skipped in &report.skipped {
        warn!(file, %skipped, "value kept as-is");
    }

    let yaml = codec
        .dump_to_string(&document)
        .map_err(|e| CliError::YamlOutput(e.to_string()))?;
    write_output(&yaml, output)?;

    if let Some(out) = output {
        info!(file, output = out, "resolved document written");
    }
    Ok(())
}
