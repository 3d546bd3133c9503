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

//! Check command - load a document and summarize its structure

use super::{load_document, reading_codec};
use crate::error::CliError;
use colored::Colorize;
use nyml::Value;

/// Node counts of a loaded document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub mappings: usize,
    pub sequences: usize,
    pub scalars: usize,
}

impl Summary {
    pub fn of(document: &Value) -> Self {
        let mut summary = Self::default();
        summary.visit(document);
        summary
    }

    fn visit(&mut self, value: &Value) {
        match value {
            Value::Mapping(map) => {
                self.mappings += 1;
                map.values().for_each(|v| self.visit(v));
            }
            Value::Sequence(items) => {
                self.sequences += 1;
                items.iter().for_each(|v| self.visit(v));
            }
            Value::Array(_) => self.sequences += 1,
            _ => self.scalars += 1,
        }
    }
}

/// Load `file` and print a structure summary.
///
/// # Output
///
/// Prints the load status (✓ or ✗) and the number of mappings, sequences
/// and scalars in the loaded document.
///
/// # Errors
///
/// Returns `Err` if the document or one of its includes fails to load.
pub fn check(file: &str, include: bool) -> Result<(), CliError> {
    match load_document(file, &reading_codec(include)) {
        Ok(document) => {
            let summary = Summary::of(&document);
            println!("{} {}", "✓".green().bold(), file);
            println!("  Mappings: {}", summary.mappings);
            println!("  Sequences: {}", summary.sequences);
            println!("  Scalars: {}", summary.scalars);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let doc = nyml::Codec::default()
            .load_str("a: 1\nb: [1, 2]\nc:\n  d: x\n", None)
            .unwrap();
        assert_eq!(
            Summary::of(&doc),
            Summary {
                mappings: 2,
                sequences: 1,
                scalars: 4,
            }
        );
    }
}
