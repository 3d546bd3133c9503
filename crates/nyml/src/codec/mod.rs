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

//! Configured YAML reader/writer.
//!
//! A [`Codec`] is built from a [`CodecConfig`] and carries no other state,
//! so building one never touches the filesystem and one instance can serve
//! any number of sequential calls. Per-load state (the include stack) lives
//! in an [`IncludeContext`] created for each top-level load.
//!
//! # Examples
//!
//! ```rust
//! use nyml::{Codec, CodecConfig, Value};
//!
//! let codec = Codec::new(CodecConfig::builder().inline_depth(2).build());
//!
//! let doc = codec.load_str("grid:\n- [1, 2]\n- [3, 4]\n", None).unwrap();
//! let yaml = codec.dump_to_string(&doc).unwrap();
//! assert_eq!(yaml, "grid: [[1, 2], [3, 4]]\n");
//! ```

mod read;
mod write;

use crate::error::{CodecError, Result};
use crate::include::IncludeContext;
use crate::value::Value;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Tag that marks a reference token.
pub const INCLUDE_TAG: &str = "!include";

/// Default depth up to which numeric sequences render inline.
pub const DEFAULT_INLINE_DEPTH: usize = 1;

/// Default mapping indentation in spaces.
pub const DEFAULT_INDENT: usize = 2;

/// Reader and writer options.
///
/// # Examples
///
/// ```rust
/// use nyml::CodecConfig;
///
/// let config = CodecConfig {
///     numeric_read_inference: true,
///     ..Default::default()
/// };
/// assert!(config.include_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Render numeric scalars and arrays as native YAML (default: true).
    pub numeric_write_enabled: bool,
    /// Load rectangular numeric sequences as [`crate::NumericArray`] (default: false).
    pub numeric_read_inference: bool,
    /// Resolve `!include` tags while reading (default: true).
    pub include_enabled: bool,
    /// Numeric sequences up to this many levels deep render inline (default: 1).
    pub inline_depth: usize,
    /// Spaces per nested mapping level (default: 2).
    pub indent: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            numeric_write_enabled: true,
            numeric_read_inference: false,
            include_enabled: true,
            inline_depth: DEFAULT_INLINE_DEPTH,
            indent: DEFAULT_INDENT,
        }
    }
}

impl CodecConfig {
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::new()
    }
}

/// Builder for [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numeric_write(mut self, enabled: bool) -> Self {
        self.config.numeric_write_enabled = enabled;
        self
    }

    pub fn numeric_read_inference(mut self, enabled: bool) -> Self {
        self.config.numeric_read_inference = enabled;
        self
    }

    pub fn include(mut self, enabled: bool) -> Self {
        self.config.include_enabled = enabled;
        self
    }

    pub fn inline_depth(mut self, depth: usize) -> Self {
        self.config.inline_depth = depth;
        self
    }

    /// Sets the mapping indentation. Values below 1 are raised to 1.
    pub fn indent(mut self, spaces: usize) -> Self {
        self.config.indent = spaces.max(1);
        self
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}

/// YAML reader/writer with include and numeric handling.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Loads a document from a file, resolving includes relative to it.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Value> {
        let mut ctx = IncludeContext::new();
        self.load_tracked(path.as_ref(), &mut ctx)
    }

    /// Loads a document from YAML text.
    ///
    /// `origin` is the file the text came from; includes are resolved
    /// relative to it. Without an origin, any `!include` fails.
    pub fn load_str(&self, text: &str, origin: Option<&Path>) -> Result<Value> {
        let mut ctx = IncludeContext::new();
        if let Some(path) = origin {
            if let Ok(canonical) = fs::canonicalize(path) {
                ctx.enter(canonical)?;
            }
        }
        read::parse_document(self, text, origin, &mut ctx)
    }

    /// Loads a document from a reader. See [`load_str`](Self::load_str).
    pub fn load_reader<R: Read>(&self, mut reader: R, origin: Option<&Path>) -> Result<Value> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|e| {
            CodecError::io(origin.unwrap_or_else(|| Path::new("<reader>")), e)
        })?;
        self.load_str(&text, origin)
    }

    pub(crate) fn load_tracked(&self, path: &Path, ctx: &mut IncludeContext) -> Result<Value> {
        let canonical = fs::canonicalize(path).map_err(|e| CodecError::io(path, e))?;
        ctx.enter(canonical)?;
        let result = fs::read_to_string(path)
            .map_err(|e| CodecError::io(path, e))
            .and_then(|text| read::parse_document(self, &text, Some(path), ctx));
        ctx.leave();
        result
    }

    /// Serializes a document to YAML text.
    ///
    /// Numeric values are rendered directly when numeric writing is enabled;
    /// this does not run [`crate::normalize`].
    pub fn dump_to_string(&self, value: &Value) -> Result<String> {
        write::emit_document(self, value)
    }

    pub fn dump_to_writer<W: Write>(&self, value: &Value, mut writer: W) -> Result<()> {
        let text = self.dump_to_string(value)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|e| CodecError::io("<writer>", e))
    }

    /// Serializes a document to a file, replacing its contents.
    pub fn dump(&self, value: &Value, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.dump_to_string(value)?;
        fs::write(path, text).map_err(|e| CodecError::io(path, e))
    }
}
