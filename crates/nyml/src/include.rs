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

//! `!include` resolution.
//!
//! A reference token is a path relative to the directory of the document
//! that contains it. The target's extension selects how it is loaded:
//!
//! - [`DOCUMENT_EXTENSIONS`]: loaded as a YAML document with the including
//!   codec, so nested includes resolve too.
//! - [`DATASET_EXTENSIONS`]: read as a NetCDF dataset and flattened.
//!
//! Any other extension is rejected. The [`IncludeContext`] tracks which
//! documents are currently being loaded so that a document including itself,
//! directly or through others, fails instead of recursing forever.

use crate::codec::Codec;
use crate::dataset::{flatten, read_netcdf};
use crate::error::{CodecError, Result};
use crate::value::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions loaded as nested documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Extensions loaded as datasets.
pub const DATASET_EXTENSIONS: &[&str] = &["nc"];

/// How an include target is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeFormat {
    Document,
    Dataset,
}

impl IncludeFormat {
    /// Selects the format from the lower-cased extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Document)
        } else if DATASET_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Dataset)
        } else {
            Err(CodecError::UnsupportedIncludeFormat {
                path: path.to_path_buf(),
                extension: if extension.is_empty() {
                    String::new()
                } else {
                    format!(".{}", extension)
                },
            })
        }
    }
}

/// Documents being loaded, outermost first.
#[derive(Debug, Default)]
pub struct IncludeContext {
    stack: Vec<PathBuf>,
}

impl IncludeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a canonical document path, failing if it is already open.
    pub fn enter(&mut self, canonical: PathBuf) -> Result<()> {
        if self.stack.contains(&canonical) {
            let mut chain = self.stack.clone();
            chain.push(canonical.clone());
            return Err(CodecError::CyclicInclude {
                path: canonical,
                chain,
            });
        }
        self.stack.push(canonical);
        Ok(())
    }

    pub fn leave(&mut self) {
        self.stack.pop();
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Path of the include target named by `token` inside `containing`.
pub fn target_path(token: &str, containing: &Path) -> PathBuf {
    containing
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(token)
}

/// Loads the content referenced by `token` in the document at `containing`.
pub fn resolve(
    codec: &Codec,
    token: &str,
    containing: &Path,
    ctx: &mut IncludeContext,
) -> Result<Value> {
    let target = target_path(token, containing);
    let format = IncludeFormat::from_path(&target)?;
    debug!(
        token,
        target = %target.display(),
        ?format,
        depth = ctx.depth(),
        "resolving include"
    );

    match format {
        IncludeFormat::Document => codec.load_tracked(&target, ctx),
        IncludeFormat::Dataset => {
            let dataset = read_netcdf(&target)?;
            Ok(Value::Mapping(flatten(&dataset)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            IncludeFormat::from_path(Path::new("a/b.yaml")).unwrap(),
            IncludeFormat::Document
        );
        assert_eq!(
            IncludeFormat::from_path(Path::new("B.YML")).unwrap(),
            IncludeFormat::Document
        );
        assert_eq!(
            IncludeFormat::from_path(Path::new("wind.NC")).unwrap(),
            IncludeFormat::Dataset
        );
    }

    #[test]
    fn test_unsupported_extension() {
        match IncludeFormat::from_path(Path::new("table.CSV")) {
            Err(CodecError::UnsupportedIncludeFormat { extension, path }) => {
                assert_eq!(extension, ".csv");
                assert_eq!(path, PathBuf::from("table.CSV"));
            }
            other => panic!("expected UnsupportedIncludeFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_extension() {
        match IncludeFormat::from_path(Path::new("README")) {
            Err(CodecError::UnsupportedIncludeFormat { extension, .. }) => {
                assert_eq!(extension, "")
            }
            other => panic!("expected UnsupportedIncludeFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_target_is_relative_to_containing_directory() {
        assert_eq!(
            target_path("parts/b.yaml", Path::new("/data/plant/a.yaml")),
            PathBuf::from("/data/plant/parts/b.yaml")
        );
        assert_eq!(target_path("b.yaml", Path::new("a.yaml")), PathBuf::from("b.yaml"));
    }

    #[test]
    fn test_context_detects_reentry() {
        let mut ctx = IncludeContext::new();
        ctx.enter(PathBuf::from("/a.yaml")).unwrap();
        ctx.enter(PathBuf::from("/b.yaml")).unwrap();
        match ctx.enter(PathBuf::from("/a.yaml")) {
            Err(CodecError::CyclicInclude { path, chain }) => {
                assert_eq!(path, PathBuf::from("/a.yaml"));
                assert_eq!(chain.len(), 3);
            }
            other => panic!("expected CyclicInclude, got {:?}", other),
        }
    }

    #[test]
    fn test_context_allows_sibling_reuse() {
        let mut ctx = IncludeContext::new();
        ctx.enter(PathBuf::from("/a.yaml")).unwrap();
        ctx.enter(PathBuf::from("/shared.yaml")).unwrap();
        ctx.leave();
        assert!(ctx.enter(PathBuf::from("/shared.yaml")).is_ok());
        assert_eq!(ctx.depth(), 2);
    }
}
