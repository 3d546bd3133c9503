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

//! Error types for loading and storing documents.

use crate::validate::ValidationError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that abort a `load` or `store` call.
///
/// Skipped numeric conversions are not errors; they are reported through
/// [`crate::NormalizeReport`].
#[derive(Error, Debug)]
pub enum CodecError {
    /// Reading or writing a file failed.
    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// YAML syntax error.
    #[error("YAML parse error in {}: {message}", display_origin(.path.as_deref()))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// Include target has an extension outside the document and dataset sets.
    #[error("Unsupported include format '{extension}' for '{}'", .path.display())]
    UnsupportedIncludeFormat { path: PathBuf, extension: String },

    /// A document includes itself, directly or transitively.
    #[error("Cyclic include of '{}' (chain: {})", .path.display(), display_chain(.chain))]
    CyclicInclude { path: PathBuf, chain: Vec<PathBuf> },

    /// `!include` found in a document that was not loaded from a file.
    #[error("Cannot resolve include '{token}' without a source path")]
    IncludeWithoutOrigin { token: String },

    /// `!include` applied to something other than a string scalar.
    #[error("Include tag must be applied to a file name, found {found}")]
    InvalidIncludeToken { found: String },

    /// Tag with no registered constructor.
    #[error("Unknown tag '{tag}'")]
    UnknownTag { tag: String },

    /// Mapping key that is a sequence or mapping.
    #[error("Non-scalar keys not supported, found {key_type} at path {path}")]
    NonStringKey { key_type: String, path: String },

    /// Foreign numeric value met with numeric writing disabled.
    #[error("Cannot represent {kind} at path {path}")]
    UnrepresentableValue { path: String, kind: String },

    /// Dataset file could not be read.
    #[error("Dataset error in '{}': {message}", .path.display())]
    Dataset { path: PathBuf, message: String },

    /// External schema validation rejected the document.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CodecError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        CodecError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: Option<&Path>, err: serde_yaml::Error) -> Self {
        CodecError::Parse {
            path: path.map(Path::to_path_buf),
            message: err.to_string(),
        }
    }

    /// True when the error is a missing file, at any include depth.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CodecError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

fn display_origin(path: Option<&Path>) -> String {
    match path {
        Some(p) => format!("'{}'", p.display()),
        None => "<string>".to_string(),
    }
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
