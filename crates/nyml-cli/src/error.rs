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

//! Structured error types for the NYML CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from CLI command execution.
///
/// # Examples
///
/// ```rust,no_run
/// use nyml_cli::error::CliError;
///
/// fn write_report(path: &str, text: &str) -> Result<(), CliError> {
///     std::fs::write(path, text).map_err(|e| CliError::io_error(path, e))?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Reading or writing a file (or stdout) failed.
    #[error("I/O error for '{}': {message}", .path.display())]
    Io {
        path: PathBuf,
        message: String,
    },

    /// The document or one of its includes could not be loaded.
    #[error("Failed to load '{}': {message}", .path.display())]
    Load {
        path: PathBuf,
        message: String,
    },

    /// The document could not be written as YAML.
    #[error("YAML output error: {0}")]
    YamlOutput(String),

    /// JSON serialization failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        message: String,
    },
}

impl CliError {
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn load(path: impl Into<PathBuf>, source: nyml::CodecError) -> Self {
        Self::Load {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}
