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

//! NYML CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **resolve**: load a document with its includes and write it back as a
//!   single normalized YAML document
//! - **check**: load a document and summarize its structure
//! - **to-json**: load a document and write it as JSON
//!
//! # Examples
//!
//! ```no_run
//! use nyml_cli::commands::{resolve, ResolveOptions};
//!
//! # fn main() -> Result<(), nyml_cli::error::CliError> {
//! resolve("plant.yaml", Some("plant.resolved.yaml"), &ResolveOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Commands return `Result<(), CliError>`; the binary prints the error and
//! exits with status 1.

pub mod cli;
pub mod commands;
pub mod error;
