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

//! CLI command definitions and argument parsing.

use crate::commands::{self, ResolveOptions};
use crate::error::CliError;
use clap::Subcommand;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use nyml_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve includes and write a normalized document
    ///
    /// Loads FILE, inlining every `!include`, normalizes numeric values and
    /// writes the result as YAML.
    Resolve {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Numeric sequences up to this depth render inline
        #[arg(long, default_value_t = nyml::codec::DEFAULT_INLINE_DEPTH)]
        inline_depth: usize,

        /// Leave `!include` tags unresolved (they are rejected)
        #[arg(long)]
        no_include: bool,
    },

    /// Load a document and summarize its structure
    Check {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Reject `!include` tags instead of resolving them
        #[arg(long)]
        no_include: bool,
    },

    /// Convert a document to JSON
    ToJson {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the document cannot be loaded or the output cannot be
    /// written.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Resolve {
                file,
                output,
                inline_depth,
                no_include,
            } => {
                let options = ResolveOptions {
                    inline_depth,
                    include: !no_include,
                };
                commands::resolve(&file, output.as_deref(), &options)
            }
            Commands::Check { file, no_include } => commands::check(&file, !no_include),
            Commands::ToJson {
                file,
                output,
                pretty,
            } => commands::to_json(&file, output.as_deref(), pretty),
        }
    }
}
