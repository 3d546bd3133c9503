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

//! NYML Command Line Interface

use clap::Parser;
use nyml_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// NYML - Numeric YAML with includes
///
/// Resolves `!include` trees, normalizes numeric content and converts
/// documents for inspection.
///
/// # Examples
///
/// ```bash
/// # Write a self-contained copy of a document
/// nyml resolve plant.yaml --output plant.resolved.yaml
///
/// # Check that a document and its includes load
/// nyml check plant.yaml
///
/// # Convert to JSON
/// nyml to-json plant.yaml --pretty
/// ```
#[derive(Parser)]
#[command(name = "nyml")]
#[command(author, version, about = "NYML - Numeric YAML with includes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("nyml=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
