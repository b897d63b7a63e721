// Copyright 2025 Benchlens Contributors
// SPDX-License-Identifier: Apache-2.0

//! benchlens CLI entry point.

use colored::Colorize;

fn main() {
    if let Err(e) = benchlens_cli::run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
