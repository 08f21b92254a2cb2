//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure. It is also compiled by the
//! build script to generate the manual page, so it only depends on `clap`
//! and the standard library.

use clap::Parser;
use std::path::PathBuf;

/// Rebuild a Ninja manifest from a serialised build graph.
#[derive(Debug, Parser, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Graph snapshot to read (`.json`, `.yml` or `.yaml`).
    #[arg(short, long, value_name = "FILE", default_value = "graph.json")]
    pub graph: PathBuf,

    /// Change to this directory before resolving relative paths.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Where to write the manifest; `-` writes to standard output.
    #[arg(value_name = "OUTPUT", default_value = "build.ninja")]
    pub output: PathBuf,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            graph: PathBuf::from("graph.json"),
            directory: None,
            verbose: false,
            output: PathBuf::from("build.ninja"),
        }
    }
}
