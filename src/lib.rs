//! ninja-writer core library.
//!
//! This library rebuilds Ninja-style manifest text from an in-memory build
//! graph. [`graph`] holds the graph model, [`writer`] serialises it,
//! [`file_writer`] persists the result, and [`snapshot`] loads graphs from
//! JSON or YAML for the command line tool.

pub mod cli;
pub mod file_writer;
pub mod graph;
pub mod runner;
pub mod snapshot;
pub mod writer;
