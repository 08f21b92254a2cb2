//! In-memory build graph.
//!
//! This module defines the graph the manifest writer serialises: global
//! bindings, [`Pool`]s, [`Rule`]s with templated [`EvalString`] bindings,
//! and [`Edge`]s connecting [`Node`]s. Construction through [`State`]
//! enforces the structural invariants the writer relies on: unique pool
//! and rule names, edges that reference defined rules, and a single
//! producing edge per output.
//!
//! # Examples
//!
//! ```
//! use ninja_writer::graph::{EvalString, Pool, Rule, State};
//!
//! # fn main() -> Result<(), ninja_writer::graph::GraphError> {
//! let mut state = State::new();
//! state.add_binding("cflags", "-O2");
//! state.add_pool(Pool::new("link_pool", 4))?;
//! let command = EvalString::new()
//!     .with_text("gcc ")
//!     .with_reference("cflags")
//!     .with_text(" -c ")
//!     .with_reference("in");
//! state.add_rule(Rule::new("cc").with_binding("command", command))?;
//! state.add_edge("cc", ["main.o"], ["main.c"])?;
//! assert!(state.rule("cc").is_some());
//! # Ok(()) }
//! ```

mod error;
mod eval;
mod rule;
mod state;

pub use error::GraphError;
pub use eval::{EvalString, Token};
pub use rule::{CONSOLE_POOL, DEFAULT_OPTIONAL_BINDINGS, PHONY_RULE, Pool, Rule};
pub use state::{Edge, Node, NodeId, State};
