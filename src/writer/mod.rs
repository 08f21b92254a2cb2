//! Manifest serialiser.
//!
//! This module turns a [`State`] back into Ninja-style manifest text. The
//! output is produced in four phases: global bindings, pools, rules and
//! finally edges. Every phase is a function returning its own text
//! fragment, and [`render`] concatenates them into a [`ManifestContent`].
//! [`ManifestWriter`] adds the last step, handing the finished text to a
//! [`FileWriter`].
//!
//! Ordering is part of the output contract: bindings, pools and rules are
//! emitted in lexicographic name order, rule bindings likewise, and edges
//! in the order they were added to the graph. Built-in pools and rules are
//! never emitted.
//!
//! # Examples
//!
//! ```
//! use ninja_writer::graph::{EvalString, Rule, State};
//! use ninja_writer::writer::render;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut state = State::new();
//! let command = EvalString::new()
//!     .with_text("cc -c ")
//!     .with_reference("in")
//!     .with_text(" -o ")
//!     .with_reference("out");
//! state.add_rule(Rule::new("cc").with_binding("command", command))?;
//! state.add_edge("cc", ["a.o"], ["a.c"])?;
//!
//! let manifest = render(&state)?;
//! assert_eq!(
//!     manifest.as_str(),
//!     "rule cc\n\tcommand cc -c $in -o $out\n\nbuild a.o: cc a.c\n"
//! );
//! # Ok(()) }
//! ```

mod display;
mod error;

pub use error::WriteError;

use crate::file_writer::FileWriter;
use crate::graph::{Edge, Node, NodeId, Pool, Rule, State};
use camino::Utf8Path;
use display::{DisplayBindings, DisplayEdge, DisplayPool, DisplayRule};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Wrapper around generated manifest text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestContent(String);

impl ManifestContent {
    /// Store the provided manifest string.
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self(content)
    }

    /// Borrow the underlying manifest text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned manifest string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ManifestContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialises one graph and delegates persistence to a [`FileWriter`].
///
/// The writer only borrows the graph; nothing is mutated and no text is
/// written until the whole manifest has been rendered.
pub struct ManifestWriter<'a> {
    state: &'a State,
    file_writer: &'a dyn FileWriter,
}

impl fmt::Debug for ManifestWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestWriter")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> ManifestWriter<'a> {
    /// Prepare to serialise `state` through `file_writer`.
    #[must_use]
    pub const fn new(state: &'a State, file_writer: &'a dyn FileWriter) -> Self {
        Self { state, file_writer }
    }

    /// Render the manifest without writing it.
    ///
    /// # Errors
    ///
    /// See [`render`].
    pub fn render(&self) -> Result<ManifestContent, WriteError> {
        render(self.state)
    }

    /// Render the manifest and write it to `filename`.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] if an edge cannot be resolved, in which case
    /// the file writer is never called, or [`WriteError::File`] carrying the
    /// file writer's own error.
    pub fn write(&self, filename: &Utf8Path) -> Result<(), WriteError> {
        let content = self.render()?;
        self.file_writer.write_file(filename, content.as_str())?;
        Ok(())
    }
}

/// Render every section of `state` into one manifest.
///
/// # Errors
///
/// Returns [`WriteError::UnknownRule`] or [`WriteError::UnknownNode`] when an
/// edge cannot be resolved against `state`. Rendering stops at the first
/// such edge.
pub fn render(state: &State) -> Result<ManifestContent, WriteError> {
    let mut out = write_bindings(state.bindings());

    let pools: Vec<&Pool> = state.pools().filter(|p| !p.is_builtin()).collect();
    for pool in &pools {
        out.push_str(&write_pool(pool));
    }

    let rules: Vec<&Rule> = state.rules().filter(|r| !r.is_builtin()).collect();
    for rule in &rules {
        out.push_str(&write_rule(rule));
    }

    for edge in state.edges() {
        out.push_str(&write_edge(state, edge)?);
    }

    debug!(
        bindings = state.bindings().len(),
        pools = pools.len(),
        rules = rules.len(),
        edges = state.edges().len(),
        bytes = out.len(),
        "rendered manifest"
    );
    Ok(ManifestContent::new(out))
}

/// Render global bindings as `name = value` lines in name order, with
/// `$` in each value doubled.
#[must_use]
pub fn write_bindings(bindings: &BTreeMap<String, String>) -> String {
    DisplayBindings(bindings).to_string()
}

/// Render a `pool` block using the pool's stored name.
#[must_use]
pub fn write_pool(pool: &Pool) -> String {
    DisplayPool(pool).to_string()
}

/// Render a `rule` block, skipping optional bindings that are unset.
#[must_use]
pub fn write_rule(rule: &Rule) -> String {
    DisplayRule(rule).to_string()
}

/// Render a `build` line for `edge`, resolving its rule and nodes in
/// `state`. `$`, space and `:` in paths are escaped with `$`.
///
/// # Errors
///
/// Returns [`WriteError::UnknownRule`] when the edge's rule is not defined
/// in `state`, or [`WriteError::UnknownNode`] when a node id does not
/// resolve.
pub fn write_edge(state: &State, edge: &Edge) -> Result<String, WriteError> {
    let rule = state
        .rule(edge.rule_name())
        .ok_or_else(|| WriteError::UnknownRule {
            rule: edge.rule_name().to_owned(),
        })?;
    let outputs = resolve_paths(state, edge.outputs())?;
    let inputs = resolve_paths(state, edge.inputs())?;
    Ok(DisplayEdge {
        outputs: &outputs,
        rule: rule.name(),
        inputs: &inputs,
    }
    .to_string())
}

fn resolve_paths<'a>(state: &'a State, ids: &[NodeId]) -> Result<Vec<&'a Utf8Path>, WriteError> {
    ids.iter()
        .map(|id| {
            state
                .node(*id)
                .map(Node::path)
                .ok_or(WriteError::UnknownNode { index: id.index() })
        })
        .collect()
}
