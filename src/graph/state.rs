//! The graph container: bindings, pools, rules, nodes and edges.

use super::error::GraphError;
use super::rule::{Pool, Rule};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Index of a [`Node`] inside its owning [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in interning order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A build artefact, identified by its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    path: Utf8PathBuf,
    in_edge: Option<usize>,
}

impl Node {
    /// Path of the artefact as written in the manifest.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Index into [`State::edges`] of the edge producing this node, if any.
    #[must_use]
    pub const fn in_edge(&self) -> Option<usize> {
        self.in_edge
    }
}

/// A build step: one rule applied to ordered inputs, producing ordered
/// outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    rule: String,
    outputs: Vec<NodeId>,
    inputs: Vec<NodeId>,
}

impl Edge {
    /// Create an edge without registering it in a [`State`].
    ///
    /// Use [`State::add_edge`] to build edges whose references are checked.
    #[must_use]
    pub const fn new(rule: String, outputs: Vec<NodeId>, inputs: Vec<NodeId>) -> Self {
        Self {
            rule,
            outputs,
            inputs,
        }
    }

    /// Name of the rule this edge runs.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule
    }

    /// Output nodes in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Input nodes in declaration order.
    #[must_use]
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }
}

/// A populated build graph.
///
/// Pools and rules are keyed by their own name when inserted, so the key
/// used for lookup always equals the stored name. Global bindings, pools
/// and rules iterate in lexicographic name order; edges keep insertion
/// order.
///
/// # Examples
///
/// ```
/// use ninja_writer::graph::{EvalString, Rule, State};
///
/// # fn main() -> Result<(), ninja_writer::graph::GraphError> {
/// let mut state = State::new();
/// state.add_rule(Rule::new("cc").with_binding("command", EvalString::from("cc")))?;
/// state.add_edge("cc", ["hello.o"], ["hello.c"])?;
/// assert_eq!(state.edges().len(), 1);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct State {
    bindings: BTreeMap<String, String>,
    pools: BTreeMap<String, Pool>,
    rules: BTreeMap<String, Rule>,
    nodes: IndexMap<Utf8PathBuf, Node>,
    edges: Vec<Edge>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Create a graph holding only the built-in `phony` rule and `console`
    /// pool.
    #[must_use]
    pub fn new() -> Self {
        let console = Pool::console();
        let phony = Rule::phony();
        Self {
            bindings: BTreeMap::new(),
            pools: BTreeMap::from([(console.name().to_owned(), console)]),
            rules: BTreeMap::from([(phony.name().to_owned(), phony)]),
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Set a global binding, replacing any earlier value.
    pub fn add_binding(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Register a pool under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicatePool`] if the name is taken.
    pub fn add_pool(&mut self, pool: Pool) -> Result<(), GraphError> {
        if self.pools.contains_key(pool.name()) {
            return Err(GraphError::DuplicatePool {
                name: pool.name().to_owned(),
            });
        }
        self.pools.insert(pool.name().to_owned(), pool);
        Ok(())
    }

    /// Register a rule under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateRule`] if the name is taken.
    pub fn add_rule(&mut self, rule: Rule) -> Result<(), GraphError> {
        if self.rules.contains_key(rule.name()) {
            return Err(GraphError::DuplicateRule {
                name: rule.name().to_owned(),
            });
        }
        self.rules.insert(rule.name().to_owned(), rule);
        Ok(())
    }

    /// Return the node for `path`, creating it on first use.
    pub fn node_id(&mut self, path: impl Into<Utf8PathBuf>) -> NodeId {
        let entry = self.nodes.entry(path.into());
        let id = NodeId(entry.index());
        entry.or_insert_with_key(|path| Node {
            path: path.clone(),
            in_edge: None,
        });
        id
    }

    /// Add an edge running `rule`, interning its output and input paths.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyOutputs`] when no outputs are given,
    /// [`GraphError::UnknownRule`] when `rule` is not defined and
    /// [`GraphError::DuplicateOutput`] when an output already has a
    /// producing edge or is listed twice. The graph is unchanged on error.
    pub fn add_edge<O, I, P, Q>(
        &mut self,
        rule: &str,
        outputs: O,
        inputs: I,
    ) -> Result<(), GraphError>
    where
        O: IntoIterator<Item = P>,
        I: IntoIterator<Item = Q>,
        P: Into<Utf8PathBuf>,
        Q: Into<Utf8PathBuf>,
    {
        let output_paths: Vec<Utf8PathBuf> = outputs.into_iter().map(Into::into).collect();
        let Some(first) = output_paths.first() else {
            return Err(GraphError::EmptyOutputs {
                rule: rule.to_owned(),
            });
        };
        if !self.rules.contains_key(rule) {
            return Err(GraphError::UnknownRule {
                rule: rule.to_owned(),
                target: first.to_string(),
            });
        }
        for (seen, path) in output_paths.iter().enumerate() {
            let repeated = output_paths.iter().take(seen).any(|p| p == path);
            let produced = self
                .nodes
                .get(path)
                .is_some_and(|node| node.in_edge.is_some());
            if repeated || produced {
                return Err(GraphError::DuplicateOutput { path: path.clone() });
            }
        }

        let output_ids: Vec<NodeId> = output_paths.into_iter().map(|p| self.node_id(p)).collect();
        let input_ids: Vec<NodeId> = inputs.into_iter().map(|p| self.node_id(p)).collect();
        let edge_index = self.edges.len();
        for id in &output_ids {
            if let Some((_, node)) = self.nodes.get_index_mut(id.0) {
                node.in_edge = Some(edge_index);
            }
        }
        self.edges.push(Edge::new(rule.to_owned(), output_ids, input_ids));
        Ok(())
    }

    /// Global bindings in name order.
    #[must_use]
    pub const fn bindings(&self) -> &BTreeMap<String, String> {
        &self.bindings
    }

    /// Pools in name order, built-ins included.
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    /// Rules in name order, built-ins included.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a pool by name.
    #[must_use]
    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.get(name)
    }

    /// Look up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Resolve a node id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get_index(id.0).map(|(_, node)| node)
    }

    /// Find the node for `path` without interning it.
    #[must_use]
    pub fn lookup_node(&self, path: &Utf8Path) -> Option<NodeId> {
        self.nodes.get_index_of(path).map(NodeId)
    }

    /// Append `edge` without any validation.
    #[cfg(test)]
    pub(crate) fn push_edge_unchecked(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    fn edge_paths<'a>(&'a self, ids: &'a [NodeId]) -> impl Iterator<Item = Option<&'a Utf8Path>> {
        ids.iter().map(|id| self.node(*id).map(Node::path))
    }
}

impl PartialEq for State {
    /// Two graphs are equal when they define the same bindings, pools and
    /// rules, and the same edges in the same order. Edges are compared by
    /// node path, so node interning order does not matter.
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
            && self.pools == other.pools
            && self.rules == other.rules
            && self.edges.len() == other.edges.len()
            && self.edges.iter().zip(&other.edges).all(|(a, b)| {
                a.rule == b.rule
                    && self.edge_paths(&a.outputs).eq(other.edge_paths(&b.outputs))
                    && self.edge_paths(&a.inputs).eq(other.edge_paths(&b.inputs))
            })
    }
}

impl Eq for State {}
