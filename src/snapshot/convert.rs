//! Snapshot-to-graph conversion.

use super::{BindingSnapshot, GraphSnapshot, RuleSnapshot, TokenSnapshot};
use crate::graph::{EvalString, GraphError, Pool, Rule, State, Token};

impl State {
    /// Build a graph from a [`GraphSnapshot`].
    ///
    /// Bindings, pools and rules are inserted first, then edges in document
    /// order, so edges may only refer to rules defined anywhere in the
    /// snapshot or to the built-in `phony` rule.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] for duplicate pool or rule names, edges using
    /// an undefined rule, edges without outputs, and outputs produced by
    /// more than one edge.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Result<Self, GraphError> {
        let mut state = Self::new();
        for (name, value) in &snapshot.bindings {
            state.add_binding(name.as_str(), value.as_str());
        }
        for pool in &snapshot.pools {
            state.add_pool(Pool::new(pool.name.as_str(), pool.depth))?;
        }
        for rule in &snapshot.rules {
            state.add_rule(to_rule(rule))?;
        }
        for edge in &snapshot.edges {
            state.add_edge(&edge.rule, &edge.outputs, &edge.inputs)?;
        }
        Ok(state)
    }
}

fn to_rule(snapshot: &RuleSnapshot) -> Rule {
    let mut rule = Rule::new(snapshot.name.as_str());
    for name in &snapshot.optional {
        rule.declare_optional(name.as_str());
    }
    for (name, value) in &snapshot.bindings {
        rule.add_binding(name.as_str(), to_eval_string(value));
    }
    rule
}

fn to_eval_string(value: &BindingSnapshot) -> EvalString {
    match value {
        BindingSnapshot::Text(text) => EvalString::from(text.as_str()),
        BindingSnapshot::Tokens(tokens) => tokens
            .iter()
            .map(|token| match token {
                TokenSnapshot::Raw(text) => Token::Raw(text.clone()),
                TokenSnapshot::Reference(name) => Token::Reference(name.clone()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{EdgeSnapshot, PoolSnapshot};
    use anyhow::{Context, Result, ensure};
    use indexmap::IndexMap;
    use rstest::rstest;

    fn rule(name: &str, bindings: &[(&str, BindingSnapshot)]) -> RuleSnapshot {
        RuleSnapshot {
            name: name.into(),
            bindings: bindings
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect::<IndexMap<_, _>>(),
            optional: Vec::new(),
        }
    }

    fn edge(rule: &str, outputs: &[&str], inputs: &[&str]) -> EdgeSnapshot {
        EdgeSnapshot {
            rule: rule.into(),
            outputs: outputs.iter().map(|s| (*s).to_owned()).collect(),
            inputs: inputs.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[rstest]
    fn converts_every_section() -> Result<()> {
        let snapshot = GraphSnapshot {
            bindings: IndexMap::from([("cflags".to_owned(), "-O2".to_owned())]),
            pools: vec![PoolSnapshot {
                name: "link_pool".into(),
                depth: 4,
            }],
            rules: vec![rule(
                "cc",
                &[(
                    "command",
                    BindingSnapshot::Tokens(vec![
                        TokenSnapshot::Raw("gcc ".into()),
                        TokenSnapshot::Reference("cflags".into()),
                    ]),
                )],
            )],
            edges: vec![edge("cc", &["a.o"], &["a.c"]), edge("phony", &["all"], &["a.o"])],
        };

        let state = State::from_snapshot(&snapshot)?;

        ensure!(state.bindings().get("cflags").map(String::as_str) == Some("-O2"));
        ensure!(state.pool("link_pool").map(Pool::depth) == Some(4));
        let command = state
            .rule("cc")
            .and_then(|r| r.binding("command"))
            .context("cc command")?;
        ensure!(command.to_string() == "gcc $cflags", "got {command}");
        ensure!(state.edges().len() == 2, "expected two edges");
        Ok(())
    }

    #[rstest]
    fn declared_optional_names_reach_the_rule() -> Result<()> {
        let mut snapshot = rule("cc", &[("description", BindingSnapshot::Text(String::new()))]);
        snapshot.optional.push("description".into());
        let converted = to_rule(&snapshot);
        ensure!(converted.is_optional("description"));
        ensure!(
            converted.binding("description").is_none(),
            "empty optional binding should be unset"
        );
        Ok(())
    }

    #[rstest]
    fn edges_may_not_reference_missing_rules() {
        let snapshot = GraphSnapshot {
            edges: vec![edge("cc", &["a.o"], &["a.c"])],
            ..GraphSnapshot::default()
        };
        assert_eq!(
            State::from_snapshot(&snapshot),
            Err(GraphError::UnknownRule {
                rule: "cc".into(),
                target: "a.o".into(),
            })
        );
    }
}
