//! Serialisable description of a build graph.
//!
//! A snapshot is the on-disk input of the `ninja-writer` binary: a JSON or
//! YAML document listing global bindings, pools, rules and edges. It is
//! converted into a validated [`crate::graph::State`] with
//! [`crate::graph::State::from_snapshot`].
//!
//! Rule binding values are either plain strings, taken as literal text, or
//! token lists:
//!
//! ```yaml
//! bindings:
//!   cflags: -O2
//! pools:
//!   - name: link_pool
//!     depth: 4
//! rules:
//!   - name: cc
//!     bindings:
//!       command:
//!         - raw: "gcc "
//!         - ref: cflags
//!       description: CC
//! edges:
//!   - rule: cc
//!     outputs: [a.o]
//!     inputs: [a.c]
//! ```
//!
//! ```
//! use ninja_writer::snapshot;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{"rules": [{"name": "cc", "bindings": {"command": "cc"}}]}"#;
//! let snapshot = snapshot::from_json(json, "graph.json")?;
//! assert_eq!(snapshot.rules.len(), 1);
//! # Ok(()) }
//! ```

mod convert;
mod error;

pub use error::SnapshotError;

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

/// Top-level snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSnapshot {
    /// Global literal bindings.
    #[serde(default)]
    pub bindings: IndexMap<String, String>,
    /// Pool definitions.
    #[serde(default)]
    pub pools: Vec<PoolSnapshot>,
    /// Rule definitions.
    #[serde(default)]
    pub rules: Vec<RuleSnapshot>,
    /// Build edges, in output order.
    #[serde(default)]
    pub edges: Vec<EdgeSnapshot>,
}

/// A pool entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolSnapshot {
    /// Unique pool name.
    pub name: String,
    /// Maximum concurrent jobs.
    pub depth: u32,
}

/// A rule entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSnapshot {
    /// Unique rule name.
    pub name: String,
    /// Templated bindings.
    #[serde(default)]
    pub bindings: IndexMap<String, BindingSnapshot>,
    /// Extra binding names to omit when empty.
    #[serde(default)]
    pub optional: Vec<String>,
}

/// A rule binding value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BindingSnapshot {
    /// Literal text, stored as a single raw token.
    Text(String),
    /// Explicit token sequence.
    Tokens(Vec<TokenSnapshot>),
}

/// One token of a [`BindingSnapshot::Tokens`] list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum TokenSnapshot {
    /// Literal text.
    #[serde(rename = "raw")]
    Raw(String),
    /// Variable reference.
    #[serde(rename = "ref")]
    Reference(String),
}

/// An edge entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSnapshot {
    /// Name of the rule to run.
    pub rule: String,
    /// Output paths, in order.
    pub outputs: Vec<String>,
    /// Input paths, in order.
    #[serde(default)]
    pub inputs: Vec<String>,
}

/// Parse a JSON snapshot. `name` labels diagnostics.
///
/// # Errors
///
/// Returns [`SnapshotError::Syntax`] for malformed JSON and
/// [`SnapshotError::Structure`] when the document has the wrong shape.
pub fn from_json(json: &str, name: &str) -> Result<GraphSnapshot, SnapshotError> {
    let doc: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        let line = u64::try_from(e.line()).unwrap_or(0);
        let column = u64::try_from(e.column()).unwrap_or(0);
        SnapshotError::syntax(name, json, line, column, &e.to_string())
    })?;
    from_value(doc, name)
}

/// Parse a YAML snapshot. `name` labels diagnostics.
///
/// # Errors
///
/// Returns [`SnapshotError::Syntax`] for malformed YAML and
/// [`SnapshotError::Structure`] when the document has the wrong shape.
pub fn from_yaml(yaml: &str, name: &str) -> Result<GraphSnapshot, SnapshotError> {
    let doc: serde_json::Value = serde_saphyr::from_str(yaml).map_err(|e| {
        let (line, column) = e.location().map_or((0, 0), |l| (l.line(), l.column()));
        SnapshotError::syntax(name, yaml, line, column, &e.to_string())
    })?;
    from_value(doc, name)
}

fn from_value(doc: serde_json::Value, name: &str) -> Result<GraphSnapshot, SnapshotError> {
    serde_json::from_value(doc).map_err(|source| SnapshotError::Structure {
        name: name.to_owned(),
        source,
    })
}

/// Read a snapshot from disk, choosing YAML for `.yml`/`.yaml` files and
/// JSON otherwise.
///
/// # Errors
///
/// Returns [`SnapshotError::Read`] if the file cannot be read, or a parse
/// error from [`from_json`] / [`from_yaml`].
pub fn load(path: &Utf8Path) -> Result<GraphSnapshot, SnapshotError> {
    let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_owned(),
        source,
    })?;
    let snapshot = if is_yaml(path) {
        from_yaml(&text, path.as_str())
    } else {
        from_json(&text, path.as_str())
    }?;
    debug!(
        path = %path,
        pools = snapshot.pools.len(),
        rules = snapshot.rules.len(),
        edges = snapshot.edges.len(),
        "loaded graph snapshot"
    );
    Ok(snapshot)
}

fn is_yaml(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use rstest::rstest;

    const JSON: &str = r#"{
  "bindings": {"cflags": "-O2"},
  "pools": [{"name": "link_pool", "depth": 4}],
  "rules": [
    {
      "name": "cc",
      "bindings": {
        "command": [{"raw": "gcc "}, {"ref": "cflags"}],
        "description": "CC"
      }
    }
  ],
  "edges": [{"rule": "cc", "outputs": ["a.o"], "inputs": ["a.c"]}]
}"#;

    const YAML: &str = "\
bindings:
  cflags: -O2
pools:
  - name: link_pool
    depth: 4
rules:
  - name: cc
    bindings:
      command:
        - raw: \"gcc \"
        - ref: cflags
      description: CC
edges:
  - rule: cc
    outputs: [a.o]
    inputs: [a.c]
";

    #[rstest]
    fn json_and_yaml_agree() -> Result<()> {
        let json = from_json(JSON, "graph.json")?;
        let yaml = from_yaml(YAML, "graph.yml")?;
        ensure!(json == yaml, "snapshots differ: {json:?} vs {yaml:?}");
        Ok(())
    }

    #[rstest]
    fn binding_forms_are_distinguished() -> Result<()> {
        let snapshot = from_json(JSON, "graph.json")?;
        let rule = snapshot.rules.first().ok_or_else(|| anyhow::anyhow!("rule"))?;
        ensure!(
            rule.bindings.get("description") == Some(&BindingSnapshot::Text("CC".into())),
            "description should be plain text"
        );
        ensure!(
            matches!(rule.bindings.get("command"), Some(BindingSnapshot::Tokens(t)) if t.len() == 2),
            "command should be a token list"
        );
        Ok(())
    }

    #[rstest]
    fn unknown_keys_are_rejected() {
        let err = from_json(r#"{"targets": []}"#, "graph.json");
        assert!(matches!(err, Err(SnapshotError::Structure { .. })));
    }

    #[rstest]
    fn malformed_json_reports_location() {
        let err = from_json("{\n  \"pools\": [\n}", "graph.json");
        assert!(
            matches!(&err, Err(SnapshotError::Syntax { span: Some(_), message, .. }) if message.contains("line 3"))
        );
    }

    #[rstest]
    #[case("graph.yml", true)]
    #[case("graph.YAML", true)]
    #[case("graph.json", false)]
    #[case("graph", false)]
    fn format_follows_extension(#[case] path: &str, #[case] yaml: bool) {
        assert_eq!(is_yaml(Utf8Path::new(path)), yaml);
    }
}
