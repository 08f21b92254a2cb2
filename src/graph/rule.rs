//! Rules and pools.

use super::eval::EvalString;
use std::collections::{BTreeMap, BTreeSet};

/// Bindings every rule treats as optional: an empty value means "unset".
pub const DEFAULT_OPTIONAL_BINDINGS: [&str; 2] = ["rspfile", "rspfile_content"];

/// Name of the built-in rule available to every graph.
pub const PHONY_RULE: &str = "phony";

/// Name of the built-in pool available to every graph.
pub const CONSOLE_POOL: &str = "console";

/// A named command template.
///
/// Bindings are kept in a [`BTreeMap`] so iteration is lexicographic by
/// name regardless of insertion order. The rule also carries the set of
/// binding names that are optional; an optional binding with an empty
/// value is unset, so it is never stored and never serialised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    bindings: BTreeMap<String, EvalString>,
    optional: BTreeSet<String>,
    builtin: bool,
}

impl Rule {
    /// Create a rule with no bindings and the default optional set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: BTreeMap::new(),
            optional: DEFAULT_OPTIONAL_BINDINGS
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            builtin: false,
        }
    }

    pub(crate) fn phony() -> Self {
        Self {
            builtin: true,
            ..Self::new(PHONY_RULE)
        }
    }

    /// The rule's stored name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set `name` to `value`, replacing any earlier binding of that name.
    ///
    /// An empty value for an optional binding unsets it.
    pub fn add_binding(&mut self, name: impl Into<String>, value: EvalString) {
        let key: String = name.into();
        if self.is_omitted(&key, &value) {
            self.bindings.remove(&key);
        } else {
            self.bindings.insert(key, value);
        }
    }

    /// Builder form of [`Self::add_binding`].
    #[must_use]
    pub fn with_binding(mut self, name: impl Into<String>, value: EvalString) -> Self {
        self.add_binding(name, value);
        self
    }

    /// Mark `name` as optional for this rule, dropping an empty binding
    /// already stored under it.
    pub fn declare_optional(&mut self, name: impl Into<String>) {
        let key: String = name.into();
        if self.bindings.get(&key).is_some_and(EvalString::is_empty) {
            self.bindings.remove(&key);
        }
        self.optional.insert(key);
    }

    /// Look up a single binding.
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<&EvalString> {
        self.bindings.get(name)
    }

    /// Iterate over the bindings in name order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &EvalString)> {
        self.bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Return `true` when `name` is declared optional for this rule.
    #[must_use]
    pub fn is_optional(&self, name: &str) -> bool {
        self.optional.contains(name)
    }

    /// Return `true` when the binding should be left out of the manifest.
    ///
    /// Only optional bindings are ever omitted, and only when empty. A
    /// non-optional binding with an empty value is still written.
    #[must_use]
    pub fn is_omitted(&self, name: &str, value: &EvalString) -> bool {
        value.is_empty() && self.is_optional(name)
    }

    /// Return `true` for the rule every graph defines implicitly.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        self.builtin
    }
}

/// A named concurrency limit shared by edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    name: String,
    depth: u32,
    builtin: bool,
}

impl Pool {
    /// Create a pool allowing `depth` concurrent jobs.
    #[must_use]
    pub fn new(name: impl Into<String>, depth: u32) -> Self {
        Self {
            name: name.into(),
            depth,
            builtin: false,
        }
    }

    pub(crate) fn console() -> Self {
        Self {
            builtin: true,
            ..Self::new(CONSOLE_POOL, 1)
        }
    }

    /// The pool's stored name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum number of concurrent jobs.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Return `true` for the pool every graph defines implicitly.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        self.builtin
    }
}
