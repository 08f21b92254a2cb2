//! Display adapters rendering individual graph entities as manifest text.

use crate::graph::{EvalString, Pool, Rule, Token};
use camino::Utf8Path;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter, Write};

/// Separator placed between paths on a `build` line.
pub(super) const PATH_SEPARATOR: &str = ", ";

/// Characters allowed in an unbraced `$name` reference.
const fn is_simple_varname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Literal text with every `$` doubled.
struct EscapedText<'a>(&'a str);

impl Display for EscapedText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.replace('$', "$$"))
    }
}

/// A path on a `build` line. `$`, space and `:` are escaped so the list
/// and rule separators stay unambiguous.
struct EscapedPath<'a>(&'a Utf8Path);

impl Display for EscapedPath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.as_str().chars() {
            if matches!(c, '$' | ' ' | ':') {
                f.write_char('$')?;
            }
            f.write_char(c)?;
        }
        Ok(())
    }
}

/// Global `name = value` lines, each followed by a blank line.
pub(super) struct DisplayBindings<'a>(pub &'a BTreeMap<String, String>);

impl Display for DisplayBindings<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, value) in self.0 {
            write!(f, "{name} = {}\n\n", EscapedText(value))?;
        }
        Ok(())
    }
}

/// A `pool` block.
pub(super) struct DisplayPool<'a>(pub &'a Pool);

impl Display for DisplayPool<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "pool {}", self.0.name())?;
        write!(f, "\tdepth = {}\n\n", self.0.depth())
    }
}

/// A `rule` block with its non-omitted bindings.
pub(super) struct DisplayRule<'a>(pub &'a Rule);

impl Display for DisplayRule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = self.0;
        writeln!(f, "rule {}", rule.name())?;
        for (name, value) in rule.bindings() {
            if rule.is_omitted(name, value) {
                continue;
            }
            writeln!(f, "\t{name} {}", DisplayTokens(value))?;
        }
        writeln!(f)
    }
}

/// Token sequence of a templated binding.
///
/// Literal dollars are doubled. A reference is braced when the text that
/// follows would otherwise extend its name, or when the name needs the
/// braced syntax itself.
pub(super) struct DisplayTokens<'a>(pub &'a EvalString);

impl Display for DisplayTokens<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut tokens = self.0.tokens().iter().peekable();
        while let Some(token) = tokens.next() {
            match token {
                Token::Raw(text) => EscapedText(text).fmt(f)?,
                Token::Reference(name) => {
                    let glued = matches!(
                        tokens.peek(),
                        Some(Token::Raw(next)) if next.starts_with(is_simple_varname_char)
                    );
                    if glued || !name.chars().all(is_simple_varname_char) {
                        write!(f, "${{{name}}}")?;
                    } else {
                        write!(f, "${name}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// A `build` line whose rule and nodes are already resolved.
pub(super) struct DisplayEdge<'a> {
    pub outputs: &'a [&'a Utf8Path],
    pub rule: &'a str,
    pub inputs: &'a [&'a Utf8Path],
}

impl Display for DisplayEdge<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "build {}: {} {}",
            self.outputs.iter().map(|p| EscapedPath(p)).join(PATH_SEPARATOR),
            self.rule,
            self.inputs.iter().map(|p| EscapedPath(p)).join(PATH_SEPARATOR),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EvalString::new().with_text("gcc ").with_reference("cflags").with_text(" -o out"), "gcc $cflags -o out")]
    #[case(EvalString::new().with_reference("in").with_reference("out"), "$in$out")]
    #[case(EvalString::new().with_reference("out").with_text(".d"), "$out.d")]
    #[case(EvalString::new().with_reference("in").with_text("_copy"), "${in}_copy")]
    #[case(EvalString::new().with_reference("arch.flags"), "${arch.flags}")]
    #[case(EvalString::new().with_text("echo $HOME"), "echo $$HOME")]
    #[case(EvalString::new(), "")]
    fn tokens_render(#[case] value: EvalString, #[case] expected: &str) {
        assert_eq!(DisplayTokens(&value).to_string(), expected);
    }

    #[rstest]
    fn edge_without_inputs_keeps_rule_separator() {
        let outputs = [Utf8Path::new("all")];
        let edge = DisplayEdge {
            outputs: &outputs,
            rule: "phony",
            inputs: &[],
        };
        assert_eq!(edge.to_string(), "build all: phony \n");
    }

    #[rstest]
    #[case("a.o", "a.o")]
    #[case("my dir/a.o", "my$ dir/a.o")]
    #[case("C:/out/a.o", "C$:/out/a.o")]
    #[case("cost$5", "cost$$5")]
    #[case("a, b", "a,$ b")]
    fn paths_are_escaped(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(EscapedPath(Utf8Path::new(path)).to_string(), expected);
    }

    #[rstest]
    fn global_values_double_dollars() {
        let bindings = BTreeMap::from([("x".to_owned(), "a$b".to_owned())]);
        assert_eq!(DisplayBindings(&bindings).to_string(), "x = a$$b\n\n");
    }
}
