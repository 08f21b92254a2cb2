//! Minimal reader for the manifest text produced by `ninja_writer`.
//!
//! Integration tests use this to check that serialised output re-parses
//! into the graph it came from. It understands exactly the writer's
//! grammar: `name = value` globals, `pool` blocks with a tab-indented
//! `depth`, `rule` blocks with tab-indented `name value` bindings, and
//! `build outs: rule ins` lines with `, `-separated paths. Global values
//! and paths use the same `$` escapes as rule bindings but may not contain
//! references.

use ninja_writer::graph::{EvalString, GraphError, Pool, Rule, State, Token};
use thiserror::Error;

/// Why a manifest could not be read.
#[derive(Debug, Error)]
pub enum ReadError {
    /// A line did not match any statement form.
    #[error("line {line}: unexpected '{text}'")]
    Unexpected {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },
    /// A pool block lacked a valid depth.
    #[error("line {line}: invalid pool depth '{text}'")]
    Depth {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },
    /// A `$` escape was malformed, or a reference appeared in a literal.
    #[error("line {line}: bad '$' escape in '{text}'")]
    Escape {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },
    /// The graph rejected a statement.
    #[error("line {line}: {source}")]
    Graph {
        /// 1-based line number.
        line: usize,
        /// Graph error.
        source: GraphError,
    },
}

enum Block {
    None,
    Pool(String),
    Rule(Rule),
}

/// Parse manifest text into a [`State`].
///
/// # Errors
///
/// Returns a [`ReadError`] for text outside the writer's grammar or graph
/// invariant violations.
pub fn read_manifest(text: &str) -> Result<State, ReadError> {
    let mut state = State::new();
    let mut block = Block::None;
    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let graph_err = |source| ReadError::Graph { line, source };
        if let Some(body) = raw_line.strip_prefix('\t') {
            match &mut block {
                Block::Pool(name) => {
                    let depth = body
                        .strip_prefix("depth = ")
                        .and_then(|d| d.parse::<u32>().ok())
                        .ok_or_else(|| ReadError::Depth {
                            line,
                            text: body.to_owned(),
                        })?;
                    state
                        .add_pool(Pool::new(name.as_str(), depth))
                        .map_err(graph_err)?;
                    block = Block::None;
                }
                Block::Rule(rule) => {
                    let (name, value) = body.split_once(' ').ok_or_else(|| unexpected(line, body))?;
                    rule.add_binding(name, parse_eval(value, line)?);
                }
                Block::None => return Err(unexpected(line, raw_line)),
            }
            continue;
        }

        if let Block::Rule(rule) = std::mem::replace(&mut block, Block::None) {
            state.add_rule(rule).map_err(graph_err)?;
        }
        if raw_line.is_empty() {
            continue;
        }
        if let Some(name) = raw_line.strip_prefix("pool ") {
            block = Block::Pool(name.to_owned());
        } else if let Some(name) = raw_line.strip_prefix("rule ") {
            block = Block::Rule(Rule::new(name));
        } else if let Some(rest) = raw_line.strip_prefix("build ") {
            let (outputs, tail) = rest.split_once(": ").ok_or_else(|| unexpected(line, raw_line))?;
            let (rule, inputs) = tail.split_once(' ').unwrap_or((tail, ""));
            state
                .add_edge(rule, split_paths(outputs, line)?, split_paths(inputs, line)?)
                .map_err(graph_err)?;
        } else if let Some((name, value)) = raw_line.split_once(" = ") {
            state.add_binding(name, parse_literal(value, line)?);
        } else {
            return Err(unexpected(line, raw_line));
        }
    }
    if let Block::Rule(rule) = block {
        state
            .add_rule(rule)
            .map_err(|source| ReadError::Graph {
                line: text.lines().count(),
                source,
            })?;
    }
    Ok(state)
}

fn unexpected(line: usize, text: &str) -> ReadError {
    ReadError::Unexpected {
        line,
        text: text.to_owned(),
    }
}

// Escaped paths never contain a bare space, so `, ` only ever separates.
fn split_paths(list: &str, line: usize) -> Result<Vec<String>, ReadError> {
    if list.is_empty() {
        return Ok(Vec::new());
    }
    list.split(", ").map(|path| parse_literal(path, line)).collect()
}

/// Parse text that may hold `$` escapes but no references.
///
/// # Errors
///
/// Returns [`ReadError::Escape`] for a malformed escape or a reference.
pub fn parse_literal(value: &str, line: usize) -> Result<String, ReadError> {
    match parse_eval(value, line)?.tokens() {
        [] => Ok(String::new()),
        [Token::Raw(text)] => Ok(text.clone()),
        _ => Err(ReadError::Escape {
            line,
            text: value.to_owned(),
        }),
    }
}

const fn is_varname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Parse a binding value, honouring `$$`, `$ `, `$:`, `$name` and `${name}`.
///
/// # Errors
///
/// Returns [`ReadError::Escape`] for a dangling or unknown `$` escape.
pub fn parse_eval(value: &str, line: usize) -> Result<EvalString, ReadError> {
    let bad = || ReadError::Escape {
        line,
        text: value.to_owned(),
    };
    let mut out = EvalString::new();
    let mut text = String::new();
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            text.push(c);
            continue;
        }
        match chars.next().ok_or_else(bad)? {
            esc @ ('$' | ' ' | ':') => text.push(esc),
            '{' => {
                let name: String = chars.by_ref().take_while(|&n| n != '}').collect();
                if name.is_empty() {
                    return Err(bad());
                }
                out.add_text(&std::mem::take(&mut text));
                out.add_reference(name);
            }
            first if is_varname_char(first) => {
                let mut name = String::from(first);
                while let Some(&next) = chars.peek() {
                    if !is_varname_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                out.add_text(&std::mem::take(&mut text));
                out.add_reference(name);
            }
            _ => return Err(bad()),
        }
    }
    out.add_text(&text);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use rstest::rstest;

    #[rstest]
    #[case("gcc $cflags -o out", &[Token::Raw("gcc ".into()), Token::Reference("cflags".into()), Token::Raw(" -o out".into())])]
    #[case("${in}_copy", &[Token::Reference("in".into()), Token::Raw("_copy".into())])]
    #[case("$$HOME$ x$:", &[Token::Raw("$HOME x:".into())])]
    #[case("", &[])]
    fn parses_templates(#[case] value: &str, #[case] expected: &[Token]) {
        let parsed = parse_eval(value, 1);
        assert!(
            parsed.is_ok_and(|v| v.tokens() == expected),
            "unexpected tokens for {value:?}"
        );
    }

    #[rstest]
    #[case("trailing $")]
    #[case("${}")]
    #[case("$!")]
    fn rejects_bad_escapes(#[case] value: &str) {
        assert!(matches!(parse_eval(value, 3), Err(ReadError::Escape { line: 3, .. })));
    }

    #[rstest]
    #[case("a$$b", Some("a$b"))]
    #[case("my$ dir/a$:b", Some("my dir/a:b"))]
    #[case("", Some(""))]
    #[case("$out", None)]
    fn parses_literals(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_literal(value, 1).ok().as_deref(), expected);
    }

    #[rstest]
    fn build_paths_are_unescaped() {
        let text = "rule cc\n\tcommand cc\n\nbuild out$ dir/a$:b.o, c.o: cc my$$file.c\n";
        let state = read_manifest(text);
        assert!(state.is_ok_and(|s| s.lookup_node(Utf8Path::new("out dir/a:b.o")).is_some()
            && s.lookup_node(Utf8Path::new("my$file.c")).is_some()));
    }

    #[rstest]
    fn reads_every_statement() {
        let text = "cflags = -O2\n\npool link\n\tdepth = 2\n\nrule cc\n\tcommand cc $cflags\n\nbuild a.o: cc a.c\n";
        let state = read_manifest(text);
        assert!(state.is_ok_and(|s| s.pool("link").is_some()
            && s.rule("cc").is_some()
            && s.edges().len() == 1
            && s.bindings().len() == 1));
    }
}
