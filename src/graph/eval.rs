//! Templated binding values.
//!
//! An [`EvalString`] is the parsed form of a rule binding such as
//! `command = gcc $cflags -c $in`: literal fragments interleaved with
//! variable references, kept in source order.

use std::fmt;

/// A single fragment of a templated binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Literal text emitted verbatim.
    Raw(String),
    /// Name of a variable substituted at evaluation time.
    Reference(String),
}

/// An ordered sequence of [`Token`]s forming a binding template.
///
/// An empty sequence means "unset" rather than "set to the empty string";
/// see [`crate::graph::Rule::is_omitted`].
///
/// # Examples
///
/// ```
/// use ninja_writer::graph::{EvalString, Token};
///
/// let mut value = EvalString::new();
/// value.add_text("gcc ");
/// value.add_reference("cflags");
/// value.add_text(" -o ");
/// value.add_text("out");
/// assert_eq!(
///     value.tokens(),
///     &[
///         Token::Raw("gcc ".into()),
///         Token::Reference("cflags".into()),
///         Token::Raw(" -o out".into()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EvalString {
    tokens: Vec<Token>,
}

impl EvalString {
    /// Create an empty template.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Append literal text, merging it into a trailing raw token.
    ///
    /// Empty text is ignored so that an "unset" value stays empty.
    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Token::Raw(last)) = self.tokens.last_mut() {
            last.push_str(text);
        } else {
            self.tokens.push(Token::Raw(text.to_owned()));
        }
    }

    /// Append a variable reference.
    pub fn add_reference(&mut self, name: impl Into<String>) {
        self.tokens.push(Token::Reference(name.into()));
    }

    /// Builder form of [`Self::add_text`].
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.add_text(text);
        self
    }

    /// Builder form of [`Self::add_reference`].
    #[must_use]
    pub fn with_reference(mut self, name: impl Into<String>) -> Self {
        self.add_reference(name);
        self
    }

    /// Borrow the tokens in template order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Return `true` when the template holds no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<Token> for EvalString {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut value = Self::new();
        for token in iter {
            match token {
                Token::Raw(text) => value.add_text(&text),
                Token::Reference(name) => value.add_reference(name),
            }
        }
        value
    }
}

impl From<&str> for EvalString {
    /// Wrap plain text as a single raw token.
    fn from(text: &str) -> Self {
        Self::new().with_text(text)
    }
}

impl fmt::Display for EvalString {
    /// Render the template unevaluated, with `$name` for references.
    ///
    /// This is a human-readable view; manifest output goes through the
    /// writer, which also escapes literal dollars.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Raw(text) => f.write_str(text)?,
                Token::Reference(name) => write!(f, "${name}")?,
            }
        }
        Ok(())
    }
}
