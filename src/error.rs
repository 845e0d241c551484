/// Parsing errors.
///
/// Defines every failure the lexer and parser can report besides an illegal
/// character: unmet expectations inside a production, unexpected end of
/// input, malformed literals. Each carries a stable numeric code.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error kinds that can be raised during evaluation: undefined
/// names, division or modulo by zero, unsupported operand types, calls on
/// values that are not functions, and failures of the host capabilities.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

use crate::span::Span;

/// An error produced by any stage of the pipeline, together with the source
/// region it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The lexer met a character that starts no token.
    #[error("Illegal Character: '{character}'")]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Exactly the one column holding the character.
        span:      Span,
    },
    /// The token stream does not follow the grammar.
    #[error("Invalid Syntax (E{code:02}): {error}", code = .error.code())]
    Syntax {
        /// What was expected.
        error: ParseError,
        /// The offending token.
        span:  Span,
    },
    /// Evaluation failed.
    #[error("Runtime Error: {error}")]
    Runtime {
        /// What went wrong.
        error: RuntimeError,
        /// The node or operands involved.
        span:  Span,
    },
}

impl Error {
    #[must_use]
    pub const fn syntax(error: ParseError, span: Span) -> Self {
        Self::Syntax { error, span }
    }

    #[must_use]
    pub const fn runtime(error: RuntimeError, span: Span) -> Self {
        Self::Runtime { error, span }
    }

    /// The source region this error refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::IllegalCharacter { span, .. }
            | Self::Syntax { span, .. }
            | Self::Runtime { span, .. } => *span,
        }
    }

    /// Returns `true` for the parse failure that marks "this is not a
    /// function definition".
    #[must_use]
    pub const fn is_not_a_definition(&self) -> bool {
        matches!(self,
                 Self::Syntax { error: ParseError::NotADefinition { .. },
                                .. })
    }

    /// Renders the error as a report with the offending source underlined.
    ///
    /// The report holds the label and message, the 1-based line number, and
    /// every source line touched by the span with a row of carets beneath
    /// the covered columns.
    ///
    /// # Example
    /// ```
    /// let source = "&";
    /// let err = funke::tokenize(source).unwrap_err();
    ///
    /// assert_eq!(err.render(source), "Illegal Character: '&'\nLine 1\n\n&\n^\n");
    /// ```
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let span = self.span();
        format!("{self}\nLine {}\n\n{}\n",
                span.start.line + 1,
                underline(source, span))
    }
}

/// Builds the excerpt of `source` covered by `span`, each line followed by a
/// row of `^` under the covered columns.
fn underline(source: &str, span: Span) -> String {
    let lines: Vec<&str> = source.split('\n')
                                 .map(|line| line.strip_suffix('\r').unwrap_or(line))
                                 .collect();
    let last_line = span.end.line.max(span.start.line);

    let mut rows = Vec::new();
    for index in span.start.line..=last_line {
        let text = lines.get(index).copied().unwrap_or("");
        let col_start = if index == span.start.line { span.start.column } else { 0 };
        let col_end = if index == last_line {
            span.end.column
        } else {
            text.chars().count()
        };
        let width = col_end.saturating_sub(col_start).max(1);

        rows.push(text.to_string());
        rows.push(format!("{}{}", " ".repeat(col_start), "^".repeat(width)));
    }
    rows.join("\n")
}
