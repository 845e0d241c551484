use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant has a stable numeric code (see [`ParseError::code`]) so a
/// failure can be identified precisely without matching on the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An identifier was required.
    #[error("Expected identifier, found {found}")]
    ExpectedIdentifier {
        /// Description of the token encountered.
        found: String,
    },
    /// An opening parenthesis `(` was required.
    #[error("Expected '(', found {found}")]
    ExpectedLeftParen {
        /// Description of the token encountered.
        found: String,
    },
    /// A closing parenthesis `)` was required.
    #[error("Expected ')', found {found}")]
    ExpectedRightParen {
        /// Description of the token encountered.
        found: String,
    },
    /// A `,` separating two operands was required.
    #[error("Expected ',', found {found}")]
    ExpectedComma {
        /// Description of the token encountered.
        found: String,
    },
    /// The tokens at the cursor do not form a function definition.
    ///
    /// Raised while scanning for definitions at the start of a program; the
    /// program parser answers it by rewinding and reading the trailing
    /// expression instead.
    #[error("Expected function definition, found {found}")]
    NotADefinition {
        /// Description of the token encountered.
        found: String,
    },
    /// An expression was required but another token was found.
    #[error("Expected expression, found {found}")]
    ExpectedExpression {
        /// Description of the token encountered.
        found: String,
    },
    /// Input ended where an expression was required.
    #[error("Unexpected end of input, expected expression")]
    UnexpectedEndOfInput,
    /// Tokens remained after the program's trailing expression.
    #[error("Expected end of input, found {found}")]
    ExpectedEndOfInput {
        /// Description of the token encountered.
        found: String,
    },
    /// A string literal was opened but never closed.
    #[error("Unterminated string literal")]
    UnterminatedString,
    /// An integer literal does not fit in 64 bits.
    #[error("Integer literal is too large")]
    IntegerTooLarge,
    /// Inside an argument or parameter list, neither `,` nor `)` followed an
    /// item.
    #[error("Expected ',' or ')', found {found}")]
    ExpectedCommaOrRightParen {
        /// Description of the token encountered.
        found: String,
    },
    /// A float literal exceeds the range of a 64-bit float.
    #[error("Float literal is too large")]
    FloatTooLarge,
    /// Parentheses nest deeper than the parser allows.
    #[error("Expressions nest deeper than {limit} levels")]
    NestingTooDeep {
        /// The nesting limit.
        limit: usize,
    },
}

impl ParseError {
    /// Returns the stable diagnostic code of this error.
    ///
    /// # Example
    /// ```
    /// use funke::error::ParseError;
    ///
    /// assert_eq!(ParseError::UnexpectedEndOfInput.code(), 7);
    /// ```
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::ExpectedIdentifier { .. } => 1,
            Self::ExpectedLeftParen { .. } => 2,
            Self::ExpectedRightParen { .. } => 3,
            Self::ExpectedComma { .. } => 4,
            Self::NotADefinition { .. } => 5,
            Self::ExpectedExpression { .. } => 6,
            Self::UnexpectedEndOfInput => 7,
            Self::ExpectedEndOfInput { .. } => 8,
            Self::UnterminatedString => 9,
            Self::IntegerTooLarge => 10,
            Self::ExpectedCommaOrRightParen { .. } => 11,
            Self::FloatTooLarge => 12,
            Self::NestingTooDeep { .. } => 13,
        }
    }
}
