use std::fmt;

use logos::Logos;
use tracing::debug;

use crate::{
    error::{Error, ParseError},
    span::{LineMap, Span},
};

/// Represents the kind of a lexical token, with its literal payload if it has
/// one.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Whitespace separates tokens and is otherwise ignored.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// Floating-point literal such as `3.14`, `1.` or `1_000.5`.
    #[regex(r"[0-9][0-9_]*\.[0-9_]*", parse_float)]
    Float(f64),
    /// Integer literal such as `42` or `1_000`.
    #[regex(r"[0-9][0-9_]*", parse_integer)]
    Int(i64),
    /// String literal delimited by `"`, with escapes already decoded.
    #[regex(r#""([^"\\]|\\(.|\n))*"?"#, parse_string)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `add`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `#`
    #[token("#")]
    Hash,
    /// `$`
    #[token("$")]
    Dollar,
    /// `@`
    #[token("@")]
    At,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// End of input. Never produced by the regex table; appended once after
    /// the last real token.
    Eof,
}

/// Reasons the logos state machine rejects a slice of input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    /// No token starts with this character.
    #[default]
    IllegalCharacter,
    /// A string literal reached the end of input without a closing `"`.
    UnterminatedString,
    /// An integer literal does not fit in an `i64`.
    IntegerTooLarge,
    /// A float literal does not fit in an `f64`.
    FloatTooLarge,
}

/// A token together with the source region it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "float {v:?}"),
            Self::Int(v) => write!(f, "integer {v}"),
            Self::Str(s) => write!(f, "string {s:?}"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Equals => write!(f, "'='"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Percent => write!(f, "'%'"),
            Self::Hash => write!(f, "'#'"),
            Self::Dollar => write!(f, "'$'"),
            Self::At => write!(f, "'@'"),
            Self::Less => write!(f, "'<'"),
            Self::Greater => write!(f, "'>'"),
            Self::BangEqual => write!(f, "'!='"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// Converts source text into a token sequence terminated by
/// [`TokenKind::Eof`].
///
/// Lexing stops at the first character that starts no token; there is no
/// recovery.
///
/// # Errors
/// - `Error::IllegalCharacter` spanning exactly the offending character.
/// - `Error::Syntax` for an unterminated string or an integer literal that
///   does not fit in 64 bits.
///
/// # Example
/// ```
/// use funke::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("+(1, x)").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Plus,
///                 TokenKind::LParen,
///                 TokenKind::Int(1),
///                 TokenKind::Comma,
///                 TokenKind::Identifier("x".to_string()),
///                 TokenKind::RParen,
///                 TokenKind::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let map = LineMap::new(source);
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token { kind,
                                            span: map.span(range.start, range.end) }),
            Err(LexError::IllegalCharacter) => {
                let character = lexer.slice().chars().next().unwrap_or('\u{fffd}');
                let start = map.position(range.start);
                return Err(Error::IllegalCharacter { character,
                                                     span: Span::new(start,
                                                                     start.advance(character)) });
            },
            Err(LexError::UnterminatedString) => {
                return Err(Error::syntax(ParseError::UnterminatedString,
                                         map.span(range.start, range.end)));
            },
            Err(LexError::IntegerTooLarge) => {
                return Err(Error::syntax(ParseError::IntegerTooLarge,
                                         map.span(range.start, range.end)));
            },
            Err(LexError::FloatTooLarge) => {
                return Err(Error::syntax(ParseError::FloatTooLarge,
                                         map.span(range.start, range.end)));
            },
        }
    }

    tokens.push(Token { kind: TokenKind::Eof,
                        span: Span::point(map.position(source.len())) });
    debug!(tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Parses an integer literal, dropping `_` separators.
fn parse_integer(lex: &logos::Lexer<TokenKind>) -> Result<i64, LexError> {
    lex.slice()
       .replace('_', "")
       .parse()
       .map_err(|_| LexError::IntegerTooLarge)
}

/// Parses a floating-point literal, dropping `_` separators.
///
/// The regex guarantees digits on the left of the point, so the only
/// adjustment needed is a trailing `0` for literals like `1.`. Literals
/// beyond the `f64` range are rejected rather than read as infinity.
fn parse_float(lex: &logos::Lexer<TokenKind>) -> Result<f64, LexError> {
    let mut digits = lex.slice().replace('_', "");
    if digits.ends_with('.') {
        digits.push('0');
    }
    digits.parse::<f64>()
          .ok()
          .filter(|value| value.is_finite())
          .ok_or(LexError::FloatTooLarge)
}

/// Parses a string literal, decoding its escapes.
fn parse_string(lex: &logos::Lexer<TokenKind>) -> Result<String, LexError> {
    let slice = lex.slice();
    let body = &slice[1..];

    // A lone `\"` at the end is an escaped quote, not a terminator.
    let closed = body.ends_with('"') && !ends_with_open_escape(&body[..body.len() - 1]);
    if !closed {
        return Err(LexError::UnterminatedString);
    }

    Ok(unescape(&body[..body.len() - 1]))
}

/// Returns `true` if `text` ends in an odd run of backslashes.
fn ends_with_open_escape(text: &str) -> bool {
    text.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Decodes the escape sequences of a string literal body.
///
/// - `\n`, `\t`, `\r` map to the control characters.
/// - `\xHH` decodes two hex digits; anything else after `\x` yields `?`.
/// - Any other escaped character is kept literally.
///
/// # Example
/// ```
/// use funke::interpreter::lexer::unescape;
///
/// assert_eq!(unescape(r"a\tb\x41\xZZ\q"), "a\tbA?ZZq");
/// ```
#[must_use]
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('x') => {
                let mut lookahead = chars.clone();
                let hex = match (lookahead.next(), lookahead.next()) {
                    (Some(hi), Some(lo)) => hi.to_digit(16).zip(lo.to_digit(16)),
                    _ => None,
                };
                match hex {
                    Some((hi, lo)) => {
                        chars = lookahead;
                        out.push(char::from(u8::try_from(hi * 16 + lo).unwrap_or(b'?')));
                    },
                    None => out.push('?'),
                }
            },
            Some(other) => out.push(other),
            None => {},
        }
    }
    out
}
