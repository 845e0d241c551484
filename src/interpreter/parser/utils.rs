use std::iter::Peekable;

use crate::{
    ast::Node,
    error::{Error, ParseError},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
    span::Span,
};

/// The error reported when the token stream is exhausted before the parser
/// reached the `Eof` token.
pub(in crate::interpreter::parser) fn end_of_input() -> Error {
    Error::syntax(ParseError::UnexpectedEndOfInput, Span::default())
}

/// Consumes the next token if it is of `kind` and returns its span.
///
/// Nothing is consumed on a mismatch; `error` receives a description of the
/// token that was found and builds the reported error.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the expected token.
/// - `kind`: The token kind required here.
/// - `error`: Builds the parse error from the found token's description.
///
/// # Errors
/// A syntax error spanning the offending token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: &TokenKind,
                                                    error: impl FnOnce(String) -> ParseError)
                                                    -> ParseResult<Span>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek().copied() {
        Some(token) if token.kind == *kind => {
            tokens.next();
            Ok(token.span)
        },
        Some(token) => Err(Error::syntax(error(token.kind.to_string()), token.span)),
        None => Err(end_of_input()),
    }
}

/// Parses a parenthesized, comma-separated list whose opening `(` has
/// already been consumed.
///
/// An immediately encountered `)` produces an empty list.
///
/// Grammar (simplified): `list := [item ("," item)*] ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or at `)`.
/// - `parse_item`: Function used to parse each list element.
///
/// # Returns
/// The parsed items and the span of the closing `)`.
///
/// # Errors
/// Propagates item errors; anything other than `,` or `)` after an item is
/// reported as `ExpectedCommaOrRightParen`.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>)
    -> ParseResult<(Vec<T>, Span)>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if let Some(Token { kind: TokenKind::RParen,
                        span, }) = tokens.peek().copied()
    {
        tokens.next();
        return Ok((items, *span));
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek().copied() {
            Some(Token { kind: TokenKind::Comma,
                         .. }) => {
                tokens.next();
            },
            Some(Token { kind: TokenKind::RParen,
                         span, }) => {
                tokens.next();
                return Ok((items, *span));
            },
            Some(token) => {
                return Err(Error::syntax(ParseError::ExpectedCommaOrRightParen { found:
                                                                                     token.kind
                                                                                          .to_string() },
                                         token.span));
            },
            None => return Err(end_of_input()),
        }
    }
}

/// Parses a plain identifier and returns its name and span.
///
/// # Errors
/// Returns `ExpectedIdentifier` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Span)>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek().copied() {
        Some(Token { kind: TokenKind::Identifier(name),
                     span, }) => {
            tokens.next();
            Ok((name.clone(), *span))
        },
        Some(token) => {
            Err(Error::syntax(ParseError::ExpectedIdentifier { found: token.kind.to_string() },
                              token.span))
        },
        None => Err(end_of_input()),
    }
}

/// Returns the span from the start of `first` to the end of `last`.
pub(in crate::interpreter::parser) fn covering(first: Span, last: Option<&Node>) -> Span {
    last.map_or(first, |node| first.to(node.span()))
}
