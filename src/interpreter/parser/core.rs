use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::Node,
    error::{Error, ParseError},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            expression::{parse_basic_expr, parse_exprs},
            utils::{covering, end_of_input, expect, parse_comma_separated},
        },
    },
};

pub type ParseResult<T> = Result<T, Error>;

/// Maximum depth of nested parentheses in a program.
///
/// Every nested form opens a parenthesis, so this also bounds the recursion
/// of the parser and of the evaluator within one function body.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses a whole program.
///
/// This is the entry point for parsing a token sequence. Definitions are
/// consumed greedily; each attempt starts from a saved copy of the token
/// cursor. When an attempt fails because the tokens are not a definition,
/// the cursor is restored to that copy and exactly one trailing expression
/// is parsed as the program's tail. Any other failure while scanning
/// definitions is returned unchanged.
///
/// Grammar: `program := definition* basic_expr EOF`
///
/// # Parameters
/// - `tokens`: Token iterator over an `Eof`-terminated sequence.
///
/// # Returns
/// A `Node::Program` holding the definitions followed by the tail
/// expression.
///
/// # Errors
/// - Any syntax error inside a definition body or the tail expression.
/// - `ExpectedEndOfInput` if tokens remain after the tail expression.
/// - `NestingTooDeep` if parentheses nest deeper than `MAX_NESTING_DEPTH`.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    check_nesting(tokens.clone())?;

    let mut nodes = Vec::new();

    loop {
        let checkpoint = tokens.clone();
        match parse_definition(tokens) {
            Ok(definition) => nodes.push(definition),
            Err(e) if e.is_not_a_definition() => {
                *tokens = checkpoint;
                break;
            },
            Err(e) => return Err(e),
        }
    }
    debug!(definitions = nodes.len(), "parsed definitions");

    let tail = parse_basic_expr(tokens)?;
    nodes.push(tail);

    match tokens.peek().copied() {
        Some(Token { kind: TokenKind::Eof,
                     .. })
        | None => {},
        Some(token) => {
            return Err(Error::syntax(ParseError::ExpectedEndOfInput { found: token.kind.to_string() },
                                     token.span));
        },
    }

    let span = covering(nodes[0].span(), nodes.last());
    Ok(Node::Program { nodes, span })
}

/// Parses a function definition of the form
/// `<name>(param1, param2, ...) = expr, expr, ...`.
///
/// Everything up to and including the `=` is the head of the definition. If
/// the head does not match, the tokens cannot be a definition and
/// `NotADefinition` is reported so the caller can backtrack; this covers
/// `add(3, 4)` (an argument that is no identifier) as well as `f(x)`
/// followed by anything but `=`. Errors inside the body are ordinary syntax
/// errors.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a potential function name.
///
/// # Returns
/// A `Node::Assign` with the name, parameter names and body.
fn parse_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let not_a_definition = |found: String| ParseError::NotADefinition { found };

    let (name, start) = match tokens.peek().copied() {
        Some(Token { kind: TokenKind::Identifier(name),
                     span, }) => {
            tokens.next();
            (name.clone(), *span)
        },
        Some(token) => {
            return Err(Error::syntax(not_a_definition(token.kind.to_string()), token.span));
        },
        None => return Err(end_of_input()),
    };
    expect(tokens, &TokenKind::LParen, not_a_definition)?;

    let (params, _) = parse_comma_separated(tokens, parse_parameter)?;

    // Only now is it known whether this was a definition or a call.
    expect(tokens, &TokenKind::Equals, not_a_definition)?;

    let body = parse_exprs(tokens)?;
    let span = covering(start, body.last());

    Ok(Node::Assign { name,
                      params,
                      body,
                      span })
}

/// Parses one parameter name of a definition head.
///
/// A parameter that is not an identifier means the head is a call, so the
/// mismatch is reported as `NotADefinition`, as is a list that is neither
/// continued nor closed.
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a Token> + Clone
{
    match tokens.peek().copied() {
        Some(Token { kind: TokenKind::Identifier(name),
                     .. }) => {
            tokens.next();
            match tokens.peek().copied() {
                Some(Token { kind: TokenKind::Comma | TokenKind::RParen,
                             .. }) => Ok(name.clone()),
                Some(token) => {
                    Err(Error::syntax(ParseError::NotADefinition { found:
                                                                       token.kind.to_string() },
                                      token.span))
                },
                None => Err(end_of_input()),
            }
        },
        Some(token) => {
            Err(Error::syntax(ParseError::NotADefinition { found: token.kind.to_string() },
                              token.span))
        },
        None => Err(end_of_input()),
    }
}

/// Rejects token streams whose parentheses nest deeper than
/// `MAX_NESTING_DEPTH`, before any recursive descent starts.
fn check_nesting<'a, I>(tokens: I) -> ParseResult<()>
    where I: Iterator<Item = &'a Token>
{
    let mut depth = 0usize;
    for token in tokens {
        match token.kind {
            TokenKind::LParen => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(Error::syntax(ParseError::NestingTooDeep { limit:
                                                                              MAX_NESTING_DEPTH },
                                             token.span));
                }
            },
            TokenKind::RParen => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    Ok(())
}
