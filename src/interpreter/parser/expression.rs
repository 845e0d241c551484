use std::iter::Peekable;

use crate::{
    ast::{ArithOp, CompareOp, Node},
    error::{Error, ParseError},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            utils::{end_of_input, expect, parse_comma_separated, parse_identifier},
        },
    },
    span::Span,
};

/// Parses a comma-separated list of expressions.
///
/// Used for definition bodies and for the guarded list of a comparison
/// form. Every expression is kept, in source order.
///
/// Grammar: `exprs := expr ("," expr)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first expression.
///
/// # Returns
/// A non-empty vector of nodes.
pub fn parse_exprs<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut exprs = vec![parse_expr(tokens)?];

    while let Some(Token { kind: TokenKind::Comma,
                           .. }) = tokens.peek().copied()
    {
        tokens.next();
        exprs.push(parse_expr(tokens)?);
    }

    Ok(exprs)
}

/// Parses a single expression, which may be a variable assignment.
///
/// An identifier immediately followed by `=` starts an assignment; telling
/// this apart from a plain variable access takes one token of peek beyond
/// the lookahead.
///
/// Grammar: `expr := IDENT "=" basic_expr | basic_expr`
pub fn parse_expr<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(Token { kind: TokenKind::Identifier(name),
                        span, }) = tokens.peek().copied()
    {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some(Token { kind: TokenKind::Equals,
                            .. }) = lookahead.peek()
        {
            tokens.next();
            tokens.next();

            let value = parse_basic_expr(tokens)?;
            return Ok(Node::VarAssign { name:  name.clone(),
                                        span:  span.to(value.span()),
                                        value: Box::new(value), });
        }
    }

    parse_basic_expr(tokens)
}

/// Parses a basic expression.
///
/// Basic expressions are literals, the builtin forms and identifiers. The
/// leading token decides the production; nothing here backtracks.
///
/// Grammar:
/// ```text
///     basic_expr := INT | FLOAT | STRING
///                 | "#"
///                 | "$" "(" basic_expr ")"
///                 | ("+" | "-" | "*" | "/" | "%") "(" basic_expr "," basic_expr ")"
///                 | "@" "(" basic_expr "," basic_expr ")"
///                 | ("=" | "<" | ">" | "!=") "(" basic_expr "," basic_expr "," exprs ")"
///                 | IDENT ["(" [basic_expr ("," basic_expr)*] ")"]
/// ```
///
/// # Errors
/// - `UnexpectedEndOfInput` if the input ends where an expression belongs.
/// - `ExpectedExpression` for any other token that starts no expression.
/// - Errors of the nested productions.
pub fn parse_basic_expr<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = tokens.peek().copied().ok_or_else(end_of_input)?;
    let span = token.span;

    match &token.kind {
        TokenKind::Int(value) => {
            tokens.next();
            Ok(Node::Int { value: *value,
                           span })
        },
        TokenKind::Float(value) => {
            tokens.next();
            Ok(Node::Float { value: *value,
                             span })
        },
        TokenKind::Str(value) => {
            tokens.next();
            Ok(Node::Str { value: value.clone(),
                           span })
        },
        TokenKind::Hash => {
            tokens.next();
            Ok(Node::Input { span })
        },
        TokenKind::Dollar => parse_print(tokens),
        TokenKind::Plus => parse_binary(tokens, ArithOp::Add),
        TokenKind::Minus => parse_binary(tokens, ArithOp::Sub),
        TokenKind::Star => parse_binary(tokens, ArithOp::Mul),
        TokenKind::Slash => parse_binary(tokens, ArithOp::Div),
        TokenKind::Percent => parse_binary(tokens, ArithOp::Mod),
        TokenKind::At => parse_rand(tokens),
        TokenKind::Equals => parse_guard(tokens, CompareOp::Equal),
        TokenKind::Less => parse_guard(tokens, CompareOp::Less),
        TokenKind::Greater => parse_guard(tokens, CompareOp::Greater),
        TokenKind::BangEqual => parse_guard(tokens, CompareOp::NotEqual),
        TokenKind::Identifier(_) => parse_identifier_or_call(tokens),
        TokenKind::Eof => Err(Error::syntax(ParseError::UnexpectedEndOfInput, span)),
        other => Err(Error::syntax(ParseError::ExpectedExpression { found: other.to_string() },
                                   span)),
    }
}

/// Consumes the operator token of a builtin form and its `(`.
///
/// Returns the span of the operator token.
fn parse_form_start<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Span>
    where I: Iterator<Item = &'a Token> + Clone
{
    let operator = tokens.next().ok_or_else(end_of_input)?;
    expect(tokens, &TokenKind::LParen, |found| ParseError::ExpectedLeftParen { found })?;
    Ok(operator.span)
}

/// Parses the two leading operands shared by the arithmetic, random and
/// comparison forms: `basic_expr "," basic_expr`.
fn parse_operand_pair<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Node, Node)>
    where I: Iterator<Item = &'a Token> + Clone
{
    let left = parse_basic_expr(tokens)?;
    expect(tokens, &TokenKind::Comma, |found| ParseError::ExpectedComma { found })?;
    let right = parse_basic_expr(tokens)?;
    Ok((left, right))
}

/// Consumes the closing `)` of a form and returns its span.
fn parse_form_end<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Span>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, &TokenKind::RParen, |found| ParseError::ExpectedRightParen { found })
}

/// Parses `$( expr )`.
fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let start = parse_form_start(tokens)?;
    let expr = parse_basic_expr(tokens)?;
    let end = parse_form_end(tokens)?;

    Ok(Node::Print { expr: Box::new(expr),
                     span: start.to(end), })
}

/// Parses one of the arithmetic forms, e.g. `+( a, b )`.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the operator.
/// - `op`: The operator the leading token stands for.
fn parse_binary<'a, I>(tokens: &mut Peekable<I>, op: ArithOp) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let start = parse_form_start(tokens)?;
    let (left, right) = parse_operand_pair(tokens)?;
    let end = parse_form_end(tokens)?;

    Ok(Node::Binary { op,
                      left: Box::new(left),
                      right: Box::new(right),
                      span: start.to(end) })
}

/// Parses `@( low, high )`.
fn parse_rand<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let start = parse_form_start(tokens)?;
    let (low, high) = parse_operand_pair(tokens)?;
    let end = parse_form_end(tokens)?;

    Ok(Node::Rand { low:  Box::new(low),
                    high: Box::new(high),
                    span: start.to(end), })
}

/// Parses a guarded comparison, e.g. `<( a, b, expr, expr )`.
///
/// The guarded list after the two operands uses the `exprs` production, so
/// it may contain assignments.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the operator.
/// - `op`: The comparison the leading token stands for.
fn parse_guard<'a, I>(tokens: &mut Peekable<I>, op: CompareOp) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let start = parse_form_start(tokens)?;
    let (left, right) = parse_operand_pair(tokens)?;
    expect(tokens, &TokenKind::Comma, |found| ParseError::ExpectedComma { found })?;
    let body = parse_exprs(tokens)?;
    let end = parse_form_end(tokens)?;

    Ok(Node::Guard { op,
                     left: Box::new(left),
                     right: Box::new(right),
                     body,
                     span: start.to(end) })
}

/// Parses a variable access or, when `(` follows the identifier, a call.
///
/// Grammar: `IDENT ["(" [basic_expr ("," basic_expr)*] ")"]`
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let (name, span) = parse_identifier(tokens)?;

    if let Some(Token { kind: TokenKind::LParen,
                        .. }) = tokens.peek().copied()
    {
        tokens.next();
        let (arguments, end) = parse_comma_separated(tokens, parse_basic_expr)?;
        return Ok(Node::Call { name,
                               arguments,
                               span: span.to(end) });
    }

    Ok(Node::VarAccess { name, span })
}
