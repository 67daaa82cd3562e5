//! Parser for Go source tokens.
//!
//! This module transforms a token stream from the [`lexer`](super::lexer) into
//! the syntax tree defined in [`parser_types`](super::parser_types). Only the
//! package clause and `type` declarations are parsed; every other token is
//! skipped, which lets the parser find declarations nested in function
//! bodies without understanding statements. The public entry points are
//! [`build_source_file`] and [`build_type_expr`].

use winnow::{
    Parser as _,
    combinator::{alt, eof, opt, preceded, repeat, terminated},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// A specific error code that replaces the generic "unexpected token"
    Code(ErrorCode),
    /// Remaining token count (`eof_offset()`) at error start position
    ///
    /// Used to calculate start_offset as: `tokens.len() - start_offset_value`
    StartOffset(usize),
}

type Input<'src> = GoTokenSlice<'src>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;
/// Type alias for winnow TokenSlice with our positioned tokens
type GoTokenSlice<'src> = TokenSlice<'src, PositionedToken<'src>>;

fn cut_err<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let start_remaining = input.eof_offset();

    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(mut e)) | Err(ErrMode::Cut(mut e)) => {
            e.push(Context::StartOffset(start_remaining));
            Err(ErrMode::Cut(e))
        }
        Err(e) => Err(e),
    }
}

/// Helper to create a Backtrack error carrying a label
fn backtrack_error(label: &'static str) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Label(label));
    ErrMode::Backtrack(e)
}

/// Helper to create a Cut error with an error code and a specific StartOffset value
fn cut_error_with_code(start_offset: usize, code: ErrorCode) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Code(code));
    e.push(Context::StartOffset(start_offset));
    ErrMode::Cut(e)
}

/// Parse one space or comment token
fn trivia<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| token.token.is_trivia())
        .void()
        .parse_next(input)
}

/// Parse a newline token
fn newline<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Newline))
        .void()
        .parse_next(input)
}

/// Parse zero or more spaces/comments on the current line
fn ws0<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(0.., trivia).parse_next(input)
}

/// Parse zero or more spaces/comments/newlines
fn nl0<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(0.., alt((trivia, newline))).parse_next(input)
}

/// Parse zero or more member separators: newlines, `;`, spaces and comments
fn separators0<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(
        0..,
        alt((
            trivia,
            newline,
            any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Semicolon))
                .void(),
        )),
    )
    .parse_next(input)
}

/// Build a parser for one token equal to `expected`, after optional spaces
fn token<'src>(expected: Token<'static>) -> impl FnMut(&mut Input<'src>) -> IResult<Span> {
    move |input: &mut Input<'src>| {
        ws0(input)?;
        any.verify(|t: &PositionedToken<'_>| t.token == expected)
            .map(|t: &PositionedToken<'_>| t.span)
            .parse_next(input)
    }
}

/// Returns the next `count` significant tokens without consuming them.
///
/// Spaces and comments are always skipped; newlines only when
/// `skip_newlines` is set.
fn peek_tokens<'src>(
    input: &mut Input<'src>,
    count: usize,
    skip_newlines: bool,
) -> Vec<&'src Token<'src>> {
    let checkpoint = input.checkpoint();
    let mut seen = Vec::with_capacity(count);
    while seen.len() < count {
        match input.next_token() {
            Some(t) if t.token.is_trivia() => {}
            Some(t) if skip_newlines && t.token == Token::Newline => {}
            Some(t) => seen.push(&t.token),
            None => break,
        }
    }
    input.reset(&checkpoint);
    seen
}

/// Parse an identifier with span preservation
fn identifier<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    preceded(
        ws0,
        any.verify_map(|token: &PositionedToken<'src>| match token.token {
            Token::Identifier(name) => Some(Spanned::new(name, token.span)),
            _ => None,
        }),
    )
    .context(Context::Label("identifier"))
    .parse_next(input)
}

/// Parse a comma separated identifier list: `a, b, c`
fn identifier_list<'src>(input: &mut Input<'src>) -> IResult<Vec<Spanned<&'src str>>> {
    let first = identifier(input)?;
    let rest: Vec<_> =
        repeat(0.., preceded((token(Token::Comma), nl0), identifier)).parse_next(input)?;

    let mut names = Vec::with_capacity(rest.len() + 1);
    names.push(first);
    names.extend(rest);
    Ok(names)
}

/// Parse a struct tag: an interpreted or raw string literal
fn tag<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    preceded(
        ws0,
        any.verify_map(|token: &PositionedToken<'src>| match token.token {
            Token::StringLiteral(text) | Token::RawStringLiteral(text) => {
                Some(Spanned::new(text, token.span))
            }
            _ => None,
        }),
    )
    .context(Context::Label("tag"))
    .parse_next(input)
}

/// Parse the end of a struct field, interface element or grouped spec.
///
/// A newline or `;` is consumed; the closing delimiter is left in place.
fn member_end<'src>(input: &mut Input<'src>, closing: Token<'static>) -> IResult<()> {
    ws0(input)?;
    let next = peek_tokens(input, 1, false);
    match next.first() {
        Some(Token::Newline | Token::Semicolon) => any.void().parse_next(input),
        Some(t) if **t == closing => Ok(()),
        _ => Err(backtrack_error("newline or `;` after member")),
    }
}

// ============================================================================
// Type expressions
// ============================================================================

/// Parse a type expression
fn type_expr<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    alt((
        named_type,
        pointer_type,
        array_type,
        map_type,
        alt((chan_type, recv_chan_type)),
        func_type,
        struct_type,
        interface_type,
        alt((paren_type, variadic_type)),
    ))
    .context(Context::Label("type"))
    .parse_next(input)
}

/// Parse a type name: `T`, `pkg.T`, `List[T]`, `pkg.Map[K, V]`
fn named_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    let first = identifier(input)?;
    let selected = opt(preceded(token(Token::Dot), identifier)).parse_next(input)?;

    let base = match selected {
        Some(name) => types::TypeNode::Qualified {
            package: first,
            name,
        },
        None => types::TypeNode::Name(first),
    };

    match opt(type_args).parse_next(input)? {
        Some(args) => Ok(types::TypeNode::Generic {
            base: Box::new(base),
            args,
        }),
        None => Ok(base),
    }
}

/// Parse generic type arguments: `[K, V]`
fn type_args<'src>(input: &mut Input<'src>) -> IResult<Vec<types::TypeNode<'src>>> {
    token(Token::LeftBracket).parse_next(input)?;

    let mut args = Vec::new();
    loop {
        nl0(input)?;
        args.push(type_expr(input)?);
        nl0(input)?;
        if opt(token(Token::Comma)).parse_next(input)?.is_none() {
            nl0(input)?;
            token(Token::RightBracket).parse_next(input)?;
            break;
        }
        nl0(input)?;
        if opt(token(Token::RightBracket)).parse_next(input)?.is_some() {
            break;
        }
    }
    Ok(args)
}

/// Parse a pointer type: `*T`
fn pointer_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    preceded(token(Token::Star), type_expr)
        .map(|inner| types::TypeNode::Pointer(Box::new(inner)))
        .parse_next(input)
}

/// Parse a slice `[]T` or array `[N]T` type
fn array_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    token(Token::LeftBracket).parse_next(input)?;
    nl0(input)?;

    if opt(token(Token::RightBracket)).parse_next(input)?.is_some() {
        let elem = type_expr(input)?;
        return Ok(types::TypeNode::Slice(Box::new(elem)));
    }

    let length = array_length(input)?;
    let elem = type_expr(input)?;
    Ok(types::TypeNode::Array {
        length,
        elem: Box::new(elem),
    })
}

/// Consume an array length expression up to and including the closing `]`.
///
/// The expression is not parsed; its tokens are kept as text.
fn array_length<'src>(input: &mut Input<'src>) -> IResult<String> {
    let mut depth = 0usize;
    let mut text = String::new();

    loop {
        let Some(positioned) = input.next_token() else {
            return Err(backtrack_error("`]`"));
        };
        match positioned.token {
            Token::RightBracket if depth == 0 => break,
            Token::LeftBracket | Token::LeftParen | Token::LeftBrace => depth += 1,
            Token::RightBracket | Token::RightParen | Token::RightBrace => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| backtrack_error("array length"))?;
            }
            _ => {}
        }
        if !positioned.token.is_trivia() && positioned.token != Token::Newline {
            text.push_str(&positioned.token.to_string());
        }
    }

    if text.is_empty() {
        return Err(backtrack_error("array length"));
    }
    Ok(text)
}

/// Parse a map type: `map[K]V`
fn map_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    token(Token::Map).parse_next(input)?;
    token(Token::LeftBracket).parse_next(input)?;
    nl0(input)?;
    let key = type_expr(input)?;
    nl0(input)?;
    token(Token::RightBracket).parse_next(input)?;
    let value = type_expr(input)?;

    Ok(types::TypeNode::Map {
        key: Box::new(key),
        value: Box::new(value),
    })
}

/// Parse a bidirectional or send-only channel type: `chan T`, `chan<- T`
fn chan_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    token(Token::Chan).parse_next(input)?;
    let dir = match opt(token(Token::Arrow)).parse_next(input)? {
        Some(_) => types::ChanDir::Send,
        None => types::ChanDir::Both,
    };
    let elem = type_expr(input)?;

    Ok(types::TypeNode::Chan {
        dir,
        elem: Box::new(elem),
    })
}

/// Parse a receive-only channel type: `<-chan T`
fn recv_chan_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    preceded((token(Token::Arrow), token(Token::Chan)), type_expr)
        .map(|elem| types::TypeNode::Chan {
            dir: types::ChanDir::Recv,
            elem: Box::new(elem),
        })
        .parse_next(input)
}

/// Parse a function type: `func(params) results`
fn func_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    preceded(token(Token::Func), signature)
        .map(types::TypeNode::Func)
        .parse_next(input)
}

/// Parse a parenthesized type: `(T)`
fn paren_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    token(Token::LeftParen).parse_next(input)?;
    nl0(input)?;
    let inner = type_expr(input)?;
    nl0(input)?;
    token(Token::RightParen).parse_next(input)?;

    Ok(types::TypeNode::Paren(Box::new(inner)))
}

/// Parse a variadic parameter type: `...T`
fn variadic_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    preceded(token(Token::Ellipsis), type_expr)
        .map(|elem| types::TypeNode::Ellipsis(Box::new(elem)))
        .parse_next(input)
}

/// Parse a type-set term: `T` or `~T`
fn constraint_term<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    match opt(token(Token::Tilde)).parse_next(input)? {
        Some(_) => type_expr
            .map(|inner| types::TypeNode::Tilde(Box::new(inner)))
            .parse_next(input),
        None => type_expr(input),
    }
}

/// Parse a constraint: one term or a union `A | ~B | C`
fn constraint<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    let first = constraint_term(input)?;
    let rest: Vec<_> =
        repeat(0.., preceded((token(Token::Pipe), nl0), constraint_term)).parse_next(input)?;

    if rest.is_empty() {
        return Ok(first);
    }
    let mut terms = Vec::with_capacity(rest.len() + 1);
    terms.push(first);
    terms.extend(rest);
    Ok(types::TypeNode::Union(terms))
}

// ============================================================================
// Signatures
// ============================================================================

/// One entry of a parameter list before Go's grouping rules are applied.
enum ParamEntry<'src> {
    Named(Spanned<&'src str>, types::TypeNode<'src>),
    Unnamed(types::TypeNode<'src>),
}

/// Parse the rest of a named parameter after its name.
///
/// Fails unless the type is followed by `,` or `)`, so that `List[T]` is
/// not mistaken for a parameter `List` of array type `[T]...`.
fn named_param_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    let ty = type_expr(input)?;
    let next = peek_tokens(input, 1, true);
    if matches!(next.first(), Some(Token::Comma | Token::RightParen)) {
        Ok(ty)
    } else {
        Err(backtrack_error("`,` or `)`"))
    }
}

/// Parse one parameter list entry: `name T` or `T`
fn param_entry<'src>(input: &mut Input<'src>) -> IResult<ParamEntry<'src>> {
    let checkpoint = input.checkpoint();

    if let Some(name) = opt(identifier).parse_next(input)? {
        let next = peek_tokens(input, 1, false);
        if next.first().is_some_and(|t| t.starts_type()) {
            match named_param_type(input) {
                Ok(ty) => return Ok(ParamEntry::Named(name, ty)),
                Err(ErrMode::Backtrack(_)) => {}
                Err(e) => return Err(e),
            }
        }
        input.reset(&checkpoint);
    }

    type_expr.map(ParamEntry::Unnamed).parse_next(input)
}

/// Apply Go's parameter grouping: in `(a, b int, c string)` the bare names
/// `a` and `b` share the type of the next named entry.
///
/// Returns `None` when named and unnamed parameters are mixed.
fn group_parameters(entries: Vec<ParamEntry<'_>>) -> Option<Vec<types::FieldDecl<'_>>> {
    if !entries.iter().any(|e| matches!(e, ParamEntry::Named(..))) {
        return Some(
            entries
                .into_iter()
                .map(|entry| match entry {
                    ParamEntry::Named(_, ty) | ParamEntry::Unnamed(ty) => {
                        types::FieldDecl::unnamed(ty)
                    }
                })
                .collect(),
        );
    }

    let mut fields = Vec::new();
    let mut pending = Vec::new();
    for entry in entries {
        match entry {
            ParamEntry::Unnamed(types::TypeNode::Name(name)) => pending.push(name),
            ParamEntry::Unnamed(_) => return None,
            ParamEntry::Named(name, ty) => {
                pending.push(name);
                fields.push(types::FieldDecl::new(std::mem::take(&mut pending), ty));
            }
        }
    }
    pending.is_empty().then_some(fields)
}

/// Parse a parenthesized parameter or result list
fn parameters<'src>(input: &mut Input<'src>) -> IResult<Vec<types::FieldDecl<'src>>> {
    ws0(input)?;
    let start = input.eof_offset();
    token(Token::LeftParen)
        .context(Context::Label("`(`"))
        .parse_next(input)?;

    let mut entries = Vec::new();
    loop {
        nl0(input)?;
        if opt(token(Token::RightParen)).parse_next(input)?.is_some() {
            break;
        }
        entries.push(param_entry(input)?);
        nl0(input)?;
        if opt(token(Token::Comma)).parse_next(input)?.is_none() {
            nl0(input)?;
            token(Token::RightParen)
                .context(Context::Label("`)`"))
                .parse_next(input)?;
            break;
        }
    }

    group_parameters(entries).ok_or_else(|| cut_error_with_code(start, ErrorCode::E103))
}

/// Parse the result part of a signature, which may be absent
fn results<'src>(input: &mut Input<'src>) -> IResult<Vec<types::FieldDecl<'src>>> {
    let next = peek_tokens(input, 1, false);
    match next.first() {
        Some(Token::LeftParen) => parameters(input),
        Some(t) if t.starts_type() && !matches!(t, Token::Ellipsis | Token::Tilde) => {
            let ty = type_expr(input)?;
            Ok(vec![types::FieldDecl::unnamed(ty)])
        }
        _ => Ok(Vec::new()),
    }
}

/// Parse a function signature: `(params) results`
fn signature<'src>(input: &mut Input<'src>) -> IResult<types::Signature<'src>> {
    let params = parameters(input)?;
    let results = results(input)?;
    Ok(types::Signature { params, results })
}

// ============================================================================
// Structs and interfaces
// ============================================================================

/// Parse a named field whose type starts with `[`, checking that it ends
/// where a field must end
fn bracketed_named_field<'src>(input: &mut Input<'src>) -> IResult<types::FieldDecl<'src>> {
    let name = identifier(input)?;
    let ty = type_expr(input)?;
    let tag = opt(tag).parse_next(input)?;

    let next = peek_tokens(input, 1, false);
    if !matches!(
        next.first(),
        Some(Token::Newline | Token::Semicolon | Token::RightBrace)
    ) {
        return Err(backtrack_error("end of field"));
    }

    Ok(types::FieldDecl {
        names: vec![name],
        ty,
        tag,
    })
}

/// Parse one struct field: named `a, b T`, or embedded `T`, `*T`, `pkg.T`
fn field_decl<'src>(input: &mut Input<'src>) -> IResult<types::FieldDecl<'src>> {
    let next = peek_tokens(input, 2, false);

    let (names, ty) = match next.as_slice() {
        [Token::Identifier(_), Token::Comma] => {
            let names = identifier_list(input)?;
            (names, type_expr(input)?)
        }
        [Token::Identifier(_), Token::LeftBracket] => {
            // `a [4]int` is a named field, `List[T]` an embedded generic
            let checkpoint = input.checkpoint();
            match bracketed_named_field(input) {
                Ok(field) => return Ok(field),
                Err(ErrMode::Backtrack(_)) => input.reset(&checkpoint),
                Err(e) => return Err(e),
            }
            (Vec::new(), type_expr(input)?)
        }
        [Token::Identifier(_), second] if second.starts_type() => {
            let name = identifier(input)?;
            (vec![name], type_expr(input)?)
        }
        _ => (Vec::new(), type_expr(input)?),
    };

    let tag = opt(tag).parse_next(input)?;
    Ok(types::FieldDecl { names, ty, tag })
}

/// Parse a struct type: `struct { ... }`
fn struct_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    token(Token::Struct).parse_next(input)?;
    token(Token::LeftBrace).parse_next(input)?;

    let mut fields = Vec::new();
    loop {
        separators0(input)?;
        if opt(token(Token::RightBrace)).parse_next(input)?.is_some() {
            break;
        }
        fields.push(field_decl(input)?);
        member_end(input, Token::RightBrace)?;
    }

    Ok(types::TypeNode::Struct(fields))
}

/// Parse one interface element: a method `Name(params) results` or an
/// embedded constraint
fn interface_elem<'src>(input: &mut Input<'src>) -> IResult<types::InterfaceElem<'src>> {
    let next = peek_tokens(input, 2, false);

    if let [Token::Identifier(_), Token::LeftParen] = next.as_slice() {
        let name = identifier(input)?;
        let signature = signature(input)?;
        return Ok(types::InterfaceElem::Method { name, signature });
    }

    constraint
        .map(types::InterfaceElem::Embedded)
        .parse_next(input)
}

/// Parse an interface type: `interface { ... }`
fn interface_type<'src>(input: &mut Input<'src>) -> IResult<types::TypeNode<'src>> {
    token(Token::Interface).parse_next(input)?;
    token(Token::LeftBrace).parse_next(input)?;

    let mut elems = Vec::new();
    loop {
        separators0(input)?;
        if opt(token(Token::RightBrace)).parse_next(input)?.is_some() {
            break;
        }
        elems.push(interface_elem(input)?);
        member_end(input, Token::RightBrace)?;
    }

    Ok(types::TypeNode::Interface(elems))
}

// ============================================================================
// Declarations
// ============================================================================

/// Check whether `[` after a type name opens a type parameter list rather
/// than an array length: `type S[T any]` versus `type A [N]int`.
fn at_type_params<'src>(input: &mut Input<'src>) -> bool {
    match peek_tokens(input, 5, false).as_slice() {
        // `[N * M]int` and `[N * 4]int` multiply unless a comma forces a
        // list (`[P *C, Q any]`); `[T *[]int]` constrains
        [
            Token::LeftBracket,
            Token::Identifier(_),
            Token::Star,
            Token::Identifier(_),
            fifth,
            ..,
        ] => matches!(fifth, Token::Comma),
        [Token::LeftBracket, Token::Identifier(_), Token::Star, fourth, ..] => {
            !matches!(fourth, Token::Number(_) | Token::LeftParen)
        }
        [Token::LeftBracket, Token::Identifier(_), third, ..] => {
            matches!(third, Token::Comma)
                || (third.starts_type() && !matches!(third, Token::LeftParen | Token::Ellipsis))
        }
        _ => false,
    }
}

/// Parse type parameters: `[K comparable, V any]`
fn type_params<'src>(input: &mut Input<'src>) -> IResult<Vec<types::FieldDecl<'src>>> {
    token(Token::LeftBracket).parse_next(input)?;

    let mut params = Vec::new();
    loop {
        nl0(input)?;
        if opt(token(Token::RightBracket)).parse_next(input)?.is_some() {
            break;
        }
        let names = identifier_list(input)?;
        let bound = constraint(input)?;
        params.push(types::FieldDecl::new(names, bound));
        nl0(input)?;
        if opt(token(Token::Comma)).parse_next(input)?.is_none() {
            nl0(input)?;
            token(Token::RightBracket)
                .context(Context::Label("`]`"))
                .parse_next(input)?;
            break;
        }
    }
    Ok(params)
}

/// Parse one type spec: `Name[TypeParams] = Type` or `Name Type`
fn type_spec<'src>(input: &mut Input<'src>) -> IResult<types::TypeSpec<'src>> {
    let name = identifier(input)?;
    if at_type_params(input) {
        type_params(input)?;
    }
    let alias = opt(token(Token::Equals)).parse_next(input)?.is_some();
    let ty = type_expr(input)?;

    Ok(types::TypeSpec {
        name,
        alias,
        ty,
    })
}

/// Parse a type declaration: `type Spec` or `type ( Spec; Spec )`
fn type_decl<'src>(input: &mut Input<'src>) -> IResult<Vec<types::TypeSpec<'src>>> {
    token(Token::Type).parse_next(input)?;

    if opt(token(Token::LeftParen)).parse_next(input)?.is_none() {
        return type_spec.map(|spec| vec![spec]).parse_next(input);
    }

    let mut specs = Vec::new();
    loop {
        separators0(input)?;
        if opt(token(Token::RightParen)).parse_next(input)?.is_some() {
            break;
        }
        specs.push(type_spec(input)?);
        member_end(input, Token::RightParen)?;
    }
    Ok(specs)
}

/// Parse the package clause, collecting the comments that precede it
fn package_clause<'src>(
    input: &mut Input<'src>,
    items: &mut Vec<types::Item<'src>>,
) -> IResult<Spanned<&'src str>> {
    loop {
        let start = input.eof_offset();
        match input.next_token() {
            Some(PositionedToken {
                token: Token::LineComment(_) | Token::BlockComment(_),
                ..
            }) => items.push(types::Item::Comment),
            Some(t) if matches!(t.token, Token::Whitespace | Token::Newline) => {}
            Some(t) if t.token == Token::Package => {
                return identifier
                    .parse_next(input)
                    .map_err(|_| cut_error_with_code(start, ErrorCode::E102));
            }
            _ => return Err(cut_error_with_code(start, ErrorCode::E102)),
        }
    }
}

/// Parse a whole source file.
///
/// After the package clause every token is scanned; comments become
/// [`types::Item::Comment`] and each `type` keyword starts a committed type
/// declaration. A `type` right after `(` belongs to a type switch
/// (`x.(type)`) and is skipped.
fn source_file<'src>(input: &mut Input<'src>) -> IResult<types::SourceFile<'src>> {
    let mut items = Vec::new();
    let package = package_clause(input, &mut items)?;
    let mut after_paren = false;

    loop {
        let checkpoint = input.checkpoint();
        let Some(positioned) = input.next_token() else {
            break;
        };

        match &positioned.token {
            Token::LineComment(_) | Token::BlockComment(_) => {
                items.push(types::Item::Comment);
            }
            Token::Type if !after_paren => {
                input.reset(&checkpoint);
                let specs = cut_err(input, type_decl)?;
                items.push(types::Item::TypeDecl(specs));
                after_paren = false;
            }
            Token::Whitespace | Token::Newline => {}
            token => after_paren = *token == Token::LeftParen,
        }
    }

    Ok(types::SourceFile { package, items })
}

// ============================================================================
// Error conversion and entry points
// ============================================================================

/// Returns the span of the first significant token in `tokens`, if any
fn first_significant(tokens: &[PositionedToken<'_>]) -> Option<Span> {
    tokens
        .iter()
        .find(|t| !t.token.is_trivia() && t.token != Token::Newline)
        .map(|t| t.span)
}

/// Returns the span of the last significant token in `tokens`, if any
fn last_significant(tokens: &[PositionedToken<'_>]) -> Option<Span> {
    tokens
        .iter()
        .rev()
        .find(|t| !t.token.is_trivia() && t.token != Token::Newline)
        .map(|t| t.span)
}

fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken],
    current_remaining: usize,
) -> Diagnostic {
    let context_error = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        ErrMode::Incomplete(_) => {
            // This should not happen as we are not supporting streaming input.
            let span = last_significant(tokens).unwrap_or_default();
            return Diagnostic::error("incomplete input, more tokens expected")
                .with_code(ErrorCode::E101)
                .with_label(span, "incomplete")
                .with_help("ensure input is complete");
        }
    };

    let start_remaining = context_error.context().find_map(|ctx| match ctx {
        Context::StartOffset(n) => Some(*n),
        _ => None,
    });

    // Calculate offsets from remaining token counts
    let end_offset = (tokens.len() - current_remaining.min(tokens.len())).min(tokens.len());
    let start_offset = start_remaining
        .map(|r| tokens.len() - r.min(tokens.len()))
        .unwrap_or(0)
        .min(end_offset);

    // The construct that failed, from where it started to the failure point;
    // when nothing was consumed, the next token
    let error_span = match (
        first_significant(&tokens[start_offset..end_offset]),
        last_significant(&tokens[start_offset..end_offset]),
    ) {
        (Some(first), Some(last)) => first.union(last),
        _ => first_significant(&tokens[end_offset..])
            .or_else(|| last_significant(tokens))
            .unwrap_or_default(),
    };

    let code = context_error.context().find_map(|ctx| match ctx {
        Context::Code(code) => Some(*code),
        _ => None,
    });

    match code {
        Some(ErrorCode::E102) => Diagnostic::from_code(ErrorCode::E102)
            .with_label(error_span, "expected `package <name>`")
            .with_help("every Go source file must start with a package clause"),
        Some(ErrorCode::E103) => Diagnostic::from_code(ErrorCode::E103)
            .with_label(error_span, "parameter list")
            .with_help("either name every parameter or none of them"),
        Some(code) => Diagnostic::from_code(code).with_label(error_span, code.description()),
        None => {
            let contexts: Vec<String> = context_error
                .context()
                .filter_map(|ctx| match ctx {
                    Context::Label(label) => Some(format!("expected {label}")),
                    _ => None,
                })
                .collect();

            let message = if contexts.is_empty() {
                "unexpected token or end of input".to_string()
            } else {
                contexts.join(" → ")
            };

            Diagnostic::error(format!("unexpected token: {message}"))
                .with_code(ErrorCode::E100)
                .with_label(error_span, "unexpected token")
                .with_help("check the syntax of the type declaration")
        }
    }
}

/// Parse the tokens of a whole Go source file.
pub fn build_source_file<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<types::SourceFile<'src>, Diagnostic> {
    let mut token_slice = TokenSlice::new(tokens);

    match source_file.parse_next(&mut token_slice) {
        Ok(file) => Ok(file),
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            Err(convert_error(e, tokens, current_remaining))
        }
    }
}

/// Parse the tokens of a single type expression, such as `map[string]*T`.
pub fn build_type_expr<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<types::TypeNode<'src>, Diagnostic> {
    let mut token_slice = TokenSlice::new(tokens);

    let result = terminated(preceded(nl0, type_expr), (nl0, eof)).parse_next(&mut token_slice);
    match result {
        Ok(ty) => Ok(ty),
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            Err(convert_error(e, tokens, current_remaining))
        }
    }
}
