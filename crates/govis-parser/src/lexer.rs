//! Lexical analyzer for Go source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for parsing.
//! Literals and comments are kept as slices of the source, so a type spelled
//! with odd spacing can still be reproduced from its tokens.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, not, opt, peek, preceded, repeat, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, none_of, one_of, rest, take_until, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()` to provide detailed error
/// messages with codes, help text, and precise span information.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Returns `true` for characters that may continue an identifier.
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse one character of a quoted literal: an escape pair or a plain char.
///
/// Escapes are not validated; only their extent matters here.
fn quoted_char<'a>(input: &mut Input<'a>, quote: char) -> IResult<'a, ()> {
    alt((('\\', any).void(), none_of([quote, '\\', '\n']).void())).parse_next(input)
}

/// Parse an interpreted string literal: `"..."` on a single line.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let start = input.current_token_start();

    (
        '"',
        cut_err((
            repeat::<_, _, (), _, _>(0.., |i: &mut Input<'a>| quoted_char(i, '"')),
            '"',
        ))
        .context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add closing `\"` before the end of the line"),
            start,
        }),
    )
        .take()
        .map(Token::StringLiteral)
        .parse_next(input)
}

/// Parse a rune literal: `'a'`, `'\n'`, `'\''`.
fn rune_literal<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let start = input.current_token_start();

    (
        '\'',
        cut_err((
            repeat::<_, _, (), _, _>(1.., |i: &mut Input<'a>| quoted_char(i, '\'')),
            '\'',
        ))
        .context(LexerDiagnostic {
            code: ErrorCode::E005,
            message: "unterminated rune literal",
            help: Some("add closing `'` before the end of the line"),
            start,
        }),
    )
        .take()
        .map(Token::RuneLiteral)
        .parse_next(input)
}

/// Consume the rest of the input and fail with a committed error.
///
/// Used for constructs that may span lines, where resuming right after the
/// opening delimiter would re-lex the unterminated body as code.
fn fail_to_end<'a, O>(input: &mut Input<'a>, diagnostic: LexerDiagnostic) -> IResult<'a, O> {
    let _ = rest.parse_next(input)?;
    Err(ErrMode::Cut(ContextError::new().add_context(
        input,
        &input.checkpoint(),
        diagnostic,
    )))
}

/// Parse a raw string literal: `` `...` ``, which may span lines.
fn raw_string_literal<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let start = input.current_token_start();
    let checkpoint = input.checkpoint();

    let literal: IResult<'a, &'a str> = ('`', take_while(0.., |c| c != '`'), '`')
        .take()
        .parse_next(input);
    if let Ok(text) = literal {
        return Ok(Token::RawStringLiteral(text));
    }

    input.reset(&checkpoint);
    '`'.parse_next(input)?;
    fail_to_end(
        input,
        LexerDiagnostic {
            code: ErrorCode::E003,
            message: "unterminated raw string literal",
            help: Some("add a closing backtick"),
            start,
        },
    )
}

/// Parse line comment starting with '//'
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    preceded("//", take_while(0.., |c| c != '\n'))
        .map(Token::LineComment)
        .parse_next(input)
}

/// Parse block comment delimited by '/*' and '*/'
fn block_comment<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let start = input.current_token_start();

    "/*".parse_next(input)?;
    match terminated(take_until(0.., "*/"), "*/").parse_next(input) {
        Ok(body) => Ok(Token::BlockComment(body)),
        Err(ErrMode::Backtrack(_)) => fail_to_end(
            input,
            LexerDiagnostic {
                code: ErrorCode::E004,
                message: "unterminated block comment",
                help: Some("add closing `*/`"),
                start,
            },
        ),
        Err(e) => Err(e),
    }
}

/// Parse keywords with word boundary checking
fn keyword<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    terminated(
        alt((
            literal("package"),
            literal("type"),
            literal("struct"),
            literal("interface"),
            literal("map"),
            literal("chan"),
            literal("func"),
        )),
        // Ensure keyword is not followed by identifier character (word boundary)
        peek(not(one_of(is_ident_char))),
    )
    .map(|keyword: &str| match keyword {
        "package" => Token::Package,
        "type" => Token::Type,
        "struct" => Token::Struct,
        "interface" => Token::Interface,
        "map" => Token::Map,
        "chan" => Token::Chan,
        "func" => Token::Func,
        _ => unreachable!(),
    })
    .parse_next(input)
}

/// Parse numeric literals.
///
/// Covers decimal, hex, octal, binary, float and imaginary forms loosely:
/// a digit (or a dot followed by a digit) and everything that can continue
/// a number. Exponent signs are lexed as separate operators.
fn number<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        (
            one_of(|c: char| c.is_ascii_digit()),
            take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
        )
            .take(),
        (
            '.',
            take_while(1.., |c: char| c.is_ascii_digit()),
            take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
        )
            .take(),
    ))
    .map(Token::Number)
    .parse_next(input)
}

/// Parse identifiers, including non-ASCII letters
fn identifier<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., is_ident_char)
        .verify(|s: &str| s.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_'))
        .map(Token::Identifier)
        .parse_next(input)
}

/// Parse multi-character operators (order matters - longest first)
fn multi_char_operator<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        literal("...").value(Token::Ellipsis),
        literal("<-").value(Token::Arrow),
    ))
    .parse_next(input)
}

/// Parse single character tokens
fn single_char_token<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((bracket, punctuation)).parse_next(input)
}

fn bracket<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        '['.value(Token::LeftBracket),
        ']'.value(Token::RightBracket),
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
    ))
    .parse_next(input)
}

fn punctuation<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        ';'.value(Token::Semicolon),
        ','.value(Token::Comma),
        '*'.value(Token::Star),
        '.'.value(Token::Dot),
        '='.value(Token::Equals),
        '|'.value(Token::Pipe),
        '~'.value(Token::Tilde),
    ))
    .parse_next(input)
}

/// Parse the remaining Go operator characters.
///
/// These only appear in expressions and statements, which are skipped, so
/// compound operators like `:=` are left as one token per character.
fn operator<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    one_of(['+', '-', '/', '%', '&', '^', '<', '>', '!', ':'])
        .take()
        .map(Token::Operator)
        .parse_next(input)
}

/// Parse whitespace (spaces, tabs, etc. but not newlines)
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Parse newline
fn newline<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Skip the byte order mark Go allows at the very start of a file.
fn byte_order_mark<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    opt('\u{feff}').void().parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<'a, PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    // `alt` takes at most nine alternatives, so delimited tokens are grouped
    let delimited = alt((
        line_comment,       // Must come before operator '/'
        block_comment,      // Must come before operator '/'
        string_literal,     // Must come before any single char
        raw_string_literal, // Must come before any single char
        rune_literal,       // Must come before any single char
    ));
    let token = alt((
        delimited,
        multi_char_operator, // Must come before '.' and '<'
        keyword,             // Must come before identifier
        number,              // Must come before '.'
        identifier,          // Must come before single chars
        single_char_token,   // Single character tokens
        operator,            // Skipped operator characters
        newline,             // Must come before whitespace
        whitespace,          // General whitespace
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        if let Err(e) = byte_order_mark(&mut input) {
            self.diagnostics.emit(Self::convert_err_mode(e, 0));
        }
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => {
                    self.tokens.push(token);
                }
                Err(e) => {
                    // Get position before recovery
                    let error_pos = input.current_token_start();

                    let diagnostic = Self::convert_err_mode(e, error_pos);
                    self.diagnostics.emit(diagnostic);

                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    /// Finish lexing and return tokens or collected errors.
    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish(self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Extracts `LexerDiagnostic` from the error context for rich error info
    /// with code, message, and help. Falls back to E002 (unexpected character)
    /// if no diagnostic context is found.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        // Fallback when no context is present
        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::from_code(ErrorCode::E002).with_label(span, "cannot start a token")
    }
}

/// Parse tokens from a string input, collecting multiple errors.
///
/// Attempts to recover from errors and continue tokenizing, collecting
/// all errors encountered in the file.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens successfully parsed
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    lexer.finish()
}
