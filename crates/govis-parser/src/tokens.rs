//! Token definitions for the Go front end.
//!
//! Only the keywords and punctuation that take part in type expressions get
//! their own variant. Everything else is kept as [`Token::Identifier`] or
//! [`Token::Operator`] so that function bodies and other declarations can be
//! skipped without understanding them.

use std::fmt;

use crate::span::Span;

/// Token types for Go source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    // Keywords
    Package,
    Type,
    Struct,
    Interface,
    Map,
    Chan,
    Func,

    // Literals, kept as written including delimiters
    Identifier(&'src str),
    StringLiteral(&'src str),
    RawStringLiteral(&'src str),
    RuneLiteral(&'src str),
    Number(&'src str),

    // Operators
    Star,     // *
    Dot,      // .
    Ellipsis, // ...
    Arrow,    // <-
    Equals,   // =
    Pipe,     // |
    Tilde,    // ~
    Operator(&'src str),

    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    LeftBrace,    // {
    RightBrace,   // }
    Semicolon,    // ;
    Comma,        // ,

    // Comments
    LineComment(&'src str),  // // comment
    BlockComment(&'src str), // /* comment */

    // Whitespace
    Whitespace,
    Newline,
}

impl Token<'_> {
    /// Returns `true` for tokens that carry no syntax: spaces and comments.
    ///
    /// Newlines are not trivia since they terminate fields and declarations.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::LineComment(_) | Token::BlockComment(_)
        )
    }

    /// Returns `true` if a type expression may start with this token.
    pub fn starts_type(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::Star
                | Token::LeftBracket
                | Token::LeftParen
                | Token::Map
                | Token::Chan
                | Token::Arrow
                | Token::Func
                | Token::Struct
                | Token::Interface
                | Token::Ellipsis
                | Token::Tilde
        )
    }
}

/// A token with position information for winnow integration
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Package => write!(f, "package"),
            Token::Type => write!(f, "type"),
            Token::Struct => write!(f, "struct"),
            Token::Interface => write!(f, "interface"),
            Token::Map => write!(f, "map"),
            Token::Chan => write!(f, "chan"),
            Token::Func => write!(f, "func"),

            Token::Identifier(text)
            | Token::StringLiteral(text)
            | Token::RawStringLiteral(text)
            | Token::RuneLiteral(text)
            | Token::Number(text)
            | Token::Operator(text) => write!(f, "{text}"),

            Token::Star => write!(f, "*"),
            Token::Dot => write!(f, "."),
            Token::Ellipsis => write!(f, "..."),
            Token::Arrow => write!(f, "<-"),
            Token::Equals => write!(f, "="),
            Token::Pipe => write!(f, "|"),
            Token::Tilde => write!(f, "~"),

            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),

            Token::LineComment(comment) => write!(f, "//{comment}"),
            Token::BlockComment(comment) => write!(f, "/*{comment}*/"),
            Token::Whitespace => write!(f, " "),
            Token::Newline => write!(f, "\\n"),
        }
    }
}
