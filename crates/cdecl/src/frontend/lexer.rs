use std::ops::Range;

use logos::Logos;

/// Raw C/C++ token classes.
///
/// The lexer only needs to reproduce token boundaries the way a compiler
/// would spell them back, so punctuators share a single kind.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(error = ())]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f\x0B]+")]
    Whitespace,

    #[regex(r"\\\r?\n")]
    LineContinuation,

    #[regex(r"//.*", allow_greedy = true)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]([0-9a-zA-Z_.']|[eEpP][+-])*")]
    #[regex(r"\.[0-9]([0-9a-zA-Z_.']|[eEpP][+-])*")]
    Number,

    #[regex(r#"(u8|u|U|L)?'([^'\\\n]|\\[\s\S])+'"#)]
    Char,

    #[regex(r#"(u8|u|U|L)?"([^"\\\n]|\\[\s\S])*""#)]
    String,

    #[token("...")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("->*")]
    #[token("->")]
    #[token("++")]
    #[token("--")]
    #[token("<<")]
    #[token(">>")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("&&")]
    #[token("||")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("##")]
    #[token("::")]
    #[token(".*")]
    #[token("#")]
    #[token("(")]
    #[token(")")]
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token(";")]
    #[token(":")]
    #[token(",")]
    #[token(".")]
    #[token("?")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("^")]
    #[token("&")]
    #[token("|")]
    #[token("~")]
    #[token("!")]
    #[token("=")]
    #[token("<")]
    #[token(">")]
    Punct,

    /// Stray character the lexer does not recognize (e.g. `@`).
    Unknown,
}

impl TokenKind {
    /// Whitespace, comments and line continuations never become tokens.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineContinuation | Self::Comment)
    }
}

/// One lexed token with its byte span in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

/// A lexer that wraps `logos::Lexer` and keeps byte spans.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token_result = self.inner.next()?;
        let kind = token_result.unwrap_or(TokenKind::Unknown);
        Some(Token {
            kind,
            text: self.inner.slice(),
            span: self.inner.span(),
        })
    }
}

/// Significant tokens of `input`, spelled as written.
pub fn token_spellings(input: &str) -> Vec<String> {
    Lexer::new(input).filter(|t| !t.kind.is_trivia()).map(|t| t.text.to_string()).collect()
}

#[cfg(test)]
#[path = "../../tests/src/frontend/lexer_tests.rs"]
mod tests;
