//! Token definitions for the docmark comment grammar
//!
//! Token kinds are defined with the logos derive macro. Character
//! classification is total: every character of a content line maps to exactly
//! one kind. The multi-character kinds (`Spacing`, `AsciiWord`, `Other`) absorb
//! runs of same-class characters; every punctuation kind is exactly one
//! character. `Newline` and `EndOfInput` are synthetic kinds appended by the
//! tokenizer driver and never produced by the lexer itself.

use logos::Logos;

use crate::docmark::span::TextRange;

/// All possible tokens in a docmark comment body
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TokenKind {
    /// Zero-width sentinel after the last line (synthetic)
    EndOfInput,

    /// Zero-width virtual line terminator (synthetic, one per line).
    /// The pattern never fires in practice because line ranges exclude their
    /// terminators; it exists so a stray newline character still classifies
    /// sensibly.
    #[regex(r"\r\n|\r|\n")]
    Newline,

    /// Run of spaces, tabs, or form feeds
    #[regex(r"[ \t\x0C]+")]
    Spacing,

    /// Run of ASCII letters, digits, and underscores
    #[regex(r"[A-Za-z0-9_]+")]
    AsciiWord,

    #[token("\\")]
    Backslash,

    #[token("<")]
    LessThan,

    #[token(">")]
    GreaterThan,

    #[token("=")]
    Equals,

    #[token("\"")]
    DoubleQuote,

    #[token("/")]
    Slash,

    #[token("-")]
    Hyphen,

    #[token("@")]
    AtSign,

    #[token("{")]
    LeftCurlyBracket,

    #[token("}")]
    RightCurlyBracket,

    #[token("`")]
    Backtick,

    #[token(".")]
    Period,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("[")]
    LeftSquareBracket,

    #[token("]")]
    RightSquareBracket,

    #[token("|")]
    Pipe,

    #[token("(")]
    LeftParenthesis,

    #[token(")")]
    RightParenthesis,

    #[token("#")]
    PoundSymbol,

    #[token("+")]
    Plus,

    /// Any ASCII punctuation without a dedicated kind (`! $ % & ' * ; ? ^ ~`)
    #[regex(r"[!$%&'*;?^~]")]
    OtherPunctuation,

    /// Run of anything else (non-ASCII text, control characters)
    #[regex(r"[^ \t\x0C\r\n0-9A-Za-z\x21-\x2F\x3A-\x40\x5B-\x60\x7B-\x7E]+")]
    Other,
}

impl TokenKind {
    /// Check if this kind is a punctuation character.
    ///
    /// Backslash escapes are only legal before punctuation (the CommonMark
    /// rule), so this classification drives escape validation.
    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            TokenKind::Backslash
                | TokenKind::LessThan
                | TokenKind::GreaterThan
                | TokenKind::Equals
                | TokenKind::DoubleQuote
                | TokenKind::Slash
                | TokenKind::Hyphen
                | TokenKind::AtSign
                | TokenKind::LeftCurlyBracket
                | TokenKind::RightCurlyBracket
                | TokenKind::Backtick
                | TokenKind::Period
                | TokenKind::Colon
                | TokenKind::Comma
                | TokenKind::LeftSquareBracket
                | TokenKind::RightSquareBracket
                | TokenKind::Pipe
                | TokenKind::LeftParenthesis
                | TokenKind::RightParenthesis
                | TokenKind::PoundSymbol
                | TokenKind::Plus
                | TokenKind::OtherPunctuation
        )
    }

    /// Check if this kind is whitespace-like (spacing or a line boundary).
    pub fn is_spacing_or_newline(&self) -> bool {
        matches!(self, TokenKind::Spacing | TokenKind::Newline)
    }
}

/// A single token of a comment body line.
///
/// `range` covers the token's characters; `line` is the content line the token
/// was lexed from. Both point into the same shared buffer as the original
/// source, so no text is copied during tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    range: TextRange,
    line: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, range: TextRange, line: TextRange) -> Self {
        Self { kind, range, line }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn range(&self) -> &TextRange {
        &self.range
    }

    pub fn line(&self) -> &TextRange {
        &self.line
    }

    /// The token's source text. Virtual tokens yield an empty string.
    pub fn text(&self) -> &str {
        self.range.as_str()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of(text: &str) -> Vec<TokenKind> {
        let mut lexer = TokenKind::lexer(text);
        let mut kinds = Vec::new();
        while let Some(result) = lexer.next() {
            kinds.push(result.expect("classification should be total"));
        }
        kinds
    }

    #[test]
    fn test_word_and_spacing_runs_merge() {
        assert_eq!(
            kinds_of("hello  world42"),
            vec![TokenKind::AsciiWord, TokenKind::Spacing, TokenKind::AsciiWord]
        );
    }

    #[test]
    fn test_punctuation_is_single_character() {
        assert_eq!(
            kinds_of("{{"),
            vec![TokenKind::LeftCurlyBracket, TokenKind::LeftCurlyBracket]
        );
        assert_eq!(kinds_of("``"), vec![TokenKind::Backtick, TokenKind::Backtick]);
    }

    #[test]
    fn test_dedicated_punctuation_kinds() {
        assert_eq!(
            kinds_of("@param"),
            vec![TokenKind::AtSign, TokenKind::AsciiWord]
        );
        assert_eq!(
            kinds_of("a.b#c"),
            vec![
                TokenKind::AsciiWord,
                TokenKind::Period,
                TokenKind::AsciiWord,
                TokenKind::PoundSymbol,
                TokenKind::AsciiWord
            ]
        );
    }

    #[test]
    fn test_other_punctuation() {
        assert_eq!(
            kinds_of("a!b"),
            vec![
                TokenKind::AsciiWord,
                TokenKind::OtherPunctuation,
                TokenKind::AsciiWord
            ]
        );
        assert_eq!(kinds_of("$"), vec![TokenKind::OtherPunctuation]);
    }

    #[test]
    fn test_underscore_is_a_word_character() {
        assert_eq!(kinds_of("snake_case_2"), vec![TokenKind::AsciiWord]);
    }

    #[test]
    fn test_non_ascii_merges_into_other() {
        assert_eq!(kinds_of("héllo"), {
            vec![TokenKind::AsciiWord, TokenKind::Other, TokenKind::AsciiWord]
        });
        assert_eq!(kinds_of("日本語"), vec![TokenKind::Other]);
    }

    #[test]
    fn test_is_punctuation() {
        assert!(TokenKind::Backslash.is_punctuation());
        assert!(TokenKind::OtherPunctuation.is_punctuation());
        assert!(TokenKind::Pipe.is_punctuation());
        assert!(!TokenKind::AsciiWord.is_punctuation());
        assert!(!TokenKind::Spacing.is_punctuation());
        assert!(!TokenKind::Newline.is_punctuation());
        assert!(!TokenKind::EndOfInput.is_punctuation());
        assert!(!TokenKind::Other.is_punctuation());
    }
}
