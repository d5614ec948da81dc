//! Text-level leaf nodes
//!
//! These are the simplest leaves of the tree: runs of plain text, virtual line
//! breaks, escaped characters, recovered error spans, and [`Particle`], the
//! generic leaf used for delimiter and punctuation sub-parts that need their
//! own excerpt without a dedicated node type.

use crate::docmark::lexing::sequence::{Excerpt, TokenSequence};

/// A generic leaf holding an excerpt for a delimiter or other sub-part.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    excerpt: Excerpt,
}

impl Particle {
    pub fn new(excerpt: Excerpt) -> Self {
        Self { excerpt }
    }

    pub fn from_content(content: TokenSequence) -> Self {
        Self::new(Excerpt::from_content(content))
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }

    /// Attach trailing spacing to this particle's excerpt (once).
    pub fn attach_spacing(&mut self, spacing: TokenSequence) {
        self.excerpt.set_spacing_after(spacing);
    }

    /// The particle's semantic content text.
    pub fn text(&self) -> String {
        self.excerpt.text()
    }
}

/// A run of ordinary text within a line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainText {
    excerpt: Excerpt,
}

impl PlainText {
    pub fn new(excerpt: Excerpt) -> Self {
        Self { excerpt }
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }

    pub fn text(&self) -> String {
        self.excerpt.text()
    }

    /// Whether this run is entirely whitespace (relevant to paragraph splitting).
    pub fn is_whitespace(&self) -> bool {
        self.text().chars().all(char::is_whitespace)
    }
}

/// A virtual line break. Its excerpt covers a zero-width newline token.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftBreak {
    excerpt: Excerpt,
}

impl SoftBreak {
    pub fn new(excerpt: Excerpt) -> Self {
        Self { excerpt }
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }
}

/// A backslash escape (`\{`, `\@`, ...). The excerpt covers the backslash and
/// the escaped character; `decoded` is the character the escape stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapedText {
    excerpt: Excerpt,
    decoded: String,
}

impl EscapedText {
    pub fn new(excerpt: Excerpt, decoded: String) -> Self {
        Self { excerpt, decoded }
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }

    /// The escaped source text including the backslash.
    pub fn encoded_text(&self) -> String {
        self.excerpt.text()
    }

    /// The text the escape decodes to.
    pub fn decoded_text(&self) -> &str {
        &self.decoded
    }
}

/// A span of input that violated the grammar locally.
///
/// The parser recovers by wrapping the smallest possible span in an
/// `ErrorText` and continuing; the parse as a whole never fails because of
/// one of these. `error_location` may differ from the node's own excerpt when
/// the problematic token sits further ahead inside a larger malformed
/// construct.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorText {
    excerpt: Excerpt,
    code: &'static str,
    message: String,
    error_location: TokenSequence,
}

impl ErrorText {
    pub fn new(
        excerpt: Excerpt,
        code: &'static str,
        message: String,
        error_location: TokenSequence,
    ) -> Self {
        Self {
            excerpt,
            code,
            message,
            error_location,
        }
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }

    /// Stable diagnostic code of the recorded error.
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the actual problem was detected.
    pub fn error_location(&self) -> &TokenSequence {
        &self.error_location
    }

    pub fn text(&self) -> String {
        self.excerpt.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docmark::lexing::tokenizer::tokenize_lines;
    use crate::docmark::lexing::tokens::Token;
    use crate::docmark::span::TextRange;
    use std::sync::Arc;

    fn token_array(text: &str) -> Arc<[Token]> {
        tokenize_lines(&[TextRange::from_string(text)]).into()
    }

    #[test]
    fn test_plain_text_whitespace_detection() {
        let tokens = token_array("   ");
        let content = TokenSequence::new(Arc::clone(&tokens), 0, 1);
        let node = PlainText::new(Excerpt::from_content(content));
        assert!(node.is_whitespace());

        let tokens = token_array("hi");
        let content = TokenSequence::new(Arc::clone(&tokens), 0, 1);
        let node = PlainText::new(Excerpt::from_content(content));
        assert!(!node.is_whitespace());
    }

    #[test]
    fn test_escaped_text() {
        let tokens = token_array("\\{");
        let content = TokenSequence::new(Arc::clone(&tokens), 0, 2);
        let node = EscapedText::new(Excerpt::from_content(content), "{".to_string());
        assert_eq!(node.encoded_text(), "\\{");
        assert_eq!(node.decoded_text(), "{");
    }

    #[test]
    fn test_error_text_carries_location() {
        let tokens = token_array("}");
        let content = TokenSequence::new(Arc::clone(&tokens), 0, 1);
        let location = content.clone();
        let node = ErrorText::new(
            Excerpt::from_content(content),
            "docmark-escape-right-brace",
            "The \"}\" character should be escaped".to_string(),
            location,
        );
        assert_eq!(node.text(), "}");
        assert_eq!(node.error_location().to_text(), "}");
    }
}
