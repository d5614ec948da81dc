//! Token sequences and excerpts
//!
//! A [`TokenSequence`] is a lightweight index-range view over the shared token
//! array of a parse session; it never copies tokens. Every leaf node of the
//! syntax tree carries an [`Excerpt`]: the token sequence of its semantic
//! content, plus an optional trailing-whitespace sequence that belongs to the
//! node's source span without being part of its meaning. Together these are
//! what make byte-exact reconstruction of the comment body possible.

use std::fmt;
use std::sync::Arc;

use crate::docmark::lexing::tokens::Token;
use crate::docmark::span::TextRange;

/// An index-range view over a shared token array.
#[derive(Clone)]
pub struct TokenSequence {
    tokens: Arc<[Token]>,
    start: usize,
    end: usize,
}

impl TokenSequence {
    /// Create a sequence over `[start, end)` of a token array.
    pub fn new(tokens: Arc<[Token]>, start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= tokens.len(),
            "TokenSequence bounds out of order: start={} end={} len={}",
            start,
            end,
            tokens.len()
        );
        Self { tokens, start, end }
    }

    /// A zero-length sequence positioned at `index`.
    pub fn empty_at(tokens: Arc<[Token]>, index: usize) -> Self {
        Self::new(tokens, index, index)
    }

    /// The tokens this sequence covers.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens[self.start..self.end]
    }

    /// The shared token array this sequence indexes into.
    pub fn token_array(&self) -> &Arc<[Token]> {
        &self.tokens
    }

    pub fn start_index(&self) -> usize {
        self.start
    }

    pub fn end_index(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// A new sequence over the same token array with different bounds.
    pub fn sub_sequence(&self, start: usize, end: usize) -> TokenSequence {
        TokenSequence::new(Arc::clone(&self.tokens), start, end)
    }

    /// Concatenated source text of the covered tokens.
    ///
    /// Virtual tokens (newlines, end of input) contribute nothing.
    pub fn to_text(&self) -> String {
        self.tokens().iter().map(|token| token.text()).collect()
    }

    /// The source range from the first token's start to the last token's end.
    ///
    /// Empty sequences yield an empty range.
    pub fn containing_range(&self) -> TextRange {
        if self.is_empty() {
            return TextRange::empty();
        }
        let first = &self.tokens[self.start];
        let last = &self.tokens[self.end - 1];
        first.range().sub_range(first.range().pos(), last.range().end())
    }
}

impl PartialEq for TokenSequence {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tokens, &other.tokens) && self.start == other.start && self.end == other.end
    }
}

impl fmt::Debug for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenSequence({}..{} {:?})",
            self.start,
            self.end,
            self.to_text()
        )
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// The source span of one leaf node: semantic content plus any trailing
/// spacing that is part of the node's span but not of its meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Excerpt {
    content: TokenSequence,
    spacing_after: Option<TokenSequence>,
}

impl Excerpt {
    pub fn new(content: TokenSequence, spacing_after: Option<TokenSequence>) -> Self {
        Self {
            content,
            spacing_after,
        }
    }

    pub fn from_content(content: TokenSequence) -> Self {
        Self::new(content, None)
    }

    pub fn content(&self) -> &TokenSequence {
        &self.content
    }

    pub fn spacing_after(&self) -> Option<&TokenSequence> {
        self.spacing_after.as_ref().filter(|seq| !seq.is_empty())
    }

    /// Attach trailing spacing after construction.
    ///
    /// An excerpt's spacing may be updated exactly once, and only while the
    /// tree is being built; attaching twice is a programming error.
    pub fn set_spacing_after(&mut self, spacing: TokenSequence) {
        assert!(
            self.spacing_after.is_none(),
            "excerpt spacing may only be attached once"
        );
        self.spacing_after = Some(spacing);
    }

    /// The semantic content text (excluding trailing spacing).
    pub fn text(&self) -> String {
        self.content.to_text()
    }
}
