//! Backtracking token cursor
//!
//! The [`TokenReader`] is the backbone of the recursive-descent parser: a
//! cursor over the shared token array supporting bounded lookahead (up to
//! three tokens), O(1) mark/backtrack, and extraction of the "accumulated
//! sequence" (the span of tokens read since the last extraction). A reader can
//! be scoped to a sub-sequence of the array, which is how inline-tag content
//! is re-parsed in isolation without copying tokens.
//!
//! Misuse of the cursor (reading past the end of input, backtracking forward,
//! extracting an empty accumulated sequence) indicates a bug in the parser
//! itself rather than malformed user input, and panics.

use std::sync::Arc;

use crate::docmark::lexing::sequence::TokenSequence;
use crate::docmark::lexing::tokens::{Token, TokenKind};

/// A saved cursor position for backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker(pub(crate) usize);

/// A stateful cursor over a token array (or a scoped sub-sequence of one).
pub struct TokenReader {
    tokens: Arc<[Token]>,
    start_index: usize,
    end_index: usize,
    current_index: usize,
    accumulated_start: usize,
}

impl TokenReader {
    /// A reader over an entire token array.
    pub fn new(tokens: Arc<[Token]>) -> Self {
        let end_index = tokens.len();
        Self {
            tokens,
            start_index: 0,
            end_index,
            current_index: 0,
            accumulated_start: 0,
        }
    }

    /// A reader scoped to a sub-sequence of the shared token array.
    ///
    /// Used to re-parse embedded content (for example the interior of an
    /// inline tag); peeking past the scope's end always yields `EndOfInput`.
    pub fn for_sequence(sequence: &TokenSequence) -> Self {
        Self {
            tokens: Arc::clone(sequence.token_array()),
            start_index: sequence.start_index(),
            end_index: sequence.end_index(),
            current_index: sequence.start_index(),
            accumulated_start: sequence.start_index(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The first token index of this reader's scope.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// The shared token array this reader walks.
    pub fn token_array(&self) -> &Arc<[Token]> {
        &self.tokens
    }

    fn token_at(&self, index: usize) -> Option<&Token> {
        if index < self.end_index {
            Some(&self.tokens[index])
        } else {
            None
        }
    }

    /// The kind of the current token, without consuming it.
    pub fn peek_kind(&self) -> TokenKind {
        self.peek_kind_at(0)
    }

    /// The kind one token ahead of the current token.
    pub fn peek_kind_after(&self) -> TokenKind {
        self.peek_kind_at(1)
    }

    /// The kind two tokens ahead of the current token.
    pub fn peek_kind_after_after(&self) -> TokenKind {
        self.peek_kind_at(2)
    }

    fn peek_kind_at(&self, ahead: usize) -> TokenKind {
        self.token_at(self.current_index + ahead)
            .map(|token| token.kind())
            .unwrap_or(TokenKind::EndOfInput)
    }

    /// The current token itself, without consuming it.
    ///
    /// Panics past the end of the reader's scope; check `peek_kind` first.
    pub fn peek_token(&self) -> &Token {
        self.token_at(self.current_index)
            .expect("peek_token called past the end of the reader scope")
    }

    /// Consume and return the current token.
    ///
    /// Calling this at `EndOfInput` is a parser bug and panics.
    pub fn read_token(&mut self) -> Token {
        match self.token_at(self.current_index) {
            Some(token) if token.kind() != TokenKind::EndOfInput => {
                let token = token.clone();
                self.current_index += 1;
                token
            }
            _ => panic!("read_token called at end of input"),
        }
    }

    /// Save the current position for a later backtrack.
    pub fn mark(&self) -> Marker {
        Marker(self.current_index)
    }

    /// Rewind to a previously created marker.
    ///
    /// Backtracking to before the accumulation start also rewinds the
    /// accumulation start, so a re-attempted parse cannot leak a stale
    /// accumulated span. Backtracking forward is a parser bug and panics.
    pub fn backtrack_to(&mut self, marker: Marker) {
        assert!(
            marker.0 <= self.current_index,
            "cannot backtrack forward: marker={} current={}",
            marker.0,
            self.current_index
        );
        assert!(
            marker.0 >= self.start_index,
            "marker {} precedes the reader scope start {}",
            marker.0,
            self.start_index
        );
        self.current_index = marker.0;
        if marker.0 < self.accumulated_start {
            self.accumulated_start = marker.0;
        }
    }

    /// The tokens read since the last extraction, resetting the accumulation.
    ///
    /// Returns `None` if nothing was accumulated.
    pub fn try_extract_accumulated(&mut self) -> Option<TokenSequence> {
        if self.accumulated_start == self.current_index {
            return None;
        }
        let sequence = TokenSequence::new(
            Arc::clone(&self.tokens),
            self.accumulated_start,
            self.current_index,
        );
        self.accumulated_start = self.current_index;
        Some(sequence)
    }

    /// Like `try_extract_accumulated`, but an empty accumulation is a parser
    /// bug and panics.
    pub fn extract_accumulated(&mut self) -> TokenSequence {
        self.try_extract_accumulated()
            .expect("extract_accumulated called with no accumulated tokens")
    }

    /// Pre-condition check used at the start of sub-parsers: no unconsumed
    /// tokens may leak between grammar rules.
    pub fn assert_accumulated_is_empty(&self) {
        assert!(
            self.accumulated_start == self.current_index,
            "accumulated sequence is not empty: {}..{}",
            self.accumulated_start,
            self.current_index
        );
    }

    /// A sequence over the span between two markers.
    pub fn sequence_between(&self, start: Marker, end: Marker) -> TokenSequence {
        TokenSequence::new(Arc::clone(&self.tokens), start.0, end.0)
    }

    /// A zero-length sequence at the current position.
    pub fn empty_sequence_here(&self) -> TokenSequence {
        TokenSequence::empty_at(Arc::clone(&self.tokens), self.current_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docmark::lexing::tokenizer::tokenize_lines;
    use crate::docmark::span::TextRange;

    fn reader_for(text: &str) -> TokenReader {
        let line = TextRange::from_string(text);
        TokenReader::new(tokenize_lines(&[line]).into())
    }

    #[test]
    fn test_peek_does_not_consume() {
        let reader = reader_for("ab cd");
        assert_eq!(reader.peek_kind(), TokenKind::AsciiWord);
        assert_eq!(reader.peek_kind_after(), TokenKind::Spacing);
        assert_eq!(reader.peek_kind_after_after(), TokenKind::AsciiWord);
        assert_eq!(reader.current_index(), 0);
    }

    #[test]
    fn test_peek_past_end_yields_end_of_input() {
        let mut reader = reader_for("a");
        let _ = reader.read_token();
        let _ = reader.read_token(); // newline
        assert_eq!(reader.peek_kind(), TokenKind::EndOfInput);
        assert_eq!(reader.peek_kind_after(), TokenKind::EndOfInput);
    }

    #[test]
    fn test_read_token_advances() {
        let mut reader = reader_for("ab cd");
        assert_eq!(reader.read_token().text(), "ab");
        assert_eq!(reader.read_token().text(), " ");
        assert_eq!(reader.read_token().text(), "cd");
    }

    #[test]
    #[should_panic(expected = "read_token called at end of input")]
    fn test_read_past_end_panics() {
        let mut reader = reader_for("");
        let _ = reader.read_token(); // the lone newline
        let _ = reader.read_token(); // end of input: programming error
    }

    #[test]
    fn test_backtrack_rewinds() {
        let mut reader = reader_for("ab cd");
        let marker = reader.mark();
        let _ = reader.read_token();
        let _ = reader.read_token();
        reader.backtrack_to(marker);
        assert_eq!(reader.read_token().text(), "ab");
    }

    #[test]
    #[should_panic(expected = "cannot backtrack forward")]
    fn test_backtrack_forward_panics() {
        let mut reader = reader_for("ab cd");
        let _ = reader.read_token();
        let ahead = reader.mark();
        reader.backtrack_to(Marker(0));
        reader.backtrack_to(ahead);
    }

    #[test]
    fn test_extract_accumulated() {
        let mut reader = reader_for("ab cd");
        let _ = reader.read_token();
        let _ = reader.read_token();
        let sequence = reader.extract_accumulated();
        assert_eq!(sequence.to_text(), "ab ");
        reader.assert_accumulated_is_empty();
    }

    #[test]
    fn test_try_extract_empty_returns_none() {
        let mut reader = reader_for("ab");
        assert!(reader.try_extract_accumulated().is_none());
    }

    #[test]
    #[should_panic(expected = "no accumulated tokens")]
    fn test_extract_empty_panics() {
        let mut reader = reader_for("ab");
        let _ = reader.extract_accumulated();
    }

    #[test]
    fn test_backtrack_rewinds_accumulation() {
        let mut reader = reader_for("ab cd ef");
        let _ = reader.read_token();
        let _ = reader.extract_accumulated();
        let marker = Marker(0);
        let _ = reader.read_token();
        reader.backtrack_to(marker);
        // The accumulation start was rewound along with the cursor.
        let _ = reader.read_token();
        assert_eq!(reader.extract_accumulated().to_text(), "ab");
    }

    #[test]
    fn test_scoped_reader() {
        let line = TextRange::from_string("ab cd ef");
        let tokens: Arc<[Token]> = tokenize_lines(&[line]).into();
        let sequence = TokenSequence::new(Arc::clone(&tokens), 2, 3);
        let mut reader = TokenReader::for_sequence(&sequence);
        assert_eq!(reader.peek_kind(), TokenKind::AsciiWord);
        assert_eq!(reader.read_token().text(), "cd");
        assert_eq!(reader.peek_kind(), TokenKind::EndOfInput);
    }
}
