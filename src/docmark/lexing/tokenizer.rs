//! Tokenization of extracted comment lines
//!
//! A pure function from content-line ranges to a flat token list. Each line is
//! lexed independently (tokens never cross a line boundary), a zero-width
//! `Newline` token is appended per line, and the list always ends with exactly
//! one zero-width `EndOfInput` sentinel.

use logos::Logos;

use crate::docmark::lexing::tokens::{Token, TokenKind};
use crate::docmark::span::TextRange;

/// Convert content-line ranges into a flat token list.
///
/// The result ends with exactly one `EndOfInput` token, positioned at the end
/// of the last line, or over an empty range if there were no lines at all.
/// Tokenizing the same lines twice yields structurally identical lists.
pub fn tokenize_lines(lines: &[TextRange]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for line in lines {
        let mut lexer = TokenKind::lexer(line.as_str());
        while let Some(result) = lexer.next() {
            // Classification is total, so lexer errors cannot occur; treat any
            // unmatched character defensively as Other rather than panicking.
            let kind = result.unwrap_or(TokenKind::Other);
            let span = lexer.span();
            let range = line.sub_range(line.pos() + span.start, line.pos() + span.end);
            tokens.push(Token::new(kind, range, line.clone()));
        }
        let line_end = line.sub_range(line.end(), line.end());
        tokens.push(Token::new(TokenKind::Newline, line_end, line.clone()));
    }

    let end_range = match lines.last() {
        Some(line) => line.sub_range(line.end(), line.end()),
        None => TextRange::empty(),
    };
    tokens.push(Token::new(TokenKind::EndOfInput, end_range.clone(), end_range));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(text: &str) -> Vec<TextRange> {
        let full = TextRange::from_string(text);
        let mut lines = Vec::new();
        let mut start = 0;
        for (idx, ch) in text.char_indices() {
            if ch == '\n' {
                lines.push(full.sub_range(start, idx));
                start = idx + 1;
            }
        }
        if start <= text.len() {
            lines.push(full.sub_range(start, text.len()));
        }
        lines
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_empty_input_yields_only_end_of_input() {
        let tokens = tokenize_lines(&[]);
        assert_eq!(kinds(&tokens), vec![TokenKind::EndOfInput]);
        assert_eq!(tokens[0].text(), "");
    }

    #[test]
    fn test_single_line() {
        let tokens = tokenize_lines(&lines_of("Hello world."));
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::AsciiWord,
                TokenKind::Spacing,
                TokenKind::AsciiWord,
                TokenKind::Period,
                TokenKind::Newline,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(tokens[0].text(), "Hello");
        assert_eq!(tokens[2].text(), "world");
    }

    #[test]
    fn test_newline_tokens_are_zero_width() {
        let tokens = tokenize_lines(&lines_of("a\nb"));
        let newlines: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind() == TokenKind::Newline)
            .collect();
        assert_eq!(newlines.len(), 2);
        assert!(newlines.iter().all(|t| t.text().is_empty()));
    }

    #[test]
    fn test_every_line_gets_one_newline() {
        let tokens = tokenize_lines(&lines_of("a\n\nb"));
        let count = tokens
            .iter()
            .filter(|t| t.kind() == TokenKind::Newline)
            .count();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_token_ranges_cover_line_text() {
        let lines = lines_of("ab cd");
        let tokens = tokenize_lines(&lines);
        let text: String = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(text, "ab cd");
    }

    #[test]
    fn test_retokenization_is_identical() {
        let lines = lines_of("one `two` @three");
        let first = tokenize_lines(&lines);
        let second = tokenize_lines(&lines);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tokens_carry_source_line() {
        let lines = lines_of("ab\ncd");
        let tokens = tokenize_lines(&lines);
        assert_eq!(tokens[0].line().as_str(), "ab");
        assert_eq!(tokens[2].line().as_str(), "cd");
    }
}
