//! Comment-line extraction
//!
//! A single-pass character state machine that strips the comment delimiters
//! (`/**`, the leading `*` of each line plus one optional space, and `*/`)
//! from a candidate comment and yields the content-line ranges.
//!
//! Rules the states encode:
//! - the first line immediately following `/**` is collected even if it has no
//!   leading `*`, but an entirely blank first line is discarded so that it
//!   cannot produce a spurious empty paragraph;
//! - every other blank line is emitted as a zero-length range, because blank
//!   lines delimit paragraphs;
//! - a line missing its expected `*` still has its content collected, starting
//!   where the line began;
//! - trailing whitespace of a line is left outside the emitted range.

use std::fmt;

use crate::docmark::span::TextRange;

/// Result of a successful extraction: the precise range of the delimited
/// comment, and the content-line ranges with delimiters stripped.
#[derive(Debug, Clone)]
pub struct ExtractedComment {
    pub comment_range: TextRange,
    pub lines: Vec<TextRange>,
}

/// Structural failures: the input is not a `/** ... */` comment at all.
///
/// These are reported through the message log by the caller, never raised to
/// the user of the parser.
#[derive(Debug, Clone)]
pub enum ExtractError {
    /// Non-whitespace input appeared before `/**`, or no `/**` was found.
    MissingOpeningDelimiter { range: TextRange },
    /// End of input was reached before the closing `*/`.
    MissingClosingDelimiter { range: TextRange },
}

impl ExtractError {
    /// Stable diagnostic code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::MissingOpeningDelimiter { .. } => "docmark-comment-not-found",
            ExtractError::MissingClosingDelimiter { .. } => {
                "docmark-comment-missing-closing-delimiter"
            }
        }
    }

    /// The source range the failure should be reported against.
    pub fn range(&self) -> &TextRange {
        match self {
            ExtractError::MissingOpeningDelimiter { range } => range,
            ExtractError::MissingClosingDelimiter { range } => range,
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingOpeningDelimiter { .. } => {
                write!(f, "Expecting a \"/**\" comment")
            }
            ExtractError::MissingClosingDelimiter { .. } => {
                write!(f, "The comment is missing its closing \"*/\" delimiter")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeginComment1,
    BeginComment2,
    CollectingFirstLine,
    CollectingLine,
    AdvancingLine,
    Done,
}

/// Strip comment delimiters from `source` and return the content-line ranges.
pub fn extract_lines(source: &TextRange) -> Result<ExtractedComment, ExtractError> {
    let buffer = source.buffer();
    let chars: Vec<(usize, char)> = buffer[source.pos()..source.end()]
        .char_indices()
        .map(|(offset, ch)| (offset + source.pos(), ch))
        .collect();

    // Byte offset just past character `index`.
    let after = |index: usize| -> usize {
        chars
            .get(index + 1)
            .map(|&(offset, _)| offset)
            .unwrap_or(source.end())
    };

    let mut state = State::BeginComment1;
    let mut lines: Vec<TextRange> = Vec::new();
    let mut comment_start = source.pos();
    let mut comment_end = source.pos();
    let mut collect_start = source.pos();
    let mut collect_end = source.pos();
    let mut line_start = source.pos();

    let mut i = 0;
    while state != State::Done && i < chars.len() {
        let (offset, ch) = chars[i];
        let next_char = chars.get(i + 1).map(|&(_, c)| c);

        match state {
            State::BeginComment1 => {
                if ch == '/' && next_char == Some('*') {
                    comment_start = offset;
                    i += 1;
                    state = State::BeginComment2;
                } else if !ch.is_whitespace() {
                    return Err(ExtractError::MissingOpeningDelimiter {
                        range: source.sub_range(offset, after(i)),
                    });
                }
            }
            State::BeginComment2 => {
                if ch != '*' {
                    return Err(ExtractError::MissingOpeningDelimiter {
                        range: source.sub_range(offset, after(i)),
                    });
                }
                // One space immediately after "/**" is part of the delimiter.
                if next_char == Some(' ') {
                    i += 1;
                }
                collect_start = after(i);
                collect_end = collect_start;
                state = State::CollectingFirstLine;
            }
            State::CollectingFirstLine | State::CollectingLine => {
                if ch == '\n' || ch == '\r' {
                    let blank_first_line =
                        state == State::CollectingFirstLine && collect_end == collect_start;
                    if !blank_first_line {
                        lines.push(source.sub_range(collect_start, collect_end));
                    }
                    if ch == '\r' && next_char == Some('\n') {
                        i += 1;
                    }
                    line_start = after(i);
                    state = State::AdvancingLine;
                } else if ch == '*' && next_char == Some('/') {
                    let blank_first_line =
                        state == State::CollectingFirstLine && collect_end == collect_start;
                    if !blank_first_line {
                        lines.push(source.sub_range(collect_start, collect_end));
                    }
                    comment_end = offset + 2;
                    i += 1;
                    state = State::Done;
                } else if !ch.is_whitespace() {
                    collect_end = after(i);
                }
            }
            State::AdvancingLine => {
                if ch == '*' {
                    if next_char == Some('/') {
                        comment_end = offset + 2;
                        i += 1;
                        state = State::Done;
                    } else {
                        // One space after the line's "*" is part of the delimiter.
                        if next_char == Some(' ') {
                            i += 1;
                        }
                        collect_start = after(i);
                        collect_end = collect_start;
                        state = State::CollectingLine;
                    }
                } else if ch == '\n' || ch == '\r' {
                    // A line with no "*" and no content: meaningful blank line.
                    lines.push(source.sub_range(offset, offset));
                    if ch == '\r' && next_char == Some('\n') {
                        i += 1;
                    }
                    line_start = after(i);
                } else if !ch.is_whitespace() {
                    // Missing the expected "*": collect from where the line began.
                    collect_start = line_start;
                    collect_end = after(i);
                    state = State::CollectingLine;
                }
            }
            State::Done => unreachable!(),
        }
        i += 1;
    }

    if state != State::Done {
        return Err(ExtractError::MissingClosingDelimiter {
            range: source.clone(),
        });
    }

    Ok(ExtractedComment {
        comment_range: source.sub_range(comment_start, comment_end),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Result<ExtractedComment, ExtractError> {
        extract_lines(&TextRange::from_string(text))
    }

    fn line_texts(extracted: &ExtractedComment) -> Vec<String> {
        extracted
            .lines
            .iter()
            .map(|line| line.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_simple_comment() {
        let extracted = extract("/**\n * Hello world.\n */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["Hello world."]);
        assert_eq!(extracted.comment_range.as_str(), "/**\n * Hello world.\n */");
    }

    #[test]
    fn test_single_line_comment() {
        let extracted = extract("/** Hello */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["Hello"]);
    }

    #[test]
    fn test_blank_first_line_is_discarded() {
        let extracted = extract("/**\n * content\n */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["content"]);
    }

    #[test]
    fn test_interior_blank_lines_are_kept() {
        let extracted = extract("/**\n * a\n *\n * b\n */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["a", "", "b"]);
    }

    #[test]
    fn test_blank_line_without_star_is_kept() {
        let extracted = extract("/**\n * a\n\n * b\n */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["a", "", "b"]);
    }

    #[test]
    fn test_line_missing_star_collects_from_line_start() {
        let extracted = extract("/**\n * a\n   stray\n */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["a", "   stray"]);
    }

    #[test]
    fn test_only_one_space_after_star_is_stripped() {
        let extracted = extract("/**\n *   indented\n */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["  indented"]);
    }

    #[test]
    fn test_trailing_whitespace_is_excluded() {
        let extracted = extract("/**\n * a   \n */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["a"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let extracted = extract("/**\r\n * a\r\n * b\r\n */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["a", "b"]);
    }

    #[test]
    fn test_leading_whitespace_before_comment_is_allowed() {
        let extracted = extract("  \n /** Hi */").unwrap();
        assert_eq!(line_texts(&extracted), vec!["Hi"]);
        assert_eq!(extracted.comment_range.as_str(), "/** Hi */");
    }

    #[test]
    fn test_missing_opening_delimiter() {
        let err = extract("not a comment").unwrap_err();
        assert!(matches!(err, ExtractError::MissingOpeningDelimiter { .. }));
        assert_eq!(err.code(), "docmark-comment-not-found");
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let err = extract("/** unterminated").unwrap_err();
        assert!(matches!(err, ExtractError::MissingClosingDelimiter { .. }));
        assert_eq!(err.code(), "docmark-comment-missing-closing-delimiter");
    }

    #[test]
    fn test_empty_comment() {
        let extracted = extract("/** */").unwrap();
        assert!(extracted.lines.is_empty());
    }
}
