//! Parsing stages and public entry points
//!
//! [`DocParser`] drives the full pipeline: line extraction, tokenization, the
//! recursive-descent node parse, the paragraph-splitting post pass, and the
//! final validation checks. Each call produces a fresh [`ParserContext`];
//! contexts are never reused, so parsing independent inputs concurrently just
//! means giving each call its own context.

pub mod context;
pub mod html;
pub mod node_parser;
pub mod paragraphs;
pub mod reference;

use std::sync::Arc;

use crate::docmark::ast::diagnostics::{MessageLog, Severity};
use crate::docmark::lexing::extractor::extract_lines;
use crate::docmark::lexing::sequence::TokenSequence;
use crate::docmark::lexing::tokenizer::tokenize_lines;
use crate::docmark::lexing::tokens::Token;
use crate::docmark::span::TextRange;
use crate::docmark::tags::TagRegistry;

pub use context::ParserContext;

/// Parser configuration: the tag lookup plus the two validation switches.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// The tag definitions the parser validates against.
    pub tags: TagRegistry,
    /// When set, tags missing from the registry are not reported.
    pub ignore_undefined_tags: bool,
    /// When set, tags defined but marked unsupported are reported.
    pub report_unsupported_tags: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            tags: TagRegistry::standard(),
            ignore_undefined_tags: false,
            report_unsupported_tags: false,
        }
    }
}

/// A failure bubbling out of an inner sub-grammar (an HTML attribute, a link
/// destination, ...). The enclosing construct turns it into an `ErrorText`
/// node, combining its own context with the inner message and keeping the
/// inner failure location.
#[derive(Debug, Clone)]
pub(crate) struct Failure {
    pub code: &'static str,
    pub message: String,
    pub location: TokenSequence,
}

impl Failure {
    pub fn new(code: &'static str, message: impl Into<String>, location: TokenSequence) -> Self {
        Self {
            code,
            message: message.into(),
            location,
        }
    }
}

/// Read any run of spacing and newline tokens, returning it as a sequence.
///
/// The caller must have extracted everything accumulated so far.
pub(crate) fn try_read_spacing_and_newlines(
    reader: &mut crate::docmark::lexing::TokenReader,
) -> Option<TokenSequence> {
    use crate::docmark::lexing::TokenKind;
    let mut any = false;
    while matches!(reader.peek_kind(), TokenKind::Spacing | TokenKind::Newline) {
        reader.read_token();
        any = true;
    }
    if any {
        Some(reader.extract_accumulated())
    } else {
        None
    }
}

/// A one-token sequence at the reader's current position (empty at end of
/// input), for pinpointing where a sub-grammar failed.
pub(crate) fn location_here(reader: &crate::docmark::lexing::TokenReader) -> TokenSequence {
    use crate::docmark::lexing::{Marker, TokenKind};
    if reader.peek_kind() == TokenKind::EndOfInput {
        reader.empty_sequence_here()
    } else {
        let here = reader.current_index();
        reader.sequence_between(Marker(here), Marker(here + 1))
    }
}

/// Split a sequence into its content and any trailing run of spacing and
/// newline tokens.
pub(crate) fn split_trailing_spacing(
    sequence: &TokenSequence,
) -> (TokenSequence, Option<TokenSequence>) {
    use crate::docmark::lexing::TokenKind;
    let tokens = sequence.tokens();
    let mut split = tokens.len();
    while split > 0
        && matches!(
            tokens[split - 1].kind(),
            TokenKind::Spacing | TokenKind::Newline
        )
    {
        split -= 1;
    }
    let split_index = sequence.start_index() + split;
    let content = sequence.sub_sequence(sequence.start_index(), split_index);
    let spacing = if split_index < sequence.end_index() {
        Some(sequence.sub_sequence(split_index, sequence.end_index()))
    } else {
        None
    };
    (content, spacing)
}

/// The docmark comment parser.
#[derive(Debug, Clone, Default)]
pub struct DocParser {
    options: ParserOptions,
}

impl DocParser {
    /// A parser with the standard tag set and default validation switches.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a string that is exactly one `/** ... */` comment.
    pub fn parse_str(&self, text: &str) -> ParserContext {
        self.parse_range(TextRange::from_string(text))
    }

    /// Parse a comment inside a larger buffer, preserving absolute offsets for
    /// diagnostics.
    pub fn parse_range(&self, source: TextRange) -> ParserContext {
        let mut log = MessageLog::new();

        let extracted = match extract_lines(&source) {
            Ok(extracted) => extracted,
            Err(error) => {
                log.add_for_text_range(
                    error.code(),
                    Severity::Error,
                    error.to_string(),
                    error.range().clone(),
                );
                return ParserContext::structural_failure(source, log);
            }
        };

        let tokens: Arc<[Token]> = tokenize_lines(&extracted.lines).into();
        let mut comment = node_parser::parse_comment_body(Arc::clone(&tokens), &self.options, &mut log);
        paragraphs::split_paragraphs(&mut comment);

        ParserContext::new(
            source,
            extracted.comment_range,
            extracted.lines,
            tokens,
            comment,
            log,
        )
    }
}

/// Parse one comment with the default configuration.
pub fn parse_comment(text: &str) -> ParserContext {
    DocParser::new().parse_str(text)
}
