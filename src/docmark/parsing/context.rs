//! Per-parse session state

use std::sync::Arc;

use crate::docmark::ast::diagnostics::MessageLog;
use crate::docmark::ast::elements::comment::DocComment;
use crate::docmark::lexing::tokens::Token;
use crate::docmark::span::TextRange;

/// Everything one parse call produced: the extracted lines, the token list,
/// the comment tree, and the message log. Created fresh per input and never
/// reused or mutated afterwards.
#[derive(Debug)]
pub struct ParserContext {
    source_range: TextRange,
    comment_range: TextRange,
    lines: Vec<TextRange>,
    tokens: Arc<[Token]>,
    comment: DocComment,
    log: MessageLog,
}

impl ParserContext {
    pub(crate) fn new(
        source_range: TextRange,
        comment_range: TextRange,
        lines: Vec<TextRange>,
        tokens: Arc<[Token]>,
        comment: DocComment,
        log: MessageLog,
    ) -> Self {
        Self {
            source_range,
            comment_range,
            lines,
            tokens,
            comment,
            log,
        }
    }

    /// The context for an input that was not a `/** ... */` comment at all:
    /// no lines, no tokens, an empty comment, and exactly one fatal message.
    pub(crate) fn structural_failure(source_range: TextRange, log: MessageLog) -> Self {
        let comment_range = source_range.sub_range(source_range.pos(), source_range.pos());
        Self {
            source_range,
            comment_range,
            lines: Vec::new(),
            tokens: Vec::new().into(),
            comment: DocComment::empty(),
            log,
        }
    }

    /// The input range the parse was invoked on.
    pub fn source_range(&self) -> &TextRange {
        &self.source_range
    }

    /// The precise range of the delimited comment (`/**` through `*/`).
    pub fn comment_range(&self) -> &TextRange {
        &self.comment_range
    }

    /// The extracted content-line ranges.
    pub fn lines(&self) -> &[TextRange] {
        &self.lines
    }

    /// The full token list.
    pub fn tokens(&self) -> &Arc<[Token]> {
        &self.tokens
    }

    /// The root of the parsed comment tree.
    pub fn comment(&self) -> &DocComment {
        &self.comment
    }

    /// The diagnostics collected during the parse.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }
}
