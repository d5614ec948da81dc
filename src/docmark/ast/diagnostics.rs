//! Structured diagnostics for parse problems
//!
//! The parser never raises syntax problems as errors: it appends
//! [`ParserMessage`]s to an append-only [`MessageLog`] and keeps going. Each
//! message carries a stable code, a severity, the most precise source range
//! available, and (where known) the token sequence and node kind it belongs
//! to. The `"(line,col): text"` rendering is computed eagerly at construction,
//! since line/column conversion costs a buffer scan and messages are read at
//! most a few times.

use std::fmt;

use crate::docmark::ast::elements::text::ErrorText;
use crate::docmark::ast::nodes::DocNodeKind;
use crate::docmark::lexing::sequence::TokenSequence;
use crate::docmark::span::TextRange;

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One diagnostic, immutable once constructed.
#[derive(Debug, Clone)]
pub struct ParserMessage {
    code: &'static str,
    severity: Severity,
    text: String,
    formatted: String,
    range: TextRange,
    token_sequence: Option<TokenSequence>,
    node_kind: Option<DocNodeKind>,
}

impl ParserMessage {
    fn new(
        code: &'static str,
        severity: Severity,
        text: String,
        range: TextRange,
        token_sequence: Option<TokenSequence>,
        node_kind: Option<DocNodeKind>,
    ) -> Self {
        let position = range.location_of(range.pos());
        let formatted = format!("({},{}): {}", position.line, position.column, text);
        Self {
            code,
            severity,
            text,
            formatted,
            range,
            token_sequence,
            node_kind,
        }
    }

    /// Stable diagnostic code, e.g. `docmark-param-tag-missing-hyphen`.
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The message text without location prefix.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The message text prefixed with its `(line,col)` location.
    pub fn formatted_text(&self) -> &str {
        &self.formatted
    }

    pub fn range(&self) -> &TextRange {
        &self.range
    }

    pub fn token_sequence(&self) -> Option<&TokenSequence> {
        self.token_sequence.as_ref()
    }

    /// The kind of node this message is associated with, if any.
    pub fn node_kind(&self) -> Option<DocNodeKind> {
        self.node_kind
    }

    /// A serializable summary for tooling output.
    pub fn summary(&self) -> MessageSummary {
        let position = self.range.location_of(self.range.pos());
        MessageSummary {
            code: self.code.to_string(),
            severity: self.severity,
            line: position.line,
            column: position.column,
            text: self.text.clone(),
        }
    }
}

impl fmt::Display for ParserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.formatted)
    }
}

/// Serializable form of a [`ParserMessage`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MessageSummary {
    pub code: String,
    pub severity: Severity,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

/// Append-only collection of parse diagnostics.
#[derive(Default)]
pub struct MessageLog {
    messages: Vec<ParserMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message associated with a raw source range.
    pub fn add_for_text_range(
        &mut self,
        code: &'static str,
        severity: Severity,
        text: String,
        range: TextRange,
    ) {
        self.messages
            .push(ParserMessage::new(code, severity, text, range, None, None));
    }

    /// Add a message associated with a token sequence (and, when known, the
    /// node kind that owns it).
    pub fn add_for_token_sequence(
        &mut self,
        code: &'static str,
        severity: Severity,
        text: String,
        sequence: &TokenSequence,
        node_kind: Option<DocNodeKind>,
    ) {
        let range = sequence.containing_range();
        self.messages.push(ParserMessage::new(
            code,
            severity,
            text,
            range,
            Some(sequence.clone()),
            node_kind,
        ));
    }

    /// Add the message recorded on an `ErrorText` node.
    ///
    /// The node's own excerpt is preferred over the separately recorded error
    /// location, since the excerpt is the visually obvious span to highlight;
    /// the error location is used only when the excerpt is empty.
    pub fn add_for_error_text(&mut self, node: &ErrorText) {
        let sequence = if node.excerpt().content().is_empty() {
            node.error_location().clone()
        } else {
            node.excerpt().content().clone()
        };
        self.add_for_token_sequence(
            node.code(),
            Severity::Error,
            node.message().to_string(),
            &sequence,
            Some(DocNodeKind::ErrorText),
        );
    }

    pub fn messages(&self) -> &[ParserMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Serializable summaries of every message, in log order.
    pub fn summaries(&self) -> Vec<MessageSummary> {
        self.messages.iter().map(ParserMessage::summary).collect()
    }
}

impl fmt::Debug for MessageLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.messages.iter().map(|m| m.formatted_text()))
            .finish()
    }
}
