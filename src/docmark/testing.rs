//! Test support utilities
//!
//! Shared assertion helpers used by the integration test suites. The central
//! one is [`assert_token_coverage`], which checks the invariant the whole
//! data model exists for: every non-virtual token of a parsed comment is
//! covered by exactly one leaf excerpt.

use crate::docmark::ast::nodes::{reconstruct, DocNodeRef};
use crate::docmark::lexing::TokenKind;
use crate::docmark::parsing::ParserContext;

/// The stripped comment-body text: the concatenation of the extracted
/// content-line ranges. This is what excerpt-based reconstruction targets
/// (newlines are virtual, zero-width tokens).
pub fn stripped_body_text(context: &ParserContext) -> String {
    context.lines().iter().map(|line| line.as_str()).collect()
}

/// Reconstruct the comment body from the tree's leaf excerpts.
pub fn reconstructed_body(context: &ParserContext) -> String {
    reconstruct(DocNodeRef::Comment(context.comment()))
}

/// Assert the parse produced no diagnostics.
pub fn assert_no_messages(context: &ParserContext) {
    assert!(
        context.log().is_empty(),
        "expected no parser messages, got: {:?}",
        context.log()
    );
}

/// Assert that every non-virtual token is covered by exactly one leaf
/// excerpt (content or trailing spacing), and no virtual token by more than
/// one. Blank-line soft breaks discarded by the paragraph splitter are the
/// only tokens allowed to go uncovered, and they are zero-width.
pub fn assert_token_coverage(context: &ParserContext) {
    let mut counts = vec![0usize; context.tokens().len()];
    count_coverage(DocNodeRef::Comment(context.comment()), &mut counts);

    for (index, token) in context.tokens().iter().enumerate() {
        match token.kind() {
            TokenKind::EndOfInput => assert_eq!(
                counts[index], 0,
                "end-of-input token should not be covered by any excerpt"
            ),
            TokenKind::Newline => assert!(
                counts[index] <= 1,
                "newline token {} covered {} times",
                index,
                counts[index]
            ),
            _ => assert_eq!(
                counts[index], 1,
                "token {} ({:?} {:?}) covered {} times",
                index,
                token.kind(),
                token.text(),
                counts[index]
            ),
        }
    }
}

fn count_coverage(node: DocNodeRef<'_>, counts: &mut [usize]) {
    if let Some(excerpt) = node.excerpt() {
        let content = excerpt.content();
        for index in content.start_index()..content.end_index() {
            counts[index] += 1;
        }
        if let Some(spacing) = excerpt.spacing_after() {
            for index in spacing.start_index()..spacing.end_index() {
                counts[index] += 1;
            }
        }
    }
    for child in node.children() {
        count_coverage(child, counts);
    }
}
