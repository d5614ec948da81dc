//! Paragraph splitting post pass
//!
//! The main parse appends all of a section's content into one flat paragraph,
//! because paragraph boundaries are a property of blank-line runs, which are
//! easiest to detect once soft-break placement is final. This pass rewrites
//! each section's paragraphs into one paragraph per blank-line-delimited
//! group:
//!
//! - a "line" is a run of nodes terminated by a soft break, and it is blank
//!   when it contains nothing but soft breaks and whitespace-only plain text;
//! - leading blank lines of a section are discarded entirely;
//! - once content has appeared, blank lines are retained as a trailer attached
//!   to the end of the current paragraph;
//! - a non-blank line after a trailer starts a new paragraph.
//!
//! Running the pass twice is a no-op.

use crate::docmark::ast::elements::comment::DocComment;
use crate::docmark::ast::elements::sections::{Paragraph, Section};
use crate::docmark::ast::nodes::DocNode;

/// Split every section of a comment (summary, tagged blocks, param-block
/// content) into blank-line-delimited paragraphs.
pub fn split_paragraphs(comment: &mut DocComment) {
    split_section(comment.summary_mut());
    for item in comment.items_mut() {
        match item {
            DocNode::Section(section) => split_section(section),
            DocNode::ParamBlock(block) => split_section(block.content_mut()),
            _ => {}
        }
    }
}

/// Split one section's paragraph children; other children are kept as-is.
pub fn split_section(section: &mut Section) {
    let old_children = std::mem::take(section.children_mut());
    let mut new_children = Vec::with_capacity(old_children.len());
    for child in old_children {
        match child {
            DocNode::Paragraph(paragraph) => split_one_paragraph(paragraph, &mut new_children),
            other => new_children.push(other),
        }
    }
    section.replace_children(new_children);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitState {
    Start,
    AwaitingTrailer,
    ReadingTrailer,
}

fn split_one_paragraph(mut paragraph: Paragraph, out: &mut Vec<DocNode>) {
    let mut current = Paragraph::default();
    let mut state = SplitState::Start;

    for run in group_into_line_runs(paragraph.take_children()) {
        let blank = run_is_blank(&run);
        match state {
            SplitState::Start => {
                if !blank {
                    extend(&mut current, run);
                    state = SplitState::AwaitingTrailer;
                }
            }
            SplitState::AwaitingTrailer => {
                extend(&mut current, run);
                if blank {
                    state = SplitState::ReadingTrailer;
                }
            }
            SplitState::ReadingTrailer => {
                if blank {
                    extend(&mut current, run);
                } else {
                    out.push(DocNode::Paragraph(std::mem::take(&mut current)));
                    extend(&mut current, run);
                    state = SplitState::AwaitingTrailer;
                }
            }
        }
    }

    if !current.is_empty() {
        out.push(DocNode::Paragraph(current));
    }
}

/// Group a flat node list into line runs, each terminated by its soft break.
fn group_into_line_runs(nodes: Vec<DocNode>) -> Vec<Vec<DocNode>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for node in nodes {
        let ends_line = matches!(node, DocNode::SoftBreak(_));
        current.push(node);
        if ends_line {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn run_is_blank(run: &[DocNode]) -> bool {
    run.iter().all(|node| match node {
        DocNode::SoftBreak(_) => true,
        DocNode::PlainText(text) => text.is_whitespace(),
        _ => false,
    })
}

fn extend(paragraph: &mut Paragraph, run: Vec<DocNode>) {
    for node in run {
        paragraph.push(node);
    }
}
