use docmark_parser::docmark::ast::nodes::DocNode;
use docmark_parser::docmark::parsing::{paragraphs, parse_comment};
use docmark_parser::docmark::testing::{assert_no_messages, assert_token_coverage};

#[test]
fn blank_lines_split_paragraphs() {
    let context = parse_comment("/**\n * para one\n *\n * para two\n */");
    let summary = context.comment().summary_section();
    assert_eq!(summary.paragraphs().count(), 2);
    assert_no_messages(&context);
}

#[test]
fn consecutive_blank_lines_become_one_trailer() {
    let context = parse_comment("/**\n * para one\n *\n *\n * para two\n */");
    let summary = context.comment().summary_section();
    let paragraphs: Vec<_> = summary.paragraphs().collect();
    assert_eq!(paragraphs.len(), 2);

    // The blank-line soft breaks belong to the first paragraph's trailer.
    let first_kinds: Vec<_> = paragraphs[0]
        .children()
        .iter()
        .map(|node| node.kind().name())
        .collect();
    assert_eq!(
        first_kinds,
        vec!["PlainText", "SoftBreak", "SoftBreak", "SoftBreak"]
    );

    let second_kinds: Vec<_> = paragraphs[1]
        .children()
        .iter()
        .map(|node| node.kind().name())
        .collect();
    assert_eq!(second_kinds, vec!["PlainText", "SoftBreak"]);
    assert_token_coverage(&context);
}

#[test]
fn leading_blank_lines_are_discarded() {
    let context = parse_comment("/**\n *\n * text\n */");
    let summary = context.comment().summary_section();
    let paragraphs: Vec<_> = summary.paragraphs().collect();
    assert_eq!(paragraphs.len(), 1);
    assert!(matches!(
        paragraphs[0].children()[0],
        DocNode::PlainText(_)
    ));
}

#[test]
fn trailing_blank_lines_stay_attached() {
    let context = parse_comment("/**\n * a\n *\n */");
    let summary = context.comment().summary_section();
    assert_eq!(summary.paragraphs().count(), 1);
}

#[test]
fn block_content_is_split_too() {
    let context = parse_comment("/**\n * @remarks\n * first\n *\n * second\n */");
    let remarks = context.comment().remarks_block().expect("remarks");
    assert_eq!(remarks.paragraphs().count(), 2);
}

#[test]
fn param_content_is_split_too() {
    let context = parse_comment("/**\n * @param x - first\n *\n * second\n */");
    let params = context.comment().params();
    assert_eq!(params[0].content().paragraphs().count(), 2);
}

#[test]
fn splitting_is_idempotent() {
    let context = parse_comment("/**\n * one\n *\n * two\n *\n *\n * three\n */");
    let mut resplit = context.comment().clone();
    paragraphs::split_paragraphs(&mut resplit);
    assert_eq!(&resplit, context.comment());
}
