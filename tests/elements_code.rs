use docmark_parser::docmark::ast::nodes::DocNode;
use docmark_parser::docmark::ast::Severity;
use docmark_parser::docmark::parsing::parse_comment;
use docmark_parser::docmark::testing::{assert_no_messages, assert_token_coverage};

#[test]
fn code_span_in_running_text() {
    let context = parse_comment("/**\n * Call `foo()` now.\n */");
    let summary = context.comment().summary_section();
    let paragraph = summary.paragraphs().next().unwrap();

    let span = paragraph
        .children()
        .iter()
        .find_map(|node| match node {
            DocNode::CodeSpan(span) => Some(span),
            _ => None,
        })
        .expect("a code span");
    assert_eq!(span.code_text(), "foo()");
    assert_no_messages(&context);
    assert_token_coverage(&context);
}

#[test]
fn unterminated_code_span_is_recovered() {
    let context = parse_comment("/**\n * start `abc\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-code-span-missing-delimiter"
    );
    assert_token_coverage(&context);
}

#[test]
fn code_span_cannot_span_lines() {
    let context = parse_comment("/**\n * `abc\n * def`\n */");
    let messages = context.log().messages();
    assert!(messages
        .iter()
        .any(|message| message.code() == "docmark-code-span-missing-delimiter"
            && message.text().contains("newline")));
    assert_token_coverage(&context);
}

#[test]
fn fenced_code_with_language() {
    let context = parse_comment("/**\n * ```ts\n * let x = 1;\n * ```\n */");
    let summary = context.comment().summary_section();

    let fence = summary
        .children()
        .iter()
        .find_map(|node| match node {
            DocNode::FencedCode(fence) => Some(fence),
            _ => None,
        })
        .expect("a fenced code block");
    assert_eq!(fence.language().as_deref(), Some("ts"));
    assert_eq!(fence.code_text(), "let x = 1;\n");
    assert_no_messages(&context);
    assert_token_coverage(&context);
}

#[test]
fn fenced_code_attaches_at_section_level() {
    let context = parse_comment("/**\n * intro\n * ```\n * code\n * ```\n */");
    let summary = context.comment().summary_section();

    let kinds: Vec<_> = summary
        .children()
        .iter()
        .map(|node| node.kind().name())
        .collect();
    assert!(kinds.contains(&"FencedCode"));
    assert!(kinds.contains(&"Paragraph"));
    assert_no_messages(&context);
}

#[test]
fn fence_not_at_line_start_is_rejected_whole() {
    let context = parse_comment("/**\n * text ``` not a fence\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-code-fence-opening-indent"
    );

    // The three backticks were consumed as one error span, so they are not
    // reinterpreted as an inline code span.
    let summary = context.comment().summary_section();
    let paragraph = summary.paragraphs().next().unwrap();
    assert!(paragraph
        .children()
        .iter()
        .any(|node| matches!(node, DocNode::ErrorText(error) if error.text() == "```")));
    assert!(!paragraph
        .children()
        .iter()
        .any(|node| matches!(node, DocNode::CodeSpan(_))));
    assert_token_coverage(&context);
}

#[test]
fn indented_closing_fence_is_a_warning() {
    let context = parse_comment("/**\n * ```\n * code\n *  ```\n */");

    let summary = context.comment().summary_section();
    assert!(summary
        .children()
        .iter()
        .any(|node| matches!(node, DocNode::FencedCode(_))));

    let messages = context.log().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].code(), "docmark-code-fence-closing-indent");
    assert_eq!(messages[0].severity(), Severity::Warning);
    assert_token_coverage(&context);
}

#[test]
fn unterminated_fence_is_recovered() {
    let context = parse_comment("/**\n * ```\n * code\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-code-fence-missing-delimiter"
    );
    assert_token_coverage(&context);
}
