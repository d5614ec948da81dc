use docmark_parser::docmark::ast::nodes::DocNode;
use docmark_parser::docmark::parsing::parse_comment;
use docmark_parser::docmark::testing::{assert_no_messages, assert_token_coverage};

fn summary_nodes(context: &docmark_parser::docmark::parsing::ParserContext) -> Vec<DocNode> {
    let summary = context.comment().summary_section();
    let paragraph = summary.paragraphs().next().expect("a paragraph");
    paragraph.children().to_vec()
}

#[test]
fn paired_start_and_end_tags() {
    let context = parse_comment("/**\n * <b>bold</b>\n */");
    let nodes = summary_nodes(&context);

    match &nodes[0] {
        DocNode::HtmlStartTag(tag) => {
            assert_eq!(tag.name(), "b");
            assert!(!tag.is_self_closing());
            assert!(tag.attributes().is_empty());
        }
        other => panic!("expected a start tag, got {:?}", other.kind()),
    }
    match &nodes[1] {
        DocNode::PlainText(text) => assert_eq!(text.text(), "bold"),
        other => panic!("expected plain text, got {:?}", other.kind()),
    }
    match &nodes[2] {
        DocNode::HtmlEndTag(tag) => assert_eq!(tag.name(), "b"),
        other => panic!("expected an end tag, got {:?}", other.kind()),
    }
    assert_no_messages(&context);
    assert_token_coverage(&context);
}

#[test]
fn self_closing_tag_with_attribute() {
    let context = parse_comment("/**\n * <img src=\"x.png\" />\n */");
    let nodes = summary_nodes(&context);

    match &nodes[0] {
        DocNode::HtmlStartTag(tag) => {
            assert_eq!(tag.name(), "img");
            assert!(tag.is_self_closing());
            assert_eq!(tag.attributes().len(), 1);
            assert_eq!(tag.attributes()[0].name(), "src");
            assert_eq!(tag.attributes()[0].value(), "x.png");
        }
        other => panic!("expected a start tag, got {:?}", other.kind()),
    }
    assert_no_messages(&context);
    assert_token_coverage(&context);
}

#[test]
fn single_quoted_attribute_value() {
    let context = parse_comment("/**\n * <a href='target'>x</a>\n */");
    let nodes = summary_nodes(&context);
    match &nodes[0] {
        DocNode::HtmlStartTag(tag) => {
            assert_eq!(tag.attributes()[0].value(), "target");
        }
        other => panic!("expected a start tag, got {:?}", other.kind()),
    }
    assert_no_messages(&context);
}

#[test]
fn hyphenated_names_are_allowed() {
    let context = parse_comment("/**\n * <my-element></my-element>\n */");
    let nodes = summary_nodes(&context);
    match &nodes[0] {
        DocNode::HtmlStartTag(tag) => assert_eq!(tag.name(), "my-element"),
        other => panic!("expected a start tag, got {:?}", other.kind()),
    }
    assert_no_messages(&context);
}

#[test]
fn unterminated_tag_is_recovered_with_a_message() {
    let context = parse_comment("/**\n * <tag\n */");

    let nodes = summary_nodes(&context);
    assert!(nodes
        .iter()
        .any(|node| matches!(node, DocNode::ErrorText(_))));

    assert_eq!(context.log().len(), 1);
    let message = &context.log().messages()[0];
    assert_eq!(message.code(), "docmark-html-tag-missing-greater-than");
    assert!(message.text().contains("invalid syntax"));
    assert_token_coverage(&context);
}

#[test]
fn attribute_missing_equals_is_recovered() {
    let context = parse_comment("/**\n * <a href>\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-html-tag-missing-equals"
    );
    assert_token_coverage(&context);
}

#[test]
fn string_missing_closing_quote_is_recovered() {
    let context = parse_comment("/**\n * <a x=\"abc>\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-html-string-missing-quote"
    );
}

#[test]
fn bare_less_than_is_recovered() {
    let context = parse_comment("/**\n * a < b\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-malformed-html-name"
    );
    assert_token_coverage(&context);
}
