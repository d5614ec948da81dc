use docmark_parser::docmark::ast::nodes::DocNode;
use docmark_parser::docmark::ast::LinkTag;
use docmark_parser::docmark::parsing::parse_comment;
use docmark_parser::docmark::testing::{assert_no_messages, assert_token_coverage};

fn first_link_tag(context: &docmark_parser::docmark::parsing::ParserContext) -> &LinkTag {
    let summary = context.comment().summary_section();
    let paragraph = summary.paragraphs().next().expect("a paragraph");
    paragraph
        .children()
        .iter()
        .find_map(|node| match node {
            DocNode::LinkTag(link) => Some(link),
            _ => None,
        })
        .expect("a link tag")
}

#[test]
fn link_tag_with_member_chain_and_text() {
    let context = parse_comment("/**\n * {@link MyClass.myMethod | the method}\n */");
    let link = first_link_tag(&context);

    assert!(link.url_destination().is_none());
    let destination = link.code_destination().expect("code destination");
    assert_eq!(destination.members().len(), 2);
    assert_eq!(
        destination.members()[0].identifier().unwrap().text(),
        "MyClass"
    );
    assert_eq!(
        destination.members()[1].identifier().unwrap().text(),
        "myMethod"
    );
    assert_eq!(link.link_text().as_deref(), Some("the method"));
    assert_no_messages(&context);
    assert_token_coverage(&context);
}

#[test]
fn link_tag_with_url_destination() {
    let context = parse_comment("/**\n * {@link http://example.com}\n */");
    let link = first_link_tag(&context);

    assert_eq!(link.url_destination().as_deref(), Some("http://example.com"));
    assert!(link.code_destination().is_none());
    assert!(link.link_text().is_none());
    assert_no_messages(&context);
}

#[test]
fn link_tag_with_url_and_text() {
    let context = parse_comment("/**\n * {@link https://example.com/docs | the docs}\n */");
    let link = first_link_tag(&context);
    assert_eq!(
        link.url_destination().as_deref(),
        Some("https://example.com/docs")
    );
    assert_eq!(link.link_text().as_deref(), Some("the docs"));
    assert_no_messages(&context);
}

#[test]
fn link_tag_with_package_and_import_path() {
    let context = parse_comment("/**\n * {@link my-pkg/lib#Widget.render}\n */");
    let link = first_link_tag(&context);
    let destination = link.code_destination().expect("code destination");

    assert_eq!(destination.package_name().as_deref(), Some("my-pkg"));
    assert_eq!(destination.import_path().as_deref(), Some("/lib"));
    assert_eq!(destination.members().len(), 2);
    assert_no_messages(&context);
}

#[test]
fn link_tag_with_scoped_package() {
    let context = parse_comment("/**\n * {@link @scope/pkg#Thing}\n */");
    let link = first_link_tag(&context);
    let destination = link.code_destination().expect("code destination");
    assert_eq!(destination.package_name().as_deref(), Some("@scope/pkg"));
    assert!(destination.import_path().is_none());
    assert_no_messages(&context);
}

#[test]
fn empty_link_tag_is_an_error() {
    let context = parse_comment("/**\n * {@link}\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-link-tag-empty-destination"
    );
    assert_token_coverage(&context);
}

#[test]
fn invalid_link_url_is_an_error() {
    let context = parse_comment("/**\n * {@link http://}\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-link-tag-invalid-url"
    );
}

#[test]
fn path_without_hash_gets_a_specific_error() {
    let context = parse_comment("/**\n * {@link folder/file}\n */");
    let message = &context.log().messages()[0];
    assert_eq!(message.code(), "docmark-reference-missing-hash");
    assert!(message.text().contains("missing the \"#\" delimiter"));
}

#[test]
fn unterminated_inline_tag_is_recovered() {
    let context = parse_comment("/**\n * {@link foo\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-inline-tag-missing-right-brace"
    );
    assert_token_coverage(&context);
}

#[test]
fn generic_inline_tag_keeps_raw_content() {
    let context = parse_comment("/**\n * {@label my-stuff}\n */");
    let summary = context.comment().summary_section();
    let paragraph = summary.paragraphs().next().unwrap();
    let tag = paragraph
        .children()
        .iter()
        .find_map(|node| match node {
            DocNode::InlineTag(tag) => Some(tag),
            _ => None,
        })
        .expect("an inline tag");
    assert_eq!(tag.name(), "@label");
    assert_eq!(tag.content_text().as_deref(), Some("my-stuff"));
    assert_no_messages(&context);
}

#[test]
fn block_tag_inside_braces_is_reported() {
    let context = parse_comment("/**\n * {@remarks stuff}\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-tag-should-not-have-braces"
    );
}

#[test]
fn inherit_doc_attaches_to_the_root() {
    let context = parse_comment("/**\n * {@inheritDoc}\n */");
    assert!(context.comment().inherit_doc_tag().is_some());
    assert_no_messages(&context);
    assert_token_coverage(&context);
}

#[test]
fn inherit_doc_with_declaration_reference() {
    let context = parse_comment("/**\n * {@inheritDoc Base.method}\n */");
    let tag = context.comment().inherit_doc_tag().expect("inheritDoc");
    let reference = tag.declaration_reference().expect("reference");
    assert_eq!(reference.members().len(), 2);
    assert_no_messages(&context);
}

#[test]
fn second_inherit_doc_is_an_error() {
    let context = parse_comment("/**\n * {@inheritDoc}\n * {@inheritDoc}\n */");
    assert!(context.comment().inherit_doc_tag().is_some());
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-extra-inheritdoc-tag"
    );
    assert_token_coverage(&context);
}

#[test]
fn inherit_doc_forbids_summary_content() {
    let context = parse_comment("/**\n * Summary text\n * {@inheritDoc}\n */");
    assert!(context
        .log()
        .messages()
        .iter()
        .any(|message| message.code() == "docmark-inheritdoc-incompatible-summary"));
}

#[test]
fn inherit_doc_forbids_remarks() {
    let context = parse_comment("/**\n * {@inheritDoc}\n * @remarks\n * Extra words\n */");
    assert!(context
        .log()
        .messages()
        .iter()
        .any(|message| message.code() == "docmark-inheritdoc-incompatible-tag"));
}

#[test]
fn malformed_inline_tag_start_is_recovered() {
    let context = parse_comment("/**\n * { not a tag }\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-malformed-inline-tag"
    );
    assert_token_coverage(&context);
}
