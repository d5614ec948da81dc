use docmark_parser::docmark::ast::nodes::DocNode;
use docmark_parser::docmark::ast::{DeclarationReference, SelectorKind};
use docmark_parser::docmark::parsing::parse_comment;
use docmark_parser::docmark::testing::{assert_no_messages, assert_token_coverage};

fn destination_of(input: &str) -> (DeclarationReference, docmark_parser::docmark::parsing::ParserContext) {
    let context = parse_comment(input);
    let summary = context.comment().summary_section();
    let paragraph = summary.paragraphs().next().expect("a paragraph");
    let destination = paragraph
        .children()
        .iter()
        .find_map(|node| match node {
            DocNode::LinkTag(link) => link.code_destination().cloned(),
            _ => None,
        })
        .expect("a code destination");
    (destination, context)
}

#[test]
fn bare_member_reference() {
    let (destination, context) = destination_of("/**\n * {@link Widget}\n */");
    assert_eq!(destination.members().len(), 1);
    assert_eq!(destination.members()[0].identifier().unwrap().text(), "Widget");
    assert!(destination.package_name().is_none());
    assert_no_messages(&context);
}

#[test]
fn member_chain_uses_dots_after_the_first() {
    let (destination, context) = destination_of("/**\n * {@link a.b.c}\n */");
    assert_eq!(destination.members().len(), 3);
    assert!(destination.members()[0].dot().is_none());
    assert!(destination.members()[1].dot().is_some());
    assert!(destination.members()[2].dot().is_some());
    assert_no_messages(&context);
}

#[test]
fn hash_without_package_name() {
    let (destination, context) = destination_of("/**\n * {@link #render}\n */");
    assert!(destination.package_name().is_none());
    assert!(destination.import_hash().is_some());
    assert_eq!(destination.members().len(), 1);
    assert_no_messages(&context);
}

#[test]
fn system_selector_in_parentheses() {
    let (destination, context) = destination_of("/**\n * {@link Button.(render:static)}\n */");
    let member = &destination.members()[1];
    assert!(member.left_parenthesis().is_some());
    let selector = member.selector().expect("a selector");
    assert_eq!(selector.selector(), "static");
    assert_eq!(selector.kind(), SelectorKind::System);
    assert_no_messages(&context);
    assert_token_coverage(&context);
}

#[test]
fn index_selector() {
    let (destination, context) = destination_of("/**\n * {@link Widget.(render:2)}\n */");
    let selector = destination.members()[1].selector().expect("a selector");
    assert_eq!(selector.kind(), SelectorKind::Index);
    assert_no_messages(&context);
}

#[test]
fn label_selector() {
    let (destination, context) = destination_of("/**\n * {@link Widget.(render:MY_LABEL)}\n */");
    let selector = destination.members()[1].selector().expect("a selector");
    assert_eq!(selector.kind(), SelectorKind::Label);
    assert_no_messages(&context);
}

#[test]
fn unrecognized_selector_is_an_error() {
    let context = parse_comment("/**\n * {@link Widget.(render:bogusSelector)}\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-reference-selector-syntax"
    );
    assert_token_coverage(&context);
}

#[test]
fn selector_requires_parentheses() {
    let context = parse_comment("/**\n * {@link Widget.render:static}\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-reference-selector-missing-parens"
    );
}

#[test]
fn quoted_member_identifier() {
    let (destination, context) = destination_of("/**\n * {@link Widget.\"my-name\"}\n */");
    let identifier = destination.members()[1].identifier().expect("identifier");
    assert!(identifier.is_quoted());
    assert_eq!(identifier.text(), "my-name");
    assert_no_messages(&context);
}

#[test]
fn symbol_member_reference() {
    let (destination, context) = destination_of("/**\n * {@link Widget.[Symbol.iterator]}\n */");
    let symbol = destination.members()[1].symbol().expect("a symbol");
    assert_eq!(symbol.symbol_reference().members().len(), 2);
    assert_no_messages(&context);
    assert_token_coverage(&context);
}

#[test]
fn malformed_package_name_is_an_error() {
    let context = parse_comment("/**\n * {@link BadPkg#thing}\n */");
    assert_eq!(
        context.log().messages()[0].code(),
        "docmark-reference-malformed-package-name"
    );
}

#[test]
fn dollar_sign_identifiers_are_allowed() {
    let (destination, context) = destination_of("/**\n * {@link $state}\n */");
    assert_eq!(destination.members()[0].identifier().unwrap().text(), "$state");
    assert_no_messages(&context);
}
