use docmark_parser::docmark::ast::snapshot::{snapshot_comment, to_json, NodeSnapshot};
use docmark_parser::docmark::parsing::parse_comment;

#[test]
fn snapshot_mirrors_the_tree() {
    let context = parse_comment("/** Hi */");
    let snapshot = snapshot_comment(context.comment());

    assert_eq!(snapshot.kind, "Comment");
    assert_eq!(snapshot.children.len(), 1);

    let section = &snapshot.children[0];
    assert_eq!(section.kind, "Section");
    let paragraph = &section.children[0];
    assert_eq!(paragraph.kind, "Paragraph");
    assert_eq!(paragraph.children[0].kind, "PlainText");
    assert_eq!(paragraph.children[0].text.as_deref(), Some("Hi"));
}

#[test]
fn snapshot_labels_notable_nodes() {
    let context = parse_comment("/**\n * @param size - the size\n */");
    let snapshot = snapshot_comment(context.comment());

    let param = snapshot
        .children
        .iter()
        .find(|child| child.kind == "ParamBlock")
        .expect("a param block snapshot");
    assert_eq!(param.text.as_deref(), Some("size"));
    assert_eq!(param.children[0].kind, "BlockTag");
    assert_eq!(param.children[0].text.as_deref(), Some("@param"));
}

#[test]
fn snapshot_serializes_to_json_and_back() {
    let context = parse_comment("/**\n * text with `code`\n */");
    let snapshot = snapshot_comment(context.comment());

    let json = to_json(&snapshot);
    assert!(json.contains("\"kind\": \"Comment\""));
    assert!(json.contains("\"kind\": \"CodeSpan\""));

    let restored: NodeSnapshot = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(restored, snapshot);
}
