//! CST snapshot - a normalized, serializable representation of the tree
//!
//! The snapshot mirrors the tree as plain data (kind + text + children) so
//! that tooling can dump it as JSON and tests can assert on structure without
//! reimplementing traversal. All serializers should consume
//! [`snapshot_comment`] rather than walking the tree themselves.

use serde::{Deserialize, Serialize};

use super::elements::comment::DocComment;
use super::nodes::DocNodeRef;

/// A snapshot of one node in normalized, serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// The node kind name (e.g. "Paragraph", "LinkTag").
    pub kind: String,

    /// The leaf's source text, or a short label for notable containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child snapshots in tree order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn new(kind: String, text: Option<String>) -> Self {
        Self {
            kind,
            text,
            children: Vec::new(),
        }
    }
}

/// Build a snapshot of a whole comment.
pub fn snapshot_comment(comment: &DocComment) -> NodeSnapshot {
    snapshot_node(DocNodeRef::Comment(comment))
}

/// Build a snapshot of any subtree.
pub fn snapshot_node(node: DocNodeRef<'_>) -> NodeSnapshot {
    let text = match node {
        DocNodeRef::BlockTag(tag) => Some(tag.name().to_string()),
        DocNodeRef::ParamBlock(block) => Some(block.parameter_name().to_string()),
        DocNodeRef::InlineTag(tag) => Some(tag.name().to_string()),
        DocNodeRef::HtmlStartTag(tag) => Some(tag.name()),
        DocNodeRef::HtmlEndTag(tag) => Some(tag.name()),
        DocNodeRef::HtmlAttribute(attribute) => {
            Some(format!("{}={}", attribute.name(), attribute.value()))
        }
        DocNodeRef::MemberSelector(selector) => Some(selector.selector().to_string()),
        _ => node.excerpt().map(|excerpt| excerpt.text()),
    };

    let mut snapshot = NodeSnapshot::new(node.kind().name().to_string(), text);
    snapshot.children = node.children().into_iter().map(snapshot_node).collect();
    snapshot
}

/// Serialize a snapshot as pretty-printed JSON.
pub fn to_json(snapshot: &NodeSnapshot) -> String {
    serde_json::to_string_pretty(snapshot).expect("snapshot serialization cannot fail")
}
