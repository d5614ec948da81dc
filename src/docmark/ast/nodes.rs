//! The closed node family and the uniform tree-walk interface
//!
//! [`DocNode`] is the owned form used wherever heterogeneous children are
//! stored; [`DocNodeRef`] is the borrowed form every node type converts into,
//! and the only thing a tree visitor needs: `kind()`, `children()` (ordered,
//! with absent optional parts filtered out), and `excerpt()` for leaves.

use crate::docmark::ast::elements::code::{CodeSpan, FencedCode};
use crate::docmark::ast::elements::comment::DocComment;
use crate::docmark::ast::elements::html::{HtmlAttribute, HtmlEndTag, HtmlStartTag};
use crate::docmark::ast::elements::inlines::{InheritDocTag, InlineTag, LinkTag};
use crate::docmark::ast::elements::reference::{
    DeclarationReference, MemberIdentifier, MemberReference, MemberSelector, MemberSymbol,
};
use crate::docmark::ast::elements::sections::{BlockTag, ParamBlock, Paragraph, Section};
use crate::docmark::ast::elements::text::{ErrorText, EscapedText, Particle, PlainText, SoftBreak};
use crate::docmark::lexing::sequence::Excerpt;

/// Discriminant for the closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DocNodeKind {
    Comment,
    Section,
    Paragraph,
    BlockTag,
    ParamBlock,
    InlineTag,
    InheritDocTag,
    LinkTag,
    PlainText,
    SoftBreak,
    EscapedText,
    ErrorText,
    CodeSpan,
    FencedCode,
    HtmlStartTag,
    HtmlEndTag,
    HtmlAttribute,
    DeclarationReference,
    MemberReference,
    MemberIdentifier,
    MemberSymbol,
    MemberSelector,
    Particle,
}

impl DocNodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            DocNodeKind::Comment => "Comment",
            DocNodeKind::Section => "Section",
            DocNodeKind::Paragraph => "Paragraph",
            DocNodeKind::BlockTag => "BlockTag",
            DocNodeKind::ParamBlock => "ParamBlock",
            DocNodeKind::InlineTag => "InlineTag",
            DocNodeKind::InheritDocTag => "InheritDocTag",
            DocNodeKind::LinkTag => "LinkTag",
            DocNodeKind::PlainText => "PlainText",
            DocNodeKind::SoftBreak => "SoftBreak",
            DocNodeKind::EscapedText => "EscapedText",
            DocNodeKind::ErrorText => "ErrorText",
            DocNodeKind::CodeSpan => "CodeSpan",
            DocNodeKind::FencedCode => "FencedCode",
            DocNodeKind::HtmlStartTag => "HtmlStartTag",
            DocNodeKind::HtmlEndTag => "HtmlEndTag",
            DocNodeKind::HtmlAttribute => "HtmlAttribute",
            DocNodeKind::DeclarationReference => "DeclarationReference",
            DocNodeKind::MemberReference => "MemberReference",
            DocNodeKind::MemberIdentifier => "MemberIdentifier",
            DocNodeKind::MemberSymbol => "MemberSymbol",
            DocNodeKind::MemberSelector => "MemberSelector",
            DocNodeKind::Particle => "Particle",
        }
    }
}

impl std::fmt::Display for DocNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An owned node, used wherever heterogeneous children are stored.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Section(Section),
    Paragraph(Paragraph),
    BlockTag(BlockTag),
    ParamBlock(ParamBlock),
    InlineTag(InlineTag),
    InheritDocTag(InheritDocTag),
    LinkTag(LinkTag),
    PlainText(PlainText),
    SoftBreak(SoftBreak),
    EscapedText(EscapedText),
    ErrorText(ErrorText),
    CodeSpan(CodeSpan),
    FencedCode(FencedCode),
    HtmlStartTag(HtmlStartTag),
    HtmlEndTag(HtmlEndTag),
}

impl DocNode {
    pub fn kind(&self) -> DocNodeKind {
        self.as_node_ref().kind()
    }

    pub fn as_node_ref(&self) -> DocNodeRef<'_> {
        match self {
            DocNode::Section(node) => DocNodeRef::Section(node),
            DocNode::Paragraph(node) => DocNodeRef::Paragraph(node),
            DocNode::BlockTag(node) => DocNodeRef::BlockTag(node),
            DocNode::ParamBlock(node) => DocNodeRef::ParamBlock(node),
            DocNode::InlineTag(node) => DocNodeRef::InlineTag(node),
            DocNode::InheritDocTag(node) => DocNodeRef::InheritDocTag(node),
            DocNode::LinkTag(node) => DocNodeRef::LinkTag(node),
            DocNode::PlainText(node) => DocNodeRef::PlainText(node),
            DocNode::SoftBreak(node) => DocNodeRef::SoftBreak(node),
            DocNode::EscapedText(node) => DocNodeRef::EscapedText(node),
            DocNode::ErrorText(node) => DocNodeRef::ErrorText(node),
            DocNode::CodeSpan(node) => DocNodeRef::CodeSpan(node),
            DocNode::FencedCode(node) => DocNodeRef::FencedCode(node),
            DocNode::HtmlStartTag(node) => DocNodeRef::HtmlStartTag(node),
            DocNode::HtmlEndTag(node) => DocNodeRef::HtmlEndTag(node),
        }
    }
}

/// A borrowed node of any kind: the uniform traversal interface.
#[derive(Debug, Clone, Copy)]
pub enum DocNodeRef<'a> {
    Comment(&'a DocComment),
    Section(&'a Section),
    Paragraph(&'a Paragraph),
    BlockTag(&'a BlockTag),
    ParamBlock(&'a ParamBlock),
    InlineTag(&'a InlineTag),
    InheritDocTag(&'a InheritDocTag),
    LinkTag(&'a LinkTag),
    PlainText(&'a PlainText),
    SoftBreak(&'a SoftBreak),
    EscapedText(&'a EscapedText),
    ErrorText(&'a ErrorText),
    CodeSpan(&'a CodeSpan),
    FencedCode(&'a FencedCode),
    HtmlStartTag(&'a HtmlStartTag),
    HtmlEndTag(&'a HtmlEndTag),
    HtmlAttribute(&'a HtmlAttribute),
    DeclarationReference(&'a DeclarationReference),
    MemberReference(&'a MemberReference),
    MemberIdentifier(&'a MemberIdentifier),
    MemberSymbol(&'a MemberSymbol),
    MemberSelector(&'a MemberSelector),
    Particle(&'a Particle),
}

impl<'a> DocNodeRef<'a> {
    pub fn kind(&self) -> DocNodeKind {
        match self {
            DocNodeRef::Comment(_) => DocNodeKind::Comment,
            DocNodeRef::Section(_) => DocNodeKind::Section,
            DocNodeRef::Paragraph(_) => DocNodeKind::Paragraph,
            DocNodeRef::BlockTag(_) => DocNodeKind::BlockTag,
            DocNodeRef::ParamBlock(_) => DocNodeKind::ParamBlock,
            DocNodeRef::InlineTag(_) => DocNodeKind::InlineTag,
            DocNodeRef::InheritDocTag(_) => DocNodeKind::InheritDocTag,
            DocNodeRef::LinkTag(_) => DocNodeKind::LinkTag,
            DocNodeRef::PlainText(_) => DocNodeKind::PlainText,
            DocNodeRef::SoftBreak(_) => DocNodeKind::SoftBreak,
            DocNodeRef::EscapedText(_) => DocNodeKind::EscapedText,
            DocNodeRef::ErrorText(_) => DocNodeKind::ErrorText,
            DocNodeRef::CodeSpan(_) => DocNodeKind::CodeSpan,
            DocNodeRef::FencedCode(_) => DocNodeKind::FencedCode,
            DocNodeRef::HtmlStartTag(_) => DocNodeKind::HtmlStartTag,
            DocNodeRef::HtmlEndTag(_) => DocNodeKind::HtmlEndTag,
            DocNodeRef::HtmlAttribute(_) => DocNodeKind::HtmlAttribute,
            DocNodeRef::DeclarationReference(_) => DocNodeKind::DeclarationReference,
            DocNodeRef::MemberReference(_) => DocNodeKind::MemberReference,
            DocNodeRef::MemberIdentifier(_) => DocNodeKind::MemberIdentifier,
            DocNodeRef::MemberSymbol(_) => DocNodeKind::MemberSymbol,
            DocNodeRef::MemberSelector(_) => DocNodeKind::MemberSelector,
            DocNodeRef::Particle(_) => DocNodeKind::Particle,
        }
    }

    /// The excerpt of a leaf node; containers return `None`.
    pub fn excerpt(&self) -> Option<&'a Excerpt> {
        match self {
            DocNodeRef::BlockTag(node) => Some(node.excerpt()),
            DocNodeRef::PlainText(node) => Some(node.excerpt()),
            DocNodeRef::SoftBreak(node) => Some(node.excerpt()),
            DocNodeRef::EscapedText(node) => Some(node.excerpt()),
            DocNodeRef::ErrorText(node) => Some(node.excerpt()),
            DocNodeRef::MemberSelector(node) => Some(node.excerpt()),
            DocNodeRef::Particle(node) => Some(node.excerpt()),
            _ => None,
        }
    }

    /// The ordered child list; absent optional parts are filtered out.
    ///
    /// This is the canonical tree walk: visiting children depth-first visits
    /// leaf excerpts in document order.
    pub fn children(&self) -> Vec<DocNodeRef<'a>> {
        match self {
            DocNodeRef::Comment(comment) => {
                let mut children = vec![DocNodeRef::Section(comment.summary_section())];
                if let Some(tag) = comment.inherit_doc_tag() {
                    children.push(DocNodeRef::InheritDocTag(tag));
                }
                children.extend(comment.items().iter().map(DocNode::as_node_ref));
                children
            }
            DocNodeRef::Section(section) => {
                let mut children = Vec::new();
                if let Some(tag) = section.block_tag() {
                    children.push(DocNodeRef::BlockTag(tag));
                }
                children.extend(section.children().iter().map(DocNode::as_node_ref));
                children
            }
            DocNodeRef::Paragraph(paragraph) => {
                paragraph.children().iter().map(DocNode::as_node_ref).collect()
            }
            DocNodeRef::ParamBlock(block) => {
                let mut children = vec![DocNodeRef::BlockTag(block.block_tag())];
                if let Some(name) = block.name_particle() {
                    children.push(DocNodeRef::Particle(name));
                }
                if let Some(hyphen) = block.hyphen_particle() {
                    children.push(DocNodeRef::Particle(hyphen));
                }
                children.push(DocNodeRef::Section(block.content()));
                children
            }
            DocNodeRef::InlineTag(tag) => {
                let mut children = vec![
                    DocNodeRef::Particle(tag.opening_delimiter()),
                    DocNodeRef::Particle(tag.tag_name_particle()),
                ];
                if let Some(content) = tag.content_particle() {
                    children.push(DocNodeRef::Particle(content));
                }
                children.push(DocNodeRef::Particle(tag.closing_delimiter()));
                children
            }
            DocNodeRef::InheritDocTag(tag) => {
                let mut children = vec![
                    DocNodeRef::Particle(tag.opening_delimiter()),
                    DocNodeRef::Particle(tag.tag_name_particle()),
                ];
                if let Some(reference) = tag.declaration_reference() {
                    children.push(DocNodeRef::DeclarationReference(reference));
                }
                if let Some(spacing) = tag.spacing_after_reference() {
                    children.push(DocNodeRef::Particle(spacing));
                }
                children.push(DocNodeRef::Particle(tag.closing_delimiter()));
                children
            }
            DocNodeRef::LinkTag(tag) => {
                let mut children = vec![
                    DocNodeRef::Particle(tag.opening_delimiter()),
                    DocNodeRef::Particle(tag.tag_name_particle()),
                ];
                if let Some(url) = tag.url_destination_particle() {
                    children.push(DocNodeRef::Particle(url));
                }
                if let Some(reference) = tag.code_destination() {
                    children.push(DocNodeRef::DeclarationReference(reference));
                }
                if let Some(spacing) = tag.spacing_after_destination() {
                    children.push(DocNodeRef::Particle(spacing));
                }
                if let Some(pipe) = tag.pipe() {
                    children.push(DocNodeRef::Particle(pipe));
                }
                if let Some(text) = tag.link_text_particle() {
                    children.push(DocNodeRef::Particle(text));
                }
                children.push(DocNodeRef::Particle(tag.closing_delimiter()));
                children
            }
            DocNodeRef::CodeSpan(span) => vec![
                DocNodeRef::Particle(span.opening_delimiter()),
                DocNodeRef::Particle(span.code()),
                DocNodeRef::Particle(span.closing_delimiter()),
            ],
            DocNodeRef::FencedCode(fence) => {
                let mut children = vec![DocNodeRef::Particle(fence.opening_fence())];
                if let Some(language) = fence.language_particle() {
                    children.push(DocNodeRef::Particle(language));
                }
                children.push(DocNodeRef::Particle(fence.code()));
                children.push(DocNodeRef::Particle(fence.closing_fence()));
                children
            }
            DocNodeRef::HtmlStartTag(tag) => {
                let mut children = vec![
                    DocNodeRef::Particle(tag.opening_delimiter()),
                    DocNodeRef::Particle(tag.name_particle()),
                ];
                children.extend(tag.attributes().iter().map(DocNodeRef::HtmlAttribute));
                if let Some(slash) = tag.self_closing_slash() {
                    children.push(DocNodeRef::Particle(slash));
                }
                children.push(DocNodeRef::Particle(tag.closing_delimiter()));
                children
            }
            DocNodeRef::HtmlEndTag(tag) => vec![
                DocNodeRef::Particle(tag.opening_delimiter()),
                DocNodeRef::Particle(tag.name_particle()),
                DocNodeRef::Particle(tag.closing_delimiter()),
            ],
            DocNodeRef::HtmlAttribute(attribute) => vec![
                DocNodeRef::Particle(attribute.name_particle()),
                DocNodeRef::Particle(attribute.equals_particle()),
                DocNodeRef::Particle(attribute.value_particle()),
            ],
            DocNodeRef::DeclarationReference(reference) => {
                let mut children = Vec::new();
                if let Some(package) = reference.package_name_particle() {
                    children.push(DocNodeRef::Particle(package));
                }
                if let Some(path) = reference.import_path_particle() {
                    children.push(DocNodeRef::Particle(path));
                }
                if let Some(hash) = reference.import_hash() {
                    children.push(DocNodeRef::Particle(hash));
                }
                children.extend(reference.members().iter().map(DocNodeRef::MemberReference));
                children
            }
            DocNodeRef::MemberReference(member) => {
                let mut children = Vec::new();
                if let Some(dot) = member.dot() {
                    children.push(DocNodeRef::Particle(dot));
                }
                if let Some(paren) = member.left_parenthesis() {
                    children.push(DocNodeRef::Particle(paren));
                }
                if let Some(identifier) = member.identifier() {
                    children.push(DocNodeRef::MemberIdentifier(identifier));
                }
                if let Some(symbol) = member.symbol() {
                    children.push(DocNodeRef::MemberSymbol(symbol));
                }
                if let Some(colon) = member.colon() {
                    children.push(DocNodeRef::Particle(colon));
                }
                if let Some(selector) = member.selector() {
                    children.push(DocNodeRef::MemberSelector(selector));
                }
                if let Some(paren) = member.right_parenthesis() {
                    children.push(DocNodeRef::Particle(paren));
                }
                children
            }
            DocNodeRef::MemberIdentifier(identifier) => {
                let mut children = Vec::new();
                if let Some(quote) = identifier.left_quote() {
                    children.push(DocNodeRef::Particle(quote));
                }
                children.push(DocNodeRef::Particle(identifier.identifier_particle()));
                if let Some(quote) = identifier.right_quote() {
                    children.push(DocNodeRef::Particle(quote));
                }
                children
            }
            DocNodeRef::MemberSymbol(symbol) => vec![
                DocNodeRef::Particle(symbol.left_bracket()),
                DocNodeRef::DeclarationReference(symbol.symbol_reference()),
                DocNodeRef::Particle(symbol.right_bracket()),
            ],
            DocNodeRef::BlockTag(_)
            | DocNodeRef::PlainText(_)
            | DocNodeRef::SoftBreak(_)
            | DocNodeRef::EscapedText(_)
            | DocNodeRef::ErrorText(_)
            | DocNodeRef::MemberSelector(_)
            | DocNodeRef::Particle(_) => Vec::new(),
        }
    }
}

/// Reconstruct the comment-body text covered by a subtree.
///
/// Concatenates every leaf excerpt's content and trailing spacing, depth-first
/// in `children()` order. For the comment root this reproduces the stripped
/// comment body exactly.
pub fn reconstruct(node: DocNodeRef<'_>) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: DocNodeRef<'_>, out: &mut String) {
    if let Some(excerpt) = node.excerpt() {
        out.push_str(&excerpt.text());
        if let Some(spacing) = excerpt.spacing_after() {
            out.push_str(&spacing.to_text());
        }
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

/// Whether a subtree contains any visible, non-whitespace content.
pub fn has_text_content(node: DocNodeRef<'_>) -> bool {
    match node {
        DocNodeRef::PlainText(text) => !text.is_whitespace(),
        DocNodeRef::SoftBreak(_) => false,
        DocNodeRef::EscapedText(_)
        | DocNodeRef::ErrorText(_)
        | DocNodeRef::CodeSpan(_)
        | DocNodeRef::FencedCode(_)
        | DocNodeRef::InlineTag(_)
        | DocNodeRef::LinkTag(_)
        | DocNodeRef::InheritDocTag(_)
        | DocNodeRef::HtmlStartTag(_)
        | DocNodeRef::HtmlEndTag(_) => true,
        _ => node.children().into_iter().any(has_text_content),
    }
}
