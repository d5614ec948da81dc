//! Block structure: tags, paragraphs, sections, and param blocks
//!
//! A [`Section`] is the container a block tag redirects content into (the
//! summary is a section with no tag). During the main parse a section holds a
//! single flat [`Paragraph`]; the paragraph splitter later rewrites that into
//! one paragraph per blank-line-delimited group.

use super::text::Particle;
use crate::docmark::ast::nodes::DocNode;
use crate::docmark::lexing::sequence::{Excerpt, TokenSequence};

/// A block or modifier tag leaf: `@remarks`, `@param`, `@internal`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTag {
    excerpt: Excerpt,
    name: String,
    name_upper: String,
}

impl BlockTag {
    /// Create a tag from its excerpt; the name (including `@`) is taken from
    /// the excerpt text and its upper-case form is precomputed.
    pub fn new(excerpt: Excerpt) -> Self {
        let name = excerpt.text();
        let name_upper = name.to_uppercase();
        Self {
            excerpt,
            name,
            name_upper,
        }
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }

    /// The tag name including the leading `@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tag name upper-cased, for case-insensitive lookup.
    pub fn name_upper(&self) -> &str {
        &self.name_upper
    }

    /// Retroactively attach the spacing that followed the tag (once).
    pub fn attach_spacing(&mut self, spacing: TokenSequence) {
        self.excerpt.set_spacing_after(spacing);
    }
}

/// A run of content delimited by blank lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    children: Vec<DocNode>,
}

impl Paragraph {
    pub fn new(children: Vec<DocNode>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[DocNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn push(&mut self, node: DocNode) {
        self.children.push(node);
    }

    pub(crate) fn take_children(&mut self) -> Vec<DocNode> {
        std::mem::take(&mut self.children)
    }
}

/// A top-level documentation section: the summary (no tag) or the content of
/// a block tag such as `@remarks`.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    block_tag: Option<BlockTag>,
    children: Vec<DocNode>,
}

impl Section {
    pub fn new(block_tag: Option<BlockTag>, children: Vec<DocNode>) -> Self {
        Self {
            block_tag,
            children,
        }
    }

    pub fn untagged() -> Self {
        Self::new(None, Vec::new())
    }

    pub fn block_tag(&self) -> Option<&BlockTag> {
        self.block_tag.as_ref()
    }

    pub fn children(&self) -> &[DocNode] {
        &self.children
    }

    /// The paragraphs of this section (after splitting).
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.children.iter().filter_map(|child| match child {
            DocNode::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        })
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<DocNode> {
        &mut self.children
    }

    pub(crate) fn replace_children(&mut self, children: Vec<DocNode>) {
        self.children = children;
    }
}

/// Whether a param block came from `@param` or `@typeParam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ParamBlockKind {
    Param,
    TypeParam,
}

/// A `@param name - description` (or `@typeParam`) block.
///
/// `parameter_name` is empty when the name was missing or malformed; the
/// corresponding diagnostic is in the message log and the raw tokens flow into
/// the block's content instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamBlock {
    block_tag: BlockTag,
    kind: ParamBlockKind,
    parameter_name: String,
    name: Option<Particle>,
    hyphen: Option<Particle>,
    content: Section,
}

impl ParamBlock {
    pub fn new(
        block_tag: BlockTag,
        kind: ParamBlockKind,
        parameter_name: String,
        name: Option<Particle>,
        hyphen: Option<Particle>,
    ) -> Self {
        Self {
            block_tag,
            kind,
            parameter_name,
            name,
            hyphen,
            content: Section::untagged(),
        }
    }

    pub fn block_tag(&self) -> &BlockTag {
        &self.block_tag
    }

    pub fn kind(&self) -> ParamBlockKind {
        self.kind
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn name_particle(&self) -> Option<&Particle> {
        self.name.as_ref()
    }

    pub fn hyphen_particle(&self) -> Option<&Particle> {
        self.hyphen.as_ref()
    }

    pub fn content(&self) -> &Section {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut Section {
        &mut self.content
    }
}
