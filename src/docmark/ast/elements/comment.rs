//! The comment root node

use super::inlines::InheritDocTag;
use super::sections::{BlockTag, ParamBlock, ParamBlockKind, Section};
use crate::docmark::ast::nodes::DocNode;

/// The root of a parsed comment.
///
/// The summary section always comes first; the remaining root items
/// (tagged sections, param blocks, modifier tags) are kept in document order
/// so that a depth-first walk visits tokens in source order. The named
/// accessors locate the standard blocks within that list.
#[derive(Debug, Clone, PartialEq)]
pub struct DocComment {
    summary: Section,
    inherit_doc: Option<InheritDocTag>,
    items: Vec<DocNode>,
}

impl DocComment {
    pub fn new(summary: Section, inherit_doc: Option<InheritDocTag>, items: Vec<DocNode>) -> Self {
        Self {
            summary,
            inherit_doc,
            items,
        }
    }

    /// An empty comment, used when line extraction fails structurally.
    pub fn empty() -> Self {
        Self::new(Section::untagged(), None, Vec::new())
    }

    /// The leading untagged section.
    pub fn summary_section(&self) -> &Section {
        &self.summary
    }

    pub fn inherit_doc_tag(&self) -> Option<&InheritDocTag> {
        self.inherit_doc.as_ref()
    }

    /// All root items after the summary, in document order.
    pub fn items(&self) -> &[DocNode] {
        &self.items
    }

    fn find_section(&self, name_upper: &str) -> Option<&Section> {
        self.items.iter().find_map(|item| match item {
            DocNode::Section(section)
                if section
                    .block_tag()
                    .is_some_and(|tag| tag.name_upper() == name_upper) =>
            {
                Some(section)
            }
            _ => None,
        })
    }

    pub fn remarks_block(&self) -> Option<&Section> {
        self.find_section("@REMARKS")
    }

    pub fn private_remarks_block(&self) -> Option<&Section> {
        self.find_section("@PRIVATEREMARKS")
    }

    pub fn deprecated_block(&self) -> Option<&Section> {
        self.find_section("@DEPRECATED")
    }

    pub fn returns_block(&self) -> Option<&Section> {
        self.find_section("@RETURNS")
    }

    fn param_blocks(&self, kind: ParamBlockKind) -> impl Iterator<Item = &ParamBlock> {
        self.items.iter().filter_map(move |item| match item {
            DocNode::ParamBlock(block) if block.kind() == kind => Some(block),
            _ => None,
        })
    }

    /// The `@param` blocks in document order.
    pub fn params(&self) -> Vec<&ParamBlock> {
        self.param_blocks(ParamBlockKind::Param).collect()
    }

    /// The `@typeParam` blocks in document order.
    pub fn type_params(&self) -> Vec<&ParamBlock> {
        self.param_blocks(ParamBlockKind::TypeParam).collect()
    }

    /// Tagged sections other than the standard named blocks.
    pub fn custom_blocks(&self) -> Vec<&Section> {
        const STANDARD: &[&str] = &["@REMARKS", "@PRIVATEREMARKS", "@DEPRECATED", "@RETURNS"];
        self.items
            .iter()
            .filter_map(|item| match item {
                DocNode::Section(section) => {
                    let tag = section.block_tag()?;
                    if STANDARD.contains(&tag.name_upper()) {
                        None
                    } else {
                        Some(section)
                    }
                }
                _ => None,
            })
            .collect()
    }

    /// The modifier tags of this comment, in document order.
    pub fn modifier_tags(&self) -> Vec<&BlockTag> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DocNode::BlockTag(tag) => Some(tag),
                _ => None,
            })
            .collect()
    }

    /// Check for a modifier tag by name (case-insensitive, with or without `@`).
    pub fn has_modifier(&self, name: &str) -> bool {
        let upper = if name.starts_with('@') {
            name.to_uppercase()
        } else {
            format!("@{}", name.to_uppercase())
        };
        self.modifier_tags()
            .iter()
            .any(|tag| tag.name_upper() == upper)
    }

    pub(crate) fn summary_mut(&mut self) -> &mut Section {
        &mut self.summary
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<DocNode> {
        &mut self.items
    }
}
