//! Concrete syntax tree for docmark comments
//!
//! The tree is a closed family of node kinds. Leaf nodes carry an
//! [`Excerpt`](crate::docmark::lexing::Excerpt) pointing at their tokens;
//! container nodes hold ordered children. [`DocNodeRef::children`] is the
//! canonical tree-walk interface: it returns the ordered (and filtered, where
//! optional parts are absent) child list for any kind, so visitors never need
//! per-kind knowledge.
//!
//! [`DocNodeRef::children`]: nodes::DocNodeRef::children

pub mod diagnostics;
pub mod elements;
pub mod nodes;
pub mod snapshot;

pub use diagnostics::{MessageLog, ParserMessage, Severity};
pub use elements::code::{CodeSpan, FencedCode};
pub use elements::comment::DocComment;
pub use elements::html::{HtmlAttribute, HtmlEndTag, HtmlStartTag};
pub use elements::inlines::{InheritDocTag, InlineTag, LinkTag};
pub use elements::reference::{
    DeclarationReference, MemberIdentifier, MemberReference, MemberSelector, MemberSymbol,
    SelectorKind,
};
pub use elements::sections::{BlockTag, ParamBlock, ParamBlockKind, Paragraph, Section};
pub use elements::text::{ErrorText, EscapedText, Particle, PlainText, SoftBreak};
pub use nodes::{has_text_content, reconstruct, DocNode, DocNodeKind, DocNodeRef};
