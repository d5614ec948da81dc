//! Tag definitions and the lookup interface the parser consumes
//!
//! Which tags exist, and whether each is a block, modifier, or inline tag, is
//! configuration rather than grammar: the parser only queries a
//! [`TagRegistry`] while validating the tags it encounters. The grammar-level
//! special cases (`@param`, `@typeParam`, `{@link}`, `{@inheritDoc}`) are
//! recognized by name regardless of registry contents.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// How a tag is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum TagSyntaxKind {
    /// Starts a new top-level section (`@remarks`).
    Block,
    /// Conveys a boolean fact by its mere presence (`@internal`).
    Modifier,
    /// Embedded in running text inside braces (`{@link}`).
    Inline,
}

static TAG_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@[a-zA-Z][a-zA-Z0-9]*$").unwrap());

/// Check whether `name` (including the `@`) is a well-formed tag name.
pub fn is_valid_tag_name(name: &str) -> bool {
    TAG_NAME.is_match(name)
}

/// The definition of one documentation tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TagDefinition {
    name: String,
    name_upper: String,
    syntax_kind: TagSyntaxKind,
    supported: bool,
}

impl TagDefinition {
    /// Define a tag. `name` must include the leading `@` and be well-formed.
    pub fn new(name: &str, syntax_kind: TagSyntaxKind) -> Self {
        assert!(
            is_valid_tag_name(name),
            "invalid tag name {:?}: a tag name must start with a letter and contain only letters and numbers",
            name
        );
        Self {
            name: name.to_string(),
            name_upper: name.to_uppercase(),
            syntax_kind,
            supported: true,
        }
    }

    /// Mark the tag as known but unsupported by the consuming tool.
    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_upper(&self) -> &str {
        &self.name_upper
    }

    pub fn syntax_kind(&self) -> TagSyntaxKind {
        self.syntax_kind
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }
}

/// The lookup table of defined tags.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<String, TagDefinition>,
}

impl TagRegistry {
    /// An empty registry (every tag will be undefined).
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard tag set.
    pub fn standard() -> Self {
        use TagSyntaxKind::{Block, Inline, Modifier};
        let mut registry = Self::new();
        for definition in [
            TagDefinition::new("@alpha", Modifier),
            TagDefinition::new("@beta", Modifier),
            TagDefinition::new("@decorator", Block),
            TagDefinition::new("@defaultValue", Block),
            TagDefinition::new("@deprecated", Block),
            TagDefinition::new("@eventProperty", Modifier),
            TagDefinition::new("@example", Block),
            TagDefinition::new("@experimental", Modifier),
            TagDefinition::new("@inheritDoc", Inline),
            TagDefinition::new("@internal", Modifier),
            TagDefinition::new("@label", Inline),
            TagDefinition::new("@link", Inline),
            TagDefinition::new("@override", Modifier),
            TagDefinition::new("@packageDocumentation", Modifier),
            TagDefinition::new("@param", Block),
            TagDefinition::new("@privateRemarks", Block),
            TagDefinition::new("@public", Modifier),
            TagDefinition::new("@readonly", Modifier),
            TagDefinition::new("@remarks", Block),
            TagDefinition::new("@returns", Block),
            TagDefinition::new("@sealed", Modifier),
            TagDefinition::new("@see", Block),
            TagDefinition::new("@throws", Block),
            TagDefinition::new("@typeParam", Block),
            TagDefinition::new("@virtual", Modifier),
        ] {
            registry.define(definition);
        }
        registry
    }

    /// Add or replace a tag definition.
    pub fn define(&mut self, definition: TagDefinition) {
        self.tags
            .insert(definition.name_upper().to_string(), definition);
    }

    /// Look up a definition by upper-cased name (including the `@`).
    pub fn try_get(&self, name_upper: &str) -> Option<&TagDefinition> {
        self.tags.get(name_upper)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tag_names() {
        assert!(is_valid_tag_name("@remarks"));
        assert!(is_valid_tag_name("@typeParam"));
        assert!(is_valid_tag_name("@v2"));
        assert!(!is_valid_tag_name("remarks"));
        assert!(!is_valid_tag_name("@"));
        assert!(!is_valid_tag_name("@1tag"));
        assert!(!is_valid_tag_name("@my-tag"));
    }

    #[test]
    fn test_standard_lookup_is_case_insensitive_by_upper() {
        let registry = TagRegistry::standard();
        let definition = registry.try_get("@REMARKS").unwrap();
        assert_eq!(definition.name(), "@remarks");
        assert_eq!(definition.syntax_kind(), TagSyntaxKind::Block);
        assert!(registry.try_get("@NOSUCHTAG").is_none());
    }

    #[test]
    fn test_unsupported_tag() {
        let mut registry = TagRegistry::new();
        registry.define(TagDefinition::new("@legacy", TagSyntaxKind::Block).unsupported());
        assert!(!registry.try_get("@LEGACY").unwrap().is_supported());
    }

    #[test]
    #[should_panic(expected = "invalid tag name")]
    fn test_malformed_definition_panics() {
        let _ = TagDefinition::new("@bad-name", TagSyntaxKind::Block);
    }
}
