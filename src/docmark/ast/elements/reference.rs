//! Declaration references
//!
//! The structured expression used by `{@link}` and `{@inheritDoc}` to point at
//! another API declaration: an optional package name (possibly scoped), an
//! optional import path delimited from the member chain by `#`, and a chain of
//! member references, each optionally disambiguated by a selector in
//! parentheses.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::Particle;
use crate::docmark::lexing::sequence::Excerpt;

/// A reference to a declaration: `@scope/package/path#Member.member(selector)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationReference {
    package_name: Option<Particle>,
    import_path: Option<Particle>,
    import_hash: Option<Particle>,
    members: Vec<MemberReference>,
}

impl DeclarationReference {
    pub fn new(
        package_name: Option<Particle>,
        import_path: Option<Particle>,
        import_hash: Option<Particle>,
        members: Vec<MemberReference>,
    ) -> Self {
        Self {
            package_name,
            import_path,
            import_hash,
            members,
        }
    }

    pub fn package_name_particle(&self) -> Option<&Particle> {
        self.package_name.as_ref()
    }

    pub fn package_name(&self) -> Option<String> {
        self.package_name.as_ref().map(|particle| particle.text())
    }

    pub fn import_path_particle(&self) -> Option<&Particle> {
        self.import_path.as_ref()
    }

    pub fn import_path(&self) -> Option<String> {
        self.import_path.as_ref().map(|particle| particle.text())
    }

    pub fn import_hash(&self) -> Option<&Particle> {
        self.import_hash.as_ref()
    }

    pub fn members(&self) -> &[MemberReference] {
        &self.members
    }
}

/// One element of a member chain: `.identifier`, `.[symbol]`, or a
/// parenthesized form with a selector, `.(identifier:selector)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberReference {
    dot: Option<Particle>,
    left_paren: Option<Particle>,
    identifier: Option<MemberIdentifier>,
    symbol: Option<MemberSymbol>,
    colon: Option<Particle>,
    selector: Option<MemberSelector>,
    right_paren: Option<Particle>,
}

impl MemberReference {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dot: Option<Particle>,
        left_paren: Option<Particle>,
        identifier: Option<MemberIdentifier>,
        symbol: Option<MemberSymbol>,
        colon: Option<Particle>,
        selector: Option<MemberSelector>,
        right_paren: Option<Particle>,
    ) -> Self {
        Self {
            dot,
            left_paren,
            identifier,
            symbol,
            colon,
            selector,
            right_paren,
        }
    }

    pub fn dot(&self) -> Option<&Particle> {
        self.dot.as_ref()
    }

    pub fn left_parenthesis(&self) -> Option<&Particle> {
        self.left_paren.as_ref()
    }

    pub fn identifier(&self) -> Option<&MemberIdentifier> {
        self.identifier.as_ref()
    }

    pub fn symbol(&self) -> Option<&MemberSymbol> {
        self.symbol.as_ref()
    }

    pub fn colon(&self) -> Option<&Particle> {
        self.colon.as_ref()
    }

    pub fn selector(&self) -> Option<&MemberSelector> {
        self.selector.as_ref()
    }

    pub fn right_parenthesis(&self) -> Option<&Particle> {
        self.right_paren.as_ref()
    }
}

/// A member name, optionally quoted for names the plain grammar cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberIdentifier {
    left_quote: Option<Particle>,
    identifier: Particle,
    right_quote: Option<Particle>,
}

impl MemberIdentifier {
    pub fn new(
        left_quote: Option<Particle>,
        identifier: Particle,
        right_quote: Option<Particle>,
    ) -> Self {
        Self {
            left_quote,
            identifier,
            right_quote,
        }
    }

    pub fn left_quote(&self) -> Option<&Particle> {
        self.left_quote.as_ref()
    }

    pub fn identifier_particle(&self) -> &Particle {
        &self.identifier
    }

    pub fn right_quote(&self) -> Option<&Particle> {
        self.right_quote.as_ref()
    }

    pub fn is_quoted(&self) -> bool {
        self.left_quote.is_some()
    }

    /// The identifier text, without quotes.
    pub fn text(&self) -> String {
        self.identifier.text()
    }
}

/// An ECMAScript symbol member: `[Symbol.iterator]`. The brackets contain a
/// nested declaration reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSymbol {
    left_bracket: Particle,
    reference: Box<DeclarationReference>,
    right_bracket: Particle,
}

impl MemberSymbol {
    pub fn new(
        left_bracket: Particle,
        reference: DeclarationReference,
        right_bracket: Particle,
    ) -> Self {
        Self {
            left_bracket,
            reference: Box::new(reference),
            right_bracket,
        }
    }

    pub fn left_bracket(&self) -> &Particle {
        &self.left_bracket
    }

    pub fn symbol_reference(&self) -> &DeclarationReference {
        &self.reference
    }

    pub fn right_bracket(&self) -> &Particle {
        &self.right_bracket
    }
}

/// Classification of a member selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SelectorKind {
    /// A positive integer (overload index).
    Index,
    /// An upper-snake-case user label.
    Label,
    /// One of the fixed system keywords (`instance`, `static`, ...).
    System,
    /// Unrecognized selector text.
    Error,
}

static INDEX_SELECTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").unwrap());
static LABEL_SELECTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z_][A-Z0-9_]*$").unwrap());

const SYSTEM_SELECTORS: &[&str] = &[
    "instance",
    "static",
    "constructor",
    "class",
    "enum",
    "function",
    "interface",
    "namespace",
    "type",
    "variable",
];

/// A selector disambiguating a member reference: an overload index, an
/// upper-case label, or a system keyword. Classification happens at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSelector {
    excerpt: Excerpt,
    selector: String,
    kind: SelectorKind,
    error_message: Option<String>,
}

impl MemberSelector {
    pub fn new(excerpt: Excerpt) -> Self {
        let selector = excerpt.text();
        let (kind, error_message) = Self::classify(&selector);
        Self {
            excerpt,
            selector,
            kind,
            error_message,
        }
    }

    fn classify(selector: &str) -> (SelectorKind, Option<String>) {
        if selector.is_empty() {
            return (
                SelectorKind::Error,
                Some("The selector cannot be an empty string".to_string()),
            );
        }
        if INDEX_SELECTOR.is_match(selector) {
            return (SelectorKind::Index, None);
        }
        if selector.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
            return (
                SelectorKind::Error,
                Some("An index selector must be a positive integer without a leading zero".to_string()),
            );
        }
        if LABEL_SELECTOR.is_match(selector) {
            return (SelectorKind::Label, None);
        }
        if SYSTEM_SELECTORS.contains(&selector) {
            return (SelectorKind::System, None);
        }
        (
            SelectorKind::Error,
            Some(format!(
                "The selector \"{}\" is not a positive integer, an upper-case label, or a system selector",
                selector
            )),
        )
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn kind(&self) -> SelectorKind {
        self.kind
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(selector: &str) -> SelectorKind {
        MemberSelector::classify(selector).0
    }

    #[test]
    fn test_index_selectors() {
        assert_eq!(classify("1"), SelectorKind::Index);
        assert_eq!(classify("42"), SelectorKind::Index);
    }

    #[test]
    fn test_leading_zero_is_an_error() {
        assert_eq!(classify("0"), SelectorKind::Error);
        assert_eq!(classify("01"), SelectorKind::Error);
    }

    #[test]
    fn test_label_selectors() {
        assert_eq!(classify("MY_LABEL"), SelectorKind::Label);
        assert_eq!(classify("_PRIVATE"), SelectorKind::Label);
        assert_eq!(classify("A"), SelectorKind::Label);
    }

    #[test]
    fn test_system_selectors() {
        for keyword in SYSTEM_SELECTORS {
            assert_eq!(classify(keyword), SelectorKind::System);
        }
    }

    #[test]
    fn test_unrecognized_selectors() {
        assert_eq!(classify("myLabel"), SelectorKind::Error);
        assert_eq!(classify("static2"), SelectorKind::Error);
        assert_eq!(classify(""), SelectorKind::Error);
    }
}
