//! Inline tags: `{@tag content}`, `{@inheritDoc ...}`, `{@link ...}`

use super::reference::DeclarationReference;
use super::text::Particle;

/// A generic inline tag with uninterpreted content.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineTag {
    opening: Particle,
    tag_name: Particle,
    name: String,
    name_upper: String,
    content: Option<Particle>,
    closing: Particle,
}

impl InlineTag {
    pub fn new(
        opening: Particle,
        tag_name: Particle,
        content: Option<Particle>,
        closing: Particle,
    ) -> Self {
        let name = tag_name.text();
        let name_upper = name.to_uppercase();
        Self {
            opening,
            tag_name,
            name,
            name_upper,
            content,
            closing,
        }
    }

    pub fn opening_delimiter(&self) -> &Particle {
        &self.opening
    }

    pub fn tag_name_particle(&self) -> &Particle {
        &self.tag_name
    }

    /// The tag name including the leading `@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_upper(&self) -> &str {
        &self.name_upper
    }

    pub fn content_particle(&self) -> Option<&Particle> {
        self.content.as_ref()
    }

    /// The raw tag content text, if any.
    pub fn content_text(&self) -> Option<String> {
        self.content.as_ref().map(|particle| particle.text())
    }

    pub fn closing_delimiter(&self) -> &Particle {
        &self.closing
    }
}

/// `{@inheritDoc}`, optionally targeting another declaration.
///
/// At most one is allowed per comment; it attaches to the comment root rather
/// than flowing inline.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritDocTag {
    opening: Particle,
    tag_name: Particle,
    reference: Option<DeclarationReference>,
    spacing_after_reference: Option<Particle>,
    closing: Particle,
}

impl InheritDocTag {
    pub fn new(
        opening: Particle,
        tag_name: Particle,
        reference: Option<DeclarationReference>,
        spacing_after_reference: Option<Particle>,
        closing: Particle,
    ) -> Self {
        Self {
            opening,
            tag_name,
            reference,
            spacing_after_reference,
            closing,
        }
    }

    pub fn opening_delimiter(&self) -> &Particle {
        &self.opening
    }

    pub fn tag_name_particle(&self) -> &Particle {
        &self.tag_name
    }

    pub fn declaration_reference(&self) -> Option<&DeclarationReference> {
        self.reference.as_ref()
    }

    pub fn spacing_after_reference(&self) -> Option<&Particle> {
        self.spacing_after_reference.as_ref()
    }

    pub fn closing_delimiter(&self) -> &Particle {
        &self.closing
    }
}

/// `{@link destination | link text}`.
///
/// The destination is either a URL or a declaration reference, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTag {
    opening: Particle,
    tag_name: Particle,
    url_destination: Option<Particle>,
    code_destination: Option<DeclarationReference>,
    spacing_after_destination: Option<Particle>,
    pipe: Option<Particle>,
    link_text: Option<Particle>,
    closing: Particle,
}

impl LinkTag {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        opening: Particle,
        tag_name: Particle,
        url_destination: Option<Particle>,
        code_destination: Option<DeclarationReference>,
        spacing_after_destination: Option<Particle>,
        pipe: Option<Particle>,
        link_text: Option<Particle>,
        closing: Particle,
    ) -> Self {
        Self {
            opening,
            tag_name,
            url_destination,
            code_destination,
            spacing_after_destination,
            pipe,
            link_text,
            closing,
        }
    }

    pub fn opening_delimiter(&self) -> &Particle {
        &self.opening
    }

    pub fn tag_name_particle(&self) -> &Particle {
        &self.tag_name
    }

    pub fn url_destination_particle(&self) -> Option<&Particle> {
        self.url_destination.as_ref()
    }

    /// The URL destination text, when the destination was a URL.
    pub fn url_destination(&self) -> Option<String> {
        self.url_destination.as_ref().map(|particle| particle.text())
    }

    /// The declaration reference, when the destination was one.
    pub fn code_destination(&self) -> Option<&DeclarationReference> {
        self.code_destination.as_ref()
    }

    pub fn spacing_after_destination(&self) -> Option<&Particle> {
        self.spacing_after_destination.as_ref()
    }

    pub fn pipe(&self) -> Option<&Particle> {
        self.pipe.as_ref()
    }

    pub fn link_text_particle(&self) -> Option<&Particle> {
        self.link_text.as_ref()
    }

    /// The display text after the `|`, if any.
    pub fn link_text(&self) -> Option<String> {
        self.link_text.as_ref().map(|particle| particle.text())
    }

    pub fn closing_delimiter(&self) -> &Particle {
        &self.closing
    }
}
