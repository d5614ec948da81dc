//! HTML-like tags embedded in comment text
//!
//! The grammar recognizes start tags with optional attributes and an optional
//! self-closing slash (`<tag attr="value" />`) and end tags (`</tag>`).
//! Nothing is validated against a real HTML element list; these nodes only
//! capture the syntax.

use super::text::Particle;

/// One `name="value"` attribute of an HTML start tag.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlAttribute {
    name: Particle,
    equals: Particle,
    value: Particle,
    value_text: String,
}

impl HtmlAttribute {
    pub fn new(name: Particle, equals: Particle, value: Particle, value_text: String) -> Self {
        Self {
            name,
            equals,
            value,
            value_text,
        }
    }

    pub fn name_particle(&self) -> &Particle {
        &self.name
    }

    pub fn name(&self) -> String {
        self.name.text()
    }

    pub fn equals_particle(&self) -> &Particle {
        &self.equals
    }

    pub fn value_particle(&self) -> &Particle {
        &self.value
    }

    /// The attribute value without its surrounding quotes.
    pub fn value(&self) -> &str {
        &self.value_text
    }
}

/// An HTML start tag: `<name attr="value">` or `<name />`.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlStartTag {
    opening: Particle,
    name: Particle,
    attributes: Vec<HtmlAttribute>,
    self_closing_slash: Option<Particle>,
    closing: Particle,
}

impl HtmlStartTag {
    pub fn new(
        opening: Particle,
        name: Particle,
        attributes: Vec<HtmlAttribute>,
        self_closing_slash: Option<Particle>,
        closing: Particle,
    ) -> Self {
        Self {
            opening,
            name,
            attributes,
            self_closing_slash,
            closing,
        }
    }

    pub fn opening_delimiter(&self) -> &Particle {
        &self.opening
    }

    pub fn name_particle(&self) -> &Particle {
        &self.name
    }

    pub fn name(&self) -> String {
        self.name.text()
    }

    pub fn attributes(&self) -> &[HtmlAttribute] {
        &self.attributes
    }

    pub fn self_closing_slash(&self) -> Option<&Particle> {
        self.self_closing_slash.as_ref()
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing_slash.is_some()
    }

    pub fn closing_delimiter(&self) -> &Particle {
        &self.closing
    }
}

/// An HTML end tag: `</name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlEndTag {
    opening: Particle,
    name: Particle,
    closing: Particle,
}

impl HtmlEndTag {
    pub fn new(opening: Particle, name: Particle, closing: Particle) -> Self {
        Self {
            opening,
            name,
            closing,
        }
    }

    pub fn opening_delimiter(&self) -> &Particle {
        &self.opening
    }

    pub fn name_particle(&self) -> &Particle {
        &self.name
    }

    pub fn name(&self) -> String {
        self.name.text()
    }

    pub fn closing_delimiter(&self) -> &Particle {
        &self.closing
    }
}
