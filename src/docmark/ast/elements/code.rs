//! Inline code spans and fenced code blocks

use super::text::Particle;
use crate::docmark::lexing::tokens::TokenKind;

/// Inline code delimited by single backticks: `` `code` ``.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSpan {
    opening: Particle,
    code: Particle,
    closing: Particle,
}

impl CodeSpan {
    pub fn new(opening: Particle, code: Particle, closing: Particle) -> Self {
        Self {
            opening,
            code,
            closing,
        }
    }

    pub fn opening_delimiter(&self) -> &Particle {
        &self.opening
    }

    pub fn code(&self) -> &Particle {
        &self.code
    }

    pub fn closing_delimiter(&self) -> &Particle {
        &self.closing
    }

    /// The literal code text between the backticks.
    pub fn code_text(&self) -> String {
        self.code.text()
    }
}

/// A fenced code block delimited by triple backticks, with an optional
/// language specifier after the opening fence.
///
/// Both fences must start a line; the node attaches at section level rather
/// than inside a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct FencedCode {
    opening_fence: Particle,
    language: Option<Particle>,
    code: Particle,
    closing_fence: Particle,
}

impl FencedCode {
    pub fn new(
        opening_fence: Particle,
        language: Option<Particle>,
        code: Particle,
        closing_fence: Particle,
    ) -> Self {
        Self {
            opening_fence,
            language,
            code,
            closing_fence,
        }
    }

    pub fn opening_fence(&self) -> &Particle {
        &self.opening_fence
    }

    pub fn language_particle(&self) -> Option<&Particle> {
        self.language.as_ref()
    }

    /// The language specifier, if one was given (`"ts"` in ```` ```ts ````).
    pub fn language(&self) -> Option<String> {
        self.language.as_ref().map(|particle| particle.text())
    }

    pub fn code(&self) -> &Particle {
        &self.code
    }

    pub fn closing_fence(&self) -> &Particle {
        &self.closing_fence
    }

    /// The literal code text between the fences, with line breaks restored
    /// (newline tokens are virtual and carry no text of their own).
    pub fn code_text(&self) -> String {
        self.code
            .excerpt()
            .content()
            .tokens()
            .iter()
            .map(|token| {
                if token.kind() == TokenKind::Newline {
                    "\n"
                } else {
                    token.text()
                }
            })
            .collect()
    }
}
