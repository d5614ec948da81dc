//! HTML tag sub-grammar
//!
//! Start tags (`<name attr="value">`, `<name />`) and end tags (`</name>`).
//! These parsers consume tokens optimistically and report problems as
//! [`Failure`]s; the node parser backtracks and wraps the consumed span in an
//! `ErrorText` whose message carries the inner failure detail.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{location_here, try_read_spacing_and_newlines, Failure};
use crate::docmark::ast::elements::html::{HtmlAttribute, HtmlEndTag, HtmlStartTag};
use crate::docmark::ast::elements::text::Particle;
use crate::docmark::lexing::{TokenKind, TokenReader};

static HTML_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]([a-zA-Z0-9\-]*[a-zA-Z0-9])?$").unwrap());

/// Parse `<name attr="value" ... >` or `<name ... />`. The caller has already
/// checked that the current token is `<` and the next is not `/`.
pub(crate) fn parse_html_start_tag(reader: &mut TokenReader) -> Result<HtmlStartTag, Failure> {
    reader.assert_accumulated_is_empty();
    reader.read_token(); // '<'
    let opening = Particle::from_content(reader.extract_accumulated());

    let name = parse_html_name(reader)?;

    let mut attributes = Vec::new();
    while reader.peek_kind() == TokenKind::AsciiWord {
        attributes.push(parse_html_attribute(reader)?);
    }

    let mut self_closing_slash = None;
    if reader.peek_kind() == TokenKind::Slash {
        reader.read_token();
        self_closing_slash = Some(Particle::from_content(reader.extract_accumulated()));
    }

    if reader.peek_kind() != TokenKind::GreaterThan {
        return Err(Failure::new(
            "docmark-html-tag-missing-greater-than",
            "Expecting an attribute or \">\" or \"/>\"",
            location_here(reader),
        ));
    }
    reader.read_token();
    let closing = Particle::from_content(reader.extract_accumulated());

    Ok(HtmlStartTag::new(
        opening,
        name,
        attributes,
        self_closing_slash,
        closing,
    ))
}

/// Parse `</name>`. The caller has already checked the `<` `/` lookahead.
pub(crate) fn parse_html_end_tag(reader: &mut TokenReader) -> Result<HtmlEndTag, Failure> {
    reader.assert_accumulated_is_empty();
    reader.read_token(); // '<'
    reader.read_token(); // '/'
    let opening = Particle::from_content(reader.extract_accumulated());

    let name = parse_html_name(reader)?;

    if reader.peek_kind() != TokenKind::GreaterThan {
        return Err(Failure::new(
            "docmark-html-tag-missing-greater-than",
            "Expecting \">\" to close the HTML end tag",
            location_here(reader),
        ));
    }
    reader.read_token();
    let closing = Particle::from_content(reader.extract_accumulated());

    Ok(HtmlEndTag::new(opening, name, closing))
}

/// An HTML name: letters, digits, and interior hyphens, with any trailing
/// spacing attached to the returned particle.
fn parse_html_name(reader: &mut TokenReader) -> Result<Particle, Failure> {
    if reader.peek_kind() == TokenKind::Spacing {
        return Err(Failure::new(
            "docmark-malformed-html-name",
            "A space is not allowed here",
            location_here(reader),
        ));
    }

    let mut any = false;
    loop {
        match reader.peek_kind() {
            TokenKind::AsciiWord | TokenKind::Hyphen => {
                reader.read_token();
                any = true;
            }
            _ => break,
        }
    }
    if !any {
        return Err(Failure::new(
            "docmark-html-tag-missing-name",
            "Expecting an HTML name",
            location_here(reader),
        ));
    }

    let sequence = reader.extract_accumulated();
    let text = sequence.to_text();
    if !HTML_NAME.is_match(&text) {
        return Err(Failure::new(
            "docmark-malformed-html-name",
            format!(
                "The HTML name \"{}\" must be an ASCII letter followed by letters, digits, \
                 and hyphens",
                text
            ),
            sequence,
        ));
    }

    let mut particle = Particle::from_content(sequence);
    if let Some(spacing) = try_read_spacing_and_newlines(reader) {
        particle.attach_spacing(spacing);
    }
    Ok(particle)
}

fn parse_html_attribute(reader: &mut TokenReader) -> Result<HtmlAttribute, Failure> {
    let name = parse_html_name(reader)?;

    if reader.peek_kind() != TokenKind::Equals {
        return Err(Failure::new(
            "docmark-html-tag-missing-equals",
            "Expecting \"=\" after the HTML attribute name",
            location_here(reader),
        ));
    }
    reader.read_token();
    let mut equals = Particle::from_content(reader.extract_accumulated());
    if let Some(spacing) = try_read_spacing_and_newlines(reader) {
        equals.attach_spacing(spacing);
    }

    let (value, value_text) = parse_html_string(reader)?;
    Ok(HtmlAttribute::new(name, equals, value, value_text))
}

/// A quoted attribute value. Single and double quotes are both accepted; the
/// returned particle covers the quotes, and the string value excludes them.
fn parse_html_string(reader: &mut TokenReader) -> Result<(Particle, String), Failure> {
    let single_quoted = reader.peek_kind() == TokenKind::OtherPunctuation
        && reader.peek_token().text() == "'";
    if reader.peek_kind() != TokenKind::DoubleQuote && !single_quoted {
        return Err(Failure::new(
            "docmark-html-tag-missing-string",
            "Expecting an HTML string enclosed in quotes",
            location_here(reader),
        ));
    }
    reader.read_token(); // opening quote

    let mut value_text = String::new();
    loop {
        let at_closing_quote = if single_quoted {
            reader.peek_kind() == TokenKind::OtherPunctuation && reader.peek_token().text() == "'"
        } else {
            reader.peek_kind() == TokenKind::DoubleQuote
        };
        if at_closing_quote {
            break;
        }
        match reader.peek_kind() {
            TokenKind::EndOfInput | TokenKind::Newline => {
                return Err(Failure::new(
                    "docmark-html-string-missing-quote",
                    "The HTML string is missing its closing quote",
                    location_here(reader),
                ));
            }
            _ => {
                value_text.push_str(reader.read_token().text());
            }
        }
    }
    reader.read_token(); // closing quote

    let sequence = reader.extract_accumulated();
    let mut particle = Particle::from_content(sequence);
    let spacing = try_read_spacing_and_newlines(reader);
    let had_spacing = spacing.is_some();
    if let Some(spacing) = spacing {
        particle.attach_spacing(spacing);
    }

    // An HTML string must be followed by a boundary, not more text.
    if !had_spacing
        && matches!(
            reader.peek_kind(),
            TokenKind::AsciiWord | TokenKind::DoubleQuote
        )
    {
        return Err(Failure::new(
            "docmark-text-after-html-string",
            "The HTML string must be followed by spacing or the end of the tag",
            location_here(reader),
        ));
    }

    Ok((particle, value_text))
}
