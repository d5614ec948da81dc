//! Declaration reference and link content grammars
//!
//! Parses the `package/path#Member.chain(selector)` expressions used by
//! `{@link}` and `{@inheritDoc}`. These sub-grammars run on an embedded
//! reader scoped to the tag's content sequence and report problems as
//! [`Failure`]s; the enclosing tag turns a failure into an `ErrorText`
//! spanning the whole tag.
//!
//! Whether a prefix is present at all is decided by a `#` lookahead scan. A
//! destination that contains `/` or `@` but no `#` is reported as a distinct
//! "missing #" error; the triggering conditions of that heuristic are relied
//! on by downstream tooling and must not be changed.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{location_here, split_trailing_spacing, try_read_spacing_and_newlines, Failure};
use crate::docmark::ast::elements::reference::{
    DeclarationReference, MemberIdentifier, MemberReference, MemberSelector, MemberSymbol,
};
use crate::docmark::ast::elements::text::Particle;
use crate::docmark::lexing::sequence::{Excerpt, TokenSequence};
use crate::docmark::lexing::{TokenKind, TokenReader};

static PACKAGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(@[a-z0-9][a-z0-9._\-]*/)?[a-z0-9][a-z0-9._\-]*$").unwrap());

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9]*://").unwrap());

static VALID_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*://.+$").unwrap());

/// Heuristic: does a link destination look like a URL rather than a
/// declaration reference?
pub(crate) fn looks_like_url(text: &str) -> bool {
    text.starts_with("//") || URL_SCHEME.is_match(text)
}

pub(crate) fn is_valid_url(text: &str) -> bool {
    VALID_URL.is_match(text)
}

/// Parse a declaration reference starting at the reader's current position.
///
/// Stops at the first token that cannot continue the member chain; the caller
/// decides whether what follows is acceptable.
pub(crate) fn parse_declaration_reference(
    reader: &mut TokenReader,
) -> Result<DeclarationReference, Failure> {
    reader.assert_accumulated_is_empty();
    let start_marker = reader.mark();

    // Scan ahead for a "#" to decide whether a package/import prefix exists.
    let mut has_hash = false;
    let mut saw_path_characters = false;
    loop {
        match reader.peek_kind() {
            TokenKind::PoundSymbol => {
                has_hash = true;
                break;
            }
            TokenKind::Slash | TokenKind::AtSign => {
                saw_path_characters = true;
                reader.read_token();
            }
            TokenKind::EndOfInput
            | TokenKind::Newline
            | TokenKind::Spacing
            | TokenKind::Pipe
            | TokenKind::DoubleQuote
            | TokenKind::LeftCurlyBracket
            | TokenKind::RightCurlyBracket
            | TokenKind::LeftParenthesis
            | TokenKind::RightParenthesis
            | TokenKind::LeftSquareBracket
            | TokenKind::RightSquareBracket => break,
            _ => {
                reader.read_token();
            }
        }
    }
    let lookahead_end = reader.mark();
    reader.backtrack_to(start_marker);

    let mut package_name = None;
    let mut import_path = None;
    let mut import_hash = None;

    if has_hash {
        if reader.peek_kind() != TokenKind::PoundSymbol {
            let (package_seq, import_seq) = read_prefix(reader);
            if !package_seq.is_empty() {
                let text = package_seq.to_text();
                if !PACKAGE_NAME.is_match(&text) {
                    return Err(Failure::new(
                        "docmark-reference-malformed-package-name",
                        format!("The package name \"{}\" is not a valid package name", text),
                        package_seq,
                    ));
                }
                package_name = Some(Particle::from_content(package_seq));
            }
            if !import_seq.is_empty() {
                let text = import_seq.to_text();
                if text.ends_with('/') {
                    return Err(Failure::new(
                        "docmark-reference-malformed-import-path",
                        "An import path must not end with a \"/\"",
                        import_seq,
                    ));
                }
                import_path = Some(Particle::from_content(import_seq));
            }
        }
        reader.read_token(); // '#'
        import_hash = Some(Particle::from_content(reader.extract_accumulated()));
    } else if saw_path_characters {
        let location = reader.sequence_between(start_marker, lookahead_end);
        return Err(Failure::new(
            "docmark-reference-missing-hash",
            "The declaration reference appears to contain a package name or import path, \
             but it is missing the \"#\" delimiter",
            location,
        ));
    }

    // The member chain: the leading dot is omitted only for the first member.
    let mut members = Vec::new();
    loop {
        let starts_member = match reader.peek_kind() {
            TokenKind::AsciiWord
            | TokenKind::DoubleQuote
            | TokenKind::LeftSquareBracket
            | TokenKind::LeftParenthesis => true,
            TokenKind::OtherPunctuation => reader.peek_token().text() == "$",
            TokenKind::Period => !members.is_empty(),
            _ => false,
        };
        if !starts_member {
            break;
        }
        let member = parse_member_reference(reader, !members.is_empty())?;
        members.push(member);
    }

    if members.is_empty() {
        if let Some(hash) = &import_hash {
            return Err(Failure::new(
                "docmark-reference-missing-member",
                "Expecting a member reference after the \"#\" delimiter",
                hash.excerpt().content().clone(),
            ));
        }
        return Err(Failure::new(
            "docmark-reference-syntax",
            "Expecting a declaration reference",
            location_here(reader),
        ));
    }

    Ok(DeclarationReference::new(
        package_name,
        import_path,
        import_hash,
        members,
    ))
}

/// Consume the tokens before the `#` and split them into the package-name and
/// import-path parts. A scoped package keeps its `@scope/` slash; a prefix
/// beginning with `/` or `.` is entirely an import path.
fn read_prefix(reader: &mut TokenReader) -> (TokenSequence, TokenSequence) {
    let prefix_start = reader.mark();
    let mut split_marker = None;

    if matches!(reader.peek_kind(), TokenKind::Slash | TokenKind::Period) {
        split_marker = Some(prefix_start);
    }
    let scoped = reader.peek_kind() == TokenKind::AtSign;
    let mut seen_slashes = 0;

    while reader.peek_kind() != TokenKind::PoundSymbol {
        if reader.peek_kind() == TokenKind::Slash && split_marker.is_none() {
            seen_slashes += 1;
            if !(scoped && seen_slashes == 1) {
                split_marker = Some(reader.mark());
            }
        }
        reader.read_token();
    }
    let hash_marker = reader.mark();
    let _ = reader.try_extract_accumulated();

    let split = split_marker.unwrap_or(hash_marker);
    (
        reader.sequence_between(prefix_start, split),
        reader.sequence_between(split, hash_marker),
    )
}

fn parse_member_reference(
    reader: &mut TokenReader,
    expect_dot: bool,
) -> Result<MemberReference, Failure> {
    reader.assert_accumulated_is_empty();

    let mut dot = None;
    if expect_dot {
        if reader.peek_kind() != TokenKind::Period {
            return Err(Failure::new(
                "docmark-reference-syntax",
                "Expecting a period before the next member reference",
                location_here(reader),
            ));
        }
        reader.read_token();
        dot = Some(Particle::from_content(reader.extract_accumulated()));
    }

    let mut left_paren = None;
    if reader.peek_kind() == TokenKind::LeftParenthesis {
        reader.read_token();
        left_paren = Some(Particle::from_content(reader.extract_accumulated()));
    }

    let (identifier, symbol) = match reader.peek_kind() {
        TokenKind::AsciiWord | TokenKind::DoubleQuote => {
            (Some(parse_member_identifier(reader)?), None)
        }
        TokenKind::OtherPunctuation if reader.peek_token().text() == "$" => {
            (Some(parse_member_identifier(reader)?), None)
        }
        TokenKind::LeftSquareBracket => (None, Some(parse_member_symbol(reader)?)),
        _ => {
            return Err(Failure::new(
                "docmark-reference-missing-identifier",
                "Expecting an identifier or a \"[\" symbol reference",
                location_here(reader),
            ));
        }
    };

    let mut colon = None;
    let mut selector = None;
    let mut right_paren = None;

    if left_paren.is_some() {
        if reader.peek_kind() != TokenKind::Colon {
            return Err(Failure::new(
                "docmark-reference-missing-colon",
                "Expecting a colon after the identifier because the expression is in parentheses",
                location_here(reader),
            ));
        }
        reader.read_token();
        colon = Some(Particle::from_content(reader.extract_accumulated()));
        selector = Some(parse_member_selector(reader)?);
        if reader.peek_kind() != TokenKind::RightParenthesis {
            return Err(Failure::new(
                "docmark-reference-missing-right-paren",
                "Expecting a \")\" to close the selector expression",
                location_here(reader),
            ));
        }
        reader.read_token();
        right_paren = Some(Particle::from_content(reader.extract_accumulated()));
    } else if reader.peek_kind() == TokenKind::Colon {
        return Err(Failure::new(
            "docmark-reference-selector-missing-parens",
            "A member selector must be enclosed in parentheses",
            location_here(reader),
        ));
    }

    Ok(MemberReference::new(
        dot,
        left_paren,
        identifier,
        symbol,
        colon,
        selector,
        right_paren,
    ))
}

fn parse_member_identifier(reader: &mut TokenReader) -> Result<MemberIdentifier, Failure> {
    if reader.peek_kind() == TokenKind::DoubleQuote {
        reader.read_token();
        let left_quote = Particle::from_content(reader.extract_accumulated());
        loop {
            match reader.peek_kind() {
                TokenKind::DoubleQuote => break,
                TokenKind::EndOfInput | TokenKind::Newline => {
                    return Err(Failure::new(
                        "docmark-reference-missing-quote",
                        "The quoted identifier is missing its closing quote",
                        location_here(reader),
                    ));
                }
                _ => {
                    reader.read_token();
                }
            }
        }
        let identifier_seq = reader.try_extract_accumulated().ok_or_else(|| {
            Failure::new(
                "docmark-reference-empty-identifier",
                "A quoted identifier cannot be empty",
                location_here(reader),
            )
        })?;
        reader.read_token();
        let right_quote = Particle::from_content(reader.extract_accumulated());
        return Ok(MemberIdentifier::new(
            Some(left_quote),
            Particle::from_content(identifier_seq),
            Some(right_quote),
        ));
    }

    loop {
        match reader.peek_kind() {
            TokenKind::AsciiWord => {
                reader.read_token();
            }
            TokenKind::OtherPunctuation if reader.peek_token().text() == "$" => {
                reader.read_token();
            }
            _ => break,
        }
    }
    let identifier_seq = reader.extract_accumulated();
    Ok(MemberIdentifier::new(
        None,
        Particle::from_content(identifier_seq),
        None,
    ))
}

fn parse_member_symbol(reader: &mut TokenReader) -> Result<MemberSymbol, Failure> {
    reader.read_token(); // '['
    let left_bracket = Particle::from_content(reader.extract_accumulated());
    let reference = parse_declaration_reference(reader)?;
    if reader.peek_kind() != TokenKind::RightSquareBracket {
        return Err(Failure::new(
            "docmark-reference-missing-right-bracket",
            "Expecting a \"]\" to close the symbol reference",
            location_here(reader),
        ));
    }
    reader.read_token();
    let right_bracket = Particle::from_content(reader.extract_accumulated());
    Ok(MemberSymbol::new(left_bracket, reference, right_bracket))
}

fn parse_member_selector(reader: &mut TokenReader) -> Result<MemberSelector, Failure> {
    while reader.peek_kind() == TokenKind::AsciiWord {
        reader.read_token();
    }
    let sequence = reader.try_extract_accumulated().ok_or_else(|| {
        Failure::new(
            "docmark-reference-missing-selector",
            "Expecting a selector after the colon",
            location_here(reader),
        )
    })?;
    let selector = MemberSelector::new(Excerpt::from_content(sequence));
    if let Some(message) = selector.error_message() {
        return Err(Failure::new(
            "docmark-reference-selector-syntax",
            message.to_string(),
            selector.excerpt().content().clone(),
        ));
    }
    Ok(selector)
}

/// The parsed pieces of a `{@link}` tag's content.
pub(crate) struct LinkParts {
    pub url: Option<Particle>,
    pub destination: Option<DeclarationReference>,
    pub destination_spacing: Option<Particle>,
    pub pipe: Option<Particle>,
    pub link_text: Option<Particle>,
}

/// Parse `{@link}` content: a URL or declaration reference destination, then
/// an optional `| link text`.
pub(crate) fn parse_link_content(
    content: Option<&TokenSequence>,
    fallback_location: &TokenSequence,
) -> Result<LinkParts, Failure> {
    let content = match content {
        Some(sequence) if !sequence.is_empty() => sequence,
        _ => {
            return Err(Failure::new(
                "docmark-link-tag-empty-destination",
                "The @link tag content is missing",
                fallback_location.clone(),
            ));
        }
    };

    let mut reader = TokenReader::for_sequence(content);
    let text = content.to_text();
    let destination_text = match text.find('|') {
        Some(index) => &text[..index],
        None => &text[..],
    }
    .trim();

    let mut url = None;
    let mut destination = None;
    let mut destination_spacing = None;

    if looks_like_url(destination_text) {
        loop {
            match reader.peek_kind() {
                TokenKind::Pipe | TokenKind::EndOfInput => break,
                _ => {
                    reader.read_token();
                }
            }
        }
        let sequence = reader.extract_accumulated();
        let (content_part, spacing_part) = split_trailing_spacing(&sequence);
        let url_text = content_part.to_text();
        if !is_valid_url(&url_text) {
            return Err(Failure::new(
                "docmark-link-tag-invalid-url",
                format!(
                    "The @link URL \"{}\" is invalid: a URL must begin with a scheme \
                     followed by \"://\"",
                    url_text
                ),
                content_part,
            ));
        }
        let mut particle = Particle::from_content(content_part);
        if let Some(spacing) = spacing_part {
            particle.attach_spacing(spacing);
        }
        url = Some(particle);
    } else {
        destination = Some(parse_declaration_reference(&mut reader)?);
        if let Some(spacing) = try_read_spacing_and_newlines(&mut reader) {
            destination_spacing = Some(Particle::from_content(spacing));
        }
    }

    let mut pipe = None;
    let mut link_text = None;
    match reader.peek_kind() {
        TokenKind::EndOfInput => {}
        TokenKind::Pipe => {
            reader.read_token();
            let mut pipe_particle = Particle::from_content(reader.extract_accumulated());
            if let Some(spacing) = try_read_spacing_and_newlines(&mut reader) {
                pipe_particle.attach_spacing(spacing);
            }
            loop {
                match reader.peek_kind() {
                    TokenKind::EndOfInput => break,
                    TokenKind::Pipe => {
                        return Err(Failure::new(
                            "docmark-link-tag-unescaped-text",
                            "The \"|\" character may only be used once, to delimit the link text",
                            location_here(&reader),
                        ));
                    }
                    TokenKind::LeftCurlyBracket => {
                        return Err(Failure::new(
                            "docmark-link-tag-unescaped-text",
                            "The \"{\" character must be escaped with a backslash inside link text",
                            location_here(&reader),
                        ));
                    }
                    TokenKind::Backslash => {
                        reader.read_token();
                        if reader.peek_kind() != TokenKind::EndOfInput {
                            reader.read_token();
                        }
                    }
                    _ => {
                        reader.read_token();
                    }
                }
            }
            if let Some(sequence) = reader.try_extract_accumulated() {
                let (content_part, spacing_part) = split_trailing_spacing(&sequence);
                if !content_part.is_empty() {
                    let mut text_particle = Particle::from_content(content_part);
                    if let Some(spacing) = spacing_part {
                        text_particle.attach_spacing(spacing);
                    }
                    link_text = Some(text_particle);
                } else if let Some(spacing) = spacing_part {
                    // Only spacing after the pipe: keep it as a bare particle
                    // so the tag's tokens stay fully covered.
                    link_text = Some(Particle::from_content(spacing));
                }
            }
            pipe = Some(pipe_particle);
        }
        _ => {
            return Err(Failure::new(
                "docmark-link-tag-destination-syntax",
                "Unexpected character after the link destination",
                location_here(&reader),
            ));
        }
    }

    Ok(LinkParts {
        url,
        destination,
        destination_spacing,
        pipe,
        link_text,
    })
}

/// Parse `{@inheritDoc}` content: an optional declaration reference.
pub(crate) fn parse_inherit_doc_content(
    content: Option<&TokenSequence>,
) -> Result<(Option<DeclarationReference>, Option<Particle>), Failure> {
    let content = match content {
        Some(sequence) if !sequence.is_empty() => sequence,
        _ => return Ok((None, None)),
    };
    let mut reader = TokenReader::for_sequence(content);
    let reference = parse_declaration_reference(&mut reader)?;
    let spacing = try_read_spacing_and_newlines(&mut reader).map(Particle::from_content);
    if reader.peek_kind() != TokenKind::EndOfInput {
        return Err(Failure::new(
            "docmark-reference-syntax",
            "Unexpected character after the @inheritDoc declaration reference",
            location_here(&reader),
        ));
    }
    Ok((Some(reference), spacing))
}
