//! The recursive-descent node parser
//!
//! A single pass over the token list, dispatching on the current token kind
//! and building the comment tree bottom-up. The "current section" pointer is
//! redirected whenever a block tag begins, which is how flat token-level
//! parsing produces the nested block structure without a grouping pass.
//!
//! Recovery policy, applied uniformly: on a local grammar violation, backtrack
//! to a marker taken before the failed construct, consume the smallest span
//! that guarantees forward progress (at least one token), wrap it in an
//! `ErrorText` carrying the diagnostic, log the message, and resume top-level
//! dispatch.

use std::sync::Arc;

use super::{html, reference, try_read_spacing_and_newlines, Failure, ParserOptions};
use crate::docmark::ast::diagnostics::{MessageLog, Severity};
use crate::docmark::ast::elements::code::{CodeSpan, FencedCode};
use crate::docmark::ast::elements::comment::DocComment;
use crate::docmark::ast::elements::inlines::{InheritDocTag, InlineTag, LinkTag};
use crate::docmark::ast::elements::sections::{
    BlockTag, ParamBlock, ParamBlockKind, Paragraph, Section,
};
use crate::docmark::ast::elements::text::{ErrorText, EscapedText, Particle, PlainText, SoftBreak};
use crate::docmark::ast::nodes::{has_text_content, DocNode, DocNodeKind};
use crate::docmark::lexing::sequence::{Excerpt, TokenSequence};
use crate::docmark::lexing::{Marker, Token, TokenKind, TokenReader};
use crate::docmark::tags::{self, TagSyntaxKind};

/// Parse a tokenized comment body into a comment tree, then run the
/// post-parse validation checks.
pub(crate) fn parse_comment_body(
    tokens: Arc<[Token]>,
    options: &ParserOptions,
    log: &mut MessageLog,
) -> DocComment {
    let mut reader = TokenReader::new(tokens);
    let mut parser = NodeParser::new(options, log);
    parser.run(&mut reader);
    let comment = parser.finish();
    perform_validation_checks(&comment, log);
    comment
}

/// Where content nodes are currently being attached.
#[derive(Debug, Clone, Copy)]
enum CurrentTarget {
    Summary,
    Item(usize),
}

/// A root item under construction, in document order.
enum RootEntry {
    Section { tag: BlockTag, nodes: Vec<DocNode> },
    Param { block: ParamBlock, nodes: Vec<DocNode> },
    Modifier(BlockTag),
}

struct NodeParser<'a> {
    options: &'a ParserOptions,
    log: &'a mut MessageLog,
    summary_nodes: Vec<DocNode>,
    items: Vec<RootEntry>,
    inherit_doc: Option<InheritDocTag>,
    current: CurrentTarget,
}

impl<'a> NodeParser<'a> {
    fn new(options: &'a ParserOptions, log: &'a mut MessageLog) -> Self {
        Self {
            options,
            log,
            summary_nodes: Vec::new(),
            items: Vec::new(),
            inherit_doc: None,
            current: CurrentTarget::Summary,
        }
    }

    fn run(&mut self, reader: &mut TokenReader) {
        loop {
            match reader.peek_kind() {
                TokenKind::EndOfInput => break,
                TokenKind::Newline => {
                    self.push_accumulated_plain_text(reader);
                    reader.read_token();
                    let sequence = reader.extract_accumulated();
                    self.push(DocNode::SoftBreak(SoftBreak::new(Excerpt::from_content(
                        sequence,
                    ))));
                }
                TokenKind::Backslash => {
                    self.push_accumulated_plain_text(reader);
                    let node = self.parse_backslash_escape(reader);
                    self.push(node);
                }
                TokenKind::AtSign => {
                    self.push_accumulated_plain_text(reader);
                    self.parse_and_push_block_tag(reader);
                }
                TokenKind::LeftCurlyBracket => {
                    self.push_accumulated_plain_text(reader);
                    self.parse_and_push_inline_tag(reader);
                }
                TokenKind::RightCurlyBracket => {
                    self.push_accumulated_plain_text(reader);
                    let node = self.create_error(
                        reader,
                        "docmark-escape-right-brace",
                        "The \"}\" character should be escaped using a backslash with \"\\}\"",
                    );
                    self.push(node);
                }
                TokenKind::LessThan => {
                    self.push_accumulated_plain_text(reader);
                    self.parse_and_push_html(reader);
                }
                TokenKind::GreaterThan => {
                    self.push_accumulated_plain_text(reader);
                    let node = self.create_error(
                        reader,
                        "docmark-escape-greater-than",
                        "The \">\" character should be escaped using a backslash with \"\\>\"",
                    );
                    self.push(node);
                }
                TokenKind::Backtick => {
                    self.push_accumulated_plain_text(reader);
                    let node = if reader.peek_kind_after() == TokenKind::Backtick
                        && reader.peek_kind_after_after() == TokenKind::Backtick
                    {
                        self.parse_fenced_code(reader)
                    } else {
                        self.parse_code_span(reader)
                    };
                    self.push(node);
                }
                _ => {
                    reader.read_token();
                }
            }
        }
        self.push_accumulated_plain_text(reader);
    }

    fn finish(self) -> DocComment {
        let summary = Section::new(None, self.summary_nodes);
        let items = self
            .items
            .into_iter()
            .map(|entry| match entry {
                RootEntry::Section { tag, nodes } => DocNode::Section(Section::new(Some(tag), nodes)),
                RootEntry::Param { mut block, nodes } => {
                    block.content_mut().replace_children(nodes);
                    DocNode::ParamBlock(block)
                }
                RootEntry::Modifier(tag) => DocNode::BlockTag(tag),
            })
            .collect();
        DocComment::new(summary, self.inherit_doc, items)
    }

    // ------------------------------------------------------------------
    // Content routing
    // ------------------------------------------------------------------

    fn push(&mut self, node: DocNode) {
        let nodes = match self.current {
            CurrentTarget::Summary => &mut self.summary_nodes,
            CurrentTarget::Item(index) => match &mut self.items[index] {
                RootEntry::Section { nodes, .. } => nodes,
                RootEntry::Param { nodes, .. } => nodes,
                RootEntry::Modifier(_) => unreachable!("modifier tags never become the current section"),
            },
        };
        push_content(nodes, node);
    }

    fn push_accumulated_plain_text(&mut self, reader: &mut TokenReader) {
        if let Some(sequence) = reader.try_extract_accumulated() {
            self.push(DocNode::PlainText(PlainText::new(Excerpt::from_content(
                sequence,
            ))));
        }
    }

    // ------------------------------------------------------------------
    // Error recovery helpers
    // ------------------------------------------------------------------

    fn make_error_node(
        &mut self,
        code: &'static str,
        message: String,
        excerpt: Excerpt,
        error_location: TokenSequence,
    ) -> DocNode {
        let node = ErrorText::new(excerpt, code, message, error_location);
        self.log.add_for_error_text(&node);
        DocNode::ErrorText(node)
    }

    /// Consume exactly one token and wrap it in an `ErrorText`.
    fn create_error(
        &mut self,
        reader: &mut TokenReader,
        code: &'static str,
        message: &str,
    ) -> DocNode {
        reader.read_token();
        let sequence = reader.extract_accumulated();
        self.make_error_node(
            code,
            message.to_string(),
            Excerpt::from_content(sequence.clone()),
            sequence,
        )
    }

    fn backtrack_and_create_error(
        &mut self,
        reader: &mut TokenReader,
        marker: Marker,
        code: &'static str,
        message: &str,
    ) -> DocNode {
        reader.backtrack_to(marker);
        self.create_error(reader, code, message)
    }

    /// Backtrack to `marker` and consume tokens up to `end` as one error span.
    fn backtrack_and_create_error_span(
        &mut self,
        reader: &mut TokenReader,
        marker: Marker,
        end: Marker,
        code: &'static str,
        message: &str,
    ) -> DocNode {
        reader.backtrack_to(marker);
        while reader.current_index() < end.0 {
            reader.read_token();
        }
        let sequence = reader.extract_accumulated();
        self.make_error_node(
            code,
            message.to_string(),
            Excerpt::from_content(sequence.clone()),
            sequence,
        )
    }

    /// Consume everything between `marker` and the current position as one
    /// error span (at least one token, so the loop always makes progress).
    fn backtrack_consume_to_here(
        &mut self,
        reader: &mut TokenReader,
        marker: Marker,
        code: &'static str,
        message: &str,
        error_location: Option<TokenSequence>,
    ) -> DocNode {
        let here = reader.mark();
        if here.0 == marker.0 {
            reader.backtrack_to(marker);
            return self.create_error(reader, code, message);
        }
        reader.backtrack_to(marker);
        while reader.current_index() < here.0 {
            reader.read_token();
        }
        let sequence = reader.extract_accumulated();
        let location = error_location.unwrap_or_else(|| sequence.clone());
        self.make_error_node(code, message.to_string(), Excerpt::from_content(sequence), location)
    }

    // ------------------------------------------------------------------
    // Escapes
    // ------------------------------------------------------------------

    fn parse_backslash_escape(&mut self, reader: &mut TokenReader) -> DocNode {
        reader.assert_accumulated_is_empty();
        let marker = reader.mark();
        reader.read_token(); // backslash

        match reader.peek_kind() {
            TokenKind::EndOfInput | TokenKind::Newline => self.backtrack_and_create_error(
                reader,
                marker,
                "docmark-unnecessary-backslash",
                "A backslash must precede another character",
            ),
            kind if kind.is_punctuation() => {
                let escaped = reader.read_token();
                let decoded = escaped.text().to_string();
                let sequence = reader.extract_accumulated();
                DocNode::EscapedText(EscapedText::new(Excerpt::from_content(sequence), decoded))
            }
            _ => self.backtrack_and_create_error(
                reader,
                marker,
                "docmark-unnecessary-backslash",
                "A backslash can only be used to escape a punctuation character",
            ),
        }
    }

    // ------------------------------------------------------------------
    // Block tags
    // ------------------------------------------------------------------

    fn parse_and_push_block_tag(&mut self, reader: &mut TokenReader) {
        let tag = match self.parse_block_tag(reader) {
            Ok(tag) => tag,
            Err(error_node) => {
                self.push(error_node);
                return;
            }
        };

        let tag_sequence = tag.excerpt().content().clone();
        self.validate_tag_definition(
            tag.name().to_string(),
            tag.name_upper().to_string(),
            &tag_sequence,
            DocNodeKind::BlockTag,
        );

        match tag.name_upper() {
            "@PARAM" => self.parse_and_push_param_block(reader, tag, ParamBlockKind::Param),
            "@TYPEPARAM" => self.parse_and_push_param_block(reader, tag, ParamBlockKind::TypeParam),
            _ => {
                let syntax_kind = self
                    .options
                    .tags
                    .try_get(tag.name_upper())
                    .map(|definition| definition.syntax_kind());
                match syntax_kind {
                    Some(TagSyntaxKind::Modifier) => {
                        self.items.push(RootEntry::Modifier(tag));
                    }
                    Some(TagSyntaxKind::Inline) => {
                        self.log.add_for_token_sequence(
                            "docmark-inline-tag-missing-braces",
                            Severity::Warning,
                            format!(
                                "The tag \"{}\" is an inline tag; it must be enclosed in \
                                 \"{{ }}\" braces",
                                tag.name()
                            ),
                            &tag_sequence,
                            Some(DocNodeKind::BlockTag),
                        );
                        self.push(DocNode::BlockTag(tag));
                    }
                    _ => {
                        self.items.push(RootEntry::Section {
                            tag,
                            nodes: Vec::new(),
                        });
                        self.current = CurrentTarget::Item(self.items.len() - 1);
                    }
                }
            }
        }
    }

    fn parse_block_tag(&mut self, reader: &mut TokenReader) -> Result<BlockTag, DocNode> {
        reader.assert_accumulated_is_empty();
        let marker = reader.mark();
        reader.read_token(); // '@'

        if reader.peek_kind() != TokenKind::AsciiWord {
            return Err(self.backtrack_and_create_error(
                reader,
                marker,
                "docmark-at-sign-without-tag-name",
                "Expecting a tag name after the \"@\" character (or use a backslash to escape \
                 this character)",
            ));
        }
        reader.read_token();
        let sequence = reader.extract_accumulated();
        let name = sequence.to_text();
        if !tags::is_valid_tag_name(&name) {
            let message = format!(
                "The tag name \"{}\" must start with a letter and contain only letters and numbers",
                name
            );
            return Err(self.backtrack_consume_to_here(
                reader,
                marker,
                "docmark-malformed-tag-name",
                &message,
                None,
            ));
        }
        Ok(BlockTag::new(Excerpt::from_content(sequence)))
    }

    fn parse_and_push_param_block(
        &mut self,
        reader: &mut TokenReader,
        mut tag: BlockTag,
        kind: ParamBlockKind,
    ) {
        if let Some(spacing) = try_read_spacing_and_newlines(reader) {
            tag.attach_spacing(spacing);
        }
        let start_marker = reader.mark();

        // Parameter name: words, dots, and "$" read verbatim.
        let mut parameter_name = String::new();
        loop {
            match reader.peek_kind() {
                TokenKind::AsciiWord | TokenKind::Period => {
                    parameter_name.push_str(reader.read_token().text());
                }
                TokenKind::OtherPunctuation if reader.peek_token().text() == "$" => {
                    parameter_name.push_str(reader.read_token().text());
                }
                _ => break,
            }
        }

        if parameter_name.is_empty() {
            let message = format!(
                "The {} block should be followed by a parameter name",
                tag.name()
            );
            self.log.add_for_token_sequence(
                "docmark-param-tag-missing-name",
                Severity::Error,
                message,
                tag.excerpt().content(),
                Some(DocNodeKind::ParamBlock),
            );
            reader.backtrack_to(start_marker);
            self.push_param_entry(ParamBlock::new(tag, kind, String::new(), None, None));
            return;
        }

        let name_sequence = reader.extract_accumulated();
        let mut name_particle = Particle::from_content(name_sequence);
        if let Some(spacing) = try_read_spacing_and_newlines(reader) {
            name_particle.attach_spacing(spacing);
        }

        if reader.peek_kind() != TokenKind::Hyphen {
            let message = format!(
                "The {} block should be followed by a parameter name and then a hyphen",
                tag.name()
            );
            self.log.add_for_token_sequence(
                "docmark-param-tag-missing-hyphen",
                Severity::Error,
                message,
                tag.excerpt().content(),
                Some(DocNodeKind::ParamBlock),
            );
            reader.backtrack_to(start_marker);
            self.push_param_entry(ParamBlock::new(tag, kind, String::new(), None, None));
            return;
        }
        reader.read_token();
        let mut hyphen_particle = Particle::from_content(reader.extract_accumulated());
        if let Some(spacing) = try_read_spacing_and_newlines(reader) {
            hyphen_particle.attach_spacing(spacing);
        }

        self.push_param_entry(ParamBlock::new(
            tag,
            kind,
            parameter_name,
            Some(name_particle),
            Some(hyphen_particle),
        ));
    }

    fn push_param_entry(&mut self, block: ParamBlock) {
        self.items.push(RootEntry::Param {
            block,
            nodes: Vec::new(),
        });
        self.current = CurrentTarget::Item(self.items.len() - 1);
    }

    fn validate_tag_definition(
        &mut self,
        name: String,
        name_upper: String,
        sequence: &TokenSequence,
        node_kind: DocNodeKind,
    ) {
        match self.options.tags.try_get(&name_upper) {
            Some(definition) => {
                if self.options.report_unsupported_tags && !definition.is_supported() {
                    self.log.add_for_token_sequence(
                        "docmark-unsupported-tag",
                        Severity::Warning,
                        format!("The tag \"{}\" is not supported by this tool", name),
                        sequence,
                        Some(node_kind),
                    );
                }
            }
            None => {
                if !self.options.ignore_undefined_tags {
                    self.log.add_for_token_sequence(
                        "docmark-undefined-tag",
                        Severity::Warning,
                        format!("The tag \"{}\" is not defined in this configuration", name),
                        sequence,
                        Some(node_kind),
                    );
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Inline tags
    // ------------------------------------------------------------------

    fn parse_and_push_inline_tag(&mut self, reader: &mut TokenReader) {
        reader.assert_accumulated_is_empty();
        let marker = reader.mark();
        reader.read_token(); // '{'
        let opening_sequence = reader.extract_accumulated();

        if reader.peek_kind() != TokenKind::AtSign {
            let node = self.backtrack_and_create_error(
                reader,
                marker,
                "docmark-malformed-inline-tag",
                "Expecting a tag starting with \"{@\"",
            );
            self.push(node);
            return;
        }
        reader.read_token(); // '@'

        if reader.peek_kind() != TokenKind::AsciiWord {
            let node = self.backtrack_and_create_error_span(
                reader,
                marker,
                Marker(marker.0 + 2),
                "docmark-malformed-inline-tag",
                "Expecting an inline tag name after the \"{@\" characters",
            );
            self.push(node);
            return;
        }
        reader.read_token();
        let tag_name_sequence = reader.extract_accumulated();
        let name = tag_name_sequence.to_text();
        if !tags::is_valid_tag_name(&name) {
            let message = format!(
                "The tag name \"{}\" must start with a letter and contain only letters and numbers",
                name
            );
            let node = self.backtrack_consume_to_here(
                reader,
                marker,
                "docmark-malformed-tag-name",
                &message,
                None,
            );
            self.push(node);
            return;
        }
        let mut tag_name_particle = Particle::from_content(tag_name_sequence.clone());
        let spacing = try_read_spacing_and_newlines(reader);
        let had_spacing = spacing.is_some();
        if let Some(spacing) = spacing {
            tag_name_particle.attach_spacing(spacing);
        }
        if !had_spacing && reader.peek_kind() != TokenKind::RightCurlyBracket {
            let node = self.backtrack_consume_to_here(
                reader,
                marker,
                "docmark-malformed-inline-tag",
                "Expecting a space after the inline tag name",
                None,
            );
            self.push(node);
            return;
        }

        // Tag content: read up to the matching "}"; an unescaped "{" is not
        // allowed inside.
        loop {
            match reader.peek_kind() {
                TokenKind::EndOfInput => {
                    let node = self.backtrack_consume_to_here(
                        reader,
                        marker,
                        "docmark-inline-tag-missing-right-brace",
                        "The inline tag is missing its closing \"}\"",
                        None,
                    );
                    self.push(node);
                    return;
                }
                TokenKind::Backslash => {
                    reader.read_token();
                    if reader.peek_kind() != TokenKind::EndOfInput {
                        reader.read_token();
                    }
                }
                TokenKind::LeftCurlyBracket => {
                    let node = self.backtrack_consume_to_here(
                        reader,
                        marker,
                        "docmark-inline-tag-unescaped-brace",
                        "The \"{\" character must be escaped with a backslash when used inside \
                         an inline tag",
                        None,
                    );
                    self.push(node);
                    return;
                }
                TokenKind::RightCurlyBracket => break,
                _ => {
                    reader.read_token();
                }
            }
        }
        let content_sequence = reader.try_extract_accumulated();
        reader.read_token(); // '}'
        let closing_sequence = reader.extract_accumulated();

        let opening = Particle::from_content(opening_sequence);
        let closing = Particle::from_content(closing_sequence);
        let name_upper = name.to_uppercase();

        self.validate_tag_definition(
            name.clone(),
            name_upper.clone(),
            &tag_name_sequence,
            DocNodeKind::InlineTag,
        );
        if let Some(definition) = self.options.tags.try_get(&name_upper) {
            if matches!(
                definition.syntax_kind(),
                TagSyntaxKind::Block | TagSyntaxKind::Modifier
            ) {
                self.log.add_for_token_sequence(
                    "docmark-tag-should-not-have-braces",
                    Severity::Warning,
                    format!(
                        "The tag \"{}\" is not an inline tag; it must not be enclosed in \
                         \"{{ }}\" braces",
                        name
                    ),
                    &tag_name_sequence,
                    Some(DocNodeKind::InlineTag),
                );
            }
        }

        match name_upper.as_str() {
            "@INHERITDOC" => {
                match reference::parse_inherit_doc_content(content_sequence.as_ref()) {
                    Ok((declaration, spacing)) => {
                        let tag = InheritDocTag::new(
                            opening,
                            tag_name_particle,
                            declaration,
                            spacing,
                            closing,
                        );
                        if self.inherit_doc.is_some() {
                            let sequence = reader.sequence_between(marker, reader.mark());
                            let node = self.make_error_node(
                                "docmark-extra-inheritdoc-tag",
                                "A doc comment cannot have more than one @inheritDoc tag"
                                    .to_string(),
                                Excerpt::from_content(sequence.clone()),
                                sequence,
                            );
                            self.push(node);
                        } else {
                            self.inherit_doc = Some(tag);
                        }
                    }
                    Err(failure) => self.push_failed_tag(reader, marker, failure),
                }
            }
            "@LINK" => {
                match reference::parse_link_content(
                    content_sequence.as_ref(),
                    &tag_name_sequence,
                ) {
                    Ok(parts) => {
                        self.push(DocNode::LinkTag(LinkTag::new(
                            opening,
                            tag_name_particle,
                            parts.url,
                            parts.destination,
                            parts.destination_spacing,
                            parts.pipe,
                            parts.link_text,
                            closing,
                        )));
                    }
                    Err(failure) => self.push_failed_tag(reader, marker, failure),
                }
            }
            _ => {
                let content = content_sequence.map(Particle::from_content);
                self.push(DocNode::InlineTag(InlineTag::new(
                    opening,
                    tag_name_particle,
                    content,
                    closing,
                )));
            }
        }
    }

    /// Turn a failed specialized inline tag into an `ErrorText` spanning the
    /// whole tag, keeping the inner failure's message and location.
    fn push_failed_tag(&mut self, reader: &mut TokenReader, marker: Marker, failure: Failure) {
        let sequence = reader.sequence_between(marker, reader.mark());
        let node = self.make_error_node(
            failure.code,
            failure.message,
            Excerpt::from_content(sequence),
            failure.location,
        );
        self.push(node);
    }

    // ------------------------------------------------------------------
    // HTML
    // ------------------------------------------------------------------

    fn parse_and_push_html(&mut self, reader: &mut TokenReader) {
        reader.assert_accumulated_is_empty();
        let marker = reader.mark();
        let is_end_tag = reader.peek_kind_after() == TokenKind::Slash;

        let result = if is_end_tag {
            html::parse_html_end_tag(reader).map(DocNode::HtmlEndTag)
        } else {
            html::parse_html_start_tag(reader).map(DocNode::HtmlStartTag)
        };

        match result {
            Ok(node) => self.push(node),
            Err(failure) => {
                let prefix = if is_end_tag {
                    "The HTML end tag has invalid syntax: "
                } else {
                    "The HTML tag has invalid syntax: "
                };
                let message = format!("{}{}", prefix, failure.message);
                let node = self.backtrack_consume_to_here(
                    reader,
                    marker,
                    failure.code,
                    &message,
                    Some(failure.location),
                );
                self.push(node);
            }
        }
    }

    // ------------------------------------------------------------------
    // Code spans and fences
    // ------------------------------------------------------------------

    fn parse_code_span(&mut self, reader: &mut TokenReader) -> DocNode {
        reader.assert_accumulated_is_empty();
        let marker = reader.mark();
        reader.read_token(); // backtick
        let opening = Particle::from_content(reader.extract_accumulated());

        loop {
            match reader.peek_kind() {
                TokenKind::Backtick => break,
                TokenKind::EndOfInput => {
                    return self.backtrack_consume_to_here(
                        reader,
                        marker,
                        "docmark-code-span-missing-delimiter",
                        "The code span is missing its closing backtick",
                        None,
                    );
                }
                TokenKind::Newline => {
                    return self.backtrack_consume_to_here(
                        reader,
                        marker,
                        "docmark-code-span-missing-delimiter",
                        "The code span cannot contain a newline",
                        None,
                    );
                }
                _ => {
                    reader.read_token();
                }
            }
        }
        let code_sequence = reader
            .try_extract_accumulated()
            .unwrap_or_else(|| reader.empty_sequence_here());
        let code = Particle::from_content(code_sequence);
        reader.read_token(); // closing backtick
        let closing = Particle::from_content(reader.extract_accumulated());
        DocNode::CodeSpan(CodeSpan::new(opening, code, closing))
    }

    fn parse_fenced_code(&mut self, reader: &mut TokenReader) -> DocNode {
        reader.assert_accumulated_is_empty();
        let marker = reader.mark();

        let at_line_start = marker.0 == reader.start_index()
            || reader.token_array()[marker.0 - 1].kind() == TokenKind::Newline;
        if !at_line_start {
            return self.backtrack_and_create_error_span(
                reader,
                marker,
                Marker(marker.0 + 3),
                "docmark-code-fence-opening-indent",
                "The opening backtick for a code fence must appear at the start of the line",
            );
        }

        reader.read_token();
        reader.read_token();
        reader.read_token();
        let mut opening = Particle::from_content(reader.extract_accumulated());

        // Language specifier: everything up to the end of the line.
        loop {
            match reader.peek_kind() {
                TokenKind::Newline => break,
                TokenKind::EndOfInput => {
                    return self.backtrack_consume_to_here(
                        reader,
                        marker,
                        "docmark-code-fence-missing-delimiter",
                        "The code fence is missing its closing delimiter (\"```\")",
                        None,
                    );
                }
                TokenKind::Backtick => {
                    return self.backtrack_consume_to_here(
                        reader,
                        marker,
                        "docmark-code-fence-specifier-syntax",
                        "The language specifier cannot contain backtick characters",
                        None,
                    );
                }
                _ => {
                    reader.read_token();
                }
            }
        }
        reader.read_token(); // the newline ending the opening fence line
        let specifier_sequence = reader.extract_accumulated();
        let (language_content, language_spacing) = super::split_trailing_spacing(&specifier_sequence);
        let language = if language_content.is_empty() {
            opening.attach_spacing(specifier_sequence);
            None
        } else {
            let mut particle = Particle::from_content(language_content);
            if let Some(spacing) = language_spacing {
                particle.attach_spacing(spacing);
            }
            Some(particle)
        };

        // Code lines, until a line that starts with the closing fence.
        let mut at_line_start = true;
        loop {
            if at_line_start {
                if reader.peek_kind() == TokenKind::Backtick
                    && reader.peek_kind_after() == TokenKind::Backtick
                    && reader.peek_kind_after_after() == TokenKind::Backtick
                {
                    break;
                }
                if reader.peek_kind() == TokenKind::Spacing
                    && reader.peek_kind_after() == TokenKind::Backtick
                    && reader.peek_kind_after_after() == TokenKind::Backtick
                {
                    let indent_start = reader.mark();
                    reader.read_token(); // the indentation, kept in the code excerpt
                    if reader.peek_kind() == TokenKind::Backtick
                        && reader.peek_kind_after() == TokenKind::Backtick
                        && reader.peek_kind_after_after() == TokenKind::Backtick
                    {
                        let indent = reader.sequence_between(indent_start, reader.mark());
                        self.log.add_for_token_sequence(
                            "docmark-code-fence-closing-indent",
                            Severity::Warning,
                            "The closing delimiter for a code fence must not be indented"
                                .to_string(),
                            &indent,
                            Some(DocNodeKind::FencedCode),
                        );
                        break;
                    }
                    at_line_start = false;
                    continue;
                }
            }
            match reader.peek_kind() {
                TokenKind::EndOfInput => {
                    return self.backtrack_consume_to_here(
                        reader,
                        marker,
                        "docmark-code-fence-missing-delimiter",
                        "The code fence is missing its closing delimiter (\"```\")",
                        None,
                    );
                }
                TokenKind::Newline => {
                    reader.read_token();
                    at_line_start = true;
                }
                _ => {
                    reader.read_token();
                    at_line_start = false;
                }
            }
        }
        let code_sequence = reader
            .try_extract_accumulated()
            .unwrap_or_else(|| reader.empty_sequence_here());
        let code = Particle::from_content(code_sequence);

        reader.read_token();
        reader.read_token();
        reader.read_token();
        let mut closing = Particle::from_content(reader.extract_accumulated());
        // Trailing spacing on the closing-fence line, including its newline.
        while reader.peek_kind() == TokenKind::Spacing {
            reader.read_token();
        }
        if reader.peek_kind() == TokenKind::Newline {
            reader.read_token();
        }
        if let Some(spacing) = reader.try_extract_accumulated() {
            closing.attach_spacing(spacing);
        }

        DocNode::FencedCode(FencedCode::new(opening, language, code, closing))
    }
}

/// Fenced code attaches at section level; everything else flows into the
/// trailing paragraph.
fn push_content(nodes: &mut Vec<DocNode>, node: DocNode) {
    if matches!(node, DocNode::FencedCode(_)) {
        nodes.push(node);
        return;
    }
    if let Some(DocNode::Paragraph(paragraph)) = nodes.last_mut() {
        paragraph.push(node);
        return;
    }
    nodes.push(DocNode::Paragraph(Paragraph::new(vec![node])));
}

/// The post-parse validation pass.
pub(crate) fn perform_validation_checks(comment: &DocComment, log: &mut MessageLog) {
    if let Some(deprecated) = comment.deprecated_block() {
        if !section_has_content(deprecated) {
            if let Some(tag) = deprecated.block_tag() {
                log.add_for_token_sequence(
                    "docmark-missing-deprecation-message",
                    Severity::Error,
                    "The @deprecated block must include a deprecation message, e.g. describing \
                     the recommended alternative"
                        .to_string(),
                    tag.excerpt().content(),
                    Some(DocNodeKind::Section),
                );
            }
        }
    }

    if let Some(inherit_doc) = comment.inherit_doc_tag() {
        if let Some(remarks) = comment.remarks_block() {
            if let Some(tag) = remarks.block_tag() {
                log.add_for_token_sequence(
                    "docmark-inheritdoc-incompatible-tag",
                    Severity::Error,
                    "A \"@remarks\" block must not be used, because that content is provided \
                     by the @inheritDoc tag"
                        .to_string(),
                    tag.excerpt().content(),
                    Some(DocNodeKind::Section),
                );
            }
        }
        if section_has_content(comment.summary_section()) {
            log.add_for_token_sequence(
                "docmark-inheritdoc-incompatible-summary",
                Severity::Error,
                "The summary section must not have any content, because that content is \
                 provided by the @inheritDoc tag"
                    .to_string(),
                inherit_doc.tag_name_particle().excerpt().content(),
                Some(DocNodeKind::InheritDocTag),
            );
        }
    }
}

fn section_has_content(section: &Section) -> bool {
    section
        .children()
        .iter()
        .any(|child| has_text_content(child.as_node_ref()))
}
