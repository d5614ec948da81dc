//! Lexing stages: comment-line extraction and tokenization
//!
//! The lexer runs in two stages. [`extractor`] strips the `/** ... */`
//! delimiters from a raw comment and yields the content-line ranges.
//! [`tokenizer`] then converts those lines into a flat token list, one line at
//! a time, appending a synthetic [`TokenKind::Newline`] per line and a single
//! [`TokenKind::EndOfInput`] sentinel at the end.
//!
//! Tokens never span a line break: the physical newline characters may be
//! discontinuous after delimiter stripping, so each line is tokenized
//! independently and the newline is represented by a zero-width virtual token.
//!
//! [`TokenKind::Newline`]: tokens::TokenKind::Newline
//! [`TokenKind::EndOfInput`]: tokens::TokenKind::EndOfInput

pub mod extractor;
pub mod reader;
pub mod sequence;
pub mod tokenizer;
pub mod tokens;

pub use extractor::{extract_lines, ExtractedComment};
pub use reader::{Marker, TokenReader};
pub use sequence::{Excerpt, TokenSequence};
pub use tokenizer::tokenize_lines;
pub use tokens::{Token, TokenKind};
