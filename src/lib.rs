//! # docmark-parser
//!
//! A parser for docmark documentation comments: `/** ... */` comments containing
//! a CommonMark-influenced micro-language of block tags (`@remarks`, `@param`),
//! modifier tags (`@internal`), inline tags (`{@link}`, `{@inheritDoc}`),
//! HTML-like tags, inline and fenced code, and declaration references.
//!
//! Parsing happens in three stages:
//!
//! 1. Line extraction strips the comment delimiters and yields content-line ranges.
//! 2. Tokenization converts those lines into a flat, typed token list.
//! 3. A recursive-descent node parser with backtracking builds a concrete syntax
//!    tree, followed by a paragraph-splitting post pass.
//!
//! Every node in the resulting tree carries an excerpt (a token-index range into
//! the shared token list), so the original comment body can be reconstructed
//! from the tree byte for byte. Malformed input never aborts the parse: local
//! grammar errors are recovered into `ErrorText` leaves and reported through a
//! structured message log.

#![allow(rustdoc::invalid_html_tags)]

pub mod docmark;
