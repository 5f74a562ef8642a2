//! Owned, immutable JSON document.
//!
//! A [`DocumentTree`] is built once from text and never changes afterwards. Every
//! [`NodeView`] borrows from the tree it came from, so views cannot outlive it.

use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::node::{self, Node};
use crate::core::options::ParseOptions;
use crate::core::view::NodeView;
use crate::json::parse::{self, ParseFailureCategory};

const PARSE_CONTEXT: &str = "document.parse";

#[derive(Clone, Debug, PartialEq)]
pub struct DocumentTree {
    root: Node,
}

impl DocumentTree {
    /// Parses `text` with default [`ParseOptions`].
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, &ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self, Error> {
        if text.len() > options.max_input_bytes {
            debug!(
                bytes = text.len(),
                limit = options.max_input_bytes,
                "json input rejected before parse"
            );
            return Err(parse_error(ParseFailureCategory::InputTooLarge).with_message(format!(
                "input is too large ({} bytes, limit {})",
                text.len(),
                options.max_input_bytes
            )));
        }

        parse::check_nesting(text.as_bytes(), options.max_depth).map_err(|err| {
            debug!(
                limit = err.max_depth,
                offset = err.offset,
                "json nesting depth exceeded before parse"
            );
            parse_error(ParseFailureCategory::DepthLimit)
                .with_message(format!("nesting depth exceeds limit of {}", err.max_depth))
                .with_source(err)
        })?;

        let value: Value = match parse::from_str_with(text, options.backend) {
            Ok(value) => value,
            Err(err) => {
                let category = parse::categorize_error(&*err);
                debug!(
                    backend = %options.backend,
                    category = category.label(),
                    "json parse failed"
                );
                return Err(Error::new(ErrorKind::Parse)
                    .with_message("can't parse JSON")
                    .with_hint(parse::hint_for_error(&*err, PARSE_CONTEXT))
                    .with_boxed_source(err));
            }
        };

        let root = node::lower(value, options.max_depth).map_err(|exceeded| {
            debug!(limit = exceeded.max_depth, "json nesting depth exceeded");
            parse_error(ParseFailureCategory::DepthLimit).with_message(format!(
                "nesting depth exceeds limit of {}",
                exceeded.max_depth
            ))
        })?;

        debug!(
            backend = %options.backend,
            bytes = text.len(),
            root = %root.tag(),
            "parsed json document"
        );
        Ok(Self { root })
    }

    /// Parses a byte buffer; bytes that are not UTF-8 fail like any other malformed input.
    pub fn from_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Self, Error> {
        let text = std::str::from_utf8(bytes).map_err(|err| {
            parse_error(ParseFailureCategory::Utf8)
                .with_message("input is not valid UTF-8")
                .with_source(err)
        })?;
        Self::parse_with(text, options)
    }

    /// True when the document is the JSON literal `null`.
    pub fn is_empty_document(&self) -> bool {
        matches!(self.root, Node::Null)
    }

    pub fn root(&self) -> NodeView<'_> {
        NodeView::new(&self.root)
    }
}

impl FromStr for DocumentTree {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

fn parse_error(category: ParseFailureCategory) -> Error {
    Error::new(ErrorKind::Parse).with_hint(parse::hint_for_category(category, PARSE_CONTEXT))
}
