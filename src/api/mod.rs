//! Purpose: Define the stable public Rust API boundary for plandom.
//! Exports: Document, view, extraction, option, and error types.
//! Role: Public, additive-only surface; hides the node representation and parser seam.
//! Invariants: This module is the only public path to core types.
//! Invariants: No parser-library type appears in a public signature.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::document::DocumentTree;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::extract::FromNode;
pub use crate::core::node::NodeTag;
pub use crate::core::options::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_BYTES, ParseOptions};
pub use crate::core::view::NodeView;
pub use crate::json::parse::ParserBackend;
