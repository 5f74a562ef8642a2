// Core modules implementing the node tree, views, extraction, and error modeling.
pub mod document;
pub mod error;
pub mod extract;
pub(crate) mod node;
pub mod options;
pub mod view;
