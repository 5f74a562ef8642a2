//! Purpose: Parser-neutral, type-checked access to parsed JSON documents.
//! Exports: `api` (document ownership, node views, typed extraction, errors).
//! Role: Library backing the `plandom` CLI and schema-aware plan/expression builders.
//! Invariants: Parser libraries are touched only inside the internal `json` boundary.
//! Invariants: Views borrow from their document; nothing is copied or cached.
pub mod api;
mod core;
mod json;
