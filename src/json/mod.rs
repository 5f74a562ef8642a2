//! Purpose: Internal JSON parsing boundary shared by document construction and tests.
//! Exports: `parse` module with backend selection and failure categorization.
//! Role: Single seam for parser implementations so no other module touches parser APIs.
//! Invariants: Document construction decodes JSON only through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
