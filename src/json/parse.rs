//! Purpose: Provide the runtime JSON decode entrypoints behind one seam.
//! Exports: `ParserBackend`, `from_str`, `from_str_with`, parse-failure categorization helpers.
//! Role: Parser boundary that centralizes simd-json and serde_json usage details.
//! Invariants: Both backends decode into `serde_json::Value`-compatible serde targets.
//! Invariants: Input buffers are copied once to satisfy simd-json mutable-slice API.
//! Invariants: Nesting is bounded by `check_nesting` before either backend recurses.
//! Notes: Kept free of crate-internal imports so tests can include it by path.

use std::error::Error as StdError;
use std::fmt;

use serde::de::DeserializeOwned;

/// External parser used to decode JSON text.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ParserBackend {
    /// `simd-json`, the default runtime parser.
    #[default]
    Simd,
    /// `serde_json`, the baseline parser.
    Serde,
}

impl ParserBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            ParserBackend::Simd => "simd",
            ParserBackend::Serde => "serde",
        }
    }
}

impl fmt::Display for ParserBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) type BackendError = Box<dyn StdError + Send + Sync + 'static>;

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, simd_json::Error> {
    let mut bytes = input.as_bytes().to_vec();
    simd_json::serde::from_slice(&mut bytes)
}

pub(crate) fn from_str_with<T: DeserializeOwned>(
    input: &str,
    backend: ParserBackend,
) -> Result<T, BackendError> {
    match backend {
        ParserBackend::Simd => from_str(input).map_err(|err| Box::new(err) as BackendError),
        ParserBackend::Serde => {
            serde_json::from_str(input).map_err(|err| Box::new(err) as BackendError)
        }
    }
}

/// Raw JSON text opens more nested containers than allowed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NestingTooDeep {
    pub max_depth: usize,
    pub offset: usize,
}

impl fmt::Display for NestingTooDeep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nesting depth exceeds limit of {} at byte {}",
            self.max_depth, self.offset
        )
    }
}

impl StdError for NestingTooDeep {}

/// Scans raw bytes for container nesting without building anything, so deep input is
/// rejected before a recursive decoder sees it. Brackets inside strings are skipped;
/// unbalanced input is left for the parser to report.
pub(crate) fn check_nesting(input: &[u8], max_depth: usize) -> Result<(), NestingTooDeep> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in input.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > max_depth {
                    return Err(NestingTooDeep { max_depth, offset });
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    NumericRange,
    Utf8,
    DepthLimit,
    InputTooLarge,
    Unknown,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::Utf8 => "utf8",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::InputTooLarge => "input-too-large",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub(crate) fn categorize_error(err: &(impl fmt::Display + ?Sized)) -> ParseFailureCategory {
    categorize_message(&err.to_string())
}

/// Order matters: simd-json renders `InvalidUtf8`/`InvalidNumber`, which must not fall
/// through to the generic `invalid` syntax bucket.
pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let message = message.to_ascii_lowercase();
    let has_any = |needles: &[&str]| needles.iter().any(|needle| message.contains(needle));

    if has_any(&["recursion limit", "depth"]) {
        ParseFailureCategory::DepthLimit
    } else if has_any(&["too large", "exceeds"]) {
        ParseFailureCategory::InputTooLarge
    } else if has_any(&["utf8", "utf-8", "unicode"]) {
        ParseFailureCategory::Utf8
    } else if has_any(&["number", "out of range", "overflow"]) {
        ParseFailureCategory::NumericRange
    } else if has_any(&[
        "expected",
        "eof",
        "trailing",
        "syntax",
        "invalid",
        "key must be",
        "control character",
    ]) {
        ParseFailureCategory::Syntax
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn hint_for_error(err: &(impl fmt::Display + ?Sized), context: &str) -> String {
    hint_for_category(categorize_error(err), context)
}

pub(crate) fn hint_for_category(category: ParseFailureCategory, context: &str) -> String {
    format!("parse category: {}; context: {context}", category.label())
}
