use std::error::Error as StdError;
use std::fmt;

use crate::core::node::NodeTag;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    Parse,
    TypeMismatch,
    MissingKey,
    NotArray,
    IndexOutOfRange,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    key: Option<String>,
    index: Option<usize>,
    found: Option<NodeTag>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            key: None,
            index: None,
            found: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Object key the failing operation was looking up, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Tag of the node the failing accessor was invoked on.
    pub fn found(&self) -> Option<NodeTag> {
        self.found
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_found(mut self, found: NodeTag) -> Self {
        self.found = Some(found);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub(crate) fn with_boxed_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }

    // Keeps the innermost key: a failure deep inside `a.b` reports `b`, not `a`.
    pub(crate) fn or_key(self, key: &str) -> Self {
        if self.key.is_some() {
            self
        } else {
            self.with_key(key)
        }
    }

    /// `expected` reads as a noun phrase, e.g. "an int32" or "a number".
    pub(crate) fn type_mismatch(expected: &str, found: NodeTag) -> Self {
        Self::new(ErrorKind::TypeMismatch)
            .with_message(format!("value is null or not {expected}"))
            .with_found(found)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(found) = self.found {
            write!(f, " (found: {found})")?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {index})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Parse => 3,
        ErrorKind::TypeMismatch => 4,
        ErrorKind::MissingKey => 5,
        ErrorKind::NotArray => 6,
        ErrorKind::IndexOutOfRange => 7,
        ErrorKind::Io => 8,
    }
}
