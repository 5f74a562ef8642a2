use crate::json::parse::ParserBackend;

/// Default ceiling on input size accepted by document construction.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;

/// Default container nesting limit, in line with serde_json's recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for building a [`DocumentTree`](crate::core::document::DocumentTree).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    pub backend: ParserBackend,
    pub max_input_bytes: usize,
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self {
            backend: ParserBackend::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_backend(mut self, backend: ParserBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_BYTES, ParseOptions};
    use crate::json::parse::ParserBackend;

    #[test]
    fn defaults_use_simd_backend() {
        let options = ParseOptions::default();
        assert_eq!(options.backend, ParserBackend::Simd);
        assert_eq!(options.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn builders_override_fields() {
        let options = ParseOptions::new()
            .with_backend(ParserBackend::Serde)
            .with_max_input_bytes(16)
            .with_max_depth(4);
        assert_eq!(options.backend, ParserBackend::Serde);
        assert_eq!(options.max_input_bytes, 16);
        assert_eq!(options.max_depth, 4);
    }
}
