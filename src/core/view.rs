//! Borrowed, type-checked access into a [`DocumentTree`](crate::core::document::DocumentTree).
//!
//! Every typed accessor either returns the coerced value or a typed [`Error`]; none of
//! them falls back to a default. Numeric accessors widen across the integer
//! representations the parser may pick for a literal.

use std::fmt;

use crate::core::error::{Error, ErrorKind};
use crate::core::node::{Node, NodeTag};

/// Non-owning reference to one node of a document.
#[derive(Clone, Copy)]
pub struct NodeView<'doc> {
    node: &'doc Node,
}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("tag", &self.tag())
            .finish()
    }
}

impl<'doc> NodeView<'doc> {
    pub(crate) fn new(node: &'doc Node) -> Self {
        Self { node }
    }

    pub fn tag(&self) -> NodeTag {
        self.node.tag()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.node, Node::Null)
    }

    pub fn as_i32(&self) -> Result<i32, Error> {
        match self.node {
            Node::Int32(value) => Ok(*value),
            other => Err(Error::type_mismatch("an int32", other.tag())),
        }
    }

    /// Reads an integer of either width; int32 values are widened.
    pub fn as_i64(&self) -> Result<i64, Error> {
        match self.node {
            Node::Int64(value) => Ok(*value),
            Node::Int32(value) => Ok(i64::from(*value)),
            other => Err(Error::type_mismatch("an integer", other.tag())),
        }
    }

    /// Reads any numeric node. Int64 magnitudes beyond 2^53 lose precision.
    pub fn as_f64(&self) -> Result<f64, Error> {
        match self.node {
            Node::Double(value) => Ok(*value),
            Node::Int32(value) => Ok(f64::from(*value)),
            Node::Int64(value) => Ok(*value as f64),
            other => Err(Error::type_mismatch("a number", other.tag())),
        }
    }

    pub fn as_bool(&self) -> Result<bool, Error> {
        match self.node {
            Node::Bool(value) => Ok(*value),
            other => Err(Error::type_mismatch("a bool", other.tag())),
        }
    }

    pub fn as_str(&self) -> Result<&'doc str, Error> {
        match self.node {
            Node::String(text) => Ok(text),
            other => Err(Error::type_mismatch("a string", other.tag())),
        }
    }

    pub fn as_string(&self) -> Result<String, Error> {
        self.as_str().map(str::to_owned)
    }

    /// True when `key` is a member of this object, whatever its value. Never fails.
    pub fn has_key(&self, key: &str) -> bool {
        self.node.member(key).is_some()
    }

    pub fn has_non_null_key(&self, key: &str) -> bool {
        self.node
            .member(key)
            .is_some_and(|child| !matches!(child, Node::Null))
    }

    /// Absent keys and keys mapped to `null` both fail with [`ErrorKind::MissingKey`].
    pub fn value_for_key(&self, key: &str) -> Result<NodeView<'doc>, Error> {
        match self.node.member(key) {
            Some(Node::Null) | None => {
                let err = Error::new(ErrorKind::MissingKey)
                    .with_message(format!("{key} key is null or missing"))
                    .with_key(key);
                match self.node {
                    Node::Object(_) => Err(err),
                    other => Err(err.with_found(other.tag())),
                }
            }
            Some(child) => Ok(NodeView::new(child)),
        }
    }

    pub fn array_len(&self) -> Result<usize, Error> {
        self.items().map(<[Node]>::len)
    }

    pub fn value_at_index(&self, index: usize) -> Result<NodeView<'doc>, Error> {
        let items = self.items()?;
        items.get(index).map(NodeView::new).ok_or_else(|| {
            Error::new(ErrorKind::IndexOutOfRange)
                .with_message(format!(
                    "index {index} is out of range for array of length {}",
                    items.len()
                ))
                .with_index(index)
        })
    }

    pub fn elements(&self) -> Result<impl Iterator<Item = NodeView<'doc>> + use<'doc>, Error> {
        Ok(self.items()?.iter().map(NodeView::new))
    }

    pub fn keys(&self) -> Result<impl Iterator<Item = &'doc str> + use<'doc>, Error> {
        Ok(self.members()?.iter().map(|(key, _)| key.as_str()))
    }

    /// Object members in document order, null values included.
    pub fn entries(
        &self,
    ) -> Result<impl Iterator<Item = (&'doc str, NodeView<'doc>)> + use<'doc>, Error> {
        Ok(self
            .members()?
            .iter()
            .map(|(key, child)| (key.as_str(), NodeView::new(child))))
    }

    /// Follows an RFC 6901 JSON Pointer such as `/plan/children/0`.
    ///
    /// Object tokens go through [`value_for_key`](Self::value_for_key) and array tokens
    /// through [`value_at_index`](Self::value_at_index), so failures carry the same kinds.
    pub fn pointer(&self, pointer: &str) -> Result<NodeView<'doc>, Error> {
        if pointer.is_empty() {
            return Ok(*self);
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("json pointer must start with '/': {pointer}")));
        };

        let mut current = *self;
        for raw in rest.split('/') {
            let token = raw.replace("~1", "/").replace("~0", "~");
            current = match current.node {
                Node::Object(_) => current.value_for_key(&token)?,
                Node::Array(_) => {
                    let index = parse_index(&token)?;
                    current.value_at_index(index)?
                }
                other => {
                    return Err(Error::new(ErrorKind::TypeMismatch)
                        .with_message(format!(
                            "cannot navigate into {} with '{token}'",
                            other.tag()
                        ))
                        .with_found(other.tag()));
                }
            };
        }
        Ok(current)
    }

    fn items(&self) -> Result<&'doc [Node], Error> {
        match self.node {
            Node::Array(items) => Ok(items),
            other => Err(Error::new(ErrorKind::NotArray)
                .with_message("value is not an array")
                .with_found(other.tag())),
        }
    }

    fn members(&self) -> Result<&'doc [(String, Node)], Error> {
        match self.node {
            Node::Object(members) => Ok(members),
            other => Err(Error::type_mismatch("an object", other.tag())),
        }
    }
}

// RFC 6901 array tokens: "0" or a decimal without leading zeros.
fn parse_index(token: &str) -> Result<usize, Error> {
    let well_formed = !token.is_empty()
        && token.bytes().all(|byte| byte.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    well_formed
        .then(|| token.parse::<usize>().ok())
        .flatten()
        .ok_or_else(|| {
            Error::new(ErrorKind::IndexOutOfRange)
                .with_message(format!("'{token}' is not a valid array index"))
        })
}

#[cfg(test)]
mod tests {
    use super::NodeView;
    use crate::core::document::DocumentTree;
    use crate::core::error::ErrorKind;
    use crate::core::node::NodeTag;

    fn doc(text: &str) -> DocumentTree {
        DocumentTree::parse(text).expect("valid json")
    }

    #[test]
    fn int32_accessor_rejects_wide_values() {
        let doc = doc("[7, 4294967296]");
        let root = doc.root();
        assert_eq!(root.value_at_index(0).unwrap().as_i32().unwrap(), 7);
        let wide = root.value_at_index(1).unwrap();
        assert_eq!(wide.as_i32().unwrap_err().kind(), ErrorKind::TypeMismatch);
        assert_eq!(wide.as_i64().unwrap(), 4294967296);
    }

    #[test]
    fn double_accessor_widens_integers() {
        let doc = doc("[1, -9000000000, 2.5]");
        let values: Vec<f64> = doc
            .root()
            .elements()
            .unwrap()
            .map(|view| view.as_f64().unwrap())
            .collect();
        assert_eq!(values, vec![1.0, -9000000000.0, 2.5]);
    }

    #[test]
    fn int64_accessor_rejects_doubles() {
        let doc = doc("[1.0]");
        let err = doc.root().value_at_index(0).unwrap().as_i64().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.found(), Some(NodeTag::Double));
    }

    #[test]
    fn missing_key_error_names_the_key() {
        let doc = doc(r#"{"present": null}"#);
        let err = doc.root().value_for_key("present").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingKey);
        assert_eq!(err.key(), Some("present"));
        assert_eq!(err.message(), Some("present key is null or missing"));
        assert_eq!(err.found(), None);
    }

    #[test]
    fn value_for_key_on_non_object_is_missing_key() {
        let doc = doc("[1]");
        let err = doc.root().value_for_key("a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingKey);
        assert_eq!(err.found(), Some(NodeTag::Array));
        assert!(!doc.root().has_key("a"));
    }

    #[test]
    fn index_out_of_range_carries_index() {
        let doc = doc("[1, 2]");
        let err = doc.root().value_at_index(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(err.index(), Some(2));
    }

    #[test]
    fn array_ops_on_scalars_are_not_array() {
        let doc = doc(r#""text""#);
        let root = doc.root();
        assert_eq!(root.array_len().unwrap_err().kind(), ErrorKind::NotArray);
        assert_eq!(
            root.value_at_index(0).unwrap_err().kind(),
            ErrorKind::NotArray
        );
        assert!(root.elements().is_err());
    }

    #[test]
    fn keys_and_entries_follow_document_order() {
        let doc = doc(r#"{"z": 1, "a": null, "m": "x"}"#);
        let keys: Vec<&str> = doc.root().keys().unwrap().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);

        let tags: Vec<(&str, NodeTag)> = doc
            .root()
            .entries()
            .unwrap()
            .map(|(key, view)| (key, view.tag()))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("z", NodeTag::Int32),
                ("a", NodeTag::Null),
                ("m", NodeTag::String)
            ]
        );
        assert_eq!(
            doc.root()
                .value_for_key("m")
                .unwrap()
                .keys()
                .err()
                .map(|err| err.kind()),
            Some(ErrorKind::TypeMismatch)
        );
    }

    #[test]
    fn pointer_navigates_objects_and_arrays() {
        let doc = doc(r#"{"plan": {"children": [{"id": 4}], "a/b": 1, "t~": 2}}"#);
        let root = doc.root();
        assert_eq!(root.pointer("").unwrap().tag(), NodeTag::Object);
        assert_eq!(
            root.pointer("/plan/children/0/id").unwrap().as_i32().unwrap(),
            4
        );
        assert_eq!(root.pointer("/plan/a~1b").unwrap().as_i32().unwrap(), 1);
        assert_eq!(root.pointer("/plan/t~0").unwrap().as_i32().unwrap(), 2);
    }

    #[test]
    fn pointer_failures_use_accessor_kinds() {
        let doc = doc(r#"{"list": [1], "n": 3}"#);
        let root = doc.root();
        let kind = |pointer: &str| root.pointer(pointer).unwrap_err().kind();
        assert_eq!(kind("list"), ErrorKind::Usage);
        assert_eq!(kind("/missing"), ErrorKind::MissingKey);
        assert_eq!(kind("/list/1"), ErrorKind::IndexOutOfRange);
        assert_eq!(kind("/list/01"), ErrorKind::IndexOutOfRange);
        assert_eq!(kind("/list/x"), ErrorKind::IndexOutOfRange);
        assert_eq!(kind("/n/0"), ErrorKind::TypeMismatch);
    }

    #[test]
    fn views_are_copy() {
        let doc = doc("[true]");
        let root: NodeView<'_> = doc.root();
        let copy = root;
        assert_eq!(root.tag(), copy.tag());
    }
}
