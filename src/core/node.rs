//! Tagged node tree owned by a [`DocumentTree`](crate::core::document::DocumentTree).
//!
//! Parser output is lowered into [`Node`] once, at construction, so nothing past
//! this module depends on a parser library's value model.

use std::fmt;

use serde_json::{Number, Value};

/// Tag of a node, as seen by typed accessors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeTag {
    Null,
    Bool,
    Int32,
    Int64,
    Double,
    String,
    Array,
    Object,
}

impl NodeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeTag::Null => "null",
            NodeTag::Bool => "bool",
            NodeTag::Int32 => "int32",
            NodeTag::Int64 => "int64",
            NodeTag::Double => "double",
            NodeTag::String => "string",
            NodeTag::Array => "array",
            NodeTag::Object => "object",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, NodeTag::Int32 | NodeTag::Int64 | NodeTag::Double)
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Node {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
    Array(Vec<Node>),
    /// Keys are unique; parser order is kept but carries no meaning.
    Object(Vec<(String, Node)>),
}

impl Node {
    pub(crate) fn tag(&self) -> NodeTag {
        match self {
            Node::Null => NodeTag::Null,
            Node::Bool(_) => NodeTag::Bool,
            Node::Int32(_) => NodeTag::Int32,
            Node::Int64(_) => NodeTag::Int64,
            Node::Double(_) => NodeTag::Double,
            Node::String(_) => NodeTag::String,
            Node::Array(_) => NodeTag::Array,
            Node::Object(_) => NodeTag::Object,
        }
    }

    pub(crate) fn member(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(members) => members
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }
}

/// Nesting depth of `value` exceeded `max_depth` while lowering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DepthExceeded {
    pub(crate) max_depth: usize,
}

/// Lowers parser output into a node tree, rejecting containers nested deeper than `max_depth`.
pub(crate) fn lower(value: Value, max_depth: usize) -> Result<Node, DepthExceeded> {
    lower_at(value, 0, max_depth)
}

fn lower_at(value: Value, depth: usize, max_depth: usize) -> Result<Node, DepthExceeded> {
    let node = match value {
        Value::Null => Node::Null,
        Value::Bool(value) => Node::Bool(value),
        Value::Number(number) => lower_number(&number),
        Value::String(text) => Node::String(text),
        Value::Array(items) => {
            if depth >= max_depth {
                return Err(DepthExceeded { max_depth });
            }
            let mut nodes = Vec::with_capacity(items.len());
            for item in items {
                nodes.push(lower_at(item, depth + 1, max_depth)?);
            }
            Node::Array(nodes)
        }
        Value::Object(map) => {
            if depth >= max_depth {
                return Err(DepthExceeded { max_depth });
            }
            let mut members = Vec::with_capacity(map.len());
            for (key, item) in map {
                members.push((key, lower_at(item, depth + 1, max_depth)?));
            }
            Node::Object(members)
        }
    };
    Ok(node)
}

fn lower_number(number: &Number) -> Node {
    if let Some(value) = number.as_i64() {
        return match i32::try_from(value) {
            Ok(small) => Node::Int32(small),
            Err(_) => Node::Int64(value),
        };
    }
    // Above i64::MAX or fractional: both land on f64.
    if let Some(value) = number.as_u64() {
        return Node::Double(value as f64);
    }
    Node::Double(number.as_f64().unwrap_or(f64::NAN))
}
