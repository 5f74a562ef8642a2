//! Typed field extraction for schema-aware callers.
//!
//! [`FromNode`] lets plan/expression builders write `view.get::<i64>("id")?` instead
//! of chaining `value_for_key` and an accessor by hand.

use crate::core::error::Error;
use crate::core::view::NodeView;

/// Conversion from a node view into an owned or borrowed Rust value.
pub trait FromNode<'doc>: Sized {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error>;
}

impl<'doc> FromNode<'doc> for NodeView<'doc> {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        Ok(view)
    }
}

impl<'doc> FromNode<'doc> for i32 {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        view.as_i32()
    }
}

impl<'doc> FromNode<'doc> for i64 {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        view.as_i64()
    }
}

impl<'doc> FromNode<'doc> for f64 {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        view.as_f64()
    }
}

impl<'doc> FromNode<'doc> for bool {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        view.as_bool()
    }
}

impl<'doc> FromNode<'doc> for &'doc str {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        view.as_str()
    }
}

impl<'doc> FromNode<'doc> for String {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        view.as_string()
    }
}

/// JSON `null` becomes `None`; anything else must convert as `T`.
impl<'doc, T: FromNode<'doc>> FromNode<'doc> for Option<T> {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        if view.is_null() {
            Ok(None)
        } else {
            T::from_node(view).map(Some)
        }
    }
}

impl<'doc, T: FromNode<'doc>> FromNode<'doc> for Vec<T> {
    fn from_node(view: NodeView<'doc>) -> Result<Self, Error> {
        view.elements()?
            .enumerate()
            .map(|(index, element)| {
                T::from_node(element).map_err(|err| {
                    if err.index().is_some() {
                        err
                    } else {
                        err.with_index(index)
                    }
                })
            })
            .collect()
    }
}

impl<'doc> NodeView<'doc> {
    /// Converts the value under `key`. A missing or null key fails with `MissingKey`.
    pub fn get<T: FromNode<'doc>>(&self, key: &str) -> Result<T, Error> {
        let child = self.value_for_key(key)?;
        T::from_node(child).map_err(|err| err.or_key(key))
    }

    /// Like [`get`](Self::get), but an absent or null key yields `Ok(None)`.
    pub fn get_optional<T: FromNode<'doc>>(&self, key: &str) -> Result<Option<T>, Error> {
        if !self.has_non_null_key(key) {
            return Ok(None);
        }
        self.get(key).map(Some)
    }

    pub fn to<T: FromNode<'doc>>(self) -> Result<T, Error> {
        T::from_node(self)
    }
}
