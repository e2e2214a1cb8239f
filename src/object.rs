//! Objects written into print documents.
//!
//! Only the object kinds the writer emits are modelled. Dictionaries are
//! ordered maps, so serialized output is byte-for-byte reproducible.

use std::collections::BTreeMap;

/// Dictionary with keys in byte order.
pub type Dict = BTreeMap<String, Object>;

/// Number of an indirect object; generation is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectRef(pub u32);

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

/// A PDF object.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer
    Integer(i64),
    /// Real number
    Real(f64),
    /// Literal or hex string
    String(Vec<u8>),
    /// Name, stored without the leading slash
    Name(String),
    /// Array
    Array(Vec<Object>),
    /// Dictionary
    Dictionary(Dict),
    /// Stream; `/Length` is added when written
    Stream {
        /// Stream dictionary
        dict: Dict,
        /// Encoded payload
        data: bytes::Bytes,
    },
    /// Indirect reference
    Reference(ObjectRef),
}

impl Object {
    /// `/name`
    pub fn name(name: &str) -> Self {
        Object::Name(name.to_string())
    }

    /// A text string.
    pub fn text(text: &str) -> Self {
        Object::String(text.as_bytes().to_vec())
    }

    /// Dictionary from `(key, value)` pairs.
    pub fn dict<'a>(entries: impl IntoIterator<Item = (&'a str, Object)>) -> Self {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Stream with `dict` and `data`.
    pub fn stream(dict: Dict, data: impl Into<bytes::Bytes>) -> Self {
        Object::Stream {
            dict,
            data: data.into(),
        }
    }

    /// Rectangle `[llx lly urx ury]` from an origin and a size.
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Object::Array(
            [x, y, x + width, y + height]
                .iter()
                .map(|v| Object::Real(*v as f64))
                .collect(),
        )
    }

    /// Integer value, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Name value, if this is a name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Dictionary of a dictionary or stream.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dict_keys_sorted() {
        let obj = Object::dict([
            ("Type", Object::name("Page")),
            ("Count", Object::Integer(1)),
        ]);
        let keys: Vec<&String> = obj.as_dict().unwrap().keys().collect();
        assert_eq!(keys, vec!["Count", "Type"]);
    }

    #[test]
    fn test_stream_dict_access() {
        let mut dict = Dict::new();
        dict.insert("Filter".to_string(), Object::name("FlateDecode"));
        let stream = Object::stream(dict, b"q Q\n".to_vec());
        let dict = stream.as_dict().unwrap();
        assert_eq!(dict.get("Filter").and_then(Object::as_name), Some("FlateDecode"));
    }

    #[test]
    fn test_rect() {
        let rect = Object::rect(10.0, 20.0, 100.0, 50.0);
        assert_eq!(
            rect,
            Object::Array(vec![
                Object::Real(10.0),
                Object::Real(20.0),
                Object::Real(110.0),
                Object::Real(70.0),
            ])
        );
    }

    #[test]
    fn test_reference_display() {
        assert_eq!(ObjectRef(12).to_string(), "12 0 R");
    }
}
