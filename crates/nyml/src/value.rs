// Dweve NYML - Numeric YAML with Includes
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Document tree for NYML.

use crate::numeric::{NumericArray, NumericScalar};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Mapping node: string keys in insertion order.
pub type Mapping = IndexMap<String, Value>;

/// A node of a loaded or to-be-stored document.
///
/// The `Numeric` and `Array` variants hold values coming from numeric code
/// (fixed-width scalars and `ndarray` arrays). They are rendered by the codec
/// as native scalars and sequences, and [`crate::normalize`] replaces them
/// with the native variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// YAML null (`~` / `null`).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Ordered sequence.
    Sequence(Vec<Value>),
    /// Ordered mapping with unique string keys.
    Mapping(Mapping),
    /// Fixed-width numeric scalar.
    Numeric(NumericScalar),
    /// Typed n-dimensional array.
    Array(NumericArray),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for plain scalar variants (null, bool, int, float, string).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }

    /// Returns true if this value is a foreign numeric scalar or array.
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::Numeric(_) | Self::Array(_))
    }

    /// Try to get the value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get the value as a mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get the value as a mutable mapping.
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get the value as a numeric array.
    pub fn as_array(&self) -> Option<&NumericArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Numeric(scalar) => scalar.kind().name(),
            Self::Array(array) => array.dtype_name(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Mapping(Mapping::new())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl From<NumericScalar> for Value {
    fn from(scalar: NumericScalar) -> Self {
        Self::Numeric(scalar)
    }
}

impl From<NumericArray> for Value {
    fn from(array: NumericArray) -> Self {
        Self::Array(array)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().collect())
    }
}

// Foreign values serialize through their native projection, the same shape
// the codec writes.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Numeric(scalar) => match (scalar.to_native(), scalar) {
                (Some(native), _) => native.serialize(serializer),
                (None, NumericScalar::U64(n)) => serializer.serialize_u64(*n),
                (None, _) => serializer.serialize_unit(),
            },
            Self::Array(array) => array.to_nested_lossy().serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(1.5).as_int(), None);
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_get_on_mapping() {
        let doc: Value = vec![("a".to_string(), Value::Int(1))].into_iter().collect();
        assert_eq!(doc.get("a"), Some(&Value::Int(1)));
        assert_eq!(doc.get("b"), None);
        assert_eq!(Value::Int(1).get("a"), None);
    }

    #[test]
    fn test_mapping_preserves_insertion_order() {
        let mut map = Mapping::new();
        map.insert("z".to_string(), Value::Int(1));
        map.insert("a".to_string(), Value::Int(2));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_default_is_empty_mapping() {
        assert_eq!(Value::default(), Value::Mapping(Mapping::new()));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Sequence(vec![]).type_name(), "sequence");
        assert_eq!(Value::Numeric(NumericScalar::U16(1)).type_name(), "uint16");
    }

    #[test]
    fn test_serialize_to_json() {
        let doc: Value = vec![
            ("n".to_string(), Value::Numeric(NumericScalar::I32(7))),
            ("xs".to_string(), Value::Sequence(vec![Value::Float(0.5), Value::Null])),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"n":7,"xs":[0.5,null]}"#);
    }
}
