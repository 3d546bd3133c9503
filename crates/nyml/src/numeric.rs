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

//! Fixed-width numeric scalars and typed n-dimensional arrays.
//!
//! Numeric code hands NYML values that are richer than the document model:
//! `f32` and `u16` scalars, complex numbers, and `ndarray` arrays of any
//! rank. This module names those types and maps each of them onto the
//! native [`Value`] variants.
//!
//! # Conversion table
//!
//! Scalar conversion is driven by a closed table from [`NumericKind`] to a
//! converter function. Adding a kind means adding a table entry:
//!
//! | Kind family            | Native value          |
//! |------------------------|-----------------------|
//! | `int*`, `uint*`        | [`Value::Int`]        |
//! | `float*`               | [`Value::Float`]      |
//! | `complex*`             | [`Value::Float`] (real part) |
//! | `bool`                 | [`Value::Bool`]       |
//! | `str`                  | [`Value::String`]     |
//!
//! A conversion yields `None` when the native type cannot hold the value
//! (a `uint64` above `i64::MAX`).

use crate::value::Value;
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use num_complex::{Complex32, Complex64};

/// Tag identifying the source type of a numeric scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Bool,
    Str,
}

impl NumericKind {
    /// Lower-case dtype name, as numeric libraries spell it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Bool => "bool",
            Self::Str => "str",
        }
    }

    /// True for signed and unsigned integer kinds.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// True for kinds that count as numbers when choosing a layout.
    pub fn is_number(self) -> bool {
        !matches!(self, Self::Bool | Self::Str)
    }

    /// Converter from the native conversion table.
    pub fn converter(self) -> Converter {
        NATIVE_CONVERSIONS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, convert)| *convert)
            .unwrap_or(unconvertible)
    }
}

/// Converts one scalar into its native document value.
pub type Converter = fn(&NumericScalar) -> Option<Value>;

const NATIVE_CONVERSIONS: [(NumericKind, Converter); 14] = [
    (NumericKind::Int8, to_native_int),
    (NumericKind::Int16, to_native_int),
    (NumericKind::Int32, to_native_int),
    (NumericKind::Int64, to_native_int),
    (NumericKind::UInt8, to_native_int),
    (NumericKind::UInt16, to_native_int),
    (NumericKind::UInt32, to_native_int),
    (NumericKind::UInt64, to_native_int),
    (NumericKind::Float32, to_native_float),
    (NumericKind::Float64, to_native_float),
    (NumericKind::Complex64, to_native_float),
    (NumericKind::Complex128, to_native_float),
    (NumericKind::Bool, to_native_bool),
    (NumericKind::Str, to_native_string),
];

fn to_native_int(scalar: &NumericScalar) -> Option<Value> {
    scalar
        .as_i128()
        .and_then(|n| i64::try_from(n).ok())
        .map(Value::Int)
}

fn to_native_float(scalar: &NumericScalar) -> Option<Value> {
    scalar.real_part().map(Value::Float)
}

fn to_native_bool(scalar: &NumericScalar) -> Option<Value> {
    match scalar {
        NumericScalar::Bool(b) => Some(Value::Bool(*b)),
        _ => None,
    }
}

fn to_native_string(scalar: &NumericScalar) -> Option<Value> {
    match scalar {
        NumericScalar::Str(s) => Some(Value::String(s.clone())),
        _ => None,
    }
}

fn unconvertible(_: &NumericScalar) -> Option<Value> {
    None
}

/// A scalar produced by numeric code.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericScalar {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    C64(Complex32),
    C128(Complex64),
    Bool(bool),
    Str(String),
}

impl NumericScalar {
    pub fn kind(&self) -> NumericKind {
        match self {
            Self::I8(_) => NumericKind::Int8,
            Self::I16(_) => NumericKind::Int16,
            Self::I32(_) => NumericKind::Int32,
            Self::I64(_) => NumericKind::Int64,
            Self::U8(_) => NumericKind::UInt8,
            Self::U16(_) => NumericKind::UInt16,
            Self::U32(_) => NumericKind::UInt32,
            Self::U64(_) => NumericKind::UInt64,
            Self::F32(_) => NumericKind::Float32,
            Self::F64(_) => NumericKind::Float64,
            Self::C64(_) => NumericKind::Complex64,
            Self::C128(_) => NumericKind::Complex128,
            Self::Bool(_) => NumericKind::Bool,
            Self::Str(_) => NumericKind::Str,
        }
    }

    /// Integer value, for integer kinds only.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::I8(n) => Some(i128::from(*n)),
            Self::I16(n) => Some(i128::from(*n)),
            Self::I32(n) => Some(i128::from(*n)),
            Self::I64(n) => Some(i128::from(*n)),
            Self::U8(n) => Some(i128::from(*n)),
            Self::U16(n) => Some(i128::from(*n)),
            Self::U32(n) => Some(i128::from(*n)),
            Self::U64(n) => Some(i128::from(*n)),
            _ => None,
        }
    }

    /// Real-valued projection for integer, float and complex kinds.
    pub fn real_part(&self) -> Option<f64> {
        match self {
            Self::F32(n) => Some(f64::from(*n)),
            Self::F64(n) => Some(*n),
            Self::C64(c) => Some(f64::from(c.re)),
            Self::C128(c) => Some(c.re),
            other => other.as_i128().map(|n| n as f64),
        }
    }

    /// Native document value through the conversion table.
    pub fn to_native(&self) -> Option<Value> {
        (self.kind().converter())(self)
    }
}

/// A typed n-dimensional array.
///
/// Element types are widened to one representative per dtype family.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArray {
    I64(ArrayD<i64>),
    U64(ArrayD<u64>),
    F64(ArrayD<f64>),
    C128(ArrayD<Complex64>),
    Bool(ArrayD<bool>),
    Str(ArrayD<String>),
}

impl NumericArray {
    /// Element kind of the array.
    pub fn element_kind(&self) -> NumericKind {
        match self {
            Self::I64(_) => NumericKind::Int64,
            Self::U64(_) => NumericKind::UInt64,
            Self::F64(_) => NumericKind::Float64,
            Self::C128(_) => NumericKind::Complex128,
            Self::Bool(_) => NumericKind::Bool,
            Self::Str(_) => NumericKind::Str,
        }
    }

    /// Name used in diagnostics, e.g. `ndarray<float64>`.
    pub fn dtype_name(&self) -> &'static str {
        match self {
            Self::I64(_) => "ndarray<int64>",
            Self::U64(_) => "ndarray<uint64>",
            Self::F64(_) => "ndarray<float64>",
            Self::C128(_) => "ndarray<complex128>",
            Self::Bool(_) => "ndarray<bool>",
            Self::Str(_) => "ndarray<str>",
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::I64(a) => a.shape(),
            Self::U64(a) => a.shape(),
            Self::F64(a) => a.shape(),
            Self::C128(a) => a.shape(),
            Self::Bool(a) => a.shape(),
            Self::Str(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Materializes the array as nested sequences of native scalars.
    ///
    /// A 0-dimensional array becomes a bare scalar. Returns `None` when an
    /// element has no native representation.
    pub fn to_nested(&self) -> Option<Value> {
        match self {
            Self::I64(a) => nest(a.view(), &|n: &i64| Some(Value::Int(*n))),
            Self::U64(a) => nest(a.view(), &|n: &u64| NumericScalar::U64(*n).to_native()),
            Self::F64(a) => nest(a.view(), &|n: &f64| Some(Value::Float(*n))),
            Self::C128(a) => nest(a.view(), &|c: &Complex64| NumericScalar::C128(*c).to_native()),
            Self::Bool(a) => nest(a.view(), &|b: &bool| Some(Value::Bool(*b))),
            Self::Str(a) => nest(a.view(), &|s: &String| Some(Value::String(s.clone()))),
        }
    }

    /// Like [`to_nested`](Self::to_nested), but out-of-range unsigned
    /// elements become floats instead of failing.
    pub fn to_nested_lossy(&self) -> Value {
        match self {
            Self::U64(a) => nest(a.view(), &|n: &u64| {
                Some(i64::try_from(*n).map_or(Value::Float(*n as f64), Value::Int))
            })
            .unwrap_or(Value::Null),
            other => other.to_nested().unwrap_or(Value::Null),
        }
    }

    /// Infers a numeric array from a rectangular sequence of numbers.
    ///
    /// All-integer input yields `I64`, anything with a float (or the empty
    /// sequence) yields `F64`. Ragged shapes, booleans, strings and nulls
    /// yield `None`.
    pub fn from_sequence(items: &[Value]) -> Option<Self> {
        let mut walk = ShapeWalk::default();
        walk.visit(items, 0)?;

        if walk.all_int && !walk.leaves.is_empty() {
            let data = walk
                .leaves
                .iter()
                .map(|leaf| match leaf {
                    Leaf::Int(n) => *n,
                    Leaf::Float(f) => *f as i64,
                })
                .collect();
            ArrayD::from_shape_vec(IxDyn(&walk.shape), data)
                .ok()
                .map(Self::I64)
        } else {
            let data = walk
                .leaves
                .iter()
                .map(|leaf| match leaf {
                    Leaf::Int(n) => *n as f64,
                    Leaf::Float(f) => *f,
                })
                .collect();
            ArrayD::from_shape_vec(IxDyn(&walk.shape), data)
                .ok()
                .map(Self::F64)
        }
    }
}

fn nest<T>(view: ArrayViewD<'_, T>, leaf: &dyn Fn(&T) -> Option<Value>) -> Option<Value> {
    if view.ndim() == 0 {
        return view.iter().next().and_then(leaf);
    }
    view.outer_iter()
        .map(|sub| nest(sub, leaf))
        .collect::<Option<Vec<_>>>()
        .map(Value::Sequence)
}

enum Leaf {
    Int(i64),
    Float(f64),
}

struct ShapeWalk {
    shape: Vec<usize>,
    leaves: Vec<Leaf>,
    leaf_depth: Option<usize>,
    all_int: bool,
}

impl Default for ShapeWalk {
    fn default() -> Self {
        Self {
            shape: Vec::new(),
            leaves: Vec::new(),
            leaf_depth: None,
            all_int: true,
        }
    }
}

impl ShapeWalk {
    fn visit(&mut self, items: &[Value], depth: usize) -> Option<()> {
        match self.shape.get(depth) {
            Some(&len) if len != items.len() => return None,
            Some(_) => {}
            None => self.shape.push(items.len()),
        }

        for item in items {
            match item {
                Value::Int(n) => self.leaf(Leaf::Int(*n), depth)?,
                Value::Float(f) => {
                    self.all_int = false;
                    self.leaf(Leaf::Float(*f), depth)?
                }
                Value::Sequence(inner) => self.nested(inner, depth)?,
                Value::Array(array) if array.element_kind().is_number() => {
                    match array.to_nested()? {
                        Value::Sequence(inner) => self.nested(&inner, depth)?,
                        Value::Int(n) => self.leaf(Leaf::Int(n), depth)?,
                        Value::Float(f) => {
                            self.all_int = false;
                            self.leaf(Leaf::Float(f), depth)?
                        }
                        _ => return None,
                    }
                }
                _ => return None,
            }
        }
        Some(())
    }

    fn leaf(&mut self, leaf: Leaf, depth: usize) -> Option<()> {
        match self.leaf_depth {
            Some(d) if d != depth => return None,
            Some(_) => {}
            None => {
                if self.shape.len() != depth + 1 {
                    return None;
                }
                self.leaf_depth = Some(depth);
            }
        }
        self.leaves.push(leaf);
        Some(())
    }

    fn nested(&mut self, inner: &[Value], depth: usize) -> Option<()> {
        if matches!(self.leaf_depth, Some(d) if d <= depth) {
            return None;
        }
        self.visit(inner, depth + 1)
    }
}
