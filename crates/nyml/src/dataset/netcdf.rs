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

//! NetCDF classic reader.
//!
//! Variables are decoded the way CF readers do before they reach the
//! document:
//!
//! - `NC_CHAR` variables are joined along their last dimension into strings,
//!   with trailing NUL padding removed.
//! - `_FillValue` (or `missing_value`) entries become NaN.
//! - `scale_factor` and `add_offset` are applied to the remaining entries.
//!
//! A numeric variable carrying any of those attributes is read as `f64`.

use super::Dataset;
use crate::error::{CodecError, Result};
use crate::numeric::NumericArray;
use ndarray::{ArrayD, IxDyn};
use netcdf3::{DataVector, FileReader, Variable};
use std::path::Path;
use tracing::debug;

/// Per-variable packing attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Encoding {
    fill: Option<f64>,
    scale: Option<f64>,
    offset: Option<f64>,
}

impl Encoding {
    fn of(var: &Variable) -> Self {
        Self {
            fill: attr_f64(var, "_FillValue").or_else(|| attr_f64(var, "missing_value")),
            scale: attr_f64(var, "scale_factor"),
            offset: attr_f64(var, "add_offset"),
        }
    }

    fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Masks fill entries first, then unpacks the rest.
    fn decode(&self, raw: f64) -> f64 {
        if self.fill == Some(raw) {
            return f64::NAN;
        }
        raw * self.scale.unwrap_or(1.0) + self.offset.unwrap_or(0.0)
    }
}

struct VarLayout {
    name: String,
    dims: Vec<String>,
    shape: Vec<usize>,
    encoding: Encoding,
}

/// Reads a NetCDF-3 file into a [`Dataset`].
///
/// Dimension coordinates (a one-dimensional variable named after its
/// dimension) become coordinates; every other variable is a data variable.
pub fn read_netcdf(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(CodecError::io(
            path,
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    let mut reader = FileReader::open(path).map_err(|e| dataset_error(path, e))?;

    let mut layout = Vec::new();
    {
        let data_set = reader.data_set();
        for name in data_set.get_var_names() {
            let Some(var) = data_set.get_var(&name) else {
                continue;
            };
            layout.push(VarLayout {
                dims: var.dim_names(),
                shape: var.get_dims().iter().map(|d| d.size()).collect(),
                encoding: Encoding::of(var),
                name,
            });
        }
    }

    let mut dataset = Dataset::new();
    for var in layout {
        let data = reader.read_var(&var.name).map_err(|e| dataset_error(path, e))?;
        let is_char = matches!(data, DataVector::U8(_));
        let array = to_array(data, &var.shape, var.encoding).ok_or_else(|| CodecError::Dataset {
            path: path.to_path_buf(),
            message: format!("variable '{}' does not match shape {:?}", var.name, var.shape),
        })?;

        // A char variable loses its string-length dimension.
        let dims = if is_char {
            &var.dims[..var.dims.len().saturating_sub(1)]
        } else {
            &var.dims[..]
        };
        if dims.len() == 1 && dims[0] == var.name {
            dataset.coords.insert(var.name, array);
        } else {
            dataset.data_vars.insert(var.name, array);
        }
    }

    debug!(
        path = %path.display(),
        coords = dataset.coords.len(),
        data_vars = dataset.data_vars.len(),
        "read dataset"
    );
    Ok(dataset)
}

fn to_array(data: DataVector, shape: &[usize], encoding: Encoding) -> Option<NumericArray> {
    if let DataVector::U8(chars) = data {
        return strings(chars, shape);
    }
    if !encoding.is_identity() {
        let decoded = match data {
            DataVector::I8(v) => v.into_iter().map(|x| encoding.decode(f64::from(x))).collect(),
            DataVector::I16(v) => v.into_iter().map(|x| encoding.decode(f64::from(x))).collect(),
            DataVector::I32(v) => v.into_iter().map(|x| encoding.decode(f64::from(x))).collect(),
            DataVector::F32(v) => v.into_iter().map(|x| encoding.decode(f64::from(x))).collect(),
            DataVector::F64(v) => v.into_iter().map(|x| encoding.decode(x)).collect(),
            DataVector::U8(_) => return None,
        };
        return floats(IxDyn(shape), decoded);
    }
    let shape = IxDyn(shape);
    match data {
        DataVector::I8(v) => ints(shape, v.into_iter().map(i64::from).collect()),
        DataVector::I16(v) => ints(shape, v.into_iter().map(i64::from).collect()),
        DataVector::I32(v) => ints(shape, v.into_iter().map(i64::from).collect()),
        DataVector::F32(v) => floats(shape, v.into_iter().map(f64::from).collect()),
        DataVector::F64(v) => floats(shape, v),
        DataVector::U8(_) => None,
    }
}

/// Joins a char variable along its last dimension.
fn strings(chars: Vec<u8>, shape: &[usize]) -> Option<NumericArray> {
    // A scalar char variable holds a single character.
    let (width, outer) = match shape.split_last() {
        Some((&width, outer)) => (width, outer),
        None => (chars.len(), &[][..]),
    };
    let count: usize = outer.iter().product();
    if chars.len() != count * width {
        return None;
    }
    let joined: Vec<String> = if width == 0 {
        vec![String::new(); count]
    } else {
        chars
            .chunks(width)
            .map(|chunk| {
                String::from_utf8_lossy(chunk)
                    .trim_end_matches('\0')
                    .to_string()
            })
            .collect()
    };
    ArrayD::from_shape_vec(IxDyn(outer), joined)
        .ok()
        .map(NumericArray::Str)
}

/// First element of a numeric attribute, whatever its stored type.
fn attr_f64(var: &Variable, name: &str) -> Option<f64> {
    let attr = var.get_attr(name)?;
    attr.get_f64()
        .and_then(|v| v.first().copied())
        .or_else(|| attr.get_f32().and_then(|v| v.first().map(|x| f64::from(*x))))
        .or_else(|| attr.get_i32().and_then(|v| v.first().map(|x| f64::from(*x))))
        .or_else(|| attr.get_i16().and_then(|v| v.first().map(|x| f64::from(*x))))
        .or_else(|| attr.get_i8().and_then(|v| v.first().map(|x| f64::from(*x))))
}

fn ints(shape: IxDyn, data: Vec<i64>) -> Option<NumericArray> {
    ArrayD::from_shape_vec(shape, data).ok().map(NumericArray::I64)
}

fn floats(shape: IxDyn, data: Vec<f64>) -> Option<NumericArray> {
    ArrayD::from_shape_vec(shape, data).ok().map(NumericArray::F64)
}

fn dataset_error(path: &Path, err: impl std::fmt::Debug) -> CodecError {
    CodecError::Dataset {
        path: path.to_path_buf(),
        message: format!("{:?}", err),
    }
}
