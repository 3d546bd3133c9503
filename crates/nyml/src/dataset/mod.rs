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

//! Labeled multi-dimensional datasets embedded through `!include`.
//!
//! A [`Dataset`] holds coordinate arrays and data variables. When a document
//! includes a dataset file, the dataset is read, flattened into a single
//! mapping with [`flatten`], and dropped.

mod netcdf;

pub use netcdf::read_netcdf;

use crate::normalize::normalize;
use crate::numeric::NumericArray;
use crate::value::{Mapping, Value};
use indexmap::IndexMap;

/// Coordinates and data variables of a dataset, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub coords: IndexMap<String, NumericArray>,
    pub data_vars: IndexMap<String, NumericArray>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coord(mut self, name: impl Into<String>, values: NumericArray) -> Self {
        self.coords.insert(name.into(), values);
        self
    }

    pub fn with_var(mut self, name: impl Into<String>, values: NumericArray) -> Self {
        self.data_vars.insert(name.into(), values);
        self
    }
}

/// Flattens a dataset into `name -> nested list` entries.
///
/// Coordinates come first, then data variables. A variable named like a
/// coordinate replaces the coordinate's value in place.
pub fn flatten(dataset: &Dataset) -> Mapping {
    let mut merged = Value::Mapping(
        dataset
            .coords
            .iter()
            .chain(dataset.data_vars.iter())
            .map(|(name, values)| (name.clone(), Value::Array(values.clone())))
            .collect(),
    );
    normalize(&mut merged);
    match merged {
        Value::Mapping(map) => map,
        _ => Mapping::new(),
    }
}
