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

//! NYML: Numeric YAML with Includes
//!
//! A YAML reader/writer for engineering input files. On top of plain YAML it
//! adds:
//!
//! - an `!include` tag that inlines another YAML document or a NetCDF
//!   dataset at load time, relative to the including file,
//! - a normalization pass that turns numeric scalars and `ndarray` arrays
//!   into plain YAML scalars and sequences before writing,
//! - layout control, so that numeric vectors render on one line and
//!   matrices render one row per line.
//!
//! # Examples
//!
//! ## Loading with includes
//!
//! ```rust,no_run
//! // plant.yaml:
//! //   name: demo
//! //   rotor: !include parts/rotor.yaml
//! //   wind: !include data/wind.nc
//! let doc = nyml::load("plant.yaml").unwrap();
//! println!("{:?}", doc.get("rotor"));
//! ```
//!
//! ## Storing numeric data
//!
//! ```rust
//! use ndarray::arr2;
//! use nyml::{Codec, NumericArray, Value};
//!
//! let doc: Value = vec![
//!     ("name".to_string(), Value::from("grid")),
//!     ("m".to_string(), Value::Array(NumericArray::F64(arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn()))),
//! ]
//! .into_iter()
//! .collect();
//!
//! let yaml = Codec::default().dump_to_string(&nyml::normalized(&doc)).unwrap();
//! assert_eq!(yaml, "name: grid\nm:\n- [1.0, 2.0]\n- [3.0, 4.0]\n");
//! ```
//!
//! ## Validating after load
//!
//! ```rust,no_run
//! use nyml::{load_validated, ValidationError, Value};
//! use std::path::Path;
//!
//! let doc = load_validated("plant.yaml", "schema.yaml", &|doc: &Value, schema: &Path| {
//!     match doc.get("name") {
//!         Some(_) => Ok(()),
//!         None => Err(ValidationError::new(schema, "'name' is a required property")),
//!     }
//! })
//! .unwrap();
//! # let _ = doc;
//! ```

pub mod codec;
pub mod dataset;
pub mod error;
pub mod include;
pub mod normalize;
pub mod numeric;
pub mod validate;
pub mod value;

pub use codec::{Codec, CodecConfig, CodecConfigBuilder, INCLUDE_TAG};
pub use dataset::{flatten, read_netcdf, Dataset};
pub use error::{CodecError, Result};
pub use normalize::{normalize, normalized, ConversionSkipped, NormalizeReport};
pub use numeric::{NumericArray, NumericKind, NumericScalar};
pub use validate::{SchemaValidator, ValidationError};
pub use value::{Mapping, Value};

use std::path::Path;

/// Loads a document with the default codec.
pub fn load(path: impl AsRef<Path>) -> Result<Value> {
    load_with(path, &Codec::default())
}

/// Loads a document with `codec`.
pub fn load_with(path: impl AsRef<Path>, codec: &Codec) -> Result<Value> {
    codec.load(path)
}

/// Normalizes a copy of `document` and writes it with the default codec.
pub fn store(document: &Value, path: impl AsRef<Path>) -> Result<()> {
    store_with(document, path, &Codec::default())
}

/// Normalizes a copy of `document` and writes it with `codec`.
pub fn store_with(document: &Value, path: impl AsRef<Path>, codec: &Codec) -> Result<()> {
    codec.dump(&normalized(document), path)
}

/// Loads a document and checks it against `schema`.
pub fn load_validated<V>(
    path: impl AsRef<Path>,
    schema: impl AsRef<Path>,
    validator: &V,
) -> Result<Value>
where
    V: SchemaValidator + ?Sized,
{
    load_validated_with(path, schema, validator, &Codec::default())
}

/// Loads a document with `codec` and checks it against `schema`.
pub fn load_validated_with<V>(
    path: impl AsRef<Path>,
    schema: impl AsRef<Path>,
    validator: &V,
    codec: &Codec,
) -> Result<Value>
where
    V: SchemaValidator + ?Sized,
{
    let document = load_with(path, codec)?;
    validator.validate(&document, schema.as_ref())?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");

        let doc: Value = vec![
            ("name".to_string(), Value::from("turbine")),
            ("hub_height".to_string(), Value::Float(150.0)),
            ("blades".to_string(), Value::Int(3)),
        ]
        .into_iter()
        .collect();

        store(&doc, &path).unwrap();
        assert_eq!(load(&path).unwrap(), doc);
    }

    #[test]
    fn test_store_normalizes_numeric_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");

        let doc: Value = vec![
            ("n".to_string(), Value::Numeric(NumericScalar::I32(7))),
            ("empty".to_string(), Value::Mapping(Mapping::new())),
        ]
        .into_iter()
        .collect();

        store(&doc, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "n: 7\n");
    }

    #[test]
    fn test_load_validated_rejects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        std::fs::write(&path, "a: 1\n").unwrap();

        let reject = |_: &Value, schema: &Path| -> std::result::Result<(), ValidationError> {
            Err(ValidationError::new(schema, "'name' is a required property"))
        };
        let err = load_validated(&path, "schema.yaml", &reject).unwrap_err();
        match err {
            CodecError::Validation(e) => assert_eq!(e.schema, "schema.yaml"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_load_validated_accepts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        std::fs::write(&path, "name: x\n").unwrap();

        let accept = |_: &Value, _: &Path| -> std::result::Result<(), ValidationError> { Ok(()) };
        let doc = load_validated(&path, "schema.yaml", &accept).unwrap();
        assert_eq!(doc.get("name"), Some(&Value::from("x")));
    }

    #[test]
    fn test_load_validated_with_uses_codec() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        std::fs::write(&path, "m: [[1, 2], [3, 4]]\n").unwrap();

        let codec = Codec::new(CodecConfig::builder().numeric_read_inference(true).build());
        let seen_array = |document: &Value, schema: &Path| -> std::result::Result<(), ValidationError> {
            match document.get("m") {
                Some(Value::Array(_)) => Ok(()),
                _ => Err(ValidationError::new(schema, "'m' is not an array")),
            }
        };
        let doc = load_validated_with(&path, "schema.yaml", &seen_array, &codec).unwrap();
        assert_eq!(doc.get("m").and_then(Value::as_array).map(|a| a.shape().to_vec()), Some(vec![2, 2]));

        let err = load_validated(&path, "schema.yaml", &seen_array).unwrap_err();
        assert!(matches!(err, CodecError::Validation(_)));
    }
}
