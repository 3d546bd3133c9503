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

//! YAML text to document conversion.

use super::{Codec, INCLUDE_TAG};
use crate::error::{CodecError, Result};
use crate::include::{self, IncludeContext};
use crate::numeric::NumericArray;
use crate::value::{Mapping, Value};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::Value as YamlValue;
use std::path::Path;

pub(super) fn parse_document(
    codec: &Codec,
    text: &str,
    origin: Option<&Path>,
    ctx: &mut IncludeContext,
) -> Result<Value> {
    let yaml: YamlValue = serde_yaml::from_str(text).map_err(|e| CodecError::parse(origin, e))?;
    let mut constructor = Constructor { codec, origin, ctx };
    let mut path = String::from("root");
    constructor.construct(&yaml, &mut path)
}

struct Constructor<'a> {
    codec: &'a Codec,
    origin: Option<&'a Path>,
    ctx: &'a mut IncludeContext,
}

impl Constructor<'_> {
    fn construct(&mut self, yaml: &YamlValue, path: &mut String) -> Result<Value> {
        match yaml {
            YamlValue::Null => Ok(Value::Null),
            YamlValue::Bool(b) => Ok(Value::Bool(*b)),
            YamlValue::Number(n) => Ok(number(n)),
            YamlValue::String(s) => Ok(Value::String(s.clone())),
            YamlValue::Sequence(items) => self.construct_sequence(items, path),
            YamlValue::Mapping(map) => self.construct_mapping(map, path),
            YamlValue::Tagged(tagged) => self.construct_tagged(tagged),
        }
    }

    fn construct_sequence(&mut self, items: &[YamlValue], path: &mut String) -> Result<Value> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let len = path.len();
            path.push_str(&format!("[{}]", i));
            out.push(self.construct(item, path)?);
            path.truncate(len);
        }

        if self.codec.config().numeric_read_inference {
            if let Some(array) = NumericArray::from_sequence(&out) {
                return Ok(Value::Array(array));
            }
        }
        Ok(Value::Sequence(out))
    }

    fn construct_mapping(&mut self, map: &serde_yaml::Mapping, path: &mut String) -> Result<Value> {
        let mut out = Mapping::with_capacity(map.len());
        for (key, value) in map {
            let key = key_text(key).ok_or_else(|| CodecError::NonStringKey {
                key_type: yaml_type_name(key).to_string(),
                path: path.clone(),
            })?;
            let len = path.len();
            path.push('.');
            path.push_str(&key);
            let value = self.construct(value, path)?;
            path.truncate(len);
            out.insert(key, value);
        }
        Ok(Value::Mapping(out))
    }

    fn construct_tagged(&mut self, tagged: &TaggedValue) -> Result<Value> {
        if !self.codec.config().include_enabled || tagged.tag != Tag::new(INCLUDE_TAG) {
            return Err(CodecError::UnknownTag {
                tag: tagged.tag.to_string(),
            });
        }

        let token = match &tagged.value {
            YamlValue::String(s) => s.as_str(),
            other => {
                return Err(CodecError::InvalidIncludeToken {
                    found: yaml_type_name(other).to_string(),
                })
            }
        };
        let containing = self.origin.ok_or_else(|| CodecError::IncludeWithoutOrigin {
            token: token.to_string(),
        })?;
        include::resolve(self.codec, token, containing, self.ctx)
    }
}

fn number(n: &serde_yaml::Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn key_text(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some("null".to_string()),
        YamlValue::Tagged(tagged) => key_text(&tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

fn yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "bool",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}
