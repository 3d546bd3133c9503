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

//! Document to YAML text conversion.
//!
//! Writing happens in two steps. The document is first represented as a
//! tree of rendered scalars, sequences and mappings; each sequence records
//! its shape when it is a rectangular array of numbers. The tree is then
//! emitted, choosing per sequence between flow style (`[1, 2, 3]`) and block
//! style (one `- item` per line):
//!
//! - a sequence whose shape has at most `inline_depth` dimensions renders
//!   inline,
//! - everything else renders as a block, and its children decide again.
//!
//! With the default depth of 1 a vector of numbers stays on one line and a
//! matrix renders one row per line.

use super::Codec;
use crate::error::{CodecError, Result};
use crate::numeric::NumericScalar;
use crate::value::Value;
use serde_yaml::Value as YamlValue;

enum Node {
    Scalar { text: String, numeric: bool },
    Sequence { items: Vec<Node>, shape: Option<Vec<usize>> },
    Mapping(Vec<(String, Node)>),
}

pub(super) fn emit_document(codec: &Codec, value: &Value) -> Result<String> {
    let mut path = String::from("root");
    let node = represent(codec, value, &mut path)?;
    let mut emitter = Emitter {
        inline_depth: codec.config().inline_depth,
        indent: codec.config().indent,
        out: String::new(),
    };
    if emitter.is_inline(&node) {
        emitter.out.push_str(&inline_text(&node));
        emitter.out.push('\n');
    } else {
        emitter.block(&node, 0);
    }
    Ok(emitter.out)
}

fn represent(codec: &Codec, value: &Value, path: &mut String) -> Result<Node> {
    let node = match value {
        Value::Null => scalar("null", false),
        Value::Bool(b) => scalar(if *b { "true" } else { "false" }, false),
        Value::Int(n) => scalar(&n.to_string(), true),
        Value::Float(f) => scalar(&float_text(*f), true),
        Value::String(s) => scalar(&string_text(s), false),
        Value::Sequence(items) => {
            let mut nodes = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{}]", i));
                nodes.push(represent(codec, item, path)?);
                path.truncate(len);
            }
            sequence(nodes)
        }
        Value::Mapping(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, item) in map {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                entries.push((string_text(key), represent(codec, item, path)?));
                path.truncate(len);
            }
            Node::Mapping(entries)
        }
        Value::Numeric(numeric) => {
            ensure_numeric_write(codec, value, path)?;
            match (numeric.to_native(), numeric) {
                (Some(native), _) => represent(codec, &native, path)?,
                (None, NumericScalar::U64(n)) => scalar(&n.to_string(), true),
                (None, _) => return Err(unrepresentable(value, path)),
            }
        }
        Value::Array(array) => {
            ensure_numeric_write(codec, value, path)?;
            represent(codec, &array.to_nested_lossy(), path)?
        }
    };
    Ok(node)
}

fn ensure_numeric_write(codec: &Codec, value: &Value, path: &str) -> Result<()> {
    if codec.config().numeric_write_enabled {
        Ok(())
    } else {
        Err(unrepresentable(value, path))
    }
}

fn unrepresentable(value: &Value, path: &str) -> CodecError {
    CodecError::UnrepresentableValue {
        path: path.to_string(),
        kind: value.type_name().to_string(),
    }
}

fn scalar(text: &str, numeric: bool) -> Node {
    Node::Scalar {
        text: text.to_string(),
        numeric,
    }
}

fn sequence(items: Vec<Node>) -> Node {
    let shape = array_shape(&items);
    Node::Sequence { items, shape }
}

/// Shape of `items` read as a rectangular array of numbers.
fn array_shape(items: &[Node]) -> Option<Vec<usize>> {
    let mut inner: Option<Vec<usize>> = None;
    for item in items {
        let item_shape = match item {
            Node::Scalar { numeric: true, .. } => Vec::new(),
            Node::Sequence { shape: Some(shape), .. } => shape.clone(),
            _ => return None,
        };
        if *inner.get_or_insert_with(|| item_shape.clone()) != item_shape {
            return None;
        }
    }
    let mut shape = vec![items.len()];
    shape.extend(inner.unwrap_or_default());
    Some(shape)
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { ".inf" } else { "-.inf" };
        text.to_string()
    } else {
        format!("{:?}", f)
    }
}

fn string_text(s: &str) -> String {
    if is_plain_safe(s) {
        s.to_string()
    } else {
        double_quoted(s)
    }
}

/// JSON string syntax is valid YAML double-quoted syntax, apart from the
/// characters YAML treats as breaks or non-printable.
fn double_quoted(s: &str) -> String {
    let json = serde_json::to_string(s).unwrap_or_else(|_| format!("{:?}", s));
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '\u{85}' => out.push_str("\\N"),
            '\u{7f}'..='\u{9f}' => out.push_str(&format!("\\x{:02X}", c as u32)),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            '\u{feff}' | '\u{fffe}' | '\u{ffff}' => {
                out.push_str(&format!("\\u{:04X}", c as u32))
            }
            _ => out.push(c),
        }
    }
    out
}

/// True when `s` reads back as the same string without quotes.
fn is_plain_safe(s: &str) -> bool {
    const INDICATORS: &str = "-?:,[]{}#&*!|>'\"%@`";

    if s.is_empty()
        || s.trim() != s
        || s.chars().any(|c| {
            c.is_control()
                || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}')
        })
    {
        return false;
    }
    if s.starts_with(|c: char| INDICATORS.contains(c)) {
        return false;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return false;
    }
    matches!(
        serde_yaml::from_str::<YamlValue>(s),
        Ok(YamlValue::String(ref parsed)) if parsed == s
    )
}

fn inline_text(node: &Node) -> String {
    match node {
        Node::Scalar { text, .. } => text.clone(),
        Node::Sequence { items, .. } => {
            let parts: Vec<String> = items.iter().map(inline_text).collect();
            format!("[{}]", parts.join(", "))
        }
        Node::Mapping(_) => "{}".to_string(),
    }
}

/// Readers only accept implicit keys up to this length.
const MAX_SIMPLE_KEY_LEN: usize = 1024;

struct Emitter {
    inline_depth: usize,
    indent: usize,
    out: String,
}

impl Emitter {
    fn is_inline(&self, node: &Node) -> bool {
        match node {
            Node::Scalar { .. } => true,
            Node::Sequence { items, shape } => {
                items.is_empty() || matches!(shape, Some(s) if s.len() <= self.inline_depth)
            }
            Node::Mapping(entries) => entries.is_empty(),
        }
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat(' ').take(indent));
    }

    /// Writes `? key` and `: value` on separate lines.
    fn explicit_entry(&mut self, key: &str, value: &Node, indent: usize) {
        self.pad(indent);
        self.out.push_str("? ");
        self.out.push_str(key);
        self.out.push('\n');
        self.pad(indent);
        self.out.push(':');
        if self.is_inline(value) {
            self.out.push(' ');
            self.out.push_str(&inline_text(value));
            self.out.push('\n');
        } else {
            self.out.push('\n');
            self.block(value, indent + self.indent);
        }
    }

    fn block(&mut self, node: &Node, indent: usize) {
        match node {
            Node::Mapping(entries) => {
                for (key, value) in entries {
                    if key.len() >= MAX_SIMPLE_KEY_LEN {
                        self.explicit_entry(key, value, indent);
                        continue;
                    }
                    self.pad(indent);
                    self.out.push_str(key);
                    self.out.push(':');
                    if self.is_inline(value) {
                        self.out.push(' ');
                        self.out.push_str(&inline_text(value));
                        self.out.push('\n');
                    } else {
                        self.out.push('\n');
                        let child_indent = match value {
                            Node::Mapping(_) => indent + self.indent,
                            _ => indent,
                        };
                        self.block(value, child_indent);
                    }
                }
            }
            Node::Sequence { items, .. } => {
                for item in items {
                    if self.is_inline(item) {
                        self.pad(indent);
                        self.out.push_str("- ");
                        self.out.push_str(&inline_text(item));
                        self.out.push('\n');
                    } else {
                        // Render the item two columns in, then put the dash
                        // in front of its first line.
                        let mut nested = Emitter {
                            inline_depth: self.inline_depth,
                            indent: self.indent,
                            out: String::new(),
                        };
                        nested.block(item, indent + 2);
                        self.pad(indent);
                        self.out.push_str("- ");
                        self.out.push_str(&nested.out[indent + 2..]);
                    }
                }
            }
            Node::Scalar { text, .. } => {
                self.pad(indent);
                self.out.push_str(text);
                self.out.push('\n');
            }
        }
    }
}
