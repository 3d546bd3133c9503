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

//! Include resolution tests over real file trees.

use netcdf3::{DataSet, FileWriter, Version};
use nyml::{load, load_with, Codec, CodecConfig, CodecError, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path
}

fn ints(xs: &[i64]) -> Value {
    Value::Sequence(xs.iter().map(|n| Value::Int(*n)).collect())
}

// =============================================================================
// Document Includes
// =============================================================================

#[test]
fn test_include_inlines_document() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.yaml", "x: 1\ny: [1, 2]\n");
    let a = write(dir.path(), "a.yaml", "name: a\nb: !include b.yaml\n");

    let doc = load(&a).unwrap();
    let b = doc.get("b").unwrap();
    assert_eq!(b.get("x"), Some(&Value::Int(1)));
    assert_eq!(b.get("y"), Some(&ints(&[1, 2])));
    assert_eq!(doc.get("name"), Some(&Value::from("a")));
}

#[test]
fn test_include_in_sequence() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "one.yml", "id: 1\n");
    write(dir.path(), "two.yml", "id: 2\n");
    let a = write(
        dir.path(),
        "a.yaml",
        "parts:\n- !include one.yml\n- !include two.yml\n",
    );

    let doc = load(&a).unwrap();
    let parts = doc.get("parts").unwrap().as_sequence().unwrap();
    assert_eq!(parts[0].get("id"), Some(&Value::Int(1)));
    assert_eq!(parts[1].get("id"), Some(&Value::Int(2)));
}

#[test]
fn test_nested_includes_resolve_relative_to_each_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "parts/blade/airfoil.yaml", "thickness: 0.21\n");
    write(
        dir.path(),
        "parts/rotor.yaml",
        "blades: 3\nairfoil: !include blade/airfoil.yaml\n",
    );
    let plant = write(dir.path(), "plant.yaml", "rotor: !include parts/rotor.yaml\n");

    let doc = load(&plant).unwrap();
    let rotor = doc.get("rotor").unwrap();
    assert_eq!(rotor.get("blades"), Some(&Value::Int(3)));
    assert_eq!(
        rotor.get("airfoil").and_then(|a| a.get("thickness")),
        Some(&Value::Float(0.21))
    );
}

#[test]
fn test_scalar_document_include() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "value.yaml", "42\n");
    let a = write(dir.path(), "a.yaml", "v: !include value.yaml\n");

    assert_eq!(load(&a).unwrap().get("v"), Some(&Value::Int(42)));
}

#[test]
fn test_diamond_include_is_allowed() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "shared.yaml", "k: v\n");
    write(dir.path(), "left.yaml", "s: !include shared.yaml\n");
    write(dir.path(), "right.yaml", "s: !include shared.yaml\n");
    let top = write(
        dir.path(),
        "top.yaml",
        "l: !include left.yaml\nr: !include right.yaml\n",
    );

    let doc = load(&top).unwrap();
    assert_eq!(doc.get("l"), doc.get("r"));
}

#[test]
fn test_load_str_with_origin_resolves_includes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.yaml", "x: 1\n");
    let origin = dir.path().join("virtual.yaml");

    let doc = Codec::default()
        .load_str("b: !include b.yaml\n", Some(&origin))
        .unwrap();
    assert_eq!(doc.get("b").and_then(|b| b.get("x")), Some(&Value::Int(1)));
}

// =============================================================================
// Include Errors
// =============================================================================

#[test]
fn test_cycle_between_two_documents() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.yaml", "b: !include b.yaml\n");
    write(dir.path(), "b.yaml", "a: !include a.yaml\n");

    match load(&a) {
        Err(CodecError::CyclicInclude { path, chain }) => {
            assert_eq!(path.file_name().unwrap(), "a.yaml");
            assert_eq!(chain.len(), 3);
        }
        other => panic!("expected CyclicInclude, got {:?}", other),
    }
}

#[test]
fn test_self_include() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.yaml", "me: !include a.yaml\n");

    assert!(matches!(load(&a), Err(CodecError::CyclicInclude { .. })));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "table.csv", "a,b\n1,2\n");
    let a = write(dir.path(), "a.yaml", "t: !include table.csv\n");

    match load(&a) {
        Err(CodecError::UnsupportedIncludeFormat { extension, .. }) => {
            assert_eq!(extension, ".csv")
        }
        other => panic!("expected UnsupportedIncludeFormat, got {:?}", other),
    }
}

#[test]
fn test_missing_include_target() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.yaml", "b: !include missing.yaml\n");

    let err = load(&a).unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {}", err);
}

#[test]
fn test_parse_error_in_included_document_names_it() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.yaml", "x: [1, 2\n");
    let a = write(dir.path(), "a.yaml", "b: !include bad.yaml\n");

    match load(&a) {
        Err(CodecError::Parse { path: Some(path), .. }) => {
            assert_eq!(path.file_name().unwrap(), "bad.yaml")
        }
        other => panic!("expected Parse, got {:?}", other),
    }
}

#[test]
fn test_include_disabled() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.yaml", "x: 1\n");
    let a = write(dir.path(), "a.yaml", "b: !include b.yaml\n");

    let codec = Codec::new(CodecConfig::builder().include(false).build());
    assert!(matches!(
        load_with(&a, &codec),
        Err(CodecError::UnknownTag { .. })
    ));
}

#[test]
fn test_nested_include_uses_codec_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.yaml", "m: [[1, 2], [3, 4]]\n");
    let a = write(dir.path(), "a.yaml", "b: !include b.yaml\n");

    let codec = Codec::new(CodecConfig::builder().numeric_read_inference(true).build());
    let doc = load_with(&a, &codec).unwrap();
    let m = doc.get("b").and_then(|b| b.get("m")).unwrap();
    assert_eq!(m.as_array().unwrap().shape(), &[2, 2]);
}

// =============================================================================
// Dataset Includes
// =============================================================================

fn write_dataset(path: &Path) {
    let mut data_set = DataSet::new();
    data_set.add_fixed_dim("x", 3).unwrap();
    data_set.add_fixed_dim("col", 2).unwrap();
    data_set.add_var_i32("x", &["x"]).unwrap();
    data_set.add_var_f64("y", &["x", "col"]).unwrap();

    let mut writer = FileWriter::open(path).unwrap();
    writer.set_def(&data_set, Version::Classic, 0).unwrap();
    writer.write_var_i32("x", &[1, 2, 3]).unwrap();
    writer
        .write_var_f64("y", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .unwrap();
    writer.close().unwrap();
}

#[test]
fn test_dataset_include_flattens() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    write_dataset(&dir.path().join("data/wind.nc"));
    let a = write(dir.path(), "a.yaml", "wind: !include data/wind.nc\n");

    let doc = load(&a).unwrap();
    let wind = doc.get("wind").unwrap();
    assert_eq!(wind.get("x"), Some(&ints(&[1, 2, 3])));

    let rows: Vec<Value> = [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]
        .iter()
        .map(|row| Value::Sequence(row.iter().map(|f| Value::Float(*f)).collect()))
        .collect();
    assert_eq!(wind.get("y"), Some(&Value::Sequence(rows)));
}

#[test]
fn test_missing_dataset() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.yaml", "wind: !include nothing.nc\n");

    assert!(load(&a).unwrap_err().is_not_found());
}

fn write_station(path: &Path) {
    let mut data_set = DataSet::new();
    data_set.add_fixed_dim("time", 2).unwrap();
    data_set.add_fixed_dim("nchar", 3).unwrap();
    data_set.add_var_u8("label", &["nchar"]).unwrap();
    data_set.add_var_u8("site", &["time", "nchar"]).unwrap();
    data_set.add_var_f64("ws", &["time"]).unwrap();
    data_set
        .add_var_attr_f64("ws", "_FillValue", vec![-999.0])
        .unwrap();
    data_set.add_var_i32("temp", &["time"]).unwrap();
    data_set
        .add_var_attr_f64("temp", "scale_factor", vec![0.5])
        .unwrap();
    data_set
        .add_var_attr_f64("temp", "add_offset", vec![270.0])
        .unwrap();

    let mut writer = FileWriter::open(path).unwrap();
    writer.set_def(&data_set, Version::Classic, 0).unwrap();
    writer.write_var_u8("label", b"abc").unwrap();
    writer.write_var_u8("site", b"ns\0off").unwrap();
    writer.write_var_f64("ws", &[1.0, -999.0]).unwrap();
    writer.write_var_i32("temp", &[10, 20]).unwrap();
    writer.close().unwrap();
}

#[test]
fn test_dataset_char_variables_become_strings() {
    let dir = TempDir::new().unwrap();
    write_station(&dir.path().join("station.nc"));
    let a = write(dir.path(), "a.yaml", "station: !include station.nc\n");

    let doc = load(&a).unwrap();
    let station = doc.get("station").unwrap();
    assert_eq!(station.get("label"), Some(&Value::from("abc")));
    assert_eq!(
        station.get("site"),
        Some(&Value::Sequence(vec![Value::from("ns"), Value::from("off")]))
    );
}

#[test]
fn test_dataset_fill_value_becomes_nan() {
    let dir = TempDir::new().unwrap();
    write_station(&dir.path().join("station.nc"));
    let a = write(dir.path(), "a.yaml", "station: !include station.nc\n");

    let doc = load(&a).unwrap();
    let ws = doc
        .get("station")
        .and_then(|s| s.get("ws"))
        .and_then(Value::as_sequence)
        .unwrap();
    assert_eq!(ws[0], Value::Float(1.0));
    assert!(matches!(ws[1], Value::Float(f) if f.is_nan()));
}

#[test]
fn test_dataset_scale_and_offset_unpack() {
    let dir = TempDir::new().unwrap();
    write_station(&dir.path().join("station.nc"));
    let a = write(dir.path(), "a.yaml", "station: !include station.nc\n");

    let doc = load(&a).unwrap();
    assert_eq!(
        doc.get("station").and_then(|s| s.get("temp")),
        Some(&Value::Sequence(vec![Value::Float(275.0), Value::Float(280.0)]))
    );
}
