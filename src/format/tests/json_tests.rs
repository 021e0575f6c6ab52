//! Tests for the native JSON format.

use crate::model::{ColorLabels, OneHot};

#[test]
fn test_read_single_label_json() {
    let json = r#"{
        "colors": [[0, 0, 0], [255, 0, 0]],
        "one_hot_encoding": null,
        "labels": ["background", "red"]
    }"#;

    let mapping = ColorLabels::from_json_str(json).unwrap();
    assert_eq!(mapping.colors(), &[[0, 0, 0], [255, 0, 0]]);
    assert!(!mapping.is_multilabel());
    assert_eq!(mapping.labels().unwrap(), &["background", "red"]);
}

#[test]
fn test_read_json_with_missing_optional_fields() {
    let mapping = ColorLabels::from_json_str(r#"{"colors": [[1, 2, 3]]}"#).unwrap();
    assert_eq!(mapping.colors(), &[[1, 2, 3]]);
    assert!(mapping.one_hot_encoding().is_none());
    assert!(mapping.labels().is_none());
}

#[test]
fn test_read_multilabel_json() {
    let json = r#"{
        "colors": [[0, 0, 0], [255, 0, 0], [0, 0, 255], [128, 0, 128]],
        "one_hot_encoding": [[0, 0], [1, 0], [0, 1], [1, 1]],
        "labels": ["red", "blue"]
    }"#;

    let mapping = ColorLabels::from_json_str(json).unwrap();
    assert!(mapping.is_multilabel());
    assert_eq!(mapping.num_classes(), 2);
    assert_eq!(mapping.one_hot_encoding().unwrap()[3], OneHot::Binary(vec![1, 1]));
    assert_eq!(mapping.log_labels().unwrap()[3], "red+blue");
}

#[test]
fn test_read_json_accepts_hex_colors() {
    let mapping = ColorLabels::from_json_str(r##"{"colors": ["#000000", "#00FF00"]}"##).unwrap();
    assert_eq!(mapping.colors(), &[[0, 0, 0], [0, 255, 0]]);
}

#[test]
fn test_read_json_revalidates() {
    let json = r#"{
        "colors": [[0, 0, 0], [255, 0, 0], [0, 0, 255]],
        "one_hot_encoding": [[0, 0], [1, 0]]
    }"#;
    assert!(ColorLabels::from_json_str(json).unwrap_err().is_validation());

    let json = r#"{"colors": [[0, 0, 0]], "one_hot_encoding": [[0, 2]]}"#;
    assert!(ColorLabels::from_json_str(json).unwrap_err().is_validation());
}

#[test]
fn test_read_malformed_json() {
    let err = ColorLabels::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, crate::LabelError::Json(_)));
}

#[test]
fn test_write_json_layout() {
    let mapping = ColorLabels::new(
        vec![[0, 0, 0], [9, 8, 7]],
        Some(vec![OneHot::Binary(vec![0]), OneHot::Binary(vec![1])]),
        None,
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&mapping.to_json_string().unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "colors": [[0, 0, 0], [9, 8, 7]],
            "one_hot_encoding": [[0], [1]],
            "labels": null
        })
    );
}

#[test]
fn test_write_single_label_has_null_one_hot() {
    let mapping = ColorLabels::from_labels(vec!["a".to_string()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&mapping.to_json_string().unwrap()).unwrap();
    assert!(value["one_hot_encoding"].is_null());
    assert_eq!(value["labels"], serde_json::json!(["a"]));
}

#[test]
fn test_missing_json_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = ColorLabels::from_json_file(dir.path().join("missing.json")).unwrap_err();
    assert!(err.is_not_found());
}
