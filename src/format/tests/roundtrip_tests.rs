//! Round-trip tests through the native JSON format.
//!
//! Writing a mapping and reading it back must reproduce its colors, one-hot
//! rows and labels exactly.

use std::collections::HashSet;

use crate::color_utils::Rgb;
use crate::model::{ColorLabels, OneHot};

fn assert_same_mapping(original: &ColorLabels, loaded: &ColorLabels) {
    assert_eq!(original.colors(), loaded.colors());
    assert_eq!(original.one_hot_encoding(), loaded.one_hot_encoding());
    assert_eq!(original.labels(), loaded.labels());
    assert_eq!(original.log_labels(), loaded.log_labels());
}

fn roundtrip_file(mapping: &ColorLabels) -> ColorLabels {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("labels.json");
    mapping.to_json_file(&path).unwrap();
    ColorLabels::from_json_file(&path).unwrap()
}

#[test]
fn test_roundtrip_single_label() {
    let original = ColorLabels::from_colors(
        &["#FF0000".into(), "#00FF00".into()],
        Some(vec!["red".to_string(), "green".to_string()]),
    )
    .unwrap();

    let loaded = roundtrip_file(&original);
    assert_same_mapping(&original, &loaded);
    assert_eq!(original, loaded);
}

#[test]
fn test_roundtrip_multilabel() {
    let labels = ["sky", "tree", "road"].map(String::from).to_vec();
    let original = ColorLabels::from_labels_multilabel(labels).unwrap();

    let loaded = roundtrip_file(&original);
    assert_same_mapping(&original, &loaded);
}

#[test]
fn test_roundtrip_without_labels() {
    let original =
        ColorLabels::from_colors_multilabel(&["red".into(), "lime".into(), "blue".into()], None)
            .unwrap();

    let loaded = ColorLabels::from_json_str(&original.to_json_string().unwrap()).unwrap();
    assert_same_mapping(&original, &loaded);
}

#[test]
fn test_roundtrip_soft_one_hot() {
    let original = ColorLabels::new(
        vec![[0, 0, 0], [40, 50, 60]],
        Some(vec![
            OneHot::Binary(vec![0, 0]),
            OneHot::Soft(vec![0.3, 0.7]),
        ]),
        Some(vec!["a".to_string(), "b".to_string()]),
    )
    .unwrap();

    let loaded = ColorLabels::from_json_str(&original.to_json_string().unwrap()).unwrap();
    assert_same_mapping(&original, &loaded);
}

#[test]
fn test_roundtrip_filtered_mapping() {
    let original = ColorLabels::from_colors_multilabel(&["#FF0000".into(), "#0000FF".into()], None)
        .unwrap();
    let keep: HashSet<Rgb> = [[255, 0, 0], [128, 0, 128]].into_iter().collect();
    let filtered = original.filter_by_colors(&keep).unwrap();

    assert_eq!(
        filtered.one_hot_encoding().unwrap(),
        &[OneHot::Binary(vec![1, 0]), OneHot::Binary(vec![1, 1])]
    );

    let loaded = roundtrip_file(&filtered);
    assert_same_mapping(&filtered, &loaded);
}
