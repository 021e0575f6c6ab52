//! Mappings written as a list of per-color records.
//!
//! ```json
//! [
//!   {"color": "#000000", "one_hot": "00"},
//!   {"color": [255, 0, 0], "one_hot": [1, 0]},
//!   {"color": "blue", "one_hot": "01"}
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::color_utils::{ColorSpec, parse_color};
use crate::error::LabelError;
use crate::model::{ColorLabels, OneHot, OneHotInput, parse_one_hot};

/// One row of a record list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorLabelRecord {
    /// Row color; required
    #[serde(default)]
    pub color: Option<ColorSpec>,
    /// One-hot row, for multilabel mappings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_hot: Option<OneHotInput>,
    /// Class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ColorLabelRecord {
    /// Create a record with a color.
    pub fn new(color: impl Into<ColorSpec>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Set the one-hot row.
    pub fn with_one_hot(mut self, one_hot: impl Into<OneHotInput>) -> Self {
        self.one_hot = Some(one_hot.into());
        self
    }

    /// Set the class name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Tracks whether an optional field is set on all records or on none.
fn track_presence(state: &mut Option<bool>, present: bool, field: &str) -> Result<(), LabelError> {
    match *state {
        None => {
            *state = Some(present);
            Ok(())
        }
        Some(expected) if expected == present => Ok(()),
        Some(_) => Err(LabelError::validation(format!(
            "Some records have a {} defined, others not.",
            field
        ))),
    }
}

impl ColorLabels {
    /// Build a mapping from a list of records.
    ///
    /// Every record needs a color. One-hot rows and names must be given on
    /// all records or on none, and one-hot rows must share one width. Names
    /// taken from the records replace `labels`.
    pub fn from_records(
        records: &[ColorLabelRecord],
        labels: Option<Vec<String>>,
    ) -> Result<Self, LabelError> {
        let mut colors = Vec::with_capacity(records.len());
        let mut one_hots: Vec<OneHot> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        let mut has_one_hot = None;
        let mut has_label = None;

        for (index, record) in records.iter().enumerate() {
            let color = record.color.as_ref().ok_or_else(|| {
                LabelError::validation(format!(
                    "Record {} needs at least a color to define a label.",
                    index
                ))
            })?;
            colors.push(parse_color(color)?);

            track_presence(&mut has_one_hot, record.one_hot.is_some(), "one hot")?;
            if let Some(input) = &record.one_hot {
                let one_hot = parse_one_hot(input)?;
                if let Some(first) = one_hots.first() {
                    if first.len() != one_hot.len() {
                        return Err(LabelError::validation(
                            "Some records have different one hot sizes.",
                        ));
                    }
                }
                one_hots.push(one_hot);
            }

            track_presence(&mut has_label, record.label.is_some(), "label")?;
            if let Some(label) = &record.label {
                names.push(label.clone());
            }
        }

        let one_hot_encoding = (has_one_hot == Some(true)).then_some(one_hots);
        let labels = if has_label == Some(true) {
            Some(names)
        } else {
            labels
        };

        Self::new(colors, one_hot_encoding, labels)
    }
}
