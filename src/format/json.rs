//! Native JSON label file.
//!
//! ```json
//! {
//!   "colors": [[0, 0, 0], [255, 0, 0]],
//!   "one_hot_encoding": [[0], [1]],
//!   "labels": ["red"]
//! }
//! ```
//!
//! `one_hot_encoding` and `labels` may be `null` or missing. Reading goes
//! through [`ColorLabels::new`], so every invariant is checked again.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color_utils::{ColorSpec, Rgb, parse_color};
use crate::error::LabelError;
use crate::model::{ColorLabels, OneHot, OneHotInput, parse_one_hot};

/// On-disk layout when writing.
#[derive(Serialize)]
struct LabelsFileRef<'a> {
    colors: &'a [Rgb],
    one_hot_encoding: Option<&'a [OneHot]>,
    labels: Option<&'a [String]>,
}

/// On-disk layout when reading. Values are validated before use.
#[derive(Deserialize)]
struct LabelsFile {
    colors: Vec<ColorSpec>,
    #[serde(default)]
    one_hot_encoding: Option<Vec<OneHotInput>>,
    #[serde(default)]
    labels: Option<Vec<String>>,
}

impl ColorLabels {
    /// Serialize to the native JSON layout.
    pub fn to_json_string(&self) -> Result<String, LabelError> {
        let file = LabelsFileRef {
            colors: self.colors(),
            one_hot_encoding: self.one_hot_encoding(),
            labels: self.labels(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Write the mapping to a JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), LabelError> {
        let path = path.as_ref();
        log::info!("Writing label mapping to {:?}", path);

        let json = self.to_json_string()?;
        std::fs::write(path, json)?;

        log::info!("Wrote {} colors and {} classes", self.len(), self.num_classes());
        Ok(())
    }

    /// Parse a mapping from the native JSON layout.
    pub fn from_json_str(json: &str) -> Result<Self, LabelError> {
        let file: LabelsFile = serde_json::from_str(json)?;

        let colors = file
            .colors
            .iter()
            .map(parse_color)
            .collect::<Result<Vec<_>, _>>()?;
        let one_hot_encoding = file
            .one_hot_encoding
            .map(|rows| rows.iter().map(parse_one_hot).collect::<Result<Vec<_>, _>>())
            .transpose()?;

        Self::new(colors, one_hot_encoding, file.labels)
    }

    /// Read a mapping from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LabelError::not_found(path));
        }
        log::info!("Reading label mapping from {:?}", path);

        let json = std::fs::read_to_string(path)?;
        let mapping = Self::from_json_str(&json)?;

        log::info!("Read {}", mapping);
        Ok(mapping)
    }
}
