//! Whitespace-delimited text table.
//!
//! One row per color. The first three columns are the RGB channels, any
//! further columns are the one-hot row:
//!
//! ```text
//! # r   g   b   one-hot
//! 0     0   0   0 0
//! 255   0   0   1 0
//! 0     0 255   0 1
//! ```
//!
//! Blank lines and `#` comments are skipped.

use std::path::Path;

use crate::color_utils::{ColorSpec, parse_color};
use crate::error::LabelError;
use crate::model::{ColorLabels, OneHotInput, parse_one_hot};

/// Number of leading columns holding the color.
const COLOR_COLUMNS: usize = 3;

impl ColorLabels {
    /// Read a mapping from a text table file.
    ///
    /// `labels` names the classes and is forwarded to [`ColorLabels::new`].
    pub fn from_text_file(
        path: impl AsRef<Path>,
        labels: Option<Vec<String>>,
    ) -> Result<Self, LabelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LabelError::not_found(path));
        }
        log::info!("Reading label table from {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let mapping = Self::from_text_table(&content, labels)?;

        log::info!("Read {}", mapping);
        Ok(mapping)
    }

    /// Parse a mapping from text table content.
    pub fn from_text_table(
        content: &str,
        labels: Option<Vec<String>>,
    ) -> Result<Self, LabelError> {
        let rows = parse_table(content)?;
        let width = rows.first().map_or(0, Vec::len);
        if width < COLOR_COLUMNS {
            return Err(LabelError::validation(
                "Text label file did not contain enough information to be colors.",
            ));
        }

        let colors = rows
            .iter()
            .map(|row| parse_color(&ColorSpec::Channels([row[0], row[1], row[2]])))
            .collect::<Result<Vec<_>, _>>()?;

        if width == COLOR_COLUMNS {
            return Self::new(colors, None, labels);
        }

        let one_hot_encoding = rows
            .iter()
            .map(|row| parse_one_hot(&OneHotInput::from(&row[COLOR_COLUMNS..])))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors, Some(one_hot_encoding), labels)
    }
}

/// Split content into numeric rows of equal width.
fn parse_table(content: &str) -> Result<Vec<Vec<f32>>, LabelError> {
    let mut rows: Vec<Vec<f32>> = Vec::new();

    for (line_index, line) in content.lines().enumerate() {
        let data = line.split_once('#').map_or(line, |(data, _)| data).trim();
        if data.is_empty() {
            continue;
        }

        let row = data
            .split_whitespace()
            .map(|token| {
                token.parse::<f32>().map_err(|_| {
                    LabelError::validation(format!(
                        "Line {}: '{}' is not a number.",
                        line_index + 1,
                        token
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(LabelError::validation(format!(
                    "Line {} has {} columns, expected {}.",
                    line_index + 1,
                    row.len(),
                    first.len()
                )));
            }
        }
        rows.push(row);
    }

    Ok(rows)
}
