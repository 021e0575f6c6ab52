//! Configuration for building label mappings.
//!
//! A [`LabelSource`] names one construction strategy by its `"type"` key and
//! carries that strategy's arguments, so a mapping can be described in a
//! JSON config:
//!
//! ```json
//! { "type": "colors", "colors": ["#FF0000", "#00FF00"], "labels": ["road", "grass"] }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_utils::ColorSpec;
use crate::error::LabelError;
use crate::format::ColorLabelRecord;
use crate::model::ColorLabels;

/// Log level setting for the command line tool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How to construct a [`ColorLabels`], selected by the `"type"` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LabelSource {
    /// List of per-color records
    LabelsList {
        /// The records
        color_labels: Vec<ColorLabelRecord>,
        /// Class names, used when the records carry none
        #[serde(default)]
        labels: Option<Vec<String>>,
    },
    /// Whitespace-delimited text table
    Txt {
        /// Path of the table
        label_text_file: PathBuf,
        /// Class names
        #[serde(default)]
        labels: Option<Vec<String>>,
    },
    /// Native JSON file
    Json {
        /// Path of the JSON file
        label_json_file: PathBuf,
    },
    /// Colors of the foreground classes; a background row is prepended
    Colors {
        /// One color per class
        colors: Vec<ColorSpec>,
        /// Class names, without the background
        #[serde(default)]
        labels: Option<Vec<String>>,
    },
    /// Base colors mixed into every class combination
    ColorsMultilabel {
        /// One color per base class
        colors: Vec<ColorSpec>,
        /// Class names
        #[serde(default)]
        labels: Option<Vec<String>>,
    },
    /// Class names with generated colors
    Labels {
        /// Class names
        labels: Vec<String>,
    },
    /// Class names with generated colors for every combination
    LabelsMultilabel {
        /// Class names
        labels: Vec<String>,
    },
}

impl LabelSource {
    /// All `"type"` keys, in declaration order.
    pub const KINDS: &'static [&'static str] = &[
        "labels_list",
        "txt",
        "json",
        "colors",
        "colors_multilabel",
        "labels",
        "labels_multilabel",
    ];

    /// The `"type"` key of this source.
    pub fn kind(&self) -> &'static str {
        match self {
            LabelSource::LabelsList { .. } => "labels_list",
            LabelSource::Txt { .. } => "txt",
            LabelSource::Json { .. } => "json",
            LabelSource::Colors { .. } => "colors",
            LabelSource::ColorsMultilabel { .. } => "colors_multilabel",
            LabelSource::Labels { .. } => "labels",
            LabelSource::LabelsMultilabel { .. } => "labels_multilabel",
        }
    }

    /// Build the mapping with the selected constructor.
    pub fn build(&self) -> Result<ColorLabels, LabelError> {
        log::debug!("Building label mapping from '{}' source", self.kind());
        match self {
            LabelSource::LabelsList {
                color_labels,
                labels,
            } => ColorLabels::from_records(color_labels, labels.clone()),
            LabelSource::Txt {
                label_text_file,
                labels,
            } => ColorLabels::from_text_file(label_text_file, labels.clone()),
            LabelSource::Json { label_json_file } => ColorLabels::from_json_file(label_json_file),
            LabelSource::Colors { colors, labels } => {
                ColorLabels::from_colors(colors, labels.clone())
            }
            LabelSource::ColorsMultilabel { colors, labels } => {
                ColorLabels::from_colors_multilabel(colors, labels.clone())
            }
            LabelSource::Labels { labels } => ColorLabels::from_labels(labels.clone()),
            LabelSource::LabelsMultilabel { labels } => {
                ColorLabels::from_labels_multilabel(labels.clone())
            }
        }
    }

    /// Parse a source from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, LabelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a source from a JSON config file.
    ///
    /// Relative file paths inside the config are resolved against the
    /// config's directory.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LabelError::not_found(path));
        }
        log::info!("Loading label source config from {:?}", path);

        let json = std::fs::read_to_string(path)?;
        let source = Self::from_json_str(&json)?;
        Ok(match path.parent() {
            Some(base) => source.resolved_against(base),
            None => source,
        })
    }

    /// Resolve relative file paths against `base`.
    pub fn resolved_against(self, base: &Path) -> Self {
        let resolve = |file: PathBuf| {
            if file.is_relative() {
                base.join(file)
            } else {
                file
            }
        };
        match self {
            LabelSource::Txt {
                label_text_file,
                labels,
            } => LabelSource::Txt {
                label_text_file: resolve(label_text_file),
                labels,
            },
            LabelSource::Json { label_json_file } => LabelSource::Json {
                label_json_file: resolve(label_json_file),
            },
            other => other,
        }
    }
}
