//! seglabels - class/color mappings for semantic segmentation.
//!
//! A [`ColorLabels`] maps every segmentation class (or, for multilabel
//! tasks, every combination of classes) to an RGB color and optionally to a
//! name. Mappings are built from color lists, generated from class names,
//! or read from JSON and text files, and written back as JSON.

pub mod color_utils;
pub mod config;
mod error;
pub mod format;
pub mod model;

pub use color_utils::{ColorSpec, Rgb, distinct_colors, parse_color};
pub use config::{LabelSource, LogLevel};
pub use error::LabelError;
pub use format::ColorLabelRecord;
pub use model::{
    ColorLabels, OneHot, OneHotInput, all_one_hots, all_one_hots_and_colors, mix_one_hot_colors,
    normalize_one_hot, parse_one_hot,
};
