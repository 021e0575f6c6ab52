//! Label mapping file formats.
//!
//! Each format adds constructors (and for JSON, a writer) to
//! [`ColorLabels`](crate::model::ColorLabels).
//!
//! ## Supported Formats
//!
//! - **JSON**: Native format, round-trips colors, one-hot rows and labels
//! - **Text table**: Whitespace-delimited rows of RGB plus optional one-hot columns
//! - **Record list**: Per-color records with an optional one-hot row and name
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seglabels::ColorLabels;
//!
//! let mapping = ColorLabels::from_text_file("classes.txt", None)?;
//! mapping.to_json_file("classes.json")?;
//! let reloaded = ColorLabels::from_json_file("classes.json")?;
//! ```

mod json;
mod records;
mod text;

#[cfg(test)]
mod tests;

pub use records::ColorLabelRecord;
