//! Label mapping between segmentation classes, colors and names.
//!
//! A [`ColorLabels`] holds one color per row. Single-label mappings have one
//! row per class. Multilabel mappings carry a one-hot row per color, and the
//! class count is the one-hot width instead.

use std::collections::HashSet;
use std::fmt;

use crate::color_utils::{BACKGROUND, ColorSpec, Rgb, distinct_colors, parse_color};
use crate::error::LabelError;
use crate::model::one_hot::{
    OneHot, all_one_hots, all_one_hots_and_colors, class_occupancy, normalize_one_hot,
};

/// Name given to the all-zero row and to the prepended black row.
pub const BACKGROUND_LABEL: &str = "background";

/// Palettes tried before giving up on mixed multilabel colors.
pub const MAX_COLOR_ATTEMPTS: u32 = 10;

/// Validated class/color/label configuration for a segmentation task.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLabels {
    colors: Vec<Rgb>,
    one_hot_encoding: Option<Vec<OneHot>>,
    labels: Option<Vec<String>>,
    log_labels: Option<Vec<String>>,
}

impl ColorLabels {
    /// Build a mapping and check its invariants.
    ///
    /// Fails when a one-hot row holds values outside 0-1 (binary rows must be
    /// 0 or 1), when the one-hot rows do not match the colors one to one, when
    /// one-hot rows differ in width, or when the number of labels differs
    /// from [`num_classes`](Self::num_classes). A class that no one-hot row
    /// ever sets is only logged as a warning.
    pub fn new(
        colors: Vec<Rgb>,
        one_hot_encoding: Option<Vec<OneHot>>,
        labels: Option<Vec<String>>,
    ) -> Result<Self, LabelError> {
        // Soft rows holding only 0 and 1 become binary, as they would on reload
        let one_hot_encoding = one_hot_encoding
            .map(|rows| {
                rows.into_iter()
                    .map(normalize_one_hot)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        if let Some(one_hots) = &one_hot_encoding {
            if colors.len() != one_hots.len() {
                return Err(LabelError::validation(format!(
                    "Cannot have a different number of colors, {}, and one hot encodings, {}.",
                    colors.len(),
                    one_hots.len()
                )));
            }
            if let Some(first) = one_hots.first() {
                if let Some((row, one_hot)) = one_hots
                    .iter()
                    .enumerate()
                    .find(|(_, one_hot)| one_hot.len() != first.len())
                {
                    return Err(LabelError::validation(format!(
                        "One hot encoding at row {} has {} classes, expected {}.",
                        row,
                        one_hot.len(),
                        first.len()
                    )));
                }
            }
        }

        let num_classes = class_count(&colors, one_hot_encoding.as_deref());

        if let Some(labels) = &labels {
            if labels.len() != num_classes {
                return Err(LabelError::validation(format!(
                    "Cannot have a different number of classes, {}, and labels, {}.",
                    num_classes,
                    labels.len()
                )));
            }
        }

        if let Some(one_hots) = &one_hot_encoding {
            warn_empty_classes(one_hots, num_classes, labels.as_deref());
        }

        let log_labels = labels.as_ref().map(|labels| match &one_hot_encoding {
            Some(one_hots) => combination_names(one_hots, labels),
            None => labels.clone(),
        });

        log::debug!(
            "Built label mapping with {} colors, {} classes (multilabel: {})",
            colors.len(),
            num_classes,
            one_hot_encoding.is_some()
        );

        Ok(Self {
            colors,
            one_hot_encoding,
            labels,
            log_labels,
        })
    }

    /// Build a single-label mapping from colors, prepending a black background row.
    ///
    /// When labels are given, `"background"` is prepended to them as well.
    pub fn from_colors(
        colors: &[ColorSpec],
        labels: Option<Vec<String>>,
    ) -> Result<Self, LabelError> {
        let mut parsed = Vec::with_capacity(colors.len() + 1);
        parsed.push(BACKGROUND);
        for color in colors {
            parsed.push(parse_color(color)?);
        }

        let labels = labels.map(|labels| {
            std::iter::once(BACKGROUND_LABEL.to_string())
                .chain(labels)
                .collect()
        });
        Self::new(parsed, None, labels)
    }

    /// Build a multilabel mapping from one base color per class.
    ///
    /// Every combination of classes gets a row, colored with the mean of its
    /// base colors. Row 0 is the empty combination in black.
    pub fn from_colors_multilabel(
        colors: &[ColorSpec],
        labels: Option<Vec<String>>,
    ) -> Result<Self, LabelError> {
        let base_colors = colors
            .iter()
            .map(parse_color)
            .collect::<Result<Vec<_>, _>>()?;
        let (one_hots, colors) = all_one_hots_and_colors(&base_colors)?;
        Self::new(colors, Some(binary_rows(one_hots)), labels)
    }

    /// Build a single-label mapping with one generated color per label.
    pub fn from_labels(labels: Vec<String>) -> Result<Self, LabelError> {
        let colors = distinct_colors(labels.len(), 0);
        Self::new(colors, None, Some(labels))
    }

    /// Build a multilabel mapping with generated base colors.
    ///
    /// Palettes are regenerated until all mixed combination colors are
    /// unique. After [`MAX_COLOR_ATTEMPTS`] failures every combination gets
    /// its own generated color instead of a mixed one.
    pub fn from_labels_multilabel(labels: Vec<String>) -> Result<Self, LabelError> {
        Self::multilabel_from_palettes(labels, distinct_colors)
    }

    fn multilabel_from_palettes(
        labels: Vec<String>,
        mut generate: impl FnMut(usize, u32) -> Vec<Rgb>,
    ) -> Result<Self, LabelError> {
        let num_classes = labels.len();

        for attempt in 0..MAX_COLOR_ATTEMPTS {
            let base_colors = generate(num_classes, attempt);
            let (one_hots, colors) = all_one_hots_and_colors(&base_colors)?;
            if all_unique(&colors) {
                return Self::new(colors, Some(binary_rows(one_hots)), Some(labels));
            }
            log::debug!("Palette attempt {} produced colliding combination colors", attempt);
        }

        log::warn!(
            "Could not find a color combination for {} classes. \
             Falling back on one color per one hot encoding.",
            num_classes
        );
        let one_hots = all_one_hots(num_classes)?;
        let colors = generate(one_hots.len(), 0);
        Self::new(colors, Some(binary_rows(one_hots)), Some(labels))
    }

    /// Keep only the rows whose color is in `keep`.
    ///
    /// Row order is preserved, and one-hot rows or per-row labels follow
    /// their colors. Multilabel labels name classes, not rows, so they are
    /// copied unchanged.
    pub fn filter_by_colors(&self, keep: &HashSet<Rgb>) -> Result<Self, LabelError> {
        let retained: Vec<usize> = self
            .colors
            .iter()
            .enumerate()
            .filter(|(_, color)| keep.contains(*color))
            .map(|(index, _)| index)
            .collect();
        let colors = retained.iter().map(|&index| self.colors[index]).collect();

        match &self.one_hot_encoding {
            Some(one_hots) => {
                if retained.is_empty() {
                    return Err(LabelError::validation(
                        "Filtering removed every color of a multilabel mapping.",
                    ));
                }
                let one_hots = retained
                    .iter()
                    .map(|&index| one_hots[index].clone())
                    .collect();
                Self::new(colors, Some(one_hots), self.labels.clone())
            }
            None => {
                let labels = self.labels.as_ref().map(|labels| {
                    retained
                        .iter()
                        .map(|&index| labels[index].clone())
                        .collect()
                });
                Self::new(colors, None, labels)
            }
        }
    }

    /// Colors, one per row.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// One-hot rows, present for multilabel mappings.
    pub fn one_hot_encoding(&self) -> Option<&[OneHot]> {
        self.one_hot_encoding.as_deref()
    }

    /// Class names, one per class.
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Display names, one per row.
    pub fn log_labels(&self) -> Option<&[String]> {
        self.log_labels.as_deref()
    }

    /// Whether rows carry one-hot combinations.
    pub fn is_multilabel(&self) -> bool {
        self.one_hot_encoding.is_some()
    }

    /// One-hot width for multilabel mappings, else the number of colors.
    pub fn num_classes(&self) -> usize {
        class_count(&self.colors, self.one_hot_encoding.as_deref())
    }

    /// Number of color rows.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether there are no color rows.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Row index of a color, if present.
    pub fn index_of(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&candidate| candidate == color)
    }
}

impl fmt::Display for ColorLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ColorLabels(num_classes={}, multilabel={}",
            self.num_classes(),
            self.is_multilabel()
        )?;
        if let Some(labels) = &self.labels {
            write!(f, ", labels={:?}", labels)?;
        }
        write!(f, ")")
    }
}

fn class_count(colors: &[Rgb], one_hots: Option<&[OneHot]>) -> usize {
    match one_hots {
        Some(one_hots) => one_hots.first().map_or(0, OneHot::len),
        None => colors.len(),
    }
}

fn binary_rows(one_hots: Vec<Vec<u8>>) -> Vec<OneHot> {
    one_hots.into_iter().map(OneHot::Binary).collect()
}

fn all_unique(colors: &[Rgb]) -> bool {
    let unique: HashSet<&Rgb> = colors.iter().collect();
    unique.len() == colors.len()
}

/// `+`-joined names of the classes each row sets; row 0 is the background.
fn combination_names(one_hots: &[OneHot], labels: &[String]) -> Vec<String> {
    let mut names: Vec<String> = one_hots
        .iter()
        .map(|one_hot| {
            labels
                .iter()
                .enumerate()
                .filter(|&(class, _)| one_hot.is_set(class))
                .map(|(_, label)| label.as_str())
                .collect::<Vec<_>>()
                .join("+")
        })
        .collect();
    if let Some(first) = names.first_mut() {
        *first = BACKGROUND_LABEL.to_string();
    }
    names
}

fn warn_empty_classes(one_hots: &[OneHot], num_classes: usize, labels: Option<&[String]>) {
    if let Some(classes) = empty_classes_message(one_hots, num_classes, labels) {
        log::warn!(
            "One hot encoding contains empty labels indices, in particular {}.",
            classes
        );
    }
}

/// Names of the classes no one-hot row sets, or their indices without labels.
fn empty_classes_message(
    one_hots: &[OneHot],
    num_classes: usize,
    labels: Option<&[String]>,
) -> Option<String> {
    let empty: Vec<usize> = class_occupancy(one_hots, num_classes)
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == 0.0)
        .map(|(class, _)| class)
        .collect();
    if empty.is_empty() {
        return None;
    }

    let classes = match labels {
        Some(labels) => empty
            .iter()
            .map(|&class| labels[class].as_str())
            .collect::<Vec<_>>()
            .join(","),
        None => format!("{:?}", empty),
    };
    Some(classes)
}
