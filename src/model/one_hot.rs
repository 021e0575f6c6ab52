//! One-hot encodings for multilabel mappings.
//!
//! A multilabel mapping assigns every color row a vector with one entry per
//! base class. Rows are either binary (0/1) or soft (fractions in 0-1).

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::color_utils::{BACKGROUND, Rgb, is_integral};
use crate::error::LabelError;

/// Largest number of base classes the combination generator accepts.
///
/// The generator output has `2^n` rows.
pub const MAX_ONE_HOT_CLASSES: usize = 16;

/// A validated one-hot row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneHot {
    /// Every value is 0 or 1
    Binary(Vec<u8>),
    /// Fractional values in 0-1
    Soft(Vec<f32>),
}

impl OneHot {
    /// Number of classes in this row.
    pub fn len(&self) -> usize {
        match self {
            Self::Binary(values) => values.len(),
            Self::Soft(values) => values.len(),
        }
    }

    /// Whether the row has no classes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at a class index, 0.0 when out of range.
    pub fn value(&self, index: usize) -> f32 {
        let value = match self {
            Self::Binary(values) => values.get(index).copied().map(f32::from),
            Self::Soft(values) => values.get(index).copied(),
        };
        value.unwrap_or(0.0)
    }

    /// Whether the class at `index` is present (nonzero).
    pub fn is_set(&self, index: usize) -> bool {
        self.value(index) != 0.0
    }

    /// All values as floats.
    pub fn to_values(&self) -> Vec<f32> {
        (0..self.len()).map(|index| self.value(index)).collect()
    }
}

impl From<Vec<u8>> for OneHot {
    fn from(values: Vec<u8>) -> Self {
        Self::Binary(values)
    }
}

/// A single raw one-hot value: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneHotValue {
    /// Plain number
    Number(f32),
    /// Number written as a string
    Text(String),
}

/// Raw one-hot row before validation.
///
/// A string is read one character per class (`"0110"`), a sequence holds one
/// value per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneHotInput {
    /// One character per class
    Text(String),
    /// One value per class
    Values(Vec<OneHotValue>),
}

impl From<&str> for OneHotInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<f32>> for OneHotInput {
    fn from(values: Vec<f32>) -> Self {
        Self::Values(values.into_iter().map(OneHotValue::Number).collect())
    }
}

impl From<&[f32]> for OneHotInput {
    fn from(values: &[f32]) -> Self {
        Self::from(values.to_vec())
    }
}

impl From<&OneHot> for OneHotInput {
    fn from(one_hot: &OneHot) -> Self {
        Self::from(one_hot.to_values())
    }
}

fn coerce(text: &str) -> Result<f32, LabelError> {
    text.trim().parse::<f32>().map_err(|_| {
        LabelError::validation(format!("One hot value '{}' is not a number", text))
    })
}

/// Parse and validate a one-hot row.
///
/// All-integral rows must only contain 0 and 1 and become [`OneHot::Binary`].
/// Any fractional value switches the row to [`OneHot::Soft`], where every
/// value must lie in 0-1.
pub fn parse_one_hot(input: &OneHotInput) -> Result<OneHot, LabelError> {
    let values = match input {
        OneHotInput::Text(text) => text
            .chars()
            .map(|ch| coerce(ch.encode_utf8(&mut [0; 4])))
            .collect::<Result<Vec<_>, _>>()?,
        OneHotInput::Values(values) => values
            .iter()
            .map(|value| match value {
                OneHotValue::Number(number) => Ok(*number),
                OneHotValue::Text(text) => coerce(text),
            })
            .collect::<Result<Vec<_>, _>>()?,
    };
    classify_one_hot(values)
}

/// Re-check a row that was built directly rather than parsed.
///
/// Applies the same rules as [`parse_one_hot`], so a soft row holding only
/// whole numbers comes back as [`OneHot::Binary`].
pub fn normalize_one_hot(one_hot: OneHot) -> Result<OneHot, LabelError> {
    match one_hot {
        OneHot::Binary(values) => {
            if values.iter().any(|&value| value > 1) {
                return Err(LabelError::validation(
                    "Found values other than 0 and 1 when one hot is integers.",
                ));
            }
            Ok(OneHot::Binary(values))
        }
        OneHot::Soft(values) => classify_one_hot(values),
    }
}

fn classify_one_hot(values: Vec<f32>) -> Result<OneHot, LabelError> {
    if values.iter().any(|value| !value.is_finite()) {
        return Err(LabelError::validation(
            "One hot values must be finite numbers.",
        ));
    }

    if is_integral(&values) {
        if values.iter().any(|&value| value != 0.0 && value != 1.0) {
            return Err(LabelError::validation(
                "Found values other than 0 and 1 when one hot is integers.",
            ));
        }
        Ok(OneHot::Binary(
            values.into_iter().map(|value| value as u8).collect(),
        ))
    } else {
        if values.iter().any(|value| !(0.0..=1.0).contains(value)) {
            return Err(LabelError::validation(
                "Found values smaller than 0 or larger than 1 in one hot.",
            ));
        }
        Ok(OneHot::Soft(values))
    }
}

/// Generate every binary combination of `num_classes` classes.
///
/// Row `i` holds bit `j` of `i` at position `j`, so row 0 is the all-zero
/// (background) row. For two classes: `[0,0], [1,0], [0,1], [1,1]`.
pub fn all_one_hots(num_classes: usize) -> Result<Vec<Vec<u8>>, LabelError> {
    if num_classes > MAX_ONE_HOT_CLASSES {
        return Err(LabelError::validation(format!(
            "Cannot enumerate one hot combinations for {} classes, at most {} are supported.",
            num_classes, MAX_ONE_HOT_CLASSES
        )));
    }

    Ok((0..1usize << num_classes)
        .map(|combination| {
            (0..num_classes)
                .map(|bit| u8::from(combination & (1 << bit) != 0))
                .collect()
        })
        .collect())
}

/// Derive one color per one-hot combination.
///
/// The all-zero row is black; any other row gets the per-channel mean of
/// the base colors whose bit is set, rounded half to even.
pub fn mix_one_hot_colors(
    one_hots: &[Vec<u8>],
    base_colors: &[Rgb],
) -> Result<Vec<Rgb>, LabelError> {
    let palette = Array2::from_shape_fn((base_colors.len(), 3), |(row, channel)| {
        f64::from(base_colors[row][channel])
    });

    one_hots
        .iter()
        .map(|one_hot| {
            if one_hot.len() != base_colors.len() {
                return Err(LabelError::validation(format!(
                    "One hot of length {} cannot be mixed from {} base colors.",
                    one_hot.len(),
                    base_colors.len()
                )));
            }

            let selected: Vec<usize> = one_hot
                .iter()
                .enumerate()
                .filter(|&(_, &bit)| bit != 0)
                .map(|(index, _)| index)
                .collect();
            if selected.is_empty() {
                return Ok(BACKGROUND);
            }

            let mean = palette
                .select(Axis(0), &selected)
                .mean_axis(Axis(0))
                .ok_or_else(|| LabelError::validation("Cannot average an empty color set."))?;
            Ok([
                round_channel(mean[0]),
                round_channel(mean[1]),
                round_channel(mean[2]),
            ])
        })
        .collect()
}

fn round_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// All one-hot combinations for the base colors together with their mixed colors.
pub fn all_one_hots_and_colors(
    base_colors: &[Rgb],
) -> Result<(Vec<Vec<u8>>, Vec<Rgb>), LabelError> {
    let one_hots = all_one_hots(base_colors.len())?;
    let colors = mix_one_hot_colors(&one_hots, base_colors)?;
    Ok((one_hots, colors))
}

/// Per-class occupancy: how many rows set each class.
pub(crate) fn class_occupancy(one_hots: &[OneHot], num_classes: usize) -> Vec<f32> {
    let matrix = Array2::from_shape_fn((one_hots.len(), num_classes), |(row, class)| {
        one_hots[row].value(class)
    });
    matrix.sum_axis(Axis(0)).to_vec()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_all_one_hots_two_classes() {
        let one_hots = all_one_hots(2).unwrap();
        assert_eq!(one_hots, vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]]);
    }

    #[test]
    fn test_all_one_hots_matches_binary_expansion() {
        let num_classes = 5;
        let one_hots = all_one_hots(num_classes).unwrap();
        assert_eq!(one_hots.len(), 1 << num_classes);
        assert!(one_hots[0].iter().all(|&bit| bit == 0));

        for (index, row) in one_hots.iter().enumerate() {
            assert_eq!(row.len(), num_classes);
            let decoded: usize = row
                .iter()
                .enumerate()
                .map(|(bit, &value)| usize::from(value) << bit)
                .sum();
            assert_eq!(decoded, index);
        }

        let unique: HashSet<&Vec<u8>> = one_hots.iter().collect();
        assert_eq!(unique.len(), one_hots.len());
    }

    #[test]
    fn test_all_one_hots_zero_classes() {
        assert_eq!(all_one_hots(0).unwrap(), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_all_one_hots_rejects_too_many_classes() {
        let err = all_one_hots(MAX_ONE_HOT_CLASSES + 1).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_mix_background_and_single_colors() {
        let base = [[255, 0, 0], [0, 0, 255], [10, 200, 30]];
        let (one_hots, colors) = all_one_hots_and_colors(&base).unwrap();

        assert_eq!(colors.len(), one_hots.len());
        assert_eq!(colors[0], BACKGROUND);
        assert_eq!(colors[1], base[0]);
        assert_eq!(colors[2], base[1]);
        assert_eq!(colors[4], base[2]);
    }

    #[test]
    fn test_mix_rounds_half_to_even() {
        let base = [[255, 0, 0], [0, 0, 255]];
        let (_, colors) = all_one_hots_and_colors(&base).unwrap();
        assert_eq!(colors, vec![[0, 0, 0], [255, 0, 0], [0, 0, 255], [128, 0, 128]]);

        let base = [[1, 3, 5], [2, 4, 6]];
        let (_, colors) = all_one_hots_and_colors(&base).unwrap();
        // 1.5 -> 2, 3.5 -> 4, 5.5 -> 6
        assert_eq!(colors[3], [2, 4, 6]);
    }

    #[test]
    fn test_mix_three_colors() {
        let base = [[30, 0, 0], [0, 60, 0], [0, 0, 90]];
        let (_, colors) = all_one_hots_and_colors(&base).unwrap();
        assert_eq!(colors[7], [10, 20, 30]);
    }

    #[test]
    fn test_mix_rejects_length_mismatch() {
        let err = mix_one_hot_colors(&[vec![1, 0, 1]], &[[1, 2, 3]]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_one_hot_from_string() {
        let one_hot = parse_one_hot(&"0110".into()).unwrap();
        assert_eq!(one_hot, OneHot::Binary(vec![0, 1, 1, 0]));
    }

    #[test]
    fn test_parse_one_hot_from_values() {
        let input = OneHotInput::Values(vec![
            OneHotValue::Number(1.0),
            OneHotValue::Text("0".to_string()),
        ]);
        assert_eq!(parse_one_hot(&input).unwrap(), OneHot::Binary(vec![1, 0]));
    }

    #[test]
    fn test_parse_one_hot_soft_values() {
        let one_hot = parse_one_hot(&vec![0.25, 1.0, 0.0].into()).unwrap();
        assert_eq!(one_hot, OneHot::Soft(vec![0.25, 1.0, 0.0]));
        assert!(one_hot.is_set(0));
        assert!(!one_hot.is_set(2));
    }

    #[test]
    fn test_parse_one_hot_rejects_integers_outside_binary() {
        let err = parse_one_hot(&vec![0.0, 2.0].into()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_one_hot_rejects_fractions_out_of_range() {
        assert!(parse_one_hot(&vec![0.5, 1.5].into()).is_err());
        assert!(parse_one_hot(&vec![-0.5, 1.0].into()).is_err());
    }

    #[test]
    fn test_parse_one_hot_rejects_non_numeric() {
        assert!(parse_one_hot(&"01x".into()).unwrap_err().is_validation());
    }

    #[test]
    fn test_normalize_one_hot() {
        assert_eq!(
            normalize_one_hot(OneHot::Binary(vec![0, 1])).unwrap(),
            OneHot::Binary(vec![0, 1])
        );
        assert_eq!(
            normalize_one_hot(OneHot::Soft(vec![0.0, 1.0])).unwrap(),
            OneHot::Binary(vec![0, 1])
        );
        assert_eq!(
            normalize_one_hot(OneHot::Soft(vec![0.5, 1.0])).unwrap(),
            OneHot::Soft(vec![0.5, 1.0])
        );
        assert!(normalize_one_hot(OneHot::Binary(vec![2])).unwrap_err().is_validation());
        assert!(normalize_one_hot(OneHot::Soft(vec![1.5])).unwrap_err().is_validation());
        assert!(normalize_one_hot(OneHot::Soft(vec![f32::NAN])).unwrap_err().is_validation());
    }

    #[test]
    fn test_class_occupancy() {
        let one_hots = vec![
            OneHot::Binary(vec![0, 0, 1]),
            OneHot::Soft(vec![0.5, 0.0, 1.0]),
        ];
        assert_eq!(class_occupancy(&one_hots, 3), vec![0.5, 0.0, 2.0]);
    }
}
