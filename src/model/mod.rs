//! Data models for segmentation label mappings.

mod color_labels;
mod one_hot;

pub use color_labels::{BACKGROUND_LABEL, ColorLabels, MAX_COLOR_ATTEMPTS};
pub use one_hot::{
    MAX_ONE_HOT_CLASSES, OneHot, OneHotInput, OneHotValue, all_one_hots, all_one_hots_and_colors,
    mix_one_hot_colors, normalize_one_hot, parse_one_hot,
};
