//! Option records owned by the model.

use crate::config::*;
use serde::{Deserialize, Serialize};

/// Full slider configuration.
///
/// Fields missing from a deserialized record take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderOptions {
    pub step_size: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub value1: f64,
    pub value2: f64,
    pub is_vertical: bool,
    pub is_interval: bool,
    pub show_tip: bool,
    pub show_scale: bool,
    pub show_progress_bar: bool,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            value1: DEFAULT_VALUE_1,
            value2: DEFAULT_VALUE_2,
            is_vertical: DEFAULT_IS_VERTICAL,
            is_interval: DEFAULT_IS_INTERVAL,
            show_tip: DEFAULT_SHOW_TIP,
            show_scale: DEFAULT_SHOW_SCALE,
            show_progress_bar: DEFAULT_SHOW_PROGRESS_BAR,
        }
    }
}

impl SliderOptions {
    pub fn range(&self) -> f64 {
        self.max_value - self.min_value
    }

    pub fn state(&self) -> StateOptions {
        StateOptions {
            is_vertical: self.is_vertical,
            is_interval: self.is_interval,
            show_tip: self.show_tip,
            show_scale: self.show_scale,
            show_progress_bar: self.show_progress_bar,
        }
    }

    /// True when every numeric field is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.step_size,
            self.min_value,
            self.max_value,
            self.value1,
            self.value2,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Boolean display flags only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOptions {
    pub is_vertical: bool,
    pub is_interval: bool,
    pub show_tip: bool,
    pub show_scale: bool,
    pub show_progress_bar: bool,
}
