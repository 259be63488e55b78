//! Application-level configuration constants.

// Default slider options
pub const DEFAULT_STEP_SIZE: f64 = 10.0;
pub const DEFAULT_MIN_VALUE: f64 = -100.0;
pub const DEFAULT_MAX_VALUE: f64 = 100.0;
pub const DEFAULT_VALUE_1: f64 = -50.0;
pub const DEFAULT_VALUE_2: f64 = 50.0;
pub const DEFAULT_IS_VERTICAL: bool = false;
pub const DEFAULT_IS_INTERVAL: bool = false;
pub const DEFAULT_SHOW_TIP: bool = true;
pub const DEFAULT_SHOW_SCALE: bool = true;
pub const DEFAULT_SHOW_PROGRESS_BAR: bool = true;

// Numeric tolerances
/// Distance from the nearest integer below which a step index counts as whole.
pub const INDEX_EPSILON: f64 = 1e-9;
/// Upper limit on the allowed values of one slider; finer steps are refused.
pub const MAX_ALLOWED_VALUES: f64 = 1e9;

// UI constants
pub const MAX_SCALE_MARKS: usize = 11;
pub const MOUNT_ELEMENT_ID: &str = "range-slider";

// Diagnostics
pub const LOG_TARGET: &str = "range_slider";
pub const MODEL_MODULE: &str = "Model";
pub const EMITTER_MODULE: &str = "EventEmitter";
