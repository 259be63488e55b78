use crate::config::INDEX_EPSILON;
use crate::events::ValueSlot;
use crate::options::SliderOptions;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regex for the fractional part of a formatted number
static FRACTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+\.(\d+)$").unwrap());

/// Number of digits after the decimal point in the shortest textual form of `value`.
///
/// ```
/// use range_slider::utils::decimal_places;
/// assert_eq!(decimal_places(4.12), 2);
/// assert_eq!(decimal_places(-100.0), 0);
/// ```
pub fn decimal_places(value: f64) -> u32 {
    let text = value.to_string();
    FRACTION_REGEX
        .captures(&text)
        .map(|c| c[1].len() as u32)
        .unwrap_or(0)
}

/// Largest number of decimal digits among the given values.
pub fn max_decimal_places(values: &[f64]) -> u32 {
    values.iter().map(|&v| decimal_places(v)).max().unwrap_or(0)
}

/// Round `value` to `digits` decimal places.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;
    // avoid handing out -0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Whether `x` is an integer, up to floating point noise.
pub fn is_whole(x: f64) -> bool {
    (x - x.round()).abs() < INDEX_EPSILON
}

/// `ceil` that ignores floating point noise just above an integer.
pub fn ceil_tolerant(x: f64) -> f64 {
    if is_whole(x) {
        x.round()
    } else {
        x.ceil()
    }
}

/// Text shown for a value in tips and on the scale.
pub fn format_value(value: f64, precision: u32) -> String {
    format!("{:.*}", precision as usize, value)
}

/// Position of `value` along the track, in percent.
pub fn value_to_percent(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

/// Raw (unsnapped) value at `percent` along the track.
pub fn percent_to_value(percent: f64, min: f64, max: f64) -> f64 {
    min + (max - min) * percent.clamp(0.0, 100.0) / 100.0
}

/// The handle that should move when the user picks `value`.
///
/// Ties go to the second handle when `value` lies above it, so that a click on
/// top of two overlapping handles can still move them apart.
pub fn nearest_slot(options: &SliderOptions, value: f64) -> ValueSlot {
    if !options.is_interval {
        return ValueSlot::First;
    }
    let d1 = (value - options.value1).abs();
    let d2 = (value - options.value2).abs();
    if d2 < d1 || (d2 == d1 && value > options.value2) {
        ValueSlot::Second
    } else {
        ValueSlot::First
    }
}

/// Values to label on the scale.
///
/// Every allowed value is used when there are at most `max_marks` of them.
/// Otherwise every n-th step is kept; the maximum always closes the scale.
pub fn scale_marks(options: &SliderOptions, max_marks: usize) -> Vec<f64> {
    let step = options.step_size;
    let range = options.range();
    if step <= 0.0 || range <= 0.0 || max_marks < 2 {
        return vec![options.min_value, options.max_value];
    }

    let precision = max_decimal_places(&[step, options.min_value, options.max_value]);
    let steps = ceil_tolerant(range / step) as usize;
    let stride = ((steps as f64) / (max_marks - 1) as f64).ceil().max(1.0) as usize;

    let mut marks: Vec<f64> = (0..steps)
        .step_by(stride)
        .map(|k| round_to(options.min_value + step * k as f64, precision))
        .collect();

    // A mark crowding the maximum would overlap its label
    if let Some(&last) = marks.last() {
        if marks.len() > 1 && (options.max_value - last) < step * stride as f64 / 4.0 {
            marks.pop();
        }
    }
    marks.push(options.max_value);
    marks
}
