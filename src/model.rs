//! Numeric core of the slider.
//!
//! [`Model`] owns the [`SliderOptions`] record, keeps its invariants and
//! announces every change through its [`EventEmitter`]:
//!
//! * `min_value < max_value` and `0 < step_size <= max_value - min_value`
//! * `value1` (and `value2` in interval mode) is an allowed value, that is
//!   `min_value + k * step_size` for some whole `k`, or exactly `max_value`
//! * in interval mode `value1 < value2`
//!
//! All mutators take `&self`. State lives in cells and no borrow is held while
//! listeners run, so a listener may call back into the model.

use crate::config::{MAX_ALLOWED_VALUES, MODEL_MODULE};
use crate::emitter::{EventEmitter, Listener};
use crate::events::{EventPayload, ModelEvent, ValueSlot};
use crate::options::{SliderOptions, StateOptions};
use crate::report::Reporter;
use crate::utils::{max_decimal_places, round_to};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Quantities derived from the bounds and the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepGrid {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Allowed values including both ends.
    pub allowed_values_count: usize,
    /// Decimal digits used to round computed values.
    pub fractional_precision: u32,
    /// Last allowed value strictly below `max`.
    pub penultimate_value: f64,
}

impl StepGrid {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let fractional_precision = max_decimal_places(&[step, min, max]);
        let spans = (max - min) / step;
        // A whole number of steps lands exactly on max once rounded
        let whole = spans.round();
        let steps = if round_to(min + step * whole, fractional_precision) == max {
            whole
        } else {
            spans.ceil()
        };
        let allowed_values_count = steps.clamp(1.0, MAX_ALLOWED_VALUES) as usize + 1;
        let mut grid = Self {
            min,
            max,
            step,
            allowed_values_count,
            fractional_precision,
            penultimate_value: min,
        };
        grid.penultimate_value = grid.value_at_index(allowed_values_count as f64 - 2.0);
        grid
    }

    pub fn from_options(options: &SliderOptions) -> Self {
        Self::new(options.min_value, options.max_value, options.step_size)
    }

    /// Step index of `value`. `max` maps to the last index even when the last
    /// step is shorter than the others.
    pub fn index_of(&self, value: f64) -> f64 {
        if value == self.max {
            return (self.allowed_values_count - 1) as f64;
        }
        (value - self.min) / self.step
    }

    pub fn value_at_index(&self, index: f64) -> f64 {
        let raw = (self.min + self.step * index).clamp(self.min, self.max);
        round_to(raw, self.fractional_precision)
    }

    pub fn is_allowed(&self, value: f64) -> bool {
        if !(self.min..=self.max).contains(&value) {
            return false;
        }
        value == self.min
            || value == self.max
            || value == self.value_at_index(self.index_of(value).round())
    }

    /// Nearest allowed value to `value`, after clamping it into range.
    ///
    /// Inside the last step the penultimate value and `max` are compared
    /// directly, since that step may be shorter than `step`.
    pub fn closest_allowed(&self, value: f64) -> f64 {
        let value = value.clamp(self.min, self.max);
        if value >= self.penultimate_value {
            let below = value - self.penultimate_value;
            let above = self.max - value;
            return if above <= below {
                self.max
            } else {
                self.penultimate_value
            };
        }
        self.value_at_index(self.index_of(value).round())
    }

    /// Allowed value one step below the allowed value `value`.
    pub fn previous_allowed(&self, value: f64) -> f64 {
        self.value_at_index(self.index_of(value).round() - 1.0)
    }

    /// Allowed value one step above the allowed value `value`.
    pub fn next_allowed(&self, value: f64) -> f64 {
        self.value_at_index(self.index_of(value).round() + 1.0)
    }
}

/// Which values a full fixup pass changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixupOutcome {
    pub value1_changed: bool,
    pub value2_changed: bool,
}

/// Slider state engine.
pub struct Model {
    pub(crate) options: Cell<SliderOptions>,
    pub(crate) grid: Cell<StepGrid>,
    /// Set once `value2Changed` has been emitted at least once.
    pub(crate) value2_announced: Cell<bool>,
    emitter: EventEmitter<ModelEvent, EventPayload>,
    reporter: Rc<dyn Reporter>,
}

impl Model {
    /// Build a model from `options`, correcting any value that breaks the
    /// invariants. Nothing is emitted during construction.
    pub fn new(options: SliderOptions, reporter: Rc<dyn Reporter>) -> Self {
        let options = normalize_bounds(options, reporter.as_ref());
        let model = Self {
            options: Cell::new(options),
            grid: Cell::new(StepGrid::from_options(&options)),
            value2_announced: Cell::new(false),
            emitter: EventEmitter::new(reporter.clone()),
            reporter,
        };
        model.fix_values();
        model
    }

    // ── events ───────────────────────────────────────────────────────────

    /// Register `listener` for `event`. Returns `self` for chaining.
    pub fn on<F>(&self, event: ModelEvent, listener: F) -> &Self
    where
        F: Fn(&EventPayload) + 'static,
    {
        self.emitter.on(event, listener);
        self
    }

    pub fn on_shared(&self, event: ModelEvent, listener: Listener<EventPayload>) -> &Self {
        self.emitter.on_shared(event, listener);
        self
    }

    pub fn listener_count(&self, event: ModelEvent) -> usize {
        self.emitter.listener_count(event)
    }

    pub(crate) fn emit(&self, event: ModelEvent, payload: EventPayload) {
        self.emitter.emit(event, &payload);
    }

    pub(crate) fn emit_value(&self, slot: ValueSlot) {
        if slot == ValueSlot::Second {
            self.value2_announced.set(true);
        }
        let payload = EventPayload::Value {
            number: slot,
            value: self.value(slot),
            should_update_tip: true,
        };
        self.emit(ModelEvent::value_changed(slot), payload);
    }

    pub(crate) fn warn(&self, message: &str) {
        self.reporter.warn(MODEL_MODULE, message);
    }

    // ── reads ────────────────────────────────────────────────────────────

    /// Copy of the current options.
    pub fn options(&self) -> SliderOptions {
        self.options.get()
    }

    /// Copy of the boolean display flags.
    pub fn state_options(&self) -> StateOptions {
        self.options.get().state()
    }

    pub fn value(&self, slot: ValueSlot) -> f64 {
        let opts = self.options.get();
        match slot {
            ValueSlot::First => opts.value1,
            ValueSlot::Second => opts.value2,
        }
    }

    pub fn grid(&self) -> StepGrid {
        self.grid.get()
    }

    pub fn allowed_values_count(&self) -> usize {
        self.grid.get().allowed_values_count
    }

    pub fn fractional_precision(&self) -> u32 {
        self.grid.get().fractional_precision
    }

    pub fn penultimate_value(&self) -> f64 {
        self.grid.get().penultimate_value
    }

    pub fn index_of(&self, value: f64) -> f64 {
        self.grid.get().index_of(value)
    }

    pub fn value_at_index(&self, index: f64) -> f64 {
        self.grid.get().value_at_index(index)
    }

    pub fn is_allowed(&self, value: f64) -> bool {
        self.grid.get().is_allowed(value)
    }

    pub fn closest_allowed(&self, value: f64) -> f64 {
        self.grid.get().closest_allowed(value)
    }

    // ── value mutators ───────────────────────────────────────────────────

    pub fn set_value1(&self, value: f64) {
        self.set_value(ValueSlot::First, value);
    }

    pub fn set_value2(&self, value: f64) {
        self.set_value(ValueSlot::Second, value);
    }

    /// Move one handle. The value is clamped, snapped to the step grid and,
    /// in interval mode, kept on its side of the other handle.
    pub fn set_value(&self, slot: ValueSlot, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value == self.value(slot) {
            return;
        }

        // Emitted even when the correction lands back on the current value
        let fixed = self.fix_value(slot, value);
        let mut opts = self.options.get();
        match slot {
            ValueSlot::First => opts.value1 = fixed,
            ValueSlot::Second => opts.value2 = fixed,
        }
        self.options.set(opts);
        self.emit_value(slot);
    }

    /// Change the step. Negative steps are made positive; zero and steps
    /// larger than the range are ignored.
    pub fn set_step_size(&self, step: f64) {
        if !step.is_finite() || step == 0.0 {
            return;
        }
        let step = step.abs();
        let mut opts = self.options.get();
        if step > clean_range(&opts) || step == opts.step_size {
            return;
        }
        if !fits_grid(opts.range(), step) {
            self.warn(&format!(
                "stepSize {} ignored: more than {} allowed values",
                step, MAX_ALLOWED_VALUES
            ));
            return;
        }

        opts.step_size = step;
        self.options.set(opts);
        self.refresh_grid();
        let outcome = self.fix_values();

        self.emit(ModelEvent::StepSizeChanged, EventPayload::Number(step));
        if outcome.value1_changed {
            self.emit_value(ValueSlot::First);
        }
        if opts.is_interval && outcome.value2_changed {
            self.emit_value(ValueSlot::Second);
        }
    }

    /// Move the lower bound. A bound above `max_value` is ignored; a bound equal
    /// to it pushes `max_value` up by one step.
    pub fn set_min_value(&self, min: f64) {
        if !min.is_finite() {
            return;
        }
        let mut opts = self.options.get();
        if min == opts.min_value || min > opts.max_value {
            return;
        }

        let pushed = min == opts.max_value;
        if pushed {
            let max = round_to(
                opts.max_value + opts.step_size,
                max_decimal_places(&[opts.max_value, opts.step_size]),
            );
            self.warn(&format!(
                "maxValue changed from {} to {}: minValue cannot be equal to maxValue",
                opts.max_value, max
            ));
            opts.max_value = max;
        }
        opts.min_value = min;
        self.apply_bounds(opts, ModelEvent::MinValueChanged, pushed);
    }

    /// Move the upper bound. A bound below `min_value` is ignored; a bound equal
    /// to it pushes `min_value` down by one step.
    pub fn set_max_value(&self, max: f64) {
        if !max.is_finite() {
            return;
        }
        let mut opts = self.options.get();
        if max == opts.max_value || max < opts.min_value {
            return;
        }

        let pushed = max == opts.min_value;
        if pushed {
            let min = round_to(
                opts.min_value - opts.step_size,
                max_decimal_places(&[opts.min_value, opts.step_size]),
            );
            self.warn(&format!(
                "minValue changed from {} to {}: maxValue cannot be equal to minValue",
                opts.min_value, min
            ));
            opts.min_value = min;
        }
        opts.max_value = max;
        self.apply_bounds(opts, ModelEvent::MaxValueChanged, pushed);
    }

    /// Store new bounds and announce them, followed by both handle values.
    fn apply_bounds(&self, mut opts: SliderOptions, changed: ModelEvent, other_pushed: bool) {
        if !fits_grid(opts.range(), opts.step_size) {
            self.warn(&format!(
                "bounds {} and {} ignored: more than {} allowed values",
                opts.min_value, opts.max_value, MAX_ALLOWED_VALUES
            ));
            return;
        }
        let range = clean_range(&opts);
        let step_shrunk = opts.step_size > range;
        if step_shrunk {
            self.warn(&format!(
                "stepSize changed from {} to {}: stepSize cannot exceed the range",
                opts.step_size, range
            ));
            opts.step_size = range;
        }
        self.options.set(opts);
        self.refresh_grid();
        self.fix_values();

        let (min_event, max_event) = (
            (ModelEvent::MinValueChanged, opts.min_value),
            (ModelEvent::MaxValueChanged, opts.max_value),
        );
        let (own, other) = if changed == ModelEvent::MinValueChanged {
            (min_event, max_event)
        } else {
            (max_event, min_event)
        };

        self.emit(own.0, EventPayload::Number(own.1));
        if other_pushed {
            self.emit(other.0, EventPayload::Number(other.1));
        }
        if step_shrunk {
            self.emit(
                ModelEvent::StepSizeChanged,
                EventPayload::Number(opts.step_size),
            );
        }
        // Positions move with the bounds even when the values stay put
        self.emit_value(ValueSlot::First);
        if opts.is_interval {
            self.emit_value(ValueSlot::Second);
        }
    }

    // ── fixups ───────────────────────────────────────────────────────────

    pub(crate) fn refresh_grid(&self) {
        self.grid.set(StepGrid::from_options(&self.options.get()));
    }

    /// Bring both values back onto the grid and, in interval mode, into
    /// strict order.
    pub(crate) fn fix_values(&self) -> FixupOutcome {
        let grid = self.grid.get();
        let mut opts = self.options.get();
        let (mut v1, mut v2) = (opts.value1, opts.value2);

        if !grid.is_allowed(v1) {
            let fixed = grid.closest_allowed(v1);
            self.warn(&format!(
                "value1 changed from {} to {}: value1 must be an allowed value",
                v1, fixed
            ));
            v1 = fixed;
        }

        if opts.is_interval {
            if !grid.is_allowed(v2) {
                let fixed = grid.closest_allowed(v2);
                self.warn(&format!(
                    "value2 changed from {} to {}: value2 must be an allowed value",
                    v2, fixed
                ));
                v2 = fixed;
            }

            if v1 == v2 {
                if v1 == grid.max {
                    let fixed = grid.penultimate_value;
                    self.warn(&format!(
                        "value1 changed from {} to {}: value1 and value2 cannot both be maxValue",
                        v1, fixed
                    ));
                    v1 = fixed;
                } else if v2 == grid.min {
                    let fixed = grid.value_at_index(1.0);
                    self.warn(&format!(
                        "value2 changed from {} to {}: value1 and value2 cannot both be minValue",
                        v2, fixed
                    ));
                    v2 = fixed;
                } else {
                    let fixed = grid.next_allowed(v1);
                    self.warn(&format!(
                        "value2 changed from {} to {}: value2 must be greater than value1",
                        v2, fixed
                    ));
                    v2 = fixed;
                }
            }

            if v2 < v1 {
                self.warn(&format!(
                    "value1 and value2 swapped ({} and {}): value1 must be less than value2",
                    v1, v2
                ));
                std::mem::swap(&mut v1, &mut v2);
            }
        }

        let outcome = FixupOutcome {
            value1_changed: v1 != opts.value1,
            value2_changed: v2 != opts.value2,
        };
        opts.value1 = v1;
        opts.value2 = v2;
        self.options.set(opts);
        outcome
    }

    /// Correct a single incoming value for `slot` without storing it.
    fn fix_value(&self, slot: ValueSlot, raw: f64) -> f64 {
        let grid = self.grid.get();
        let opts = self.options.get();
        let mut reasons: Vec<&str> = Vec::new();
        let mut value = raw;

        if value < grid.min {
            value = grid.min;
            reasons.push("value cannot be less than minValue");
        } else if value > grid.max {
            value = grid.max;
            reasons.push("value cannot be greater than maxValue");
        }

        if !grid.is_allowed(value) {
            value = grid.closest_allowed(value);
            reasons.push("value must be an allowed value");
        }

        if opts.is_interval {
            match slot {
                ValueSlot::First if value >= opts.value2 => {
                    value = grid.previous_allowed(opts.value2);
                    reasons.push("value1 must be less than value2");
                }
                ValueSlot::Second if value <= opts.value1 => {
                    value = grid.next_allowed(opts.value1);
                    reasons.push("value2 must be greater than value1");
                }
                _ => {}
            }
        }

        value = round_to(value, grid.fractional_precision);
        if value != raw {
            if reasons.is_empty() {
                reasons.push("value rounded to the step precision");
            }
            self.warn(&format!(
                "value{} changed from {} to {}: {}",
                slot.number(),
                raw,
                value,
                reasons.join("; ")
            ));
        }
        value
    }
}

/// `max_value - min_value` rounded to the digits of the bounds.
fn clean_range(opts: &SliderOptions) -> f64 {
    let range = round_to(
        opts.range(),
        max_decimal_places(&[opts.min_value, opts.max_value]),
    );
    if range > 0.0 {
        range
    } else {
        opts.range()
    }
}

fn fits_grid(range: f64, step: f64) -> bool {
    range / step < MAX_ALLOWED_VALUES
}

/// Repair non-finite numbers, degenerate bounds or a step that does not fit
/// the range before a grid is built from them.
fn normalize_bounds(options: SliderOptions, reporter: &dyn Reporter) -> SliderOptions {
    let defaults = SliderOptions::default();
    let mut opts = options;

    for (name, field, fallback) in [
        ("stepSize", &mut opts.step_size, defaults.step_size),
        ("minValue", &mut opts.min_value, defaults.min_value),
        ("maxValue", &mut opts.max_value, defaults.max_value),
        ("value1", &mut opts.value1, defaults.value1),
        ("value2", &mut opts.value2, defaults.value2),
    ] {
        if !field.is_finite() {
            reporter.warn(
                MODEL_MODULE,
                &format!(
                    "{} changed from {} to {}: {} must be a finite number",
                    name, field, fallback, name
                ),
            );
            *field = fallback;
        }
    }

    opts.step_size = opts.step_size.abs();
    if opts.max_value <= opts.min_value {
        let step = if opts.step_size > 0.0 { opts.step_size } else { 1.0 };
        let max = opts.min_value + step;
        reporter.warn(
            MODEL_MODULE,
            &format!(
                "maxValue changed from {} to {}: maxValue must be greater than minValue",
                opts.max_value, max
            ),
        );
        opts.max_value = max;
    }
    let range = clean_range(&opts);
    if opts.step_size == 0.0 || opts.step_size > range || !fits_grid(opts.range(), opts.step_size) {
        let step = range;
        reporter.warn(
            MODEL_MODULE,
            &format!(
                "stepSize changed from {} to {}: stepSize must be positive and fit the range",
                opts.step_size, step
            ),
        );
        opts.step_size = step;
    }
    opts
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("options", &self.options.get())
            .field("grid", &self.grid.get())
            .field("emitter", &self.emitter)
            .finish()
    }
}
