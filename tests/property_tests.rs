//! Property tests for model invariants.
//!
//! Uses proptest to verify:
//! 1. Resting invariants hold after construction and after any mutator
//! 2. Allowed values survive an index round trip
//! 3. The last allowed index lands on the maximum
//! 4. Setting the current value again never notifies anyone

use proptest::prelude::*;
use range_slider::{MemoryReporter, Model, ModelEvent, SliderOptions};
use std::cell::Cell;
use std::rc::Rc;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_options() -> impl Strategy<Value = SliderOptions> {
    (
        -1000i32..1000,
        1i32..2000,
        prop_oneof![Just(1.0_f64), Just(0.5), Just(2.5), Just(10.0), Just(0.25), Just(7.0)],
        -1500.0..1500.0_f64,
        -1500.0..1500.0_f64,
        any::<bool>(),
    )
        .prop_map(|(min, span, step, v1, v2, is_interval)| {
            let min = min as f64;
            let max = min + span as f64;
            SliderOptions {
                step_size: step.min(span as f64),
                min_value: min,
                max_value: max,
                value1: v1,
                value2: v2,
                is_interval,
                ..SliderOptions::default()
            }
        })
}

#[derive(Debug, Clone)]
enum Op {
    Value1(f64),
    Value2(f64),
    Step(f64),
    Min(f64),
    Max(f64),
    Interval(bool),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-2000.0..2000.0_f64).prop_map(Op::Value1),
        (-2000.0..2000.0_f64).prop_map(Op::Value2),
        prop_oneof![
            Just(1.0),
            Just(-5.0),
            Just(0.5),
            Just(3.0),
            Just(0.0),
            Just(0.1),
            Just(0.03),
            Just(4.12),
            Just(1e-4),
            Just(1e-18),
        ]
        .prop_map(Op::Step),
        // hundredths leave fractional ranges behind
        (-150_000i32..150_000).prop_map(|v| Op::Min(v as f64 / 100.0)),
        (-150_000i32..150_000).prop_map(|v| Op::Max(v as f64 / 100.0)),
        prop_oneof![Just(1e300), Just(-1e300)].prop_map(Op::Max),
        any::<bool>().prop_map(Op::Interval),
    ]
}

fn apply(model: &Model, op: &Op) {
    match *op {
        Op::Value1(v) => model.set_value1(v),
        Op::Value2(v) => model.set_value2(v),
        Op::Step(s) => model.set_step_size(s),
        Op::Min(m) => model.set_min_value(m),
        Op::Max(m) => model.set_max_value(m),
        Op::Interval(b) => model.set_interval(b),
    }
}

fn assert_invariants(model: &Model) -> Result<(), TestCaseError> {
    let opts = model.options();
    prop_assert!(opts.min_value < opts.max_value);
    prop_assert!(opts.step_size > 0.0);
    // the step is compared against the range rounded to the digits of the bounds
    prop_assert!(opts.step_size <= (opts.max_value - opts.min_value) * (1.0 + 1e-9));
    prop_assert!(model.allowed_values_count() >= 2);
    prop_assert!(model.penultimate_value() < opts.max_value);
    prop_assert!(model.is_allowed(opts.value1), "value1 {} not allowed", opts.value1);
    if opts.is_interval {
        prop_assert!(model.is_allowed(opts.value2), "value2 {} not allowed", opts.value2);
        prop_assert!(opts.value1 < opts.value2);
    }
    Ok(())
}

fn quiet_model(options: SliderOptions) -> Model {
    let model = Model::new(options, Rc::new(MemoryReporter::new()));
    for event in ModelEvent::ALL {
        model.on(event, |_| {});
    }
    model
}

// ── 1. Resting invariants ────────────────────────────────────────────

proptest! {
    #[test]
    fn construction_restores_invariants(options in arb_options()) {
        let model = quiet_model(options);
        assert_invariants(&model)?;
    }

    #[test]
    fn mutators_preserve_invariants(
        options in arb_options(),
        ops in prop::collection::vec(arb_op(), 1..20),
    ) {
        let model = quiet_model(options);
        for op in &ops {
            apply(&model, op);
            assert_invariants(&model)?;
        }
    }
}

// ── 2. Index round trip ──────────────────────────────────────────────

proptest! {
    #[test]
    fn allowed_values_round_trip(options in arb_options(), k in 0usize..4000) {
        let model = quiet_model(options);
        let index = (k % model.allowed_values_count()) as f64;
        let value = model.value_at_index(index);
        prop_assert!(model.is_allowed(value));
        prop_assert_eq!(model.value_at_index(model.index_of(value).round()), value);
    }
}

// ── 3. Allowed value count ───────────────────────────────────────────

proptest! {
    #[test]
    fn last_index_lands_on_max(
        options in arb_options(),
        ops in prop::collection::vec(arb_op(), 0..10),
    ) {
        let model = quiet_model(options);
        for op in &ops {
            apply(&model, op);
        }
        let opts = model.options();
        let last = (model.allowed_values_count() - 1) as f64;
        prop_assert_eq!(model.value_at_index(last), opts.max_value);
        prop_assert!(model.value_at_index(last - 1.0) < opts.max_value);
        let raw = (opts.max_value - opts.min_value) / opts.step_size;
        prop_assert!((last - raw).abs() < 1.0 + 1e-6, "{} steps for {}", last, raw);
    }
}

// ── 4. Same-value no-ops ─────────────────────────────────────────────

proptest! {
    #[test]
    fn resetting_current_values_is_silent(options in arb_options()) {
        let model = Model::new(options, Rc::new(MemoryReporter::new()));
        let fired = Rc::new(Cell::new(0u32));
        for event in ModelEvent::ALL {
            let fired = fired.clone();
            model.on(event, move |_| fired.set(fired.get() + 1));
        }

        let opts = model.options();
        model.set_value1(opts.value1);
        model.set_value2(opts.value2);
        model.set_step_size(opts.step_size);
        model.set_min_value(opts.min_value);
        model.set_max_value(opts.max_value);
        model.set_interval(opts.is_interval);
        model.set_vertical_state(opts.is_vertical);
        model.set_show_tip(opts.show_tip);
        model.set_show_scale(opts.show_scale);
        model.set_show_progress(opts.show_progress_bar);

        prop_assert_eq!(fired.get(), 0);
        prop_assert_eq!(model.options(), opts);
    }
}
