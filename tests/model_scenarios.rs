//! End-to-end behaviour of the slider model: construction, value setters,
//! step and bound changes, and the events each of them emits.

use range_slider::{EventPayload, MemoryReporter, Model, ModelEvent, SliderOptions, ValueSlot};
use std::cell::RefCell;
use std::rc::Rc;

type EventLog = Rc<RefCell<Vec<(ModelEvent, EventPayload)>>>;

// ── Helpers ──────────────────────────────────────────────────────────

fn interval_options() -> SliderOptions {
    SliderOptions {
        is_interval: true,
        ..SliderOptions::default()
    }
}

fn build(options: SliderOptions) -> (Model, Rc<MemoryReporter>, EventLog) {
    let reporter = Rc::new(MemoryReporter::new());
    let model = Model::new(options, reporter.clone());
    let log: EventLog = Rc::default();
    for event in ModelEvent::ALL {
        let log = log.clone();
        model.on(event, move |p| log.borrow_mut().push((event, *p)));
    }
    (model, reporter, log)
}

fn events(log: &EventLog) -> Vec<ModelEvent> {
    log.borrow().iter().map(|(e, _)| *e).collect()
}

fn value_payload(slot: ValueSlot, value: f64) -> EventPayload {
    EventPayload::Value {
        number: slot,
        value,
        should_update_tip: true,
    }
}

// ── Construction ─────────────────────────────────────────────────────

#[test]
fn default_model_derived_state() {
    let (model, reporter, log) = build(SliderOptions::default());
    assert_eq!(model.allowed_values_count(), 21);
    assert_eq!(model.fractional_precision(), 0);
    assert_eq!(model.penultimate_value(), 90.0);
    assert!(reporter.warnings().is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn both_values_at_max_move_value1_to_penultimate() {
    let (model, reporter, _) = build(SliderOptions {
        is_interval: true,
        value1: 100.0,
        value2: 100.0,
        ..SliderOptions::default()
    });
    let opts = model.options();
    assert_eq!(opts.value1, 90.0);
    assert_eq!(opts.value2, 100.0);
    assert_eq!(reporter.warnings().len(), 1);
}

#[test]
fn reversed_values_are_swapped_with_warning() {
    let (model, reporter, _) = build(SliderOptions {
        is_interval: true,
        value1: 40.0,
        value2: 30.0,
        ..SliderOptions::default()
    });
    let opts = model.options();
    assert_eq!((opts.value1, opts.value2), (30.0, 40.0));
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("swapped"));
    assert!(reporter.errors().is_empty());
}

#[test]
fn options_are_returned_by_copy() {
    let (model, _, _) = build(SliderOptions::default());
    let mut copy = model.options();
    copy.value1 = 0.0;
    copy.is_vertical = true;
    assert_eq!(model.options().value1, -50.0);
    assert!(!model.state_options().is_vertical);
}

// ── Value setters ────────────────────────────────────────────────────

#[test]
fn set_value1_snaps_to_nearest_allowed() {
    let (model, reporter, log) = build(interval_options());
    model.set_value1(-74.0);

    assert_eq!(model.options().value1, -70.0);
    assert_eq!(
        *log.borrow(),
        vec![(ModelEvent::Value1Changed, value_payload(ValueSlot::First, -70.0))]
    );
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("from -74 to -70"));
}

#[test]
fn bounds_are_accepted_unchanged() {
    let (model, reporter, log) = build(SliderOptions::default());
    model.set_value1(-100.0);
    model.set_value1(100.0);
    model.set_value2(-100.0);

    assert_eq!(model.options().value1, 100.0);
    assert_eq!(model.options().value2, -100.0);
    assert!(reporter.warnings().is_empty());
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn same_value_and_non_finite_input_are_ignored() {
    let (model, reporter, log) = build(interval_options());
    model.set_value1(-50.0);
    model.set_value2(50.0);
    model.set_value1(f64::NAN);
    model.set_value2(f64::INFINITY);
    model.set_step_size(f64::NAN);
    model.set_min_value(f64::NEG_INFINITY);
    model.set_max_value(f64::NAN);

    assert!(log.borrow().is_empty());
    assert!(reporter.warnings().is_empty());
    assert_eq!(model.options(), interval_options());
}

#[test]
fn correction_back_to_current_value_still_announces() {
    let (model, reporter, log) = build(SliderOptions::default());
    model.set_value1(-52.0);
    assert_eq!(model.options().value1, -50.0);
    assert_eq!(
        *log.borrow(),
        vec![(ModelEvent::Value1Changed, value_payload(ValueSlot::First, -50.0))]
    );
    assert_eq!(reporter.warnings().len(), 1);
}

#[test]
fn interval_values_cannot_cross() {
    let (model, _, log) = build(interval_options());

    model.set_value1(80.0);
    assert_eq!(model.options().value1, 40.0);

    model.set_value2(-90.0);
    assert_eq!(model.options().value2, 50.0);
    // next allowed above value1 (40) is 50, where value2 already sits
    assert_eq!(
        *log.borrow(),
        vec![
            (ModelEvent::Value1Changed, value_payload(ValueSlot::First, 40.0)),
            (ModelEvent::Value2Changed, value_payload(ValueSlot::Second, 50.0)),
        ]
    );

    model.set_value2(100.0);
    model.set_value1(100.0);
    assert_eq!(model.options().value1, 90.0);
    assert_eq!(model.options().value2, 100.0);
}

// ── Step size ────────────────────────────────────────────────────────

#[test]
fn fractional_step_recomputes_values() {
    let (model, _, log) = build(interval_options());
    model.set_step_size(4.12);

    assert_eq!(model.fractional_precision(), 2);
    assert_eq!(model.allowed_values_count(), 50);
    let opts = model.options();
    assert_eq!(opts.value1, -50.56);
    assert_eq!(opts.value2, 48.32);
    assert_eq!(
        *log.borrow(),
        vec![
            (ModelEvent::StepSizeChanged, EventPayload::Number(4.12)),
            (ModelEvent::Value1Changed, value_payload(ValueSlot::First, -50.56)),
            (ModelEvent::Value2Changed, value_payload(ValueSlot::Second, 48.32)),
        ]
    );
}

#[test]
fn invalid_steps_are_rejected() {
    let (model, _, log) = build(SliderOptions::default());
    model.set_step_size(0.0);
    model.set_step_size(201.0);
    model.set_step_size(-201.0);
    model.set_step_size(10.0);
    assert!(log.borrow().is_empty());
    assert_eq!(model.options().step_size, 10.0);
}

#[test]
fn negative_step_is_made_positive() {
    let (model, _, log) = build(SliderOptions::default());
    model.set_step_size(-25.0);
    assert_eq!(model.options().step_size, 25.0);
    assert_eq!(model.allowed_values_count(), 9);
    assert_eq!(events(&log)[0], ModelEvent::StepSizeChanged);
}

#[test]
fn step_equal_to_range_is_accepted() {
    let (model, _, _) = build(SliderOptions::default());
    model.set_step_size(200.0);
    assert_eq!(model.options().step_size, 200.0);
    assert_eq!(model.allowed_values_count(), 2);
    assert_eq!(model.penultimate_value(), -100.0);
}

#[test]
fn too_fine_step_is_refused() {
    let (model, reporter, log) = build(SliderOptions::default());
    model.set_step_size(1e-18);

    assert_eq!(model.options().step_size, 10.0);
    assert_eq!(model.allowed_values_count(), 21);
    assert!(log.borrow().is_empty());
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("stepSize 0.000000000000000001 ignored"));
}

#[test]
fn fine_step_within_limit_is_accepted() {
    let (model, _, _) = build(SliderOptions::default());
    model.set_step_size(0.001);

    assert_eq!(model.allowed_values_count(), 200_001);
    assert_eq!(model.fractional_precision(), 3);
    assert!(model.is_allowed(-99.999));
    assert!(model.is_allowed(42.137));
    assert!(!model.is_allowed(42.1375));
    model.set_value1(12.3456);
    assert_eq!(model.options().value1, 12.346);
}

#[test]
fn aligned_values_do_not_emit_after_step_change() {
    let (model, _, log) = build(SliderOptions::default());
    model.set_step_size(5.0);
    assert_eq!(events(&log), vec![ModelEvent::StepSizeChanged]);
}

// ── Bounds ───────────────────────────────────────────────────────────

#[test]
fn min_equal_to_max_pushes_max_up() {
    let (model, reporter, log) = build(SliderOptions::default());
    model.set_min_value(100.0);

    let opts = model.options();
    assert_eq!(opts.min_value, 100.0);
    assert_eq!(opts.max_value, 110.0);
    assert_eq!(opts.value1, 100.0);
    assert_eq!(
        events(&log),
        vec![
            ModelEvent::MinValueChanged,
            ModelEvent::MaxValueChanged,
            ModelEvent::Value1Changed,
        ]
    );
    assert!(!reporter.warnings().is_empty());
}

#[test]
fn max_equal_to_min_pushes_min_down() {
    let (model, _, _) = build(SliderOptions::default());
    model.set_max_value(-100.0);
    let opts = model.options();
    assert_eq!(opts.max_value, -100.0);
    assert_eq!(opts.min_value, -110.0);
}

#[test]
fn inverting_bounds_is_rejected() {
    let (model, _, log) = build(SliderOptions::default());
    model.set_min_value(150.0);
    model.set_max_value(-150.0);
    assert!(log.borrow().is_empty());
    assert_eq!(model.options(), SliderOptions::default());
}

#[test]
fn bound_change_always_announces_values() {
    let (model, _, log) = build(interval_options());
    model.set_max_value(200.0);

    assert_eq!(model.allowed_values_count(), 31);
    assert_eq!(
        *log.borrow(),
        vec![
            (ModelEvent::MaxValueChanged, EventPayload::Number(200.0)),
            (ModelEvent::Value1Changed, value_payload(ValueSlot::First, -50.0)),
            (ModelEvent::Value2Changed, value_payload(ValueSlot::Second, 50.0)),
        ]
    );
}

#[test]
fn narrowing_range_shrinks_step() {
    let (model, reporter, log) = build(SliderOptions {
        step_size: 50.0,
        ..SliderOptions::default()
    });
    model.set_min_value(80.0);

    let opts = model.options();
    assert_eq!(opts.step_size, 20.0);
    assert_eq!(opts.value1, 80.0);
    assert!(events(&log).contains(&ModelEvent::StepSizeChanged));
    assert!(reporter
        .warnings()
        .iter()
        .any(|w| w.contains("stepSize changed from 50 to 20")));
}

#[test]
fn shrunk_step_drops_float_noise() {
    let (model, reporter, log) = build(SliderOptions::default());
    model.set_min_value(95.3);

    let opts = model.options();
    assert_eq!(opts.step_size, 4.7);
    assert_eq!(model.fractional_precision(), 1);
    assert_eq!(model.allowed_values_count(), 2);
    assert_eq!(opts.value1, 95.3);
    assert_eq!(
        *log.borrow(),
        vec![
            (ModelEvent::MinValueChanged, EventPayload::Number(95.3)),
            (ModelEvent::StepSizeChanged, EventPayload::Number(4.7)),
            (ModelEvent::Value1Changed, value_payload(ValueSlot::First, 95.3)),
        ]
    );
    assert!(reporter
        .warnings()
        .iter()
        .any(|w| w.contains("stepSize changed from 10 to 4.7")));
}

#[test]
fn unbounded_range_growth_is_refused() {
    let (model, reporter, log) = build(SliderOptions::default());
    model.set_max_value(1e300);

    assert_eq!(model.options(), SliderOptions::default());
    assert!(log.borrow().is_empty());
    assert!(reporter.warnings()[0].contains("allowed values"));
}

#[test]
fn raising_min_moves_value_into_range() {
    let (model, _, _) = build(interval_options());
    model.set_min_value(60.0);
    let opts = model.options();
    assert_eq!(opts.value1, 60.0);
    assert_eq!(opts.value2, 70.0);
}

// ── Notifier behaviour through the model ─────────────────────────────

#[test]
fn emitting_without_listeners_reports_emit_error() {
    let reporter = Rc::new(MemoryReporter::new());
    let model = Model::new(SliderOptions::default(), reporter.clone());
    model.set_show_tip(false);

    assert!(!model.options().show_tip);
    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("EmitError"));
    assert!(errors[0].contains("showTipChanged"));
}

#[test]
fn listener_may_reenter_model() {
    let reporter = Rc::new(MemoryReporter::new());
    let model = Rc::new(Model::new(interval_options(), reporter));
    let seen = Rc::new(RefCell::new(Vec::new()));

    {
        let weak = Rc::downgrade(&model);
        model.on(ModelEvent::Value1Changed, move |p| {
            // push value2 ahead once value1 reaches 40
            if let (Some(model), Some(v)) = (weak.upgrade(), p.as_f64()) {
                if v >= 40.0 {
                    model.set_value2(v + 20.0);
                }
            }
        });
    }
    {
        let seen = seen.clone();
        model.on(ModelEvent::Value2Changed, move |p| {
            seen.borrow_mut().push(p.as_f64());
        });
    }

    model.set_value1(40.0);
    assert_eq!(model.options().value2, 60.0);
    assert_eq!(*seen.borrow(), vec![Some(60.0)]);
}
