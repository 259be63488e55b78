//! Display flags of the slider, stored in the same record as its values.

use crate::events::{EventPayload, ModelEvent, ValueSlot};
use crate::model::Model;
use crate::options::SliderOptions;

impl Model {
    pub fn set_vertical_state(&self, is_vertical: bool) {
        self.set_flag(ModelEvent::IsVerticalChanged, is_vertical, |o| {
            &mut o.is_vertical
        });
    }

    pub fn set_show_progress(&self, show: bool) {
        self.set_flag(ModelEvent::ShowProgressChanged, show, |o| {
            &mut o.show_progress_bar
        });
    }

    pub fn set_show_tip(&self, show: bool) {
        self.set_flag(ModelEvent::ShowTipChanged, show, |o| &mut o.show_tip);
    }

    pub fn set_show_scale(&self, show: bool) {
        self.set_flag(ModelEvent::ShowScaleChanged, show, |o| &mut o.show_scale);
    }

    /// Switch between one and two handles.
    ///
    /// Turning interval mode on re-validates both values. `value2Changed` is
    /// sent when the second value was corrected, and also the first time the
    /// second handle appears so that it gets an initial position.
    pub fn set_interval(&self, is_interval: bool) {
        let mut opts = self.options.get();
        if opts.is_interval == is_interval {
            return;
        }
        opts.is_interval = is_interval;
        self.options.set(opts);

        let outcome = self.fix_values();

        self.emit(ModelEvent::IsIntervalChanged, EventPayload::Flag(is_interval));
        if outcome.value1_changed {
            self.emit_value(ValueSlot::First);
        }
        if is_interval && (outcome.value2_changed || !self.value2_announced.get()) {
            self.emit_value(ValueSlot::Second);
        }
    }

    fn set_flag<F>(&self, event: ModelEvent, value: bool, field: F)
    where
        F: Fn(&mut SliderOptions) -> &mut bool,
    {
        let mut opts = self.options.get();
        let slot = field(&mut opts);
        if *slot == value {
            return;
        }
        *slot = value;
        self.options.set(opts);
        self.emit(event, EventPayload::Flag(value));
    }
}
