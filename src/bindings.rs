//! JavaScript entry points.
//!
//! Setters accept any `JsValue`: numeric setters ignore anything that is not a
//! finite number and flag setters ignore anything that is not a boolean.

use crate::events::{EventPayload, ModelEvent};
use crate::model::Model;
use crate::options::SliderOptions;
use crate::report::LogReporter;
use crate::subscription::{Binding, Subscriptions};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

fn payload_to_js(payload: &EventPayload) -> JsValue {
    serde_wasm_bindgen::to_value(payload).unwrap_or(JsValue::NULL)
}

fn parse_event(name: &str) -> Result<ModelEvent, JsValue> {
    name.parse::<ModelEvent>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Wrap a JS function as a listener. An exception thrown by the function is
/// rethrown, so it aborts the rest of the dispatch and reaches the JS caller.
fn js_callback(function: js_sys::Function) -> impl Fn(&EventPayload) + 'static {
    move |payload| {
        if let Err(e) = function.call1(&JsValue::NULL, &payload_to_js(payload)) {
            wasm_bindgen::throw_val(e);
        }
    }
}

/// Slider model handle exported to JavaScript as `RangeSliderModel`.
#[wasm_bindgen(js_name = RangeSliderModel)]
pub struct JsModel {
    model: Rc<Model>,
    subscriptions: Subscriptions,
    /// JS functions handed to `subscribe`, with the binding created for each.
    callbacks: RefCell<Vec<(js_sys::Function, Binding)>>,
}

#[wasm_bindgen(js_class = RangeSliderModel)]
impl JsModel {
    /// Build a model from a (possibly partial) options object.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsModel, JsValue> {
        let options: SliderOptions = if options.is_undefined() || options.is_null() {
            SliderOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid slider options: {}", e)))?
        };
        Ok(JsModel {
            model: Rc::new(Model::new(options, Rc::new(LogReporter))),
            subscriptions: Subscriptions::new(),
            callbacks: RefCell::new(Vec::new()),
        })
    }

    #[wasm_bindgen(js_name = getOptions)]
    pub fn get_options(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.model.options()).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = getStateOptions)]
    pub fn get_state_options(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.model.state_options()).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = allowedValuesCount)]
    pub fn allowed_values_count(&self) -> usize {
        self.model.allowed_values_count()
    }

    #[wasm_bindgen(js_name = fractionalPrecision)]
    pub fn fractional_precision(&self) -> u32 {
        self.model.fractional_precision()
    }

    #[wasm_bindgen(js_name = penultimateValue)]
    pub fn penultimate_value(&self) -> f64 {
        self.model.penultimate_value()
    }

    #[wasm_bindgen(js_name = indexOf)]
    pub fn index_of(&self, value: f64) -> f64 {
        self.model.index_of(value)
    }

    #[wasm_bindgen(js_name = valueAtIndex)]
    pub fn value_at_index(&self, index: f64) -> f64 {
        self.model.value_at_index(index)
    }

    #[wasm_bindgen(js_name = isAllowed)]
    pub fn is_allowed(&self, value: f64) -> bool {
        self.model.is_allowed(value)
    }

    #[wasm_bindgen(js_name = setValue1)]
    pub fn set_value1(&self, value: JsValue) {
        if let Some(v) = value.as_f64() {
            self.model.set_value1(v);
        }
    }

    #[wasm_bindgen(js_name = setValue2)]
    pub fn set_value2(&self, value: JsValue) {
        if let Some(v) = value.as_f64() {
            self.model.set_value2(v);
        }
    }

    #[wasm_bindgen(js_name = setStepSize)]
    pub fn set_step_size(&self, value: JsValue) {
        if let Some(v) = value.as_f64() {
            self.model.set_step_size(v);
        }
    }

    #[wasm_bindgen(js_name = setMinValue)]
    pub fn set_min_value(&self, value: JsValue) {
        if let Some(v) = value.as_f64() {
            self.model.set_min_value(v);
        }
    }

    #[wasm_bindgen(js_name = setMaxValue)]
    pub fn set_max_value(&self, value: JsValue) {
        if let Some(v) = value.as_f64() {
            self.model.set_max_value(v);
        }
    }

    #[wasm_bindgen(js_name = setVerticalState)]
    pub fn set_vertical_state(&self, value: JsValue) {
        if let Some(b) = value.as_bool() {
            self.model.set_vertical_state(b);
        }
    }

    #[wasm_bindgen(js_name = setInterval)]
    pub fn set_interval(&self, value: JsValue) {
        if let Some(b) = value.as_bool() {
            self.model.set_interval(b);
        }
    }

    #[wasm_bindgen(js_name = setShowTip)]
    pub fn set_show_tip(&self, value: JsValue) {
        if let Some(b) = value.as_bool() {
            self.model.set_show_tip(b);
        }
    }

    #[wasm_bindgen(js_name = setShowScale)]
    pub fn set_show_scale(&self, value: JsValue) {
        if let Some(b) = value.as_bool() {
            self.model.set_show_scale(b);
        }
    }

    #[wasm_bindgen(js_name = setShowProgress)]
    pub fn set_show_progress(&self, value: JsValue) {
        if let Some(b) = value.as_bool() {
            self.model.set_show_progress(b);
        }
    }

    /// Register a listener. Unknown event names are rejected.
    pub fn on(&self, event: &str, listener: js_sys::Function) -> Result<(), JsValue> {
        let event = parse_event(event)?;
        self.model.on(event, js_callback(listener));
        Ok(())
    }

    /// Bind an `<input>` element or a function to `event`.
    pub fn subscribe(&self, event: &str, target: JsValue) -> Result<(), JsValue> {
        let event = parse_event(event)?;

        let binding = if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            Binding::Element(input.clone())
        } else if let Some(function) = target.dyn_ref::<js_sys::Function>() {
            let binding = Binding::callback(js_callback(function.clone()));
            self.callbacks
                .borrow_mut()
                .push((function.clone(), binding.clone()));
            binding
        } else {
            return Err(JsValue::from_str(
                "subscribe expects an input element or a function",
            ));
        };

        self.subscriptions.subscribe(&self.model, event, binding);
        Ok(())
    }

    /// Remove a binding created by `subscribe`. Returns whether one was found.
    pub fn unsubscribe(&self, target: JsValue) -> bool {
        if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            return self
                .subscriptions
                .unsubscribe(&Binding::Element(input.clone()));
        }

        let mut callbacks = self.callbacks.borrow_mut();
        let mut removed = false;
        callbacks.retain(|(function, binding)| {
            if JsValue::from(function.clone()) == target {
                removed |= self.subscriptions.unsubscribe(binding);
                false
            } else {
                true
            }
        });
        removed
    }
}

impl JsModel {
    /// Shared handle for Rust-side consumers such as the Yew adapter.
    pub fn model(&self) -> Rc<Model> {
        Rc::clone(&self.model)
    }
}
