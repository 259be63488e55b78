//! Removable subscriptions on top of the model's append-only notifier.
//!
//! A [`Binding`] is either a live `<input>` element, whose `value` or
//! `checked` property is kept in sync with an event, or a plain callback.
//! [`Subscriptions`] attaches a single forwarding listener per event to the
//! model and keeps its own registry, so bindings can be removed again.

use crate::events::{EventPayload, ModelEvent};
use crate::model::Model;
use crate::utils::format_value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use web_sys::HtmlInputElement;

/// Callback binding.
pub type PayloadCallback = Rc<dyn Fn(&EventPayload)>;

/// Something that can receive event payloads.
#[derive(Clone)]
pub enum Binding {
    Element(HtmlInputElement),
    Callback(PayloadCallback),
}

impl Binding {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&EventPayload) + 'static,
    {
        Binding::Callback(Rc::new(f))
    }

    /// Deliver `payload`. Elements get `checked` for flags and `value`, written
    /// with `precision` decimals, otherwise.
    pub fn receive(&self, payload: &EventPayload, precision: u32) {
        match self {
            Binding::Element(input) => match element_text(payload, precision) {
                Some(text) => input.set_value(&text),
                None => input.set_checked(payload.as_bool().unwrap_or_default()),
            },
            Binding::Callback(callback) => callback(payload),
        }
    }
}

/// Text written into a bound input, `None` for flags.
fn element_text(payload: &EventPayload, precision: u32) -> Option<String> {
    match payload {
        EventPayload::Flag(_) => None,
        EventPayload::Value { value, .. } | EventPayload::Number(value) => {
            Some(format_value(*value, precision))
        }
    }
}

impl PartialEq for Binding {
    /// Identity, not structural equality.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Binding::Element(a), Binding::Element(b)) => a == b,
            (Binding::Callback(a), Binding::Callback(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Element(_) => f.write_str("Binding::Element"),
            Binding::Callback(_) => f.write_str("Binding::Callback"),
        }
    }
}

type Registry = Rc<RefCell<HashMap<ModelEvent, Vec<Binding>>>>;

/// Registry of removable bindings for one model.
#[derive(Default)]
pub struct Subscriptions {
    registry: Registry,
    attached: RefCell<HashSet<ModelEvent>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `binding` in sync with `event` until it is unsubscribed.
    pub fn subscribe(&self, model: &Rc<Model>, event: ModelEvent, binding: Binding) {
        self.registry
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(binding);

        if self.attached.borrow_mut().insert(event) {
            let registry = Rc::clone(&self.registry);
            let weak = Rc::downgrade(model);
            model.on(event, move |payload| {
                let precision = weak.upgrade().map_or(0, |m| m.fractional_precision());
                // Bindings may subscribe or unsubscribe while being notified
                let bindings = registry.borrow().get(&event).cloned().unwrap_or_default();
                for binding in &bindings {
                    binding.receive(payload, precision);
                }
            });
        }
    }

    /// Remove every registration of `binding`, whatever event it was bound to.
    /// Returns `false` when it was never subscribed.
    pub fn unsubscribe(&self, binding: &Binding) -> bool {
        let mut removed = false;
        for bindings in self.registry.borrow_mut().values_mut() {
            let before = bindings.len();
            bindings.retain(|b| b != binding);
            removed |= bindings.len() != before;
        }
        removed
    }

    pub fn len(&self, event: ModelEvent) -> usize {
        self.registry.borrow().get(&event).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().values().all(Vec::is_empty)
    }
}

impl fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriptions")
            .field("registry", &self.registry.borrow())
            .finish()
    }
}
