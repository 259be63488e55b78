//! Range slider state engine for the browser.
//!
//! The [`Model`] owns the slider options (bounds, step, one or two handle
//! values, display flags), keeps them consistent and notifies listeners of
//! every change. Everything that touches the DOM sits on top of it: the
//! [`subscription`] layer binds inputs and callbacks, [`bindings`] exports the
//! model to JavaScript and [`components`] renders it with Yew.
//!
//! ```
//! use range_slider::{MemoryReporter, Model, ModelEvent, SliderOptions};
//! use std::rc::Rc;
//!
//! let model = Model::new(SliderOptions::default(), Rc::new(MemoryReporter::new()));
//! model.on(ModelEvent::Value1Changed, |payload| println!("{:?}", payload));
//! model.set_value1(-74.0);
//! assert_eq!(model.options().value1, -70.0);
//! ```

pub mod bindings;
pub mod components;
pub mod config;
pub mod emitter;
pub mod events;
pub mod hooks;
pub mod model;
pub mod options;
pub mod report;
mod state;
pub mod subscription;
pub mod utils;

pub use emitter::{EmitError, EventEmitter, Listener};
pub use events::{EventPayload, ModelEvent, UnknownEventError, ValueSlot};
pub use model::{FixupOutcome, Model, StepGrid};
pub use options::{SliderOptions, StateOptions};
pub use report::{LogReporter, MemoryReporter, Reporter};
pub use subscription::{Binding, Subscriptions};
