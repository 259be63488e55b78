use crate::events::ModelEvent;
use crate::model::Model;
use crate::options::SliderOptions;
use crate::subscription::{Binding, Subscriptions};
use std::rc::Rc;
use yew::prelude::*;

/// Shared model handle, comparable by identity so it can be a prop or a hook
/// dependency.
///
/// The handle owns the one [`Subscriptions`] registry used by every component
/// watching the model, so remounting never adds listeners to the model.
#[derive(Clone, Debug)]
pub struct SliderHandle {
    model: Rc<Model>,
    subscriptions: Rc<Subscriptions>,
}

impl SliderHandle {
    pub fn new(model: Model) -> Self {
        Self::from_shared(Rc::new(model))
    }

    pub fn from_shared(model: Rc<Model>) -> Self {
        SliderHandle {
            model,
            subscriptions: Rc::new(Subscriptions::new()),
        }
    }

    pub fn model(&self) -> &Rc<Model> {
        &self.model
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    /// Call `on_change` with fresh options after every model event. The
    /// returned binding removes the watch again through [`Subscriptions::unsubscribe`].
    pub fn watch<F>(&self, on_change: F) -> Binding
    where
        F: Fn(SliderOptions) + 'static,
    {
        let weak = Rc::downgrade(&self.model);
        let binding = Binding::callback(move |_| {
            if let Some(model) = weak.upgrade() {
                on_change(model.options());
            }
        });
        for event in ModelEvent::ALL {
            self.subscriptions
                .subscribe(&self.model, event, binding.clone());
        }
        binding
    }
}

impl PartialEq for SliderHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.model, &other.model)
    }
}

/// Current options of the model, refreshed on every model event.
///
/// The watch is dropped again when the component unmounts or the handle
/// changes.
#[hook]
pub fn use_slider_options(handle: &SliderHandle) -> SliderOptions {
    let options = use_state_eq(|| handle.model.options());

    {
        let options = options.clone();
        use_effect_with(handle.clone(), move |handle| {
            let binding = handle.watch(move |opts| options.set(opts));
            let handle = handle.clone();
            move || {
                handle.subscriptions().unsubscribe(&binding);
            }
        });
    }

    *options
}
