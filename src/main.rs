//! Demo entry point: mounts one interval slider into the page.

use range_slider::components::RangeSlider;
use range_slider::config::MOUNT_ELEMENT_ID;
use range_slider::hooks::SliderHandle;
use range_slider::{LogReporter, Model, SliderOptions};
use std::rc::Rc;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let handle = use_memo((), |_| {
        let options = SliderOptions {
            is_interval: true,
            ..SliderOptions::default()
        };
        SliderHandle::new(Model::new(options, Rc::new(LogReporter)))
    });

    html! {
        <RangeSlider handle={(*handle).clone()} />
    }
}

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already installed".into());
    }

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ELEMENT_ID));

    match root {
        Some(element) => {
            yew::Renderer::<App>::with_root(element).render();
        }
        None => {
            log::warn!("#{} not found, mounting on <body>", MOUNT_ELEMENT_ID);
            yew::Renderer::<App>::new().render();
        }
    }
}
