//! Yew view of the slider.
//!
//! The component only renders what [`use_slider_options`] reports and turns
//! clicks into model calls; every correction happens in the model.

use crate::config::MAX_SCALE_MARKS;
use crate::events::ValueSlot;
use crate::hooks::{use_slider_options, SliderHandle};
use crate::model::Model;
use crate::options::SliderOptions;
use crate::utils::{format_value, nearest_slot, percent_to_value, scale_marks, value_to_percent};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

/// Move the handle closest to `value`.
pub fn pick_value(model: &Model, value: f64) {
    let slot = nearest_slot(&model.options(), value);
    model.set_value(slot, value);
}

/// Track offset of a click, in percent, measured from the minimum end.
fn click_percent(e: &MouseEvent, vertical: bool) -> Option<f64> {
    let track: HtmlElement = e.current_target()?.dyn_into().ok()?;
    let rect = track.get_bounding_client_rect();
    let percent = if vertical {
        if rect.height() <= 0.0 {
            return None;
        }
        (rect.bottom() - e.client_y() as f64) / rect.height() * 100.0
    } else {
        if rect.width() <= 0.0 {
            return None;
        }
        (e.client_x() as f64 - rect.left()) / rect.width() * 100.0
    };
    Some(percent)
}

/// CSS for a segment starting at `start` percent and `length` percent long.
fn segment_style(vertical: bool, start: f64, length: f64) -> String {
    if vertical {
        format!("bottom: {}%; height: {}%;", start, length)
    } else {
        format!("left: {}%; width: {}%;", start, length)
    }
}

fn position_style(vertical: bool, percent: f64) -> String {
    if vertical {
        format!("bottom: {}%;", percent)
    } else {
        format!("left: {}%;", percent)
    }
}

/// Start and length of the progress bar, in percent.
fn progress_segment(options: &SliderOptions) -> (f64, f64) {
    let p1 = value_to_percent(options.value1, options.min_value, options.max_value);
    if options.is_interval {
        let p2 = value_to_percent(options.value2, options.min_value, options.max_value);
        (p1, p2 - p1)
    } else {
        (0.0, p1)
    }
}

fn render_handle(options: &SliderOptions, slot: ValueSlot, precision: u32) -> Html {
    let value = match slot {
        ValueSlot::First => options.value1,
        ValueSlot::Second => options.value2,
    };
    let percent = value_to_percent(value, options.min_value, options.max_value);
    html! {
        <div class={classes!("range-slider__handle", format!("range-slider__handle_{}", slot.number()))}
             style={position_style(options.is_vertical, percent)}>
            if options.show_tip {
                <div class="range-slider__tip">{ format_value(value, precision) }</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RangeSliderProps {
    pub handle: SliderHandle,
    #[prop_or(MAX_SCALE_MARKS)]
    pub max_scale_marks: usize,
}

#[function_component(RangeSlider)]
pub fn range_slider(props: &RangeSliderProps) -> Html {
    let options = use_slider_options(&props.handle);
    let model = props.handle.model().clone();
    let precision = model.fractional_precision();
    let vertical = options.is_vertical;

    let on_track_click = {
        let model = model.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(percent) = click_percent(&e, vertical) {
                let opts = model.options();
                pick_value(&model, percent_to_value(percent, opts.min_value, opts.max_value));
            }
        })
    };

    let (start, length) = progress_segment(&options);

    html! {
        <div class={classes!("range-slider", vertical.then_some("range-slider_vertical"))}>
            <div class="range-slider__track" onclick={on_track_click}>
                if options.show_progress_bar {
                    <div class="range-slider__progress" style={segment_style(vertical, start, length)} />
                }
                { render_handle(&options, ValueSlot::First, precision) }
                if options.is_interval {
                    { render_handle(&options, ValueSlot::Second, precision) }
                }
            </div>
            if options.show_scale {
                <div class="range-slider__scale">
                    { scale_marks(&options, props.max_scale_marks).into_iter().map(|mark| {
                        let model = model.clone();
                        let onclick = Callback::from(move |_: MouseEvent| pick_value(&model, mark));
                        let percent = value_to_percent(mark, options.min_value, options.max_value);
                        html! {
                            <span class="range-slider__mark"
                                  style={position_style(vertical, percent)}
                                  {onclick}>
                                { format_value(mark, precision) }
                            </span>
                        }
                    }).collect::<Html>() }
                </div>
            }
        </div>
    }
}
