//! Canvas Settings Component
//!
//! Field size, display unit, grid step and overlay toggles.

use leptos::prelude::*;

use crate::forms::coerce_number;
use crate::models::FieldCanvas;
use crate::store::{store_set_canvas, use_farm_store, FarmStateStoreFields};
use crate::units::{grid_step_label, DisplayUnit, GRID_STEPS_M};

#[component]
pub fn CanvasSettings() -> impl IntoView {
    let store = use_farm_store();
    let canvas = move || store.canvas().get();

    // Every control edits a copy of the canvas and writes it back
    let apply = move |edit: &dyn Fn(&mut FieldCanvas)| {
        let mut next = store.canvas().get_untracked();
        edit(&mut next);
        if next != store.canvas().get_untracked() {
            log::info!("[FIELD] canvas {} x {} m, step {} m, {}", next.width_m, next.height_m, next.grid_step_m, next.unit.as_str());
            store_set_canvas(&store, next);
        }
    };

    let on_size = move |horizontal: bool, ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        apply(&|c: &mut FieldCanvas| {
            let current = if horizontal { c.width_m } else { c.height_m };
            let meters = c.unit.to_meters(coerce_number("field size", &raw, c.unit.to_display(current)));
            if meters > 0.0 {
                if horizontal { c.width_m = meters } else { c.height_m = meters }
            }
        });
    };

    view! {
        <div class="canvas-settings">
            <label>
                "Width "
                <input
                    type="number"
                    min="0"
                    step=move || canvas().unit.input_step()
                    prop:value=move || { let c = canvas(); c.unit.format(c.width_m) }
                    on:change=move |ev| on_size(true, ev)
                />
            </label>
            <label>
                "Height "
                <input
                    type="number"
                    min="0"
                    step=move || canvas().unit.input_step()
                    prop:value=move || { let c = canvas(); c.unit.format(c.height_m) }
                    on:change=move |ev| on_size(false, ev)
                />
            </label>

            <div class="unit-toggle">
                {[DisplayUnit::Meters, DisplayUnit::Kilometers].into_iter().map(|unit| view! {
                    <button
                        type="button"
                        class=move || if canvas().unit == unit { "type-btn small active" } else { "type-btn small" }
                        on:click=move |_| apply(&|c: &mut FieldCanvas| c.unit = unit)
                    >
                        {unit.symbol()}
                    </button>
                }).collect_view()}
            </div>

            <label>
                "Grid "
                <select on:change=move |ev| {
                    let raw = event_target_value(&ev);
                    if let Ok(step) = raw.parse::<f64>() {
                        apply(&|c: &mut FieldCanvas| c.grid_step_m = step);
                    }
                }>
                    {GRID_STEPS_M.into_iter().map(|step| view! {
                        <option value=step.to_string() selected=move || canvas().grid_step_m == step>
                            {move || grid_step_label(step, canvas().unit)}
                        </option>
                    }).collect_view()}
                </select>
            </label>

            <label class="toggle">
                <input
                    type="checkbox"
                    prop:checked=move || canvas().show_grid
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        apply(&|c: &mut FieldCanvas| c.show_grid = on);
                    }
                />
                " Grid lines"
            </label>
            <label class="toggle">
                <input
                    type="checkbox"
                    prop:checked=move || canvas().show_rulers
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        apply(&|c: &mut FieldCanvas| c.show_rulers = on);
                    }
                />
                " Rulers"
            </label>
        </div>
    }
}
