//! Section Rectangle Component
//!
//! One field section on the map: body drags to move, corner handle drags to
//! resize, a plain click opens the editor.

use leptos::prelude::*;
use leptos_dragresize::*;

use crate::components::status_badge::Tone;
use crate::store::{use_farm_store, FarmStateStoreFields};

/// Share of `total` covered by `part`, as a CSS percentage
fn percent(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}

#[component]
pub fn SectionRect(
    id: u32,
    drag: DragSignals,
    surface: DragSurface,
    #[prop(into)] on_edit: Callback<u32>,
) -> impl IntoView {
    let store = use_farm_store();

    // Keyed by id in the parent, so read the live record here
    let section = Memo::new(move |_| store.sections().with(|list| list.iter().find(|s| s.id == id).cloned()));

    let current = move || section.get_untracked().map(|s| s.rect());
    let on_body_down = make_on_pointerdown(drag, surface, id, DragMode::Move, current);
    let on_handle_down = make_on_pointerdown(drag, surface, id, DragMode::Resize, current);
    let on_click = make_on_click(drag, id, move |id| on_edit.run(id));

    let style = move || {
        let (w, h) = store.canvas().with(|c| (c.width_m, c.height_m));
        section
            .get()
            .map(|s| {
                format!(
                    "left: {:.4}%; top: {:.4}%; width: {:.4}%; height: {:.4}%;",
                    percent(s.x_m, w),
                    percent(s.y_m, h),
                    percent(s.width_m, w),
                    percent(s.height_m, h),
                )
            })
            .unwrap_or_default()
    };

    let class = move || {
        let mut c = String::from("field-section");
        if let Some(s) = section.get() {
            c.push(' ');
            c.push_str(Tone::from(s.status).class());
        }
        if drag.dragging_id() == Some(id) {
            match drag.dragging_mode() {
                Some(DragMode::Resize) => c.push_str(" resizing"),
                _ => c.push_str(" dragging"),
            }
        }
        c
    };

    let size_label = move || {
        let unit = store.canvas().with(|c| c.unit);
        section
            .get()
            .map(|s| format!("{} × {}", unit.format(s.width_m), unit.format_with_symbol(s.height_m)))
            .unwrap_or_default()
    };

    view! {
        <div class=class style=style on:pointerdown=on_body_down on:click=on_click>
            <div class="section-head">
                <span class="section-name">{move || section.get().map(|s| s.name).unwrap_or_default()}</span>
                <span class="section-icon">{move || section.get().map(|s| Tone::from(s.status).icon()).unwrap_or("")}</span>
            </div>
            <div class="section-crop">{move || section.get().map(|s| s.crop).unwrap_or_default()}</div>
            <div class="section-water">{move || section.get().map(|s| s.water_amount).unwrap_or_default()}</div>
            {move || section.get().and_then(|s| s.moisture).map(|m| view! {
                <div class="section-moisture">{format!("{:.1}% moisture", m)}</div>
            })}
            <div class="section-size">{size_label}</div>
            <div
                class="resize-handle"
                title="Drag to resize"
                on:pointerdown=on_handle_down
                on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            />
        </div>
    }
}
