//! Field Map Component
//!
//! The meter-scaled canvas holding every field section, with rulers, the
//! grid overlay, canvas settings and the section edit dialog.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_dragresize::*;
use serde_json::json;

use crate::actions::{ActionTarget, UiAction};
use crate::components::canvas_settings::CanvasSettings;
use crate::components::rulers::{Ruler, RulerAxis};
use crate::components::section_dialog::SectionEditDialog;
use crate::components::section_rect::SectionRect;
use crate::context::use_app_context;
use crate::logger;
use crate::models::FieldCanvas;
use crate::store::{store_add_section, store_move_section, use_farm_store, FarmStateStoreFields};

/// CSS for the canvas: fixed aspect ratio plus an optional grid overlay
fn canvas_style(canvas: &FieldCanvas) -> String {
    let mut style = format!("aspect-ratio: {};", canvas.aspect_ratio());
    if canvas.show_grid && canvas.width_m > 0.0 && canvas.height_m > 0.0 {
        let cell_w = canvas.grid_step_m / canvas.width_m * 100.0;
        let cell_h = canvas.grid_step_m / canvas.height_m * 100.0;
        style.push_str(&format!(
            " background-image: linear-gradient(to right, var(--grid-line) 1px, transparent 1px), \
             linear-gradient(to bottom, var(--grid-line) 1px, transparent 1px); \
             background-size: {:.4}% {:.4}%;",
            cell_w, cell_h
        ));
    }
    style
}

#[component]
pub fn FieldMap() -> impl IntoView {
    let store = use_farm_store();
    let ctx = use_app_context();

    let options = ctx.config.with_value(|c| DragOptions {
        threshold_px: c.click_threshold_px,
        settle_ms: c.settle_ms,
    });
    let drag = create_drag_signals(options);
    let canvas_ref = NodeRef::<Div>::new();
    let surface = DragSurface {
        canvas: canvas_ref,
        bounds: Signal::derive(move || store.canvas().with(|c| c.bounds())),
        step: Signal::derive(move || store.canvas().with(|c| c.grid_step_m)),
    };

    let (editing, set_editing) = signal(None::<u32>);

    bind_global_pointerup(
        drag,
        surface,
        move |id, rect| store_move_section(&store, id, rect),
        move |ended| match ended {
            GestureEnd::Dragged(id, rect) => {
                store_move_section(&store, id, rect);
                logger::info_with(
                    "[FIELD] section placed",
                    &json!({ "id": id, "x": rect.x, "y": rect.y, "width": rect.width, "height": rect.height }),
                );
            }
            GestureEnd::Click(_) | GestureEnd::Nothing => {}
        },
    );

    // Edit requests routed from other views
    Effect::new(move |_| {
        ctx.actions.track();
        if let Some(UiAction::EditSection(id)) = ctx.take_for(ActionTarget::FieldMap) {
            set_editing.set(Some(id));
        }
    });

    let add_section = move |_| {
        let n = store.sections().with_untracked(|list| list.len()) + 1;
        let id = store_add_section(&store, format!("Section {}", n), String::new());
        log::info!("[FIELD] added section #{}", id);
        set_editing.set(Some(id));
    };

    let ids = move || store.sections().with(|list| list.iter().map(|s| s.id).collect::<Vec<_>>());
    let show_rulers = move || store.canvas().with(|c| c.show_rulers);
    let size_label = move || {
        store.canvas().with(|c| format!("{} × {}", c.unit.format(c.width_m), c.unit.format_with_symbol(c.height_m)))
    };

    view! {
        <section class="field-map-panel">
            <div class="panel-header">
                <h2>"Field Map"</h2>
                <span class="field-size">{size_label}</span>
                <button type="button" class="primary-btn" on:click=add_section>"+ Section"</button>
            </div>

            <CanvasSettings />

            <div class="field-map-frame" class:with-rulers=show_rulers>
                <Show when=show_rulers>
                    <Ruler axis=RulerAxis::Horizontal />
                    <Ruler axis=RulerAxis::Vertical />
                </Show>
                <div
                    node_ref=canvas_ref
                    class="field-canvas"
                    class:is-dragging=move || drag.dragging_id().is_some()
                    style=move || store.canvas().with(canvas_style)
                >
                    <For each=ids key=|id| *id let:id>
                        <SectionRect
                            id=id
                            drag=drag
                            surface=surface
                            on_edit=move |id| set_editing.set(Some(id))
                        />
                    </For>
                </div>
            </div>

            <SectionEditDialog editing=editing on_close=move |_| set_editing.set(None) />
        </section>
    }
}
