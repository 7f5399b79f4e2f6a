//! Section Edit Dialog
//!
//! Modal editor for one field section. Placement can be entered either as
//! legacy grid cells or as real measurements in the display unit; whichever
//! was touched last wins on save.

use leptos::prelude::*;

use crate::actions::UiAction;
use crate::components::delete_confirm_button::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::forms::{PlacementSource, SectionDraft};
use crate::models::SectionStatus;
use crate::store::{store_remove_section, store_update_section, use_farm_store, FarmStateStoreFields};

type Getter = fn(&SectionDraft) -> &String;
type Setter = fn(&mut SectionDraft, String);

/// One labelled input bound to a draft field
fn draft_input(
    draft: RwSignal<Option<SectionDraft>>,
    label: &'static str,
    input_type: &'static str,
    get: Getter,
    set: Setter,
    source: Option<PlacementSource>,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                step="any"
                prop:value=move || draft.with(|d| d.as_ref().map(|d| get(d).clone()).unwrap_or_default())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| {
                        let Some(d) = d.as_mut() else { return };
                        set(d, value);
                        if let Some(source) = source {
                            d.placement_source = source;
                        }
                    });
                }
            />
        </label>
    }
}

#[component]
pub fn SectionEditDialog(
    /// Section being edited; None keeps the dialog closed
    #[prop(into)] editing: Signal<Option<u32>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let store = use_farm_store();
    let ctx = use_app_context();

    let draft = RwSignal::new(None::<SectionDraft>);
    let (error, set_error) = signal(None::<String>);

    // Refill the draft whenever a different section is opened
    Effect::new(move |_| {
        let opened = editing.get().and_then(|id| {
            let canvas = store.canvas().get_untracked();
            store
                .sections()
                .with_untracked(|list| list.iter().find(|s| s.id == id).map(|s| SectionDraft::from_section(s, &canvas)))
        });
        draft.set(opened);
        set_error.set(None);
    });

    let close = move || {
        set_error.set(None);
        on_close.run(());
    };

    let save = move |_| {
        let Some(id) = editing.get_untracked() else { return };
        let canvas = store.canvas().get_untracked();
        let Some(section) = store.sections().with_untracked(|list| list.iter().find(|s| s.id == id).cloned()) else {
            set_error.set(Some(format!("section #{} no longer exists", id)));
            return;
        };
        let Some(result) = draft.with_untracked(|d| d.as_ref().map(|d| d.apply(&section, &canvas))) else { return };
        let result = result.and_then(|updated| store_update_section(&store, updated));
        match result {
            Ok(()) => {
                log::info!("[FIELD] saved section #{}", id);
                close();
            }
            Err(e) => {
                log::warn!("[FIELD] section #{} not saved: {}", id, e);
                set_error.set(Some(e.to_string()));
            }
        }
    };

    let delete = move |_: ()| {
        let Some(id) = editing.get_untracked() else { return };
        match store_remove_section(&store, id) {
            Ok(removed) => log::info!("[FIELD] removed '{}'", removed.name),
            Err(e) => log::warn!("[FIELD] remove failed: {}", e),
        }
        close();
    };

    let add_sensor = move |_| {
        let location = draft.with_untracked(|d| d.as_ref().map(|d| d.name.trim().to_string()));
        ctx.dispatch(UiAction::OpenAddSensor { location });
        close();
    };

    let schedule = move |_| {
        if let Some(id) = editing.get_untracked() {
            ctx.dispatch(UiAction::ScheduleSection(id));
            close();
        }
    };

    let unit_symbol = move || store.canvas().with(|c| c.unit.symbol());

    view! {
        <Show when=move || draft.with(|d| d.is_some())>
            <div class="dialog-backdrop" on:click=move |_| close()>
                <div class="dialog" on:click=|ev| ev.stop_propagation()>
                    <div class="dialog-header">
                        <h3>{move || draft.with(|d| d.as_ref().map(|d| format!("Edit {}", d.name)).unwrap_or_default())}</h3>
                        <button type="button" class="close-btn" on:click=move |_| close()>"×"</button>
                    </div>

                    <div class="dialog-body">
                        {draft_input(draft, "Name", "text", |d| &d.name, |d, v| d.name = v, None)}
                        {draft_input(draft, "Crop", "text", |d| &d.crop, |d, v| d.crop = v, None)}
                        {draft_input(draft, "Water amount", "text", |d| &d.water_amount, |d, v| d.water_amount = v, None)}
                        <label class="form-field">
                            <span class="form-label">"Status"</span>
                            <select on:change=move |ev| {
                                let status = SectionStatus::from_str(&event_target_value(&ev));
                                draft.update(|d| if let Some(d) = d.as_mut() { d.status = status });
                            }>
                                {SectionStatus::ALL.into_iter().map(|status| view! {
                                    <option
                                        value=status.as_str()
                                        selected=move || draft.with(|d| d.as_ref().is_some_and(|d| d.status == status))
                                    >
                                        {status.label()}
                                    </option>
                                }).collect_view()}
                            </select>
                        </label>
                        {draft_input(draft, "Moisture %", "number", |d| &d.moisture, |d, v| d.moisture = v, None)}

                        <fieldset class="placement">
                            <legend>{move || format!("Measurements ({})", unit_symbol())}</legend>
                            {draft_input(draft, "X", "number", |d| &d.x, |d, v| d.x = v, Some(PlacementSource::Measurements))}
                            {draft_input(draft, "Y", "number", |d| &d.y, |d, v| d.y = v, Some(PlacementSource::Measurements))}
                            {draft_input(draft, "Width", "number", |d| &d.width, |d, v| d.width = v, Some(PlacementSource::Measurements))}
                            {draft_input(draft, "Height", "number", |d| &d.height, |d, v| d.height = v, Some(PlacementSource::Measurements))}
                        </fieldset>

                        <fieldset class="placement">
                            <legend>"Grid cells"</legend>
                            {draft_input(draft, "Row", "number", |d| &d.grid_row, |d, v| d.grid_row = v, Some(PlacementSource::Grid))}
                            {draft_input(draft, "Column", "number", |d| &d.grid_col, |d, v| d.grid_col = v, Some(PlacementSource::Grid))}
                            {draft_input(draft, "Row span", "number", |d| &d.grid_row_span, |d, v| d.grid_row_span = v, Some(PlacementSource::Grid))}
                            {draft_input(draft, "Column span", "number", |d| &d.grid_col_span, |d, v| d.grid_col_span = v, Some(PlacementSource::Grid))}
                        </fieldset>

                        {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                    </div>

                    <div class="dialog-actions">
                        <button type="button" class="secondary-btn" on:click=add_sensor>"Add sensor here"</button>
                        <button type="button" class="secondary-btn" on:click=schedule>"Schedule watering"</button>
                        <span class="spacer"></span>
                        <DeleteConfirmButton button_class="delete-btn" on_confirm=Callback::new(delete) />
                        <button type="button" class="primary-btn" on:click=save>"Save"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
