//! Schedule Panel Component
//!
//! Irrigation schedule ordered by time of day, with add, edit, delete and a
//! complete toggle.

use leptos::prelude::*;

use crate::actions::{ActionTarget, UiAction};
use crate::components::delete_confirm_button::DeleteConfirmButton;
use crate::components::status_badge::{StatusBadge, Tone};
use crate::context::use_app_context;
use crate::forms::ScheduleDraft;
use crate::models::ScheduleStatus;
use crate::schedule::ordered;
use crate::store::{
    store_add_schedule, store_remove_schedule, store_toggle_schedule, store_update_schedule, use_farm_store,
    FarmStateStoreFields,
};

/// Clicking a row's section name opens that section on the field map
fn edit_request(section_id: u32) -> UiAction {
    UiAction::EditSection(section_id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormMode {
    Closed,
    Add,
    Edit(u32),
}

#[component]
pub fn SchedulePanel() -> impl IntoView {
    let store = use_farm_store();
    let ctx = use_app_context();

    let (mode, set_mode) = signal(FormMode::Closed);
    let draft = RwSignal::new(ScheduleDraft::blank(None));
    let (error, set_error) = signal(None::<String>);

    let open_add = move |section_id: Option<u32>| {
        draft.set(ScheduleDraft::blank(section_id));
        set_error.set(None);
        set_mode.set(FormMode::Add);
    };

    Effect::new(move |_| {
        ctx.actions.track();
        if let Some(UiAction::ScheduleSection(id)) = ctx.take_for(ActionTarget::Schedule) {
            open_add(Some(id));
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        let result = match mode.get_untracked() {
            FormMode::Closed => return,
            FormMode::Add => store_add_schedule(&store, |id| current.into_item(id)),
            FormMode::Edit(id) => current.into_item(id).and_then(|item| store_update_schedule(&store, item)).map(|_| id),
        };
        match result {
            Ok(id) => {
                log::info!("[SCHEDULE] saved #{}", id);
                set_mode.set(FormMode::Closed);
                set_error.set(None);
            }
            Err(e) => {
                log::warn!("[SCHEDULE] not saved: {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
    };

    let remove = move |id: u32| {
        if let Err(e) = store_remove_schedule(&store, id) {
            log::warn!("[SCHEDULE] remove failed: {}", e);
        }
    };

    let section_name = move |section_id: u32| {
        store.sections().with(|list| {
            list.iter()
                .find(|s| s.id == section_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| format!("Section #{}", section_id))
        })
    };

    let rows = move || {
        let items = store.schedule().with(|list| ordered(list));
        items.into_iter().map(|item| {
            let id = item.id;
            let section_id = item.section_id;
            let complete = item.status == ScheduleStatus::Complete;
            let for_edit = ScheduleDraft::from_item(&item);
            view! {
                <li class="schedule-row" class:complete=complete>
                    <input
                        type="checkbox"
                        title="Mark complete"
                        prop:checked=complete
                        on:change=move |_| store_toggle_schedule(&store, id)
                    />
                    <span class="schedule-time">{item.time.clone()}</span>
                    <button
                        type="button"
                        class="schedule-section link-btn"
                        title="Open section"
                        on:click=move |_| ctx.dispatch(edit_request(section_id))
                    >
                        {section_name(section_id)}
                    </button>
                    <span class="schedule-detail">{format!("{} min · {} L", item.duration_min, item.amount_l)}</span>
                    <StatusBadge tone=Tone::from(item.status) label=item.status.label() />
                    <button
                        type="button"
                        class="edit-btn"
                        title="Edit"
                        on:click=move |_| {
                            draft.set(for_edit.clone());
                            set_error.set(None);
                            set_mode.set(FormMode::Edit(id));
                        }
                    >
                        "✎"
                    </button>
                    <DeleteConfirmButton button_class="delete-btn" on_confirm=Callback::new(move |_: ()| remove(id)) />
                </li>
            }
        }).collect_view()
    };

    let section_options = move || {
        store.sections().get().into_iter().map(|s| {
            let id = s.id;
            view! {
                <option value=id.to_string() selected=move || draft.with(|d| d.section_id == Some(id))>{s.name}</option>
            }
        }).collect_view()
    };

    view! {
        <section class="schedule-panel">
            <div class="panel-header">
                <h2>"Irrigation Schedule"</h2>
                <button type="button" class="primary-btn" on:click=move |_| open_add(None)>"+ Schedule"</button>
            </div>

            <Show when=move || mode.get() != FormMode::Closed>
                <form class="schedule-form" on:submit=submit>
                    <label class="form-field">
                        <span class="form-label">"Time"</span>
                        <input
                            type="text"
                            placeholder="6:00 AM"
                            prop:value=move || draft.with(|d| d.time.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.time = value);
                            }
                        />
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Section"</span>
                        <select on:change=move |ev| {
                            let picked = event_target_value(&ev).parse::<u32>().ok();
                            draft.update(|d| d.section_id = picked);
                        }>
                            <option value="" selected=move || draft.with(|d| d.section_id.is_none())>"Choose…"</option>
                            {section_options}
                        </select>
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Duration (min)"</span>
                        <input
                            type="number"
                            min="0"
                            prop:value=move || draft.with(|d| d.duration_min.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.duration_min = value);
                            }
                        />
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Amount (L)"</span>
                        <input
                            type="number"
                            min="0"
                            step="any"
                            prop:value=move || draft.with(|d| d.amount_l.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.amount_l = value);
                            }
                        />
                    </label>

                    {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}

                    <div class="form-actions">
                        <button type="button" class="secondary-btn" on:click=move |_| set_mode.set(FormMode::Closed)>"Cancel"</button>
                        <button type="submit" class="primary-btn">"Save"</button>
                    </div>
                </form>
            </Show>

            <ul class="schedule-list">{rows}</ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionQueue;

    #[test]
    fn test_section_link_reaches_field_map_only() {
        let mut queue = ActionQueue::default();
        queue.push(edit_request(4));
        assert!(queue.take_for(ActionTarget::Schedule).is_none());
        assert!(queue.take_for(ActionTarget::Sensors).is_none());
        assert_eq!(queue.take_for(ActionTarget::FieldMap), Some(UiAction::EditSection(4)));
        assert!(queue.is_empty());
    }
}
