//! Sensor Panel Component
//!
//! Sensor list with status badges plus the add/edit form. The add form can
//! be opened from other views through the action queue.

use leptos::prelude::*;

use crate::actions::{ActionTarget, UiAction};
use crate::components::delete_confirm_button::DeleteConfirmButton;
use crate::components::status_badge::{StatusBadge, Tone};
use crate::context::use_app_context;
use crate::forms::SensorDraft;
use crate::models::{Sensor, SensorStatus, SensorType};
use crate::store::{store_add_sensor, store_remove_sensor, store_update_sensor, use_farm_store, FarmStateStoreFields};

/// What the form is doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormMode {
    Closed,
    Add,
    Edit(u32),
}

type Getter = fn(&SensorDraft) -> &String;
type Setter = fn(&mut SensorDraft, String);

fn sensor_input(
    draft: RwSignal<SensorDraft>,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    get: Getter,
    set: Setter,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || draft.with(|d| get(d).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
        </label>
    }
}

/// Short metadata line under a sensor's name
fn meta_summary(sensor: &Sensor) -> String {
    let meta = &sensor.meta;
    let mut parts = Vec::new();
    match (meta.manufacturer.is_empty(), meta.model.is_empty()) {
        (false, false) => parts.push(format!("{} {}", meta.manufacturer, meta.model)),
        (true, false) => parts.push(meta.model.clone()),
        (false, true) => parts.push(meta.manufacturer.clone()),
        (true, true) => {}
    }
    if let Some(date) = meta.install_date {
        parts.push(format!("since {}", date.format("%Y-%m-%d")));
    }
    parts.push(format!("every {} s", meta.polling_interval_s));
    parts.join(" · ")
}

#[component]
pub fn SensorPanel() -> impl IntoView {
    let store = use_farm_store();
    let ctx = use_app_context();

    let (mode, set_mode) = signal(FormMode::Closed);
    let draft = RwSignal::new(SensorDraft::blank(None));
    let (error, set_error) = signal(None::<String>);

    let open_add = move |location: Option<String>| {
        draft.set(SensorDraft::blank(location));
        set_error.set(None);
        set_mode.set(FormMode::Add);
    };

    // "Add sensor here" and similar requests from other views
    Effect::new(move |_| {
        ctx.actions.track();
        if let Some(UiAction::OpenAddSensor { location }) = ctx.take_for(ActionTarget::Sensors) {
            open_add(location);
        }
    });

    let open_edit = move |sensor: &Sensor| {
        draft.set(SensorDraft::from_sensor(sensor));
        set_error.set(None);
        set_mode.set(FormMode::Edit(sensor.id));
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        let result = match mode.get_untracked() {
            FormMode::Closed => return,
            FormMode::Add => store_add_sensor(&store, |id| current.into_sensor(id)),
            FormMode::Edit(id) => current.into_sensor(id).and_then(|s| store_update_sensor(&store, s)).map(|_| id),
        };
        match result {
            Ok(id) => {
                log::info!("[SENSOR] saved #{}", id);
                set_mode.set(FormMode::Closed);
                set_error.set(None);
            }
            Err(e) => {
                log::warn!("[SENSOR] not saved: {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
    };

    let remove = move |id: u32| match store_remove_sensor(&store, id) {
        Ok(removed) => log::info!("[SENSOR] removed '{}'", removed.name),
        Err(e) => log::warn!("[SENSOR] remove failed: {}", e),
    };

    let rows = move || {
        store.sensors().get().into_iter().map(|sensor| {
            let id = sensor.id;
            let summary = meta_summary(&sensor);
            let for_edit = sensor.clone();
            view! {
                <li class="sensor-row">
                    <span class=format!("sensor-icon {}", Tone::from(sensor.status).class())>
                        {Tone::from(sensor.status).icon()}
                    </span>
                    <div class="sensor-main">
                        <div class="sensor-name">{sensor.name.clone()}</div>
                        <div class="sensor-sub">
                            {format!("{} · {}", sensor.sensor_type.label(), sensor.location)}
                        </div>
                        <div class="sensor-meta">{summary}</div>
                    </div>
                    <div class="sensor-value">{sensor.value.clone()}</div>
                    <StatusBadge tone=Tone::from(sensor.status) label=sensor.status.label() />
                    <button type="button" class="edit-btn" title="Edit" on:click=move |_| open_edit(&for_edit)>"✎"</button>
                    <DeleteConfirmButton button_class="delete-btn" on_confirm=Callback::new(move |_: ()| remove(id)) />
                </li>
            }
        }).collect_view()
    };

    view! {
        <section class="sensor-panel">
            <div class="panel-header">
                <h2>"Sensors"</h2>
                <button type="button" class="primary-btn" on:click=move |_| open_add(None)>"+ Sensor"</button>
            </div>

            <Show when=move || mode.get() != FormMode::Closed>
                <form class="sensor-form" on:submit=submit>
                    <h3>{move || if mode.get() == FormMode::Add { "Add Sensor" } else { "Edit Sensor" }}</h3>
                    {sensor_input(draft, "Name", "text", "Soil Moisture 5", |d| &d.name, |d, v| d.name = v)}
                    <label class="form-field">
                        <span class="form-label">"Type"</span>
                        <select on:change=move |ev| {
                            let t = SensorType::from_str(&event_target_value(&ev));
                            draft.update(|d| d.sensor_type = t);
                        }>
                            {SensorType::ALL.into_iter().map(|t| view! {
                                <option value=t.as_str() selected=move || draft.with(|d| d.sensor_type == t)>{t.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Status"</span>
                        <select on:change=move |ev| {
                            let s = SensorStatus::from_str(&event_target_value(&ev));
                            draft.update(|d| d.status = s);
                        }>
                            {SensorStatus::ALL.into_iter().map(|s| view! {
                                <option value=s.as_str() selected=move || draft.with(|d| d.status == s)>{s.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    {sensor_input(draft, "Location", "text", "Section A", |d| &d.location, |d, v| d.location = v)}
                    {sensor_input(draft, "Current value", "text", "-", |d| &d.value, |d, v| d.value = v)}
                    {sensor_input(draft, "Model", "text", "", |d| &d.model, |d, v| d.model = v)}
                    {sensor_input(draft, "Manufacturer", "text", "", |d| &d.manufacturer, |d, v| d.manufacturer = v)}
                    {sensor_input(draft, "Serial", "text", "", |d| &d.serial, |d, v| d.serial = v)}
                    <label class="form-field">
                        <span class="form-label">"Unit"</span>
                        <input
                            type="text"
                            placeholder=move || draft.with(|d| d.sensor_type.default_unit())
                            prop:value=move || draft.with(|d| d.unit.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.unit = value);
                            }
                        />
                    </label>
                    {sensor_input(draft, "Installed", "date", "", |d| &d.install_date, |d, v| d.install_date = v)}
                    {sensor_input(draft, "Polling (s)", "number", "60", |d| &d.polling_interval_s, |d, v| d.polling_interval_s = v)}

                    {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}

                    <div class="form-actions">
                        <button type="button" class="secondary-btn" on:click=move |_| set_mode.set(FormMode::Closed)>"Cancel"</button>
                        <button type="submit" class="primary-btn">"Save"</button>
                    </div>
                </form>
            </Show>

            <ul class="sensor-list">{rows}</ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SensorMeta;
    use chrono::NaiveDate;

    fn sensor(meta: SensorMeta) -> Sensor {
        Sensor {
            id: 1,
            name: "Flow Meter".to_string(),
            sensor_type: SensorType::Flow,
            status: SensorStatus::Active,
            value: "12 L/min".to_string(),
            location: "Main Line".to_string(),
            meta,
        }
    }

    #[test]
    fn test_meta_summary_full() {
        let s = sensor(SensorMeta {
            model: "FM-200".to_string(),
            manufacturer: "AquaTech".to_string(),
            install_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            polling_interval_s: 30,
            ..SensorMeta::default()
        });
        assert_eq!(meta_summary(&s), "AquaTech FM-200 · since 2024-03-01 · every 30 s");
    }

    #[test]
    fn test_meta_summary_sparse() {
        let s = sensor(SensorMeta { polling_interval_s: 60, ..SensorMeta::default() });
        assert_eq!(meta_summary(&s), "every 60 s");
    }
}
