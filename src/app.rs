//! FarmHub Irrigation App
//!
//! Builds the store from config and demo data, starts the soil-moisture
//! simulator and lays out the page.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::actions::ActionQueue;
use crate::components::{FieldMap, SchedulePanel, SensorPanel, StatsCards};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::{FieldCanvas, Metric};
use crate::seed;
use crate::simulator::{DeviceAdapter, SoilMoistureSimulator};
use crate::store::{store_apply_metric, FarmState};

/// Device id the simulator reports as
const SIMULATED_DEVICE: &str = "sensor-1";

/// Initial state: canvas from config, sections from config or the demo set
fn initial_state(config: &AppConfig) -> FarmState {
    let canvas = FieldCanvas {
        width_m: config.field_width_m,
        height_m: config.field_height_m,
        unit: config.display_unit,
        grid_step_m: config.grid_step_m,
        ..FieldCanvas::default()
    };
    let records = if config.sections.is_empty() { seed::section_records() } else { config.sections.clone() };
    let sections = seed::sections_from_records(records, &canvas);
    FarmState {
        canvas,
        sections,
        sensors: seed::sensors(),
        schedule: seed::schedule(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let state = initial_state(&config);
    log::info!(
        "[APP] {} sections, {} sensors, {} schedule items on a {} x {} m field",
        state.sections.len(),
        state.sensors.len(),
        state.schedule.len(),
        state.canvas.width_m,
        state.canvas.height_m,
    );

    let store = Store::new(state);
    provide_context(store);
    provide_context(AppContext::new(config.clone(), signal(ActionQueue::default())));

    if config.simulator_enabled {
        let mut simulator = SoilMoistureSimulator::new(SIMULATED_DEVICE, config.simulator_interval_ms);
        simulator.on_metric(Rc::new(move |metric: &Metric| {
            if !store_apply_metric(&store, metric) {
                log::debug!("[SIM] no sensor took {} from {}", metric.key, metric.device_id);
            }
        }));
        simulator.connect();

        let simulator = StoredValue::new_local(simulator);
        on_cleanup(move || simulator.update_value(|s| s.disconnect()));
    }

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Smart Irrigation"</h1>
                <p class="subtitle">"Field sections, sensors and watering schedule"</p>
            </header>

            <StatsCards />

            <div class="main-grid">
                <SensorPanel />
                <FieldMap />
            </div>

            <SchedulePanel />
        </div>
    }
}
