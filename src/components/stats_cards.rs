//! Stats Cards Component

use leptos::prelude::*;

use crate::schedule::summarize;
use crate::store::{use_farm_store, FarmStateStoreFields};

/// Overview cards above the field map
#[component]
pub fn StatsCards() -> impl IntoView {
    let store = use_farm_store();

    let summary = Memo::new(move |_| {
        store.sections().with(|sections| {
            store.sensors().with(|sensors| store.schedule().with(|schedule| summarize(sections, sensors, schedule)))
        })
    });

    view! {
        <div class="stats-cards">
            <div class="stat-card">
                <div class="stat-label">"Water Today"</div>
                <div class="stat-value">{move || format!("{} L", summary.with(|s| s.water_today_l))}</div>
            </div>
            <div class="stat-card">
                <div class="stat-label">"Active Sensors"</div>
                <div class="stat-value">{move || summary.with(|s| format!("{}/{}", s.active_sensors, s.total_sensors))}</div>
            </div>
            <div class="stat-card">
                <div class="stat-label">"Sections Watered"</div>
                <div class="stat-value">{move || summary.with(|s| format!("{}/{}", s.sections_watered, s.total_sections))}</div>
                <div class="stat-sub">{move || summary.with(|s| format!("{} pending", s.pending_sections()))}</div>
            </div>
            <div class="stat-card">
                <div class="stat-label">"Next Schedule"</div>
                {move || match summary.get().next {
                    Some((time, section)) => view! {
                        <div class="stat-value">{time}</div>
                        <div class="stat-sub">{section}</div>
                    }.into_any(),
                    None => view! { <div class="stat-value">"None"</div> }.into_any(),
                }}
            </div>
        </div>
    }
}
