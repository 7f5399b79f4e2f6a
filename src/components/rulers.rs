//! Ruler Components
//!
//! Labelled ticks along the top and left edges of the field map.

use leptos::prelude::*;

use crate::store::{use_farm_store, FarmStateStoreFields};
use crate::units::ruler_ticks;

/// Which edge the ruler runs along
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RulerAxis {
    Horizontal,
    Vertical,
}

#[component]
pub fn Ruler(axis: RulerAxis) -> impl IntoView {
    let store = use_farm_store();

    let ticks = move || {
        let canvas = store.canvas().get();
        let length = match axis {
            RulerAxis::Horizontal => canvas.width_m,
            RulerAxis::Vertical => canvas.height_m,
        };
        ruler_ticks(length, canvas.grid_step_m, canvas.unit)
    };
    let symbol = move || store.canvas().with(|c| c.unit.symbol());

    let (class, edge) = match axis {
        RulerAxis::Horizontal => ("ruler ruler-x", "left"),
        RulerAxis::Vertical => ("ruler ruler-y", "top"),
    };

    view! {
        <div class=class>
            {move || ticks().into_iter().map(|tick| view! {
                <span class="ruler-tick" style=format!("{}: {:.4}%;", edge, tick.fraction * 100.0)>
                    {tick.label}
                </span>
            }).collect_view()}
            <span class="ruler-unit">{symbol}</span>
        </div>
    }
}
