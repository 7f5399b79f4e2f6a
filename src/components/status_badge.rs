//! Status Badge Component

use leptos::prelude::*;

use crate::models::{ScheduleStatus, SectionStatus, SensorStatus};

/// Visual tone shared by section, sensor and schedule statuses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Good,
    Attention,
    Danger,
    Neutral,
}

impl Tone {
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Good => "good",
            Tone::Attention => "attention",
            Tone::Danger => "danger",
            Tone::Neutral => "neutral",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tone::Good => "✔",
            Tone::Attention | Tone::Danger => "⚠",
            Tone::Neutral => "◷",
        }
    }
}

impl From<SectionStatus> for Tone {
    fn from(status: SectionStatus) -> Self {
        match status {
            SectionStatus::Watered => Tone::Good,
            SectionStatus::NeedsWater => Tone::Attention,
            SectionStatus::Scheduled => Tone::Neutral,
        }
    }
}

impl From<SensorStatus> for Tone {
    fn from(status: SensorStatus) -> Self {
        match status {
            SensorStatus::Active => Tone::Good,
            SensorStatus::Warning => Tone::Attention,
            SensorStatus::Offline => Tone::Danger,
        }
    }
}

impl From<ScheduleStatus> for Tone {
    fn from(status: ScheduleStatus) -> Self {
        match status {
            ScheduleStatus::Complete => Tone::Good,
            ScheduleStatus::Scheduled => Tone::Neutral,
        }
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] tone: Signal<Tone>, #[prop(into)] label: Signal<&'static str>) -> impl IntoView {
    view! {
        <span class=move || format!("badge badge-{}", tone.get().class())>{move || label.get()}</span>
    }
}
