//! UI Components
//!
//! Leptos components for the irrigation page.

mod canvas_settings;
mod delete_confirm_button;
mod field_map;
mod rulers;
mod schedule_panel;
mod section_dialog;
mod section_rect;
mod sensor_panel;
mod stats_cards;
mod status_badge;

pub use field_map::FieldMap;
pub use schedule_panel::SchedulePanel;
pub use sensor_panel::SensorPanel;
pub use stats_cards::StatsCards;
