//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The list logic
//! lives in plain functions so it can be tested without a reactive owner.

use leptos::prelude::*;
use leptos_dragresize::Rect;
use reactive_stores::Store;

use crate::error::{FarmError, FarmResult};
use crate::models::{FieldCanvas, FieldSection, Keyed, Metric, ScheduleItem, Sensor, SensorStatus, SensorType};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct FarmState {
    /// Field extent and display settings
    pub canvas: FieldCanvas,
    /// Sections drawn on the field map
    pub sections: Vec<FieldSection>,
    pub sensors: Vec<Sensor>,
    pub schedule: Vec<ScheduleItem>,
}

/// Type alias for the store
pub type FarmStore = Store<FarmState>;

/// Get the farm store from context
pub fn use_farm_store() -> FarmStore {
    expect_context::<FarmStore>()
}

/// Soil moisture below this marks the reporting sensor as needing attention
pub const LOW_MOISTURE_PCT: f64 = 30.0;

// ========================
// List Helpers
// ========================

/// Next free id (max + 1, starting at 1)
pub fn next_id<T: Keyed>(list: &[T]) -> u32 {
    list.iter().map(Keyed::id).max().unwrap_or(0) + 1
}

/// Replace the entry with the same id
pub fn replace_by_id<T: Keyed>(list: &mut [T], updated: T) -> FarmResult<()> {
    let id = updated.id();
    let slot = list
        .iter_mut()
        .find(|e| e.id() == id)
        .ok_or_else(|| FarmError::NotFound(format!("#{}", id)))?;
    *slot = updated;
    Ok(())
}

/// Remove and return the entry with `id`
pub fn remove_by_id<T: Keyed>(list: &mut Vec<T>, id: u32) -> FarmResult<T> {
    let index = list
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| FarmError::NotFound(format!("#{}", id)))?;
    Ok(list.remove(index))
}

/// Placement for a freshly added section: five grid steps square at the origin
pub fn default_section_rect(canvas: &FieldCanvas) -> Rect {
    let side = canvas.grid_step_m * 5.0;
    canvas.clamp_rect(Rect::new(0.0, 0.0, side, side))
}

/// Append a section at the default placement under the next free id
pub fn push_section(sections: &mut Vec<FieldSection>, canvas: &FieldCanvas, name: String, crop: String) -> u32 {
    let id = next_id(sections);
    sections.push(FieldSection::new(id, name, crop, default_section_rect(canvas)));
    id
}

/// Pull every section back inside a (possibly shrunk) canvas
pub fn clamp_sections(sections: &mut [FieldSection], canvas: &FieldCanvas) {
    for section in sections.iter_mut() {
        let clamped = canvas.clamp_rect(section.rect());
        if clamped != section.rect() {
            log::info!("[FIELD] clamped '{}' into {}x{} m", section.name, canvas.width_m, canvas.height_m);
            section.set_rect(clamped);
        }
    }
}

/// Sensor id addressed by a device id of the form `sensor-<id>`
fn sensor_id_for_device(device_id: &str) -> Option<u32> {
    device_id.strip_prefix("sensor-")?.parse().ok()
}

/// Fold a soil-moisture metric into the sensor that produced it and the
/// section at that sensor's location. Returns false when nothing matched.
pub fn apply_metric(sensors: &mut [Sensor], sections: &mut [FieldSection], metric: &Metric) -> bool {
    if metric.key != "soil_moisture" {
        return false;
    }
    let Some(id) = sensor_id_for_device(&metric.device_id) else {
        return false;
    };
    let Some(sensor) = sensors.iter_mut().find(|s| s.id == id && s.sensor_type == SensorType::Moisture) else {
        return false;
    };
    if sensor.status == SensorStatus::Offline {
        return false;
    }

    sensor.value = format!("{:.1}{}", metric.value, metric.unit.as_deref().unwrap_or(""));
    sensor.status = if metric.value < LOW_MOISTURE_PCT { SensorStatus::Warning } else { SensorStatus::Active };

    if let Some(section) = sections.iter_mut().find(|s| s.name == sensor.location) {
        section.moisture = Some(metric.value);
    }
    true
}

// ========================
// Store Functions
// ========================

/// Apply a drag result to a section
pub fn store_move_section(store: &FarmStore, id: u32, rect: Rect) {
    if let Some(section) = store.sections().write().iter_mut().find(|s| s.id == id) {
        section.set_rect(rect);
    }
}

pub fn store_update_section(store: &FarmStore, section: FieldSection) -> FarmResult<()> {
    replace_by_id(&mut store.sections().write(), section)
}

/// Add a section at the default placement and return its id
pub fn store_add_section(store: &FarmStore, name: String, crop: String) -> u32 {
    let canvas = store.canvas().get_untracked();
    push_section(&mut store.sections().write(), &canvas, name, crop)
}

/// Remove a section and the schedule entries pointing at it
pub fn store_remove_section(store: &FarmStore, id: u32) -> FarmResult<FieldSection> {
    let removed = remove_by_id(&mut store.sections().write(), id)?;
    store.schedule().write().retain(|item| item.section_id != id);
    Ok(removed)
}

/// Replace canvas settings, clamping sections into the new extent
pub fn store_set_canvas(store: &FarmStore, canvas: FieldCanvas) {
    clamp_sections(&mut store.sections().write(), &canvas);
    store.canvas().set(canvas);
}

pub fn store_add_sensor(store: &FarmStore, build: impl FnOnce(u32) -> FarmResult<Sensor>) -> FarmResult<u32> {
    let id = next_id(&store.sensors().read_untracked());
    let sensor = build(id)?;
    store.sensors().write().push(sensor);
    Ok(id)
}

pub fn store_update_sensor(store: &FarmStore, sensor: Sensor) -> FarmResult<()> {
    replace_by_id(&mut store.sensors().write(), sensor)
}

pub fn store_remove_sensor(store: &FarmStore, id: u32) -> FarmResult<Sensor> {
    remove_by_id(&mut store.sensors().write(), id)
}

pub fn store_add_schedule(store: &FarmStore, build: impl FnOnce(u32) -> FarmResult<ScheduleItem>) -> FarmResult<u32> {
    let id = next_id(&store.schedule().read_untracked());
    let item = build(id)?;
    store.schedule().write().push(item);
    Ok(id)
}

pub fn store_update_schedule(store: &FarmStore, item: ScheduleItem) -> FarmResult<()> {
    replace_by_id(&mut store.schedule().write(), item)
}

pub fn store_remove_schedule(store: &FarmStore, id: u32) -> FarmResult<ScheduleItem> {
    remove_by_id(&mut store.schedule().write(), id)
}

pub fn store_toggle_schedule(store: &FarmStore, id: u32) {
    if let Some(item) = store.schedule().write().iter_mut().find(|i| i.id == id) {
        item.status = item.status.toggled();
    }
}

/// Feed a device metric into sensors and sections
pub fn store_apply_metric(store: &FarmStore, metric: &Metric) -> bool {
    // Both lists change together, so take the whole state once
    let mut applied = false;
    store.update(|state| applied = apply_metric(&mut state.sensors, &mut state.sections, metric));
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SensorMeta;

    fn section(id: u32, name: &str, rect: Rect) -> FieldSection {
        FieldSection::new(id, name.to_string(), "Wheat".to_string(), rect)
    }

    fn moisture_sensor(id: u32, location: &str) -> Sensor {
        Sensor {
            id,
            name: format!("Soil Moisture {}", id),
            sensor_type: SensorType::Moisture,
            status: SensorStatus::Active,
            value: "45%".to_string(),
            location: location.to_string(),
            meta: SensorMeta::default(),
        }
    }

    fn metric(device: &str, value: f64) -> Metric {
        Metric {
            device_id: device.to_string(),
            key: "soil_moisture".to_string(),
            value,
            unit: Some("%".to_string()),
            at: "2024-05-01T06:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_next_id() {
        let empty: Vec<FieldSection> = Vec::new();
        assert_eq!(next_id(&empty), 1);
        let list = vec![section(4, "a", Rect::default()), section(2, "b", Rect::default())];
        assert_eq!(next_id(&list), 5);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut list = vec![section(1, "a", Rect::default()), section(2, "b", Rect::default())];
        replace_by_id(&mut list, section(2, "renamed", Rect::default())).unwrap();
        assert_eq!(list[1].name, "renamed");

        let err = replace_by_id(&mut list, section(9, "ghost", Rect::default())).unwrap_err();
        assert!(matches!(err, FarmError::NotFound(_)));

        let removed = remove_by_id(&mut list, 1).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(list.len(), 1);
        assert!(remove_by_id(&mut list, 1).is_err());
    }

    #[test]
    fn test_default_rect_fits_small_field() {
        let canvas = FieldCanvas { width_m: 60.0, height_m: 400.0, ..FieldCanvas::default() };
        assert_eq!(default_section_rect(&canvas), Rect::new(0.0, 0.0, 60.0, 100.0));
    }

    #[test]
    fn test_push_section_takes_next_free_id() {
        let canvas = FieldCanvas::default();
        let mut sections = vec![section(3, "a", Rect::default()), section(1, "b", Rect::default())];
        let id = push_section(&mut sections, &canvas, "Section 3".to_string(), String::new());
        assert_eq!(id, 4);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[2].id, 4);
        assert_eq!(sections[2].rect(), Rect::new(0.0, 0.0, 100.0, 100.0));

        let mut empty = Vec::new();
        assert_eq!(push_section(&mut empty, &canvas, "first".to_string(), String::new()), 1);
    }

    #[test]
    fn test_clamp_sections_after_shrink() {
        let canvas = FieldCanvas { width_m: 300.0, height_m: 200.0, ..FieldCanvas::default() };
        let mut sections = vec![
            section(1, "inside", Rect::new(20.0, 20.0, 40.0, 40.0)),
            section(2, "outside", Rect::new(500.0, 300.0, 80.0, 60.0)),
        ];
        clamp_sections(&mut sections, &canvas);
        assert_eq!(sections[0].rect(), Rect::new(20.0, 20.0, 40.0, 40.0));
        assert_eq!(sections[1].rect(), Rect::new(220.0, 140.0, 80.0, 60.0));
    }

    #[test]
    fn test_metric_updates_sensor_and_section() {
        let mut sensors = vec![moisture_sensor(1, "Section A")];
        let mut sections = vec![section(1, "Section A", Rect::default())];

        assert!(apply_metric(&mut sensors, &mut sections, &metric("sensor-1", 27.4)));
        assert_eq!(sensors[0].value, "27.4%");
        assert_eq!(sensors[0].status, SensorStatus::Warning);
        assert_eq!(sections[0].moisture, Some(27.4));

        apply_metric(&mut sensors, &mut sections, &metric("sensor-1", 51.0));
        assert_eq!(sensors[0].status, SensorStatus::Active);
    }

    #[test]
    fn test_metric_ignored_for_unknown_or_offline() {
        let mut sensors = vec![moisture_sensor(1, "Section A")];
        let mut sections = Vec::new();
        assert!(!apply_metric(&mut sensors, &mut sections, &metric("sensor-7", 40.0)));
        assert!(!apply_metric(&mut sensors, &mut sections, &metric("gateway", 40.0)));

        sensors[0].status = SensorStatus::Offline;
        assert!(!apply_metric(&mut sensors, &mut sections, &metric("sensor-1", 40.0)));
        assert_eq!(sensors[0].value, "45%");
    }
}
