//! Demo Data
//!
//! What the page shows on first load. Sections come in as import records so
//! grid-only and measured placements go through the same path.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{
    FieldCanvas, FieldSection, ScheduleItem, ScheduleStatus, SectionRecord, SectionStatus, Sensor, SensorMeta,
    SensorStatus, SensorType,
};

pub fn section_records() -> Vec<SectionRecord> {
    vec![
        SectionRecord {
            name: "Section A".to_string(),
            crop_type: "Tomatoes".to_string(),
            water_amount: "25 L/day".to_string(),
            status: SectionStatus::Watered,
            x: Some(20.0),
            y: Some(20.0),
            width: Some(180.0),
            height: Some(140.0),
            moisture: Some(45.0),
            ..Default::default()
        },
        SectionRecord {
            name: "Section B".to_string(),
            crop_type: "Peppers".to_string(),
            water_amount: "20 L/day".to_string(),
            status: SectionStatus::NeedsWater,
            x: Some(240.0),
            y: Some(20.0),
            width: Some(160.0),
            height: Some(140.0),
            moisture: Some(28.0),
            ..Default::default()
        },
        // Grid-only records, placed through the legacy 12 x 8 grid
        SectionRecord {
            name: "Section C".to_string(),
            crop_type: "Olives".to_string(),
            water_amount: "15 L/day".to_string(),
            status: SectionStatus::Watered,
            grid_row: Some(5),
            grid_col: Some(1),
            grid_row_span: Some(3),
            grid_col_span: Some(4),
            ..Default::default()
        },
        SectionRecord {
            name: "Section D".to_string(),
            crop_type: "Wheat".to_string(),
            water_amount: "10 L/day".to_string(),
            status: SectionStatus::Scheduled,
            grid_row: Some(5),
            grid_col: Some(6),
            grid_row_span: Some(3),
            grid_col_span: Some(6),
            ..Default::default()
        },
    ]
}

/// Turn records into sections, skipping (and logging) unplaceable ones.
///
/// An explicit id is kept unless an earlier record already claimed it.
/// Records without an id, and duplicates, get fresh ids above every claimed one.
pub fn sections_from_records(records: Vec<SectionRecord>, canvas: &FieldCanvas) -> Vec<FieldSection> {
    let placed: Vec<(Option<u32>, FieldSection)> = records
        .into_iter()
        .filter_map(|record| {
            let wanted = record.id;
            match FieldSection::from_record(0, record, canvas) {
                Ok(section) => Some((wanted, section)),
                Err(e) => {
                    log::warn!("[SEED] skipping section: {}", e);
                    None
                }
            }
        })
        .collect();

    let mut claimed = HashSet::new();
    let kept: Vec<bool> = placed.iter().map(|(wanted, _)| wanted.is_some_and(|id| claimed.insert(id))).collect();
    let mut last = claimed.iter().copied().max().unwrap_or(0);

    placed
        .into_iter()
        .zip(kept)
        .map(|((wanted, mut section), kept)| {
            section.id = match wanted {
                Some(id) if kept => id,
                _ => {
                    last += 1;
                    if let Some(id) = wanted {
                        log::warn!("[SEED] section '{}' reuses id {}, renumbered to {}", section.name, id, last);
                    }
                    last
                }
            };
            section
        })
        .collect()
}

fn meta(model: &str, manufacturer: &str, serial: &str, unit: &str, installed: (i32, u32, u32), polling_s: u32) -> SensorMeta {
    SensorMeta {
        model: model.to_string(),
        manufacturer: manufacturer.to_string(),
        serial: serial.to_string(),
        unit: unit.to_string(),
        install_date: NaiveDate::from_ymd_opt(installed.0, installed.1, installed.2),
        polling_interval_s: polling_s,
    }
}

pub fn sensors() -> Vec<Sensor> {
    vec![
        Sensor {
            id: 1,
            name: "Soil Moisture A1".to_string(),
            sensor_type: SensorType::Moisture,
            status: SensorStatus::Active,
            value: "45%".to_string(),
            location: "Section A".to_string(),
            meta: meta("SM-200", "AgriSense", "AS-SM-0001", "%", (2024, 3, 12), 60),
        },
        Sensor {
            id: 2,
            name: "Soil Moisture B2".to_string(),
            sensor_type: SensorType::Moisture,
            status: SensorStatus::Warning,
            value: "28%".to_string(),
            location: "Section B".to_string(),
            meta: meta("SM-200", "AgriSense", "AS-SM-0002", "%", (2024, 3, 12), 60),
        },
        Sensor {
            id: 3,
            name: "Water Flow Main".to_string(),
            sensor_type: SensorType::Flow,
            status: SensorStatus::Active,
            value: "120 L/min".to_string(),
            location: "Main Line".to_string(),
            meta: meta("FL-50", "HydroFlow", "HF-5521", "L/min", (2023, 9, 2), 30),
        },
        Sensor {
            id: 4,
            name: "Pressure Monitor".to_string(),
            sensor_type: SensorType::Pressure,
            status: SensorStatus::Active,
            value: "2.5 Bar".to_string(),
            location: "Pump".to_string(),
            meta: meta("PM-10", "HydroFlow", "HF-1010", "bar", (2023, 9, 2), 30),
        },
    ]
}

pub fn schedule() -> Vec<ScheduleItem> {
    vec![
        ScheduleItem { id: 1, time: "6:00 AM".to_string(), section_id: 1, duration_min: 45, amount_l: 25.0, status: ScheduleStatus::Complete },
        ScheduleItem { id: 2, time: "2:30 PM".to_string(), section_id: 2, duration_min: 40, amount_l: 20.0, status: ScheduleStatus::Scheduled },
        ScheduleItem { id: 3, time: "5:00 PM".to_string(), section_id: 4, duration_min: 30, amount_l: 10.0, status: ScheduleStatus::Scheduled },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_dragresize::Rect;

    #[test]
    fn test_seed_sections_place_inside_field() {
        let canvas = FieldCanvas::default();
        let sections = sections_from_records(section_records(), &canvas);
        assert_eq!(sections.len(), 4);
        assert!(sections.iter().all(|s| s.rect().fits_in(canvas.bounds())));
        // Section C came from grid row 5, col 1, 3 x 4 cells of 50 m
        assert_eq!(sections[2].rect(), Rect::new(0.0, 200.0, 200.0, 150.0));
    }

    #[test]
    fn test_unplaceable_record_skipped() {
        let canvas = FieldCanvas::default();
        let mut records = section_records();
        records.push(SectionRecord { name: "Floating".to_string(), ..Default::default() });
        assert_eq!(sections_from_records(records, &canvas).len(), 4);
    }

    #[test]
    fn test_explicit_ids_kept_and_missing_ones_fresh() {
        let canvas = FieldCanvas::default();
        let records = vec![
            SectionRecord { name: "North".to_string(), x: Some(0.0), y: Some(0.0), width: Some(100.0), height: Some(50.0), ..Default::default() },
            SectionRecord { id: Some(1), name: "South".to_string(), x: Some(0.0), y: Some(200.0), width: Some(100.0), height: Some(50.0), ..Default::default() },
        ];
        let sections = sections_from_records(records, &canvas);
        let ids: Vec<u32> = sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(sections[1].name, "South");
    }

    #[test]
    fn test_duplicate_ids_renumbered() {
        let canvas = FieldCanvas::default();
        let record = |id: Option<u32>, name: &str| SectionRecord {
            id,
            name: name.to_string(),
            grid_row: Some(1),
            grid_col: Some(1),
            ..Default::default()
        };
        let records = vec![record(Some(3), "a"), record(Some(3), "b"), record(None, "c"), record(Some(5), "d")];
        let ids: Vec<u32> = sections_from_records(records, &canvas).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 6, 7, 5]);
    }

    #[test]
    fn test_seed_schedule_points_at_sections() {
        let canvas = FieldCanvas::default();
        let sections = sections_from_records(section_records(), &canvas);
        assert!(schedule().iter().all(|i| sections.iter().any(|s| s.id == i.section_id)));
    }
}
