//! Form Drafts
//!
//! String-backed editing state for the section, sensor and schedule forms.
//! Distances are shown in the canvas display unit and converted back to
//! meters on apply. Unparsable numbers fall back to the previous value.

use chrono::NaiveDate;
use leptos_dragresize::Rect;

use crate::error::{FarmError, FarmResult};
use crate::models::{
    FieldCanvas, FieldSection, GridCell, ScheduleItem, ScheduleStatus, SectionStatus, Sensor, SensorMeta,
    SensorStatus, SensorType,
};
use crate::schedule::parse_time_of_day;

/// Parse a number from a form field, keeping `fallback` when it does not parse
pub fn coerce_number(field: &str, input: &str, fallback: f64) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            log::warn!("[FORM] {} = {:?} is not a number, keeping {}", field, input, fallback);
            fallback
        }
    }
}

fn coerce_count(field: &str, input: &str, fallback: u32) -> u32 {
    let v = coerce_number(field, input, fallback as f64);
    if v >= 0.0 { v.round() as u32 } else { fallback }
}

/// Which placement inputs the user touched last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementSource {
    #[default]
    Measurements,
    Grid,
}

/// Edit-dialog state for a field section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDraft {
    pub name: String,
    pub crop: String,
    pub water_amount: String,
    pub status: SectionStatus,
    pub grid_row: String,
    pub grid_col: String,
    pub grid_row_span: String,
    pub grid_col_span: String,
    /// In the canvas display unit
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
    pub moisture: String,
    pub placement_source: PlacementSource,
}

impl SectionDraft {
    pub fn from_section(section: &FieldSection, canvas: &FieldCanvas) -> Self {
        let unit = canvas.unit;
        let grid = section.grid(canvas);
        Self {
            name: section.name.clone(),
            crop: section.crop.clone(),
            water_amount: section.water_amount.clone(),
            status: section.status,
            grid_row: grid.row.to_string(),
            grid_col: grid.col.to_string(),
            grid_row_span: grid.row_span.to_string(),
            grid_col_span: grid.col_span.to_string(),
            x: unit.format(section.x_m),
            y: unit.format(section.y_m),
            width: unit.format(section.width_m),
            height: unit.format(section.height_m),
            moisture: section.moisture.map(|m| format!("{}", m)).unwrap_or_default(),
            placement_source: PlacementSource::Measurements,
        }
    }

    fn grid_cell(&self, current: GridCell) -> GridCell {
        GridCell {
            row: coerce_count("grid row", &self.grid_row, current.row),
            col: coerce_count("grid column", &self.grid_col, current.col),
            row_span: coerce_count("row span", &self.grid_row_span, current.row_span),
            col_span: coerce_count("column span", &self.grid_col_span, current.col_span),
        }
    }

    fn measured_rect(&self, current: Rect, canvas: &FieldCanvas) -> Rect {
        let unit = canvas.unit;
        // An untouched field keeps its exact meters; display rounding would
        // otherwise shave sub-unit precision on every save.
        let read = |field: &str, input: &str, meters: f64| {
            if input.trim() == unit.format(meters) {
                meters
            } else {
                unit.to_meters(coerce_number(field, input, unit.to_display(meters)))
            }
        };
        let width = read("width", &self.width, current.width);
        let height = read("height", &self.height, current.height);
        Rect::new(
            read("x", &self.x, current.x),
            read("y", &self.y, current.y),
            if width > 0.0 { width } else { current.width },
            if height > 0.0 { height } else { current.height },
        )
    }

    /// Apply onto `section`, returning the edited copy
    pub fn apply(&self, section: &FieldSection, canvas: &FieldCanvas) -> FarmResult<FieldSection> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FarmError::InvalidInput("section name is required".to_string()));
        }
        let rect = match self.placement_source {
            PlacementSource::Grid => canvas.rect_from_grid(self.grid_cell(section.grid(canvas))),
            PlacementSource::Measurements => self.measured_rect(section.rect(), canvas),
        };
        let moisture = match self.moisture.trim() {
            "" => None,
            m => Some(coerce_number("moisture", m, section.moisture.unwrap_or(0.0)).clamp(0.0, 100.0)),
        };

        let mut edited = section.clone();
        edited.name = name.to_string();
        edited.crop = self.crop.trim().to_string();
        edited.water_amount = self.water_amount.trim().to_string();
        edited.status = self.status;
        edited.moisture = moisture;
        edited.set_rect(canvas.clamp_rect(rect));
        Ok(edited)
    }
}

/// Add/edit state for a sensor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorDraft {
    pub name: String,
    pub sensor_type: SensorType,
    pub status: SensorStatus,
    pub value: String,
    pub location: String,
    pub model: String,
    pub manufacturer: String,
    pub serial: String,
    pub unit: String,
    /// YYYY-MM-DD, may be empty
    pub install_date: String,
    pub polling_interval_s: String,
}

/// Polling interval for sensors that do not say otherwise
pub const DEFAULT_POLLING_INTERVAL_S: u32 = 60;

impl SensorDraft {
    /// Blank form, optionally pre-filled with a location
    pub fn blank(location: Option<String>) -> Self {
        Self {
            location: location.unwrap_or_default(),
            polling_interval_s: DEFAULT_POLLING_INTERVAL_S.to_string(),
            ..Default::default()
        }
    }

    pub fn from_sensor(sensor: &Sensor) -> Self {
        Self {
            name: sensor.name.clone(),
            sensor_type: sensor.sensor_type,
            status: sensor.status,
            value: sensor.value.clone(),
            location: sensor.location.clone(),
            model: sensor.meta.model.clone(),
            manufacturer: sensor.meta.manufacturer.clone(),
            serial: sensor.meta.serial.clone(),
            unit: sensor.meta.unit.clone(),
            install_date: sensor.meta.install_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            polling_interval_s: sensor.meta.polling_interval_s.to_string(),
        }
    }

    pub fn into_sensor(self, id: u32) -> FarmResult<Sensor> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(FarmError::InvalidInput("sensor name is required".to_string()));
        }
        let install_date = match self.install_date.trim() {
            "" => None,
            d => Some(
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|e| FarmError::InvalidInput(format!("install date '{}': {}", d, e)))?,
            ),
        };
        let unit = match self.unit.trim() {
            "" => self.sensor_type.default_unit().to_string(),
            u => u.to_string(),
        };
        let value = match self.value.trim() {
            "" => "-".to_string(),
            v => v.to_string(),
        };
        Ok(Sensor {
            id,
            name,
            sensor_type: self.sensor_type,
            status: self.status,
            value,
            location: self.location.trim().to_string(),
            meta: SensorMeta {
                model: self.model.trim().to_string(),
                manufacturer: self.manufacturer.trim().to_string(),
                serial: self.serial.trim().to_string(),
                unit,
                install_date,
                polling_interval_s: coerce_count("polling interval", &self.polling_interval_s, DEFAULT_POLLING_INTERVAL_S),
            },
        })
    }
}

/// Add/edit state for a schedule entry
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDraft {
    pub time: String,
    pub section_id: Option<u32>,
    pub duration_min: String,
    pub amount_l: String,
    pub status: ScheduleStatus,
}

impl ScheduleDraft {
    pub fn blank(section_id: Option<u32>) -> Self {
        Self {
            time: String::new(),
            section_id,
            duration_min: "30".to_string(),
            amount_l: "10".to_string(),
            status: ScheduleStatus::Scheduled,
        }
    }

    pub fn from_item(item: &ScheduleItem) -> Self {
        Self {
            time: item.time.clone(),
            section_id: Some(item.section_id),
            duration_min: item.duration_min.to_string(),
            amount_l: item.amount_l.to_string(),
            status: item.status,
        }
    }

    pub fn into_item(self, id: u32) -> FarmResult<ScheduleItem> {
        let time = self.time.trim().to_string();
        if parse_time_of_day(&time).is_none() {
            return Err(FarmError::InvalidInput(format!("'{}' is not a time of day", time)));
        }
        let section_id = self
            .section_id
            .ok_or_else(|| FarmError::InvalidInput("pick a section".to_string()))?;
        Ok(ScheduleItem {
            id,
            time,
            section_id,
            duration_min: coerce_count("duration", &self.duration_min, 30),
            amount_l: coerce_number("amount", &self.amount_l, 0.0).max(0.0),
            status: self.status,
        })
    }
}
