//! Frontend Models
//!
//! Field map, sensor and schedule entities. All distances are meters.

use chrono::NaiveDate;
use leptos_dragresize::{clamp_into, FieldBounds, Rect};
use serde::{Deserialize, Serialize};

use crate::error::{FarmError, FarmResult};
use crate::units::DisplayUnit;

/// Anything stored in a list and addressed by id
pub trait Keyed {
    fn id(&self) -> u32;
}

// ========================
// Field Map
// ========================

/// Legacy grid columns across the field
pub const LEGACY_GRID_COLS: u32 = 12;
/// Legacy grid rows down the field
pub const LEGACY_GRID_ROWS: u32 = 8;

/// Watering state of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    #[default]
    Watered,
    NeedsWater,
    Scheduled,
}

impl SectionStatus {
    pub const ALL: [SectionStatus; 3] = [SectionStatus::Watered, SectionStatus::NeedsWater, SectionStatus::Scheduled];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionStatus::Watered => "watered",
            SectionStatus::NeedsWater => "needs-water",
            SectionStatus::Scheduled => "scheduled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "needs-water" => SectionStatus::NeedsWater,
            "scheduled" => SectionStatus::Scheduled,
            _ => SectionStatus::Watered,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionStatus::Watered => "Watered",
            SectionStatus::NeedsWater => "Needs Water",
            SectionStatus::Scheduled => "Scheduled",
        }
    }
}

/// Legacy grid placement, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub row_span: u32,
    pub col_span: u32,
}

/// The field the sections live on, plus how it is shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCanvas {
    pub width_m: f64,
    pub height_m: f64,
    /// View-only; stored values stay in meters
    pub unit: DisplayUnit,
    pub grid_step_m: f64,
    pub show_grid: bool,
    pub show_rulers: bool,
}

impl Default for FieldCanvas {
    fn default() -> Self {
        Self {
            width_m: 600.0,
            height_m: 400.0,
            unit: DisplayUnit::Meters,
            grid_step_m: 20.0,
            show_grid: true,
            show_rulers: true,
        }
    }
}

impl FieldCanvas {
    pub fn bounds(&self) -> FieldBounds {
        FieldBounds::new(self.width_m, self.height_m)
    }

    fn cell_size(&self) -> (f64, f64) {
        (self.width_m / LEGACY_GRID_COLS as f64, self.height_m / LEGACY_GRID_ROWS as f64)
    }

    /// Meter rectangle covered by a legacy grid placement
    pub fn rect_from_grid(&self, cell: GridCell) -> Rect {
        let (cw, ch) = self.cell_size();
        let col = cell.col.clamp(1, LEGACY_GRID_COLS);
        let row = cell.row.clamp(1, LEGACY_GRID_ROWS);
        let col_span = cell.col_span.clamp(1, LEGACY_GRID_COLS - col + 1);
        let row_span = cell.row_span.clamp(1, LEGACY_GRID_ROWS - row + 1);
        Rect::new(
            (col - 1) as f64 * cw,
            (row - 1) as f64 * ch,
            col_span as f64 * cw,
            row_span as f64 * ch,
        )
    }

    /// Nearest legacy grid placement for a meter rectangle
    pub fn grid_from_rect(&self, rect: Rect) -> GridCell {
        fn axis(start: f64, len: f64, cell: f64, count: u32) -> (u32, u32) {
            if !(cell > 0.0) {
                return (1, 1);
            }
            let index = ((start / cell + 1e-9).floor().max(0.0) as u32).min(count - 1) + 1;
            let span = ((len / cell).round().max(1.0) as u32).min(count - index + 1);
            (index, span)
        }
        let (cw, ch) = self.cell_size();
        let (col, col_span) = axis(rect.x, rect.width, cw, LEGACY_GRID_COLS);
        let (row, row_span) = axis(rect.y, rect.height, ch, LEGACY_GRID_ROWS);
        GridCell { row, col, row_span, col_span }
    }

    pub fn clamp_rect(&self, rect: Rect) -> Rect {
        clamp_into(rect, self.bounds())
    }

    /// CSS aspect-ratio for the canvas element
    pub fn aspect_ratio(&self) -> String {
        format!("{} / {}", self.width_m.max(1.0), self.height_m.max(1.0))
    }
}

/// A rectangular crop area on the field map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSection {
    pub id: u32,
    pub name: String,
    pub crop: String,
    /// Display string, e.g. "25 L/day"
    pub water_amount: String,
    pub status: SectionStatus,
    pub x_m: f64,
    pub y_m: f64,
    pub width_m: f64,
    pub height_m: f64,
    pub moisture: Option<f64>,
}

impl Keyed for FieldSection {
    fn id(&self) -> u32 {
        self.id
    }
}

impl FieldSection {
    pub fn new(id: u32, name: String, crop: String, rect: Rect) -> Self {
        Self {
            id,
            name,
            crop,
            water_amount: String::new(),
            status: SectionStatus::default(),
            x_m: rect.x,
            y_m: rect.y,
            width_m: rect.width,
            height_m: rect.height,
            moisture: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x_m, self.y_m, self.width_m, self.height_m)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x_m = rect.x;
        self.y_m = rect.y;
        self.width_m = rect.width;
        self.height_m = rect.height;
    }

    /// Legacy grid view, derived on demand
    pub fn grid(&self, canvas: &FieldCanvas) -> GridCell {
        canvas.grid_from_rect(self.rect())
    }

    /// Build from an import record. Real-measurement fields win over the grid
    /// fields, each one overriding its grid-derived counterpart.
    pub fn from_record(id: u32, record: SectionRecord, canvas: &FieldCanvas) -> FarmResult<Self> {
        let from_grid = match (record.grid_row, record.grid_col) {
            (Some(row), Some(col)) => Some(canvas.rect_from_grid(GridCell {
                row,
                col,
                row_span: record.grid_row_span.unwrap_or(1),
                col_span: record.grid_col_span.unwrap_or(1),
            })),
            _ => None,
        };
        let rect = match (from_grid, record.x, record.y, record.width, record.height) {
            (_, Some(x), Some(y), Some(width), Some(height)) => Rect::new(x, y, width, height),
            (Some(g), x, y, width, height) => Rect::new(
                x.unwrap_or(g.x),
                y.unwrap_or(g.y),
                width.unwrap_or(g.width),
                height.unwrap_or(g.height),
            ),
            (None, ..) => {
                return Err(FarmError::InvalidInput(format!("section '{}' has no placement", record.name)));
            }
        };
        Ok(Self {
            id: record.id.unwrap_or(id),
            name: record.name,
            crop: record.crop_type,
            water_amount: record.water_amount,
            status: record.status,
            moisture: record.moisture,
            ..FieldSection::new(0, String::new(), String::new(), canvas.clamp_rect(rect))
        })
    }
}

/// Section as it arrives from seed data or config: either placement system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionRecord {
    pub id: Option<u32>,
    pub name: String,
    pub crop_type: String,
    pub water_amount: String,
    pub status: SectionStatus,
    pub grid_row: Option<u32>,
    pub grid_col: Option<u32>,
    pub grid_row_span: Option<u32>,
    pub grid_col_span: Option<u32>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub moisture: Option<f64>,
}

// ========================
// Sensors
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    #[default]
    Moisture,
    Flow,
    Pressure,
    Temperature,
}

impl SensorType {
    pub const ALL: [SensorType; 4] = [SensorType::Moisture, SensorType::Flow, SensorType::Pressure, SensorType::Temperature];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Moisture => "moisture",
            SensorType::Flow => "flow",
            SensorType::Pressure => "pressure",
            SensorType::Temperature => "temperature",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "flow" => SensorType::Flow,
            "pressure" => SensorType::Pressure,
            "temperature" => SensorType::Temperature,
            _ => SensorType::Moisture,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensorType::Moisture => "Soil Moisture",
            SensorType::Flow => "Water Flow",
            SensorType::Pressure => "Pressure",
            SensorType::Temperature => "Temperature",
        }
    }

    /// Unit a new sensor of this type reports in
    pub fn default_unit(&self) -> &'static str {
        match self {
            SensorType::Moisture => "%",
            SensorType::Flow => "L/min",
            SensorType::Pressure => "bar",
            SensorType::Temperature => "°C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    #[default]
    Active,
    Warning,
    Offline,
}

impl SensorStatus {
    pub const ALL: [SensorStatus; 3] = [SensorStatus::Active, SensorStatus::Warning, SensorStatus::Offline];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Active => "active",
            SensorStatus::Warning => "warning",
            SensorStatus::Offline => "offline",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "warning" => SensorStatus::Warning,
            "offline" => SensorStatus::Offline,
            _ => SensorStatus::Active,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensorStatus::Active => "Active",
            SensorStatus::Warning => "Needs Attention",
            SensorStatus::Offline => "Offline",
        }
    }
}

/// Descriptive sensor metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorMeta {
    pub model: String,
    pub manufacturer: String,
    pub serial: String,
    pub unit: String,
    pub install_date: Option<NaiveDate>,
    pub polling_interval_s: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: u32,
    pub name: String,
    pub sensor_type: SensorType,
    pub status: SensorStatus,
    /// Display string, e.g. "45%"
    pub value: String,
    pub location: String,
    pub meta: SensorMeta,
}

impl Keyed for Sensor {
    fn id(&self) -> u32 {
        self.id
    }
}

/// A reading emitted by a device adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub device_id: String,
    pub key: String,
    pub value: f64,
    pub unit: Option<String>,
    /// ISO-8601 timestamp
    pub at: String,
}

// ========================
// Schedule
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Complete,
}

impl ScheduleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "Scheduled",
            ScheduleStatus::Complete => "Complete",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ScheduleStatus::Scheduled => ScheduleStatus::Complete,
            ScheduleStatus::Complete => ScheduleStatus::Scheduled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: u32,
    /// Time of day as typed, e.g. "2:30 PM"
    pub time: String,
    pub section_id: u32,
    pub duration_min: u32,
    pub amount_l: f64,
    pub status: ScheduleStatus,
}

impl Keyed for ScheduleItem {
    fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> SectionRecord {
        SectionRecord { name: name.to_string(), crop_type: "Wheat".to_string(), ..Default::default() }
    }

    #[test]
    fn test_grid_cell_maps_to_meters() {
        let canvas = FieldCanvas::default();
        // 600 / 12 = 50 m per column, 400 / 8 = 50 m per row
        let r = canvas.rect_from_grid(GridCell { row: 2, col: 3, row_span: 2, col_span: 4 });
        assert_eq!(r, Rect::new(100.0, 50.0, 200.0, 100.0));
    }

    #[test]
    fn test_grid_span_clamped_to_field() {
        let canvas = FieldCanvas::default();
        let r = canvas.rect_from_grid(GridCell { row: 8, col: 12, row_span: 5, col_span: 5 });
        assert_eq!(r, Rect::new(550.0, 350.0, 50.0, 50.0));
    }

    #[test]
    fn test_grid_view_derived_from_meters() {
        let canvas = FieldCanvas::default();
        let cell = GridCell { row: 3, col: 5, row_span: 2, col_span: 3 };
        assert_eq!(canvas.grid_from_rect(canvas.rect_from_grid(cell)), cell);

        let loose = canvas.grid_from_rect(Rect::new(120.0, 10.0, 20.0, 130.0));
        assert_eq!(loose, GridCell { row: 1, col: 3, row_span: 3, col_span: 1 });
    }

    #[test]
    fn test_record_real_fields_win() {
        let canvas = FieldCanvas::default();
        let rec = SectionRecord {
            grid_row: Some(1),
            grid_col: Some(1),
            x: Some(300.0),
            y: Some(200.0),
            width: Some(40.0),
            height: Some(60.0),
            ..record("Section A")
        };
        let s = FieldSection::from_record(1, rec, &canvas).unwrap();
        assert_eq!(s.rect(), Rect::new(300.0, 200.0, 40.0, 60.0));
    }

    #[test]
    fn test_record_partial_real_overrides_grid() {
        let canvas = FieldCanvas::default();
        let rec = SectionRecord {
            grid_row: Some(2),
            grid_col: Some(2),
            width: Some(120.0),
            ..record("Section B")
        };
        let s = FieldSection::from_record(2, rec, &canvas).unwrap();
        assert_eq!(s.rect(), Rect::new(50.0, 50.0, 120.0, 50.0));
    }

    #[test]
    fn test_record_without_placement_rejected() {
        let canvas = FieldCanvas::default();
        let err = FieldSection::from_record(3, record("Nowhere"), &canvas).unwrap_err();
        assert!(matches!(err, FarmError::InvalidInput(_)));
    }

    #[test]
    fn test_record_clamped_into_field() {
        let canvas = FieldCanvas::default();
        let rec = SectionRecord { x: Some(590.0), y: Some(0.0), width: Some(40.0), height: Some(40.0), ..record("Edge") };
        let s = FieldSection::from_record(4, rec, &canvas).unwrap();
        assert_eq!(s.rect(), Rect::new(560.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let json = r#"{"name":"Section C","cropType":"Olives","status":"needs-water","gridRow":1,"gridCol":2}"#;
        let rec: SectionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.crop_type, "Olives");
        assert_eq!(rec.status, SectionStatus::NeedsWater);
        assert_eq!(rec.grid_col, Some(2));
    }

    #[test]
    fn test_schedule_status_toggle() {
        assert_eq!(ScheduleStatus::Scheduled.toggled(), ScheduleStatus::Complete);
        assert_eq!(ScheduleStatus::Complete.toggled(), ScheduleStatus::Scheduled);
    }
}
