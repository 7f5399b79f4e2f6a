//! Units and Grid Presentation
//!
//! Stored values are always meters. Everything here converts for display
//! and back, nothing else.

use serde::{Deserialize, Serialize};

/// Unit used to show distances in forms and rulers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Meters,
    Kilometers,
}

impl DisplayUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayUnit::Meters => "meters",
            DisplayUnit::Kilometers => "kilometers",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "kilometers" | "km" => DisplayUnit::Kilometers,
            _ => DisplayUnit::Meters,
        }
    }

    /// Short suffix for labels
    pub fn symbol(&self) -> &'static str {
        match self {
            DisplayUnit::Meters => "m",
            DisplayUnit::Kilometers => "km",
        }
    }

    fn meters_per_unit(&self) -> f64 {
        match self {
            DisplayUnit::Meters => 1.0,
            DisplayUnit::Kilometers => 1000.0,
        }
    }

    /// Decimal places worth showing in this unit
    fn precision(&self) -> usize {
        match self {
            DisplayUnit::Meters => 1,
            DisplayUnit::Kilometers => 3,
        }
    }

    pub fn to_display(&self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Number only, for form inputs
    pub fn format(&self, meters: f64) -> String {
        trim_number(self.to_display(meters), self.precision())
    }

    /// Number with unit suffix, for labels
    pub fn format_with_symbol(&self, meters: f64) -> String {
        format!("{} {}", self.format(meters), self.symbol())
    }

    /// Input `step` attribute matching the displayed precision
    pub fn input_step(&self) -> &'static str {
        match self {
            DisplayUnit::Meters => "0.1",
            DisplayUnit::Kilometers => "0.001",
        }
    }
}

/// Format with at most `decimals` places, dropping trailing zeros
pub fn trim_number(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" { "0".to_string() } else { s.to_string() }
    } else {
        s
    }
}

/// Grid steps offered by the canvas settings, in meters
pub const GRID_STEPS_M: [f64; 6] = [1.0, 5.0, 10.0, 20.0, 50.0, 100.0];

pub fn is_grid_step(step: f64) -> bool {
    GRID_STEPS_M.iter().any(|s| (s - step).abs() < f64::EPSILON)
}

pub fn grid_step_label(step: f64, unit: DisplayUnit) -> String {
    unit.format_with_symbol(step)
}

/// Most labels a ruler shows along one axis
pub const MAX_RULER_LABELS: usize = 10;

/// A labelled ruler mark
#[derive(Debug, Clone, PartialEq)]
pub struct RulerTick {
    /// Distance from the field origin in meters
    pub offset_m: f64,
    /// Same distance as a fraction of the axis length (for CSS percent)
    pub fraction: f64,
    pub label: String,
}

/// Labelled ticks on every k-th grid line, k chosen to keep the count at or
/// below `MAX_RULER_LABELS`.
pub fn ruler_ticks(length_m: f64, step_m: f64, unit: DisplayUnit) -> Vec<RulerTick> {
    if !(length_m > 0.0) || !(step_m > 0.0) {
        return Vec::new();
    }
    let lines = (length_m / step_m + 1e-9).floor() as usize;
    let every = lines.div_ceil(MAX_RULER_LABELS - 1).max(1);
    (0..=lines)
        .step_by(every)
        .map(|i| {
            let offset_m = i as f64 * step_m;
            RulerTick {
                offset_m,
                fraction: offset_m / length_m,
                label: unit.format(offset_m),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_round_trip() {
        for m in [0.0, 0.001, 1.0, 19.9, 250.0, 600.0, 12_345.678] {
            for unit in [DisplayUnit::Meters, DisplayUnit::Kilometers] {
                let back = unit.to_meters(unit.to_display(m));
                assert!((back - m).abs() < 1e-9, "{} via {:?} gave {}", m, unit, back);
            }
        }
    }

    #[test]
    fn test_format_per_unit() {
        assert_eq!(DisplayUnit::Meters.format(600.0), "600");
        assert_eq!(DisplayUnit::Meters.format(12.26), "12.3");
        assert_eq!(DisplayUnit::Kilometers.format(600.0), "0.6");
        assert_eq!(DisplayUnit::Kilometers.format_with_symbol(20.0), "0.02 km");
        assert_eq!(DisplayUnit::Meters.format_with_symbol(20.0), "20 m");
    }

    #[test]
    fn test_trim_number() {
        assert_eq!(trim_number(3.0, 2), "3");
        assert_eq!(trim_number(3.10, 2), "3.1");
        assert_eq!(trim_number(-0.0001, 2), "0");
        assert_eq!(trim_number(42.0, 0), "42");
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!(DisplayUnit::from_str("km"), DisplayUnit::Kilometers);
        assert_eq!(DisplayUnit::from_str("kilometers"), DisplayUnit::Kilometers);
        assert_eq!(DisplayUnit::from_str("furlongs"), DisplayUnit::Meters);
    }

    #[test]
    fn test_grid_step_choices() {
        assert!(is_grid_step(20.0));
        assert!(!is_grid_step(7.0));
        assert_eq!(grid_step_label(50.0, DisplayUnit::Kilometers), "0.05 km");
    }

    #[test]
    fn test_ruler_ticks_capped() {
        let ticks = ruler_ticks(600.0, 20.0, DisplayUnit::Meters);
        assert!(ticks.len() <= MAX_RULER_LABELS);
        assert_eq!(ticks[0].offset_m, 0.0);
        assert_eq!(ticks[1].offset_m, 80.0);
        assert!(ticks.iter().all(|t| t.fraction <= 1.0));
    }

    #[test]
    fn test_ruler_ticks_every_line_when_few() {
        let ticks = ruler_ticks(100.0, 20.0, DisplayUnit::Kilometers);
        let labels: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "0.02", "0.04", "0.06", "0.08", "0.1"]);
    }

    #[test]
    fn test_ruler_ticks_degenerate() {
        assert!(ruler_ticks(0.0, 20.0, DisplayUnit::Meters).is_empty());
        assert!(ruler_ticks(100.0, 0.0, DisplayUnit::Meters).is_empty());
    }
}
