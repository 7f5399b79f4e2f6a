//! Schedule Utilities
//!
//! Time-of-day parsing, ordering and the summary figures shown in the
//! stats cards. No conflict detection.

use crate::models::{FieldSection, ScheduleItem, ScheduleStatus, SectionStatus, Sensor, SensorStatus};

/// Minutes after midnight for "6:00 AM", "2:30 pm", "14:30" or "7 PM"
pub fn parse_time_of_day(s: &str) -> Option<u32> {
    let s = s.trim().to_ascii_uppercase();
    let (clock, meridiem) = if let Some(rest) = s.strip_suffix("AM") {
        (rest.trim(), Some(false))
    } else if let Some(rest) = s.strip_suffix("PM") {
        (rest.trim(), Some(true))
    } else {
        (s.as_str(), None)
    };

    let (h, m) = match clock.split_once(':') {
        Some((h, m)) => (h.trim().parse::<u32>().ok()?, m.trim().parse::<u32>().ok()?),
        None => (clock.parse::<u32>().ok()?, 0),
    };
    if m >= 60 {
        return None;
    }
    let hour = match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&h) {
                return None;
            }
            (h % 12) + if pm { 12 } else { 0 }
        }
        None if h < 24 => h,
        None => return None,
    };
    Some(hour * 60 + m)
}

/// Sort key: parsable times first in clock order, the rest keep input order
fn sort_key(item: &ScheduleItem) -> u32 {
    parse_time_of_day(&item.time).unwrap_or(u32::MAX)
}

/// Items in time-of-day order (stable for equal/unparsable times)
pub fn ordered(items: &[ScheduleItem]) -> Vec<ScheduleItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(sort_key);
    sorted
}

/// Figures for the stats cards
#[derive(Debug, Clone, PartialEq)]
pub struct IrrigationSummary {
    pub water_today_l: f64,
    pub active_sensors: usize,
    pub total_sensors: usize,
    pub sections_watered: usize,
    pub total_sections: usize,
    /// Earliest scheduled item and its section name
    pub next: Option<(String, String)>,
}

impl IrrigationSummary {
    pub fn pending_sections(&self) -> usize {
        self.total_sections - self.sections_watered
    }
}

pub fn summarize(sections: &[FieldSection], sensors: &[Sensor], schedule: &[ScheduleItem]) -> IrrigationSummary {
    let water_today_l = schedule
        .iter()
        .filter(|i| i.status == ScheduleStatus::Complete)
        .map(|i| i.amount_l)
        .sum();
    let next = ordered(schedule)
        .into_iter()
        .find(|i| i.status == ScheduleStatus::Scheduled)
        .map(|i| {
            let section = sections
                .iter()
                .find(|s| s.id == i.section_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| format!("Section #{}", i.section_id));
            (i.time, section)
        });
    IrrigationSummary {
        water_today_l,
        active_sensors: sensors.iter().filter(|s| s.status == SensorStatus::Active).count(),
        total_sensors: sensors.len(),
        sections_watered: sections.iter().filter(|s| s.status == SectionStatus::Watered).count(),
        total_sections: sections.len(),
        next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_dragresize::Rect;

    fn item(id: u32, time: &str, section_id: u32, amount_l: f64, status: ScheduleStatus) -> ScheduleItem {
        ScheduleItem { id, time: time.to_string(), section_id, duration_min: 30, amount_l, status }
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("6:00 AM"), Some(360));
        assert_eq!(parse_time_of_day("2:30 PM"), Some(870));
        assert_eq!(parse_time_of_day("12:15 am"), Some(15));
        assert_eq!(parse_time_of_day("12:00 PM"), Some(720));
        assert_eq!(parse_time_of_day("17:05"), Some(1025));
        assert_eq!(parse_time_of_day("7 PM"), Some(1140));
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert_eq!(parse_time_of_day("noon"), None);
        assert_eq!(parse_time_of_day("13:00 PM"), None);
        assert_eq!(parse_time_of_day("10:75"), None);
        assert_eq!(parse_time_of_day("25:00"), None);
    }

    #[test]
    fn test_ordered_by_clock() {
        let items = vec![
            item(1, "5:00 PM", 4, 10.0, ScheduleStatus::Scheduled),
            item(2, "whenever", 1, 1.0, ScheduleStatus::Scheduled),
            item(3, "6:00 AM", 1, 25.0, ScheduleStatus::Complete),
            item(4, "2:30 PM", 2, 20.0, ScheduleStatus::Scheduled),
        ];
        let ids: Vec<u32> = ordered(&items).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_summary() {
        let mut a = FieldSection::new(1, "Section A".to_string(), "Tomatoes".to_string(), Rect::new(0.0, 0.0, 20.0, 20.0));
        a.status = SectionStatus::Watered;
        let mut b = FieldSection::new(2, "Section B".to_string(), "Peppers".to_string(), Rect::new(40.0, 0.0, 20.0, 20.0));
        b.status = SectionStatus::NeedsWater;
        let schedule = vec![
            item(1, "6:00 AM", 1, 25.0, ScheduleStatus::Complete),
            item(2, "5:00 PM", 2, 10.0, ScheduleStatus::Scheduled),
            item(3, "2:30 PM", 2, 20.0, ScheduleStatus::Scheduled),
        ];
        let summary = summarize(&[a, b], &[], &schedule);
        assert_eq!(summary.water_today_l, 25.0);
        assert_eq!(summary.sections_watered, 1);
        assert_eq!(summary.pending_sections(), 1);
        assert_eq!(summary.next, Some(("2:30 PM".to_string(), "Section B".to_string())));
        assert_eq!(summary.total_sensors, 0);
    }
}
