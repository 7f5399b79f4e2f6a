//! Console Logger
//!
//! Routes the `log` facade to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use wasm_bindgen::JsValue;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_line(record.level(), record.target(), &record.args().to_string()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    // Crate-local targets read better without the crate prefix
    let target = target.rsplit("::").next().unwrap_or(target);
    format!("{:<5} {}: {}", level, target, message)
}

/// Install the console logger. Safe to call more than once.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Log a message with a structured payload shown as a JS object
pub fn info_with<T: Serialize>(message: &str, meta: &T) {
    if log::max_level() < LevelFilter::Info {
        return;
    }
    match serde_wasm_bindgen::to_value(meta) {
        Ok(value) => web_sys::console::info_2(&JsValue::from_str(message), &value),
        Err(e) => log::warn!("{} (unserializable meta: {})", message, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_module_path() {
        let line = format_line(Level::Warn, "farmhub_irrigation_ui::components::field_map", "clamped");
        assert_eq!(line, "WARN  field_map: clamped");
    }

    #[test]
    fn test_format_line_plain_target() {
        assert_eq!(format_line(Level::Info, "app", "ready"), "INFO  app: ready");
    }
}
