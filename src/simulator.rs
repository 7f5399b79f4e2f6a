//! Device Adapters
//!
//! A device adapter connects, emits metrics to subscribers and disconnects.
//! The only adapter is a simulated soil-moisture probe.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;

use crate::models::Metric;

/// Metric subscriber
pub type MetricListener = Rc<dyn Fn(&Metric)>;

pub trait DeviceAdapter {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn connect(&mut self);
    fn disconnect(&mut self);
    fn on_metric(&mut self, listener: MetricListener);
}

/// Lower bound of simulated moisture, percent
const MOISTURE_MIN: f64 = 20.0;
/// Width of the simulated range, percent
const MOISTURE_SPAN: f64 = 40.0;

/// Build one reading from a uniform sample in [0, 1)
pub fn moisture_reading(device_id: &str, sample: f64, at: String) -> Metric {
    let raw = MOISTURE_MIN + sample * MOISTURE_SPAN;
    Metric {
        device_id: device_id.to_string(),
        key: "soil_moisture".to_string(),
        value: (raw * 10.0).round() / 10.0,
        unit: Some("%".to_string()),
        at,
    }
}

/// Emits a random soil-moisture reading on a fixed interval
pub struct SoilMoistureSimulator {
    device_id: String,
    interval_ms: u32,
    timer: Option<Interval>,
    listeners: Rc<RefCell<Vec<MetricListener>>>,
}

impl SoilMoistureSimulator {
    pub fn new(device_id: &str, interval_ms: u32) -> Self {
        Self {
            device_id: device_id.to_string(),
            interval_ms,
            timer: None,
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.timer.is_some()
    }
}

impl DeviceAdapter for SoilMoistureSimulator {
    fn id(&self) -> &str {
        "sim-soil-moisture"
    }

    fn name(&self) -> &str {
        "Soil Moisture Simulator"
    }

    fn connect(&mut self) {
        if self.timer.is_some() {
            return;
        }
        let listeners = Rc::clone(&self.listeners);
        let device_id = self.device_id.clone();
        self.timer = Some(Interval::new(self.interval_ms, move || {
            let at = String::from(js_sys::Date::new_0().to_iso_string());
            let metric = moisture_reading(&device_id, js_sys::Math::random(), at);
            log::debug!("[SIM] {} = {}", metric.device_id, metric.value);
            // Snapshot so a listener may subscribe without a re-borrow
            let current: Vec<MetricListener> = listeners.borrow().clone();
            for listener in current {
                listener(&metric);
            }
        }));
        log::info!("[SIM] {} connected, every {} ms", self.name(), self.interval_ms);
    }

    fn disconnect(&mut self) {
        // Dropping the interval cancels it
        if self.timer.take().is_some() {
            log::info!("[SIM] {} disconnected", self.name());
        }
    }

    fn on_metric(&mut self, listener: MetricListener) {
        self.listeners.borrow_mut().push(listener);
    }
}
