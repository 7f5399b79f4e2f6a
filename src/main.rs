#![allow(warnings)]
//! FarmHub Irrigation Frontend Entry Point

mod actions;
mod app;
mod components;
mod config;
mod context;
mod error;
mod forms;
mod logger;
mod models;
mod schedule;
mod seed;
mod simulator;
mod store;
mod units;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    // Installed before config so load warnings reach the console
    logger::init(LevelFilter::Info);
    let config = AppConfig::load();
    log::set_max_level(config.level_filter());
    mount_to_body(move || view! { <App config=config /> });
}
