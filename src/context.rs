//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::actions::{ActionQueue, ActionTarget, UiAction};
use crate::config::AppConfig;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Loaded once at startup
    pub config: StoredValue<AppConfig>,
    /// Pending cross-view actions - read
    pub actions: ReadSignal<ActionQueue>,
    /// Pending cross-view actions - write
    set_actions: WriteSignal<ActionQueue>,
}

impl AppContext {
    pub fn new(config: AppConfig, actions: (ReadSignal<ActionQueue>, WriteSignal<ActionQueue>)) -> Self {
        Self {
            config: StoredValue::new(config),
            actions: actions.0,
            set_actions: actions.1,
        }
    }

    /// Queue an action for whichever view handles it
    pub fn dispatch(&self, action: UiAction) {
        log::debug!("[ACTION] queued {:?}", action);
        self.set_actions.update(|q| q.push(action));
    }

    /// Take (and thereby acknowledge) the next action for `target`.
    /// Call from an effect that tracks `actions`.
    pub fn take_for(&self, target: ActionTarget) -> Option<UiAction> {
        if !self.actions.with(|q| q.has_pending(target)) {
            return None;
        }
        let mut taken = None;
        self.set_actions.update(|q| taken = q.take_for(target));
        taken
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
