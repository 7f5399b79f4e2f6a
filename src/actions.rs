//! UI Action Queue
//!
//! Lets one view ask another to do something ("open the add-sensor form")
//! without a shared broadcast flag. Each action is taken exactly once by the
//! view that handles it.

use std::collections::VecDeque;

/// Requests routed between views
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Open the add-sensor form, optionally pre-filling the location
    OpenAddSensor { location: Option<String> },
    /// Open the edit dialog for a section
    EditSection(u32),
    /// Open the add-schedule form for a section
    ScheduleSection(u32),
}

/// Which view consumes an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTarget {
    Sensors,
    FieldMap,
    Schedule,
}

impl UiAction {
    pub fn target(&self) -> ActionTarget {
        match self {
            UiAction::OpenAddSensor { .. } => ActionTarget::Sensors,
            UiAction::EditSection(_) => ActionTarget::FieldMap,
            UiAction::ScheduleSection(_) => ActionTarget::Schedule,
        }
    }
}

/// FIFO of pending actions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionQueue {
    pending: VecDeque<UiAction>,
}

impl ActionQueue {
    pub fn push(&mut self, action: UiAction) {
        self.pending.push_back(action);
    }

    /// Remove and return the oldest action for `target`; this is the
    /// acknowledgment.
    pub fn take_for(&mut self, target: ActionTarget) -> Option<UiAction> {
        let index = self.pending.iter().position(|a| a.target() == target)?;
        self.pending.remove(index)
    }

    pub fn has_pending(&self, target: ActionTarget) -> bool {
        self.pending.iter().any(|a| a.target() == target)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
