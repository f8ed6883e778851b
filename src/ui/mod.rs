//! Rendering sink: egui panels that read [`crate::state::AppState`] and
//! report user intent as [`UiEvent`]s instead of mutating state.

pub mod panels;
pub mod table;

use crate::state::Command;

/// User intent gathered while drawing one frame.
#[derive(Debug, Clone)]
pub enum UiEvent {
    Command(Command),
    /// Pick a CSV file to replace the current data.
    OpenFile,
    /// Load the configured startup source again.
    Reload,
}
