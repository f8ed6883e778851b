//! Desktop inventory dashboard.
//!
//! Loads an inventory CSV, then filters, sorts and summarises it for display
//! in an egui window. The [`data`] modules hold the pipeline and have no UI
//! dependency; [`state`] turns user commands into a recomputed view.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod source;
pub mod state;
pub mod ui;
