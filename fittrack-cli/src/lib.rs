// Library exports for the FitTrack CLI
// This allows testing of internal modules

pub mod api;
pub mod commands;
pub mod config;
pub mod forms;
pub mod models;
pub mod planning;
pub mod ui;
