// src/gui/mod.rs

//! Desktop form and diagram preview built on `eframe`/`egui`.

pub mod app;

pub use app::CpmApp;
