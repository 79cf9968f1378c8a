//! Near-Earth asteroid close-approach analysis.
//!
//! ```text
//!  nasa.csv ─▶ data::loader ─▶ data::clean ─▶ analysis ─▶ pipeline::Report
//!                                   │
//!                                   └──────▶ app (egui chart viewer)
//! ```

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod ui;
