//! oa_pubstats
//!
//! A small Rust library for charting open-access publication statistics as stacked
//! bars. Pairs with the `oapub` CLI and the `oapub-gui` desktop app.
//!
//! ### Features
//! - Yearly records with an ordered per-category (Gold, Green, Diamond, …) breakdown
//! - Inclusive year-range filtering with per-render memoization
//! - Open/closed series projection, tooltip and bar-label formatting
//! - Category colors with a shared "Mixed" color for combined access routes
//! - SVG/PNG rendering and an ECharts-style JSON option for web renderers
//!
//! ### Example
//! ```no_run
//! use oa_pubstats::{DataStore, YearRange, config::ChartSettings, filter, viz};
//!
//! let store = DataStore::sample();
//! let range = YearRange::new(2022, 2025)?;
//! let selected = filter::filter_by_range(store.records(), range);
//! let out = viz::export_file_name(range, viz::ImageFormat::Png);
//! viz::plot_publications(&selected, &out, &ChartSettings::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod color;
pub mod config;
pub mod data;
pub mod filter;
pub mod models;
pub mod option;
pub mod series;
pub mod stats;
pub mod storage;
pub mod tooltip;
pub mod viz;

pub use data::{DataProvider, DataStore};
pub use models::{CategoryBreakdown, CategoryLabel, PublicationRecord, YearRange};
