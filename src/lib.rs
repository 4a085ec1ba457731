//! Calendar heatmap grid: aligns a day window to weeks, buckets event
//! counts per day and lays the grid out in pixels.

pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
