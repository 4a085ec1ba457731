//! Calendar pipeline: window → buckets → geometry

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::services::bucketizer::GridBucketizer;
use crate::services::layout::{LayoutEngine, LayoutTuning};
use crate::services::window::WindowResolver;
use crate::types::{Bucket, EventCounts, Geometry, Shade, Window};

/// Per-call configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Reference instant; `None` means now
    pub until: Option<DateTime<Local>>,
    pub canvas_width: u32,
    pub weeks_shown: i64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            until: None,
            canvas_width: 800,
            weeks_shown: 53,
        }
    }
}

impl GridConfig {
    pub fn reference(&self) -> DateTime<Local> {
        self.until.unwrap_or_else(Local::now)
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub window: Window,
    pub buckets: Vec<Bucket>,
    pub geometry: Geometry,
    pub max_count: u64,
}

/// Runs the full pipeline with a fixed set of tuning constants
#[derive(Debug, Clone, Copy, Default)]
pub struct GridCalendar {
    engine: LayoutEngine,
}

impl GridCalendar {
    pub fn new(tuning: LayoutTuning) -> Self {
        Self {
            engine: LayoutEngine::new(tuning),
        }
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn compute(
        &self,
        events: &EventCounts,
        config: &GridConfig,
        hovered: Option<usize>,
    ) -> CalendarView {
        let window = WindowResolver::resolve(config.reference(), config.weeks_shown);
        let buckets = GridBucketizer::bucketize(events, &window);
        let max_count = LayoutEngine::max_count(&buckets);
        let geometry = self
            .engine
            .layout(&buckets, config.canvas_width, config.weeks_shown, hovered);

        log::debug!(
            "computed {} buckets over {} weeks ending {} (max {})",
            buckets.len(),
            window.weeks(),
            window.reference_date,
            max_count
        );

        CalendarView {
            window,
            buckets,
            geometry,
            max_count,
        }
    }

    /// Re-run layout for a new hover target, keeping the buckets
    pub fn relayout(&self, view: &mut CalendarView, config: &GridConfig, hovered: Option<usize>) {
        view.geometry =
            self.engine
                .layout(&view.buckets, config.canvas_width, config.weeks_shown, hovered);
    }

    /// Fill for the bucket at `index`
    pub fn shade(&self, view: &CalendarView, index: usize) -> Option<Shade> {
        view.buckets
            .get(index)
            .map(|b| self.engine.shade(b.count, view.max_count))
    }
}
