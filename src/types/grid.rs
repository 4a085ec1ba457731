//! Calendar grid types: window, day buckets and layout geometry

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Milliseconds in a calendar day
pub const DAY_MS: i64 = 86_400_000;

/// Rows in the grid (Sunday-first weekdays)
pub const DAYS_PER_WEEK: usize = 7;

/// Upper bound on week columns; larger requests are clamped (about 190 years)
pub const MAX_WEEKS: i64 = 10_000;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Raw event counts keyed by epoch milliseconds.
/// Keys need not be day-aligned; several keys may land on the same day.
pub type EventCounts = HashMap<i64, u64>;

/// Contiguous span of days shown, ending at the reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    /// Local midnight of the day after the reference date (epoch ms)
    pub end_exclusive: i64,
    /// Number of day buckets, leading partial week included
    pub bucket_count: usize,
    /// Days in the first (possibly partial) week, 1..=7
    pub leading_days: usize,
    /// Calendar date the window is anchored to
    pub reference_date: NaiveDate,
}

impl Window {
    /// Start of the first bucket (epoch ms)
    pub fn first_day_start(&self) -> i64 {
        self.end_exclusive - self.bucket_count as i64 * DAY_MS
    }

    /// Calendar date of the first bucket
    pub fn first_date(&self) -> NaiveDate {
        self.reference_date
            .checked_sub_signed(Duration::days(self.bucket_count as i64 - 1))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Number of grid columns
    pub fn weeks(&self) -> usize {
        self.bucket_count.div_ceil(DAYS_PER_WEEK)
    }

    /// Whether a timestamp falls inside `[first_day_start, end_exclusive)`
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.first_day_start() && timestamp_ms < self.end_exclusive
    }
}

/// One calendar day's aggregated count plus its grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    /// 1..=31
    pub day_of_month: u32,
    /// 0 = Sunday
    pub weekday: u32,
    /// 0-based column within the window
    pub week: usize,
    pub count: u64,
}

impl Bucket {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day_of_month)
    }
}

/// Top-left pixel offset of one bucket, relative to the grid origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellPosition {
    pub index: usize,
    pub x: u32,
    pub y: u32,
}

/// Month label anchored above a grid column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    /// 1..=12
    pub month: u32,
    /// Column the label starts at
    pub week: usize,
    pub x: u32,
    pub y: i64,
}

impl MonthLabel {
    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }
}

/// Weekday label on the left axis, right-aligned at `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayLabel {
    /// 0 = Sunday
    pub weekday: u32,
    pub x: i64,
    pub y: u32,
}

impl WeekdayLabel {
    pub fn name(&self) -> &'static str {
        WEEKDAY_NAMES[self.weekday as usize % DAYS_PER_WEEK]
    }
}

/// Tooltip box for the hovered bucket, in composed-canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tooltip {
    pub index: usize,
    pub x: u32,
    pub y: f64,
    /// Moved above the cell because it would overflow the canvas bottom
    pub flipped: bool,
    pub bucket: Bucket,
}

impl Tooltip {
    /// e.g. "3 events"
    pub fn headline(&self, unit: &str) -> String {
        format!("{} {}", self.bucket.count, unit)
    }

    /// e.g. "2024-6-12"
    pub fn date_label(&self) -> String {
        format!(
            "{}-{}-{}",
            self.bucket.year, self.bucket.month, self.bucket.day_of_month
        )
    }
}

/// HSL fill for a bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shade {
    pub hue: f64,
    /// Percent
    pub saturation: f64,
    /// Percent
    pub lightness: f64,
}

impl Shade {
    /// CSS `hsl()` notation
    pub fn css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Derived layout for one render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    pub cell_size: u32,
    pub cell_margin: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub axis_margin: u32,
    pub cells: Vec<CellPosition>,
    pub month_labels: Vec<MonthLabel>,
    pub weekday_labels: Vec<WeekdayLabel>,
    pub tooltip: Option<Tooltip>,
}

impl Geometry {
    /// Distance between the top-left corners of neighbouring cells
    pub fn pitch(&self) -> u32 {
        self.cell_size.saturating_add(self.cell_margin)
    }

    /// Full drawing surface including the label axes
    pub fn frame_size(&self) -> (u32, u32) {
        (
            self.canvas_width.saturating_add(self.axis_margin),
            self.canvas_height.saturating_add(self.axis_margin),
        )
    }
}

/// Three-letter month name for 1..=12
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}
