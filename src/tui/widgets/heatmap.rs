//! Week-column heatmap widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::services::{CalendarView, LayoutEngine};
use crate::tui::theme::Theme;
use crate::types::DAYS_PER_WEEK;

/// "Wed " prefix
pub const LABEL_WIDTH: u16 = 4;
/// 2 chars content + 1 gap
pub const CELL_WIDTH: u16 = 3;
/// Month row plus one row per weekday
pub const HEATMAP_HEIGHT: u16 = 1 + DAYS_PER_WEEK as u16;

/// Heatmap widget for ratatui
pub struct Heatmap<'a> {
    view: &'a CalendarView,
    engine: &'a LayoutEngine,
    hovered: Option<usize>,
    theme: Theme,
}

impl<'a> Heatmap<'a> {
    pub fn new(view: &'a CalendarView, engine: &'a LayoutEngine, theme: Theme) -> Self {
        Self {
            view,
            engine,
            hovered: None,
            theme,
        }
    }

    pub fn with_hovered(mut self, hovered: Option<usize>) -> Self {
        self.hovered = hovered;
        self
    }

    /// Columns that fit in `width`, newest weeks kept
    pub fn visible_weeks(width: u16, total_weeks: usize) -> usize {
        let available = width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH;
        (available as usize).min(total_weeks)
    }

    /// Screen position of the grid's first visible column, centered in `area`
    fn grid_left(area: Rect, visible: usize) -> u16 {
        let used = LABEL_WIDTH + visible as u16 * CELL_WIDTH;
        area.x + area.width.saturating_sub(used) / 2 + LABEL_WIDTH
    }

    /// Terminal cell of a bucket's top-left corner, if its column is visible
    pub fn cell_origin(area: Rect, view: &CalendarView, index: usize) -> Option<(u16, u16)> {
        let bucket = view.buckets.get(index)?;
        let total = view.window.weeks();
        let visible = Self::visible_weeks(area.width, total);
        let first_week = total - visible;
        if bucket.week < first_week {
            return None;
        }
        let x = Self::grid_left(area, visible) + (bucket.week - first_week) as u16 * CELL_WIDTH;
        let y = area.y + 1 + bucket.weekday as u16;
        Some((x, y))
    }

    /// Bucket under the terminal position `(column, row)`
    pub fn cell_at(area: Rect, view: &CalendarView, column: u16, row: u16) -> Option<usize> {
        let total = view.window.weeks();
        let visible = Self::visible_weeks(area.width, total);
        let left = Self::grid_left(area, visible);
        let top = area.y + 1;

        if column < left || row < top || row >= top + DAYS_PER_WEEK as u16 {
            return None;
        }
        let offset = column - left;
        // gap column between cells belongs to no bucket
        if offset % CELL_WIDTH == CELL_WIDTH - 1 {
            return None;
        }
        let week = (total - visible) + (offset / CELL_WIDTH) as usize;
        let weekday = (row - top) as u32;

        view.buckets
            .iter()
            .position(|b| b.week == week && b.weekday == weekday)
    }
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total = self.view.window.weeks();
        let visible = Self::visible_weeks(area.width, total);
        let first_week = total - visible;
        let left = Self::grid_left(area, visible);
        let right = area.x + area.width;
        let bottom = area.y + area.height;
        let label_style = Style::default().fg(self.theme.muted());

        // Month labels on the first row
        for label in &self.view.geometry.month_labels {
            if label.week < first_week {
                continue;
            }
            let x = left + (label.week - first_week) as u16 * CELL_WIDTH;
            if x + 3 > right {
                continue;
            }
            buf.set_string(x, area.y, label.name(), label_style);
        }

        // Weekday labels
        for label in &self.view.geometry.weekday_labels {
            let y = area.y + 1 + label.weekday as u16;
            if y >= bottom {
                break;
            }
            buf.set_string(left - LABEL_WIDTH, y, label.name(), label_style);
        }

        for (index, bucket) in self.view.buckets.iter().enumerate() {
            if bucket.week < first_week {
                continue;
            }
            let x = left + (bucket.week - first_week) as u16 * CELL_WIDTH;
            let y = area.y + 1 + bucket.weekday as u16;
            if x + 2 > right || y >= bottom {
                continue;
            }

            let shade = self.engine.shade(bucket.count, self.view.max_count);
            let color = self.theme.shade_color(shade);
            if self.hovered == Some(index) {
                let style = Style::default()
                    .fg(self.theme.accent())
                    .bg(color)
                    .add_modifier(Modifier::BOLD);
                buf.set_string(x, y, "[]", style);
            } else {
                buf.set_string(x, y, "██", Style::default().fg(color));
            }
        }
    }
}
