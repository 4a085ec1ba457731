//! Grid layout: cell metrics, label anchors, tooltip placement and shading

use serde::{Deserialize, Serialize};

use crate::types::{
    Bucket, CellPosition, Geometry, MonthLabel, Shade, Tooltip, WeekdayLabel, DAYS_PER_WEEK,
    MAX_WEEKS,
};

/// Visual tuning constants. These are empirical, not derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    /// Space reserved left of and above the grid for labels
    pub axis_margin: u32,
    /// Gutter as a fraction of the column width
    pub margin_ratio: f64,
    /// Gutter added on top of the scaled part
    pub margin_floor: u32,
    /// Tooltip sits this many rows below the hovered cell's row
    pub tooltip_row_offset: f64,
    pub tooltip_height: f64,
    /// Upward shift applied when the tooltip would overflow the bottom
    pub tooltip_flip: f64,
    /// Minimum denominator for the intensity scale
    pub intensity_floor: u64,
    pub hue: f64,
    pub saturation: f64,
    pub base_lightness: f64,
    pub lightness_span: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            axis_margin: 36,
            margin_ratio: 0.1,
            margin_floor: 2,
            tooltip_row_offset: 1.8,
            tooltip_height: 20.0,
            tooltip_flip: 70.0,
            intensity_floor: 5,
            hue: 50.0,
            saturation: 60.0,
            base_lightness: 92.0,
            lightness_span: 70.0,
        }
    }
}

/// Derives pixel geometry from a bucket sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    tuning: LayoutTuning,
}

impl LayoutEngine {
    pub fn new(tuning: LayoutTuning) -> Self {
        Self { tuning }
    }

    /// Lay out `buckets` across `width` pixels split into `weeks` columns.
    /// An out-of-range `hovered` index yields no tooltip. Pixel offsets
    /// saturate at `u32::MAX` for oversized canvases.
    pub fn layout(
        &self,
        buckets: &[Bucket],
        width: u32,
        weeks: i64,
        hovered: Option<usize>,
    ) -> Geometry {
        let (cell_size, cell_margin) = self.cell_metrics(width, weeks);
        let pitch = cell_size.saturating_add(cell_margin);
        let canvas_height = Self::canvas_height(cell_size, cell_margin);
        let axis_margin = self.tuning.axis_margin;

        let cells = buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| CellPosition {
                index,
                x: column_offset(bucket.week, pitch),
                y: bucket.weekday.saturating_mul(pitch),
            })
            .collect();

        let label_y = axis_margin as i64 - 2 * cell_margin as i64;
        let month_labels = Self::month_labels(buckets)
            .into_iter()
            .map(|(month, week)| MonthLabel {
                month,
                week,
                x: column_offset(week, pitch),
                y: label_y,
            })
            .collect();

        let weekday_labels = (0..DAYS_PER_WEEK as u32)
            .map(|weekday| WeekdayLabel {
                weekday,
                x: axis_margin as i64 - cell_margin as i64,
                y: weekday.saturating_mul(pitch),
            })
            .collect();

        let tooltip = hovered.and_then(|index| self.tooltip(buckets, index, pitch, canvas_height));

        Geometry {
            cell_size,
            cell_margin,
            canvas_width: width,
            canvas_height,
            axis_margin,
            cells,
            month_labels,
            weekday_labels,
            tooltip,
        }
    }

    /// `(cell_size, cell_margin)` for the given width and column count
    pub fn cell_metrics(&self, width: u32, weeks: i64) -> (u32, u32) {
        let weeks = weeks.clamp(1, MAX_WEEKS) as u32;
        let inner_width = width.saturating_sub(self.tuning.axis_margin);
        let column = inner_width / weeks;

        let scaled = (inner_width as f64 / weeks as f64 * self.tuning.margin_ratio).floor();
        let cell_margin = (scaled as u32).saturating_add(self.tuning.margin_floor);
        let cell_size = column.saturating_sub(cell_margin);

        (cell_size, cell_margin)
    }

    /// Grid height: seven rows plus a trailing gutter
    pub fn canvas_height(cell_size: u32, cell_margin: u32) -> u32 {
        cell_size
            .saturating_add(cell_margin)
            .saturating_mul(DAYS_PER_WEEK as u32)
            .saturating_add(cell_margin)
    }

    /// First-occurrence `(month, column)` pairs for the month axis.
    ///
    /// Each week is represented by the month of its last day. The label is
    /// anchored one column right of that week, and the final week is skipped
    /// since its anchor would fall past the grid.
    pub fn month_labels(buckets: &[Bucket]) -> Vec<(u32, usize)> {
        let mut week_months: Vec<u32> = Vec::new();
        for bucket in buckets {
            if bucket.week >= week_months.len() {
                week_months.resize(bucket.week + 1, bucket.month);
            }
            week_months[bucket.week] = bucket.month;
        }

        let mut labels: Vec<(u32, usize)> = Vec::new();
        for (week, &month) in week_months
            .iter()
            .enumerate()
            .take(week_months.len().saturating_sub(1))
        {
            if !labels.iter().any(|&(seen, _)| seen == month) {
                labels.push((month, week + 1));
            }
        }
        labels
    }

    fn tooltip(
        &self,
        buckets: &[Bucket],
        index: usize,
        pitch: u32,
        canvas_height: u32,
    ) -> Option<Tooltip> {
        let bucket = *buckets.get(index)?;
        let axis_margin = self.tuning.axis_margin;

        let mut top = pitch as f64 * (bucket.weekday as f64 + self.tuning.tooltip_row_offset)
            + axis_margin as f64;
        let flipped = self.tooltip_overflows(top, canvas_height);
        if flipped {
            top -= self.tuning.tooltip_flip;
        }

        Some(Tooltip {
            index,
            x: column_offset(bucket.week, pitch).saturating_add(axis_margin),
            y: top,
            flipped,
            bucket,
        })
    }

    /// Whether a tooltip at `top` would run past the bottom of the canvas
    pub fn tooltip_overflows(&self, top: f64, canvas_height: u32) -> bool {
        top + self.tuning.tooltip_height > canvas_height as f64 + self.tuning.axis_margin as f64
    }

    /// Largest bucket count in view
    pub fn max_count(buckets: &[Bucket]) -> u64 {
        buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Normalized weight in `[0, 1]`, scaled against `max(intensity_floor, max_count)`
    pub fn intensity(&self, count: u64, max_count: u64) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let denominator = max_count.max(self.tuning.intensity_floor).max(1);
        (count as f64 / denominator as f64).min(1.0)
    }

    /// Fill for a bucket: neutral grey when empty, darker as intensity grows
    pub fn shade(&self, count: u64, max_count: u64) -> Shade {
        let intensity = self.intensity(count, max_count);
        Shade {
            hue: self.tuning.hue,
            saturation: if count == 0 {
                0.0
            } else {
                self.tuning.saturation
            },
            lightness: self.tuning.base_lightness - intensity * self.tuning.lightness_span,
        }
    }
}

/// Left edge of column `week`
fn column_offset(week: usize, pitch: u32) -> u32 {
    u32::try_from(week)
        .unwrap_or(u32::MAX)
        .saturating_mul(pitch)
}
