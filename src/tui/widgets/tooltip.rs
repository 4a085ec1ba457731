//! Tooltip overlay for the hovered day

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;
use crate::types::Tooltip;

/// Bordered box: top border, one text line, bottom border
pub const TOOLTIP_HEIGHT: u16 = 3;

pub struct TooltipBox<'a> {
    tooltip: &'a Tooltip,
    unit: &'a str,
    theme: Theme,
}

impl<'a> TooltipBox<'a> {
    pub fn new(tooltip: &'a Tooltip, unit: &'a str, theme: Theme) -> Self {
        Self {
            tooltip,
            unit,
            theme,
        }
    }

    fn width(&self) -> u16 {
        let text = self.tooltip.headline(self.unit).len() + 2 + self.tooltip.date_label().len();
        text as u16 + 4
    }

    /// Box area anchored at the hovered cell `(x, y)`: just below the cell,
    /// or above it when the layout flipped the tooltip. Clamped to `bounds`.
    pub fn area_for(&self, cell: (u16, u16), bounds: Rect) -> Rect {
        let width = self.width().min(bounds.width);
        let height = TOOLTIP_HEIGHT.min(bounds.height);
        let (cell_x, cell_y) = cell;

        let y = if self.tooltip.flipped {
            cell_y.saturating_sub(height)
        } else {
            cell_y + 1
        };
        let max_x = bounds.x + bounds.width - width;
        let max_y = bounds.y + bounds.height - height;

        Rect {
            x: cell_x.clamp(bounds.x, max_x),
            y: y.clamp(bounds.y, max_y),
            width,
            height,
        }
    }
}

impl Widget for TooltipBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled(
                self.tooltip.headline(self.unit),
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                self.tooltip.date_label(),
                Style::default().fg(self.theme.date()),
            ),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
