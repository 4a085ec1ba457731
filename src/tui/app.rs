//! Application state and event loop

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};

use crate::services::{CalendarView, GridCalendar, GridConfig, HoverState, Settings};
use crate::types::{EventCounts, DAYS_PER_WEEK};

use super::theme::Theme;
use super::widgets::{
    heatmap::{Heatmap, HEATMAP_HEIGHT},
    tooltip::TooltipBox,
};

/// Main application
pub struct App {
    events: EventCounts,
    config: GridConfig,
    unit: String,
    calendar: GridCalendar,
    view: CalendarView,
    hover: HoverState,
    theme: Theme,
    /// Area the heatmap was last drawn into, for mouse hit-testing
    grid_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(events: EventCounts, config: GridConfig, settings: Settings, theme: Theme) -> Self {
        let calendar = GridCalendar::new(settings.tuning);
        let view = calendar.compute(&events, &config, None);
        Self {
            events,
            config,
            unit: settings.unit,
            calendar,
            view,
            hover: HoverState::new(),
            theme,
            grid_area: Rect::default(),
            should_quit: false,
        }
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.index()
    }

    /// Handle keyboard and mouse events
    pub fn handle_event(&mut self, event: Event) {
        let before = self.hover;
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => self.hover.leave(),
                KeyCode::Left | KeyCode::Char('h') => self.step(-(DAYS_PER_WEEK as isize)),
                KeyCode::Right | KeyCode::Char('l') => self.step(DAYS_PER_WEEK as isize),
                KeyCode::Up | KeyCode::Char('k') => self.step(-1),
                KeyCode::Down | KeyCode::Char('j') => self.step(1),
                KeyCode::Char('r') => self.refresh(),
                _ => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                match Heatmap::cell_at(self.grid_area, &self.view, mouse.column, mouse.row) {
                    Some(index) => self.hover.enter(index),
                    None if !contains(self.grid_area, mouse.column, mouse.row) => {
                        self.hover.leave()
                    }
                    // over a gap inside the grid: keep the current cell
                    None => {}
                }
            }
            _ => {}
        }

        if self.hover != before {
            self.calendar
                .relayout(&mut self.view, &self.config, self.hover.index());
        }
    }

    fn step(&mut self, delta: isize) {
        self.hover.step(delta, self.view.buckets.len());
    }

    /// Recompute from scratch; the day under the old index may have moved
    fn refresh(&mut self) {
        self.hover.clear_on_change();
        self.view = self.calendar.compute(&self.events, &self.config, None);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.grid_area = Self::split(area)[1];
        frame.render_widget(&*self, area);
    }

    /// [title, heatmap, spacer, hints]
    fn split(area: Rect) -> [Rect; 4] {
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(HEATMAP_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, grid_area, _, hint_area] = App::split(area);
        let window = &self.view.window;

        let title = Line::from(vec![
            Span::styled("gridcal ", Style::default().fg(self.theme.accent())),
            Span::styled(
                format!("{} .. {}", window.first_date(), window.reference_date),
                Style::default().fg(self.theme.date()),
            ),
            Span::styled(
                format!("  {} weeks, max {}", window.weeks(), self.view.max_count),
                Style::default().fg(self.theme.muted()),
            ),
        ]);
        Paragraph::new(title).render(title_area, buf);

        Heatmap::new(&self.view, self.calendar.engine(), self.theme)
            .with_hovered(self.hover.index())
            .render(grid_area, buf);

        if let Some(tooltip) = &self.view.geometry.tooltip {
            if let Some(cell) = Heatmap::cell_origin(grid_area, &self.view, tooltip.index) {
                let tip = TooltipBox::new(tooltip, &self.unit, self.theme);
                let tip_area = tip.area_for(cell, area);
                tip.render(tip_area, buf);
            }
        }

        let hints = Line::from(Span::styled(
            "←/→ week  ↑/↓ day  esc clear  r refresh  q quit",
            Style::default().fg(self.theme.muted()),
        ));
        Paragraph::new(hints).render(hint_area, buf);
    }
}

/// Run the TUI application
pub fn run(events: EventCounts, config: GridConfig, settings: Settings) -> anyhow::Result<()> {
    // must happen before raw mode
    let theme = Theme::detect();
    let app = App::new(events, config, settings, theme);

    let mut terminal = ratatui::init();
    crossterm::execute!(io::stdout(), EnableMouseCapture)?;
    let result = run_app(&mut terminal, app);
    if let Err(e) = crossterm::execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("failed to disable mouse capture: {}", e);
    }
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(250))? {
            app.handle_event(event::read()?);
        }
    }
    Ok(())
}
