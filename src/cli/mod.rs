use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use clap::{Args, Parser, Subcommand};

use crate::services::{CalendarView, EventLoader, GridCalendar, GridConfig, Settings, SettingsService};
use crate::types::{month_name, GridcalError, Result};

/// Calendar heatmap grid for timestamped event counts
#[derive(Parser)]
#[command(name = "gridcal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    grid: GridArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive heatmap (default)
    Tui,

    /// Print one bucket per visible day
    Buckets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the grid geometry
    Layout {
        /// Bucket index to place the tooltip for
        #[arg(long)]
        hover: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show effective settings (config file plus --width/--weeks)
    Config {
        /// Write them to ~/.gridcal/config.json
        #[arg(long)]
        save: bool,
    },
}

/// Options shared by every command (accepted before or after the subcommand)
#[derive(Args, Debug, Clone, Default)]
struct GridArgs {
    /// Event-count JSON file (`-` for stdin)
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,

    /// Last day shown: YYYY-MM-DD, RFC 3339 or epoch milliseconds (default: now)
    #[arg(long, value_parser = parse_until, global = true)]
    until: Option<DateTime<Local>>,

    /// Canvas width in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Number of week columns
    #[arg(long, allow_negative_numbers = true, global = true)]
    weeks: Option<i64>,
}

impl GridArgs {
    fn config(&self, settings: &Settings) -> GridConfig {
        GridConfig {
            until: self.until,
            canvas_width: self.width.unwrap_or(settings.canvas_width),
            weeks_shown: self.weeks.unwrap_or(settings.weeks_shown),
        }
    }

    /// `settings` with command-line overrides applied
    fn apply(&self, settings: &Settings) -> Settings {
        Settings {
            canvas_width: self.width.unwrap_or(settings.canvas_width),
            weeks_shown: self.weeks.unwrap_or(settings.weeks_shown),
            ..settings.clone()
        }
    }

    fn input(&self) -> Result<&PathBuf> {
        self.input
            .as_ref()
            .ok_or_else(|| GridcalError::Config("--input FILE is required".into()))
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let service = SettingsService::new();
        let settings = match &service {
            Ok(service) => service.load(),
            Err(e) => {
                log::warn!("using default settings: {}", e);
                Settings::default()
            }
        };
        let calendar = GridCalendar::new(settings.tuning);

        let grid = self.grid;

        match self.command {
            None | Some(Commands::Tui) => run_tui(&grid, &settings),
            Some(Commands::Buckets { json }) => {
                let events = EventLoader::load(grid.input()?)?;
                let view = calendar.compute(&events, &grid.config(&settings), None);
                if json {
                    println!("{}", serde_json::to_string_pretty(&view.buckets)?);
                } else {
                    print!("{}", format_buckets(&calendar, &view));
                }
                Ok(())
            }
            Some(Commands::Layout { hover, json }) => {
                let events = EventLoader::load(grid.input()?)?;
                let view = calendar.compute(&events, &grid.config(&settings), hover);
                if json {
                    println!("{}", serde_json::to_string_pretty(&view.geometry)?);
                } else {
                    print!("{}", format_layout(&view, &settings.unit));
                }
                Ok(())
            }
            Some(Commands::Config { save }) => {
                let effective = grid.apply(&settings);
                println!("{}", serde_json::to_string_pretty(&effective)?);
                if save {
                    let service = service?;
                    service.save(&effective)?;
                    eprintln!("Saved {}", service.config_path().display());
                }
                Ok(())
            }
        }
    }
}

fn run_tui(grid: &GridArgs, settings: &Settings) -> anyhow::Result<()> {
    let events = EventLoader::load(grid.input()?)?;
    crate::tui::run(events, grid.config(settings), settings.clone())
}

/// Accepts `YYYY-MM-DD`, RFC 3339, or epoch milliseconds
fn parse_until(value: &str) -> Result<DateTime<Local>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        // noon avoids DST gaps around midnight
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        return Local
            .from_local_datetime(&noon)
            .earliest()
            .ok_or_else(|| GridcalError::Parse(format!("no local time for {}", value)));
    }
    if let Ok(ms) = value.parse::<i64>() {
        return Local
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| GridcalError::Parse(format!("timestamp out of range: {}", ms)));
    }

    Err(GridcalError::Parse(format!(
        "expected YYYY-MM-DD, RFC 3339 or epoch ms, got {:?}",
        value
    )))
}

const WEEKDAY_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn format_buckets(calendar: &GridCalendar, view: &CalendarView) -> String {
    let mut out = String::new();
    for (index, bucket) in view.buckets.iter().enumerate() {
        let shade = calendar
            .shade(view, index)
            .map(|s| s.css())
            .unwrap_or_default();
        out.push_str(&format!(
            "{:04}-{:02}-{:02}  {}  week {:>2}  {:>4}  {}\n",
            bucket.year,
            bucket.month,
            bucket.day_of_month,
            WEEKDAY_SHORT[bucket.weekday as usize % 7],
            bucket.week,
            bucket.count,
            shade
        ));
    }
    out
}

fn format_layout(view: &CalendarView, unit: &str) -> String {
    let g = &view.geometry;
    let (frame_w, frame_h) = g.frame_size();
    let mut out = format!(
        "cell {}px, margin {}px, canvas {}x{} (frame {}x{}), axis {}px\n",
        g.cell_size, g.cell_margin, g.canvas_width, g.canvas_height, frame_w, frame_h, g.axis_margin
    );

    let months: Vec<String> = g
        .month_labels
        .iter()
        .map(|l| format!("{}@{}", month_name(l.month), l.week))
        .collect();
    out.push_str(&format!("months: {}\n", months.join(" ")));

    if let Some(tooltip) = &g.tooltip {
        out.push_str(&format!(
            "tooltip: {} on {} at ({}, {:.1}){}\n",
            tooltip.headline(unit),
            tooltip.date_label(),
            tooltip.x,
            tooltip.y,
            if tooltip.flipped { " flipped" } else { "" }
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventCounts;
    use chrono::Datelike;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["gridcal"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.grid.input.is_none());
    }

    #[test]
    fn test_cli_parse_buckets_json() {
        let cli = Cli::try_parse_from(["gridcal", "buckets", "-i", "events.json", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Buckets { json: true })));
        assert_eq!(cli.grid.input, Some(PathBuf::from("events.json")));
    }

    #[test]
    fn test_cli_parse_layout_hover() {
        let cli = Cli::try_parse_from([
            "gridcal", "layout", "-i", "e.json", "--hover", "12", "--width", "640", "--weeks", "26",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Layout {
                hover: Some(12),
                json: false
            })
        ));
        assert_eq!(cli.grid.width, Some(640));
        assert_eq!(cli.grid.weeks, Some(26));
    }

    #[test]
    fn test_cli_parse_negative_weeks() {
        let cli =
            Cli::try_parse_from(["gridcal", "buckets", "-i", "e.json", "--weeks", "-2"]).unwrap();
        assert_eq!(cli.grid.weeks, Some(-2));
    }

    #[test]
    fn test_cli_parse_options_before_subcommand() {
        let cli = Cli::try_parse_from(["gridcal", "--until", "2024-06-12", "-i", "e.json", "tui"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Tui)));
        assert!(cli.grid.until.is_some());
    }

    #[test]
    fn test_grid_args_config() {
        let args = GridArgs {
            weeks: Some(4),
            ..GridArgs::default()
        };
        let settings = Settings {
            canvas_width: 1024,
            ..Settings::default()
        };

        let config = args.config(&settings);
        assert_eq!(config.weeks_shown, 4);
        assert_eq!(config.canvas_width, 1024);
        assert!(config.until.is_none());
    }

    #[test]
    fn test_cli_parse_config_save() {
        let cli = Cli::try_parse_from(["gridcal", "config", "--save", "--weeks", "26"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config { save: true })));
        assert_eq!(cli.grid.weeks, Some(26));
    }

    #[test]
    fn test_grid_args_apply_overrides() {
        let args = GridArgs {
            width: Some(640),
            ..GridArgs::default()
        };
        let settings = Settings {
            weeks_shown: 12,
            unit: "pomodoros".to_string(),
            ..Settings::default()
        };

        let effective = args.apply(&settings);
        assert_eq!(effective.canvas_width, 640);
        assert_eq!(effective.weeks_shown, 12);
        assert_eq!(effective.unit, "pomodoros");
    }

    #[test]
    fn test_missing_input_is_config_error() {
        let args = GridArgs::default();
        assert!(matches!(args.input(), Err(GridcalError::Config(_))));
    }

    // ========== parse_until tests ==========

    #[test]
    fn test_parse_until_date() {
        let dt = parse_until("2024-06-12").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
    }

    #[test]
    fn test_parse_until_epoch_ms() {
        let expected = Local.with_ymd_and_hms(2024, 6, 12, 8, 0, 0).unwrap();
        let dt = parse_until(&expected.timestamp_millis().to_string()).unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn test_parse_until_rfc3339() {
        let dt = parse_until("2024-06-12T10:00:00+00:00").unwrap();
        assert_eq!(dt.timestamp(), 1718186400);
    }

    #[test]
    fn test_parse_until_invalid() {
        assert!(matches!(parse_until("soon"), Err(GridcalError::Parse(_))));
    }

    // ========== report formatting tests ==========

    fn sample_view(hover: Option<usize>) -> CalendarView {
        let config = GridConfig {
            until: Some(Local.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap()),
            canvas_width: 800,
            weeks_shown: 6,
        };
        GridCalendar::default().compute(&EventCounts::new(), &config, hover)
    }

    #[test]
    fn test_format_buckets() {
        let view = sample_view(None);
        let out = format_buckets(&GridCalendar::default(), &view);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 42);
        assert_eq!(lines[0], "2024-02-18  Sun  week  0     0  hsl(50, 0%, 92%)");
        assert_eq!(lines[41], "2024-03-30  Sat  week  5     0  hsl(50, 0%, 92%)");
        assert_eq!(view.buckets[41].date().map(|d| d.day()), Some(30));
    }

    #[test]
    fn test_format_layout() {
        let out = format_layout(&sample_view(Some(0)), "pomodoros");
        assert!(out.contains("months: Feb@1 Mar@2"));
        assert!(out.contains("tooltip: 0 pomodoros on 2024-2-18"));
    }
}
