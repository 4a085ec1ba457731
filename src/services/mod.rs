//! Services: window resolution, bucketing, layout and I/O

pub mod bucketizer;
pub mod calendar;
pub mod hover;
pub mod layout;
pub mod loader;
pub mod settings;
pub mod window;

pub use bucketizer::GridBucketizer;
pub use calendar::{CalendarView, GridCalendar, GridConfig};
pub use hover::HoverState;
pub use layout::{LayoutEngine, LayoutTuning};
pub use loader::EventLoader;
pub use settings::{Settings, SettingsService};
pub use window::WindowResolver;
