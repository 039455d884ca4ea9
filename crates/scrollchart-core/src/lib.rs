//! scrollchart core library
//!
//! Windowing and playback for a scrollable chart of a monthly time series:
//! - `series`: CSV loading into an immutable, ordered series
//! - `window`: window bounds and clamping
//! - `join`: identity matching between consecutive windows
//! - `animator`: the windowed series animator (scrub, play/pause, tick)
//! - `schedule`: tick scheduling (fake clock for tests, deadline slot for tokio)
//! - `driver`: single owning task that serializes scrub and tick events
//! - `config`: TOML configuration file

pub mod animator;
pub mod config;
pub mod driver;
pub mod error;
pub mod join;
pub mod schedule;
pub mod series;
pub mod window;

pub use animator::{
    AnimatorConfig, AnimatorState, ChangeCause, PlaybackState, RenderSink, WindowChange,
    WindowedSeriesAnimator,
};
pub use config::{ChartConfig, ColumnNames};
pub use driver::{spawn_playback, ChannelSink, ChartEvent, PlaybackCommand, PlaybackHandle};
pub use error::{ConfigError, DriverError, SeriesError};
pub use join::KeyedJoin;
pub use schedule::{DeadlineScheduler, ManualScheduler, Scheduler, TickTicket};
pub use series::{Observation, Series};
pub use window::WindowBounds;
