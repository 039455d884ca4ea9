//! Shared fixtures for TUI tests

use chrono::{Months, NaiveDate};
use scrollchart_core::{
    spawn_playback, AnimatorConfig, ChannelSink, ChartEvent, Observation, Series,
    WindowedSeriesAnimator,
};
use tokio::sync::mpsc::UnboundedReceiver;

use super::app::App;

pub fn series(len: usize) -> Series {
    let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    Series::new(
        (0..len)
            .map(|i| Observation::new(first + Months::new(i as u32), 3.0 + (i % 7) as f64))
            .collect(),
    )
}

/// App wired to a live playback task; must be called inside a runtime
pub fn spawn_app(len: usize, visible_rows: usize) -> (App, UnboundedReceiver<ChartEvent>) {
    let series = series(len);
    let (sink, rx) = ChannelSink::new();
    let config = AnimatorConfig {
        visible_rows,
        ..AnimatorConfig::default()
    };
    let animator = WindowedSeriesAnimator::new(series.clone(), config, sink).unwrap();
    let (handle, _task) = spawn_playback(animator);
    (App::new(handle, &series, visible_rows, "Rate"), rx)
}
