//! scrollchart: an animated, scrollable bar chart of monthly rates

mod cli;
mod logging;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use scrollchart_core::{spawn_playback, ChannelSink, ChartConfig, Series, WindowedSeriesAnimator};

use cli::Args;
use tui::App;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ChartConfig::load(path),
        None => ChartConfig::load_default(),
    }
    .context("Failed to load config")?;
    args.apply(&mut config);

    if args.print_config {
        print!("{}", config.to_toml());
        return Ok(());
    }

    let log_path = logging::init(args.log_file.as_deref())?;
    tracing::info!(log = %log_path.display(), "Starting scrollchart");

    let series = Series::load(&config.csv_path, &config.columns)
        .with_context(|| format!("Failed to load {}", config.csv_path.display()))?;

    let (sink, mut chart_rx) = ChannelSink::new();
    let mut animator = WindowedSeriesAnimator::new(series.clone(), config.animator_config(), sink)
        .context("Cannot chart this series")?;
    animator.render_initial();

    let (playback, task) = spawn_playback(animator);
    if config.autoplay {
        playback.toggle_playback()?;
    }

    let app = App::new(
        playback.clone(),
        &series,
        config.visible_rows,
        config.columns.rate.clone(),
    );
    let result = tui::run(app, &mut chart_rx).await;

    playback.shutdown();
    let animator = task.await.context("Playback task failed")?;
    tracing::info!(start = animator.current_state().start, "Chart closed");

    result
}
