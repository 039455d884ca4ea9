//! Terminal front end for the chart
//!
//! Draws whatever the playback task last reported and forwards input back to
//! it. Frames are only drawn while something changed or a bar transition is
//! still running.

pub mod app;
mod components;
mod handlers;
mod render;
mod scale;
mod scene;
mod theme;

#[cfg(test)]
mod test_support;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use scrollchart_core::ChartEvent;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

pub use app::App;

/// About 30 frames per second while animating
const FRAME_DURATION: Duration = Duration::from_millis(33);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Take over the terminal and run until the user quits
pub async fn run(mut app: App, chart_rx: &mut UnboundedReceiver<ChartEvent>) -> Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, chart_rx).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Term,
    app: &mut App,
    chart_rx: &mut UnboundedReceiver<ChartEvent>,
) -> Result<()> {
    let mut input = EventStream::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut dirty = true;

    while !app.should_quit {
        if dirty {
            let now = Instant::now();
            terminal
                .draw(|frame| render::render(frame, app, now))
                .context("Failed to draw frame")?;
            dirty = false;
        }

        tokio::select! {
            event = input.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    dirty = true;
                }
                Some(Ok(Event::Mouse(mouse))) => {
                    app.handle_mouse(mouse);
                    dirty = true;
                }
                Some(Ok(Event::Resize(width, height))) => {
                    tracing::debug!(width, height, "Terminal resized");
                    dirty = true;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal input"),
                None => break,
            },
            event = chart_rx.recv() => match event {
                Some(event) => {
                    app.handle_chart_event(event, Instant::now());
                    dirty = true;
                }
                None => {
                    tracing::warn!("Playback task stopped, closing the chart");
                    break;
                }
            },
            _ = frames.tick() => {
                if app.is_animating(Instant::now()) {
                    dirty = true;
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    restore_on_error(enter_screen(), reset_terminal)
}

fn enter_screen() -> Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    Ok(terminal)
}

/// Run `restore` if a setup step after raw mode failed
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Best effort, for paths that are already failing
fn reset_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = disable_raw_mode();
}

/// Leave the alternate screen before the panic message is printed
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        reset_terminal();
        previous(info);
    }));
}
