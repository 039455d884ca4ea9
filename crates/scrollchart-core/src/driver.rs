//! Playback driver
//!
//! One tokio task owns the animator and processes scrub commands and tick
//! deadlines strictly in sequence, so nothing else ever touches the window
//! or playback state. [`PlaybackHandle`] is the cloneable control surface.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::animator::{
    AnimatorState, PlaybackState, RenderSink, WindowChange, WindowedSeriesAnimator,
};
use crate::error::DriverError;
use crate::schedule::DeadlineScheduler;

/// Commands processed by the playback task
#[derive(Debug)]
pub enum PlaybackCommand {
    Scrub(i64),
    Step(i64),
    JumpToStart,
    JumpToEnd,
    TogglePlayback,
    Snapshot(oneshot::Sender<AnimatorState>),
}

/// Events forwarded to the UI by [`ChannelSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    Window {
        change: WindowChange,
        transition: Duration,
    },
    Playback(PlaybackState),
}

/// Render sink that forwards everything into an unbounded channel
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ChartEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ChartEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: ChartEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Chart event dropped, receiver closed");
        }
    }
}

impl RenderSink for ChannelSink {
    fn on_window_change(&mut self, change: &WindowChange, transition: Duration) {
        self.send(ChartEvent::Window {
            change: change.clone(),
            transition,
        });
    }

    fn on_playback_change(&mut self, state: PlaybackState) {
        self.send(ChartEvent::Playback(state));
    }
}

/// Control surface for a running playback task
#[derive(Clone)]
pub struct PlaybackHandle {
    tx: mpsc::UnboundedSender<PlaybackCommand>,
    cancel: CancellationToken,
}

impl PlaybackHandle {
    pub fn scrub_to(&self, index: i64) -> Result<(), DriverError> {
        self.send(PlaybackCommand::Scrub(index))
    }

    pub fn step(&self, delta: i64) -> Result<(), DriverError> {
        self.send(PlaybackCommand::Step(delta))
    }

    pub fn jump_to_start(&self) -> Result<(), DriverError> {
        self.send(PlaybackCommand::JumpToStart)
    }

    pub fn jump_to_end(&self) -> Result<(), DriverError> {
        self.send(PlaybackCommand::JumpToEnd)
    }

    pub fn toggle_playback(&self) -> Result<(), DriverError> {
        self.send(PlaybackCommand::TogglePlayback)
    }

    /// Current window start and playback state, after all earlier commands
    pub async fn current_state(&self) -> Result<AnimatorState, DriverError> {
        let (tx, rx) = oneshot::channel();
        self.send(PlaybackCommand::Snapshot(tx))?;
        rx.await.map_err(|_| DriverError::Closed)
    }

    /// Stop the playback task
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn send(&self, cmd: PlaybackCommand) -> Result<(), DriverError> {
        self.tx.send(cmd).map_err(|_| DriverError::Closed)
    }
}

/// Spawn the task that owns `animator`
///
/// The task ends on [`PlaybackHandle::shutdown`] or once every handle is
/// dropped, and hands the animator back through the join handle.
pub fn spawn_playback<S>(
    animator: WindowedSeriesAnimator<S>,
) -> (PlaybackHandle, JoinHandle<WindowedSeriesAnimator<S>>)
where
    S: RenderSink + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run_playback(animator, rx, cancel.child_token()));
    (PlaybackHandle { tx, cancel }, task)
}

async fn run_playback<S: RenderSink>(
    mut animator: WindowedSeriesAnimator<S>,
    mut rx: mpsc::UnboundedReceiver<PlaybackCommand>,
    cancel: CancellationToken,
) -> WindowedSeriesAnimator<S> {
    let mut scheduler = DeadlineScheduler::new();

    loop {
        let deadline = scheduler.deadline();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Playback task cancelled");
                break;
            }
            cmd = rx.recv() => {
                let Some(cmd) = cmd else {
                    tracing::debug!("All playback handles dropped");
                    break;
                };
                apply_command(&mut animator, &mut scheduler, cmd);
            }
            _ = sleep_until(deadline) => {
                if let Some(ticket) = scheduler.take() {
                    animator.tick(ticket, &mut scheduler);
                }
            }
        }
    }

    animator
}

fn apply_command<S: RenderSink>(
    animator: &mut WindowedSeriesAnimator<S>,
    scheduler: &mut DeadlineScheduler,
    cmd: PlaybackCommand,
) {
    match cmd {
        PlaybackCommand::Scrub(index) => animator.scrub_to(index),
        PlaybackCommand::Step(delta) => animator.step(delta),
        PlaybackCommand::JumpToStart => animator.jump_to_start(),
        PlaybackCommand::JumpToEnd => animator.jump_to_end(),
        PlaybackCommand::TogglePlayback => {
            animator.toggle_playback(scheduler);
        }
        PlaybackCommand::Snapshot(reply) => {
            // Caller may have given up waiting
            let _ = reply.send(animator.current_state());
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
