//! Windowed series animator
//!
//! Owns the visible window over a series and the playback state. The window
//! moves by scrubbing (explicit jumps, which always stop playback) or by
//! ticks delivered through a [`Scheduler`] while playing. Every window change
//! is pushed to a [`RenderSink`] together with the keyed join against the
//! previously rendered window.

use std::time::Duration;

use crate::error::ConfigError;
use crate::join::KeyedJoin;
use crate::schedule::{Scheduler, TickTicket};
use crate::series::{Observation, Series};
use crate::window::WindowBounds;

/// Default number of rows in the window
pub const DEFAULT_VISIBLE_ROWS: usize = 20;
/// Default delay between playback ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);
/// Default duration the UI should take to animate a window change
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

/// Snapshot returned by `current_state`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatorState {
    pub start: usize,
    pub playing: bool,
}

/// What moved the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Initial,
    Scrub,
    Tick,
}

/// A new window, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct WindowChange {
    pub start: usize,
    pub max_start: usize,
    /// Exactly `visible_rows` rows starting at `start`
    pub rows: Vec<Observation>,
    /// Matching against the previously rendered rows, keyed by month
    pub join: KeyedJoin,
    pub cause: ChangeCause,
}

/// Receives window changes and playback transitions
pub trait RenderSink {
    /// The UI should animate to `change` over `transition`
    fn on_window_change(&mut self, change: &WindowChange, transition: Duration);

    /// Playback was started or stopped
    fn on_playback_change(&mut self, _state: PlaybackState) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatorConfig {
    pub visible_rows: usize,
    pub tick_interval: Duration,
    pub transition: Duration,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            visible_rows: DEFAULT_VISIBLE_ROWS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            transition: DEFAULT_TRANSITION,
        }
    }
}

pub struct WindowedSeriesAnimator<S> {
    series: Series,
    bounds: WindowBounds,
    config: AnimatorConfig,
    start: usize,
    state: PlaybackState,
    /// Bumped on every Stopped -> Playing transition; older tickets are stale
    generation: u64,
    /// Rows of the last rendered window (empty before the first render)
    rendered: Vec<Observation>,
    sink: S,
}

impl<S: RenderSink> WindowedSeriesAnimator<S> {
    /// Create an animator at `start = 0`, stopped
    ///
    /// Fails if the series cannot fill one window. Nothing is rendered until
    /// [`render_initial`](Self::render_initial) or the first window change.
    pub fn new(series: Series, config: AnimatorConfig, sink: S) -> Result<Self, ConfigError> {
        if config.tick_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        let bounds = WindowBounds::new(series.len(), config.visible_rows)?;

        Ok(Self {
            series,
            bounds,
            config,
            start: 0,
            state: PlaybackState::Stopped,
            generation: 0,
            rendered: Vec::new(),
            sink,
        })
    }

    /// Render the current window with every row entering
    pub fn render_initial(&mut self) {
        self.rendered.clear();
        self.render(ChangeCause::Initial);
    }

    /// Jump the window to `index`, clamped into the valid range
    ///
    /// Scrubbing is an explicit override: playback stops, and any tick still
    /// scheduled becomes a no-op.
    pub fn scrub_to(&mut self, index: i64) {
        let clamped = self.bounds.clamp(index);
        if clamped as i64 != index {
            tracing::debug!(
                requested = index,
                clamped,
                max_start = self.bounds.max_start(),
                "Clamped scrub index"
            );
        }

        if self.state.is_playing() {
            self.set_state(PlaybackState::Stopped);
        }

        self.start = clamped;
        self.render(ChangeCause::Scrub);
    }

    /// Scrub relative to the current start
    pub fn step(&mut self, delta: i64) {
        self.scrub_to((self.start as i64).saturating_add(delta));
    }

    pub fn jump_to_start(&mut self) {
        self.scrub_to(0);
    }

    pub fn jump_to_end(&mut self) {
        self.scrub_to(self.bounds.max_start() as i64);
    }

    /// Flip between stopped and playing
    ///
    /// Starting schedules the first tick immediately. Stopping only flips the
    /// state; the tick already scheduled will find it stopped and do nothing.
    pub fn toggle_playback(&mut self, scheduler: &mut impl Scheduler) -> PlaybackState {
        match self.state {
            PlaybackState::Stopped => {
                self.generation += 1;
                self.set_state(PlaybackState::Playing);
                scheduler.schedule(Duration::ZERO, self.ticket());
            }
            PlaybackState::Playing => {
                self.set_state(PlaybackState::Stopped);
            }
        }
        self.state
    }

    /// Handle a due ticket. Returns false if the ticket was stale.
    ///
    /// Advances one row (wrapping to 0 after the last valid start), renders,
    /// and schedules the next tick.
    pub fn tick(&mut self, ticket: TickTicket, scheduler: &mut impl Scheduler) -> bool {
        if !self.state.is_playing() || ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                state = ?self.state,
                "Ignoring stale tick"
            );
            return false;
        }

        self.start = self.bounds.advance(self.start);
        self.render(ChangeCause::Tick);
        scheduler.schedule(self.config.tick_interval, self.ticket());
        true
    }

    pub fn current_state(&self) -> AnimatorState {
        AnimatorState {
            start: self.start,
            playing: self.state.is_playing(),
        }
    }

    pub fn playback(&self) -> PlaybackState {
        self.state
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Rows of the current window
    pub fn current_window(&self) -> &[Observation] {
        self.series.slice(self.bounds.range(self.start))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn ticket(&self) -> TickTicket {
        TickTicket {
            generation: self.generation,
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
        tracing::info!(state = ?state, start = self.start, "Playback state changed");
        self.sink.on_playback_change(state);
    }

    fn render(&mut self, cause: ChangeCause) {
        let rows = self.current_window().to_vec();
        let join = KeyedJoin::between(&self.rendered, &rows);
        tracing::debug!(
            start = self.start,
            cause = ?cause,
            entered = join.enter.len(),
            updated = join.update.len(),
            exited = join.exit.len(),
            "Window changed"
        );

        let change = WindowChange {
            start: self.start,
            max_start: self.bounds.max_start(),
            rows,
            join,
            cause,
        };
        self.sink.on_window_change(&change, self.config.transition);
        self.rendered = change.rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;
    use chrono::{Datelike, Months, NaiveDate};

    #[derive(Default)]
    struct RecordingSink {
        changes: Vec<(WindowChange, Duration)>,
        playback: Vec<PlaybackState>,
    }

    impl RenderSink for RecordingSink {
        fn on_window_change(&mut self, change: &WindowChange, transition: Duration) {
            self.changes.push((change.clone(), transition));
        }

        fn on_playback_change(&mut self, state: PlaybackState) {
            self.playback.push(state);
        }
    }

    impl RecordingSink {
        fn starts(&self) -> Vec<usize> {
            self.changes.iter().map(|(c, _)| c.start).collect()
        }
    }

    fn monthly_series(len: usize) -> Series {
        let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        Series::new(
            (0..len)
                .map(|i| {
                    let month = first + Months::new(i as u32);
                    Observation::new(month, 3.0 + (month.month() as f64) / 10.0)
                })
                .collect(),
        )
    }

    fn animator(len: usize, rows: usize) -> WindowedSeriesAnimator<RecordingSink> {
        let config = AnimatorConfig {
            visible_rows: rows,
            ..AnimatorConfig::default()
        };
        WindowedSeriesAnimator::new(monthly_series(len), config, RecordingSink::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_short_series() {
        let result = WindowedSeriesAnimator::new(
            monthly_series(5),
            AnimatorConfig::default(),
            RecordingSink::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::SeriesTooShort {
                len: 5,
                visible_rows: 20
            })
        ));
    }

    #[test]
    fn test_new_rejects_zero_interval() {
        let config = AnimatorConfig {
            tick_interval: Duration::ZERO,
            ..AnimatorConfig::default()
        };
        let result =
            WindowedSeriesAnimator::new(monthly_series(30), config, RecordingSink::default());
        assert!(matches!(result, Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn test_initial_state() {
        let mut anim = animator(25, 20);
        assert_eq!(
            anim.current_state(),
            AnimatorState {
                start: 0,
                playing: false
            }
        );
        assert!(anim.sink().changes.is_empty());

        anim.render_initial();
        let (change, transition) = &anim.sink().changes[0];
        assert_eq!(change.cause, ChangeCause::Initial);
        assert_eq!(change.rows.len(), 20);
        assert_eq!(change.join.enter.len(), 20);
        assert_eq!(*transition, DEFAULT_TRANSITION);
    }

    #[test]
    fn test_slice_length_for_every_start() {
        let mut anim = animator(40, 20);
        for index in 0..=20 {
            anim.scrub_to(index);
        }
        for (change, _) in &anim.sink().changes {
            assert_eq!(change.rows.len(), 20);
            assert_eq!(change.rows[0], *anim.series().get(change.start).unwrap());
        }
        assert_eq!(anim.sink().starts(), (0..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_scrub_clamps() {
        let mut anim = animator(25, 20);
        anim.scrub_to(-4);
        assert_eq!(anim.current_state().start, 0);
        anim.scrub_to(99);
        assert_eq!(anim.current_state().start, 5);
        anim.step(-2);
        assert_eq!(anim.current_state().start, 3);
        anim.jump_to_end();
        assert_eq!(anim.current_state().start, 5);
        anim.jump_to_start();
        assert_eq!(anim.current_state().start, 0);
        assert!(anim
            .sink()
            .changes
            .iter()
            .all(|(c, _)| c.cause == ChangeCause::Scrub));
    }

    #[test]
    fn test_step_extreme_deltas_clamp() {
        let mut anim = animator(25, 20);
        anim.scrub_to(3);
        anim.step(i64::MAX);
        assert_eq!(anim.current_state().start, 5);
        anim.step(i64::MIN);
        assert_eq!(anim.current_state().start, 0);
    }

    #[test]
    fn test_toggle_schedules_exactly_one_tick() {
        let mut anim = animator(25, 20);
        let mut clock = ManualScheduler::new();

        assert_eq!(anim.toggle_playback(&mut clock), PlaybackState::Playing);
        assert_eq!(clock.pending(), 1);

        // First tick is immediate and schedules exactly one follow-up
        assert_eq!(clock.advance(Duration::ZERO, &mut anim), 1);
        assert_eq!(clock.pending(), 1);
        assert_eq!(anim.current_state().start, 1);
    }

    #[test]
    fn test_no_ticks_after_pause() {
        let mut anim = animator(25, 20);
        let mut clock = ManualScheduler::new();

        anim.toggle_playback(&mut clock);
        clock.advance(Duration::from_millis(2500), &mut anim);
        let rendered = anim.sink().changes.len();
        assert_eq!(rendered, 3);

        assert_eq!(anim.toggle_playback(&mut clock), PlaybackState::Stopped);
        clock.advance(Duration::from_secs(30), &mut anim);

        assert_eq!(anim.sink().changes.len(), rendered);
        assert_eq!(clock.pending(), 0);
        assert_eq!(
            anim.sink().playback,
            vec![PlaybackState::Playing, PlaybackState::Stopped]
        );
    }

    #[test]
    fn test_playback_loops_to_start() {
        let mut anim = animator(25, 20);
        let mut clock = ManualScheduler::new();

        anim.toggle_playback(&mut clock);
        clock.advance(Duration::ZERO, &mut anim);
        clock.advance(Duration::from_millis(5000), &mut anim);

        assert_eq!(anim.sink().starts(), vec![1, 2, 3, 4, 5, 0]);
        assert!(anim.current_state().playing);
        assert!(anim
            .sink()
            .changes
            .iter()
            .all(|(c, _)| c.cause == ChangeCause::Tick));
    }

    #[test]
    fn test_tick_join_matches_by_month() {
        let mut anim = animator(25, 20);
        let mut clock = ManualScheduler::new();
        anim.render_initial();

        anim.toggle_playback(&mut clock);
        clock.advance(Duration::ZERO, &mut anim);

        let (change, _) = anim.sink().changes.last().unwrap();
        let series = anim.series();
        assert_eq!(change.join.update.len(), 19);
        assert_eq!(change.join.exit, vec![series.get(0).unwrap().month]);
        assert_eq!(change.join.enter, vec![series.get(20).unwrap().month]);
    }

    #[test]
    fn test_scrub_stops_playback() {
        let mut anim = animator(25, 20);
        let mut clock = ManualScheduler::new();

        anim.toggle_playback(&mut clock);
        clock.advance(Duration::ZERO, &mut anim);
        assert_eq!(clock.pending(), 1);

        anim.scrub_to(4);
        assert!(!anim.current_state().playing);

        // The already scheduled tick fires but does nothing
        let before = anim.sink().changes.len();
        assert_eq!(clock.advance(Duration::from_secs(5), &mut anim), 1);
        assert_eq!(anim.sink().changes.len(), before);
        assert_eq!(anim.current_state().start, 4);
    }

    #[test]
    fn test_resume_continues_from_scrubbed_position() {
        let mut anim = animator(25, 20);
        let mut clock = ManualScheduler::new();

        anim.scrub_to(3);
        anim.toggle_playback(&mut clock);
        clock.advance(Duration::ZERO, &mut anim);
        assert_eq!(anim.current_state().start, 4);
    }

    #[test]
    fn test_stale_ticket_after_quick_restart() {
        let mut anim = animator(25, 20);
        let mut clock = ManualScheduler::new();

        anim.toggle_playback(&mut clock);
        anim.toggle_playback(&mut clock);
        anim.toggle_playback(&mut clock);
        assert_eq!(clock.pending(), 2);

        // Only the ticket from the latest start advances the window
        clock.advance(Duration::ZERO, &mut anim);
        assert_eq!(anim.sink().starts(), vec![1]);
        assert_eq!(clock.pending(), 1);
    }
}
