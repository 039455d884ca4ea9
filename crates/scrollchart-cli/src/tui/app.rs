//! Application state for the chart view
//!
//! The app never moves the window itself. Controls go to the playback task
//! through [`PlaybackHandle`]; window and playback changes come back as
//! [`ChartEvent`]s and are mirrored here for drawing.

use std::time::Instant;

use ratatui::layout::Rect;
use scrollchart_core::{ChartEvent, DriverError, PlaybackHandle, PlaybackState, Series};

use super::scene::Scene;
use super::theme::Theme;

/// Hit areas from the last draw, for mouse handling
#[derive(Debug, Default)]
pub struct LayoutState {
    pub slider_area: Option<Rect>,
    pub button_area: Option<Rect>,
    /// Mouse is held down on the slider
    pub dragging_slider: bool,
}

pub struct App {
    pub(crate) playback: PlaybackHandle,
    pub scene: Scene,
    pub theme: Theme,
    pub layout: LayoutState,
    /// Window start as last reported by the playback task
    pub start: usize,
    pub max_start: usize,
    pub playing: bool,
    pub visible_rows: usize,
    pub max_rate: f64,
    pub axis_title: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        playback: PlaybackHandle,
        series: &Series,
        visible_rows: usize,
        axis_title: impl Into<String>,
    ) -> Self {
        Self {
            playback,
            scene: Scene::new(),
            theme: Theme::default(),
            layout: LayoutState::default(),
            start: 0,
            max_start: series.len().saturating_sub(visible_rows),
            playing: false,
            visible_rows,
            max_rate: series.max_rate(),
            axis_title: axis_title.into(),
            should_quit: false,
        }
    }

    /// Mirror a change reported by the playback task
    pub fn handle_chart_event(&mut self, event: ChartEvent, now: Instant) {
        match event {
            ChartEvent::Window { change, transition } => {
                self.start = change.start;
                self.max_start = change.max_start;
                self.scene.apply(&change, transition, now);
            }
            ChartEvent::Playback(state) => {
                self.playing = state == PlaybackState::Playing;
            }
        }
    }

    /// Whether another frame is needed for a running transition
    pub fn is_animating(&self, now: Instant) -> bool {
        self.scene.is_animating(now)
    }

    /// `YYYY-MM … YYYY-MM` for the rows in view
    pub fn range_label(&self) -> String {
        match self.scene.first_and_last() {
            Some((first, last)) => format!("{} … {}", first.label(), last.label()),
            None => String::new(),
        }
    }

    /// Forward a control result; a closed playback task ends the app
    pub(crate) fn control(&mut self, result: Result<(), DriverError>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "Playback control failed, quitting");
            self.should_quit = true;
        }
    }
}
