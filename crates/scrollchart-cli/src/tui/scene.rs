//! Bar scene with keyed transitions
//!
//! Bars are identified by month. When the window moves, bars that stay in
//! view glide from wherever they currently are to their new row, new bars
//! grow in at their row, and bars that left the window are dropped.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use scrollchart_core::{Observation, WindowChange};

/// Interpolated value between two endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: f64,
    to: f64,
}

impl Tween {
    fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    fn at(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * t
    }
}

/// One bar and its in-flight transition
#[derive(Debug, Clone)]
pub struct BarSprite {
    pub observation: Observation,
    row: Tween,
    value: Tween,
}

impl BarSprite {
    pub fn key(&self) -> NaiveDate {
        self.observation.month
    }

    /// Row position (fractional while moving)
    pub fn row_at(&self, t: f64) -> f64 {
        self.row.at(t)
    }

    /// Drawn value (grows from zero when entering)
    pub fn value_at(&self, t: f64) -> f64 {
        self.value.at(t)
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    bars: Vec<BarSprite>,
    started: Option<Instant>,
    transition: Duration,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retarget the scene to a new window
    pub fn apply(&mut self, change: &WindowChange, transition: Duration, now: Instant) {
        let t = self.progress(now);

        let mut current: HashMap<NaiveDate, BarSprite> =
            self.bars.drain(..).map(|bar| (bar.key(), bar)).collect();
        for key in &change.join.exit {
            current.remove(key);
        }

        let mut bars = Vec::with_capacity(change.rows.len());
        for (row, obs) in change.rows.iter().enumerate() {
            let row = row as f64;
            let kept = change
                .join
                .update
                .contains(&obs.month)
                .then(|| current.remove(&obs.month))
                .flatten();

            let bar = match kept {
                Some(bar) => BarSprite {
                    observation: *obs,
                    row: Tween::new(bar.row_at(t), row),
                    value: Tween::new(bar.value_at(t), obs.rate),
                },
                None => BarSprite {
                    observation: *obs,
                    row: Tween::new(row, row),
                    value: Tween::new(0.0, obs.rate),
                },
            };
            bars.push(bar);
        }

        if !current.is_empty() {
            tracing::debug!(orphans = current.len(), "Dropped bars missing from join");
        }

        self.bars = bars;
        self.started = Some(now);
        self.transition = transition;
    }

    /// Eased transition progress in `[0, 1]`
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return 1.0;
        };
        if self.transition.is_zero() {
            return 1.0;
        }
        let linear = now.saturating_duration_since(started).as_secs_f64()
            / self.transition.as_secs_f64();
        ease_cubic_in_out(linear.min(1.0))
    }

    /// Whether a transition is still running
    pub fn is_animating(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }

    pub fn bars(&self) -> &[BarSprite] {
        &self.bars
    }

    pub fn first_and_last(&self) -> Option<(&Observation, &Observation)> {
        Some((&self.bars.first()?.observation, &self.bars.last()?.observation))
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}
