//! Tick scheduling
//!
//! The animator never sleeps or spawns; it asks a [`Scheduler`] to deliver a
//! [`TickTicket`] after a delay. Whoever owns the animator hands due tickets
//! back to `WindowedSeriesAnimator::tick`.
//!
//! - [`ManualScheduler`]: virtual clock, advanced by hand (tests, headless runs)
//! - [`DeadlineScheduler`]: single pending deadline for a tokio select loop

use std::time::Duration;

use tokio::time::Instant;

use crate::animator::{RenderSink, WindowedSeriesAnimator};

/// A scheduled tick. Only honored if its generation is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTicket {
    pub generation: u64,
}

/// Something that can deliver a ticket back after a delay
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, ticket: TickTicket);
}

/// Fake clock scheduler
///
/// Keeps every scheduled ticket, including stale ones, so tests can observe
/// that a stale tick fires and does nothing.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    pending: Vec<(Duration, u64, TickTicket)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tickets waiting to fire
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advance virtual time by `by`, firing every ticket that falls due
    ///
    /// Tickets scheduled while firing are honored if they are due within the
    /// same span. Returns the number of tickets fired.
    pub fn advance<S: RenderSink>(
        &mut self,
        by: Duration,
        animator: &mut WindowedSeriesAnimator<S>,
    ) -> usize {
        let target = self.now + by;
        let mut fired = 0;

        while let Some(idx) = self.next_due(target) {
            let (due, _, ticket) = self.pending.remove(idx);
            self.now = due;
            animator.tick(ticket, self);
            fired += 1;
        }

        self.now = target;
        fired
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, (due, _, _))| *due <= target)
            .min_by_key(|(_, (due, seq, _))| (*due, *seq))
            .map(|(idx, _)| idx)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, ticket: TickTicket) {
        self.seq += 1;
        self.pending.push((self.now + delay, self.seq, ticket));
    }
}

/// Single-slot scheduler for a tokio event loop
///
/// Scheduling replaces whatever was pending, so at most one deadline exists.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    slot: Option<(Instant, TickTicket)>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the pending ticket is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.slot.map(|(at, _)| at)
    }

    /// Remove and return the pending ticket
    pub fn take(&mut self) -> Option<TickTicket> {
        self.slot.take().map(|(_, ticket)| ticket)
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule(&mut self, delay: Duration, ticket: TickTicket) {
        self.slot = Some((Instant::now() + delay, ticket));
    }
}
