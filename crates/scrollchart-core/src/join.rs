//! Identity matching between consecutive windows
//!
//! Rows are keyed by month. A key present in both windows is the same visual
//! element and animates to its new place; keys only in the new window are
//! created; keys only in the old window are removed.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::series::Observation;

/// Enter/update/exit partition of two windows by month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedJoin {
    /// Keys only in the new window, in new-window order
    pub enter: Vec<NaiveDate>,
    /// Keys in both windows, in new-window order
    pub update: Vec<NaiveDate>,
    /// Keys only in the previous window, in previous-window order
    pub exit: Vec<NaiveDate>,
}

impl KeyedJoin {
    pub fn between(previous: &[Observation], next: &[Observation]) -> Self {
        let prev_keys: HashSet<NaiveDate> = previous.iter().map(|o| o.month).collect();
        let next_keys: HashSet<NaiveDate> = next.iter().map(|o| o.month).collect();

        let mut join = Self::default();
        for obs in next {
            if prev_keys.contains(&obs.month) {
                join.update.push(obs.month);
            } else {
                join.enter.push(obs.month);
            }
        }
        join.exit = previous
            .iter()
            .map(|o| o.month)
            .filter(|m| !next_keys.contains(m))
            .collect();
        join
    }

    /// True when nothing is created or removed
    pub fn is_stable(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}
