//! Combined "all budgets" view over owned and shared sources.
//!
//! # Invariants
//! - `combined()` is always owned-then-shared, unsorted.
//! - `total_count() == owned.len() + shared.len()` at every observation.
//! - Loading starts `true`, flips to `false` the first time the combined view
//!   is non-empty and never flips back.
//! - The loaded observer fires at most once.
//!
//! A user with zero budgets stays in the loading state forever; the table
//! placeholder cannot distinguish that from a slow source.

use crate::model::budget::Budget;
use log::info;
use std::sync::mpsc::Receiver;

/// Upstream source of budget snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetSource {
    /// Budgets the user owns (overview feed).
    Owned,
    /// Budgets shared with the user.
    Shared,
}

/// Latest snapshot emitted by one source.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUpdate {
    pub source: BudgetSource,
    pub budgets: Vec<Budget>,
}

impl BudgetUpdate {
    pub fn owned(budgets: Vec<Budget>) -> Self {
        Self {
            source: BudgetSource::Owned,
            budgets,
        }
    }

    pub fn shared(budgets: Vec<Budget>) -> Self {
        Self {
            source: BudgetSource::Shared,
            budgets,
        }
    }
}

/// Receives the one-shot "budgets loaded" notification.
pub trait LoadObserver {
    fn budgets_loaded(&self, count: usize);
}

impl<F: Fn(usize)> LoadObserver for F {
    fn budgets_loaded(&self, count: usize) {
        self(count)
    }
}

/// Emits the loaded notification as a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLoadObserver;

impl LoadObserver for LogLoadObserver {
    fn budgets_loaded(&self, count: usize) {
        info!("event=budgets_loaded module=aggregator status=ok count={count}");
    }
}

/// Re-derives the combined view whenever either source updates.
pub struct BudgetAggregator<O: LoadObserver = LogLoadObserver> {
    owned: Vec<Budget>,
    shared: Vec<Budget>,
    combined: Vec<Budget>,
    is_loading: bool,
    observer: O,
}

impl BudgetAggregator<LogLoadObserver> {
    pub fn new() -> Self {
        Self::with_observer(LogLoadObserver)
    }
}

impl Default for BudgetAggregator<LogLoadObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: LoadObserver> BudgetAggregator<O> {
    /// Both sources start empty, as if neither has emitted yet.
    pub fn with_observer(observer: O) -> Self {
        Self {
            owned: Vec::new(),
            shared: Vec::new(),
            combined: Vec::new(),
            is_loading: true,
            observer,
        }
    }

    /// Replaces the owned snapshot and recomputes.
    pub fn set_owned(&mut self, budgets: Vec<Budget>) {
        self.owned = budgets;
        self.recompute();
    }

    /// Replaces the shared snapshot and recomputes.
    pub fn set_shared(&mut self, budgets: Vec<Budget>) {
        self.shared = budgets;
        self.recompute();
    }

    /// Applies one source update; sources may arrive in any order.
    pub fn apply(&mut self, update: BudgetUpdate) {
        match update.source {
            BudgetSource::Owned => self.set_owned(update.budgets),
            BudgetSource::Shared => self.set_shared(update.budgets),
        }
    }

    /// Applies every update currently queued on `updates`, in arrival order.
    ///
    /// Never blocks. Returns the number of updates applied.
    pub fn drain(&mut self, updates: &Receiver<BudgetUpdate>) -> usize {
        let mut applied = 0;
        while let Ok(update) = updates.try_recv() {
            self.apply(update);
            applied += 1;
        }
        applied
    }

    pub fn combined(&self) -> &[Budget] {
        &self.combined
    }

    pub fn total_count(&self) -> usize {
        self.combined.len()
    }

    pub fn active_count(&self) -> usize {
        self.combined.iter().filter(|budget| budget.is_active()).count()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn recompute(&mut self) {
        self.combined = self
            .owned
            .iter()
            .chain(self.shared.iter())
            .cloned()
            .collect();

        if self.is_loading && !self.combined.is_empty() {
            self.is_loading = false;
            self.observer.budgets_loaded(self.combined.len());
        }
    }
}
