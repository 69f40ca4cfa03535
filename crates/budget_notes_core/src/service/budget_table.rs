//! Presentation-ready projections of the combined budget view.
//!
//! Sorting and placeholder text live here, downstream of the aggregator.

use crate::model::budget::Budget;
use crate::service::budget_aggregator::{BudgetAggregator, LoadObserver};
use std::cmp::Ordering;

pub const LOADING_PLACEHOLDER: &str = "Loading budgets...";
pub const EMPTY_PLACEHOLDER: &str = "No budgets available";

/// Budget rows sorted by name, plus the loading flag that drives placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTable {
    rows: Vec<Budget>,
    is_loading: bool,
}

impl BudgetTable {
    /// Sorts rows by name ascending; ties keep their input order.
    pub fn new(budgets: &[Budget], is_loading: bool) -> Self {
        let mut rows = budgets.to_vec();
        rows.sort_by(|a, b| compare_names(&a.name, &b.name));
        Self { rows, is_loading }
    }

    pub fn rows(&self) -> &[Budget] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_active(&self) -> bool {
        self.rows.iter().any(Budget::is_active)
    }

    pub fn active_count(&self) -> usize {
        self.rows.iter().filter(|budget| budget.is_active()).count()
    }

    /// Text shown in place of rows, or `None` when rows exist.
    pub fn placeholder(&self) -> Option<&'static str> {
        if !self.rows.is_empty() {
            return None;
        }
        if self.is_loading {
            Some(LOADING_PLACEHOLDER)
        } else {
            Some(EMPTY_PLACEHOLDER)
        }
    }

    /// Footer summary, e.g. `Showing 3 budgets • 2 active`.
    pub fn footer(&self) -> Option<String> {
        if self.rows.is_empty() {
            return None;
        }
        let mut footer = format!("Showing {} budgets", self.rows.len());
        if self.has_active() {
            footer.push_str(&format!(" • {} active", self.active_count()));
        }
        Some(footer)
    }
}

/// Page-level state for the budget overview screen.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetOverview {
    Loading,
    Ready {
        total: usize,
        active: usize,
        table: BudgetTable,
    },
}

impl BudgetOverview {
    pub fn from_aggregator<O: LoadObserver>(aggregator: &BudgetAggregator<O>) -> Self {
        if aggregator.is_loading() {
            return Self::Loading;
        }
        Self::Ready {
            total: aggregator.total_count(),
            active: aggregator.active_count(),
            table: BudgetTable::new(aggregator.combined(), false),
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::compare_names;
    use std::cmp::Ordering;

    #[test]
    fn name_order_ignores_case_first() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Apple", "apple"), Ordering::Less);
        assert_eq!(compare_names("rent", "rent"), Ordering::Equal);
    }
}
