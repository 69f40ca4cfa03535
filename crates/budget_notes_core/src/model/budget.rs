//! Budget read model.
//!
//! Budgets are owned by an external budget-management subsystem. Core only
//! checks that one exists (before attaching a note) or aggregates them for
//! display.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lifecycle state of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Active,
    Archived,
    Draft,
}

impl BudgetStatus {
    /// Stable lowercase label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Draft => "draft",
        }
    }
}

impl Display for BudgetStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget document as stored in the `budgets` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    /// Currency amount. Non-negative by convention, not enforced here.
    pub amount: f64,
    pub status: BudgetStatus,
    pub category: String,
    /// Unix epoch milliseconds.
    pub last_modified: i64,
}

impl Budget {
    /// Returns whether this budget counts towards "active" totals.
    pub fn is_active(&self) -> bool {
        self.status == BudgetStatus::Active
    }
}
