use budget_notes_core::{
    Budget, BudgetAggregator, BudgetOverview, BudgetStatus, BudgetTable, BudgetUpdate,
};
use std::cell::RefCell;

fn budget(id: &str, name: &str, status: BudgetStatus) -> Budget {
    Budget {
        id: id.to_string(),
        name: name.to_string(),
        amount: 250.0,
        status,
        category: "household".to_string(),
        last_modified: 1_700_000_000_000,
    }
}

fn ids(budgets: &[Budget]) -> Vec<&str> {
    budgets.iter().map(|budget| budget.id.as_str()).collect()
}

#[test]
fn combined_is_owned_then_shared_with_counts() {
    let mut aggregator = BudgetAggregator::new();
    aggregator.set_owned(vec![budget("1", "Zoo", BudgetStatus::Active)]);
    aggregator.set_shared(vec![budget("2", "Apple", BudgetStatus::Draft)]);

    assert_eq!(ids(aggregator.combined()), vec!["1", "2"]);
    assert_eq!(aggregator.total_count(), 2);
    assert_eq!(aggregator.active_count(), 1);
    assert!(!aggregator.is_loading());
}

#[test]
fn either_source_may_arrive_first_or_alone() {
    let mut aggregator = BudgetAggregator::new();
    aggregator.apply(BudgetUpdate::shared(vec![
        budget("s1", "Shared", BudgetStatus::Active),
        budget("s2", "Shared 2", BudgetStatus::Archived),
    ]));
    assert_eq!(ids(aggregator.combined()), vec!["s1", "s2"]);

    aggregator.apply(BudgetUpdate::owned(vec![budget("o1", "Own", BudgetStatus::Active)]));
    assert_eq!(ids(aggregator.combined()), vec!["o1", "s1", "s2"]);
    assert_eq!(aggregator.active_count(), 2);
}

#[test]
fn later_snapshot_replaces_earlier_one() {
    let mut aggregator = BudgetAggregator::new();
    aggregator.set_owned(vec![
        budget("1", "A", BudgetStatus::Active),
        budget("2", "B", BudgetStatus::Active),
    ]);
    aggregator.set_owned(vec![budget("3", "C", BudgetStatus::Draft)]);

    assert_eq!(ids(aggregator.combined()), vec!["3"]);
    assert_eq!(aggregator.total_count(), 1);
    assert_eq!(aggregator.active_count(), 0);
}

#[test]
fn loading_flag_never_returns_after_first_data() {
    let events = RefCell::new(Vec::new());
    let mut aggregator =
        BudgetAggregator::with_observer(|count: usize| events.borrow_mut().push(count));
    assert!(aggregator.is_loading());

    aggregator.set_owned(vec![budget("1", "A", BudgetStatus::Active)]);
    assert!(!aggregator.is_loading());

    aggregator.set_owned(Vec::new());
    aggregator.set_shared(Vec::new());
    assert!(!aggregator.is_loading());
    assert_eq!(aggregator.total_count(), 0);

    aggregator.set_shared(vec![budget("2", "B", BudgetStatus::Draft)]);
    drop(aggregator);
    assert_eq!(events.into_inner(), vec![1]);
}

#[test]
fn zero_budgets_keep_loading_state() {
    let mut aggregator = BudgetAggregator::new();
    aggregator.set_owned(Vec::new());
    aggregator.set_shared(Vec::new());

    assert!(aggregator.is_loading());
    assert_eq!(
        BudgetOverview::from_aggregator(&aggregator),
        BudgetOverview::Loading
    );
}

#[test]
fn table_sorts_rows_by_name() {
    let table = BudgetTable::new(
        &[
            budget("1", "rent", BudgetStatus::Archived),
            budget("2", "Food", BudgetStatus::Active),
            budget("3", "car", BudgetStatus::Draft),
        ],
        false,
    );

    assert_eq!(ids(table.rows()), vec!["3", "2", "1"]);
    assert_eq!(table.placeholder(), None);
}

#[test]
fn table_placeholder_distinguishes_loading_from_empty() {
    assert_eq!(
        BudgetTable::new(&[], true).placeholder(),
        Some("Loading budgets...")
    );
    assert_eq!(
        BudgetTable::new(&[], false).placeholder(),
        Some("No budgets available")
    );
}

#[test]
fn table_footer_reports_counts() {
    assert_eq!(BudgetTable::new(&[], false).footer(), None);

    let drafts = BudgetTable::new(&[budget("1", "A", BudgetStatus::Draft)], false);
    assert_eq!(drafts.footer().as_deref(), Some("Showing 1 budgets"));
    assert!(!drafts.has_active());

    let mixed = BudgetTable::new(
        &[
            budget("1", "A", BudgetStatus::Active),
            budget("2", "B", BudgetStatus::Draft),
            budget("3", "C", BudgetStatus::Active),
        ],
        false,
    );
    assert_eq!(mixed.footer().as_deref(), Some("Showing 3 budgets • 2 active"));
}

#[test]
fn overview_reports_totals_once_loaded() {
    let mut aggregator = BudgetAggregator::new();
    aggregator.set_owned(vec![budget("1", "Zoo", BudgetStatus::Active)]);
    aggregator.set_shared(vec![budget("2", "Apple", BudgetStatus::Draft)]);

    match BudgetOverview::from_aggregator(&aggregator) {
        BudgetOverview::Ready {
            total,
            active,
            table,
        } => {
            assert_eq!(total, 2);
            assert_eq!(active, 1);
            assert_eq!(ids(table.rows()), vec!["2", "1"]);
        }
        BudgetOverview::Loading => panic!("aggregator already has data"),
    }
}
