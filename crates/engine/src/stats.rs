//! Pure aggregation over already-loaded collections.
//!
//! These functions derive the dashboard views (balance, month-to-date
//! breakdown, trailing activity window, budget utilization) from slices the
//! caller has already fetched. They are total over well-formed input: no
//! database access, no panics, and empty input yields zero totals and empty
//! lists.

use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Budget, Category, EntryKind, Transaction};

/// Number of categories kept in the month-to-date breakdown.
pub const TOP_CATEGORIES: usize = 5;

/// Number of days in the trailing activity window.
pub const ACTIVITY_DAYS: u64 = 7;

/// Scale floor (minor units) for the activity bars. Keeps the bar-width
/// division away from zero when the whole window is empty.
pub const ACTIVITY_SCALE_FLOOR_MINOR: i64 = 100;

/// Inclusive `[start, end]` calendar range of one month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The calendar month containing `reference`.
pub fn month_range(reference: NaiveDate) -> MonthRange {
    let start = reference.with_day(1).unwrap_or(reference);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(reference);
    MonthRange { start, end }
}

/// Income and expense sums over a full loaded transaction set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income_minor: i64,
    pub expenses_minor: i64,
}

impl Totals {
    /// May be negative; the sign gets no special handling.
    pub fn balance_minor(&self) -> i64 {
        self.income_minor - self.expenses_minor
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    transactions.iter().fold(Totals::default(), |mut acc, tx| {
        match tx.kind {
            EntryKind::Income => acc.income_minor += tx.amount_minor,
            EntryKind::Expense => acc.expenses_minor += tx.amount_minor,
        }
        acc
    })
}

/// One category's month-to-date expense share.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySpend {
    pub category_id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub amount_minor: i64,
    /// Share of the month's total expenses. 0 when the month has no
    /// expenses, so the value is never NaN.
    pub percentage: f64,
}

/// Top expense categories for the month containing `reference`.
///
/// Only categories with a non-zero sum appear, sorted by sum descending
/// (name ascending on ties) and truncated to [`TOP_CATEGORIES`].
pub fn month_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
    reference: NaiveDate,
) -> Vec<CategorySpend> {
    let range = month_range(reference);
    let mut total_minor = 0i64;
    let mut by_category: HashMap<Uuid, i64> = HashMap::new();
    for tx in transactions {
        if tx.kind != EntryKind::Expense || !range.contains(tx.date) {
            continue;
        }
        total_minor += tx.amount_minor;
        *by_category.entry(tx.category_id).or_insert(0) += tx.amount_minor;
    }

    let mut breakdown: Vec<CategorySpend> = categories
        .iter()
        .filter_map(|category| {
            let amount_minor = by_category.get(&category.id).copied().unwrap_or(0);
            if amount_minor <= 0 {
                return None;
            }
            let percentage = if total_minor == 0 {
                0.0
            } else {
                amount_minor as f64 / total_minor as f64 * 100.0
            };
            Some(CategorySpend {
                category_id: category.id,
                name: category.name.clone(),
                color: category.color.clone(),
                icon: category.icon.clone(),
                amount_minor,
                percentage,
            })
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount_minor
            .cmp(&a.amount_minor)
            .then_with(|| a.name.cmp(&b.name))
    });
    breakdown.truncate(TOP_CATEGORIES);
    breakdown
}

/// Expense/income sums for one calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub expenses_minor: i64,
    pub income_minor: i64,
}

/// The trailing [`ACTIVITY_DAYS`] days of activity, oldest first, ending on
/// the reference day.
#[derive(Clone, Debug, PartialEq)]
pub struct WeeklyActivity {
    pub days: Vec<DayActivity>,
    /// Largest single-day sum across both kinds, floored at
    /// [`ACTIVITY_SCALE_FLOOR_MINOR`].
    pub max_amount_minor: i64,
}

pub fn weekly_activity(transactions: &[Transaction], today: NaiveDate) -> WeeklyActivity {
    let mut by_day: HashMap<NaiveDate, (i64, i64)> = HashMap::new();
    for tx in transactions {
        let entry = by_day.entry(tx.date).or_insert((0, 0));
        match tx.kind {
            EntryKind::Expense => entry.0 += tx.amount_minor,
            EntryKind::Income => entry.1 += tx.amount_minor,
        }
    }

    let days: Vec<DayActivity> = (0..ACTIVITY_DAYS)
        .rev()
        .map(|offset| {
            let date = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
            let (expenses_minor, income_minor) = by_day.get(&date).copied().unwrap_or((0, 0));
            DayActivity {
                date,
                expenses_minor,
                income_minor,
            }
        })
        .collect();

    let max_amount_minor = days
        .iter()
        .flat_map(|day| [day.expenses_minor, day.income_minor])
        .max()
        .unwrap_or(0)
        .max(ACTIVITY_SCALE_FLOOR_MINOR);

    WeeklyActivity {
        days,
        max_amount_minor,
    }
}

/// Spent-vs-limit for one budget over its month.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BudgetUsage {
    pub spent_minor: i64,
    /// Unclamped share of the limit; drives overage detection.
    pub percentage: f64,
    /// Clamped to 100 for display widths.
    pub display_percentage: f64,
    pub is_over_budget: bool,
    /// `spent - amount` when over budget, 0 otherwise.
    pub overage_minor: i64,
}

pub fn budget_usage(budget: &Budget, transactions: &[Transaction]) -> BudgetUsage {
    let range = month_range(budget.month);
    let spent_minor: i64 = transactions
        .iter()
        .filter(|tx| {
            tx.kind == EntryKind::Expense
                && tx.category_id == budget.category_id
                && range.contains(tx.date)
        })
        .map(|tx| tx.amount_minor)
        .sum();

    let percentage = if budget.amount_minor == 0 {
        0.0
    } else {
        spent_minor as f64 / budget.amount_minor as f64 * 100.0
    };
    let is_over_budget = spent_minor > budget.amount_minor;

    BudgetUsage {
        spent_minor,
        percentage,
        display_percentage: percentage.min(100.0),
        is_over_budget,
        overage_minor: (spent_minor - budget.amount_minor).max(0),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn category(name: &str, kind: EntryKind) -> Category {
        Category::new(
            "alice".to_string(),
            name.to_string(),
            kind,
            "#22c55e".to_string(),
            "tag".to_string(),
            Utc::now(),
        )
        .unwrap()
    }

    fn tx(category: &Category, amount_minor: i64, date: NaiveDate) -> Transaction {
        Transaction::new(
            "alice".to_string(),
            category.id,
            amount_minor,
            format!("{} entry", category.name),
            date,
            category.kind,
            Utc::now(),
        )
        .unwrap()
    }

    fn budget(category: &Category, amount_minor: i64, month: NaiveDate) -> Budget {
        Budget::new(
            "alice".to_string(),
            category.id,
            amount_minor,
            month,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn month_range_spans_the_calendar_month() {
        let range = month_range(date(2024, 1, 15));
        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 31));

        let leap = month_range(date(2024, 2, 10));
        assert_eq!(leap.end, date(2024, 2, 29));

        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let food = category("Food", EntryKind::Expense);
        let salary = category("Salary", EntryKind::Income);
        let txs = vec![
            tx(&food, 5000, date(2024, 1, 5)),
            tx(&salary, 20000, date(2024, 1, 10)),
            tx(&food, 3000, date(2024, 1, 5)),
        ];

        let totals = totals(&txs);
        assert_eq!(totals.income_minor, 20000);
        assert_eq!(totals.expenses_minor, 8000);
        assert_eq!(totals.balance_minor(), 12000);
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        let totals = totals(&[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.balance_minor(), 0);
    }

    #[test]
    fn balance_may_be_negative() {
        let food = category("Food", EntryKind::Expense);
        let txs = vec![tx(&food, 5000, date(2024, 1, 5))];
        assert_eq!(totals(&txs).balance_minor(), -5000);
    }

    #[test]
    fn month_breakdown_single_category_is_full_share() {
        let food = category("Food", EntryKind::Expense);
        let salary = category("Salary", EntryKind::Income);
        let txs = vec![
            tx(&food, 5000, date(2024, 1, 5)),
            tx(&salary, 20000, date(2024, 1, 10)),
            tx(&food, 3000, date(2024, 1, 5)),
        ];
        let categories = vec![food.clone(), salary];

        let breakdown = month_breakdown(&txs, &categories, date(2024, 1, 20));
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].category_id, food.id);
        assert_eq!(breakdown[0].amount_minor, 8000);
        assert_eq!(breakdown[0].percentage, 100.0);
    }

    #[test]
    fn month_breakdown_ignores_other_months() {
        let food = category("Food", EntryKind::Expense);
        let txs = vec![
            tx(&food, 5000, date(2024, 1, 5)),
            tx(&food, 9000, date(2024, 2, 1)),
            tx(&food, 9000, date(2023, 12, 31)),
        ];
        let categories = vec![food.clone()];

        let breakdown = month_breakdown(&txs, &categories, date(2024, 1, 20));
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].amount_minor, 5000);
    }

    #[test]
    fn month_breakdown_empty_month_is_empty_not_nan() {
        let food = category("Food", EntryKind::Expense);
        let breakdown = month_breakdown(&[], &[food], date(2024, 1, 20));
        assert!(breakdown.is_empty());
    }

    #[test]
    fn month_breakdown_keeps_top_five_sorted_descending() {
        let categories: Vec<Category> = (0..6)
            .map(|i| category(&format!("Cat{i}"), EntryKind::Expense))
            .collect();
        let txs: Vec<Transaction> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| tx(c, 1000 * (i as i64 + 1), date(2024, 1, 10)))
            .collect();

        let breakdown = month_breakdown(&txs, &categories, date(2024, 1, 10));
        assert_eq!(breakdown.len(), TOP_CATEGORIES);
        assert_eq!(breakdown[0].amount_minor, 6000);
        for pair in breakdown.windows(2) {
            assert!(pair[0].amount_minor > pair[1].amount_minor);
        }
        // The smallest category fell off the list.
        assert!(breakdown.iter().all(|entry| entry.amount_minor > 1000));
    }

    #[test]
    fn month_breakdown_share_never_exceeds_total() {
        let food = category("Food", EntryKind::Expense);
        let travel = category("Travel", EntryKind::Expense);
        let txs = vec![
            tx(&food, 3000, date(2024, 1, 5)),
            tx(&travel, 1000, date(2024, 1, 6)),
        ];
        let categories = vec![food, travel];

        let breakdown = month_breakdown(&txs, &categories, date(2024, 1, 20));
        let sum: i64 = breakdown.iter().map(|entry| entry.amount_minor).sum();
        assert_eq!(sum, 4000);
        assert_eq!(breakdown[0].percentage, 75.0);
        assert_eq!(breakdown[1].percentage, 25.0);
    }

    #[test]
    fn weekly_activity_has_seven_days_ending_today() {
        let today = date(2024, 1, 10);
        let week = weekly_activity(&[], today);
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].date, date(2024, 1, 4));
        assert_eq!(week.days[6].date, today);
        for pair in week.days.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        // Empty window still scales by the floor.
        assert_eq!(week.max_amount_minor, ACTIVITY_SCALE_FLOOR_MINOR);
    }

    #[test]
    fn weekly_activity_sums_per_day_and_scales_by_max() {
        let food = category("Food", EntryKind::Expense);
        let salary = category("Salary", EntryKind::Income);
        let today = date(2024, 1, 10);
        let txs = vec![
            tx(&food, 700, date(2024, 1, 9)),
            tx(&food, 300, date(2024, 1, 9)),
            tx(&salary, 2500, date(2024, 1, 10)),
            // Outside the window; ignored.
            tx(&food, 99999, date(2024, 1, 3)),
        ];

        let week = weekly_activity(&txs, today);
        assert_eq!(week.days[5].expenses_minor, 1000);
        assert_eq!(week.days[5].income_minor, 0);
        assert_eq!(week.days[6].income_minor, 2500);
        assert_eq!(week.max_amount_minor, 2500);
    }

    #[test]
    fn budget_usage_under_budget() {
        let food = category("Food", EntryKind::Expense);
        let txs = vec![
            tx(&food, 5000, date(2024, 1, 5)),
            tx(&food, 3000, date(2024, 1, 5)),
        ];
        let budget = budget(&food, 10000, date(2024, 1, 1));

        let usage = budget_usage(&budget, &txs);
        assert_eq!(usage.spent_minor, 8000);
        assert_eq!(usage.percentage, 80.0);
        assert_eq!(usage.display_percentage, 80.0);
        assert!(!usage.is_over_budget);
        assert_eq!(usage.overage_minor, 0);
    }

    #[test]
    fn budget_usage_over_budget() {
        let food = category("Food", EntryKind::Expense);
        let txs = vec![
            tx(&food, 5000, date(2024, 1, 5)),
            tx(&food, 3000, date(2024, 1, 5)),
        ];
        let budget = budget(&food, 5000, date(2024, 1, 1));

        let usage = budget_usage(&budget, &txs);
        assert_eq!(usage.spent_minor, 8000);
        assert!(usage.is_over_budget);
        assert_eq!(usage.overage_minor, 3000);
        assert_eq!(usage.spent_minor - budget.amount_minor, usage.overage_minor);
        assert_eq!(usage.percentage, 160.0);
        assert_eq!(usage.display_percentage, 100.0);
    }

    #[test]
    fn budget_usage_ignores_other_categories_and_months() {
        let food = category("Food", EntryKind::Expense);
        let travel = category("Travel", EntryKind::Expense);
        let txs = vec![
            tx(&food, 5000, date(2024, 1, 5)),
            tx(&travel, 4000, date(2024, 1, 5)),
            tx(&food, 4000, date(2024, 2, 5)),
        ];
        let budget = budget(&food, 10000, date(2024, 1, 15));

        let usage = budget_usage(&budget, &txs);
        assert_eq!(usage.spent_minor, 5000);
        assert!(!usage.is_over_budget);
    }
}
