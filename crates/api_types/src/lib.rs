use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of money movement, shared by categories and transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Expense,
    Income,
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
        pub kind: EntryKind,
        /// Display hex, e.g. `#22c55e`.
        pub color: String,
        /// Display tag, e.g. `cart`.
        pub icon: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub kind: EntryKind,
        pub color: String,
        pub icon: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreate {
        pub category_id: Uuid,
        /// Amount in minor units (cents). Must be > 0.
        pub amount_minor: i64,
        pub description: String,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: NaiveDate,
        pub kind: EntryKind,
    }

    /// Query string for the transaction list.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionListQuery {
        /// Page size; capped server-side at 100.
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        ///
        /// Newest → older pagination.
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub category_id: Uuid,
        pub amount_minor: i64,
        pub description: String,
        pub date: NaiveDate,
        pub kind: EntryKind,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
        /// Opaque cursor for fetching the next page (older items).
        pub next_cursor: Option<String>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCreate {
        pub category_id: Uuid,
        /// Ceiling in minor units (cents). Must be > 0.
        pub amount_minor: i64,
        /// Any day of the target month; stored as the first.
        pub month: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub category_id: Uuid,
        pub amount_minor: i64,
        /// First day of the budgeted month.
        pub month: NaiveDate,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListResponse {
        pub budgets: Vec<BudgetView>,
    }
}

pub mod overview {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySpendView {
        pub category_id: Uuid,
        pub name: String,
        pub color: String,
        pub icon: String,
        pub amount_minor: i64,
        /// Share of the month's total expenses; 0 when the month is empty.
        pub percentage: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DayActivityView {
        pub date: NaiveDate,
        pub expenses_minor: i64,
        pub income_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeeklyActivityView {
        /// Exactly seven entries, oldest first, ending today.
        pub days: Vec<DayActivityView>,
        /// Bar-scale value: largest single-day sum, floored server-side.
        pub max_amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUsageView {
        pub budget: super::budget::BudgetView,
        pub spent_minor: i64,
        pub percentage: f64,
        /// Clamped to 100 for display widths.
        pub display_percentage: f64,
        pub is_over_budget: bool,
        pub overage_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Overview {
        pub balance_minor: i64,
        pub total_income_minor: i64,
        pub total_expenses_minor: i64,
        pub month_breakdown: Vec<CategorySpendView>,
        pub week: WeeklyActivityView,
        pub budgets: Vec<BudgetUsageView>,
    }
}
