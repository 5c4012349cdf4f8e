//! Dashboard endpoint.
//!
//! One authenticated call returns everything the dashboard renders:
//! balance, month-to-date breakdown, the trailing week and per-budget
//! utilization, all derived from a single concurrent load.

use api_types::overview::{
    BudgetUsageView, CategorySpendView, DayActivityView, Overview, WeeklyActivityView,
};
use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::{ServerError, budgets::map_budget, server::ServerState, user};

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Overview>, ServerError> {
    let overview = state
        .engine
        .overview(&user.username, Utc::now().date_naive())
        .await?;

    let month_breakdown = overview
        .month_breakdown
        .into_iter()
        .map(|entry| CategorySpendView {
            category_id: entry.category_id,
            name: entry.name,
            color: entry.color,
            icon: entry.icon,
            amount_minor: entry.amount_minor,
            percentage: entry.percentage,
        })
        .collect();

    let week = WeeklyActivityView {
        days: overview
            .week
            .days
            .into_iter()
            .map(|day| DayActivityView {
                date: day.date,
                expenses_minor: day.expenses_minor,
                income_minor: day.income_minor,
            })
            .collect(),
        max_amount_minor: overview.week.max_amount_minor,
    };

    let budgets = overview
        .budgets
        .into_iter()
        .map(|(budget, usage)| BudgetUsageView {
            budget: map_budget(budget),
            spent_minor: usage.spent_minor,
            percentage: usage.percentage,
            display_percentage: usage.display_percentage,
            is_over_budget: usage.is_over_budget,
            overage_minor: usage.overage_minor,
        })
        .collect();

    Ok(Json(Overview {
        balance_minor: overview.balance_minor,
        total_income_minor: overview.totals.income_minor,
        total_expenses_minor: overview.totals.expenses_minor,
        month_breakdown,
        week,
        budgets,
    }))
}
