use chrono::NaiveDate;

use crate::{Budget, ResultEngine, stats};

use super::{Engine, transactions::TRANSACTIONS_PAGE_MAX};

/// Dashboard payload derived from one concurrent load of the owner's data.
#[derive(Clone, Debug)]
pub struct Overview {
    pub totals: stats::Totals,
    pub balance_minor: i64,
    pub month_breakdown: Vec<stats::CategorySpend>,
    pub week: stats::WeeklyActivity,
    pub budgets: Vec<(Budget, stats::BudgetUsage)>,
}

impl Engine {
    /// Loads categories, transactions and budgets concurrently, waits for
    /// all three, and derives the dashboard views for `today`.
    ///
    /// Derivations run over the most recent page of transactions, the same
    /// set a client rendering the dashboard would have loaded.
    pub async fn overview(&self, owner: &str, today: NaiveDate) -> ResultEngine<Overview> {
        let (categories, (transactions, _), budgets) = tokio::try_join!(
            self.list_categories(owner),
            self.list_transactions(owner, TRANSACTIONS_PAGE_MAX, None),
            self.list_budgets(owner),
        )?;

        let totals = stats::totals(&transactions);
        let month_breakdown = stats::month_breakdown(&transactions, &categories, today);
        let week = stats::weekly_activity(&transactions, today);
        let budgets = budgets
            .into_iter()
            .map(|budget| {
                let usage = stats::budget_usage(&budget, &transactions);
                (budget, usage)
            })
            .collect();

        Ok(Overview {
            balance_minor: totals.balance_minor(),
            totals,
            month_breakdown,
            week,
            budgets,
        })
    }
}
