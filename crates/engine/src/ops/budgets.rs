use chrono::{NaiveDate, Utc};
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Budget, EngineError, EntryKind, ResultEngine, budgets};

use super::{Engine, with_tx};

impl Engine {
    /// Creates a monthly budget for an expense category.
    ///
    /// `month` may be any day of the target month; it is stored as the
    /// first. A second budget for the same `(owner, category, month)` is
    /// rejected with [`EngineError::ExistingKey`].
    pub async fn create_budget(
        &self,
        owner: &str,
        category_id: Uuid,
        amount_minor: i64,
        month: NaiveDate,
    ) -> ResultEngine<Budget> {
        with_tx!(self, |db_tx| {
            let category = self
                .require_category_owned(&db_tx, owner, category_id)
                .await?;
            if EntryKind::try_from(category.kind.as_str())? != EntryKind::Expense {
                return Err(EngineError::KindMismatch(
                    "budgets require an expense category".to_string(),
                ));
            }

            let budget = Budget::new(
                owner.to_string(),
                category_id,
                amount_minor,
                month,
                Utc::now(),
            )?;

            // The unique index backs this up; checking here surfaces the
            // duplicate as a domain error instead of a raw DbErr.
            let duplicate = budgets::Entity::find()
                .filter(budgets::Column::Owner.eq(owner.to_string()))
                .filter(budgets::Column::CategoryId.eq(category_id.to_string()))
                .filter(budgets::Column::Month.eq(budget.month))
                .one(&db_tx)
                .await?
                .is_some();
            if duplicate {
                return Err(EngineError::ExistingKey(format!(
                    "budget for category '{}' in {}",
                    category.name,
                    budget.month.format("%Y-%m")
                )));
            }

            budgets::ActiveModel::from(&budget).insert(&db_tx).await?;
            Ok(budget)
        })
    }

    /// Lists the owner's budgets, most recent month first.
    pub async fn list_budgets(&self, owner: &str) -> ResultEngine<Vec<Budget>> {
        let models: Vec<budgets::Model> = budgets::Entity::find()
            .filter(budgets::Column::Owner.eq(owner.to_string()))
            .order_by_desc(budgets::Column::Month)
            .all(&self.database)
            .await?;
        models.into_iter().map(Budget::try_from).collect()
    }

    /// Deletes a budget by id.
    pub async fn delete_budget(&self, owner: &str, budget_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_budget_owned(&db_tx, owner, budget_id).await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
