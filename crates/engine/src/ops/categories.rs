use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Category, EntryKind, ResultEngine, budgets, categories, transactions};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Creates a category owned by `owner`.
    pub async fn create_category(
        &self,
        owner: &str,
        name: &str,
        kind: EntryKind,
        color: &str,
        icon: &str,
    ) -> ResultEngine<Category> {
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, owner).await?;
            let name = normalize_required_text(name, "category name")?;
            let category = Category::new(
                owner.to_string(),
                name,
                kind,
                color.trim().to_string(),
                icon.trim().to_string(),
                Utc::now(),
            )?;
            categories::ActiveModel::from(&category).insert(&db_tx).await?;
            Ok(category)
        })
    }

    /// Lists the owner's categories, name ascending.
    pub async fn list_categories(&self, owner: &str) -> ResultEngine<Vec<Category>> {
        let models: Vec<categories::Model> = categories::Entity::find()
            .filter(categories::Column::Owner.eq(owner.to_string()))
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Category::try_from).collect()
    }

    /// Deletes a category and, in the same DB transaction, every
    /// transaction and budget that references it.
    pub async fn delete_category(&self, owner: &str, category_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_category_owned(&db_tx, owner, category_id)
                .await?;

            transactions::Entity::delete_many()
                .filter(transactions::Column::CategoryId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            budgets::Entity::delete_many()
                .filter(budgets::Column::CategoryId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
