use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, budgets, categories, transactions, users};

use super::Engine;

/// Generates a lookup that resolves `id` to a row owned by `owner`. Rows
/// owned by anyone else are reported as not found, never as forbidden, so
/// their existence does not leak.
macro_rules! impl_owned_lookup {
    ($require_fn:ident, $module:ident, $err_msg:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            owner: &str,
            id: Uuid,
        ) -> ResultEngine<$module::Model> {
            $module::Entity::find_by_id(id.to_string())
                .filter($module::Column::Owner.eq(owner.to_string()))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_owned_lookup!(require_category_owned, categories, "category not exists");

    impl_owned_lookup!(
        require_transaction_owned,
        transactions,
        "transaction not exists"
    );

    impl_owned_lookup!(require_budget_owned, budgets, "budget not exists");

    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        Ok(())
    }
}
