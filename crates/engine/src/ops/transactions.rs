use base64::Engine as _;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    Condition, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, EntryKind, ResultEngine, Transaction, transactions};

use super::{Engine, normalize_required_text, with_tx};

/// Hard cap (and default) for one page of the transaction list.
pub const TRANSACTIONS_PAGE_MAX: u64 = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TransactionsCursor {
    date: NaiveDate,
    transaction_id: String,
}

impl TransactionsCursor {
    fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))
    }
}

impl Engine {
    /// Creates a transaction after checking that the category belongs to
    /// `owner` and that the transaction kind matches the category kind.
    pub async fn create_transaction(
        &self,
        owner: &str,
        category_id: Uuid,
        amount_minor: i64,
        description: &str,
        date: NaiveDate,
        kind: EntryKind,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let category = self
                .require_category_owned(&db_tx, owner, category_id)
                .await?;
            let category_kind = EntryKind::try_from(category.kind.as_str())?;
            if category_kind != kind {
                return Err(EngineError::KindMismatch(format!(
                    "transaction kind {} does not match category kind {}",
                    kind.as_str(),
                    category_kind.as_str()
                )));
            }

            let description = normalize_required_text(description, "description")?;
            let tx = Transaction::new(
                owner.to_string(),
                category_id,
                amount_minor,
                description,
                date,
                kind,
                Utc::now(),
            )?;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            Ok(tx)
        })
    }

    /// Lists the owner's transactions, newest first, with cursor-based
    /// pagination.
    ///
    /// Pagination is newest → older by `(date DESC, id DESC)`. `limit` is
    /// clamped to [`TRANSACTIONS_PAGE_MAX`].
    pub async fn list_transactions(
        &self,
        owner: &str,
        limit: u64,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Transaction>, Option<String>)> {
        let limit = limit.clamp(1, TRANSACTIONS_PAGE_MAX);
        let limit_plus_one = limit.saturating_add(1);
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::Owner.eq(owner.to_string()))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .limit(limit_plus_one);

        if let Some(cursor) = cursor {
            let cursor = TransactionsCursor::decode(cursor)?;
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::Date.lt(cursor.date))
                    .add(
                        Condition::all()
                            .add(transactions::Column::Date.eq(cursor.date))
                            .add(transactions::Column::Id.lt(cursor.transaction_id)),
                    ),
            );
        }

        let rows: Vec<transactions::Model> = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out: Vec<Transaction> = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(Transaction::try_from(model)?);
        }

        let next_cursor = out.last().map(|tx| TransactionsCursor {
            date: tx.date,
            transaction_id: tx.id.to_string(),
        });
        let next_cursor = if has_more {
            next_cursor.map(|c| c.encode()).transpose()?
        } else {
            None
        };

        Ok((out, next_cursor))
    }

    /// Deletes a transaction by id.
    pub async fn delete_transaction(&self, owner: &str, transaction_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_transaction_owned(&db_tx, owner, transaction_id)
                .await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
