//! Transaction primitives.
//!
//! A `Transaction` is a single dated income or expense entry attached to a
//! category owned by the same user. Amounts are integer minor units (cents)
//! and always strictly positive; the kind carries the sign.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, EntryKind, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub owner: String,
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub description: String,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        owner: String,
        category_id: Uuid,
        amount_minor: i64,
        description: String,
        date: NaiveDate,
        kind: EntryKind,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        if description.trim().is_empty() {
            return Err(EngineError::InvalidName(
                "description must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            category_id,
            amount_minor,
            description,
            date,
            kind,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub category_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub date: Date,
    pub kind: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            owner: ActiveValue::Set(tx.owner.clone()),
            category_id: ActiveValue::Set(tx.category_id.to_string()),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            description: ActiveValue::Set(tx.description.clone()),
            date: ActiveValue::Set(tx.date),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))?,
            owner: model.owner,
            category_id: Uuid::parse_str(&model.category_id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            amount_minor: model.amount_minor,
            description: model.description,
            date: model.date,
            kind: EntryKind::try_from(model.kind.as_str())?,
            created_at: model.created_at,
        })
    }
}
