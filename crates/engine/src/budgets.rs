//! Budget primitives.
//!
//! A `Budget` is a monthly spending ceiling for one expense category. The
//! month is always stored as the first day of the calendar month, and at
//! most one budget exists per `(owner, category, month)`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub owner: String,
    pub category_id: Uuid,
    pub amount_minor: i64,
    /// First day of the budgeted month.
    pub month: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// `month` may be any day of the target month; it is normalized to the
    /// first.
    pub fn new(
        owner: String,
        category_id: Uuid,
        amount_minor: i64,
        month: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        let month = month
            .with_day(1)
            .ok_or_else(|| EngineError::InvalidDate("invalid month date".to_string()))?;
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            category_id,
            amount_minor,
            month,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub category_id: String,
    pub amount_minor: i64,
    pub month: Date,
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

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            owner: ActiveValue::Set(budget.owner.clone()),
            category_id: ActiveValue::Set(budget.category_id.to_string()),
            amount_minor: ActiveValue::Set(budget.amount_minor),
            month: ActiveValue::Set(budget.month),
            created_at: ActiveValue::Set(budget.created_at),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
            owner: model.owner,
            category_id: Uuid::parse_str(&model.category_id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            amount_minor: model.amount_minor,
            month: model.month,
            created_at: model.created_at,
        })
    }
}
