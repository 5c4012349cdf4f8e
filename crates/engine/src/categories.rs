//! Category primitives.
//!
//! A `Category` is a named grouping for transactions, tagged as expense or
//! income. Budgets may only reference expense categories. Deleting a
//! category takes its transactions and budgets with it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Direction of money movement. Used both for categories and for the
/// transactions inside them; a transaction's kind must match its category's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(EngineError::KindMismatch(format!("invalid kind: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub kind: EntryKind,
    /// Display hex, e.g. `#22c55e`. Not interpreted by the engine.
    pub color: String,
    /// Display tag, e.g. `cart`. Not interpreted by the engine.
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(
        owner: String,
        name: String,
        kind: EntryKind,
        color: String,
        icon: String,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if name.trim().is_empty() {
            return Err(EngineError::InvalidName(
                "category name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            name,
            kind,
            color,
            icon,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub name: String,
    pub kind: String,
    pub color: String,
    pub icon: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    #[sea_orm(has_many = "super::budgets::Entity")]
    Budgets,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id.to_string()),
            owner: ActiveValue::Set(category.owner.clone()),
            name: ActiveValue::Set(category.name.clone()),
            kind: ActiveValue::Set(category.kind.as_str().to_string()),
            color: ActiveValue::Set(category.color.clone()),
            icon: ActiveValue::Set(category.icon.clone()),
            created_at: ActiveValue::Set(category.created_at),
        }
    }
}

impl TryFrom<Model> for Category {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            owner: model.owner,
            name: model.name,
            kind: EntryKind::try_from(model.kind.as_str())?,
            color: model.color,
            icon: model.icon,
            created_at: model.created_at,
        })
    }
}
