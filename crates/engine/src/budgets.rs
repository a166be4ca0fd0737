//! Budget records: a per-category spending limit over a recurring window.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, Category, EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
}

impl BudgetPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl TryFrom<&str> for BudgetPeriod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(EngineError::Validation(format!(
                "invalid budget period: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub owner: String,
    pub category: Category,
    pub limit: Amount,
    pub period: BudgetPeriod,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        owner: String,
        category: Category,
        limit: Amount,
        period: BudgetPeriod,
    ) -> ResultEngine<Self> {
        if !limit.is_positive() {
            return Err(EngineError::Validation(
                "limit must be a positive number".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            category,
            limit,
            period,
            created_at: Utc::now(),
        })
    }
}

/// Optional-field update: only the provided fields change.
#[derive(Clone, Debug, Default)]
pub struct BudgetPatch {
    pub category: Option<Category>,
    pub limit: Option<Amount>,
    pub period: Option<BudgetPeriod>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub category: String,
    pub limit_minor: i64,
    pub period: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            owner: ActiveValue::Set(budget.owner.clone()),
            category: ActiveValue::Set(budget.category.as_str().to_string()),
            limit_minor: ActiveValue::Set(budget.limit.cents()),
            period: ActiveValue::Set(budget.period.as_str().to_string()),
            created_at: ActiveValue::Set(budget.created_at),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("budget".to_string()))?,
            owner: model.owner,
            category: Category::try_from(model.category.as_str())?,
            limit: Amount::new(model.limit_minor),
            period: BudgetPeriod::try_from(model.period.as_str())?,
            created_at: model.created_at,
        })
    }
}
