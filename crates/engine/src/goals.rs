//! Savings goals: a target amount the user funds through contributions.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub target: Amount,
    pub current: Amount,
    pub deadline: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    pub fn new(
        owner: String,
        name: String,
        target: Amount,
        current: Amount,
        deadline: Option<NaiveDate>,
        category: Option<String>,
        description: Option<String>,
    ) -> ResultEngine<Self> {
        if name.trim().is_empty() {
            return Err(EngineError::Validation(
                "name must not be empty".to_string(),
            ));
        }
        if !target.is_positive() {
            return Err(EngineError::Validation(
                "targetAmount must be a positive number".to_string(),
            ));
        }
        if current.cents() < 0 {
            return Err(EngineError::Validation(
                "currentAmount must not be negative".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            name,
            target,
            current,
            deadline,
            category,
            description,
            is_completed: current >= target,
            created_at: Utc::now(),
        })
    }
}

/// Optional-field update: only the provided fields change.
#[derive(Clone, Debug, Default)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target: Option<Amount>,
    pub current: Option<Amount>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings_goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub deadline: Option<Date>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SavingsGoal> for ActiveModel {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.to_string()),
            owner: ActiveValue::Set(goal.owner.clone()),
            name: ActiveValue::Set(goal.name.clone()),
            target_minor: ActiveValue::Set(goal.target.cents()),
            current_minor: ActiveValue::Set(goal.current.cents()),
            deadline: ActiveValue::Set(goal.deadline),
            category: ActiveValue::Set(goal.category.clone()),
            description: ActiveValue::Set(goal.description.clone()),
            is_completed: ActiveValue::Set(goal.is_completed),
            created_at: ActiveValue::Set(goal.created_at),
        }
    }
}

impl TryFrom<Model> for SavingsGoal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("savings goal".to_string()))?,
            owner: model.owner,
            name: model.name,
            target: Amount::new(model.target_minor),
            current: Amount::new(model.current_minor),
            deadline: model.deadline,
            category: model.category,
            description: model.description,
            is_completed: model.is_completed,
            created_at: model.created_at,
        })
    }
}
