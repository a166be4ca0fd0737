//! Alerts raised for the user: budget warnings, goal milestones and
//! recurring-transaction reminders.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    BudgetWarning,
    GoalMilestone,
    UnusualSpending,
    RecurringReminder,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetWarning => "budget_warning",
            Self::GoalMilestone => "goal_milestone",
            Self::UnusualSpending => "unusual_spending",
            Self::RecurringReminder => "recurring_reminder",
        }
    }

    /// Human-readable label shown in alert listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BudgetWarning => "Budget Warning",
            Self::GoalMilestone => "Goal Milestone",
            Self::UnusualSpending => "Unusual Spending",
            Self::RecurringReminder => "Recurring Transaction",
        }
    }
}

impl TryFrom<&str> for AlertKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "budget_warning" => Ok(Self::BudgetWarning),
            "goal_milestone" => Ok(Self::GoalMilestone),
            "unusual_spending" => Ok(Self::UnusualSpending),
            "recurring_reminder" => Ok(Self::RecurringReminder),
            other => Err(EngineError::Validation(format!(
                "unknown alert type {other}"
            ))),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl TryFrom<&str> for AlertSeverity {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, EngineError> {
        match value {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(EngineError::Validation(format!(
                "unknown alert severity {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub owner: String,
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub is_read: bool,
    /// Free-form JSON payload, stored as text.
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        owner: String,
        kind: AlertKind,
        title: String,
        message: String,
        severity: AlertSeverity,
        metadata: Option<String>,
    ) -> ResultEngine<Self> {
        if title.trim().is_empty() {
            return Err(EngineError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            kind,
            title,
            message,
            severity,
            is_read: false,
            metadata,
            created_at: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub is_read: bool,
    pub metadata: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Alert> for ActiveModel {
    fn from(alert: &Alert) -> Self {
        Self {
            id: ActiveValue::Set(alert.id.to_string()),
            owner: ActiveValue::Set(alert.owner.clone()),
            kind: ActiveValue::Set(alert.kind.as_str().to_string()),
            title: ActiveValue::Set(alert.title.clone()),
            message: ActiveValue::Set(alert.message.clone()),
            severity: ActiveValue::Set(alert.severity.as_str().to_string()),
            is_read: ActiveValue::Set(alert.is_read),
            metadata: ActiveValue::Set(alert.metadata.clone()),
            created_at: ActiveValue::Set(alert.created_at),
        }
    }
}

impl TryFrom<Model> for Alert {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("alert".to_string()))?,
            owner: model.owner,
            kind: AlertKind::try_from(model.kind.as_str())?,
            title: model.title,
            message: model.message,
            severity: AlertSeverity::try_from(model.severity.as_str())?,
            is_read: model.is_read,
            metadata: model.metadata,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_kinds() {
        assert_eq!(AlertKind::BudgetWarning.label(), "Budget Warning");
        assert_eq!(AlertKind::GoalMilestone.label(), "Goal Milestone");
        assert_eq!(AlertKind::UnusualSpending.label(), "Unusual Spending");
        assert_eq!(AlertKind::RecurringReminder.label(), "Recurring Transaction");
    }

    #[test]
    fn kind_round_trips_wire_names() {
        for kind in [
            AlertKind::BudgetWarning,
            AlertKind::GoalMilestone,
            AlertKind::UnusualSpending,
            AlertKind::RecurringReminder,
        ] {
            assert_eq!(AlertKind::try_from(kind.as_str()).unwrap(), kind);
        }
    }
}
