//! Wire types shared by the HTTP server and the client.
//!
//! Field names follow the JSON surface: camelCase, with `type` as the
//! income/expense discriminant. Monetary values travel as decimal numbers;
//! enum-like fields (kind, category, period, frequency, severity) travel as
//! their canonical strings and are validated server-side.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Uniform acknowledgement body for deletes and bulk updates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: f64,
        pub category: String,
        pub description: String,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }

    /// Create payload. Fields are optional so the server can report every
    /// missing one at once instead of failing on the first.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub date: Option<NaiveDate>,
    }

    /// Partial update: only present fields change.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionUpdate {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub date: Option<NaiveDate>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetView {
        pub id: Uuid,
        pub category: String,
        pub limit: f64,
        pub period: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetNew {
        pub category: Option<String>,
        pub limit: Option<f64>,
        pub period: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetUpdate {
        pub category: Option<String>,
        pub limit: Option<f64>,
        pub period: Option<String>,
    }
}

pub mod recurring {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: f64,
        pub category: String,
        pub description: String,
        pub frequency: String,
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
        pub last_run: Option<NaiveDate>,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringNew {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub frequency: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringUpdate {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub frequency: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub is_active: Option<bool>,
    }
}

pub mod goal {
    use super::*;
    use crate::transaction::TransactionView;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GoalView {
        pub id: Uuid,
        pub name: String,
        pub target_amount: f64,
        pub current_amount: f64,
        pub deadline: Option<NaiveDate>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub is_completed: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GoalNew {
        pub name: Option<String>,
        pub target_amount: Option<f64>,
        pub current_amount: Option<f64>,
        pub deadline: Option<NaiveDate>,
        pub category: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GoalUpdate {
        pub name: Option<String>,
        pub target_amount: Option<f64>,
        pub current_amount: Option<f64>,
        pub deadline: Option<NaiveDate>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub is_completed: Option<bool>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ContributeNew {
        pub amount: Option<f64>,
    }

    /// Response of a contribution: the updated goal and the expense recorded
    /// for it.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ContributionView {
        pub goal: GoalView,
        pub transaction: TransactionView,
    }
}

pub mod alert {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AlertView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: String,
        pub title: String,
        pub message: String,
        pub severity: String,
        pub is_read: bool,
        pub metadata: Option<serde_json::Value>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AlertNew {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub title: Option<String>,
        pub message: Option<String>,
        pub severity: Option<String>,
        pub metadata: Option<serde_json::Value>,
    }

    /// Mark-read request: either an explicit id list or everything at once.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AlertPatch {
        pub alert_ids: Option<Vec<Uuid>>,
        pub mark_all_as_read: Option<bool>,
    }

    /// Query parameters for listing alerts.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AlertListParams {
        pub unread_only: Option<bool>,
    }

    /// Query parameters for deleting alerts: exactly one of the two.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AlertDeleteParams {
        pub id: Option<Uuid>,
        pub delete_all: Option<bool>,
    }
}
