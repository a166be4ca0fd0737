//! Alert CRUD and the budget-warning sweep.

use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*, sea_query::Expr,
};

use crate::{
    Alert, AlertKind, AlertSeverity, Budget, ResultEngine, Transaction, alerts, budgets, report,
    transactions,
};

use super::{Engine, with_tx};

/// Listings return at most this many alerts, newest first.
const LIST_CAP: u64 = 50;

impl Engine {
    /// Lists the caller's alerts, newest first, capped at the 50 most recent.
    pub async fn list_alerts(&self, owner: &str, unread_only: bool) -> ResultEngine<Vec<Alert>> {
        let mut query = alerts::Entity::find()
            .filter(alerts::Column::Owner.eq(owner))
            .order_by_desc(alerts::Column::CreatedAt)
            .limit(LIST_CAP);
        if unread_only {
            query = query.filter(alerts::Column::IsRead.eq(false));
        }

        let models: Vec<alerts::Model> = query.all(&self.database).await?;
        models.into_iter().map(Alert::try_from).collect()
    }

    /// Creates an alert owned by the caller.
    pub async fn new_alert(
        &self,
        owner: &str,
        kind: AlertKind,
        title: &str,
        message: &str,
        severity: AlertSeverity,
        metadata: Option<String>,
    ) -> ResultEngine<Alert> {
        let alert = Alert::new(
            owner.to_string(),
            kind,
            title.to_string(),
            message.to_string(),
            severity,
            metadata,
        )?;

        with_tx!(self, |db_tx| {
            let model: alerts::ActiveModel = (&alert).into();
            model.insert(&db_tx).await?;
            Ok(alert)
        })
    }

    /// Marks the given alerts as read, ignoring ids that are absent or not
    /// the caller's. Returns the number of rows updated.
    pub async fn mark_alerts_read(&self, ids: &[Uuid], owner: &str) -> ResultEngine<u64> {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        let result = alerts::Entity::update_many()
            .col_expr(alerts::Column::IsRead, Expr::value(true))
            .filter(alerts::Column::Owner.eq(owner))
            .filter(alerts::Column::Id.is_in(ids))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected)
    }

    /// Marks every alert of the caller as read. Returns the number updated.
    pub async fn mark_all_alerts_read(&self, owner: &str) -> ResultEngine<u64> {
        let result = alerts::Entity::update_many()
            .col_expr(alerts::Column::IsRead, Expr::value(true))
            .filter(alerts::Column::Owner.eq(owner))
            .filter(alerts::Column::IsRead.eq(false))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes one of the caller's alerts.
    pub async fn delete_alert(&self, id: Uuid, owner: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_alert_scoped(&db_tx, id, owner).await?;
            alerts::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Deletes every alert of the caller. Returns the number deleted.
    pub async fn delete_all_alerts(&self, owner: &str) -> ResultEngine<u64> {
        let result = alerts::Entity::delete_many()
            .filter(alerts::Column::Owner.eq(owner))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected)
    }

    /// Raises a `budget_warning` alert for every budget that is near its
    /// limit (severity warning) or over it (severity error) in the period
    /// window containing `today`.
    ///
    /// A budget is skipped when an unread warning for the same category and
    /// window start already exists, so repeated sweeps do not pile up
    /// duplicates. Returns the number of alerts raised.
    pub async fn sweep_budgets(&self, today: NaiveDate) -> ResultEngine<usize> {
        let models: Vec<budgets::Model> = budgets::Entity::find().all(&self.database).await?;

        let mut raised = 0;
        for model in models {
            let budget = Budget::try_from(model)?;
            if self.sweep_budget(&budget, today).await? {
                raised += 1;
            }
        }
        Ok(raised)
    }

    async fn sweep_budget(&self, budget: &Budget, today: NaiveDate) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let tx_models: Vec<transactions::Model> = transactions::Entity::find()
                .filter(transactions::Column::Owner.eq(budget.owner.as_str()))
                .all(&db_tx)
                .await?;
            let history: Vec<Transaction> = tx_models
                .into_iter()
                .map(Transaction::try_from)
                .collect::<ResultEngine<_>>()?;

            let status = report::budget_status(budget, &history, today);
            let severity = match status.standing {
                report::BudgetStanding::Normal => return Ok(false),
                report::BudgetStanding::NearLimit => AlertSeverity::Warning,
                report::BudgetStanding::OverBudget => AlertSeverity::Error,
            };

            let (window_start, _) = report::period_window(budget.period, today);
            let marker = serde_json::json!({
                "category": budget.category.as_str(),
                "windowStart": window_start,
            })
            .to_string();

            let unread: Vec<alerts::Model> = alerts::Entity::find()
                .filter(alerts::Column::Owner.eq(budget.owner.as_str()))
                .filter(alerts::Column::Kind.eq(AlertKind::BudgetWarning.as_str()))
                .filter(alerts::Column::IsRead.eq(false))
                .all(&db_tx)
                .await?;
            if unread.iter().any(|a| a.metadata.as_deref() == Some(&marker)) {
                return Ok(false);
            }

            let (title, message) = match status.standing {
                report::BudgetStanding::OverBudget => (
                    "Budget exceeded",
                    format!(
                        "Spending on {} reached {} against a limit of {}",
                        budget.category.as_str(),
                        status.spent,
                        budget.limit
                    ),
                ),
                _ => (
                    "Budget almost used up",
                    format!(
                        "Spending on {} is at {:.0}% of its {} limit",
                        budget.category.as_str(),
                        status.percentage,
                        budget.limit
                    ),
                ),
            };

            let alert = Alert::new(
                budget.owner.clone(),
                AlertKind::BudgetWarning,
                title.to_string(),
                message,
                severity,
                Some(marker),
            )?;
            let model: alerts::ActiveModel = (&alert).into();
            model.insert(&db_tx).await?;
            Ok(true)
        })
    }
}
