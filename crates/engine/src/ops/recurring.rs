//! Recurring-transaction templates: CRUD and the scheduler entry point.

use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Alert, AlertKind, AlertSeverity, Amount, Category, Frequency, RecurringPatch,
    RecurringTransaction, ResultEngine, Transaction, TransactionKind, recurring, transactions,
};

use super::{Engine, with_tx};

impl Engine {
    /// Lists the caller's recurring-transaction templates, newest first.
    pub async fn list_recurring(&self, owner: &str) -> ResultEngine<Vec<RecurringTransaction>> {
        let models: Vec<recurring::Model> = recurring::Entity::find()
            .filter(recurring::Column::Owner.eq(owner))
            .order_by_desc(recurring::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models
            .into_iter()
            .map(RecurringTransaction::try_from)
            .collect()
    }

    /// Returns one of the caller's templates.
    pub async fn recurring(&self, id: Uuid, owner: &str) -> ResultEngine<RecurringTransaction> {
        with_tx!(self, |db_tx| {
            let model = self.require_recurring_scoped(&db_tx, id, owner).await?;
            RecurringTransaction::try_from(model)
        })
    }

    /// Creates a template owned by the caller.
    #[allow(clippy::too_many_arguments)]
    pub async fn new_recurring(
        &self,
        owner: &str,
        kind: TransactionKind,
        amount: Amount,
        category: Category,
        description: &str,
        frequency: Frequency,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> ResultEngine<RecurringTransaction> {
        let template = RecurringTransaction::new(
            owner.to_string(),
            kind,
            amount,
            category,
            description.to_string(),
            frequency,
            start_date,
            end_date,
        )?;

        with_tx!(self, |db_tx| {
            let model: recurring::ActiveModel = (&template).into();
            model.insert(&db_tx).await?;
            Ok(template)
        })
    }

    /// Applies an optional-field update to one of the caller's templates and
    /// returns the updated record.
    ///
    /// `last_run` is not settable; only the scheduler advances it.
    pub async fn update_recurring(
        &self,
        id: Uuid,
        patch: RecurringPatch,
        owner: &str,
    ) -> ResultEngine<RecurringTransaction> {
        with_tx!(self, |db_tx| {
            let model = self.require_recurring_scoped(&db_tx, id, owner).await?;
            let mut template = RecurringTransaction::try_from(model)?;

            if let Some(kind) = patch.kind {
                template.kind = kind;
            }
            if let Some(amount) = patch.amount {
                template.amount = amount;
            }
            if let Some(category) = patch.category {
                template.category = category;
            }
            if let Some(description) = patch.description {
                template.description = description;
            }
            if let Some(frequency) = patch.frequency {
                template.frequency = frequency;
            }
            if let Some(start_date) = patch.start_date {
                template.start_date = start_date;
            }
            if let Some(end_date) = patch.end_date {
                template.end_date = Some(end_date);
            }
            if let Some(is_active) = patch.is_active {
                template.is_active = is_active;
            }
            crate::transactions::validate(template.kind, template.amount, template.category)?;

            let model: recurring::ActiveModel = (&template).into();
            model.update(&db_tx).await?;
            Ok(template)
        })
    }

    /// Deletes one of the caller's templates.
    pub async fn delete_recurring(&self, id: Uuid, owner: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_recurring_scoped(&db_tx, id, owner).await?;
            recurring::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Materializes every due template into real transactions.
    ///
    /// Each template is processed in its own DB transaction that also
    /// advances `last_run`, so a crash mid-sweep never materializes the same
    /// run twice. A template overdue by several periods catches up with one
    /// transaction per missed period, bounded by `today`.
    ///
    /// Returns the number of transactions materialized.
    pub async fn run_due(&self, today: NaiveDate) -> ResultEngine<usize> {
        let active: Vec<recurring::Model> = recurring::Entity::find()
            .filter(recurring::Column::IsActive.eq(true))
            .all(&self.database)
            .await?;

        let mut materialized = 0;
        for model in active {
            let id = Uuid::parse_str(&model.id)
                .map_err(|_| crate::EngineError::KeyNotFound("recurring transaction".to_string()))?;
            materialized += self.materialize_template(id, today).await?;
        }
        Ok(materialized)
    }

    async fn materialize_template(&self, id: Uuid, today: NaiveDate) -> ResultEngine<usize> {
        with_tx!(self, |db_tx| {
            // Re-read inside the transaction; the listing snapshot may be stale.
            let Some(model) = recurring::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
            else {
                return Ok(0);
            };
            let mut template = RecurringTransaction::try_from(model)?;

            let mut count = 0;
            while let Some(due) = template.next_due() {
                if due > today {
                    break;
                }
                let transaction = Transaction::new(
                    template.owner.clone(),
                    template.kind,
                    template.amount,
                    template.category,
                    template.description.clone(),
                    due,
                )?;
                let tx_model: transactions::ActiveModel = (&transaction).into();
                tx_model.insert(&db_tx).await?;
                template.last_run = Some(due);
                count += 1;
            }

            if count > 0 {
                let active = recurring::ActiveModel {
                    id: ActiveValue::Set(template.id.to_string()),
                    last_run: ActiveValue::Set(template.last_run),
                    ..Default::default()
                };
                active.update(&db_tx).await?;

                let alert = Alert::new(
                    template.owner.clone(),
                    AlertKind::RecurringReminder,
                    "Recurring transaction processed".to_string(),
                    format!(
                        "{} occurrence(s) of \"{}\" were recorded",
                        count, template.description
                    ),
                    AlertSeverity::Info,
                    Some(
                        serde_json::json!({
                            "recurringTransactionId": template.id,
                            "count": count,
                        })
                        .to_string(),
                    ),
                )?;
                let alert_model: crate::alerts::ActiveModel = (&alert).into();
                alert_model.insert(&db_tx).await?;
            }

            Ok(count)
        })
    }
}
