//! Savings-goal CRUD and the contribution flow.

use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Alert, AlertKind, AlertSeverity, Amount, Category, EngineError, GoalPatch, ResultEngine,
    SavingsGoal, Transaction, TransactionKind, goals, report, transactions,
};

use super::{Engine, with_tx};

/// Result of a savings-goal contribution: the updated goal and the expense
/// transaction recorded for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub goal: SavingsGoal,
    pub transaction: Transaction,
}

impl Engine {
    /// Lists the caller's savings goals, newest first.
    pub async fn list_goals(&self, owner: &str) -> ResultEngine<Vec<SavingsGoal>> {
        let models: Vec<goals::Model> = goals::Entity::find()
            .filter(goals::Column::Owner.eq(owner))
            .order_by_desc(goals::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(SavingsGoal::try_from).collect()
    }

    /// Returns one of the caller's savings goals.
    pub async fn goal(&self, id: Uuid, owner: &str) -> ResultEngine<SavingsGoal> {
        with_tx!(self, |db_tx| {
            let model = self.require_goal_scoped(&db_tx, id, owner).await?;
            SavingsGoal::try_from(model)
        })
    }

    /// Creates a savings goal owned by the caller.
    pub async fn new_goal(
        &self,
        owner: &str,
        name: &str,
        target: Amount,
        current: Amount,
        deadline: Option<NaiveDate>,
        category: Option<String>,
        description: Option<String>,
    ) -> ResultEngine<SavingsGoal> {
        let goal = SavingsGoal::new(
            owner.to_string(),
            name.to_string(),
            target,
            current,
            deadline,
            category,
            description,
        )?;

        with_tx!(self, |db_tx| {
            let model: goals::ActiveModel = (&goal).into();
            model.insert(&db_tx).await?;
            Ok(goal)
        })
    }

    /// Applies an optional-field update to one of the caller's goals and
    /// returns the updated record.
    ///
    /// `is_completed` is recomputed from the amounts unless the patch sets it
    /// explicitly.
    pub async fn update_goal(
        &self,
        id: Uuid,
        patch: GoalPatch,
        owner: &str,
    ) -> ResultEngine<SavingsGoal> {
        with_tx!(self, |db_tx| {
            let model = self.require_goal_scoped(&db_tx, id, owner).await?;
            let mut goal = SavingsGoal::try_from(model)?;

            if let Some(name) = patch.name {
                if name.trim().is_empty() {
                    return Err(EngineError::Validation(
                        "name must not be empty".to_string(),
                    ));
                }
                goal.name = name;
            }
            if let Some(target) = patch.target {
                if !target.is_positive() {
                    return Err(EngineError::Validation(
                        "targetAmount must be a positive number".to_string(),
                    ));
                }
                goal.target = target;
            }
            if let Some(current) = patch.current {
                if current.cents() < 0 {
                    return Err(EngineError::Validation(
                        "currentAmount must not be negative".to_string(),
                    ));
                }
                goal.current = current;
            }
            if let Some(deadline) = patch.deadline {
                goal.deadline = Some(deadline);
            }
            if let Some(category) = patch.category {
                goal.category = Some(category);
            }
            if let Some(description) = patch.description {
                goal.description = Some(description);
            }
            goal.is_completed = patch
                .is_completed
                .unwrap_or(goal.current >= goal.target);

            let model: goals::ActiveModel = (&goal).into();
            model.update(&db_tx).await?;
            Ok(goal)
        })
    }

    /// Deletes one of the caller's savings goals.
    pub async fn delete_goal(&self, id: Uuid, owner: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_goal_scoped(&db_tx, id, owner).await?;
            goals::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Contributes `amount` to a goal.
    ///
    /// One atomic DB transaction grows the goal balance, records a matching
    /// expense transaction and, when the goal crosses its target, raises a
    /// milestone alert. Any failure rolls the whole operation back.
    ///
    /// The amount must be strictly positive and at most the caller's current
    /// balance (total income minus total expense).
    pub async fn contribute(
        &self,
        id: Uuid,
        amount: Amount,
        owner: &str,
        today: NaiveDate,
    ) -> ResultEngine<Contribution> {
        if !amount.is_positive() {
            return Err(EngineError::Validation(
                "amount must be a positive number".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = self.require_goal_scoped(&db_tx, id, owner).await?;
            let mut goal = SavingsGoal::try_from(model)?;

            let tx_models: Vec<transactions::Model> = transactions::Entity::find()
                .filter(transactions::Column::Owner.eq(owner))
                .all(&db_tx)
                .await?;
            let history: Vec<Transaction> = tx_models
                .into_iter()
                .map(Transaction::try_from)
                .collect::<ResultEngine<_>>()?;
            let stats = report::stats(&history);
            if amount > stats.balance {
                return Err(EngineError::InsufficientFunds(format!(
                    "available balance is {}",
                    stats.balance
                )));
            }

            let was_completed = goal.is_completed;
            goal.current = goal
                .current
                .checked_add(amount)
                .ok_or_else(|| EngineError::Validation("amount too large".to_string()))?;
            goal.is_completed = goal.current >= goal.target;

            let transaction = Transaction::new(
                owner.to_string(),
                TransactionKind::Expense,
                amount,
                Category::OtherExpense,
                format!("Contribution to savings goal: {}", goal.name),
                today,
            )?;
            let tx_model: transactions::ActiveModel = (&transaction).into();
            tx_model.insert(&db_tx).await?;

            let goal_model: goals::ActiveModel = (&goal).into();
            goal_model.update(&db_tx).await?;

            if goal.is_completed && !was_completed {
                let alert = Alert::new(
                    owner.to_string(),
                    AlertKind::GoalMilestone,
                    "Savings goal reached".to_string(),
                    format!("\"{}\" reached its target of {}", goal.name, goal.target),
                    AlertSeverity::Info,
                    Some(serde_json::json!({ "goalId": goal.id }).to_string()),
                )?;
                let alert_model: crate::alerts::ActiveModel = (&alert).into();
                alert_model.insert(&db_tx).await?;
            }

            Ok(Contribution { goal, transaction })
        })
    }
}
