//! Budget CRUD.
//!
//! The server does not enforce one budget per (owner, category); the client
//! workflow replaces an existing entry for the same category on add.

use uuid::Uuid;

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Amount, Budget, BudgetPatch, BudgetPeriod, Category, EngineError, ResultEngine, budgets,
};

use super::{Engine, with_tx};

impl Engine {
    /// Lists the caller's budgets, newest first.
    pub async fn list_budgets(&self, owner: &str) -> ResultEngine<Vec<Budget>> {
        let models: Vec<budgets::Model> = budgets::Entity::find()
            .filter(budgets::Column::Owner.eq(owner))
            .order_by_desc(budgets::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Budget::try_from).collect()
    }

    /// Creates a budget owned by the caller.
    pub async fn new_budget(
        &self,
        owner: &str,
        category: Category,
        limit: Amount,
        period: BudgetPeriod,
    ) -> ResultEngine<Budget> {
        let budget = Budget::new(owner.to_string(), category, limit, period)?;

        with_tx!(self, |db_tx| {
            let model: budgets::ActiveModel = (&budget).into();
            model.insert(&db_tx).await?;
            Ok(budget)
        })
    }

    /// Applies an optional-field update to one of the caller's budgets and
    /// returns the updated record.
    pub async fn update_budget(
        &self,
        id: Uuid,
        patch: BudgetPatch,
        owner: &str,
    ) -> ResultEngine<Budget> {
        with_tx!(self, |db_tx| {
            let model = self.require_budget_owner(&db_tx, id, owner).await?;
            let mut budget = Budget::try_from(model)?;

            if let Some(category) = patch.category {
                budget.category = category;
            }
            if let Some(limit) = patch.limit {
                budget.limit = limit;
            }
            if let Some(period) = patch.period {
                budget.period = period;
            }
            if !budget.limit.is_positive() {
                return Err(EngineError::Validation(
                    "limit must be a positive number".to_string(),
                ));
            }

            let model: budgets::ActiveModel = (&budget).into();
            model.update(&db_tx).await?;
            Ok(budget)
        })
    }

    /// Deletes one of the caller's budgets. Never touches transactions.
    pub async fn delete_budget(&self, id: Uuid, owner: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_budget_owner(&db_tx, id, owner).await?;
            budgets::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
