//! Ownership checks shared by every entity operation.
//!
//! Two lookup shapes exist on purpose. Transactions and budgets distinguish
//! a missing record ([`KeyNotFound`]) from a record owned by someone else
//! ([`Forbidden`]). Recurring transactions, savings goals and alerts are
//! looked up scoped by (id, owner), so a foreign record is indistinguishable
//! from an absent one.
//!
//! [`KeyNotFound`]: crate::EngineError::KeyNotFound
//! [`Forbidden`]: crate::EngineError::Forbidden

use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, alerts, budgets, goals, recurring, transactions};

use super::Engine;

/// Generates a `require_*_owner` method: NotFound when the record is absent,
/// Forbidden when it belongs to another user.
macro_rules! impl_require_owner {
    ($fn_name:ident, $module:ident, $label:literal) => {
        pub(super) async fn $fn_name(
            &self,
            db: &DatabaseTransaction,
            id: Uuid,
            owner: &str,
        ) -> ResultEngine<$module::Model> {
            let model = $module::Entity::find_by_id(id.to_string())
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($label.to_string()))?;
            if model.owner != owner {
                return Err(EngineError::Forbidden($label.to_string()));
            }
            Ok(model)
        }
    };
}

/// Generates a `require_*_scoped` method: the query itself is restricted to
/// the caller's rows, so absence and foreign ownership both map to NotFound.
macro_rules! impl_require_scoped {
    ($fn_name:ident, $module:ident, $label:literal) => {
        pub(super) async fn $fn_name(
            &self,
            db: &DatabaseTransaction,
            id: Uuid,
            owner: &str,
        ) -> ResultEngine<$module::Model> {
            $module::Entity::find_by_id(id.to_string())
                .filter($module::Column::Owner.eq(owner))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($label.to_string()))
        }
    };
}

impl Engine {
    impl_require_owner!(require_transaction_owner, transactions, "transaction");
    impl_require_owner!(require_budget_owner, budgets, "budget");

    impl_require_scoped!(
        require_recurring_scoped,
        recurring,
        "recurring transaction"
    );
    impl_require_scoped!(require_goal_scoped, goals, "savings goal");
    impl_require_scoped!(require_alert_scoped, alerts, "alert");
}
