//! Transaction CRUD.

use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Amount, Category, ResultEngine, Transaction, TransactionKind, TransactionPatch, transactions,
};

use super::{Engine, with_tx};

impl Engine {
    /// Lists the caller's transactions, newest first by transaction date
    /// (creation time as tiebreak).
    pub async fn list_transactions(&self, owner: &str) -> ResultEngine<Vec<Transaction>> {
        let models: Vec<transactions::Model> = transactions::Entity::find()
            .filter(transactions::Column::Owner.eq(owner))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    /// Creates a transaction owned by the caller.
    pub async fn new_transaction(
        &self,
        owner: &str,
        kind: TransactionKind,
        amount: Amount,
        category: Category,
        description: &str,
        date: NaiveDate,
    ) -> ResultEngine<Transaction> {
        let transaction = Transaction::new(
            owner.to_string(),
            kind,
            amount,
            category,
            description.to_string(),
            date,
        )?;

        with_tx!(self, |db_tx| {
            let model: transactions::ActiveModel = (&transaction).into();
            model.insert(&db_tx).await?;
            Ok(transaction)
        })
    }

    /// Applies an optional-field update to one of the caller's transactions
    /// and returns the updated record.
    ///
    /// The id and original creation timestamp never change.
    pub async fn update_transaction(
        &self,
        id: Uuid,
        patch: TransactionPatch,
        owner: &str,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let model = self.require_transaction_owner(&db_tx, id, owner).await?;
            let mut transaction = Transaction::try_from(model)?;

            if let Some(kind) = patch.kind {
                transaction.kind = kind;
            }
            if let Some(amount) = patch.amount {
                transaction.amount = amount;
            }
            if let Some(category) = patch.category {
                transaction.category = category;
            }
            if let Some(description) = patch.description {
                transaction.description = description;
            }
            if let Some(date) = patch.date {
                transaction.date = date;
            }
            crate::transactions::validate(
                transaction.kind,
                transaction.amount,
                transaction.category,
            )?;

            let model: transactions::ActiveModel = (&transaction).into();
            model.update(&db_tx).await?;
            Ok(transaction)
        })
    }

    /// Deletes one of the caller's transactions.
    pub async fn delete_transaction(&self, id: Uuid, owner: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_transaction_owner(&db_tx, id, owner).await?;
            transactions::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
