//! Transaction records.
//!
//! A `Transaction` is a single dated income or expense entry owned by one
//! user.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, Category, EngineError, ResultEngine, TransactionKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub owner: String,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a new transaction, enforcing the record invariants:
    /// the amount must be strictly positive and the category must belong
    /// to the kind's category set.
    pub fn new(
        owner: String,
        kind: TransactionKind,
        amount: Amount,
        category: Category,
        description: String,
        date: NaiveDate,
    ) -> ResultEngine<Self> {
        validate(kind, amount, category)?;
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            kind,
            amount,
            category,
            description,
            date,
            created_at: Utc::now(),
        })
    }
}

pub(crate) fn validate(
    kind: TransactionKind,
    amount: Amount,
    category: Category,
) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::Validation(
            "amount must be a positive number".to_string(),
        ));
    }
    if category.kind() != kind {
        return Err(EngineError::Validation(format!(
            "category {} is not valid for {} transactions",
            category.as_str(),
            kind.as_str()
        )));
    }
    Ok(())
}

/// Optional-field update: only the provided fields change.
#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub amount: Option<Amount>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub kind: String,
    pub amount_minor: i64,
    pub category: String,
    pub description: String,
    pub date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            owner: ActiveValue::Set(tx.owner.clone()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(tx.amount.cents()),
            category: ActiveValue::Set(tx.category.as_str().to_string()),
            description: ActiveValue::Set(tx.description.clone()),
            date: ActiveValue::Set(tx.date),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction".to_string()))?,
            owner: model.owner,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: Amount::new(model.amount_minor),
            category: Category::try_from(model.category.as_str())?,
            description: model.description,
            date: model.date,
            created_at: model.created_at,
        })
    }
}
