//! Recurring-transaction templates.
//!
//! A template describes a transaction to materialize on a schedule. It is
//! not itself a transaction; the scheduler turns due templates into real
//! [`Transaction`](crate::Transaction) rows and advances `last_run`.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, Category, EngineError, ResultEngine, TransactionKind, transactions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// The next occurrence after `date`, clamping month-end overflow
    /// (Jan 31 + 1 month = Feb 28/29).
    pub fn advance(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        }
    }
}

impl TryFrom<&str> for Frequency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(EngineError::Validation(format!(
                "invalid frequency: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub owner: String,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: Category,
    pub description: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub last_run: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl RecurringTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner: String,
        kind: TransactionKind,
        amount: Amount,
        category: Category,
        description: String,
        frequency: Frequency,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> ResultEngine<Self> {
        transactions::validate(kind, amount, category)?;
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            kind,
            amount,
            category,
            description,
            frequency,
            start_date,
            end_date,
            last_run: None,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    /// The next date this template should materialize on, if any.
    ///
    /// `None` when the template is inactive or exhausted past `end_date`.
    pub fn next_due(&self) -> Option<NaiveDate> {
        if !self.is_active {
            return None;
        }
        let candidate = match self.last_run {
            None => self.start_date,
            Some(last) => self.frequency.advance(last)?,
        };
        if let Some(end) = self.end_date
            && candidate > end
        {
            return None;
        }
        Some(candidate)
    }
}

/// Optional-field update: only the provided fields change.
#[derive(Clone, Debug, Default)]
pub struct RecurringPatch {
    pub kind: Option<TransactionKind>,
    pub amount: Option<Amount>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recurring_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner: String,
    pub kind: String,
    pub amount_minor: i64,
    pub category: String,
    pub description: String,
    pub frequency: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub last_run: Option<Date>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&RecurringTransaction> for ActiveModel {
    fn from(template: &RecurringTransaction) -> Self {
        Self {
            id: ActiveValue::Set(template.id.to_string()),
            owner: ActiveValue::Set(template.owner.clone()),
            kind: ActiveValue::Set(template.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(template.amount.cents()),
            category: ActiveValue::Set(template.category.as_str().to_string()),
            description: ActiveValue::Set(template.description.clone()),
            frequency: ActiveValue::Set(template.frequency.as_str().to_string()),
            start_date: ActiveValue::Set(template.start_date),
            end_date: ActiveValue::Set(template.end_date),
            last_run: ActiveValue::Set(template.last_run),
            is_active: ActiveValue::Set(template.is_active),
            created_at: ActiveValue::Set(template.created_at),
        }
    }
}

impl TryFrom<Model> for RecurringTransaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("recurring transaction".to_string()))?,
            owner: model.owner,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: Amount::new(model.amount_minor),
            category: Category::try_from(model.category.as_str())?,
            description: model.description,
            frequency: Frequency::try_from(model.frequency.as_str())?,
            start_date: model.start_date,
            end_date: model.end_date,
            last_run: model.last_run,
            is_active: model.is_active,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn advance_clamps_month_end() {
        assert_eq!(
            Frequency::Monthly.advance(date(2026, 1, 31)),
            Some(date(2026, 2, 28))
        );
        assert_eq!(
            Frequency::Yearly.advance(date(2024, 2, 29)),
            Some(date(2025, 2, 28))
        );
        assert_eq!(
            Frequency::Weekly.advance(date(2026, 3, 30)),
            Some(date(2026, 4, 6))
        );
    }

    #[test]
    fn next_due_starts_at_start_date_and_respects_end() {
        let mut template = RecurringTransaction::new(
            "alice".to_string(),
            TransactionKind::Expense,
            Amount::new(500),
            Category::Bills,
            "Internet".to_string(),
            Frequency::Monthly,
            date(2026, 1, 15),
            Some(date(2026, 3, 1)),
        )
        .unwrap();

        assert_eq!(template.next_due(), Some(date(2026, 1, 15)));
        template.last_run = Some(date(2026, 2, 15));
        assert_eq!(template.next_due(), None);
        template.is_active = false;
        template.last_run = None;
        assert_eq!(template.next_due(), None);
    }
}
