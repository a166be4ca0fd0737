//! Transaction kinds and the fixed category set.
//!
//! Categories are partitioned into disjoint income and expense sets; a
//! transaction is only valid when its category belongs to its kind's set.

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::Validation(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Salary")]
    Salary,
    #[serde(rename = "Freelance")]
    Freelance,
    #[serde(rename = "Investment")]
    Investment,
    #[serde(rename = "Other Income")]
    OtherIncome,
    #[serde(rename = "Food")]
    Food,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Bills")]
    Bills,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Other Expense")]
    OtherExpense,
}

impl Category {
    /// The kind whose category set this category belongs to.
    pub fn kind(self) -> TransactionKind {
        match self {
            Self::Salary | Self::Freelance | Self::Investment | Self::OtherIncome => {
                TransactionKind::Income
            }
            Self::Food
            | Self::Transportation
            | Self::Entertainment
            | Self::Shopping
            | Self::Bills
            | Self::Healthcare
            | Self::Education
            | Self::OtherExpense => TransactionKind::Expense,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::OtherIncome => "Other Income",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::OtherExpense => "Other Expense",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Salary" => Ok(Self::Salary),
            "Freelance" => Ok(Self::Freelance),
            "Investment" => Ok(Self::Investment),
            "Other Income" => Ok(Self::OtherIncome),
            "Food" => Ok(Self::Food),
            "Transportation" => Ok(Self::Transportation),
            "Entertainment" => Ok(Self::Entertainment),
            "Shopping" => Ok(Self::Shopping),
            "Bills" => Ok(Self::Bills),
            "Healthcare" => Ok(Self::Healthcare),
            "Education" => Ok(Self::Education),
            "Other Expense" => Ok(Self::OtherExpense),
            other => Err(EngineError::Validation(format!(
                "invalid category: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_and_expense_sets_are_disjoint() {
        let income = [
            Category::Salary,
            Category::Freelance,
            Category::Investment,
            Category::OtherIncome,
        ];
        let expense = [
            Category::Food,
            Category::Transportation,
            Category::Entertainment,
            Category::Shopping,
            Category::Bills,
            Category::Healthcare,
            Category::Education,
            Category::OtherExpense,
        ];
        assert!(income.iter().all(|c| c.kind() == TransactionKind::Income));
        assert!(expense.iter().all(|c| c.kind() == TransactionKind::Expense));
    }

    #[test]
    fn round_trips_display_names() {
        for name in [
            "Salary",
            "Other Income",
            "Food",
            "Other Expense",
            "Healthcare",
        ] {
            let cat = Category::try_from(name).unwrap();
            assert_eq!(cat.as_str(), name);
        }
        assert!(Category::try_from("Gambling").is_err());
    }
}
