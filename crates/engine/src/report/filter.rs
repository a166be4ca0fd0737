use chrono::NaiveDate;

use crate::{Category, Transaction, TransactionKind};

/// Predicate set for narrowing a transaction list.
///
/// Every present field must match (logical AND); an absent field always
/// matches.
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
    /// Case-insensitive substring match on the description.
    pub search: Option<String>,
    /// Inclusive lower bound on the transaction date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the transaction date.
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.kind.is_some_and(|kind| tx.kind != kind) {
            return false;
        }
        if self.category.is_some_and(|category| tx.category != category) {
            return false;
        }
        if let Some(search) = &self.search
            && !tx
                .description
                .to_lowercase()
                .contains(&search.to_lowercase())
        {
            return false;
        }
        if self.from.is_some_and(|from| tx.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| tx.date > to) {
            return false;
        }
        true
    }
}

/// Returns the transactions matching `filter`, preserving order.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| filter.matches(tx))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amount;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(
                "alice".to_string(),
                TransactionKind::Expense,
                Amount::new(4200),
                Category::Food,
                "Grocery run".to_string(),
                date(2026, 6, 2),
            )
            .unwrap(),
            Transaction::new(
                "alice".to_string(),
                TransactionKind::Expense,
                Amount::new(1500),
                Category::Entertainment,
                "Cinema tickets".to_string(),
                date(2026, 6, 10),
            )
            .unwrap(),
            Transaction::new(
                "alice".to_string(),
                TransactionKind::Income,
                Amount::new(250_000),
                Category::Salary,
                "June salary".to_string(),
                date(2026, 6, 28),
            )
            .unwrap(),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let set = sample();
        assert_eq!(
            filter_transactions(&set, &TransactionFilter::default()),
            set
        );
    }

    #[test]
    fn predicates_combine_with_and() {
        let set = sample();
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            from: Some(date(2026, 6, 5)),
            ..Default::default()
        };
        let out = filter_transactions(&set, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, Category::Entertainment);
    }

    #[test]
    fn search_is_case_insensitive() {
        let set = sample();
        let filter = TransactionFilter {
            search: Some("GROCERY".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_transactions(&set, &filter).len(), 1);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let set = sample();
        let filter = TransactionFilter {
            from: Some(date(2026, 6, 2)),
            to: Some(date(2026, 6, 10)),
            ..Default::default()
        };
        assert_eq!(filter_transactions(&set, &filter).len(), 2);
    }

    #[test]
    fn filtering_is_idempotent() {
        let set = sample();
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            search: Some("c".to_string()),
            ..Default::default()
        };
        let once = filter_transactions(&set, &filter);
        let twice = filter_transactions(&once, &filter);
        assert_eq!(once, twice);
    }
}
