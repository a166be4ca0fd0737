use crate::{Amount, Transaction, TransactionKind};

/// Aggregate figures over a set of transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub balance: Amount,
    pub transaction_count: usize,
}

/// Computes income/expense totals, the resulting balance and the count.
pub fn stats(transactions: &[Transaction]) -> Stats {
    let mut total_income = Amount::ZERO;
    let mut total_expense = Amount::ZERO;

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => total_income += tx.amount,
            TransactionKind::Expense => total_expense += tx.amount,
        }
    }

    Stats {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        transaction_count: transactions.len(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Category;

    fn tx(kind: TransactionKind, cents: i64, category: Category) -> Transaction {
        Transaction::new(
            "alice".to_string(),
            kind,
            Amount::new(cents),
            category,
            "test".to_string(),
            NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn empty_set_is_all_zero() {
        let stats = stats(&[]);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let set = [
            tx(TransactionKind::Income, 300_000, Category::Salary),
            tx(TransactionKind::Income, 50_00, Category::Freelance),
            tx(TransactionKind::Expense, 120_50, Category::Food),
            tx(TransactionKind::Expense, 80_00, Category::Bills),
        ];
        let stats = stats(&set);

        assert_eq!(stats.total_income, Amount::new(305_000));
        assert_eq!(stats.total_expense, Amount::new(200_50));
        assert_eq!(stats.balance, stats.total_income - stats.total_expense);
        assert_eq!(stats.transaction_count, 4);
    }
}
