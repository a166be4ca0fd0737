use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::{Amount, Budget, BudgetPeriod, Transaction, TransactionKind};

/// Where a budget stands inside its current period window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetStanding {
    Normal,
    /// Spend has reached 80% of the limit but stays below it.
    NearLimit,
    /// Spend strictly exceeds the limit.
    OverBudget,
}

/// Spend-to-date of a budget in the period window containing "now".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BudgetStatus {
    pub spent: Amount,
    /// Spend as a percentage of the limit (may exceed 100).
    pub percentage: f64,
    pub standing: BudgetStanding,
}

/// The inclusive [start, end] window a budget limit applies to: the calendar
/// month containing `today`, or the Monday-started calendar week.
pub fn period_window(period: BudgetPeriod, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match period {
        BudgetPeriod::Monthly => {
            let start = today.with_day(1).unwrap_or(today);
            let end = start
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(today);
            (start, end)
        }
        BudgetPeriod::Weekly => {
            let week = today.week(Weekday::Mon);
            (week.first_day(), week.last_day())
        }
    }
}

/// Classifies a spend against a limit.
///
/// Over-budget requires spend strictly greater than the limit; spend equal
/// to the limit is not over. Near-limit covers 80% up to (excluding) 100%.
pub fn classify(spent: Amount, limit: Amount) -> BudgetStanding {
    let spent = i128::from(spent.cents());
    let limit = i128::from(limit.cents());
    if spent > limit {
        BudgetStanding::OverBudget
    } else if spent * 5 >= limit * 4 && spent < limit {
        BudgetStanding::NearLimit
    } else {
        BudgetStanding::Normal
    }
}

/// Computes a budget's spend-to-date from the owner's transaction history.
///
/// Only expense transactions in the budget's category and inside the period
/// window containing `today` count.
pub fn budget_status(
    budget: &Budget,
    transactions: &[Transaction],
    today: NaiveDate,
) -> BudgetStatus {
    let (start, end) = period_window(budget.period, today);

    let mut spent = Amount::ZERO;
    for tx in transactions {
        if tx.kind == TransactionKind::Expense
            && tx.category == budget.category
            && tx.date >= start
            && tx.date <= end
        {
            spent += tx.amount;
        }
    }

    BudgetStatus {
        spent,
        percentage: spent.to_f64() / budget.limit.to_f64() * 100.0,
        standing: classify(spent, budget.limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(cents: i64, category: Category, date: NaiveDate) -> Transaction {
        Transaction::new(
            "alice".to_string(),
            TransactionKind::Expense,
            Amount::new(cents),
            category,
            "test".to_string(),
            date,
        )
        .unwrap()
    }

    fn food_budget(limit_cents: i64, period: BudgetPeriod) -> Budget {
        Budget::new(
            "alice".to_string(),
            Category::Food,
            Amount::new(limit_cents),
            period,
        )
        .unwrap()
    }

    #[test]
    fn monthly_window_covers_the_calendar_month() {
        let (start, end) = period_window(BudgetPeriod::Monthly, date(2026, 2, 14));
        assert_eq!(start, date(2026, 2, 1));
        assert_eq!(end, date(2026, 2, 28));
    }

    #[test]
    fn weekly_window_starts_on_monday() {
        // 2026-06-18 is a Thursday.
        let (start, end) = period_window(BudgetPeriod::Weekly, date(2026, 6, 18));
        assert_eq!(start, date(2026, 6, 15));
        assert_eq!(end, date(2026, 6, 21));
    }

    #[test]
    fn spend_counts_only_the_current_month_and_category() {
        let today = date(2026, 6, 20);
        let history = [
            expense(50_00, Category::Food, date(2026, 6, 3)),
            expense(60_00, Category::Food, date(2026, 6, 15)),
            expense(999_00, Category::Food, date(2026, 5, 28)),
            expense(40_00, Category::Bills, date(2026, 6, 10)),
        ];
        let budget = food_budget(200_00, BudgetPeriod::Monthly);

        let status = budget_status(&budget, &history, today);
        assert_eq!(status.spent, Amount::new(110_00));
        assert_eq!(status.percentage, 55.0);
        assert_eq!(status.standing, BudgetStanding::Normal);
    }

    #[test]
    fn eighty_percent_exactly_is_near_limit() {
        assert_eq!(
            classify(Amount::new(160_00), Amount::new(200_00)),
            BudgetStanding::NearLimit
        );
        assert_eq!(
            classify(Amount::new(159_99), Amount::new(200_00)),
            BudgetStanding::Normal
        );
    }

    #[test]
    fn spend_equal_to_limit_is_not_over_budget() {
        // Over-budget requires strictly greater spend.
        assert_eq!(
            classify(Amount::new(200_00), Amount::new(200_00)),
            BudgetStanding::Normal
        );
        assert_eq!(
            classify(Amount::new(200_01), Amount::new(200_00)),
            BudgetStanding::OverBudget
        );
    }
}
