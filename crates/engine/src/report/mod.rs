//! Derived computations: pure functions over in-memory record sets.
//!
//! Nothing here touches the database; every value is recomputed on demand
//! from the transactions, budgets and goals the caller already holds.

mod budgets;
mod filter;
mod goals;
mod stats;

pub use budgets::{BudgetStanding, BudgetStatus, budget_status, classify, period_window};
pub use filter::{TransactionFilter, filter_transactions};
pub use goals::{GoalProgress, goal_progress};
pub use stats::{Stats, stats};
