//! Core engine: domain model, storage access and derived computations.
//!
//! The engine owns every read and write against the record store and
//! enforces per-user ownership on each of them. Pure, storage-free
//! calculations (statistics, budget windows, goal progress) live in
//! [`report`].

pub use alerts::{Alert, AlertKind, AlertSeverity};
pub use budgets::{Budget, BudgetPatch, BudgetPeriod};
pub use categories::{Category, TransactionKind};
pub use error::EngineError;
pub use goals::{GoalPatch, SavingsGoal};
pub use money::Amount;
pub use ops::{Contribution, Engine, EngineBuilder};
pub use recurring::{Frequency, RecurringPatch, RecurringTransaction};
pub use transactions::{Transaction, TransactionPatch};

mod alerts;
mod budgets;
mod categories;
mod error;
mod goals;
mod money;
mod ops;
mod recurring;
pub mod report;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
