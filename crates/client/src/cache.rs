//! In-memory mirror of the caller's transactions and budgets.
//!
//! Mutations follow a staged protocol: `stage_*` applies the optimistic
//! step and returns a token, `commit_*` reconciles the staged record with
//! the one the server returned, `abort_*` rolls the staged step back so the
//! cache is exactly as it was before the call.
//!
//! Corrections happen in place in the same ordered container, so a row
//! keeps its position across the provisional-to-confirmed transition. The
//! cache does not serialize concurrent mutations against the same record;
//! the last response to arrive wins.

use api_types::{
    budget::{BudgetNew, BudgetUpdate, BudgetView},
    transaction::{TransactionNew, TransactionUpdate, TransactionView},
};
use chrono::Utc;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct StateCache {
    transactions: Vec<TransactionView>,
    budgets: Vec<BudgetView>,
}

#[must_use]
#[derive(Debug)]
pub struct StagedTransactionCreate {
    provisional_id: Uuid,
}

#[must_use]
#[derive(Debug)]
pub struct StagedBudgetCreate {
    provisional_id: Uuid,
    displaced: Option<(usize, BudgetView)>,
}

#[must_use]
#[derive(Debug)]
pub struct StagedTransactionUpdate {
    previous: Option<TransactionView>,
}

#[must_use]
#[derive(Debug)]
pub struct StagedBudgetUpdate {
    previous: Option<BudgetView>,
}

#[must_use]
#[derive(Debug)]
pub struct StagedTransactionDelete {
    removed: Option<(usize, TransactionView)>,
}

#[must_use]
#[derive(Debug)]
pub struct StagedBudgetDelete {
    removed: Option<(usize, BudgetView)>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &[TransactionView] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[BudgetView] {
        &self.budgets
    }

    pub fn load_transactions(&mut self, transactions: Vec<TransactionView>) {
        self.transactions = transactions;
    }

    pub fn load_budgets(&mut self, budgets: Vec<BudgetView>) {
        self.budgets = budgets;
    }

    /// Prepends a provisional transaction built from the create payload.
    ///
    /// Absent payload fields get placeholder values; they only live until
    /// the commit swaps in the server record or the abort removes the row.
    pub fn stage_transaction_create(&mut self, new: &TransactionNew) -> StagedTransactionCreate {
        let provisional_id = Uuid::new_v4();
        self.transactions.insert(
            0,
            TransactionView {
                id: provisional_id,
                kind: new.kind.clone().unwrap_or_default(),
                amount: new.amount.unwrap_or_default(),
                category: new.category.clone().unwrap_or_default(),
                description: new.description.clone().unwrap_or_default(),
                date: new.date.unwrap_or_else(|| Utc::now().date_naive()),
                created_at: Utc::now(),
            },
        );
        StagedTransactionCreate { provisional_id }
    }

    pub fn commit_transaction_create(
        &mut self,
        staged: StagedTransactionCreate,
        record: TransactionView,
    ) {
        match self
            .transactions
            .iter_mut()
            .find(|tx| tx.id == staged.provisional_id)
        {
            Some(slot) => *slot = record,
            None => self.transactions.insert(0, record),
        }
    }

    pub fn abort_transaction_create(&mut self, staged: StagedTransactionCreate) {
        self.transactions.retain(|tx| tx.id != staged.provisional_id);
    }

    /// Inserts a provisional budget, displacing any cached entry with the
    /// same category. The displaced entry is kept in the token so an abort
    /// can put it back.
    pub fn stage_budget_create(&mut self, new: &BudgetNew) -> StagedBudgetCreate {
        let provisional_id = Uuid::new_v4();
        let category = new.category.clone().unwrap_or_default();

        let displaced = self
            .budgets
            .iter()
            .position(|budget| budget.category == category)
            .map(|index| (index, self.budgets.remove(index)));
        let index = displaced.as_ref().map_or(0, |(index, _)| *index);

        self.budgets.insert(
            index,
            BudgetView {
                id: provisional_id,
                category,
                limit: new.limit.unwrap_or_default(),
                period: new.period.clone().unwrap_or_default(),
                created_at: Utc::now(),
            },
        );
        StagedBudgetCreate {
            provisional_id,
            displaced,
        }
    }

    pub fn commit_budget_create(&mut self, staged: StagedBudgetCreate, record: BudgetView) {
        match self
            .budgets
            .iter_mut()
            .find(|budget| budget.id == staged.provisional_id)
        {
            Some(slot) => *slot = record,
            None => self.budgets.insert(0, record),
        }
    }

    pub fn abort_budget_create(&mut self, staged: StagedBudgetCreate) {
        self.budgets
            .retain(|budget| budget.id != staged.provisional_id);
        if let Some((index, previous)) = staged.displaced {
            let index = index.min(self.budgets.len());
            self.budgets.insert(index, previous);
        }
    }

    /// Applies the update in place, keeping the id and the original
    /// creation timestamp. A record that is not cached stages nothing.
    pub fn stage_transaction_update(
        &mut self,
        id: Uuid,
        update: &TransactionUpdate,
    ) -> StagedTransactionUpdate {
        let Some(slot) = self.transactions.iter_mut().find(|tx| tx.id == id) else {
            return StagedTransactionUpdate { previous: None };
        };
        let previous = slot.clone();

        if let Some(kind) = &update.kind {
            slot.kind = kind.clone();
        }
        if let Some(amount) = update.amount {
            slot.amount = amount;
        }
        if let Some(category) = &update.category {
            slot.category = category.clone();
        }
        if let Some(description) = &update.description {
            slot.description = description.clone();
        }
        if let Some(date) = update.date {
            slot.date = date;
        }

        StagedTransactionUpdate {
            previous: Some(previous),
        }
    }

    pub fn commit_transaction_update(
        &mut self,
        _staged: StagedTransactionUpdate,
        record: TransactionView,
    ) {
        if let Some(slot) = self.transactions.iter_mut().find(|tx| tx.id == record.id) {
            *slot = record;
        }
    }

    pub fn abort_transaction_update(&mut self, staged: StagedTransactionUpdate) {
        if let Some(previous) = staged.previous
            && let Some(slot) = self.transactions.iter_mut().find(|tx| tx.id == previous.id)
        {
            *slot = previous;
        }
    }

    pub fn stage_budget_update(&mut self, id: Uuid, update: &BudgetUpdate) -> StagedBudgetUpdate {
        let Some(slot) = self.budgets.iter_mut().find(|budget| budget.id == id) else {
            return StagedBudgetUpdate { previous: None };
        };
        let previous = slot.clone();

        if let Some(category) = &update.category {
            slot.category = category.clone();
        }
        if let Some(limit) = update.limit {
            slot.limit = limit;
        }
        if let Some(period) = &update.period {
            slot.period = period.clone();
        }

        StagedBudgetUpdate {
            previous: Some(previous),
        }
    }

    pub fn commit_budget_update(&mut self, _staged: StagedBudgetUpdate, record: BudgetView) {
        if let Some(slot) = self.budgets.iter_mut().find(|b| b.id == record.id) {
            *slot = record;
        }
    }

    pub fn abort_budget_update(&mut self, staged: StagedBudgetUpdate) {
        if let Some(previous) = staged.previous
            && let Some(slot) = self.budgets.iter_mut().find(|b| b.id == previous.id)
        {
            *slot = previous;
        }
    }

    /// Removes the record immediately, keeping it (with its position) in
    /// the token for a possible abort.
    pub fn stage_transaction_delete(&mut self, id: Uuid) -> StagedTransactionDelete {
        let removed = self
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .map(|index| (index, self.transactions.remove(index)));
        StagedTransactionDelete { removed }
    }

    pub fn abort_transaction_delete(&mut self, staged: StagedTransactionDelete) {
        if let Some((index, record)) = staged.removed {
            let index = index.min(self.transactions.len());
            self.transactions.insert(index, record);
        }
    }

    pub fn stage_budget_delete(&mut self, id: Uuid) -> StagedBudgetDelete {
        let removed = self
            .budgets
            .iter()
            .position(|budget| budget.id == id)
            .map(|index| (index, self.budgets.remove(index)));
        StagedBudgetDelete { removed }
    }

    pub fn abort_budget_delete(&mut self, staged: StagedBudgetDelete) {
        if let Some((index, record)) = staged.removed {
            let index = index.min(self.budgets.len());
            self.budgets.insert(index, record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    fn transaction(description: &str, day: u32) -> TransactionView {
        TransactionView {
            id: Uuid::new_v4(),
            kind: "expense".to_string(),
            amount: 10.0,
            category: "groceries".to_string(),
            description: description.to_string(),
            date: date(day),
            created_at: Utc::now(),
        }
    }

    fn budget(category: &str, limit: f64) -> BudgetView {
        BudgetView {
            id: Uuid::new_v4(),
            category: category.to_string(),
            limit,
            period: "monthly".to_string(),
            created_at: Utc::now(),
        }
    }

    fn transaction_new(description: &str) -> TransactionNew {
        TransactionNew {
            kind: Some("expense".to_string()),
            amount: Some(25.0),
            category: Some("groceries".to_string()),
            description: Some(description.to_string()),
            date: Some(date(15)),
        }
    }

    #[test]
    fn staged_create_is_prepended_and_confirmed_in_place() {
        let mut cache = StateCache::new();
        cache.load_transactions(vec![transaction("old", 1)]);

        let staged = cache.stage_transaction_create(&transaction_new("new"));
        assert_eq!(cache.transactions().len(), 2);
        assert_eq!(cache.transactions()[0].description, "new");

        let mut confirmed = transaction("new", 15);
        confirmed.amount = 25.0;
        cache.commit_transaction_create(staged, confirmed.clone());

        assert_eq!(cache.transactions().len(), 2);
        assert_eq!(cache.transactions()[0].id, confirmed.id);
        assert_eq!(cache.transactions()[1].description, "old");
    }

    #[test]
    fn aborted_create_leaves_cache_untouched() {
        let mut cache = StateCache::new();
        let before = vec![transaction("a", 1), transaction("b", 2)];
        cache.load_transactions(before.clone());

        let staged = cache.stage_transaction_create(&transaction_new("doomed"));
        cache.abort_transaction_create(staged);

        assert_eq!(cache.transactions(), before.as_slice());
    }

    #[test]
    fn budget_create_replaces_same_category() {
        let mut cache = StateCache::new();
        cache.load_budgets(vec![budget("groceries", 400.0), budget("transport", 100.0)]);

        let staged = cache.stage_budget_create(&BudgetNew {
            category: Some("groceries".to_string()),
            limit: Some(250.0),
            period: Some("monthly".to_string()),
        });

        assert_eq!(cache.budgets().len(), 2);
        assert_eq!(cache.budgets()[0].limit, 250.0);

        cache.commit_budget_create(staged, budget("groceries", 250.0));
        assert_eq!(cache.budgets().len(), 2);
    }

    #[test]
    fn aborted_budget_create_restores_displaced_entry() {
        let mut cache = StateCache::new();
        let before = vec![budget("groceries", 400.0), budget("transport", 100.0)];
        cache.load_budgets(before.clone());

        let staged = cache.stage_budget_create(&BudgetNew {
            category: Some("groceries".to_string()),
            limit: Some(250.0),
            period: Some("monthly".to_string()),
        });
        cache.abort_budget_create(staged);

        assert_eq!(cache.budgets(), before.as_slice());
    }

    #[test]
    fn staged_update_keeps_id_and_creation_time() {
        let mut cache = StateCache::new();
        let original = transaction("lunch", 10);
        cache.load_transactions(vec![original.clone()]);

        let staged = cache.stage_transaction_update(
            original.id,
            &TransactionUpdate {
                amount: Some(99.0),
                ..Default::default()
            },
        );

        let cached = &cache.transactions()[0];
        assert_eq!(cached.id, original.id);
        assert_eq!(cached.created_at, original.created_at);
        assert_eq!(cached.amount, 99.0);

        cache.abort_transaction_update(staged);
        assert_eq!(cache.transactions()[0], original);
    }

    #[test]
    fn aborted_delete_restores_record_at_its_position() {
        let mut cache = StateCache::new();
        let before = vec![transaction("a", 3), transaction("b", 2), transaction("c", 1)];
        cache.load_transactions(before.clone());

        let staged = cache.stage_transaction_delete(before[1].id);
        assert_eq!(cache.transactions().len(), 2);

        cache.abort_transaction_delete(staged);
        assert_eq!(cache.transactions(), before.as_slice());
    }

    #[test]
    fn delete_then_failed_create_loses_the_budget() {
        // Documents the non-atomicity of replace-by-composition: once the
        // delete has gone through, aborting the create does not bring the
        // old budget back.
        let mut cache = StateCache::new();
        let original = budget("groceries", 400.0);
        cache.load_budgets(vec![original.clone()]);

        let _deleted = cache.stage_budget_delete(original.id);

        let staged = cache.stage_budget_create(&BudgetNew {
            category: Some("groceries".to_string()),
            limit: Some(250.0),
            period: Some("monthly".to_string()),
        });
        cache.abort_budget_create(staged);

        assert!(cache.budgets().is_empty());
    }

    #[test]
    fn update_of_uncached_record_is_a_no_op() {
        let mut cache = StateCache::new();
        let staged =
            cache.stage_transaction_update(Uuid::new_v4(), &TransactionUpdate::default());
        cache.abort_transaction_update(staged);
        assert!(cache.transactions().is_empty());
    }
}
