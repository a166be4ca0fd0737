//! API client and optimistic state cache.
//!
//! [`Api`] talks to the HTTP server; [`StateCache`] mirrors the caller's
//! transactions and budgets in memory with a staged mutation protocol
//! (`stage_*` / `commit_*` / `abort_*`). [`Client`] couples the two: each
//! mutation applies locally first, then hits the network, and either
//! reconciles the cache with the server record or rolls the staged step
//! back.

use api_types::{
    budget::{BudgetNew, BudgetUpdate, BudgetView},
    transaction::{TransactionNew, TransactionUpdate, TransactionView},
};
use thiserror::Error;
use uuid::Uuid;

pub use api::Api;
pub use cache::StateCache;

mod api;
mod cache;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("authentication failed")]
    Unauthorized,
    #[error("operation not allowed")]
    Forbidden,
    #[error("record not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Optimistic front-end over [`Api`] and [`StateCache`].
#[derive(Debug)]
pub struct Client {
    api: Api,
    cache: StateCache,
}

impl Client {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            cache: StateCache::new(),
        }
    }

    pub fn cache(&self) -> &StateCache {
        &self.cache
    }

    /// Replaces the cache contents with the server's current records.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let transactions = self.api.list_transactions().await?;
        let budgets = self.api.list_budgets().await?;
        self.cache.load_transactions(transactions);
        self.cache.load_budgets(budgets);
        Ok(())
    }

    pub async fn create_transaction(
        &mut self,
        new: TransactionNew,
    ) -> Result<TransactionView, ClientError> {
        let staged = self.cache.stage_transaction_create(&new);
        match self.api.create_transaction(&new).await {
            Ok(record) => {
                self.cache.commit_transaction_create(staged, record.clone());
                Ok(record)
            }
            Err(err) => {
                self.cache.abort_transaction_create(staged);
                Err(err)
            }
        }
    }

    pub async fn update_transaction(
        &mut self,
        id: Uuid,
        update: TransactionUpdate,
    ) -> Result<TransactionView, ClientError> {
        let staged = self.cache.stage_transaction_update(id, &update);
        match self.api.update_transaction(id, &update).await {
            Ok(record) => {
                self.cache.commit_transaction_update(staged, record.clone());
                Ok(record)
            }
            Err(err) => {
                self.cache.abort_transaction_update(staged);
                Err(err)
            }
        }
    }

    pub async fn delete_transaction(&mut self, id: Uuid) -> Result<(), ClientError> {
        let staged = self.cache.stage_transaction_delete(id);
        match self.api.delete_transaction(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.cache.abort_transaction_delete(staged);
                Err(err)
            }
        }
    }

    pub async fn create_budget(&mut self, new: BudgetNew) -> Result<BudgetView, ClientError> {
        let staged = self.cache.stage_budget_create(&new);
        match self.api.create_budget(&new).await {
            Ok(record) => {
                self.cache.commit_budget_create(staged, record.clone());
                Ok(record)
            }
            Err(err) => {
                self.cache.abort_budget_create(staged);
                Err(err)
            }
        }
    }

    pub async fn update_budget(
        &mut self,
        id: Uuid,
        update: BudgetUpdate,
    ) -> Result<BudgetView, ClientError> {
        let staged = self.cache.stage_budget_update(id, &update);
        match self.api.update_budget(id, &update).await {
            Ok(record) => {
                self.cache.commit_budget_update(staged, record.clone());
                Ok(record)
            }
            Err(err) => {
                self.cache.abort_budget_update(staged);
                Err(err)
            }
        }
    }

    pub async fn delete_budget(&mut self, id: Uuid) -> Result<(), ClientError> {
        let staged = self.cache.stage_budget_delete(id);
        match self.api.delete_budget(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.cache.abort_budget_delete(staged);
                Err(err)
            }
        }
    }

    /// Replaces a budget by deleting it and creating a new one.
    ///
    /// The two network calls are independent: if the create fails after the
    /// delete succeeded, the old budget is gone on both sides. Prefer
    /// [`Client::update_budget`], which is a single call.
    pub async fn replace_budget(
        &mut self,
        id: Uuid,
        new: BudgetNew,
    ) -> Result<BudgetView, ClientError> {
        self.delete_budget(id).await?;
        self.create_budget(new).await
    }
}
