//! Thin `reqwest` wrapper around the HTTP API.

use api_types::{
    Ack,
    budget::{BudgetNew, BudgetUpdate, BudgetView},
    transaction::{TransactionNew, TransactionUpdate, TransactionView},
};
use reqwest::{Response, Url};
use serde::Deserialize;
use uuid::Uuid;

use crate::ClientError;

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Api {
    base_url: Url,
    http: reqwest::Client,
    username: String,
    password: String,
}

impl Api {
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::Validation(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Validation(format!("invalid endpoint {path}: {err}")))
    }

    async fn fail(res: Response) -> ClientError {
        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        match status.as_u16() {
            400 => ClientError::Validation(body),
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            409 => ClientError::Conflict(body),
            _ => ClientError::Server(body),
        }
    }

    pub async fn list_transactions(&self) -> Result<Vec<TransactionView>, ClientError> {
        let res = self
            .http
            .get(self.endpoint("transactions")?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json().await.map_err(ClientError::Transport);
        }
        Err(Self::fail(res).await)
    }

    pub async fn create_transaction(
        &self,
        payload: &TransactionNew,
    ) -> Result<TransactionView, ClientError> {
        let res = self
            .http
            .post(self.endpoint("transactions")?)
            .basic_auth(&self.username, Some(&self.password))
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json().await.map_err(ClientError::Transport);
        }
        Err(Self::fail(res).await)
    }

    pub async fn update_transaction(
        &self,
        id: Uuid,
        payload: &TransactionUpdate,
    ) -> Result<TransactionView, ClientError> {
        let res = self
            .http
            .put(self.endpoint(&format!("transactions/{id}"))?)
            .basic_auth(&self.username, Some(&self.password))
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json().await.map_err(ClientError::Transport);
        }
        Err(Self::fail(res).await)
    }

    pub async fn delete_transaction(&self, id: Uuid) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(self.endpoint(&format!("transactions/{id}"))?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            res.json::<Ack>().await.map_err(ClientError::Transport)?;
            return Ok(());
        }
        Err(Self::fail(res).await)
    }

    pub async fn list_budgets(&self) -> Result<Vec<BudgetView>, ClientError> {
        let res = self
            .http
            .get(self.endpoint("budgets")?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json().await.map_err(ClientError::Transport);
        }
        Err(Self::fail(res).await)
    }

    pub async fn create_budget(&self, payload: &BudgetNew) -> Result<BudgetView, ClientError> {
        let res = self
            .http
            .post(self.endpoint("budgets")?)
            .basic_auth(&self.username, Some(&self.password))
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json().await.map_err(ClientError::Transport);
        }
        Err(Self::fail(res).await)
    }

    pub async fn update_budget(
        &self,
        id: Uuid,
        payload: &BudgetUpdate,
    ) -> Result<BudgetView, ClientError> {
        let res = self
            .http
            .put(self.endpoint(&format!("budgets/{id}"))?)
            .basic_auth(&self.username, Some(&self.password))
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json().await.map_err(ClientError::Transport);
        }
        Err(Self::fail(res).await)
    }

    pub async fn delete_budget(&self, id: Uuid) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(self.endpoint(&format!("budgets/{id}"))?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            res.json::<Ack>().await.map_err(ClientError::Transport)?;
            return Ok(());
        }
        Err(Self::fail(res).await)
    }
}
