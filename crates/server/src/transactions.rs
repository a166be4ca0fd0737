//! Transactions API endpoints

use api_types::{
    Ack,
    transaction::{TransactionNew, TransactionUpdate, TransactionView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{Category, Transaction, TransactionKind, TransactionPatch};

use crate::{ServerError, missing_fields, parse_amount, server::ServerState, user};

pub(crate) fn view(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: tx.kind.as_str().to_string(),
        amount: tx.amount.to_f64(),
        category: tx.category.as_str().to_string(),
        description: tx.description,
        date: tx.date,
        created_at: tx.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.list_transactions(&user.username).await?;
    Ok(Json(transactions.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let mut missing = Vec::new();
    if payload.kind.is_none() {
        missing.push("type");
    }
    if payload.amount.is_none() {
        missing.push("amount");
    }
    if payload.category.is_none() {
        missing.push("category");
    }
    if payload.description.is_none() {
        missing.push("description");
    }
    if payload.date.is_none() {
        missing.push("date");
    }
    let (Some(kind), Some(amount), Some(category), Some(description), Some(date)) = (
        payload.kind,
        payload.amount,
        payload.category,
        payload.description,
        payload.date,
    ) else {
        return Err(missing_fields(missing));
    };

    let kind = TransactionKind::try_from(kind.as_str())?;
    let amount = parse_amount(amount, "amount")?;
    let category = Category::try_from(category.as_str())?;

    let transaction = state
        .engine
        .new_transaction(&user.username, kind, amount, category, &description, date)
        .await?;

    Ok((StatusCode::CREATED, Json(view(transaction))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let patch = TransactionPatch {
        kind: payload
            .kind
            .as_deref()
            .map(TransactionKind::try_from)
            .transpose()?,
        amount: payload
            .amount
            .map(|amount| parse_amount(amount, "amount"))
            .transpose()?,
        category: payload
            .category
            .as_deref()
            .map(Category::try_from)
            .transpose()?,
        description: payload.description,
        date: payload.date,
    };

    let transaction = state
        .engine
        .update_transaction(id, patch, &user.username)
        .await?;
    Ok(Json(view(transaction)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_transaction(id, &user.username).await?;
    Ok(Json(Ack {
        message: "transaction deleted".to_string(),
    }))
}
