//! Recurring-transactions API endpoints

use api_types::{
    Ack,
    recurring::{RecurringNew, RecurringUpdate, RecurringView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{Category, Frequency, RecurringPatch, RecurringTransaction, TransactionKind};

use crate::{ServerError, missing_fields, parse_amount, server::ServerState, user};

fn view(template: RecurringTransaction) -> RecurringView {
    RecurringView {
        id: template.id,
        kind: template.kind.as_str().to_string(),
        amount: template.amount.to_f64(),
        category: template.category.as_str().to_string(),
        description: template.description,
        frequency: template.frequency.as_str().to_string(),
        start_date: template.start_date,
        end_date: template.end_date,
        last_run: template.last_run,
        is_active: template.is_active,
        created_at: template.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<RecurringView>>, ServerError> {
    let templates = state.engine.list_recurring(&user.username).await?;
    Ok(Json(templates.into_iter().map(view).collect()))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecurringView>, ServerError> {
    let template = state.engine.recurring(id, &user.username).await?;
    Ok(Json(view(template)))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<RecurringNew>,
) -> Result<(StatusCode, Json<RecurringView>), ServerError> {
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
    if payload.frequency.is_none() {
        missing.push("frequency");
    }
    if payload.start_date.is_none() {
        missing.push("startDate");
    }
    let (Some(kind), Some(amount), Some(category), Some(frequency), Some(start_date)) = (
        payload.kind,
        payload.amount,
        payload.category,
        payload.frequency,
        payload.start_date,
    ) else {
        return Err(missing_fields(missing));
    };

    let kind = TransactionKind::try_from(kind.as_str())?;
    let amount = parse_amount(amount, "amount")?;
    let category = Category::try_from(category.as_str())?;
    let frequency = Frequency::try_from(frequency.as_str())?;
    let description = payload.description.unwrap_or_default();

    let template = state
        .engine
        .new_recurring(
            &user.username,
            kind,
            amount,
            category,
            &description,
            frequency,
            start_date,
            payload.end_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(template))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecurringUpdate>,
) -> Result<Json<RecurringView>, ServerError> {
    let patch = RecurringPatch {
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
        frequency: payload
            .frequency
            .as_deref()
            .map(Frequency::try_from)
            .transpose()?,
        start_date: payload.start_date,
        end_date: payload.end_date,
        is_active: payload.is_active,
    };

    let template = state
        .engine
        .update_recurring(id, patch, &user.username)
        .await?;
    Ok(Json(view(template)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_recurring(id, &user.username).await?;
    Ok(Json(Ack {
        message: "recurring transaction deleted".to_string(),
    }))
}
