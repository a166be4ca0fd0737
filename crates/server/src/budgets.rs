//! Budgets API endpoints

use api_types::{
    Ack,
    budget::{BudgetNew, BudgetUpdate, BudgetView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{Budget, BudgetPatch, BudgetPeriod, Category};

use crate::{ServerError, missing_fields, parse_amount, server::ServerState, user};

fn view(budget: Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        category: budget.category.as_str().to_string(),
        limit: budget.limit.to_f64(),
        period: budget.period.as_str().to_string(),
        created_at: budget.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let budgets = state.engine.list_budgets(&user.username).await?;
    Ok(Json(budgets.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let mut missing = Vec::new();
    if payload.category.is_none() {
        missing.push("category");
    }
    if payload.limit.is_none() {
        missing.push("limit");
    }
    if payload.period.is_none() {
        missing.push("period");
    }
    let (Some(category), Some(limit), Some(period)) =
        (payload.category, payload.limit, payload.period)
    else {
        return Err(missing_fields(missing));
    };

    let category = Category::try_from(category.as_str())?;
    let limit = parse_amount(limit, "limit")?;
    let period = BudgetPeriod::try_from(period.as_str())?;

    let budget = state
        .engine
        .new_budget(&user.username, category, limit, period)
        .await?;

    Ok((StatusCode::CREATED, Json(view(budget))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<Json<BudgetView>, ServerError> {
    let patch = BudgetPatch {
        category: payload
            .category
            .as_deref()
            .map(Category::try_from)
            .transpose()?,
        limit: payload
            .limit
            .map(|limit| parse_amount(limit, "limit"))
            .transpose()?,
        period: payload
            .period
            .as_deref()
            .map(BudgetPeriod::try_from)
            .transpose()?,
    };

    let budget = state.engine.update_budget(id, patch, &user.username).await?;
    Ok(Json(view(budget)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_budget(id, &user.username).await?;
    Ok(Json(Ack {
        message: "budget deleted".to_string(),
    }))
}
