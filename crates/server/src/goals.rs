//! Savings-goals API endpoints

use api_types::{
    Ack,
    goal::{ContributeNew, ContributionView, GoalNew, GoalUpdate, GoalView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use engine::{Amount, GoalPatch, SavingsGoal};

use crate::{ServerError, missing_fields, parse_amount, server::ServerState, transactions, user};

fn view(goal: SavingsGoal) -> GoalView {
    GoalView {
        id: goal.id,
        name: goal.name,
        target_amount: goal.target.to_f64(),
        current_amount: goal.current.to_f64(),
        deadline: goal.deadline,
        category: goal.category,
        description: goal.description,
        is_completed: goal.is_completed,
        created_at: goal.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GoalView>>, ServerError> {
    let goals = state.engine.list_goals(&user.username).await?;
    Ok(Json(goals.into_iter().map(view).collect()))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state.engine.goal(id, &user.username).await?;
    Ok(Json(view(goal)))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalView>), ServerError> {
    let mut missing = Vec::new();
    if payload.name.is_none() {
        missing.push("name");
    }
    if payload.target_amount.is_none() {
        missing.push("targetAmount");
    }
    let (Some(name), Some(target)) = (payload.name, payload.target_amount) else {
        return Err(missing_fields(missing));
    };

    let target = parse_amount(target, "targetAmount")?;
    let current = payload
        .current_amount
        .map(|current| parse_amount(current, "currentAmount"))
        .transpose()?
        .unwrap_or(Amount::ZERO);

    let goal = state
        .engine
        .new_goal(
            &user.username,
            &name,
            target,
            current,
            payload.deadline,
            payload.category,
            payload.description,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(goal))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalUpdate>,
) -> Result<Json<GoalView>, ServerError> {
    let patch = GoalPatch {
        name: payload.name,
        target: payload
            .target_amount
            .map(|target| parse_amount(target, "targetAmount"))
            .transpose()?,
        current: payload
            .current_amount
            .map(|current| parse_amount(current, "currentAmount"))
            .transpose()?,
        deadline: payload.deadline,
        category: payload.category,
        description: payload.description,
        is_completed: payload.is_completed,
    };

    let goal = state.engine.update_goal(id, patch, &user.username).await?;
    Ok(Json(view(goal)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_goal(id, &user.username).await?;
    Ok(Json(Ack {
        message: "savings goal deleted".to_string(),
    }))
}

pub async fn contribute(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContributeNew>,
) -> Result<(StatusCode, Json<ContributionView>), ServerError> {
    let Some(amount) = payload.amount else {
        return Err(missing_fields(vec!["amount"]));
    };
    let amount = parse_amount(amount, "amount")?;

    let contribution = state
        .engine
        .contribute(id, amount, &user.username, Utc::now().date_naive())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ContributionView {
            goal: view(contribution.goal),
            transaction: transactions::view(contribution.transaction),
        }),
    ))
}
