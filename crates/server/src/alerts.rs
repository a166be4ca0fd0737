//! Alerts API endpoints

use api_types::{
    Ack,
    alert::{AlertDeleteParams, AlertListParams, AlertNew, AlertPatch, AlertView},
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};

use engine::{Alert, AlertKind, AlertSeverity};

use crate::{ServerError, missing_fields, server::ServerState, user};

fn view(alert: Alert) -> AlertView {
    AlertView {
        id: alert.id,
        kind: alert.kind.as_str().to_string(),
        title: alert.title,
        message: alert.message,
        severity: alert.severity.as_str().to_string(),
        is_read: alert.is_read,
        metadata: alert
            .metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok()),
        created_at: alert.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(params): Query<AlertListParams>,
) -> Result<Json<Vec<AlertView>>, ServerError> {
    let alerts = state
        .engine
        .list_alerts(&user.username, params.unread_only.unwrap_or(false))
        .await?;
    Ok(Json(alerts.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<AlertNew>,
) -> Result<(StatusCode, Json<AlertView>), ServerError> {
    let mut missing = Vec::new();
    if payload.kind.is_none() {
        missing.push("type");
    }
    if payload.title.is_none() {
        missing.push("title");
    }
    if payload.message.is_none() {
        missing.push("message");
    }
    if payload.severity.is_none() {
        missing.push("severity");
    }
    let (Some(kind), Some(title), Some(message), Some(severity)) = (
        payload.kind,
        payload.title,
        payload.message,
        payload.severity,
    ) else {
        return Err(missing_fields(missing));
    };

    let kind = AlertKind::try_from(kind.as_str())?;
    let severity = AlertSeverity::try_from(severity.as_str())?;
    let metadata = payload.metadata.map(|value| value.to_string());

    let alert = state
        .engine
        .new_alert(&user.username, kind, &title, &message, severity, metadata)
        .await?;

    Ok((StatusCode::CREATED, Json(view(alert))))
}

pub async fn mark_read(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<AlertPatch>,
) -> Result<Json<Ack>, ServerError> {
    let updated = match (payload.alert_ids, payload.mark_all_as_read) {
        (Some(ids), _) if !ids.is_empty() => {
            state.engine.mark_alerts_read(&ids, &user.username).await?
        }
        (_, Some(true)) => state.engine.mark_all_alerts_read(&user.username).await?,
        _ => {
            return Err(ServerError::Generic(
                "alertIds or markAllAsRead is required".to_string(),
            ));
        }
    };

    Ok(Json(Ack {
        message: format!("{updated} alert(s) marked as read"),
    }))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(params): Query<AlertDeleteParams>,
) -> Result<Json<Ack>, ServerError> {
    match (params.id, params.delete_all) {
        (Some(id), None | Some(false)) => {
            state.engine.delete_alert(id, &user.username).await?;
            Ok(Json(Ack {
                message: "alert deleted".to_string(),
            }))
        }
        (None, Some(true)) => {
            let deleted = state.engine.delete_all_alerts(&user.username).await?;
            Ok(Json(Ack {
                message: format!("{deleted} alert(s) deleted"),
            }))
        }
        _ => Err(ServerError::Generic(
            "provide either id or deleteAll".to_string(),
        )),
    }
}
