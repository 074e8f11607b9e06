//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use herosheet_domain::{self as domain, ActorId, ActorKind, DomainError, Item, ItemData, ItemId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::app::App;
use crate::infrastructure::ports::ChatMessage;
use crate::use_cases::{ActorError, CreateActorInput, RollError};

const DEFAULT_CHAT_LIMIT: usize = 50;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/actors", get(list_actors).post(create_actor))
        .route("/api/actors/{id}", get(get_actor).delete(delete_actor))
        .route("/api/actors/{id}/name", put(rename_actor))
        .route("/api/actors/{id}/skill-points", put(set_skill_points))
        .route("/api/actors/{id}/prepare", post(prepare_actor))
        .route("/api/actors/{id}/items", post(add_item))
        .route(
            "/api/actors/{id}/items/{item_id}",
            put(update_item).delete(remove_item),
        )
        .route(
            "/api/actors/{id}/skills/{skill_id}/roll",
            post(roll_skill),
        )
        .route("/api/chat", get(list_chat))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Actors
// =============================================================================

/// Item as sent by clients: no id, `type` + `system` payload.
#[derive(Debug, Deserialize)]
struct ItemRequest {
    name: String,
    #[serde(flatten)]
    data: ItemData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateActorRequest {
    name: String,
    kind: ActorKind,
    #[serde(default)]
    skill_points_total: Option<i32>,
    #[serde(default)]
    items: Vec<ItemRequest>,
}

#[derive(Debug, Deserialize)]
struct RenameRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SkillPointsRequest {
    total: i32,
}

async fn list_actors(State(app): State<Arc<App>>) -> Result<Json<Vec<domain::Actor>>, ApiError> {
    let actors = app.use_cases.actor.ops.list().await?;
    Ok(Json(actors))
}

async fn create_actor(
    State(app): State<Arc<App>>,
    Json(req): Json<CreateActorRequest>,
) -> Result<(StatusCode, Json<domain::Actor>), ApiError> {
    let items = req
        .items
        .into_iter()
        .map(|item| Item::new(item.name, item.data))
        .collect::<Result<Vec<_>, DomainError>>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let actor = app
        .use_cases
        .actor
        .create
        .execute(CreateActorInput {
            name: req.name,
            kind: req.kind,
            skill_points_total: req.skill_points_total,
            items,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

async fn get_actor(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<domain::Actor>, ApiError> {
    let actor = app.use_cases.actor.ops.get(ActorId::from_uuid(id)).await?;
    Ok(Json(actor))
}

async fn delete_actor(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .actor
        .ops
        .delete(ActorId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn rename_actor(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<domain::Actor>, ApiError> {
    let actor = app
        .use_cases
        .actor
        .ops
        .rename(ActorId::from_uuid(id), req.name)
        .await?;
    Ok(Json(actor))
}

async fn set_skill_points(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SkillPointsRequest>,
) -> Result<Json<domain::Actor>, ApiError> {
    let actor = app
        .use_cases
        .actor
        .ops
        .set_skill_points(ActorId::from_uuid(id), req.total)
        .await?;
    Ok(Json(actor))
}

async fn prepare_actor(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<domain::Actor>, ApiError> {
    let actor = app
        .use_cases
        .actor
        .prepare
        .execute(ActorId::from_uuid(id))
        .await?;
    Ok(Json(actor))
}

// =============================================================================
// Items
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemAddedResponse {
    item_id: ItemId,
    actor: domain::Actor,
}

async fn add_item(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ItemRequest>,
) -> Result<(StatusCode, Json<ItemAddedResponse>), ApiError> {
    let (actor, item_id) = app
        .use_cases
        .items
        .add(ActorId::from_uuid(id), req.name, req.data)
        .await?;
    Ok((StatusCode::CREATED, Json(ItemAddedResponse { item_id, actor })))
}

async fn update_item(
    State(app): State<Arc<App>>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<ItemRequest>,
) -> Result<Json<domain::Actor>, ApiError> {
    let actor = app
        .use_cases
        .items
        .update(
            ActorId::from_uuid(id),
            ItemId::from_uuid(item_id),
            req.name,
            req.data,
        )
        .await?;
    Ok(Json(actor))
}

async fn remove_item(
    State(app): State<Arc<App>>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<domain::Actor>, ApiError> {
    let actor = app
        .use_cases
        .items
        .remove(ActorId::from_uuid(id), ItemId::from_uuid(item_id))
        .await?;
    Ok(Json(actor))
}

// =============================================================================
// Rolls & chat
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RollQuery {
    item_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RollResponse {
    outcome: domain::SkillCheckOutcome,
    message: ChatMessage,
}

async fn roll_skill(
    State(app): State<Arc<App>>,
    Path((id, skill_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<RollQuery>,
) -> Result<Json<RollResponse>, ApiError> {
    let result = app
        .use_cases
        .roll
        .execute(
            ActorId::from_uuid(id),
            ItemId::from_uuid(skill_id),
            query.item_id.map(ItemId::from_uuid),
        )
        .await?;
    Ok(Json(RollResponse {
        outcome: result.outcome,
        message: result.message,
    }))
}

#[derive(Debug, Default, Deserialize)]
struct ChatQuery {
    limit: Option<usize>,
}

async fn list_chat(
    State(app): State<Arc<App>>,
    Query(query): Query<ChatQuery>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let messages = app
        .repositories
        .chat
        .recent(query.limit.unwrap_or(DEFAULT_CHAT_LIMIT))
        .await?;
    Ok(Json(messages))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(e: crate::infrastructure::ports::RepoError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { .. } => ApiError::NotFound,
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ActorError> for ApiError {
    fn from(e: ActorError) -> Self {
        match e {
            ActorError::NotFound(_) => ApiError::NotFound,
            ActorError::Domain(e) => e.into(),
            ActorError::Repo(e) => e.into(),
        }
    }
}

impl From<RollError> for ApiError {
    fn from(e: RollError) -> Self {
        match e {
            RollError::ActorNotFound(_) => ApiError::NotFound,
            RollError::Domain(e) => e.into(),
            RollError::Repo(e) => e.into(),
        }
    }
}
