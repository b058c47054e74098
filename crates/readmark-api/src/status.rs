//! Handlers for `/articles/{article_id}/status`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/articles/{article_id}/status` | Creates a `to_read` row on first access; always 200 |
//! | `PUT`  | `/articles/{article_id}/status` | Body: `{"status":"reading"}`; 422 on unknown or malformed status |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use readmark_core::{ReadingStatus, Status, StatusService, StatusStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorResponse};

/// Response body for both routes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct StatusResponse {
  pub article_id: String,
  pub status:     Status,
}

impl From<ReadingStatus> for StatusResponse {
  fn from(r: ReadingStatus) -> Self {
    Self {
      article_id: r.article_id,
      status:     r.status,
    }
  }
}

/// JSON body accepted by `PUT`.
///
/// Built from a JSON object only. `status` is kept as a raw string so that
/// unknown literals are rejected by the service rather than here.
#[derive(Debug, ToSchema)]
pub struct StatusUpsertRequest {
  #[schema(value_type = Status)]
  pub status: String,
}

impl TryFrom<Map<String, Value>> for StatusUpsertRequest {
  type Error = ApiError;

  fn try_from(mut body: Map<String, Value>) -> Result<Self, ApiError> {
    match body.remove("status") {
      Some(Value::String(status)) => Ok(Self { status }),
      Some(other) => Err(ApiError::Validation(format!(
        "`status` must be a string, got {other}"
      ))),
      None => Err(ApiError::Validation("missing field `status`".to_string())),
    }
  }
}

// ─── Get ──────────────────────────────────────────────────────────────────────

/// `GET /articles/{article_id}/status`
#[utoipa::path(
  get,
  path = "/articles/{article_id}/status",
  operation_id = "get_article_status",
  params(("article_id" = String, Path, description = "Opaque article identifier")),
  responses(
    (status = 200, description = "Article reading status", body = StatusResponse),
  ),
)]
pub async fn get_one<S>(
  State(service): State<StatusService<S>>,
  Path(article_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError>
where
  S: StatusStore + 'static,
{
  let record = service.get_or_create(&article_id).await?;
  tracing::debug!(%article_id, status = %record.status, "status read");
  Ok(Json(record.into()))
}

// ─── Put ──────────────────────────────────────────────────────────────────────

/// `PUT /articles/{article_id}/status` — body: `{"status":"<literal>"}`
#[utoipa::path(
  put,
  path = "/articles/{article_id}/status",
  operation_id = "put_article_status",
  params(("article_id" = String, Path, description = "Opaque article identifier")),
  request_body = StatusUpsertRequest,
  responses(
    (status = 200, description = "Updated article reading status", body = StatusResponse),
    (status = 422, description = "Unknown or malformed status", body = ErrorResponse),
  ),
)]
pub async fn put_one<S>(
  State(service): State<StatusService<S>>,
  Path(article_id): Path<String>,
  body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError>
where
  S: StatusStore + 'static,
{
  let body = body
    .map_err(ApiError::from)
    .and_then(|Json(map)| StatusUpsertRequest::try_from(map))
    .inspect_err(|e| tracing::debug!(%article_id, error = %e, "rejected status body"))?;

  let record = service.set_status(&article_id, &body.status).await?;
  tracing::info!(%article_id, status = %record.status, "status updated");
  Ok(Json(record.into()))
}
