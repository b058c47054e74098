//! Handler for `GET /openapi.json`.
//!
//! The document is derived from the handler annotations in [`crate::status`]
//! and the schema types, so `StatusEnum` lists exactly the literals
//! [`Status`] accepts.

use axum::Json;
use readmark_core::Status;
use utoipa::OpenApi;

use crate::{
  error::ErrorResponse,
  status::{self, StatusResponse, StatusUpsertRequest},
};

#[derive(OpenApi)]
#[openapi(
  info(title = "Read Status API"),
  paths(status::get_one, status::put_one),
  components(schemas(Status, StatusResponse, StatusUpsertRequest, ErrorResponse))
)]
pub struct ApiDoc;

/// `GET /openapi.json`
pub async fn handler() -> Json<utoipa::openapi::OpenApi> { Json(ApiDoc::openapi()) }
