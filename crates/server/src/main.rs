// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the Procure request portal.
//!
//! Exposes the lifecycle engine's boundary operations as JSON
//! endpoints. Authentication, authorization, and directory
//! synchronization are upstream concerns; this server maps HTTP to the
//! `procure-api` operations and back.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use procure_api::{
    ApiError, CreateRequestParams, SplinterCheckParams, SplinterConfig, TransitionParams,
    UpdateSettingsParams,
};
use procure_domain::{LoadBalancingSettings, Request, RequestStatus, SplinteringCheckResult};
use procure_persistence::Persistence;

/// Procure Server - HTTP server for the procurement request portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer behind a mutex for concurrent handlers.
    persistence: Arc<Mutex<Persistence>>,
    /// Deployment-level splintering configuration.
    splinter: SplinterConfig,
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestNotFound(_) | ApiError::SettingsNotConfigured => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Validation(_) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::SplinteringBlocked { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::Persistence(_) => {
                error!(error = %err, "Persistence error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

// ============================================================================
// Request/response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateDepartmentBody {
    name: String,
}

#[derive(Debug, Serialize)]
struct CreateDepartmentResponse {
    department_id: i64,
}

#[derive(Debug, Deserialize)]
struct CreateUserBody {
    login_name: String,
    display_name: String,
    role: String,
    department_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CreateUserResponse {
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct TransitionBody {
    new_status: RequestStatus,
    actor_id: Option<i64>,
    comment: Option<String>,
    #[serde(default)]
    supervisor_override: bool,
}

#[derive(Debug, Serialize)]
struct AutoAssignResponse {
    officer_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct RepairPassResponse {
    description: String,
    rows_affected: usize,
}

#[derive(Debug, Serialize)]
struct RepairResponse {
    rows_repaired: usize,
    passes: Vec<RepairPassResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn handle_healthz() -> StatusCode {
    StatusCode::OK
}

async fn handle_create_department(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<CreateDepartmentBody>,
) -> Result<Json<CreateDepartmentResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let department_id = persistence
        .create_department(&body.name)
        .map_err(ApiError::from)?;
    Ok(Json(CreateDepartmentResponse { department_id }))
}

async fn handle_list_departments(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<procure_domain::Department>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let departments = persistence.list_departments().map_err(ApiError::from)?;
    Ok(Json(departments))
}

async fn handle_create_user(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<Json<CreateUserResponse>, HttpError> {
    // Validate the role string before it reaches storage.
    body.role
        .parse::<procure_domain::Role>()
        .map_err(ApiError::Validation)?;
    let mut persistence = state.persistence.lock().await;
    let user_id = persistence
        .create_user(
            &body.login_name,
            &body.display_name,
            &body.role,
            body.department_id,
            &procure_api::now_timestamp(),
        )
        .map_err(ApiError::from)?;
    Ok(Json(CreateUserResponse { user_id }))
}

async fn handle_create_request(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<CreateRequestParams>,
) -> Result<Json<Request>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let request = procure_api::create_request(&mut persistence, &body)?;
    Ok(Json(request))
}

async fn handle_get_request(
    AxumState(state): AxumState<AppState>,
    Path(request_id): Path<i64>,
) -> Result<Json<Request>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let request = procure_api::get_request(&mut persistence, request_id)?;
    Ok(Json(request))
}

async fn handle_get_history(
    AxumState(state): AxumState<AppState>,
    Path(request_id): Path<i64>,
) -> Result<Json<Vec<procure_audit::StatusChange>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let history = procure_api::get_request_history(&mut persistence, request_id)?;
    Ok(Json(history))
}

async fn handle_transition(
    AxumState(state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(body): Json<TransitionBody>,
) -> Result<Json<procure_api::TransitionOutcome>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let outcome = procure_api::transition_request(
        &mut persistence,
        &TransitionParams {
            request_id,
            new_status: body.new_status,
            actor_id: body.actor_id,
            comment: body.comment,
            supervisor_override: body.supervisor_override,
        },
        &state.splinter,
    )?;
    Ok(Json(outcome))
}

async fn handle_auto_assign(
    AxumState(state): AxumState<AppState>,
    Path(request_id): Path<i64>,
) -> Json<AutoAssignResponse> {
    let mut persistence = state.persistence.lock().await;
    let officer_id = procure_api::auto_assign_request(&mut persistence, request_id);
    Json(AutoAssignResponse { officer_id })
}

async fn handle_check_splintering(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<SplinterCheckParams>,
) -> Result<Json<SplinteringCheckResult>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = procure_api::check_splintering(&mut persistence, &body, &state.splinter)?;
    Ok(Json(result))
}

async fn handle_repair_statuses(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<RepairResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let summary = procure_api::repair_statuses(&mut persistence)?;
    Ok(Json(RepairResponse {
        rows_repaired: summary.total_rows,
        passes: summary
            .passes
            .into_iter()
            .map(|pass| RepairPassResponse {
                description: pass.description,
                rows_affected: pass.rows_affected,
            })
            .collect(),
    }))
}

async fn handle_get_settings(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Option<LoadBalancingSettings>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let settings = procure_api::get_load_balancing_settings(&mut persistence)?;
    Ok(Json(settings))
}

async fn handle_update_settings(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<UpdateSettingsParams>,
) -> Result<Json<LoadBalancingSettings>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let settings = procure_api::update_load_balancing_settings(&mut persistence, &body)?;
    Ok(Json(settings))
}

#[derive(Debug, Deserialize)]
struct ResetCounterBody {
    updated_by: Option<i64>,
}

async fn handle_reset_counter(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<ResetCounterBody>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = state.persistence.lock().await;
    procure_api::reset_round_robin_counter(&mut persistence, body.updated_by)?;
    Ok(StatusCode::NO_CONTENT)
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handle_healthz))
        .route("/departments", post(handle_create_department))
        .route("/departments", get(handle_list_departments))
        .route("/users", post(handle_create_user))
        .route("/requests", post(handle_create_request))
        .route("/requests/{request_id}", get(handle_get_request))
        .route("/requests/{request_id}/history", get(handle_get_history))
        .route("/requests/{request_id}/transition", post(handle_transition))
        .route("/requests/{request_id}/auto-assign", post(handle_auto_assign))
        .route("/splintering/check", post(handle_check_splintering))
        .route("/admin/repair-statuses", post(handle_repair_statuses))
        .route("/admin/load-balancing", get(handle_get_settings))
        .route("/admin/load-balancing", put(handle_update_settings))
        .route(
            "/admin/load-balancing/reset-counter",
            post(handle_reset_counter),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Local .env files supply SPLINTER_* in development.
    dotenvy::dotenv().ok();

    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Procure Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        splinter: SplinterConfig::from_env(),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
