// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod directory;
mod operator;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use obtrack::SessionEvent;
use obtrack_api::{
    ApiError, AuthorizationService, CompleteImportResponse,
    FinishObligationImportResponse, ImportPayload, ImportWizard, OBLIGATION_TEMPLATE_FILE,
    ObligationBatch, ObligationImporter, ObligationStateResponse, OpenObligationImportRequest,
    SetMappingRequest, SetObligationMappingRequest, SheetDecoder, SpreadsheetDecoder,
    TransitionResponse, WizardStateResponse, obligation_template_csv,
};
use obtrack_domain::{MappedField, ObligationField};
use obtrack_persistence::{InMemorySessionStore, SessionStore, SqliteSessionStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::directory::{CompanyDirectory, CompanyEntry};
use crate::operator::Operator;

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Obtrack Server - HTTP surface for the compliance import wizards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file for wizard snapshots. If not provided, snapshots are kept in memory.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Key the wizard's snapshot is stored under
    #[arg(long, default_value = obtrack_api::DEFAULT_STORAGE_KEY)]
    storage_key: String,
}

/// The import sessions and the companies they feed.
///
/// Only one import runs at a time: opening either importer discards the
/// other's session.
struct Imports {
    wizard: ImportWizard,
    obligations: ObligationImporter,
    directory: CompanyDirectory,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    imports: Arc<Mutex<Imports>>,
}

impl AppState {
    fn new(store: Box<dyn SessionStore>, storage_key: &str) -> Result<Self, ApiError> {
        let decoder: Arc<dyn SheetDecoder> = Arc::new(SpreadsheetDecoder);
        let wizard: ImportWizard = ImportWizard::restore(store, storage_key, Arc::clone(&decoder))?;
        Ok(Self {
            imports: Arc::new(Mutex::new(Imports {
                wizard,
                obligations: ObligationImporter::new(decoder),
                directory: CompanyDirectory::new(),
            })),
        })
    }
}

/// Query parameters for file uploads.
#[derive(Debug, Deserialize)]
struct UploadQuery {
    /// The uploaded file's name; its extension selects the format.
    name: String,
}

/// API response for listing companies.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CompanySummaryResponse {
    id: String,
    name: String,
    users: usize,
    events: usize,
    obligations: usize,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
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
        let status: StatusCode = match err {
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::ValidationBlocked { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

fn transition_response(step: u8, event: &SessionEvent, error: Option<String>) -> TransitionResponse {
    TransitionResponse {
        step,
        event: event.to_string(),
        error,
    }
}

fn wizard_transition(wizard: &ImportWizard, event: &SessionEvent) -> Json<TransitionResponse> {
    let session = wizard.session();
    Json(transition_response(
        u8::from(session.step),
        event,
        session.error.clone(),
    ))
}

fn obligation_transition(
    importer: &ObligationImporter,
    event: &SessionEvent,
) -> Json<TransitionResponse> {
    let session = importer.session();
    Json(transition_response(
        u8::from(session.step),
        event,
        session.error.clone(),
    ))
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Handler for POST `/import/open` endpoint.
///
/// Opens the full wizard, discarding any open obligation import.
async fn handle_open_import(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(actor_id = %actor.id, role = %actor.role, "Handling open_import request");

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.wizard.open(&actor)?;
    if imports.obligations.session().step != obtrack::ObligationStep::Closed {
        imports.obligations.cancel()?;
    }
    Ok(wizard_transition(&imports.wizard, &event))
}

/// Handler for POST `/import/file` endpoint.
///
/// The request body is the file itself.
async fn handle_import_file(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_full_import(&actor).map_err(ApiError::from)?;
    info!(file_name = %query.name, bytes = body.len(), "Handling import_file request");

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports
        .wizard
        .select_file(&query.name, body.to_vec())
        .await?;
    Ok(wizard_transition(&imports.wizard, &event))
}

/// Handler for POST `/import/mapping` endpoint.
async fn handle_import_mapping(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Json(req): Json<SetMappingRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_full_import(&actor).map_err(ApiError::from)?;
    let field: MappedField = req.field.parse().map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.wizard.set_mapping(&req.sheet, &req.header, field)?;
    Ok(wizard_transition(&imports.wizard, &event))
}

/// Handler for POST `/import/advance` endpoint.
async fn handle_import_advance(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_full_import(&actor).map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.wizard.advance()?;
    Ok(wizard_transition(&imports.wizard, &event))
}

/// Handler for POST `/import/back` endpoint.
async fn handle_import_back(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_full_import(&actor).map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.wizard.back()?;
    Ok(wizard_transition(&imports.wizard, &event))
}

/// Handler for POST `/import/cancel` endpoint.
async fn handle_import_cancel(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_full_import(&actor).map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.wizard.cancel()?;
    Ok(wizard_transition(&imports.wizard, &event))
}

/// Handler for GET `/import/state` endpoint.
async fn handle_import_state(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<WizardStateResponse>, HttpError> {
    AuthorizationService::authorize_full_import(&actor).map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    Ok(Json(imports.wizard.state_response()))
}

/// Handler for POST `/import/complete` endpoint.
///
/// Adds the imported company to the directory.
async fn handle_import_complete(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<CompleteImportResponse>, HttpError> {
    AuthorizationService::authorize_full_import(&actor).map_err(ApiError::from)?;

    let mut guard = app_state.imports.lock().await;
    let imports: &mut Imports = &mut guard;
    let payload: ImportPayload = imports
        .wizard
        .complete(OffsetDateTime::now_utc(), &mut imports.directory)?;
    drop(guard);

    let message: String = format!(
        "Imported company {} with {} user(s) and {} event(s)",
        payload.company.name,
        payload.users.len(),
        payload.events.len()
    );
    Ok(Json(CompleteImportResponse { payload, message }))
}

/// Handler for POST `/obligations/open` endpoint.
///
/// Opens the obligation importer, discarding any open full wizard.
async fn handle_open_obligations(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Json(req): Json<OpenObligationImportRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        company_id = %req.company_id,
        "Handling open_obligations request"
    );
    AuthorizationService::authorize_obligation_import(&actor).map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    if imports.directory.get(&req.company_id).is_none() {
        return Err(HttpError::from(ApiError::ResourceNotFound {
            resource_type: String::from("Company"),
            message: format!("no company with id '{}'", req.company_id),
        }));
    }

    let event: SessionEvent = imports.obligations.open(&actor, &req.company_id)?;
    if imports.wizard.session().show {
        imports.wizard.cancel()?;
    }
    Ok(obligation_transition(&imports.obligations, &event))
}

/// Handler for POST `/obligations/file` endpoint.
async fn handle_obligations_file(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_obligation_import(&actor).map_err(ApiError::from)?;
    info!(file_name = %query.name, bytes = body.len(), "Handling obligations_file request");

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports
        .obligations
        .select_file(&query.name, body.to_vec())
        .await?;
    Ok(obligation_transition(&imports.obligations, &event))
}

/// Handler for POST `/obligations/mapping` endpoint.
async fn handle_obligations_mapping(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Json(req): Json<SetObligationMappingRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_obligation_import(&actor).map_err(ApiError::from)?;
    let field: ObligationField = req.field.parse().map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.obligations.set_mapping(&req.header, field)?;
    Ok(obligation_transition(&imports.obligations, &event))
}

/// Handler for POST `/obligations/advance` endpoint.
async fn handle_obligations_advance(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_obligation_import(&actor).map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.obligations.advance()?;
    Ok(obligation_transition(&imports.obligations, &event))
}

/// Handler for POST `/obligations/back` endpoint.
async fn handle_obligations_back(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_obligation_import(&actor).map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.obligations.back()?;
    Ok(obligation_transition(&imports.obligations, &event))
}

/// Handler for POST `/obligations/cancel` endpoint.
async fn handle_obligations_cancel(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<TransitionResponse>, HttpError> {
    AuthorizationService::authorize_obligation_import(&actor).map_err(ApiError::from)?;

    let mut imports = app_state.imports.lock().await;
    let event: SessionEvent = imports.obligations.cancel()?;
    Ok(obligation_transition(&imports.obligations, &event))
}

/// Handler for GET `/obligations/state` endpoint.
async fn handle_obligations_state(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<ObligationStateResponse>, HttpError> {
    AuthorizationService::authorize_obligation_import(&actor).map_err(ApiError::from)?;

    let imports = app_state.imports.lock().await;
    Ok(Json(imports.obligations.state_response(today())))
}

/// Handler for POST `/obligations/finish` endpoint.
///
/// Appends the reviewed obligations to the target company.
async fn handle_obligations_finish(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
) -> Result<Json<FinishObligationImportResponse>, HttpError> {
    AuthorizationService::authorize_obligation_import(&actor).map_err(ApiError::from)?;

    let today: Date = today();
    let mut guard = app_state.imports.lock().await;
    let imports: &mut Imports = &mut guard;
    let advisory_errors: usize = imports.obligations.review(today).errors.len();
    let batch: ObligationBatch = imports
        .obligations
        .finish(today, &mut imports.directory)?;
    drop(guard);

    Ok(Json(FinishObligationImportResponse {
        imported: batch.obligations.len(),
        message: format!(
            "Imported {} obligation(s) into {}",
            batch.obligations.len(),
            batch.company_id
        ),
        company_id: batch.company_id,
        advisory_errors,
    }))
}

/// Handler for GET `/obligations/template` endpoint.
///
/// Serves the obligation template as a CSV download.
#[allow(clippy::unused_async)]
async fn handle_obligations_template() -> Result<Response, HttpError> {
    let bytes: Vec<u8> = obligation_template_csv()?;
    let headers: [(header::HeaderName, String); 2] = [
        (header::CONTENT_TYPE, String::from("text/csv")),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{OBLIGATION_TEMPLATE_FILE}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// Handler for GET `/companies` endpoint.
async fn handle_list_companies(
    AxumState(app_state): AxumState<AppState>,
) -> Json<Vec<CompanySummaryResponse>> {
    let imports = app_state.imports.lock().await;
    Json(
        imports
            .directory
            .companies()
            .map(|entry: &CompanyEntry| CompanySummaryResponse {
                id: entry.company.id.clone(),
                name: entry.company.name.clone(),
                users: entry.users.len(),
                events: entry.events.len(),
                obligations: entry.obligations.len(),
            })
            .collect(),
    )
}

/// Handler for GET `/companies/{company_id}` endpoint.
async fn handle_get_company(
    AxumState(app_state): AxumState<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanyEntry>, HttpError> {
    let imports = app_state.imports.lock().await;
    imports.directory.get(&company_id).cloned().map(Json).ok_or_else(|| {
        HttpError::from(ApiError::ResourceNotFound {
            resource_type: String::from("Company"),
            message: format!("no company with id '{company_id}'"),
        })
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/import/open", post(handle_open_import))
        .route("/import/file", post(handle_import_file))
        .route("/import/mapping", post(handle_import_mapping))
        .route("/import/advance", post(handle_import_advance))
        .route("/import/back", post(handle_import_back))
        .route("/import/cancel", post(handle_import_cancel))
        .route("/import/state", get(handle_import_state))
        .route("/import/complete", post(handle_import_complete))
        .route("/obligations/open", post(handle_open_obligations))
        .route("/obligations/file", post(handle_obligations_file))
        .route("/obligations/mapping", post(handle_obligations_mapping))
        .route("/obligations/advance", post(handle_obligations_advance))
        .route("/obligations/back", post(handle_obligations_back))
        .route("/obligations/cancel", post(handle_obligations_cancel))
        .route("/obligations/state", get(handle_obligations_state))
        .route("/obligations/finish", post(handle_obligations_finish))
        .route("/obligations/template", get(handle_obligations_template))
        .route("/companies", get(handle_list_companies))
        .route("/companies/{company_id}", get(handle_get_company))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Obtrack Server");

    // Snapshot storage (file-based SQLite or in-memory)
    let store: Box<dyn SessionStore> = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Box::new(SqliteSessionStore::new_with_file(db_path)?)
    } else {
        info!("Keeping wizard snapshots in memory");
        Box::new(InMemorySessionStore::new())
    };

    let app_state: AppState = AppState::new(store, &args.storage_key)?;

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
