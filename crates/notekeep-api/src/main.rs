//! notekeep-api - HTTP API server for notekeep

use std::net::SocketAddr;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use notekeep_core::{
    CreateNoteRequest, FolderRepository, ListNotesRequest, NoteRepository, TagRepository,
    UpdateNoteRequest,
};
use notekeep_db::{log_pool_metrics, Database};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically across log
/// output even when requests interleave.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    db: Database,
}

/// Assemble the route table over the shared state.
///
/// Middleware is layered on separately in `main`; tests serve this router
/// directly.
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Notes
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        // Folders
        .route("/folders", get(list_folders).post(create_folder))
        .route(
            "/folders/:id",
            get(get_folder).put(update_folder).delete(delete_folder),
        )
        // Tags
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/:id", get(get_tag).put(update_tag).delete(delete_tag))
        .fallback(not_found)
        .with_state(state)
}

/// Parse the `ALLOWED_ORIGINS` environment variable into CORS origin values.
///
/// Comma-separated; invalid entries are logged and skipped. Unset or empty
/// falls back to the local development frontend.
fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str =
        std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());

    if origins_str.trim().is_empty() {
        return vec![HeaderValue::from_static("http://localhost:3000")];
    }

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "notekeep_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notekeep_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        let mut layer = tracing_subscriber::fmt::layer();
        if let Some(ansi) = log_ansi {
            layer = layer.with_ansi(ansi);
        }
        registry.with(layer).init();
    }

    info!(log_format = %log_format, "Logging initialized");

    // Get configuration from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/notekeep".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    info!("Database connected");
    log_pool_metrics(db.pool());

    let state = AppState { db };

    let app = api_routes(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer({
            let allowed_origins = parse_allowed_origins();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600))
        })
        // JSON bodies only; 1 MiB is plenty for a note
        .layer(RequestBodyLimitLayer::new(1024 * 1024));

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// =============================================================================
// NOTE HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListNotesQuery {
    search_term: Option<String>,
    folder_id: Option<i64>,
    tag_id: Option<i64>,
}

async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let req = ListNotesRequest {
        search_term: query.search_term,
        folder_id: query.folder_id,
        tag_id: query.tag_id,
    };

    let notes = state.db.notes.list(req).await?;
    Ok(Json(notes))
}

async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.fetch(id).await?;
    Ok(Json(note))
}

/// Request body shared by note create and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteBody {
    title: Option<String>,
    content: Option<String>,
    folder_id: Option<i64>,
    #[serde(default)]
    tags: Vec<i64>,
}

async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<NoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(title) = body.title.filter(|t| !t.is_empty()) else {
        return Err(ApiError::BadRequest(
            "Missing `title` in request body".to_string(),
        ));
    };

    let note = state
        .db
        .notes
        .create(CreateNoteRequest {
            title,
            content: body.content,
            folder_id: body.folder_id,
            tags: body.tags,
        })
        .await?;

    let location = format!("/notes/{}", note.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(note),
    ))
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(title) = body.title.filter(|t| !t.is_empty()) else {
        return Err(ApiError::BadRequest(
            "Missing `title` in request body".to_string(),
        ));
    };

    let note = state
        .db
        .notes
        .update(
            id,
            UpdateNoteRequest {
                title,
                content: body.content,
                folder_id: body.folder_id,
                tags: body.tags,
            },
        )
        .await?;
    Ok(Json(note))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.notes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// FOLDER HANDLERS
// =============================================================================

async fn list_folders(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let folders = state.db.folders.list().await?;
    Ok(Json(folders))
}

async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let folder = state
        .db
        .folders
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("folder {}", id)))?;
    Ok(Json(folder))
}

#[derive(Debug, Deserialize)]
struct FolderBody {
    name: Option<String>,
}

async fn create_folder(
    State(state): State<AppState>,
    Json(body): Json<FolderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(name) = body.name.filter(|n| !n.is_empty()) else {
        return Err(ApiError::BadRequest("Folder must have a name".to_string()));
    };

    let folder = state.db.folders.create(&name).await?;

    let location = format!("/folders/{}", folder.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(folder),
    ))
}

async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<FolderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(name) = body.name.filter(|n| !n.is_empty()) else {
        return Err(ApiError::BadRequest("Folder must have a name".to_string()));
    };

    let folder = state.db.folders.update(id, &name).await?;
    Ok(Json(folder))
}

async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.folders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// TAG HANDLERS
// =============================================================================

async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tags = state.db.tags.list().await?;
    Ok(Json(tags))
}

async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = state
        .db
        .tags
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("tag {}", id)))?;
    Ok(Json(tag))
}

#[derive(Debug, Deserialize)]
struct TagBody {
    name: Option<String>,
}

async fn create_tag(
    State(state): State<AppState>,
    Json(body): Json<TagBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(name) = body.name.filter(|n| !n.is_empty()) else {
        return Err(ApiError::BadRequest("Tag must have a name".to_string()));
    };

    let tag = state.db.tags.create(&name).await?;

    let location = format!("/tags/{}", tag.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(tag),
    ))
}

async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<TagBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(name) = body.name.filter(|n| !n.is_empty()) else {
        return Err(ApiError::BadRequest("Tag must have a name".to_string()));
    };

    let tag = state.db.tags.update(id, &name).await?;
    Ok(Json(tag))
}

async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.tags.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    Database(notekeep_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<notekeep_core::Error> for ApiError {
    fn from(err: notekeep_core::Error) -> Self {
        match err {
            notekeep_core::Error::NoteNotFound(id) => ApiError::NotFound(format!("note {}", id)),
            notekeep_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            notekeep_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // Client-facing 404 and 500 bodies are generic; the detail goes to
        // the log only.
        let (status, message) = match self {
            ApiError::Database(err) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            ApiError::NotFound(what) => {
                debug!(resource = %what, "Not found");
                (StatusCode::NOT_FOUND, "Not Found".to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Fallback for unmatched routes.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Not Found" })),
    )
}

// =============================================================================
// TESTS
// =============================================================================
