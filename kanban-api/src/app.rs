/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use kanban_api::{app::AppState, config::Config};
/// use kanban_shared::auth::session::MemorySessionStore;
/// use kanban_shared::store::MemoryKanbanStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::default();
/// let sessions = MemorySessionStore::new(config.session.ttl());
/// let state = AppState::new(Arc::new(MemoryKanbanStore::new()), Arc::new(sessions), config);
/// let app = kanban_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, session};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use kanban_shared::{auth::session::SessionStore, store::KanbanStore};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Backends
/// sit behind `Arc<dyn ...>` so the same handlers run against PostgreSQL or
/// memory, Redis or in-process sessions.
#[derive(Clone)]
pub struct AppState {
    /// User, board and task persistence
    pub store: Arc<dyn KanbanStore>,

    /// Cookie session backend
    pub sessions: Arc<dyn SessionStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        store: Arc<dyn KanbanStore>,
        sessions: Arc<dyn SessionStore>,
        config: Config,
    ) -> Self {
        Self {
            store,
            sessions,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /health                  # Health check (public)
/// └── /api/
///     ├── /auth/                   # Public
///     │   ├── POST /register
///     │   ├── POST /login
///     │   ├── POST /logout
///     │   └── GET  /check
///     ├── /boards/                 # Session required
///     │   ├── GET  /
///     │   ├── POST /
///     │   └── GET  /:id
///     └── /tasks/                  # Session required
///         ├── POST   /
///         ├── GET    /:id          # :id is the board id
///         ├── PUT    /:id
///         ├── DELETE /:id
///         └── PUT    /:id/status
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Session check (board and task routes)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/check", get(routes::auth::check));

    let board_routes = Router::new()
        .route(
            "/",
            get(routes::boards::list_boards).post(routes::boards::create_board),
        )
        .route("/:id", get(routes::boards::get_board))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route(
            "/:id",
            get(routes::tasks::list_tasks)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/status", put(routes::tasks::update_task_status))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/boards", board_routes)
        .nest("/tasks", task_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// CORS restricted to the configured origins, with credentials so the
/// browser sends the session cookie
fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        tracing::warn!("CORS is permissive; do not use CORS_ORIGINS=* in production");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
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
}
