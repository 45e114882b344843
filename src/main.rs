use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env()?;
    tracing::info!("Starting quill-api in {:?} mode", config.environment);

    let pool = database::pool::connect(&config.database)?;
    if let Err(e) = database::pool::init_schema(&pool).await {
        // The pool is lazy; keep serving so /health can report the outage
        tracing::warn!("schema init failed, database unreachable for now: {}", e);
    }

    let state = AppState::new(pool, config);
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("QUILL_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("quill-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(public_routes())
        // Protected notes API
        .merge(notes_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

fn notes_routes(state: AppState) -> Router<AppState> {
    use axum::routing::{get, put};
    use handlers::protected::notes;

    Router::new()
        .route("/notes", get(notes::list).post(notes::create))
        .route(
            "/notes/:id",
            put(notes::update)
                .patch(notes::update_partial)
                .delete(notes::remove),
        )
        .route("/notes/:id/pin", put(notes::set_pinned))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ))
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "quill-api",
        "version": version,
        "description": "Personal note-taking JSON API",
        "environment": format!("{:?}", state.config.environment),
        "endpoints": {
            "register": "POST /register (public)",
            "login": "POST /login (public - token acquisition)",
            "notes": "GET|POST /notes, PUT|PATCH|DELETE /notes/:id, PUT /notes/:id/pin (bearer token)",
            "health": "GET /health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::pool::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
