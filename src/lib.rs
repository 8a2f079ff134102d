use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::{broadcast, Mutex};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod store;
pub mod wellness;

use clock::{Clock, SystemClock};
use config::Config;
use notify::{BroadcastDispatcher, ReminderDispatcher};
use store::{MemoryStore, PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub dispatcher: Arc<dyn ReminderDispatcher>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<Config>,
    pub ws_tx: Option<broadcast::Sender<String>>,
    /// Held across read, insert and recompute of a day's intake so that
    /// exactly one request observes the goal crossing.
    pub intake_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// State whose dispatcher publishes onto the `/ws` event stream.
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, config: Config) -> Self {
        let dispatcher = BroadcastDispatcher::new(config.event_channel_capacity);
        Self {
            ws_tx: Some(dispatcher.sender()),
            dispatcher: Arc::new(dispatcher),
            store,
            clock,
            config: Arc::new(config),
            intake_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Pick the store from config, connect and migrate when it is Postgres.
pub async fn build_state(config: Config) -> anyhow::Result<AppState> {
    let store: Arc<dyn Store> = match config.database_url.as_deref() {
        Some(url) => {
            let db = db::create_pool(url, config.db_max_connections).await?;
            db::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
            Arc::new(PgStore::new(db))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(AppState::new(store, Arc::new(SystemClock), config))
}

pub fn app_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Habits
        .route("/api/habits", get(handlers::habits::list_habits))
        .route("/api/habits", post(handlers::habits::create_habit))
        .route("/api/habits/:id", get(handlers::habits::get_habit))
        .route("/api/habits/:id", put(handlers::habits::update_habit))
        .route("/api/habits/:id", delete(handlers::habits::delete_habit))
        .route("/api/habits/:id/streak", get(handlers::habits::get_streak))
        .route("/api/habits/:id/progress", get(handlers::habits::list_progress))
        // Progress
        .route("/api/progress", post(handlers::progress::log_progress))
        .route("/api/progress/toggle", post(handlers::progress::toggle_progress))
        // Mood
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods", post(handlers::moods::create_mood))
        .route("/api/moods/trend", get(handlers::moods::mood_trend))
        .route("/api/moods/:id", delete(handlers::moods::delete_mood))
        // Hydration
        .route("/api/hydration/intake", get(handlers::hydration::list_intake))
        .route("/api/hydration/intake", post(handlers::hydration::add_intake))
        .route("/api/hydration/summary", get(handlers::hydration::get_summary))
        .route("/api/hydration/settings", get(handlers::hydration::get_settings))
        .route("/api/hydration/settings", put(handlers::hydration::put_settings))
        .route("/api/hydration/reminders", get(handlers::hydration::get_reminders))
        .route(
            "/api/hydration/reminders/enabled",
            put(handlers::hydration::toggle_reminders),
        )
        // Dashboard
        .route("/api/summary/today", get(handlers::summary::today_summary));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors_layer(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<axum::http::HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|o| match o.parse::<axum::http::HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}
