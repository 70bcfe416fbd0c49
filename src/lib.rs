pub mod auth;
pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod policy;
pub mod resource;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use auth::Role;
use entities::{
    HelpRequest, MenuItemReview, UCSBDiningCommons, UCSBDiningCommonsMenuItem, UCSBOrganization,
};
use error::ApiError;
use middleware::CurrentUser;
use policy::AccessPolicy;
use resource::Entity;
use store::{EntityStore, MemoryStore, PgStore};

/// Resource kinds registered with the access policy.
pub const KINDS: [&str; 5] = [
    HelpRequest::KIND,
    UCSBDiningCommonsMenuItem::KIND,
    MenuItemReview::KIND,
    UCSBOrganization::KIND,
    UCSBDiningCommons::KIND,
];

/// One injected store per resource kind, plus the shared pool (if any)
/// for the liveness probe.
pub struct Stores {
    pub help_requests: Arc<dyn EntityStore<HelpRequest>>,
    pub menu_items: Arc<dyn EntityStore<UCSBDiningCommonsMenuItem>>,
    pub menu_item_reviews: Arc<dyn EntityStore<MenuItemReview>>,
    pub organizations: Arc<dyn EntityStore<UCSBOrganization>>,
    pub dining_commons: Arc<dyn EntityStore<UCSBDiningCommons>>,
    pool: Option<PgPool>,
}

impl Stores {
    /// All kinds backed by in-memory stores (tests, local development).
    pub fn in_memory() -> Self {
        Self {
            help_requests: Arc::new(MemoryStore::new()),
            menu_items: Arc::new(MemoryStore::new()),
            menu_item_reviews: Arc::new(MemoryStore::new()),
            organizations: Arc::new(MemoryStore::new()),
            dining_commons: Arc::new(MemoryStore::new()),
            pool: None,
        }
    }

    /// All kinds backed by the shared PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            help_requests: Arc::new(PgStore::new(pool.clone())),
            menu_items: Arc::new(PgStore::new(pool.clone())),
            menu_item_reviews: Arc::new(PgStore::new(pool.clone())),
            organizations: Arc::new(PgStore::new(pool.clone())),
            dining_commons: Arc::new(PgStore::new(pool.clone())),
            pool: Some(pool),
        }
    }
}

/// Assemble the full application router.
pub fn app(stores: Stores) -> Router {
    let policy = Arc::new(AccessPolicy::standard(&KINDS));

    Router::new()
        .merge(core_routes(stores.pool))
        .merge(resource::routes(stores.help_requests, policy.clone()))
        .merge(resource::routes(stores.menu_items, policy.clone()))
        .merge(resource::routes(stores.menu_item_reviews, policy.clone()))
        .merge(resource::routes(stores.organizations, policy.clone()))
        .merge(resource::routes(stores.dining_commons, policy))
        // Global middleware
        .layer(axum::middleware::from_fn(middleware::current_user_middleware))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn core_routes(pool: Option<PgPool>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/currentUser", get(current_user))
        .with_state(pool)
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;

    if !security.enable_cors {
        return CorsLayer::new();
    }

    match config::config().environment {
        config::Environment::Development => CorsLayer::permissive(),
        _ => {
            let origins: Vec<_> = security
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    let resources: std::collections::BTreeMap<String, String> = KINDS
        .iter()
        .map(|kind| {
            (
                kind.to_string(),
                format!(
                    "/api/{kind}/all, /api/{kind}/post, /api/{kind}?id=<key>",
                    kind = kind
                ),
            )
        })
        .collect();

    Json(json!({
        "success": true,
        "data": {
            "name": "Campus API",
            "version": version,
            "description": "Role-gated CRUD REST backend for campus resources built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "currentUser": "/api/currentUser (requires USER)",
                "resources": resources,
            }
        }
    }))
}

async fn health(State(pool): State<Option<PgPool>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match &pool {
        Some(pool) => match store::postgres::health_check(pool).await {
            Ok(_) => (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": {
                        "status": "ok",
                        "timestamp": now,
                        "database": "ok"
                    }
                })),
            ),
            Err(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database_error": e.to_string()
                    }
                })),
            ),
        },
        None => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "in-memory"
                }
            })),
        ),
    }
}

/// Echo the caller identity the middleware resolved.
async fn current_user(
    Extension(caller): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    if !caller.has_role(Role::User) {
        return Err(ApiError::forbidden("Access is denied"));
    }

    let mut roles: Vec<Role> = caller.roles.iter().copied().collect();
    roles.sort();

    Ok(Json(json!({
        "user": caller.sub,
        "roles": roles,
    })))
}
