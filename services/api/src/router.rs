use crate::handlers::{apps, auth, comments, dashboard, evidence, findings, risks, users};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/apps", get(apps::list).post(apps::create))
        .route("/apps/{id}", put(apps::update).delete(apps::remove))
        .route("/findings", get(findings::list).post(findings::create))
        .route(
            "/findings/{id}",
            put(findings::update).delete(findings::remove),
        )
        .route("/findings/{id}/evidence", get(evidence::list_for_finding))
        .route("/findings/{id}/upload", post(evidence::upload))
        .route(
            "/findings/{id}/comments",
            get(comments::list).post(comments::create),
        )
        .route("/evidence/{id}", delete(evidence::remove))
        .route("/risks", get(risks::list).post(risks::create))
        .route(
            "/risks/{id}",
            put(risks::update).delete(risks::remove),
        )
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/users", get(users::list).post(users::create));

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(state.files.root()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
