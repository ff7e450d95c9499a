use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_operator;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes: catalog reads and bettor actions
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        // Users
        .route("/api/users", post(handlers::users::create))
        .route("/api/users/:id", get(handlers::users::detail))
        // Catalog
        .route("/api/tournaments", get(handlers::tournaments::list))
        .route("/api/tournaments/:id", get(handlers::tournaments::detail))
        .route("/api/tournaments/:id/matches", get(handlers::matches::list_for_tournament))
        .route("/api/teams", get(handlers::teams::list))
        .route("/api/matches/:id", get(handlers::matches::detail))
        .route("/api/matches/:id/profitability", get(handlers::matches::profitability))
        // Bets
        .route("/api/matches/:id/bets", post(handlers::bets::create))
        .route("/api/bets", get(handlers::bets::list))
        .route("/api/bets/results", get(handlers::bets::results))
        .route("/api/bets/:id", put(handlers::bets::update).delete(handlers::bets::remove));

    // Operator routes: require Bearer token when API_TOKEN is set
    let operator = Router::new()
        .route("/api/admin/tournaments", post(handlers::tournaments::create))
        .route("/api/admin/teams", post(handlers::teams::create))
        .route("/api/admin/matches", post(handlers::matches::create))
        .route("/api/admin/matches/:id/spread", put(handlers::matches::update_spread))
        .route(
            "/api/admin/matches/:id/result",
            post(handlers::results::record).put(handlers::results::correct),
        )
        .route("/api/admin/matches/:id/resettle", post(handlers::results::resettle))
        .layer(middleware::from_fn_with_state(state.clone(), require_operator));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(operator)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
