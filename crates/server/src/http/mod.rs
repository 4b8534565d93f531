use axum::{Router, middleware::from_fn, routing::get};
use tower_http::trace::TraceLayer;

use crate::{DeploymentImpl, routes};

mod actor;

pub use actor::ROLE_HEADER;

pub fn router(deployment: DeploymentImpl) -> Router {
    let api_routes = Router::new()
        .merge(routes::projects::router(&deployment))
        .merge(routes::songs::router(&deployment))
        .merge(routes::tasks::router(&deployment))
        .merge(routes::comments::router())
        .merge(routes::budget_items::router(&deployment))
        .layer(from_fn(actor::resolve_actor));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(deployment)
}
