use axum::{Router, routing::get};

pub mod parking;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/parking", parking::router())
}
