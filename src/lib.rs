pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod observability;
pub mod routes;
pub mod server;

pub use config::Config;
pub use routes::AppState;

/// Create app router for testing
///
/// Same routes and layers as `serve`, backed by the given state, so requests
/// can be sent with `tower::ServiceExt::oneshot` without binding a socket.
pub fn create_app(state: homeplan_shared::State) -> axum::Router {
    routes::router(AppState::new(state)).layer(tower_http::trace::TraceLayer::new_for_http())
}
