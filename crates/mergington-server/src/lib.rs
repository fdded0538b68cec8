pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;
use mergington_core::Registry;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(registry: Registry) -> Router {
    let app_state = AppState::new(registry);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root::root))
        // Activities
        .route("/activities", get(routes::activities::list_activities))
        .route(
            "/activities/{name}/signup",
            post(routes::activities::signup),
        )
        .route(
            "/activities/{name}/unregister",
            delete(routes::activities::unregister),
        )
        // Front page
        .route("/static/{*path}", get(embed::static_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(registry: Registry, addr: &str, open_browser: bool) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_on(registry, listener, open_browser).await
}

/// Serve on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    registry: Registry,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let activities = registry.len();
    let app = build_router(registry);

    tracing::info!(activities, "Mergington activities listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}{}", routes::root::INDEX_PATH);
        if let Err(e) = open::that(&url) {
            tracing::warn!("could not open browser: {e}");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
