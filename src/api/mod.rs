//! HTTP layer: route handlers, DTOs, router composition and the OpenAPI
//! document.

pub mod dto;
pub mod handlers;

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "guestbook-server", description = "Public guestbook with a visitor counter"),
    paths(
        handlers::home::home_handler,
        handlers::sign::sign_handler,
        handlers::system::health_handler,
    ),
    components(schemas(dto::SignForm, dto::HealthResponse, dto::HealthStatus)),
    tags(
        (name = "Guestbook", description = "Page rendering and submissions"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Builds the router with all endpoints, before state is attached.
pub fn build_router() -> Router<AppState> {
    let router = handlers::routes();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Builds the complete application: routes, request tracing and state.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
