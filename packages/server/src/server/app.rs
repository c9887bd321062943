//! Application setup and server configuration.

use axum::{
    extract::Extension,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{attendance, certificates, engagements, health_handler, invitations};

/// Shared application state
pub type AppState = ServerDeps;

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let engagement_routes = Router::new()
        .route(
            "/engagements",
            post(engagements::create_engagement).get(engagements::list_engagements),
        )
        .route(
            "/engagements/:id",
            get(engagements::get_engagement).patch(engagements::update_engagement),
        )
        .route("/engagements/:id/publish", post(engagements::publish))
        .route("/engagements/:id/cancel", post(engagements::cancel))
        .route("/engagements/:id/template", post(engagements::set_template));

    let invitation_routes = Router::new()
        .route(
            "/engagements/:id/invitations",
            post(invitations::invite).get(invitations::list_invitations),
        )
        .route(
            "/engagements/:id/invitations/targeted",
            post(invitations::invite_matching),
        )
        .route("/invitations/:id", get(invitations::get_invitation))
        .route("/invitations/:id/accept", post(invitations::accept))
        .route("/invitations/:id/excuse", post(invitations::excuse))
        .route("/invitations/:id/excuse/approve", post(invitations::approve_excuse))
        .route("/invitations/:id/excuse/reject", post(invitations::reject_excuse));

    let attendance_routes = Router::new()
        .route("/invitations/:id/attendance", put(attendance::mark_attended))
        .route("/engagements/:id/attendance", get(attendance::summary))
        .route(
            "/engagements/:id/attendance/confirm",
            post(attendance::confirm),
        );

    let certificate_routes = Router::new()
        .route(
            "/engagements/:id/certificates",
            get(certificates::list_certificates),
        )
        .route(
            "/engagements/:id/certificates/generate",
            post(certificates::generate),
        )
        .route(
            "/engagements/:id/certificates/render",
            post(certificates::render),
        )
        .route(
            "/engagements/:id/certificates/:participant_id",
            get(certificates::get_certificate),
        );

    Router::new()
        .route("/health", get(health_handler))
        .merge(engagement_routes)
        .merge(invitation_routes)
        .merge(attendance_routes)
        .merge(certificate_routes)
        .layer(Extension(deps))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
