use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// All API routes, versioned under `/v1`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    let v1 = OpenApiRouter::new()
        .nest("/webhook", webhook_routes())
        .nest("/admin/matching", matching_routes());

    OpenApiRouter::new().nest("/v1", v1)
}

fn webhook_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::webhook::sync_all))
}

fn matching_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::admin::assign_shoots))
        .routes(routes!(handlers::admin::tag_posts))
        .routes(routes!(handlers::admin::propagate_tags))
}
