use std::{net::SocketAddr, sync::Arc};

use admin_api::{
    load_product, load_product_list, update_product,
    view::{ProductDetailView, ProductListView},
    AdminContext,
};
use anyhow::Context;
use axum::{
    extract::{rejection::FormRejection, DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use catalog::GraphqlCatalog;
use shared::{
    error::ApiError,
    protocol::{ActionResult, ListParams, UpdateProductForm},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

const MAX_FORM_BYTES: usize = 16 * 1024;

#[derive(Clone)]
struct AppState {
    admin: AdminContext,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let endpoint = settings.graphql_endpoint()?;
    if settings.access_token.is_empty() {
        warn!("no catalog access token configured; requests will be rejected upstream");
    }
    let catalog = GraphqlCatalog::new(
        endpoint.clone(),
        settings.access_token.clone(),
        settings.catalog_timeout(),
    )
    .context("failed to build catalog client")?;
    info!(%endpoint, page_size = settings.page_size, "catalog configured");

    let admin = AdminContext::new(Arc::new(catalog)).with_page_size(settings.page_size);
    let app = build_router(Arc::new(AppState { admin }));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "admin server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/app", get(http_list_products))
        .route(
            "/app/product/:id",
            get(http_load_product).post(http_update_product),
        )
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Read paths render failures through this boundary.
fn boundary(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = StatusCode::from_u16(err.code.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err))
}

async fn http_list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductListView>, (StatusCode, Json<ApiError>)> {
    let view = load_product_list(&state.admin, &params)
        .await
        .map_err(boundary)?;
    Ok(Json(view))
}

async fn http_load_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailView>, (StatusCode, Json<ApiError>)> {
    let view = load_product(&state.admin, &id).await.map_err(boundary)?;
    Ok(Json(view))
}

async fn http_update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    form: Result<Form<UpdateProductForm>, FormRejection>,
) -> (StatusCode, Json<ActionResult>) {
    let result = match form {
        Ok(Form(form)) => update_product(&state.admin, &id, &form).await,
        Err(rejection) => {
            warn!(product_id = %id, error = %rejection, "edit form rejected");
            let message = rejection.body_text();
            ActionResult::failure(rejection.status().as_u16(), Some(message.as_str()))
        }
    };
    let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
