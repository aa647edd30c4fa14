use std::sync::Arc;

use catalog::{CatalogClient, CatalogError};
use controllers::{list::DEFAULT_PAGE_SIZE, ListParamsError, PageCursorState};
use shared::{
    domain::ProductId,
    error::{ApiError, ErrorCode},
    protocol::{is_blank_title, ActionResult, ListParams, UpdateProductForm, BLANK_TITLE_MESSAGE},
};
use tracing::{error, info, warn};

pub mod view;

use view::{ProductDetailView, ProductListView};

#[derive(Clone)]
pub struct AdminContext {
    pub catalog: Arc<dyn CatalogClient>,
    pub page_size: u32,
}

impl AdminContext {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            catalog,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Loader for the product list: one catalog read per navigation.
pub async fn load_product_list(
    ctx: &AdminContext,
    params: &ListParams,
) -> Result<ProductListView, ApiError> {
    let state = PageCursorState::from_params(params).map_err(validation)?;
    let request = state.page_request(ctx.page_size);
    let page = ctx
        .catalog
        .list_products(&request)
        .await
        .map_err(upstream)?;
    Ok(ProductListView::render(&state, &page))
}

pub async fn load_product(ctx: &AdminContext, raw_id: &str) -> Result<ProductDetailView, ApiError> {
    let id = ProductId::parse(raw_id)
        .map_err(|e| ApiError::new(ErrorCode::Validation, e.to_string()))?;
    let product = ctx.catalog.fetch_product(&id).await.map_err(upstream)?;
    Ok(ProductDetailView::render(product))
}

/// Edit action. Failures never escape as errors; they come back as an
/// [`ActionResult`] so the page can keep the merchant's draft.
pub async fn update_product(
    ctx: &AdminContext,
    raw_id: &str,
    form: &UpdateProductForm,
) -> ActionResult {
    let Ok(id) = ProductId::parse(raw_id) else {
        return ActionResult::failure(400, Some("invalid product id"));
    };
    if ProductId::parse(&form.id).ok().as_ref() != Some(&id) {
        warn!(product_id = %id, form_id = %form.id, "edit form does not match product");
        return ActionResult::failure(400, Some("product id does not match"));
    }
    if is_blank_title(&form.title) {
        return ActionResult::failure(422, Some(BLANK_TITLE_MESSAGE));
    }

    match ctx.catalog.update_product_title(&id, &form.title).await {
        Ok(product) => {
            info!(product_id = %product.id, "product title updated");
            ActionResult::success()
        }
        Err(err @ CatalogError::UserErrors(_)) => {
            warn!(product_id = %id, error = %err, "catalog rejected product update");
            ActionResult::failure(422, err.catalog_message())
        }
        Err(err) => {
            error!(product_id = %id, error = %err, "product update failed");
            ActionResult::failure(500, err.catalog_message())
        }
    }
}

fn validation(err: ListParamsError) -> ApiError {
    ApiError::new(ErrorCode::Validation, err.to_string())
}

fn upstream(err: CatalogError) -> ApiError {
    match err {
        CatalogError::NotFound(id) => {
            ApiError::new(ErrorCode::NotFound, format!("product not found: {id}"))
        }
        other => {
            error!(error = %other, "catalog read failed");
            ApiError::new(ErrorCode::Upstream, other.to_string())
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
