use async_trait::async_trait;
use shared::{
    domain::{PageInfo, Product, ProductId, ProductPage, SortKey},
    protocol::{is_blank_title, PageRequest, UserError, BLANK_TITLE_MESSAGE},
};
use tokio::sync::RwLock;

use crate::{CatalogClient, CatalogError};

const CURSOR_PREFIX: &str = "mem:";

/// Catalog held in process memory, following the same cursor contract as
/// the GraphQL catalog.
///
/// Products keep their insertion order as creation order. Only `TITLE`
/// reorders the listing; keys that depend on fields this catalog does not
/// model fall back to creation order.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub async fn insert(&self, product: Product) {
        self.products.write().await.push(product);
    }
}

fn encode_cursor(position: usize) -> String {
    format!("{CURSOR_PREFIX}{position}")
}

fn decode_cursor(cursor: &str) -> Result<usize, CatalogError> {
    cursor
        .strip_prefix(CURSOR_PREFIX)
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| CatalogError::Graphql(format!("Invalid cursor: {cursor}")))
}

fn matches_query(product: &Product, query: Option<&str>) -> bool {
    match query {
        None => true,
        Some(query) => product
            .title
            .to_lowercase()
            .contains(&query.trim().to_lowercase()),
    }
}

#[async_trait]
impl CatalogClient for MemoryCatalog {
    async fn list_products(&self, request: &PageRequest) -> Result<ProductPage, CatalogError> {
        let window = match (request.first, request.last) {
            (Some(_), Some(_)) => {
                return Err(CatalogError::Graphql(
                    "Passing both `first` and `last` is not supported".into(),
                ))
            }
            (None, None) => {
                return Err(CatalogError::Graphql(
                    "you must provide one of first or last".into(),
                ))
            }
            (Some(first), None) => Window::Forward(first as usize),
            (None, Some(last)) => Window::Backward(last as usize),
        };

        let products = self.products.read().await;
        let mut listing: Vec<&Product> = products
            .iter()
            .filter(|product| matches_query(product, request.query.as_deref()))
            .collect();
        if request.sort_key == SortKey::Title {
            listing.sort_by(|a, b| a.title.cmp(&b.title));
        }

        let len = listing.len();
        let (start, end) = match window {
            Window::Forward(count) => {
                let start = match &request.after {
                    Some(cursor) => decode_cursor(cursor)?.saturating_add(1),
                    None => 0,
                }
                .min(len);
                (start, (start + count).min(len))
            }
            Window::Backward(count) => {
                let end = match &request.before {
                    Some(cursor) => decode_cursor(cursor)?,
                    None => len,
                }
                .min(len);
                (end.saturating_sub(count), end)
            }
        };

        let page: Vec<Product> = listing[start..end].iter().map(|p| (*p).clone()).collect();
        let page_info = PageInfo {
            start_cursor: (start < end).then(|| encode_cursor(start)),
            end_cursor: (start < end).then(|| encode_cursor(end - 1)),
            has_next_page: end < len,
            has_previous_page: start > 0,
        };
        Ok(ProductPage {
            products: page,
            page_info,
        })
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.products
            .read()
            .await
            .iter()
            .find(|product| &product.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    async fn update_product_title(
        &self,
        id: &ProductId,
        title: &str,
    ) -> Result<Product, CatalogError> {
        if is_blank_title(title) {
            return Err(CatalogError::UserErrors(vec![UserError {
                field: Some(vec!["title".into()]),
                message: BLANK_TITLE_MESSAGE.into(),
            }]));
        }
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        product.title = title.to_string();
        Ok(product.clone())
    }
}

enum Window {
    Forward(usize),
    Backward(usize),
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
