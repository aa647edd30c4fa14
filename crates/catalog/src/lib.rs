use async_trait::async_trait;
use shared::{
    domain::{Product, ProductId, ProductPage},
    protocol::{PageRequest, UserError},
};
use thiserror::Error;

mod documents;
pub mod graphql;
pub mod memory;

pub use graphql::GraphqlCatalog;
pub use memory::MemoryCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Graphql(String),
    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected catalog response: {0}")]
    Unexpected(String),
    #[error("product not found: {0}")]
    NotFound(ProductId),
    #[error("{}", first_user_error(.0))]
    UserErrors(Vec<UserError>),
}

fn first_user_error(errors: &[UserError]) -> &str {
    errors
        .first()
        .map(|error| error.message.as_str())
        .unwrap_or("product update rejected")
}

impl CatalogError {
    /// Text the catalog itself produced, suitable for showing to a merchant.
    /// Only the first validation message is kept.
    pub fn catalog_message(&self) -> Option<&str> {
        match self {
            CatalogError::Graphql(message) => Some(message),
            CatalogError::UserErrors(errors) => errors.first().map(|e| e.message.as_str()),
            _ => None,
        }
    }
}

/// Read and write access to the external product catalog. Each call is one
/// outbound request.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_products(&self, request: &PageRequest) -> Result<ProductPage, CatalogError>;
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, CatalogError>;
    async fn update_product_title(
        &self,
        id: &ProductId,
        title: &str,
    ) -> Result<Product, CatalogError>;
}
