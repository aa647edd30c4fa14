use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use shared::{
    domain::{PageInfo, Product, ProductId, ProductPage, ProductStatus},
    protocol::{PageRequest, UserError},
};
use tracing::{debug, warn};

use crate::{
    documents::{PRODUCTS_QUERY, PRODUCT_QUERY, PRODUCT_UPDATE_MUTATION},
    CatalogClient, CatalogError,
};

pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Catalog backed by the platform's GraphQL Admin API.
#[derive(Clone)]
pub struct GraphqlCatalog {
    http: Client,
    endpoint: String,
    access_token: String,
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: ProductConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductConnection {
    nodes: Vec<ProductNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    id: String,
    title: String,
    description: Option<String>,
    status: Option<ProductStatus>,
    images: Option<ImageConnection>,
}

#[derive(Debug, Deserialize)]
struct ImageConnection {
    nodes: Vec<ImageNode>,
}

#[derive(Debug, Deserialize)]
struct ImageNode {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ProductData {
    product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductUpdateData {
    product_update: Option<ProductUpdatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductUpdatePayload {
    product: Option<ProductNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

impl TryFrom<ProductNode> for Product {
    type Error = CatalogError;

    fn try_from(node: ProductNode) -> Result<Self, Self::Error> {
        let id = ProductId::from_catalog(node.id)
            .map_err(|e| CatalogError::Unexpected(e.to_string()))?;
        let thumbnail_url = node
            .images
            .and_then(|images| images.nodes.into_iter().next())
            .map(|image| image.url);
        Ok(Product {
            id,
            title: node.title,
            description: node.description.filter(|d| !d.trim().is_empty()),
            thumbnail_url,
            status: node.status,
        })
    }
}

impl GraphqlCatalog {
    pub fn new(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        })
    }

    async fn execute<V, D>(
        &self,
        operation: &str,
        query: &str,
        variables: V,
    ) -> Result<D, CatalogError>
    where
        V: Serialize + Send,
        D: DeserializeOwned + Send,
    {
        debug!(operation, endpoint = %self.endpoint, "sending catalog request");
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await
            .map_err(|error| {
                warn!(operation, %error, "catalog request failed");
                CatalogError::Transport(error)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(operation, status = status.as_u16(), "catalog returned error status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: GraphqlResponse<D> = serde_json::from_slice(&bytes)?;
        if let Some(first) = envelope.errors.into_iter().next() {
            warn!(operation, message = %first.message, "catalog returned graphql errors");
            return Err(CatalogError::Graphql(first.message));
        }
        envelope
            .data
            .ok_or_else(|| CatalogError::Unexpected(format!("{operation}: response has no data")))
    }
}

#[async_trait]
impl CatalogClient for GraphqlCatalog {
    async fn list_products(&self, request: &PageRequest) -> Result<ProductPage, CatalogError> {
        let data: ProductsData = self.execute("ProductList", PRODUCTS_QUERY, request).await?;
        let products = data
            .products
            .nodes
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProductPage {
            products,
            page_info: data.products.page_info,
        })
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let data: ProductData = self
            .execute("Product", PRODUCT_QUERY, json!({ "id": id }))
            .await?;
        data.product
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?
            .try_into()
    }

    async fn update_product_title(
        &self,
        id: &ProductId,
        title: &str,
    ) -> Result<Product, CatalogError> {
        let variables = json!({ "input": { "id": id, "title": title } });
        let data: ProductUpdateData = self
            .execute("ProductUpdate", PRODUCT_UPDATE_MUTATION, variables)
            .await?;
        let payload = data
            .product_update
            .ok_or_else(|| CatalogError::Unexpected("productUpdate returned null".into()))?;
        if !payload.user_errors.is_empty() {
            return Err(CatalogError::UserErrors(payload.user_errors));
        }
        payload
            .product
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?
            .try_into()
    }
}

#[cfg(test)]
#[path = "tests/graphql_tests.rs"]
mod tests;
