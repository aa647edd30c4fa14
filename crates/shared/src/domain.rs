use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PRODUCT_GID_PREFIX: &str = "gid://shopify/Product/";

/// Global identifier of a product in the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid product id: {0:?}")]
pub struct InvalidProductId(pub String);

impl ProductId {
    /// Accepts either a bare numeric legacy id (`"123"`), as found in admin
    /// links, or a full product gid.
    pub fn parse(raw: &str) -> Result<Self, InvalidProductId> {
        let raw = raw.trim();
        match raw.strip_prefix(PRODUCT_GID_PREFIX) {
            Some(tail) if !tail.is_empty() => Ok(Self(raw.to_string())),
            None if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(Self(format!("{PRODUCT_GID_PREFIX}{raw}")))
            }
            _ => Err(InvalidProductId(raw.to_string())),
        }
    }

    /// Wraps an id returned by the catalog. Only emptiness is rejected; the
    /// value is otherwise opaque.
    pub fn from_catalog(raw: impl Into<String>) -> Result<Self, InvalidProductId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidProductId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment of the gid, used in admin links.
    pub fn legacy_id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Archived,
    Draft,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: Option<ProductStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    #[default]
    CreatedAt,
    Id,
    InventoryTotal,
    ProductType,
    PublishedAt,
    Relevance,
    Title,
    UpdatedAt,
    Vendor,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key: {0:?}")]
pub struct UnknownSortKey(pub String);

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::CreatedAt,
        SortKey::Id,
        SortKey::InventoryTotal,
        SortKey::ProductType,
        SortKey::PublishedAt,
        SortKey::Relevance,
        SortKey::Title,
        SortKey::UpdatedAt,
        SortKey::Vendor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "CREATED_AT",
            SortKey::Id => "ID",
            SortKey::InventoryTotal => "INVENTORY_TOTAL",
            SortKey::ProductType => "PRODUCT_TYPE",
            SortKey::PublishedAt => "PUBLISHED_AT",
            SortKey::Relevance => "RELEVANCE",
            SortKey::Title => "TITLE",
            SortKey::UpdatedAt => "UPDATED_AT",
            SortKey::Vendor => "VENDOR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "Created",
            SortKey::Id => "ID",
            SortKey::InventoryTotal => "Inventory Total",
            SortKey::ProductType => "Product Type",
            SortKey::PublishedAt => "Published",
            SortKey::Relevance => "Relevance",
            SortKey::Title => "Title",
            SortKey::UpdatedAt => "Updated",
            SortKey::Vendor => "Vendor",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("direction must be \"next\" or \"previous\", got {0:?}")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Direction::Next),
            "previous" => Ok(Direction::Previous),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page_info: PageInfo,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
