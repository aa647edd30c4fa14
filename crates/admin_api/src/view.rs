//! JSON view models handed to the embedding front end.

use controllers::{EditController, ListController, PageCursorState};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{PageInfo, Product, ProductPage, SortKey},
    protocol::{product_path, LIST_PATH},
};

pub const THUMBNAIL_PLACEHOLDER: &str = "icon:image";
pub const EMPTY_DESCRIPTION: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub href: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Thumbnail,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            href: product_path(product.id.legacy_id()),
            title: product.title.clone(),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| EMPTY_DESCRIPTION.to_string()),
            thumbnail: Thumbnail {
                source: product
                    .thumbnail_url
                    .clone()
                    .unwrap_or_else(|| THUMBNAIL_PLACEHOLDER.to_string()),
                alt: format!("product thumbnail {}", product.title),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub label: String,
    pub value: SortKey,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationView {
    pub has_next: bool,
    pub has_previous: bool,
    pub next_href: Option<String>,
    pub previous_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListView {
    pub location: String,
    pub query: Option<String>,
    pub sort_key: SortKey,
    pub sort_options: Vec<SortOption>,
    pub products: Vec<ProductRow>,
    pub page_info: PageInfo,
    pub pagination: PaginationView,
}

impl ProductListView {
    pub fn render(state: &PageCursorState, page: &ProductPage) -> Self {
        let mut controller = ListController::new(state.clone());
        controller.loaded(page.page_info.clone());
        let next_href = controller.peek_next().map(|next| next.location().href);
        let previous_href = controller.peek_previous().map(|prev| prev.location().href);

        Self {
            location: state.location().href,
            query: state.query.clone(),
            sort_key: state.sort_key,
            sort_options: SortKey::ALL
                .into_iter()
                .map(|key| SortOption {
                    label: key.label().to_string(),
                    value: key,
                    selected: key == state.sort_key,
                })
                .collect(),
            products: page.products.iter().map(ProductRow::from).collect(),
            page_info: page.page_info.clone(),
            pagination: PaginationView {
                has_next: next_href.is_some(),
                has_previous: previous_href.is_some(),
                next_href,
                previous_href,
            },
        }
    }
}

/// Form affordances derived from the edit controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFormView {
    pub title: String,
    pub field_disabled: bool,
    pub show_save_bar: bool,
    pub save_enabled: bool,
    pub save_loading: bool,
    pub discard_enabled: bool,
    pub banner: Option<String>,
    pub toast: Option<String>,
}

impl EditFormView {
    pub fn render(controller: &EditController) -> Self {
        let save_enabled = controller.can_save();
        Self {
            title: controller
                .draft()
                .map(|draft| draft.title.clone())
                .unwrap_or_default(),
            field_disabled: controller.is_busy(),
            show_save_bar: save_enabled || controller.is_busy(),
            save_enabled,
            save_loading: controller.is_busy(),
            discard_enabled: controller.can_discard(),
            banner: controller.banner().map(str::to_string),
            toast: controller.toast().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetailView {
    pub product: Product,
    pub back_href: String,
    pub form: EditFormView,
}

impl ProductDetailView {
    pub fn render(product: Product) -> Self {
        let mut controller = EditController::default();
        controller.loaded(product.clone());
        Self {
            form: EditFormView::render(&controller),
            product,
            back_href: LIST_PATH.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
