use serde::{Deserialize, Serialize};

use crate::domain::SortKey;

pub const LIST_PATH: &str = "/app";
pub const PRODUCT_UPDATED_MESSAGE: &str = "Product updated successfully";
pub const FALLBACK_ACTION_MESSAGE: &str = "An error occurred";
pub const BLANK_TITLE_MESSAGE: &str = "Title can't be blank";

pub fn product_path(legacy_id: &str) -> String {
    format!("{LIST_PATH}/product/{legacy_id}")
}

/// A title made only of whitespace counts as blank everywhere it is checked.
pub fn is_blank_title(title: &str) -> bool {
    title.trim().is_empty()
}

/// Raw list query string, as sent by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub cursor: Option<String>,
    pub direction: Option<String>,
    pub q: Option<String>,
    #[serde(rename = "sortKey")]
    pub sort_key: Option<String>,
}

/// Variables of one cursor-paginated product list request.
///
/// Built by the list controller so that exactly one of `first`/`last` is set
/// and `after`/`before` only ever appears on the matching side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub query: Option<String>,
    pub sort_key: SortKey,
}

impl PageRequest {
    pub fn is_backward(&self) -> bool {
        self.last.is_some()
    }
}

/// Form body of the edit action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductForm {
    pub id: String,
    pub title: String,
}

/// Field-level validation error returned by a catalog mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Outcome of the edit action. `status` mirrors an HTTP status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub status: u16,
    pub message: String,
}

impl ActionResult {
    pub fn success() -> Self {
        Self {
            status: 200,
            message: PRODUCT_UPDATED_MESSAGE.to_string(),
        }
    }

    pub fn failure(status: u16, message: Option<&str>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(FALLBACK_ACTION_MESSAGE);
        Self {
            status,
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}
