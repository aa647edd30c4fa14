use std::{fmt, time::Instant};

use shared::{
    domain::{Direction, PageInfo, SortKey, UnknownDirection, UnknownSortKey},
    protocol::{ListParams, PageRequest, LIST_PATH},
};
use thiserror::Error;
use url::form_urlencoded;

use crate::debounce::SearchDebounce;

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListParamsError {
    #[error(transparent)]
    Direction(#[from] UnknownDirection),
    #[error(transparent)]
    SortKey(#[from] UnknownSortKey),
}

/// Target of a full navigation; the list is re-fetched from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
}

impl Navigation {
    pub fn to(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.href
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

/// Pagination and filter state carried in the list URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursorState {
    pub cursor: Option<String>,
    pub direction: Option<Direction>,
    pub query: Option<String>,
    pub sort_key: SortKey,
}

impl PageCursorState {
    /// Validates the raw query string. A cursor without a direction is
    /// dropped, and an empty search is treated as no search.
    pub fn from_params(params: &ListParams) -> Result<Self, ListParamsError> {
        let direction = non_empty(params.direction.as_deref())
            .map(str::parse::<Direction>)
            .transpose()?;
        let sort_key = non_empty(params.sort_key.as_deref())
            .map(str::parse::<SortKey>)
            .transpose()?
            .unwrap_or_default();
        let cursor = direction
            .and(non_empty(params.cursor.as_deref()))
            .map(str::to_string);

        Ok(Self {
            cursor,
            direction,
            query: non_empty(params.q.as_deref()).map(str::to_string),
            sort_key,
        })
    }

    pub fn page_request(&self, page_size: u32) -> PageRequest {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let (first, last, after, before) = match self.direction {
            None | Some(Direction::Next) => (Some(page_size), None, self.cursor.clone(), None),
            Some(Direction::Previous) => (None, Some(page_size), None, self.cursor.clone()),
        };
        PageRequest {
            first,
            last,
            after,
            before,
            query: self.query.clone(),
            sort_key: self.sort_key,
        }
    }

    /// Same filters, back on the first page.
    pub fn first_page(&self) -> Self {
        Self {
            cursor: None,
            direction: None,
            query: self.query.clone(),
            sort_key: self.sort_key,
        }
    }

    pub fn to_params(&self) -> ListParams {
        ListParams {
            cursor: self.direction.and(self.cursor.clone()),
            direction: self.direction.map(|d| d.as_str().to_string()),
            q: self.query.clone(),
            sort_key: Some(self.sort_key.as_str().to_string()),
        }
    }

    pub fn location(&self) -> Navigation {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("sortKey", self.sort_key.as_str());
        if let Some(q) = &self.query {
            query.append_pair("q", q);
        }
        if let Some(direction) = self.direction {
            if let Some(cursor) = &self.cursor {
                query.append_pair("cursor", cursor);
            }
            query.append_pair("direction", direction.as_str());
        }
        Navigation::to(format!("{LIST_PATH}?{}", query.finish()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// In-memory mirror of the list URL plus the boundaries of the page on
/// screen. Every transition returns the navigation that re-fetches the list.
#[derive(Debug, Clone, Default)]
pub struct ListController {
    state: PageCursorState,
    page_info: PageInfo,
    search: SearchDebounce,
}

impl ListController {
    pub fn new(state: PageCursorState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn with_search_debounce(mut self, search: SearchDebounce) -> Self {
        self.search = search;
        self
    }

    pub fn state(&self) -> &PageCursorState {
        &self.state
    }

    pub fn loaded(&mut self, page_info: PageInfo) {
        self.page_info = page_info;
    }

    pub fn has_next(&self) -> bool {
        self.page_info.has_next_page && self.page_info.end_cursor.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.page_info.has_previous_page && self.page_info.start_cursor.is_some()
    }

    /// State the "next" affordance would move to, without moving.
    pub fn peek_next(&self) -> Option<PageCursorState> {
        if !self.has_next() {
            return None;
        }
        Some(PageCursorState {
            cursor: self.page_info.end_cursor.clone(),
            direction: Some(Direction::Next),
            ..self.state.clone()
        })
    }

    pub fn peek_previous(&self) -> Option<PageCursorState> {
        if !self.has_previous() {
            return None;
        }
        Some(PageCursorState {
            cursor: self.page_info.start_cursor.clone(),
            direction: Some(Direction::Previous),
            ..self.state.clone()
        })
    }

    pub fn next(&mut self) -> Option<Navigation> {
        let state = self.peek_next()?;
        Some(self.navigate(state))
    }

    pub fn previous(&mut self) -> Option<Navigation> {
        let state = self.peek_previous()?;
        Some(self.navigate(state))
    }

    pub fn set_sort(&mut self, sort_key: SortKey) -> Navigation {
        let mut state = self.state.first_page();
        state.sort_key = sort_key;
        self.navigate(state)
    }

    pub fn set_query(&mut self, query: &str) -> Navigation {
        self.search.cancel();
        let mut state = self.state.first_page();
        state.query = non_empty(Some(query)).map(str::to_string);
        self.navigate(state)
    }

    pub fn clear_query(&mut self) -> Navigation {
        self.search.cancel();
        let mut state = self.state.first_page();
        state.query = None;
        self.navigate(state)
    }

    /// Records a keystroke; the search runs from [`Self::poll_search`].
    pub fn search_input(&mut self, text: &str, now: Instant) {
        self.search.input(text, now);
    }

    pub fn poll_search(&mut self, now: Instant) -> Option<Navigation> {
        let query = self.search.poll(now)?;
        if non_empty(Some(query.as_str())) == self.state.query.as_deref() {
            return None;
        }
        Some(self.set_query(&query))
    }

    fn navigate(&mut self, state: PageCursorState) -> Navigation {
        self.state = state;
        // Affordances stay disabled until the next page has been loaded.
        self.page_info = PageInfo::default();
        self.state.location()
    }
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
