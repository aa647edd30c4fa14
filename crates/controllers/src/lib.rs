//! Framework-free state machines behind the admin panel.
//!
//! Nothing in this crate performs I/O: controllers consume loaded data and
//! user intents, and hand back the navigation or request the caller should
//! perform next.

pub mod debounce;
pub mod edit;
pub mod list;

pub use debounce::SearchDebounce;
pub use edit::{EditController, EditDraft, EditState, SaveRequest, SaveRule};
pub use list::{ListController, ListParamsError, Navigation, PageCursorState};
