use shared::{
    domain::{Product, ProductId},
    protocol::{is_blank_title, ActionResult, UpdateProductForm, LIST_PATH},
};

use crate::list::Navigation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Loading,
    Clean,
    Dirty,
    Saving,
    SavedRedirecting,
    Failed,
}

/// Predicate that enables the save action.
///
/// Two versions of the edit page disagree here. `RequireChange` needs a
/// non-blank title that differs from the loaded one; `NonEmptyOrChanged`
/// accepts either condition, which lets an unchanged title be re-saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveRule {
    #[default]
    RequireChange,
    NonEmptyOrChanged,
}

impl SaveRule {
    fn allows(self, draft_title: &str, loaded_title: &str) -> bool {
        let non_empty = !is_blank_title(draft_title);
        let changed = draft_title != loaded_title;
        match self {
            SaveRule::RequireChange => non_empty && changed,
            SaveRule::NonEmptyOrChanged => non_empty || changed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: ProductId,
    pub title: String,
}

impl EditDraft {
    fn of(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub id: ProductId,
    pub title: String,
}

impl SaveRequest {
    pub fn into_form(self) -> UpdateProductForm {
        UpdateProductForm {
            id: self.id.to_string(),
            title: self.title,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditController {
    rule: SaveRule,
    state: EditState,
    loaded: Option<Product>,
    draft: Option<EditDraft>,
    banner: Option<String>,
    toast: Option<String>,
}

impl Default for EditController {
    fn default() -> Self {
        Self::new(SaveRule::default())
    }
}

impl EditController {
    pub fn new(rule: SaveRule) -> Self {
        Self {
            rule,
            state: EditState::Loading,
            loaded: None,
            draft: None,
            banner: None,
            toast: None,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn loaded_product(&self) -> Option<&Product> {
        self.loaded.as_ref()
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Inline error from the last failed save.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn is_busy(&self) -> bool {
        self.state == EditState::Saving
    }

    /// Starts a fresh session for `product`; nothing from a previous
    /// product survives.
    pub fn loaded(&mut self, product: Product) {
        self.draft = Some(EditDraft::of(&product));
        self.loaded = Some(product);
        self.banner = None;
        self.toast = None;
        self.state = EditState::Clean;
    }

    pub fn edit_title(&mut self, title: impl Into<String>) {
        if matches!(
            self.state,
            EditState::Loading | EditState::Saving | EditState::SavedRedirecting
        ) {
            return;
        }
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        draft.title = title.into();
        self.state = if self.save_predicate() {
            EditState::Dirty
        } else {
            EditState::Clean
        };
    }

    pub fn can_save(&self) -> bool {
        matches!(
            self.state,
            EditState::Clean | EditState::Dirty | EditState::Failed
        ) && self.save_predicate()
    }

    pub fn can_discard(&self) -> bool {
        !matches!(
            self.state,
            EditState::Loading | EditState::Saving | EditState::SavedRedirecting
        )
    }

    /// Moves to `Saving` and hands back the request to send, or `None` when
    /// saving is not allowed right now.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if !self.can_save() {
            return None;
        }
        let draft = self.draft.as_ref()?;
        self.state = EditState::Saving;
        self.banner = None;
        Some(SaveRequest {
            id: draft.id.clone(),
            title: draft.title.clone(),
        })
    }

    /// Applies the action result. On success the caller should follow the
    /// returned navigation back to the list.
    pub fn finish_save(&mut self, result: &ActionResult) -> Option<Navigation> {
        if self.state != EditState::Saving {
            return None;
        }
        if result.is_success() {
            self.state = EditState::SavedRedirecting;
            self.toast = Some(result.message.clone());
            Some(Navigation::to(LIST_PATH))
        } else {
            let failure = ActionResult::failure(result.status, Some(result.message.as_str()));
            self.state = EditState::Failed;
            self.banner = Some(failure.message);
            None
        }
    }

    pub fn discard(&mut self) -> bool {
        if !self.can_discard() {
            return false;
        }
        let Some(product) = self.loaded.as_ref() else {
            return false;
        };
        self.draft = Some(EditDraft::of(product));
        self.banner = None;
        self.state = EditState::Clean;
        true
    }

    fn save_predicate(&self) -> bool {
        match (&self.draft, &self.loaded) {
            (Some(draft), Some(loaded)) => {
                draft.id == loaded.id && self.rule.allows(&draft.title, &loaded.title)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/edit_tests.rs"]
mod tests;
