//! Dashboard selection state and its reducers.
//!
//! A [`SelectionState`] is an immutable value. Every user gesture is
//! expressed as a [`SelectionAction`] and applied with
//! [`SelectionState::apply`], which returns a new state and leaves the old
//! one untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sentinel label for "no filter on this dimension".
pub const ALL: &str = "all";

/// A single-valued filter dimension (month or area).
///
/// Serialized as the plain label, with `"all"` for [`Selection::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// Dimension not filtered.
    #[default]
    All,
    /// Dimension filtered to exactly this label.
    Only(String),
}

impl Selection {
    /// Selects a specific label.
    #[must_use]
    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    /// The selected label, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }

    /// Whether `value` passes this filter. [`Selection::All`] passes
    /// everything.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => v == value,
        }
    }

    /// Whether `value` is the actively selected label.
    #[must_use]
    pub fn is_active(&self, value: &str) -> bool {
        matches!(self, Self::Only(v) if v == value)
    }

    /// Click semantics: select `value`, or clear back to [`Selection::All`]
    /// if it is already the active value.
    #[must_use]
    pub fn toggled(&self, value: &str) -> Self {
        if self.is_active(value) {
            Self::All
        } else {
            Self::only(value)
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_string(),
            Selection::Only(v) => v,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(v) => f.write_str(v),
        }
    }
}

/// A user gesture that changes the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SelectionAction {
    /// Trend point clicked.
    ToggleMonth(String),
    /// Month picked from the drop-down (may be "all").
    SetMonth(Selection),
    /// Map feature clicked, carrying the feature's display name.
    ToggleArea(String),
    /// Area reset button.
    ResetArea,
    /// Ranking bar clicked.
    ToggleCategory(String),
    /// Deselect every category.
    ClearCategories,
    /// Back to the initial all-"all" state.
    Reset,
}

/// The three filter dimensions of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Selected month label.
    pub month: Selection,
    /// Selected borough display name.
    pub area: Selection,
    /// Selected crime types. Empty means every category, not none.
    pub categories: BTreeSet<String>,
}

impl SelectionState {
    /// Applies a gesture, returning the resulting state.
    #[must_use]
    pub fn apply(&self, action: &SelectionAction) -> Self {
        match action {
            SelectionAction::ToggleMonth(month) => self.toggle_month(month),
            SelectionAction::SetMonth(month) => Self {
                month: month.clone(),
                ..self.clone()
            },
            SelectionAction::ToggleArea(area) => self.toggle_area(area),
            SelectionAction::ResetArea => Self {
                area: Selection::All,
                ..self.clone()
            },
            SelectionAction::ToggleCategory(category) => self.toggle_category(category),
            SelectionAction::ClearCategories => Self {
                categories: BTreeSet::new(),
                ..self.clone()
            },
            SelectionAction::Reset => Self::default(),
        }
    }

    /// Selects `month`, or clears the month if it was already selected.
    #[must_use]
    pub fn toggle_month(&self, month: &str) -> Self {
        Self {
            month: self.month.toggled(month),
            ..self.clone()
        }
    }

    /// Selects `area`, or clears the area if it was already selected.
    #[must_use]
    pub fn toggle_area(&self, area: &str) -> Self {
        Self {
            area: self.area.toggled(area),
            ..self.clone()
        }
    }

    /// Adds `category` to the selected set, or removes it if present.
    #[must_use]
    pub fn toggle_category(&self, category: &str) -> Self {
        let mut categories = self.categories.clone();
        if !categories.remove(category) {
            categories.insert(category.to_string());
        }
        Self {
            categories,
            ..self.clone()
        }
    }

    /// Whether `category` is explicitly selected. This is membership only;
    /// an empty set selects nothing here even though it filters nothing.
    #[must_use]
    pub fn is_category_selected(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}
