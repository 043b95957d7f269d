//! Core category domain types.

use serde::{Deserialize, Serialize};

use crate::{database_id::DatabaseId, user::UserId};

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// A user defined category for grouping expenses (e.g., 'Groceries', 'Transport').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The user that owns the category.
    pub user_id: UserId,
    /// The name shown to the user.
    pub name: String,
    /// An explicit hex color, e.g. "#34d399".
    pub color: Option<String>,
    /// The name of the icon shown next to the category.
    pub icon: Option<String>,
}

impl Category {
    /// Create a new category.
    ///
    /// Shortcut for [CategoryBuilder] for discoverability.
    pub fn build(user_id: UserId, name: &str) -> CategoryBuilder {
        CategoryBuilder {
            user_id,
            name: name.to_owned(),
            color: None,
            icon: None,
        }
    }
}

/// A builder for inserting new [Category] rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBuilder {
    /// The user that owns the category.
    pub user_id: UserId,
    /// The name shown to the user.
    pub name: String,
    /// An explicit hex color.
    pub color: Option<String>,
    /// The name of the icon shown next to the category.
    pub icon: Option<String>,
}

impl CategoryBuilder {
    /// Set the color for the category.
    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_owned());
        self
    }

    /// Set the icon for the category.
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_owned());
        self
    }
}
