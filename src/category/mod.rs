//! Categories for grouping expenses, and the rules for deciding which category an expense is in.

mod db;
mod domain;
mod palette;
mod resolution;

pub use db::{create_category, create_category_table, get_categories};
pub use domain::{Category, CategoryBuilder, CategoryId};
pub use palette::NEUTRAL_GRAY;
pub use resolution::{
    CategoryIndex, DEFAULT_ICON, UNCATEGORIZED_KEY, UNCATEGORIZED_LABEL, resolve_category,
};

#[cfg(test)]
pub(crate) use resolution::test_utils;
