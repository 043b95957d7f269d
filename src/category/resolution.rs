//! Resolution of the category an expense is counted under.
//!
//! An expense can name its category in two places: the `category` field of
//! its encrypted JSON metadata, and its `category_id` foreign key. The
//! metadata wins when it can be read, the foreign key is used otherwise, and
//! expenses with neither end up in the uncategorized bucket.

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    category::{
        Category, CategoryId,
        palette::{NEUTRAL_GRAY, color_from_label},
    },
    crypto::Decrypt,
    expense::Expense,
};

/// The key of the bucket for expenses without a category.
pub const UNCATEGORIZED_KEY: &str = "uncategorized";
/// The display name for expenses without a category.
pub const UNCATEGORIZED_LABEL: &str = "Fără categorie";
/// The display name for expenses whose category ID does not match a category.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Categorie necunoscută";
/// The icon used when a category does not specify one.
pub const DEFAULT_ICON: &str = "tag";

/// A user's categories, indexed for resolving expenses.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    by_id: HashMap<CategoryId, Category>,
    by_name: HashMap<String, Category>,
}

impl CategoryIndex {
    /// Index `categories` by ID and by lower-cased name.
    ///
    /// Categories with an empty name can only be found by ID. If two
    /// categories share a name, the later one wins the name lookup.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        let mut by_name = HashMap::with_capacity(categories.len());

        for category in categories {
            if !category.name.is_empty() {
                by_name.insert(category.name.to_lowercase(), category.clone());
            }
            by_id.insert(category.id, category);
        }

        Self { by_id, by_name }
    }

    /// Find a category by ID.
    pub fn get_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.by_id.get(&id)
    }

    /// Find a category by name, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&Category> {
        self.by_name.get(&name.to_lowercase())
    }
}

/// The category an expense resolved to, tagged with the rule that matched.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedCategory {
    /// The metadata named a category that exists.
    PayloadMatched(Category),
    /// The metadata named a category that does not exist, holding the name as written.
    PayloadUnmatched(String),
    /// The category ID matched a category.
    Referenced(Category),
    /// The category ID does not match any of the user's categories.
    Dangling(CategoryId),
    /// Neither the metadata nor the category ID named a category.
    Uncategorized,
}

impl ResolvedCategory {
    /// The key that expenses are bucketed by.
    pub fn key(&self) -> String {
        match self {
            Self::PayloadMatched(category) | Self::Referenced(category) => category.id.to_string(),
            Self::PayloadUnmatched(name) => format!("name:{}", name.to_lowercase()),
            Self::Dangling(id) => id.to_string(),
            Self::Uncategorized => UNCATEGORIZED_KEY.to_owned(),
        }
    }

    /// The name to show for the bucket.
    pub fn display_name(&self) -> &str {
        match self {
            Self::PayloadMatched(category) | Self::Referenced(category) => &category.name,
            Self::PayloadUnmatched(name) => name,
            Self::Dangling(_) => UNKNOWN_CATEGORY_LABEL,
            Self::Uncategorized => UNCATEGORIZED_LABEL,
        }
    }

    /// The hex color for the bucket.
    pub fn color(&self) -> &str {
        match self {
            Self::PayloadMatched(category) | Self::Referenced(category) => category
                .color
                .as_deref()
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| color_from_label(&category.name)),
            Self::PayloadUnmatched(name) => color_from_label(name),
            Self::Dangling(_) | Self::Uncategorized => NEUTRAL_GRAY,
        }
    }

    /// The icon for the bucket.
    pub fn icon(&self) -> &str {
        match self {
            Self::PayloadMatched(category) | Self::Referenced(category) => category
                .icon
                .as_deref()
                .filter(|icon| !icon.is_empty())
                .unwrap_or(DEFAULT_ICON),
            _ => DEFAULT_ICON,
        }
    }
}

/// Work out which category `expense` should be counted under.
///
/// The rules are tried in order and the first one that applies wins:
/// 1. the `category` named in the expense's encrypted metadata,
/// 2. the expense's category ID,
/// 3. uncategorized.
///
/// Metadata that cannot be decrypted or parsed is ignored.
pub fn resolve_category(
    expense: &Expense,
    index: &CategoryIndex,
    decryptor: &dyn Decrypt,
) -> ResolvedCategory {
    if let Some(name) = expense
        .encrypted_metadata
        .as_deref()
        .and_then(|metadata| category_from_metadata(metadata, decryptor))
    {
        return match index.get_by_name(&name) {
            Some(category) => ResolvedCategory::PayloadMatched(category.clone()),
            None => ResolvedCategory::PayloadUnmatched(name),
        };
    }

    if let Some(category_id) = expense.category_id {
        return match index.get_by_id(category_id) {
            Some(category) => ResolvedCategory::Referenced(category.clone()),
            None => ResolvedCategory::Dangling(category_id),
        };
    }

    ResolvedCategory::Uncategorized
}

/// Read the trimmed, non-empty `category` field from encrypted JSON metadata.
///
/// The metadata may also be a JSON string that itself contains the JSON object.
fn category_from_metadata(ciphertext: &str, decryptor: &dyn Decrypt) -> Option<String> {
    let plaintext = decryptor
        .decrypt(ciphertext)
        .inspect_err(|error| tracing::debug!("ignoring expense metadata: {error}"))
        .ok()?;

    let mut data: Value = serde_json::from_str(&plaintext).ok()?;
    if let Value::String(nested) = data {
        data = serde_json::from_str(&nested).ok()?;
    }

    let name = data.get("category")?.as_str()?.trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_owned())
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::crypto::{CryptoError, Decrypt};

    /// A stand-in cipher where a value is "encrypted" by prefixing it with `enc:`.
    #[derive(Debug)]
    pub struct PrefixCipher;

    impl Decrypt for PrefixCipher {
        fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
            ciphertext
                .strip_prefix("enc:")
                .map(str::to_owned)
                .ok_or(CryptoError::MalformedEnvelope)
        }
    }
}
