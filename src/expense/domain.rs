//! Core expense domain types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{category::CategoryId, database_id::ExpenseId, user::UserId};

/// Money spent by a user on a given day.
///
/// The vendor and metadata are stored encrypted and are only decrypted when
/// statistics need them. To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The user the expense belongs to.
    pub owner_user_id: UserId,
    /// The amount of money spent.
    pub amount: f64,
    /// The day the purchase was made.
    pub purchase_date: Date,
    /// The ID of the category the expense was filed under, if any.
    pub category_id: Option<CategoryId>,
    /// The encrypted name of the vendor.
    pub vendor: Option<String>,
    /// Encrypted JSON with extra details about the purchase.
    ///
    /// A `category` field in this JSON overrides `category_id`.
    pub encrypted_metadata: Option<String>,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(owner_user_id: UserId, amount: f64, purchase_date: Date) -> ExpenseBuilder {
        ExpenseBuilder {
            owner_user_id,
            amount,
            purchase_date,
            category_id: None,
            vendor: None,
            encrypted_metadata: None,
        }
    }
}

/// A builder for inserting new [Expense] rows.
#[derive(Debug, PartialEq, Clone)]
pub struct ExpenseBuilder {
    /// The user the expense belongs to.
    pub owner_user_id: UserId,
    /// The amount of money spent.
    pub amount: f64,
    /// The day the purchase was made.
    pub purchase_date: Date,
    /// The ID of the category the expense was filed under.
    pub category_id: Option<CategoryId>,
    /// The encrypted name of the vendor.
    pub vendor: Option<String>,
    /// Encrypted JSON with extra details about the purchase.
    pub encrypted_metadata: Option<String>,
}

impl ExpenseBuilder {
    /// Set the category id for the expense.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the encrypted vendor for the expense.
    pub fn vendor(mut self, vendor: Option<String>) -> Self {
        self.vendor = vendor;
        self
    }

    /// Set the encrypted metadata for the expense.
    pub fn encrypted_metadata(mut self, encrypted_metadata: Option<String>) -> Self {
        self.encrypted_metadata = encrypted_metadata;
        self
    }
}
