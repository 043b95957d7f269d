//! Database queries for expenses.
//!
//! All queries are scoped to a single owner and an optional inclusive date
//! window. Sums over no rows come back as zero rather than `NULL`.

use rusqlite::{Connection, Row, params_from_iter};

use crate::{
    Error,
    expense::{Expense, ExpenseBuilder},
    statistics::DateWindow,
    user::UserId,
};

/// The total, count and average of a user's expenses over some window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodTotals {
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
    /// The mean expense amount, zero if there are no expenses.
    pub average: f64,
}

/// The sum of a user's expenses at one encrypted vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorTotalRow {
    /// The vendor ciphertext shared by the grouped expenses.
    pub vendor: String,
    /// The sum of the expense amounts.
    pub total: f64,
    /// The number of expenses.
    pub count: i64,
}

/// Create an expense and return it with its generated ID.
pub fn create_expense(expense: ExpenseBuilder, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (owner_user_id, amount, purchase_date, category_id, vendor, encrypted_metadata)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        (
            &expense.owner_user_id,
            expense.amount,
            expense.purchase_date,
            expense.category_id,
            &expense.vendor,
            &expense.encrypted_metadata,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        owner_user_id: expense.owner_user_id,
        amount: expense.amount,
        purchase_date: expense.purchase_date,
        category_id: expense.category_id,
        vendor: expense.vendor,
        encrypted_metadata: expense.encrypted_metadata,
    })
}

/// Get a user's expenses, optionally restricted to `window`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails.
pub fn get_expenses(
    user_id: &UserId,
    window: Option<DateWindow>,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let (filter, params) = owner_and_window_filter(user_id, window);
    let query = format!(
        "SELECT id, owner_user_id, amount, purchase_date, category_id, vendor, encrypted_metadata
        FROM expense
        WHERE {filter}
        ORDER BY purchase_date ASC, id ASC"
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(params), map_row)?
        .collect::<Result<Vec<Expense>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Sum a user's expenses per distinct vendor ciphertext, skipping expenses without a vendor.
///
/// Note that two ciphertexts may decrypt to the same vendor name, so the
/// rows still need to be merged after decryption.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails.
pub fn get_grouped_vendor_totals(
    user_id: &UserId,
    window: Option<DateWindow>,
    connection: &Connection,
) -> Result<Vec<VendorTotalRow>, Error> {
    let (filter, params) = owner_and_window_filter(user_id, window);
    let query = format!(
        "SELECT vendor, COALESCE(SUM(amount), 0.0), COUNT(id)
        FROM expense
        WHERE {filter} AND vendor IS NOT NULL
        GROUP BY vendor
        ORDER BY MIN(id) ASC"
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(params), |row| {
            Ok(VendorTotalRow {
                vendor: row.get(0)?,
                total: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<VendorTotalRow>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Get the total, count and average of a user's expenses, optionally restricted to `window`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails.
pub fn get_period_totals(
    user_id: &UserId,
    window: Option<DateWindow>,
    connection: &Connection,
) -> Result<PeriodTotals, Error> {
    let (filter, params) = owner_and_window_filter(user_id, window);
    let query = format!(
        "SELECT COALESCE(SUM(amount), 0.0), COUNT(id), COALESCE(AVG(amount), 0.0)
        FROM expense
        WHERE {filter}"
    );

    connection
        .query_row(&query, params_from_iter(params), |row| {
            Ok(PeriodTotals {
                total: row.get(0)?,
                count: row.get(1)?,
                average: row.get(2)?,
            })
        })
        .map_err(|error| error.into())
}

/// Initialize the expense table and indexes.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            owner_user_id TEXT NOT NULL,
            amount REAL NOT NULL,
            purchase_date TEXT NOT NULL,
            category_id INTEGER,
            vendor TEXT,
            encrypted_metadata TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_expense_owner_date ON expense(owner_user_id, purchase_date);",
    )?;

    Ok(())
}

/// Build the `WHERE` clause and its parameters for an owner and optional window.
fn owner_and_window_filter(user_id: &UserId, window: Option<DateWindow>) -> (&'static str, Vec<String>) {
    match window {
        Some(window) => (
            "owner_user_id = ?1 AND purchase_date BETWEEN ?2 AND ?3",
            vec![
                user_id.to_string(),
                window.start().to_string(),
                window.end().to_string(),
            ],
        ),
        None => ("owner_user_id = ?1", vec![user_id.to_string()]),
    }
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        owner_user_id: row.get(1)?,
        amount: row.get(2)?,
        purchase_date: row.get(3)?,
        category_id: row.get(4)?,
        vendor: row.get(5)?,
        encrypted_metadata: row.get(6)?,
    })
}
