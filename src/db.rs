//! Database setup for the tables the statistics are read from.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{category::create_category_table, expense::create_expense_table};

/// Create the category and expense tables if they do not exist yet.
///
/// The tables are created inside a single exclusive transaction, so a
/// failure leaves the database untouched.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
