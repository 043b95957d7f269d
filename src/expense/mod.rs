//! Expenses and the queries the statistics are computed from.

mod db;
mod domain;

pub use db::{
    VendorTotalRow, create_expense, create_expense_table, get_expenses, get_grouped_vendor_totals,
    get_period_totals,
};
pub use domain::{Expense, ExpenseBuilder};
