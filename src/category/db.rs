//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryBuilder},
    user::UserId,
};

/// Create a category and return it with its generated ID.
pub fn create_category(category: CategoryBuilder, connection: &Connection) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (user_id, name, color, icon) VALUES (?1, ?2, ?3, ?4);",
        (
            &category.user_id,
            &category.name,
            &category.color,
            &category.icon,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        user_id: category.user_id,
        name: category.name,
        color: category.color,
        icon: category.icon,
    })
}

/// Retrieve all of a user's categories in the order they were created.
pub fn get_categories(user_id: &UserId, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, color, icon FROM category WHERE user_id = ?1 ORDER BY id ASC;",
        )?
        .query_map([user_id], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            color TEXT,
            icon TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
        icon: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        category::{Category, create_category, get_categories},
        user::UserId,
    };

    use super::create_category_table;

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let user_id = UserId::new("alice");

        let category = create_category(
            Category::build(user_id.clone(), "Groceries")
                .color("#34d399")
                .icon("shopping-basket"),
            &connection,
        )
        .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.user_id, user_id);
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.color.as_deref(), Some("#34d399"));
        assert_eq!(category.icon.as_deref(), Some("shopping-basket"));
    }

    #[test]
    fn get_categories_returns_only_the_users_categories() {
        let connection = get_test_db_connection();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        let groceries =
            create_category(Category::build(alice.clone(), "Groceries"), &connection).unwrap();
        let transport =
            create_category(Category::build(alice.clone(), "Transport"), &connection).unwrap();
        create_category(Category::build(bob, "Hobbies"), &connection).unwrap();

        let categories = get_categories(&alice, &connection).expect("Could not get categories");

        assert_eq!(categories, vec![groceries, transport]);
    }

    #[test]
    fn get_categories_without_categories_is_empty() {
        let connection = get_test_db_connection();

        let categories = get_categories(&UserId::new("alice"), &connection).unwrap();

        assert!(categories.is_empty());
    }
}
