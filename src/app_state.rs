//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    config::Config,
    crypto::{Decrypt, FieldCipher},
    db::initialize,
    timezone::get_local_offset,
    user::UserId,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The cipher for reading encrypted vendor names and metadata.
    pub cipher: Arc<dyn Decrypt>,

    /// The local timezone as a canonical timezone name, e.g. "Europe/Chisinau".
    pub local_timezone: String,

    /// The user whose expenses the statistics endpoints report on.
    pub default_user_id: UserId,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized, or
    /// [Error::InvalidTimezoneError] if `config.local_timezone` is not a valid,
    /// canonical timezone name.
    pub fn new(db_connection: Connection, config: &Config) -> Result<Self, Error> {
        if get_local_offset(&config.local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(config.local_timezone.clone()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            cipher: Arc::new(FieldCipher::from_secret(&config.encryption_key)),
            local_timezone: config.local_timezone.clone(),
            default_user_id: config.default_user_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{Error, config::Config, user::UserId};

    use super::AppState;

    fn test_config(local_timezone: &str) -> Config {
        Config {
            local_timezone: local_timezone.to_owned(),
            default_user_id: UserId::new("alice"),
            encryption_key: "foobar".to_owned(),
        }
    }

    #[test]
    fn new_initializes_database() {
        let state = AppState::new(Connection::open_in_memory().unwrap(), &test_config("Etc/UTC"))
            .expect("Could not create app state");

        let connection = state.db_connection.lock().unwrap();
        let expense_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM expense", [], |row| row.get(0))
            .expect("expense table should exist");
        assert_eq!(expense_count, 0);
    }

    #[test]
    fn new_rejects_invalid_timezone() {
        let result = AppState::new(
            Connection::open_in_memory().unwrap(),
            &test_config("Middle/Earth"),
        );

        assert_eq!(
            result.map(|_| ()),
            Err(Error::InvalidTimezoneError("Middle/Earth".to_owned()))
        );
    }
}
