//! Settings that are fixed for the lifetime of the server.

use std::fmt::Debug;

use crate::user::UserId;

/// The settings the server is started with.
///
/// Built once at start up, usually from command line arguments and
/// environment variables, and handed to [crate::AppState::new].
#[derive(Clone)]
pub struct Config {
    /// The local timezone as a canonical timezone name, e.g. "Europe/Chisinau".
    ///
    /// Used to work out what "today" is when a request does not name a date.
    pub local_timezone: String,
    /// The user whose expenses the statistics endpoints report on.
    pub default_user_id: UserId,
    /// The secret the encryption key for vendor names and metadata is derived from.
    pub encryption_key: String,
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("local_timezone", &self.local_timezone)
            .field("default_user_id", &self.default_user_id)
            .field("encryption_key", &"********")
            .finish()
    }
}
