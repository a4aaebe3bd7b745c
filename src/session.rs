//! Login session over the unversioned session key.

use crate::error::StoreError;
use crate::model::User;
use crate::store::ResilientStore;
use crate::types::Domain;
use tracing::{debug, info, warn};

impl ResilientStore {
    /// Authenticate against the users collection and persist the session.
    ///
    /// Both inputs are trimmed. The username must match exactly; the email
    /// match ignores case. The stored session copy never carries the secret.
    pub fn login(&self, identifier: &str, secret: &str) -> Result<User, StoreError> {
        let identifier = identifier.trim();
        let secret = secret.trim();

        let found = self
            .users()
            .into_iter()
            .find(|u| u.matches_identifier(identifier) && u.password.as_deref() == Some(secret));

        let Some(user) = found else {
            debug!("Login rejected");
            return Err(StoreError::InvalidCredentials);
        };

        let session = user.without_secret();
        let text = serde_json::to_string(&session)?;
        self.put_raw(&self.schema().session_key(), &text)?;
        info!(username = session.username.as_str(), "User logged in");
        Ok(session)
    }

    /// Clear the session. Logging out twice is not an error.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.remove_raw(&self.schema().session_key())?;
        Ok(())
    }

    /// The logged-in user, if the session key holds a readable one.
    pub fn current_user(&self) -> Option<User> {
        let key = self.schema().session_key();
        let raw = match self.get_raw(&key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read session: {}", e);
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| warn!("Discarding unreadable session: {}", e))
            .ok()
    }

    fn users(&self) -> Vec<User> {
        match self.read(Domain::Users) {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}
