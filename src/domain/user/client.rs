//! Users sub-client.

use crate::client::ElabClient;
use crate::error::SdkError;
use crate::shared::Record;

/// Sub-client for user accounts.
pub struct Users<'a> {
    pub(crate) client: &'a ElabClient,
}

impl<'a> Users<'a> {
    /// All users visible to the authenticated user.
    pub fn list(&self) -> Result<Vec<Record>, SdkError> {
        Ok(self.client.get_all("users", &[])?)
    }

    /// One user by id. Cached for the client's lifetime.
    pub fn get(&self, user_id: i64) -> Result<Record, SdkError> {
        Ok(self.client.user_cache.get_or_fetch(user_id, || {
            self.client.get_one(&format!("users/{user_id}"), &[])
        })?)
    }
}
