//! Items sub-client.

use crate::client::ElabClient;
use crate::error::SdkError;
use crate::shared::Record;

/// Sub-client for resource items.
pub struct Items<'a> {
    pub(crate) client: &'a ElabClient,
}

impl<'a> Items<'a> {
    /// All items visible to the authenticated user.
    pub fn list(&self) -> Result<Vec<Record>, SdkError> {
        Ok(self.client.get_all("items", &[])?)
    }

    /// One item by id. Cached for the client's lifetime.
    pub fn get(&self, item_id: i64) -> Result<Record, SdkError> {
        Ok(self.client.item_cache.get_or_fetch(item_id, || {
            self.client.get_one(&format!("items/{item_id}"), &[])
        })?)
    }
}
