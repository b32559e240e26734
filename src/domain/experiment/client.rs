//! Experiments sub-client.

use crate::client::ElabClient;
use crate::domain::q;
use crate::error::{HttpError, SdkError, ValidationError};
use crate::http::Method;
use crate::shared::Record;

/// Sub-client for experiment operations.
pub struct Experiments<'a> {
    pub(crate) client: &'a ElabClient,
}

/// How to address an experiments category in [`Experiments::set_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector {
    Id(i64),
    /// Resolved against the current team's category list; an unknown
    /// name is a validation error, raised before the PATCH goes out.
    Name(String),
}

impl<'a> Experiments<'a> {
    /// All experiments visible to the authenticated user.
    pub fn list(&self) -> Result<Vec<Record>, SdkError> {
        Ok(self.client.get_all("experiments", &[])?)
    }

    /// Experiments whose status matches `status`.
    pub fn by_status(&self, status: &str) -> Result<Vec<Record>, SdkError> {
        Ok(self
            .client
            .get_all("experiments", &[q(format!("status:\"{status}\""))])?)
    }

    /// Experiments whose category matches `category`.
    pub fn by_category(&self, category: &str) -> Result<Vec<Record>, SdkError> {
        Ok(self
            .client
            .get_all("experiments", &[q(format!("category:\"{category}\""))])?)
    }

    /// Look an experiment up by its unique `elabid`.
    pub fn by_elabid(&self, elabid: &str) -> Result<Option<Record>, SdkError> {
        let matches = self
            .client
            .get_all("experiments", &[q(format!("elabid:{elabid}"))])?;
        Ok(matches.into_iter().next())
    }

    /// One experiment by id. Cached for the client's lifetime; use
    /// [`ElabClient::clear_all_caches`] to force a refetch.
    pub fn get(&self, experiment_id: i64) -> Result<Record, SdkError> {
        Ok(self.client.experiment_cache.get_or_fetch(experiment_id, || {
            self.client
                .get_one(&format!("experiments/{experiment_id}"), &[])
        })?)
    }

    /// Move an experiment to a category, addressed by id or by name.
    pub fn set_category(
        &self,
        experiment_id: i64,
        category: CategorySelector,
    ) -> Result<Record, SdkError> {
        let category_id = match category {
            CategorySelector::Id(id) => id,
            CategorySelector::Name(name) => {
                let categories = self
                    .client
                    .get_all("teams/current/experiments_categories", &[])?;
                categories
                    .iter()
                    .find(|c| c.title() == Some(name.as_str()))
                    .and_then(Record::id)
                    .ok_or(ValidationError::UnknownCategory(name))?
            }
        };

        let body = serde_json::json!({ "category": category_id });
        let endpoint = format!("experiments/{experiment_id}");
        self.client
            .write_one(Method::PATCH, &endpoint, &body)?
            .ok_or_else(|| {
                SdkError::Http(HttpError::NotFound(format!(
                    "{endpoint} returned no record"
                )))
            })
    }

    /// Web-view URL for an experiment, derived client-side from the API
    /// base URL.
    pub fn sharelink(&self, experiment_id: i64) -> String {
        let base = self.client.http.base_url();
        let root = base.split("/api/").next().unwrap_or(base);
        format!("{root}/experiments.php?mode=view&id={experiment_id}")
    }
}

#[cfg(test)]
mod tests {
    use crate::client::ElabClient;

    fn client(base_url: &str) -> ElabClient {
        ElabClient::builder()
            .base_url(base_url)
            .api_key("test-key")
            .build()
            .expect("client should build")
    }

    #[test]
    fn test_sharelink_drops_the_api_path() {
        let client = client("https://elab.example.org/api/v2/");
        assert_eq!(
            client.experiments().sharelink(42),
            "https://elab.example.org/experiments.php?mode=view&id=42"
        );
    }

    #[test]
    fn test_sharelink_without_api_suffix_uses_base() {
        let client = client("https://elab.example.org");
        assert_eq!(
            client.experiments().sharelink(1),
            "https://elab.example.org/experiments.php?mode=view&id=1"
        );
    }
}
