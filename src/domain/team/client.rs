//! Teams sub-client and the team-scoped view.

use crate::client::ElabClient;
use crate::error::{SdkError, ValidationError};
use crate::shared::Record;

use std::fmt;

/// Which team an operation addresses.
///
/// `Current` is the API's alias for the key owner's active team; it is
/// resolved to a concrete id the first time a scoped view needs one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSelector {
    Current,
    Id(i64),
}

impl fmt::Display for TeamSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSelector::Current => f.write_str("current"),
            TeamSelector::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Sub-client for team operations.
pub struct Teams<'a> {
    pub(crate) client: &'a ElabClient,
}

impl<'a> Teams<'a> {
    /// All teams. Always refreshes from the API and feeds the shared
    /// registry.
    pub fn list(&self) -> Result<Vec<Record>, SdkError> {
        let teams = self.client.get_all("teams", &[])?;
        let mut registry = self.client.teams.borrow_mut();
        for team in &teams {
            registry.insert(team.clone());
        }
        Ok(teams)
    }

    /// One team by selector; the fetched record feeds the registry.
    pub fn get(&self, selector: TeamSelector) -> Result<Record, SdkError> {
        let team = self.client.get_one(&format!("teams/{selector}"), &[])?;
        self.client.teams.borrow_mut().insert(team.clone());
        Ok(team)
    }

    /// Find a team by name: the registry answers first; otherwise one
    /// bulk fetch refreshes it before giving up.
    pub fn by_name(&self, name: &str) -> Result<Option<Record>, SdkError> {
        let hit = self.client.teams.borrow().by_name(name).cloned();
        if let Some(team) = hit {
            tracing::debug!(name, "returning team from the registry");
            return Ok(Some(team));
        }
        tracing::debug!(name, "fetching all teams to resolve name");
        let teams = self.list()?;
        Ok(teams.into_iter().find(|t| t.name() == Some(name)))
    }

    /// Tags defined for the current team.
    pub fn tags(&self) -> Result<Vec<Record>, SdkError> {
        Ok(self.client.get_all("team_tags", &[])?)
    }

    /// One tag by id; a payload-encoded 404 comes back as `None`.
    pub fn tag(&self, tag_id: i64) -> Result<Option<Record>, SdkError> {
        Ok(self.client.get_maybe(&format!("team_tags/{tag_id}"), &[])?)
    }
}

/// A client view bound to one resolved team id.
///
/// Binding fetches the team once (resolving [`TeamSelector::Current`] to
/// its concrete id) and feeds the shared registry.
pub struct TeamScoped<'a> {
    client: &'a ElabClient,
    team: Record,
    team_id: i64,
}

impl<'a> TeamScoped<'a> {
    pub(crate) fn bind(client: &'a ElabClient, selector: TeamSelector) -> Result<Self, SdkError> {
        let team = Teams { client }.get(selector)?;
        let team_id = match selector {
            TeamSelector::Id(id) => id,
            TeamSelector::Current => team
                .id()
                .ok_or_else(|| SdkError::Other("current team record has no id".to_string()))?,
        };
        Ok(Self {
            client,
            team,
            team_id,
        })
    }

    pub fn id(&self) -> i64 {
        self.team_id
    }

    /// The team record fetched at bind time.
    pub fn record(&self) -> &Record {
        &self.team
    }

    // ── Experiments categories ───────────────────────────────────────────

    pub fn categories(&self) -> Result<Vec<Record>, SdkError> {
        Ok(self
            .client
            .get_all(&format!("teams/{}/experiments_categories", self.team_id), &[])?)
    }

    /// One category by id; a payload-encoded 404 comes back as `None`.
    pub fn category(&self, category_id: i64) -> Result<Option<Record>, SdkError> {
        Ok(self.client.get_maybe(
            &format!("teams/{}/experiments_categories/{category_id}", self.team_id),
            &[],
        )?)
    }

    pub fn category_by_name(&self, name: &str) -> Result<Option<Record>, SdkError> {
        Ok(self
            .categories()?
            .into_iter()
            .find(|c| c.title() == Some(name)))
    }

    /// Resolve a category name to its id, as required by write calls.
    pub fn category_id(&self, name: &str) -> Result<i64, SdkError> {
        self.category_by_name(name)?
            .and_then(|c| c.id())
            .ok_or_else(|| ValidationError::UnknownCategory(name.to_string()).into())
    }

    // ── Experiments statuses ─────────────────────────────────────────────

    pub fn statuses(&self) -> Result<Vec<Record>, SdkError> {
        Ok(self
            .client
            .get_all(&format!("teams/{}/experiments_status", self.team_id), &[])?)
    }

    /// One status by id; a payload-encoded 404 comes back as `None`.
    pub fn status(&self, status_id: i64) -> Result<Option<Record>, SdkError> {
        Ok(self.client.get_maybe(
            &format!("teams/{}/experiments_status/{status_id}", self.team_id),
            &[],
        )?)
    }

    pub fn status_by_title(&self, title: &str) -> Result<Option<Record>, SdkError> {
        Ok(self
            .statuses()?
            .into_iter()
            .find(|s| s.title() == Some(title)))
    }

    // ── Items statuses ───────────────────────────────────────────────────

    pub fn items_statuses(&self) -> Result<Vec<Record>, SdkError> {
        Ok(self
            .client
            .get_all(&format!("teams/{}/items_status", self.team_id), &[])?)
    }

    /// One items status by id; a payload-encoded 404 comes back as `None`.
    pub fn items_status(&self, status_id: i64) -> Result<Option<Record>, SdkError> {
        Ok(self.client.get_maybe(
            &format!("teams/{}/items_status/{status_id}", self.team_id),
            &[],
        )?)
    }

    pub fn items_status_by_title(&self, title: &str) -> Result<Option<Record>, SdkError> {
        Ok(self
            .items_statuses()?
            .into_iter()
            .find(|s| s.title() == Some(title)))
    }
}
