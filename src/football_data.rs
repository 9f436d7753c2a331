use std::fmt;

use tracing::{error, info, info_span, instrument, warn};

use crate::error::FetchError;
use crate::model::api::MatchesResponse;
use crate::model::date_range::DateRange;
use crate::model::match_record::{MatchRecord, TeamId};

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4/";

/// Anything that can list a club's fixtures inside a date window.
pub trait MatchSource {
    fn matches_for_team(&self, team: TeamId, range: &DateRange) -> Result<Vec<MatchRecord>, FetchError>;
}

/// Client for the football-data.org v4 API.
#[derive(Clone)]
pub struct FootballData {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for FootballData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FootballData").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl FootballData {
    pub fn new(base_url: &str, api_key: String) -> Self {
        // Keep non-2xx responses as Ok so the body can be logged
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        let base_url = if base_url.ends_with('/') { base_url.to_string() } else { format!("{}/", base_url) };
        Self { agent, base_url, api_key }
    }

    fn team_matches_url(&self, team: TeamId) -> String {
        format!("{}teams/{}/matches", self.base_url, team)
    }

    /// Decode a raw `/teams/{id}/matches` body. Fixtures with an unreadable kickoff are dropped.
    pub fn parse_matches(body: &str) -> Result<Vec<MatchRecord>, FetchError> {
        let doc = serde_json::from_str::<MatchesResponse>(body).map_err(|e| FetchError::Decode(e.to_string()))?;
        let mut records = Vec::with_capacity(doc.matches.len());
        for m in doc.matches.into_iter() {
            match MatchRecord::from_api(m) {
                Ok(record) => records.push(record),
                Err(raw) => warn!(utc_date = %raw, "Skipping match with unparsable kickoff"),
            }
        }
        Ok(records)
    }
}

impl MatchSource for FootballData {
    #[instrument(level = "info", skip(self))]
    fn matches_for_team(&self, team: TeamId, range: &DateRange) -> Result<Vec<MatchRecord>, FetchError> {
        let url = self.team_matches_url(team);
        let response = {
            let _span = info_span!("football_data_fetch", url = %url).entered();
            self.agent
                .get(&url)
                .header("X-Auth-Token", self.api_key.as_str())
                .query("dateFrom", range.start_str())
                .query("dateTo", range.end_str())
                .call()
        };
        let response = response.map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let mut body_reader = response.into_body();
        let body = body_reader
            .read_to_string()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(FetchError::Http { status: status.as_u16(), body });
        }

        let records = Self::parse_matches(&body)?;
        info!(team_id = %team, count = records.len(), "Fetched matches");
        Ok(records)
    }
}

/// Look up every team in `team_ids` and concatenate the results.
/// A failing team is logged and contributes nothing; the rest still run.
pub fn fetch_matches(source: &dyn MatchSource, range: &DateRange, team_ids: &[TeamId]) -> Vec<MatchRecord> {
    let mut all = Vec::new();
    for &team in team_ids {
        match source.matches_for_team(team, range) {
            Ok(records) => all.extend(records),
            Err(e) => error!(team_id = %team, error = %e, "Failed to fetch matches, skipping team"),
        }
    }
    all
}
