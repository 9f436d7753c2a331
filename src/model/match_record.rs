use std::fmt;

use chrono::{DateTime, Utc};

use crate::model::api::ApiMatch;

/// Placeholder for a side that has not been decided yet.
pub const UNDECIDED_TEAM: &str = "TBD";

/// Club identifier in the football-data.org namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub competition: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(competition: &str, home_team: &str, away_team: &str, kickoff: DateTime<Utc>) -> Self {
        Self {
            competition: competition.to_string(),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            kickoff,
        }
    }

    /// Convert an API match, consuming it to move the names out.
    /// Returns Err with the raw timestamp when `utcDate` is not RFC 3339.
    pub fn from_api(m: ApiMatch) -> Result<Self, String> {
        let kickoff = DateTime::parse_from_rfc3339(&m.utc_date)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| m.utc_date.clone())?;
        Ok(Self {
            competition: m.competition.name,
            home_team: m.home_team.name.unwrap_or_else(|| UNDECIDED_TEAM.to_string()),
            away_team: m.away_team.name.unwrap_or_else(|| UNDECIDED_TEAM.to_string()),
            kickoff,
        })
    }
}
