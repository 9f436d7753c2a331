use serde::Deserialize;

/// Body of `GET /teams/{id}/matches` on football-data.org v4.
#[derive(Debug, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    pub utc_date: String,
    pub competition: Competition,
    pub home_team: ApiTeam,
    pub away_team: ApiTeam,
}

#[derive(Debug, Deserialize)]
pub struct Competition {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiTeam {
    // Null until the fixture is drawn (cup rounds)
    #[serde(default)]
    pub name: Option<String>,
}
