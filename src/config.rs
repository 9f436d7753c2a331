use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;
use crate::football_data::DEFAULT_BASE_URL;
use crate::model::match_record::TeamId;
use crate::scheduler::CronSchedule;

/// Real Madrid and Barcelona.
pub const DEFAULT_TEAM_IDS: &str = "86,81";
pub const DEFAULT_WEEKLY_CRON: &str = "0 13 * * 1";
pub const DEFAULT_DAILY_CRON: &str = "0 18 * * *";
pub const DEFAULT_KEEPALIVE_SECS: u64 = 600;
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings, read from the environment at startup.
pub struct Config {
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub football_api_key: String,
    pub football_api_url: String,
    pub team_ids: Vec<TeamId>,
    pub leagues_file: PathBuf,
    pub teams_file: PathBuf,
    pub weekly_schedule: Option<CronSchedule>,
    pub daily_schedule: Option<CronSchedule>,
    pub keepalive_interval: Option<Duration>,
    pub host: String,
    pub port: u16,
    pub self_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup so tests don't need to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        // Missing credentials are not fatal: the health route stays up and the
        // remote calls fail and get logged instead.
        let credential = |key: &str| -> String {
            let value = optional(key, "");
            if value.is_empty() {
                warn!(var = key, "Credential not set, remote calls using it will fail");
            }
            value
        };

        let telegram_token = credential("TELEGRAM_API_TOKEN");
        let telegram_chat_id = credential("TELEGRAM_CHAT_ID");
        let football_api_key = credential("FOOTBALL_API_KEY");
        let football_api_url = optional("FOOTBALL_API_URL", DEFAULT_BASE_URL);
        let team_ids = parse_team_ids(&optional("TEAM_IDS", DEFAULT_TEAM_IDS))?;
        let leagues_file = PathBuf::from(optional("LEAGUES_FILE", "data/leagues.json"));
        let teams_file = PathBuf::from(optional("TEAMS_FILE", "data/teams.json"));
        // Unlike other settings, an empty cron value is meaningful: it disables the job
        let cron = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let weekly_schedule = parse_schedule("WEEKLY_CRON", &cron("WEEKLY_CRON", DEFAULT_WEEKLY_CRON))?;
        let daily_schedule = parse_schedule("DAILY_CRON", &cron("DAILY_CRON", DEFAULT_DAILY_CRON))?;

        let keepalive_secs = match lookup("KEEPALIVE_INTERVAL_SECS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "KEEPALIVE_INTERVAL_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_KEEPALIVE_SECS,
        };
        let keepalive_interval = (keepalive_secs > 0).then(|| Duration::from_secs(keepalive_secs));

        let host = optional("HOST", "0.0.0.0");
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::Invalid { var: "PORT", reason: e.to_string() })?,
            None => DEFAULT_PORT,
        };
        let self_url = optional("SELF_URL", &format!("http://127.0.0.1:{}", port));

        Ok(Self {
            telegram_token,
            telegram_chat_id,
            football_api_key,
            football_api_url,
            team_ids,
            leagues_file,
            teams_file,
            weekly_schedule,
            daily_schedule,
            keepalive_interval,
            host,
            port,
            self_url,
        })
    }
}

/// Comma separated list of football-data team ids, e.g. `86,81`.
pub fn parse_team_ids(raw: &str) -> Result<Vec<TeamId>, ConfigError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map(TeamId)
                .map_err(|e| ConfigError::Invalid { var: "TEAM_IDS", reason: format!("{:?}: {}", s, e) })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if ids.is_empty() {
        return Err(ConfigError::Invalid { var: "TEAM_IDS", reason: "no team ids given".to_string() });
    }
    Ok(ids)
}

/// Empty or `off` disables the job.
fn parse_schedule(var: &'static str, raw: &str) -> Result<Option<CronSchedule>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    CronSchedule::parse(raw)
        .map(Some)
        .map_err(|reason| ConfigError::Invalid { var, reason })
}
