use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, instrument, warn};

use crate::football_data::{MatchSource, fetch_matches};
use crate::model::date_range::ReportMode;
use crate::model::match_record::TeamId;
use crate::report::format_report;
use crate::telegram::Notifier;
use crate::translations::Translations;

/// Everything a report run needs, passed in explicitly.
#[derive(Clone)]
pub struct AppContext {
    pub source: Arc<dyn MatchSource + Send + Sync>,
    pub notifier: Arc<dyn Notifier + Send + Sync>,
    pub translations: Arc<Translations>,
    pub team_ids: Vec<TeamId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Sent,
    /// Nothing to report and the mode stays quiet when empty.
    Skipped,
    SendFailed(String),
}

/// Fetch and render the report for `mode` as of `today`, without sending it.
pub fn build_report(ctx: &AppContext, mode: ReportMode, today: NaiveDate) -> Option<String> {
    let range = mode.range_for(today);
    let records = fetch_matches(ctx.source.as_ref(), &range, &ctx.team_ids);
    info!(mode = %mode, start = %range.start_str(), end = %range.end_str(), matches = records.len(), "Collected matches");
    format_report(records, &range, mode, &ctx.translations)
}

/// One full pipeline run: fetch, format, and send when there is something to say.
/// Delivery failures are logged and reported in the outcome, never raised.
#[instrument(skip(ctx))]
pub fn run_report(ctx: &AppContext, mode: ReportMode, today: NaiveDate) -> JobOutcome {
    let Some(message) = build_report(ctx, mode, today) else {
        info!(mode = %mode, "No matches, skipping message");
        return JobOutcome::Skipped;
    };
    info!(message = %message, "Prepared report");
    match ctx.notifier.notify(&message) {
        Ok(()) => JobOutcome::Sent,
        Err(e) => {
            error!(error = %e, "Failed to send report");
            JobOutcome::SendFailed(e.to_string())
        }
    }
}

/// Hit our own health endpoint so the host sees traffic. Returns the HTTP status.
pub fn keep_alive(self_url: &str) -> Result<u16, String> {
    let url = format!("{}/", self_url.trim_end_matches('/'));
    match ureq::get(&url).call() {
        Ok(resp) => {
            let status = resp.status().as_u16();
            info!(url = %url, status, "Keep-alive ping");
            Ok(status)
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Keep-alive ping failed");
            Err(format!("Keep-alive ping failed: {}", e))
        }
    }
}
