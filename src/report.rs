use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};

use crate::model::date_range::{DateRange, ReportMode};
use crate::model::match_record::MatchRecord;
use crate::translations::Translations;

/// Kickoff times are shown at UTC+2.
pub const DISPLAY_OFFSET_HOURS: i32 = 2;
pub const SEPARATOR_WIDTH: usize = 40;

static DISPLAY_OFFSET: LazyLock<FixedOffset> = LazyLock::new(|| {
    FixedOffset::east_opt(DISPLAY_OFFSET_HOURS * 3600).expect("display offset within +-24h")
});

fn display_time(record: &MatchRecord) -> DateTime<FixedOffset> {
    record.kickoff.with_timezone(&*DISPLAY_OFFSET)
}

/// Sentence sent by the weekly report when nothing is scheduled.
pub fn no_matches_message(range: &DateRange) -> String {
    format!("לא נמצאו משחקים לשבוע הקרוב ({} - {}).", range.start_str(), range.end_str())
}

fn header(range: &DateRange, mode: ReportMode) -> String {
    match mode {
        ReportMode::Weekly => format!("משחקים לשבוע הקרוב ({} - {}):\n", range.start_str(), range.end_str()),
        ReportMode::Daily => format!("משחקים היום ({}):\n", range.start_str()),
    }
}

fn push_block(out: &mut String, record: &MatchRecord, mode: ReportMode, translations: &Translations) {
    let local = display_time(record);
    let competition = translations.leagues.translate(&record.competition);
    let home = translations.teams.translate(&record.home_team);
    let away = translations.teams.translate(&record.away_team);

    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');
    out.push_str(&format!("תחרות: {}\n", competition));
    out.push_str(&format!("{} vs {}\n", home, away));
    if mode == ReportMode::Weekly {
        out.push_str(&format!("תאריך: {}\n", local.format("%Y-%m-%d")));
    }
    out.push_str(&format!("שעה: {}\n", local.format("%H:%M")));
}

/// Render merged records into one message, earliest kickoff first.
/// Returns None when there is nothing to send (daily report with no matches).
pub fn format_report(
    mut records: Vec<MatchRecord>,
    range: &DateRange,
    mode: ReportMode,
    translations: &Translations,
) -> Option<String> {
    if records.is_empty() {
        return if mode.sends_when_empty() { Some(no_matches_message(range)) } else { None };
    }
    // sort_by_key is stable: equal kickoffs keep fetch order
    records.sort_by_key(|r| r.kickoff);

    let mut out = header(range, mode);
    for record in &records {
        push_block(&mut out, record, mode, translations);
    }
    Some(out)
}
