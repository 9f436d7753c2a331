use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use croner::Cron;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A parsed cron expression, evaluated in UTC.
pub struct CronSchedule {
    expr: String,
    cron: Cron,
}

impl fmt::Debug for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CronSchedule").field(&self.expr).finish()
    }
}

impl CronSchedule {
    pub fn parse(expr: &str) -> Result<Self, String> {
        let cron = Cron::from_str(expr).map_err(|e| format!("{:?}: {}", expr, e))?;
        Ok(Self { expr: expr.to_string(), cron })
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// First occurrence strictly after `after`.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.cron.find_next_occurrence(&after, false).ok()
    }
}

/// Owns the background job tasks. Jobs are not mutually exclusive: a run that
/// is still going when the next trigger fires simply overlaps with it.
#[derive(Default)]
pub struct Scheduler {
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `job` on the blocking pool each time `schedule` fires. The job gets the trigger instant.
    pub fn add_cron<F>(&mut self, name: &'static str, schedule: CronSchedule, job: F)
    where
        F: Fn(DateTime<Utc>) + Send + Sync + 'static,
    {
        let job = Arc::new(job);
        let handle = tokio::spawn(async move {
            info!(job = name, cron = schedule.expr(), "Scheduled cron job");
            let mut last_fired: Option<DateTime<Utc>> = None;
            loop {
                let now = Utc::now();
                let Some(next) = next_fire(&schedule, now, last_fired) else {
                    warn!(job = name, cron = schedule.expr(), "Cron schedule has no further occurrences");
                    return;
                };
                let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                tokio::time::sleep(wait).await;
                last_fired = Some(next);

                info!(job = name, fired_at = %next, "Running cron job");
                let job = Arc::clone(&job);
                dispatch(name, move || job(next));
            }
        });
        self.handles.push(handle);
    }

    /// Run `job` every `period`, first run one period from now.
    pub fn add_interval<F>(&mut self, name: &'static str, period: Duration, job: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let job = Arc::new(job);
        let handle = tokio::spawn(async move {
            info!(job = name, period_secs = period.as_secs(), "Scheduled interval job");
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                let job = Arc::clone(&job);
                dispatch(name, move || job());
            }
        });
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Stop triggering jobs. Runs already dispatched finish on their own.
    pub fn shutdown(self) {
        for handle in self.handles {
            handle.abort();
        }
    }
}

/// Next trigger instant. `now` is cut to whole seconds so triggers land on the
/// second, and nothing at or before `last_fired` is returned again even if the
/// clock reads slightly early after a sleep.
fn next_fire(schedule: &CronSchedule, now: DateTime<Utc>, last_fired: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    let now = now.with_nanosecond(0).unwrap_or(now);
    let from = last_fired.map_or(now, |last| last.max(now));
    schedule.next_after(from)
}

fn dispatch<F>(name: &'static str, run: F)
where
    F: FnOnce() + Send + 'static,
{
    let blocking = tokio::task::spawn_blocking(run);
    tokio::spawn(async move {
        if let Err(e) = blocking.await {
            error!(job = name, error = %e, "Job task panicked or was cancelled");
        }
    });
}
