use chrono::{DateTime, Duration, NaiveTime, Utc};
use tokio::time::sleep;
use tracing::{error, info};

use crate::config::{SyncConfig, Zone};
use crate::runtime::{build_services, run_daily_sync_and_review};

/// Sleeps until the configured hour each day and runs sync plus review.
pub async fn run_daily_loop(config: &SyncConfig) {
    loop {
        let next_run = next_daily_run(Utc::now(), &config.zone, config.daily_run_hour);
        let sleep_for = (next_run - Utc::now())
            .to_std()
            .unwrap_or_else(|_| std::time::Duration::from_secs(60));
        info!(next_run = %next_run, "Waiting for next daily run");
        sleep(sleep_for).await;

        match build_services(config) {
            Ok((store, calendar)) => {
                let outcome = run_daily_sync_and_review(&store, &calendar, config, Utc::now()).await;
                if !outcome.is_success() {
                    error!("Daily run finished with errors");
                }
            }
            Err(e) => error!("Failed to build HTTP clients: {}", e),
        }
    }
}

pub fn next_daily_run(now: DateTime<Utc>, zone: &Zone, hour: u32) -> DateTime<Utc> {
    let today = zone.today(now);
    let at = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let target = zone.resolve_local(today.and_time(at)).with_timezone(&Utc);
    if now < target {
        target
    } else {
        target + Duration::days(1)
    }
}
