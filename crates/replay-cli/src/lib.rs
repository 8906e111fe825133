//! Shared helpers for the replay CLI binary.

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use replay_core::models::ReplayRequest;
use uuid::Uuid;

/// Parse an RFC 3339 timestamp, or a plain `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {} (expected RFC 3339 or YYYY-MM-DD)", raw))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("Invalid midnight timestamp")?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Deterministic demo records spread backwards in time, one per hour.
pub fn seed_records(count: usize, destinations: &[String]) -> Vec<ReplayRequest> {
    const FLOW_TYPES: [&str; 3] = ["standard", "priority", "bulk"];
    let base = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    (0..count)
        .map(|i| ReplayRequest {
            id: Uuid::new_v4(),
            requester_uid: format!("usr_{:03}", i),
            starter_uid: "usr_operator".to_string(),
            creation_date: base - Duration::hours(i as i64),
            start_date: base - Duration::hours(i as i64),
            flow_type: FLOW_TYPES[i % FLOW_TYPES.len()].to_string(),
            destination: destinations
                .get(i % destinations.len().max(1))
                .cloned()
                .unwrap_or_else(|| "Test Environment".to_string()),
        })
        .collect()
}
