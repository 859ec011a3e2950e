use chrono::{NaiveDate, NaiveTime, Utc};

pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Accepts `YYYY-MM-DD`.
pub fn parse_fecha(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}

/// Accepts `HH:MM:SS` or `HH:MM`.
pub fn parse_hora(s: &str) -> anyhow::Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(Into::into)
}
