use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// An idea the program has already performed, as supplied by the
/// persistence collaborator. The engine only ever reads these.
///
/// `last_used_date` is kept as the raw string the archive stores;
/// records whose date does not parse are excluded from recency
/// scanning rather than failing the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalIdeaRecord {
    pub id: String,
    pub idea_title: String,
    pub last_used_date: String,
    pub props_list: String,
    pub summary: String,
    pub event_type: String,
}

impl HistoricalIdeaRecord {
    /// Parse `last_used_date` leniently: RFC 3339 first, then a bare
    /// datetime, then a bare date at midnight. Returns `None` when no
    /// form matches.
    pub fn last_used(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_used_date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(Utc.from_utc_datetime(&ndt));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|ndt| Utc.from_utc_datetime(&ndt))
    }
}
