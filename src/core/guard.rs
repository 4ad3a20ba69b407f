//! The four-year recurrence rule.
//!
//! A candidate is blocked when its token-set similarity to any
//! historical record used inside the rolling window exceeds the
//! threshold for that record. Same-event repeats are judged more
//! strictly than cross-event ones.

use chrono::{DateTime, Months, Utc};
use tracing::debug;

use crate::core::similarity;
use crate::schema::history::HistoricalIdeaRecord;
use crate::schema::idea::GeneratedIdea;

const RECENCY_WINDOW_MONTHS: u32 = 48;
const SECONDS_PER_YEAR: f64 = 365.0 * 86_400.0;

/// A historical record the candidate collided with.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub record_id: String,
    pub record_title: String,
    pub record_event_type: String,
    pub years_ago: f64,
    pub similarity: f64,
}

impl Collision {
    /// Render the originality notes attached to a blocked idea.
    pub fn describe(&self) -> String {
        format!(
            "Similar to \"{}\" (ID: {}, event: {}) used {:.1} years ago",
            self.record_title, self.record_id, self.record_event_type, self.years_ago
        )
    }
}

pub struct DuplicateGuard {
    same_event_threshold: f64,
    cross_event_threshold: f64,
}

impl Default for DuplicateGuard {
    fn default() -> Self {
        Self {
            same_event_threshold: 0.35,
            cross_event_threshold: 0.45,
        }
    }
}

impl DuplicateGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan history for an in-window record too similar to the
    /// candidate. The first qualifying record wins; there is no search
    /// for the closest match. Records with unparsable dates are
    /// skipped.
    pub fn check(
        &self,
        candidate: &GeneratedIdea,
        history: &[HistoricalIdeaRecord],
        now: DateTime<Utc>,
    ) -> Option<Collision> {
        let window_start = now
            .checked_sub_months(Months::new(RECENCY_WINDOW_MONTHS))
            .unwrap_or(now);
        let candidate_tokens = similarity::candidate_tokens(candidate);

        for record in history {
            let last_used = match record.last_used() {
                Some(when) => when,
                None => {
                    debug!(id = %record.id, date = %record.last_used_date,
                        "skipping record with unparsable date");
                    continue;
                }
            };
            if last_used <= window_start {
                continue;
            }

            let record_tokens = similarity::record_tokens(record);
            let score = similarity::jaccard(&candidate_tokens, &record_tokens);
            let threshold = if record.event_type == candidate.event_type {
                self.same_event_threshold
            } else {
                self.cross_event_threshold
            };

            if score > threshold {
                return Some(Collision {
                    record_id: record.id.clone(),
                    record_title: record.idea_title.clone(),
                    record_event_type: record.event_type.clone(),
                    years_ago: years_between(last_used, now),
                    similarity: score,
                });
            }
        }

        None
    }
}

/// Elapsed years, rounded to one decimal.
fn years_between(earlier: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let seconds = (now - earlier).num_seconds() as f64;
    (seconds / SECONDS_PER_YEAR * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rustc_hash::FxHashSet;

    use crate::schema::event::{MediaType, Venue};
    use crate::schema::idea::{DeliveryPlan, IdeaStatus};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn candidate(title: &str, summary: &str, props: &[&str], event: &str) -> GeneratedIdea {
        GeneratedIdea {
            id: "QX-042".to_string(),
            idea_title: title.to_string(),
            summary: summary.to_string(),
            media_type: MediaType::LiveSkit,
            event_type: event.to_string(),
            indoor_outdoor: Venue::Indoor,
            props_list: props.iter().map(|p| p.to_string()).collect(),
            costume_notes: String::new(),
            crowd_callouts: String::new(),
            risk_checks: Vec::new(),
            delivery_plan: DeliveryPlan::default(),
            tags: FxHashSet::default(),
            years_since_last_use: 0.0,
            status: IdeaStatus::Fresh,
            originality_notes: None,
            alternative: None,
            trend_source: None,
        }
    }

    fn record(
        id: &str,
        title: &str,
        summary: &str,
        props: &str,
        event: &str,
        date: &str,
    ) -> HistoricalIdeaRecord {
        HistoricalIdeaRecord {
            id: id.to_string(),
            idea_title: title.to_string(),
            last_used_date: date.to_string(),
            props_list: props.to_string(),
            summary: summary.to_string(),
            event_type: event.to_string(),
        }
    }

    #[test]
    fn identical_recent_same_event_record_blocks() {
        // The record's event-type token also appears in its title, so
        // both token sets are identical and similarity is 1.0.
        let idea = candidate(
            "Football Flash Mob",
            "surprise flash mob",
            &["confetti cannons"],
            "Football",
        );
        let history = vec![record(
            "AA-001",
            "Football Flash Mob",
            "surprise flash mob",
            "confetti cannons",
            "Football",
            "2025-03-15T00:00:00Z",
        )];

        let hit = DuplicateGuard::new().check(&idea, &history, now()).unwrap();
        assert_eq!(hit.record_id, "AA-001");
        assert!((hit.similarity - 1.0).abs() < f64::EPSILON);
        assert!((hit.years_ago - 1.0).abs() < 1e-9);
    }

    #[test]
    fn identical_record_outside_window_is_ignored() {
        let idea = candidate(
            "Football Flash Mob",
            "surprise flash mob",
            &["confetti cannons"],
            "Football",
        );
        let history = vec![record(
            "AA-001",
            "Football Flash Mob",
            "surprise flash mob",
            "confetti cannons",
            "Football",
            "2021-03-10T00:00:00Z",
        )];

        assert!(DuplicateGuard::new().check(&idea, &history, now()).is_none());
    }

    #[test]
    fn cross_event_similarity_at_040_does_not_block() {
        // Candidate {apple, banana, cherry}; record {apple, banana,
        // dragon, ember}: 2 shared over 5 total = 0.40, under the 0.45
        // cross-event threshold.
        let idea = candidate("apple banana", "cherry", &[], "Football");
        let history = vec![record(
            "BB-002",
            "apple banana",
            "dragon",
            "",
            "ember",
            "2025-06-01T00:00:00Z",
        )];

        assert!(DuplicateGuard::new().check(&idea, &history, now()).is_none());
    }

    #[test]
    fn cross_event_similarity_at_050_blocks() {
        // Candidate {apple, banana}; record {apple, banana, dragon,
        // ember}: 2 shared over 4 total = 0.50, over 0.45.
        let idea = candidate("apple banana", "", &[], "Football");
        let history = vec![record(
            "BB-003",
            "apple banana",
            "dragon",
            "",
            "ember",
            "2025-06-01T00:00:00Z",
        )];

        let hit = DuplicateGuard::new().check(&idea, &history, now()).unwrap();
        assert!((hit.similarity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn same_event_threshold_is_stricter() {
        // Similarity 0.40 passes cross-event but fails same-event.
        // Candidate {apple, banana, cherry}; record tokens {apple,
        // banana, dragon, football} with matching event type.
        let idea = candidate("apple banana", "cherry", &[], "football");
        let history = vec![record(
            "CC-004",
            "apple banana",
            "dragon",
            "",
            "football",
            "2025-06-01T00:00:00Z",
        )];

        let hit = DuplicateGuard::new().check(&idea, &history, now()).unwrap();
        assert!((hit.similarity - 0.4).abs() < 1e-9);
        assert_eq!(hit.record_event_type, "football");
    }

    #[test]
    fn unparsable_date_is_skipped_not_fatal() {
        let idea = candidate(
            "Football Flash Mob",
            "surprise flash mob",
            &["confetti cannons"],
            "Football",
        );
        let history = vec![
            record(
                "DD-005",
                "Football Flash Mob",
                "surprise flash mob",
                "confetti cannons",
                "Football",
                "sometime last fall",
            ),
            record(
                "DD-006",
                "Football Flash Mob",
                "surprise flash mob",
                "confetti cannons",
                "Football",
                "2025-03-15T00:00:00Z",
            ),
        ];

        // The broken record is passed over and the valid one still hits.
        let hit = DuplicateGuard::new().check(&idea, &history, now()).unwrap();
        assert_eq!(hit.record_id, "DD-006");
    }

    #[test]
    fn first_qualifying_record_wins() {
        let idea = candidate(
            "Football Flash Mob",
            "surprise flash mob",
            &["confetti cannons"],
            "Football",
        );
        let history = vec![
            record(
                "EE-007",
                "Football Flash Mob",
                "surprise flash mob",
                "confetti cannons",
                "Football",
                "2024-01-01T00:00:00Z",
            ),
            record(
                "EE-008",
                "Football Flash Mob",
                "surprise flash mob",
                "confetti cannons",
                "Football",
                "2025-03-15T00:00:00Z",
            ),
        ];

        let hit = DuplicateGuard::new().check(&idea, &history, now()).unwrap();
        assert_eq!(hit.record_id, "EE-007");
    }

    #[test]
    fn dissimilar_history_stays_fresh() {
        let idea = candidate(
            "Juggling Bit Synchronized",
            "the mascot juggles scarves at midfield",
            &["scarves"],
            "Soccer",
        );
        let history = vec![record(
            "FF-009",
            "Giant Flag Run",
            "run through crowd with massive flag",
            "giant flag, smoke machines",
            "Football",
            "2025-09-20T00:00:00Z",
        )];

        assert!(DuplicateGuard::new().check(&idea, &history, now()).is_none());
    }

    #[test]
    fn describe_names_the_record() {
        let hit = Collision {
            record_id: "AA-001".to_string(),
            record_title: "Mascot Flash Mob".to_string(),
            record_event_type: "Basketball".to_string(),
            years_ago: 2.3,
            similarity: 0.62,
        };
        let notes = hit.describe();
        assert!(notes.contains("AA-001"));
        assert!(notes.contains("Mascot Flash Mob"));
        assert!(notes.contains("Basketball"));
        assert!(notes.contains("2.3 years ago"));
    }

    #[test]
    fn years_between_rounds_to_one_decimal() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        assert!((years_between(earlier, now()) - 2.0).abs() < 1e-9);

        let earlier = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let years = years_between(earlier, now());
        assert!((years * 10.0).fract().abs() < 1e-9, "not rounded: {}", years);
    }
}
