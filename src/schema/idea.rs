use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::event::{MediaType, Venue};

/// Whether an idea cleared the recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdeaStatus {
    Fresh,
    Blocked,
}

/// Timing guidance plus the ordered beat sheet for running the bit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPlan {
    pub timing: String,
    pub beats: Vec<String>,
}

/// The reduced-shape replacement suggested for a blocked idea.
///
/// Alternatives are meant for human review and are not re-checked
/// against the recurrence rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeIdea {
    pub idea_title: String,
    pub summary: String,
    pub props_list: Vec<String>,
    pub event_type: String,
}

/// One generated activation idea. Created fresh on each generation call
/// and immutable once returned; promotion into history happens outside
/// this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedIdea {
    /// Two uppercase letters, a hyphen, and a zero-padded number in 1..=999.
    pub id: String,
    pub idea_title: String,
    pub summary: String,
    pub media_type: MediaType,
    /// The caller's event label, echoed as given.
    pub event_type: String,
    pub indoor_outdoor: Venue,
    pub props_list: Vec<String>,
    pub costume_notes: String,
    pub crowd_callouts: String,
    pub risk_checks: Vec<String>,
    pub delivery_plan: DeliveryPlan,
    /// Lowercase labels: event, venue, and theme when present.
    pub tags: FxHashSet<String>,
    /// Age of this idea itself, always 0 at creation.
    pub years_since_last_use: f64,
    pub status: IdeaStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originality_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative: Option<AlternativeIdea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_source: Option<String>,
}

impl GeneratedIdea {
    pub fn is_blocked(&self) -> bool {
        self.status == IdeaStatus::Blocked
    }
}
