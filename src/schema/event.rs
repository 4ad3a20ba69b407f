use serde::{Deserialize, Serialize};

/// The fixed set of event types the catalog is keyed by.
///
/// Unknown labels never error: `resolve` maps them to `Other`, whose
/// tables act as the fallback for every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Football,
    Basketball,
    Volleyball,
    Soccer,
    Baseball,
    #[serde(rename = "Pep_Rally")]
    PepRally,
    #[serde(rename = "Community_Event")]
    CommunityEvent,
    #[serde(rename = "Campus_Activation")]
    CampusActivation,
    Other,
}

impl EventType {
    /// Resolve a caller-supplied label. Unrecognized labels fall back to
    /// `Other` rather than erroring.
    pub fn resolve(label: &str) -> EventType {
        match label.trim() {
            "Football" => Self::Football,
            "Basketball" => Self::Basketball,
            "Volleyball" => Self::Volleyball,
            "Soccer" => Self::Soccer,
            "Baseball" => Self::Baseball,
            "Pep_Rally" => Self::PepRally,
            "Community_Event" => Self::CommunityEvent,
            "Campus_Activation" => Self::CampusActivation,
            _ => Self::Other,
        }
    }

    /// The canonical label for this event type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Football => "Football",
            Self::Basketball => "Basketball",
            Self::Volleyball => "Volleyball",
            Self::Soccer => "Soccer",
            Self::Baseball => "Baseball",
            Self::PepRally => "Pep_Rally",
            Self::CommunityEvent => "Community_Event",
            Self::CampusActivation => "Campus_Activation",
            Self::Other => "Other",
        }
    }

    /// Coarse grouping used by delivery-plan beats and risk rules.
    pub fn category(&self) -> EventCategory {
        match self {
            Self::Football | Self::Soccer | Self::Baseball => EventCategory::Field,
            Self::Basketball | Self::Volleyball => EventCategory::Court,
            Self::PepRally | Self::CampusActivation => EventCategory::Rally,
            Self::CommunityEvent => EventCategory::Community,
            Self::Other => EventCategory::Other,
        }
    }
}

/// Event grouping for rules that care about the kind of venue action,
/// not the specific sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Field,
    Court,
    Rally,
    Community,
    Other,
}

/// Where the activation happens. The two-value domain drives prop table
/// selection, weather clauses, and outdoor risk checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    Indoor,
    Outdoor,
}

impl Venue {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Indoor => "Indoor",
            Self::Outdoor => "Outdoor",
        }
    }

    /// Lowercase form used in idea tags.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
        }
    }
}

/// Output channel an idea is shaped for. Serialized labels match the
/// archive's media-type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "Live_Skit")]
    LiveSkit,
    TikTok,
    Reel,
    #[serde(rename = "Instagram_Post")]
    InstagramPost,
}

impl MediaType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LiveSkit => "Live_Skit",
            Self::TikTok => "TikTok",
            Self::Reel => "Reel",
            Self::InstagramPost => "Instagram_Post",
        }
    }
}
