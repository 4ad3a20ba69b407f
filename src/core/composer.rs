//! Builds one candidate idea from catalog draws.
//!
//! The draw order is fixed (setting, mechanic, prop count, prop
//! members, twist, chant, media type, theme phrase, trend source, id)
//! so that a reseeded sequence reproduces the same idea.

use rustc_hash::FxHashSet;

use crate::core::catalog::Catalog;
use crate::core::sequence::SeededSequence;
use crate::schema::event::{EventCategory, EventType, MediaType, Venue};
use crate::schema::idea::{DeliveryPlan, GeneratedIdea, IdeaStatus};

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const WEATHER_CLAUSE: &str = "weather protection layer";
const DEFAULT_RISK: &str = "Standard safety protocols";

pub struct IdeaComposer<'a> {
    catalog: &'a Catalog,
}

impl<'a> IdeaComposer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Compose one candidate idea. Never fails: unknown event labels
    /// resolve to the `Other` tables and exhausted lists degrade to
    /// empty fields.
    pub fn compose(
        &self,
        seq: &mut SeededSequence,
        event_label: &str,
        venue: Venue,
        theme: Option<&str>,
    ) -> GeneratedIdea {
        let event = EventType::resolve(event_label);
        let theme = theme.map(str::trim).filter(|t| !t.is_empty());
        let theme_entry = theme.and_then(|t| self.catalog.theme_for(t));

        let setting = seq
            .pick(self.catalog.settings_for(event))
            .map(String::as_str)
            .unwrap_or("venue floor")
            .to_string();
        let mechanic = seq
            .pick(self.catalog.mechanics_for(event))
            .map(String::as_str)
            .unwrap_or("perform")
            .to_string();
        let props = sample_props(seq, self.catalog.props_for(event, venue));
        let twist = seq
            .pick(&self.catalog.twists)
            .map(String::as_str)
            .unwrap_or("with a surprise ending")
            .to_string();
        let chant = seq
            .pick(self.catalog.chants_for(event))
            .map(String::as_str)
            .unwrap_or("Make some noise!")
            .to_string();
        let media_type = seq
            .pick(self.catalog.media_types_for(event))
            .copied()
            .unwrap_or(MediaType::LiveSkit);

        let theme_phrase = theme_entry
            .and_then(|t| seq.pick(&t.phrases))
            .map(String::to_string);
        let trend_source = match theme_entry {
            Some(t) if t.trend => seq
                .pick(&self.catalog.trend_sources)
                .map(String::to_string),
            _ => None,
        };

        let mut title = format!("{} {}", capitalize(&mechanic), capitalize(&twist));
        if let Some(phrase) = &theme_phrase {
            title.push_str(&format!(" ({})", phrase));
        }

        let summary = if props.is_empty() {
            format!(
                "The mascot performs a {} {} at the {} for a {} event",
                mechanic, twist, setting, event_label
            )
        } else {
            format!(
                "The mascot performs a {} {} at the {} using {} for a {} event",
                mechanic,
                twist,
                setting,
                props.join(", "),
                event_label
            )
        };

        let costume_notes = self.costume_notes(event, venue, theme_entry.and_then(|t| t.costume_clause.as_deref()));
        let risk_checks = risk_checks(venue, &props, event.category());
        let delivery_plan = self.delivery_plan(event, &setting, &twist, &props);

        let mut tags = FxHashSet::default();
        tags.insert(event_label.to_lowercase());
        tags.insert(venue.tag().to_string());
        if let Some(t) = theme {
            tags.insert(t.to_lowercase());
        }

        GeneratedIdea {
            id: generate_id(seq),
            idea_title: title,
            summary,
            media_type,
            event_type: event_label.to_string(),
            indoor_outdoor: venue,
            props_list: props,
            costume_notes,
            crowd_callouts: chant,
            risk_checks,
            delivery_plan,
            tags,
            years_since_last_use: 0.0,
            status: IdeaStatus::Fresh,
            originality_notes: None,
            alternative: None,
            trend_source,
        }
    }

    fn costume_notes(
        &self,
        event: EventType,
        venue: Venue,
        theme_clause: Option<&str>,
    ) -> String {
        let mut clauses = vec![self.catalog.base_costume.clone()];
        if venue == Venue::Outdoor {
            clauses.push(WEATHER_CLAUSE.to_string());
        }
        if let Some(clause) = self.catalog.costume_clause_for(event) {
            clauses.push(clause.to_string());
        }
        if let Some(clause) = theme_clause {
            clauses.push(clause.to_string());
        }
        clauses.join("; ")
    }

    fn delivery_plan(
        &self,
        event: EventType,
        setting: &str,
        twist: &str,
        props: &[String],
    ) -> DeliveryPlan {
        let mut beats = Vec::new();

        match props.first() {
            Some(first) => beats.push(format!(
                "Open at the {} with the {} front and center",
                setting, first
            )),
            None => beats.push(format!("Open at the {}", setting)),
        }

        for beat in build_up_beats(event.category()) {
            beats.push(beat.to_string());
        }

        beats.push(format!("Hit the climax: everything goes {}", twist));

        if let Some(second) = props.get(1) {
            beats.push(format!("Reveal the {} for the second wave", second));
        }

        beats.push("Lead the crowd callout and hold for the response".to_string());
        beats.push("Exit with a held pose toward the main camera".to_string());

        DeliveryPlan {
            timing: self.catalog.timing_for(event).to_string(),
            beats,
        }
    }
}

/// Sample 2-3 props without replacement, clamped to the pool size.
/// The size draw happens even for small pools so the sequence stays
/// aligned across venues.
pub(crate) fn sample_props(seq: &mut SeededSequence, pool: &[String]) -> Vec<String> {
    let want = (2 + seq.next(2)) as usize;
    let take = want.min(pool.len());

    let mut remaining: Vec<&String> = pool.iter().collect();
    let mut picked = Vec::with_capacity(take);
    for _ in 0..take {
        let idx = seq.next(remaining.len() as u32) as usize;
        picked.push(remaining.remove(idx).clone());
    }
    picked
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn build_up_beats(category: EventCategory) -> &'static [&'static str] {
    match category {
        EventCategory::Field => &[
            "Loop the perimeter to pull both sidelines in",
            "Stall at the student section for a false ending",
        ],
        EventCategory::Court => &[
            "Work the baseline with escalating gestures",
            "Pull the drumline into a tempo build",
        ],
        EventCategory::Rally => &["Call volunteers out of the front rows"],
        EventCategory::Community => &["Walk the front row for high fives and photos"],
        EventCategory::Other => &["Build energy with the music"],
    }
}

fn risk_checks(venue: Venue, props: &[String], category: EventCategory) -> Vec<String> {
    let mut checks = Vec::new();
    let joined = props.join(" ").to_lowercase();

    if venue == Venue::Outdoor {
        checks.push("Check weather conditions".to_string());
        checks.push("Secure props against wind".to_string());
    }
    if joined.contains("smoke") || joined.contains("fireworks") {
        checks.push("Fire safety clearance required".to_string());
        checks.push("Keep safe distance from crowd".to_string());
    }
    if joined.contains("cannon") || joined.contains("launcher") {
        checks.push("Trajectory test before doors open".to_string());
    }
    if joined.contains("confetti") {
        checks.push("Plan cleanup crew".to_string());
    }
    match category {
        EventCategory::Court => {
            checks.push("Stay clear of the playing surface".to_string());
        }
        EventCategory::Community => {
            checks.push("Child-safe interaction plan required".to_string());
        }
        _ => {}
    }

    if checks.is_empty() {
        checks.push(DEFAULT_RISK.to_string());
    }
    checks
}

fn generate_id(seq: &mut SeededSequence) -> String {
    let first = ALPHABET[seq.next(26) as usize] as char;
    let second = ALPHABET[seq.next(26) as usize] as char;
    let number = seq.next(999) + 1;
    format!("{}{}-{:03}", first, second, number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::idea::IdeaStatus;

    fn compose_one(event: &str, venue: Venue, theme: Option<&str>) -> GeneratedIdea {
        let catalog = Catalog::builtin();
        let composer = IdeaComposer::new(&catalog);
        let mut seq = SeededSequence::from_seed(20260804);
        composer.compose(&mut seq, event, venue, theme)
    }

    fn id_matches_pattern(id: &str) -> bool {
        let bytes = id.as_bytes();
        bytes.len() == 6
            && bytes[0].is_ascii_uppercase()
            && bytes[1].is_ascii_uppercase()
            && bytes[2] == b'-'
            && bytes[3..].iter().all(|b| b.is_ascii_digit())
            && &id[3..] != "000"
    }

    #[test]
    fn composed_idea_is_fresh_with_valid_id() {
        let idea = compose_one("Football", Venue::Outdoor, None);
        assert_eq!(idea.status, IdeaStatus::Fresh);
        assert_eq!(idea.years_since_last_use, 0.0);
        assert!(idea.originality_notes.is_none());
        assert!(idea.alternative.is_none());
        assert!(id_matches_pattern(&idea.id), "bad id: {}", idea.id);
    }

    #[test]
    fn ids_stay_valid_across_many_draws() {
        let mut seq = SeededSequence::from_seed(31337);
        for _ in 0..200 {
            let id = generate_id(&mut seq);
            assert!(id_matches_pattern(&id), "bad id: {}", id);
            let number: u32 = id[3..].parse().unwrap();
            assert!((1..=999).contains(&number));
        }
    }

    #[test]
    fn props_are_unique_and_from_the_pool() {
        let catalog = Catalog::builtin();
        let pool = catalog.props_for(EventType::Football, Venue::Outdoor);
        let mut seq = SeededSequence::from_seed(42);
        for _ in 0..50 {
            let props = sample_props(&mut seq, pool);
            assert!(props.len() >= 2 && props.len() <= 3);
            for prop in &props {
                assert!(pool.contains(prop));
            }
            let unique: FxHashSet<&String> = props.iter().collect();
            assert_eq!(unique.len(), props.len(), "duplicate prop in {:?}", props);
        }
    }

    #[test]
    fn sampling_never_exceeds_a_small_pool() {
        let pool = vec!["signs".to_string(), "banners".to_string()];
        let mut seq = SeededSequence::from_seed(7);
        for _ in 0..20 {
            let props = sample_props(&mut seq, &pool);
            assert_eq!(props.len(), 2);
        }
    }

    #[test]
    fn sampling_from_empty_pool_is_empty() {
        let mut seq = SeededSequence::from_seed(7);
        assert!(sample_props(&mut seq, &[]).is_empty());
    }

    #[test]
    fn outdoor_venue_adds_weather_clauses() {
        let idea = compose_one("Football", Venue::Outdoor, None);
        assert!(idea.costume_notes.contains(WEATHER_CLAUSE));
        assert!(idea
            .risk_checks
            .contains(&"Check weather conditions".to_string()));
        assert!(idea
            .risk_checks
            .contains(&"Secure props against wind".to_string()));
    }

    #[test]
    fn indoor_venue_has_no_weather_clauses() {
        let idea = compose_one("Basketball", Venue::Indoor, None);
        assert!(!idea.costume_notes.contains(WEATHER_CLAUSE));
        assert!(!idea
            .risk_checks
            .contains(&"Check weather conditions".to_string()));
    }

    #[test]
    fn court_events_stay_clear_of_the_playing_surface() {
        let idea = compose_one("Volleyball", Venue::Indoor, None);
        assert!(idea
            .risk_checks
            .contains(&"Stay clear of the playing surface".to_string()));
    }

    #[test]
    fn community_events_require_child_safety() {
        let idea = compose_one("Community_Event", Venue::Indoor, None);
        assert!(idea
            .risk_checks
            .contains(&"Child-safe interaction plan required".to_string()));
    }

    #[test]
    fn prop_keywords_trigger_their_checks() {
        let props = vec!["smoke machines".to_string(), "confetti cannons".to_string()];
        let checks = risk_checks(Venue::Indoor, &props, EventCategory::Other);
        assert!(checks.contains(&"Fire safety clearance required".to_string()));
        assert!(checks.contains(&"Trajectory test before doors open".to_string()));
        assert!(checks.contains(&"Plan cleanup crew".to_string()));
    }

    #[test]
    fn quiet_setup_gets_the_default_check() {
        let props = vec!["signs".to_string()];
        let checks = risk_checks(Venue::Indoor, &props, EventCategory::Other);
        assert_eq!(checks, [DEFAULT_RISK]);
    }

    #[test]
    fn theme_decorates_title_and_tags() {
        let idea = compose_one("Pep_Rally", Venue::Indoor, Some("Retro"));
        assert!(idea.idea_title.contains('('), "title: {}", idea.idea_title);
        assert!(idea.tags.contains("retro"));
        assert!(idea.trend_source.is_none());
        assert!(idea.costume_notes.contains("vintage letterman jacket"));
    }

    #[test]
    fn trend_theme_attaches_a_trend_source() {
        let idea = compose_one("Basketball", Venue::Indoor, Some("Meme"));
        assert!(idea.trend_source.is_some());
    }

    #[test]
    fn unknown_theme_is_skipped() {
        let idea = compose_one("Football", Venue::Indoor, Some("Vaporwave"));
        assert!(!idea.idea_title.contains('('));
        assert!(idea.trend_source.is_none());
        // The unknown theme still lands in the tags.
        assert!(idea.tags.contains("vaporwave"));
    }

    #[test]
    fn unknown_event_composes_from_other_tables() {
        let catalog = Catalog::builtin();
        let idea = compose_one("Quidditch", Venue::Indoor, None);
        assert_eq!(idea.event_type, "Quidditch");
        assert!(idea.tags.contains("quidditch"));
        let other_props = catalog.props_for(EventType::Other, Venue::Indoor);
        for prop in &idea.props_list {
            assert!(other_props.contains(prop));
        }
    }

    #[test]
    fn summary_names_the_event_label() {
        let idea = compose_one("Soccer", Venue::Outdoor, None);
        assert!(idea.summary.contains("Soccer"));
        assert!(idea.summary.contains("The mascot performs"));
    }

    #[test]
    fn delivery_plan_has_opening_climax_and_closing() {
        let idea = compose_one("Football", Venue::Outdoor, None);
        let beats = &idea.delivery_plan.beats;
        assert!(beats.len() >= 5);
        assert!(beats[0].starts_with("Open at the"));
        assert!(beats.iter().any(|b| b.starts_with("Hit the climax")));
        assert!(beats.last().unwrap().starts_with("Exit"));
        assert!(!idea.delivery_plan.timing.is_empty());
    }

    #[test]
    fn delivery_plan_reveals_second_prop_when_present() {
        let idea = compose_one("Football", Venue::Outdoor, None);
        if idea.props_list.len() >= 2 {
            assert!(idea
                .delivery_plan
                .beats
                .iter()
                .any(|b| b.starts_with("Reveal the")));
        }
    }

    #[test]
    fn same_seed_composes_the_same_idea() {
        let a = compose_one("Football", Venue::Outdoor, Some("Retro"));
        let b = compose_one("Football", Venue::Outdoor, Some("Retro"));
        assert_eq!(a, b);
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("touchdown dance"), "Touchdown dance");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }
}
