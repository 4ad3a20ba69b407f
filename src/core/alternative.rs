//! Synthesizes a replacement suggestion for a blocked idea.
//!
//! The replacement swaps the core mechanic for one the blocked title
//! does not already use, re-draws the setting, and samples props
//! disjoint from the blocked idea's list. It is a reduced-shape
//! suggestion for human review and is not re-run through the
//! recurrence guard.

use crate::core::catalog::Catalog;
use crate::core::composer::{capitalize, sample_props};
use crate::core::sequence::SeededSequence;
use crate::schema::event::{EventType, Venue};
use crate::schema::idea::{AlternativeIdea, GeneratedIdea};

/// Verb used when every catalog mechanic already appears in the
/// blocked title.
const FALLBACK_MECHANIC: &str = "perform";

pub struct AlternativeComposer<'a> {
    catalog: &'a Catalog,
}

impl<'a> AlternativeComposer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn compose(
        &self,
        seq: &mut SeededSequence,
        blocked: &GeneratedIdea,
        venue: Venue,
    ) -> AlternativeIdea {
        let event = EventType::resolve(&blocked.event_type);
        let blocked_title = blocked.idea_title.to_lowercase();

        let mechanic = self
            .catalog
            .mechanics_for(event)
            .iter()
            .find(|m| !blocked_title.contains(&m.to_lowercase()))
            .map(String::as_str)
            .unwrap_or(FALLBACK_MECHANIC);

        let setting = seq
            .pick(self.catalog.settings_for(event))
            .map(String::as_str)
            .unwrap_or("venue floor");

        let blocked_props = blocked.props_list.join(", ").to_lowercase();
        let pool: Vec<String> = self
            .catalog
            .props_for(event, venue)
            .iter()
            .filter(|p| !blocked_props.contains(&p.to_lowercase()))
            .cloned()
            .collect();
        let props = sample_props(seq, &pool);

        let idea_title = if props.is_empty() {
            format!("{} Performance", capitalize(mechanic))
        } else {
            format!("{} Performance with {}", capitalize(mechanic), props.join(", "))
        };

        AlternativeIdea {
            idea_title,
            summary: format!(
                "Alternative angle: {} at the {} instead of the blocked routine",
                mechanic, setting
            ),
            props_list: props,
            event_type: blocked.event_type.clone(),
        }
    }
}
