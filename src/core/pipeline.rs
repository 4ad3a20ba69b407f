//! The generation pipeline: request in, three guarded ideas out.
//!
//! Wires together the catalog, the seeded sequence, the composer, the
//! recurrence guard, and the alternative composer.

use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::core::alternative::AlternativeComposer;
use crate::core::catalog::{Catalog, CatalogError};
use crate::core::composer::IdeaComposer;
use crate::core::guard::DuplicateGuard;
use crate::core::sequence::{day_key, SeededSequence};
use crate::schema::event::Venue;
use crate::schema::history::HistoricalIdeaRecord;
use crate::schema::idea::{GeneratedIdea, IdeaStatus};

/// Every generation call returns exactly this many ideas.
pub const IDEAS_PER_CALL: usize = 3;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// The idea engine. Built via `IdeaEngine::builder()`.
///
/// Owns its sequence, so concurrent generation requires independent
/// engine instances. The history snapshot is read-only for the life of
/// the engine; promoting a used idea into history is the persistence
/// collaborator's job.
pub struct IdeaEngine {
    catalog: Catalog,
    history: Vec<HistoricalIdeaRecord>,
    guard: DuplicateGuard,
    sequence: SeededSequence,
    reference_date: Option<DateTime<Utc>>,
}

/// Builder for constructing an `IdeaEngine`.
pub struct IdeaEngineBuilder {
    catalog: Option<Catalog>,
    catalog_path: Option<String>,
    history: Vec<HistoricalIdeaRecord>,
    history_path: Option<String>,
    reference_date: Option<DateTime<Utc>>,
}

impl IdeaEngine {
    pub fn builder() -> IdeaEngineBuilder {
        IdeaEngineBuilder {
            catalog: None,
            catalog_path: None,
            history: Vec::new(),
            history_path: None,
            reference_date: None,
        }
    }

    /// Generate exactly three candidate ideas for an event, venue, and
    /// optional theme.
    ///
    /// The sequence is reseeded from the current date on every call, so
    /// output varies day to day but repeats within a day. Unknown event
    /// labels fall back to the `Other` catalog entries; this method
    /// never fails.
    pub fn generate(
        &mut self,
        event_label: &str,
        venue: Venue,
        theme: Option<&str>,
    ) -> Vec<GeneratedIdea> {
        let now = self.reference_date.unwrap_or_else(Utc::now);
        self.sequence.reseed(day_key(&now));

        let composer = IdeaComposer::new(&self.catalog);
        let alternatives = AlternativeComposer::new(&self.catalog);

        let mut ideas = Vec::with_capacity(IDEAS_PER_CALL);
        for _ in 0..IDEAS_PER_CALL {
            let mut idea = composer.compose(&mut self.sequence, event_label, venue, theme);

            if let Some(hit) = self.guard.check(&idea, &self.history, now) {
                debug!(id = %idea.id, similar_to = %hit.record_id,
                    similarity = hit.similarity, "idea blocked by recurrence rule");
                let replacement = alternatives.compose(&mut self.sequence, &idea, venue);
                idea.status = IdeaStatus::Blocked;
                idea.originality_notes = Some(hit.describe());
                idea.alternative = Some(replacement);
            }

            ideas.push(idea);
        }

        ideas
    }

    /// The history snapshot this engine scans against.
    pub fn history(&self) -> &[HistoricalIdeaRecord] {
        &self.history
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl IdeaEngineBuilder {
    /// Replace the builtin catalog entirely.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Load a RON catalog file and merge it over the builtin tables.
    pub fn catalog_path(mut self, path: &str) -> Self {
        self.catalog_path = Some(path.to_string());
        self
    }

    /// Provide history records directly.
    pub fn with_history(mut self, history: Vec<HistoricalIdeaRecord>) -> Self {
        self.history = history;
        self
    }

    /// Load history records from a RON file (a list of records),
    /// appended after any directly provided records.
    pub fn history_path(mut self, path: &str) -> Self {
        self.history_path = Some(path.to_string());
        self
    }

    /// Fix the clock (for testing without wall time). Generation reseeds
    /// from this date instead of `Utc::now()`.
    pub fn reference_date(mut self, date: DateTime<Utc>) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn build(self) -> Result<IdeaEngine, EngineError> {
        let mut catalog = self.catalog.unwrap_or_default();
        if let Some(ref path) = self.catalog_path {
            let overrides = Catalog::load_from_ron(Path::new(path))?;
            catalog.merge(overrides);
        }

        let mut history = self.history;
        if let Some(ref path) = self.history_path {
            let contents = std::fs::read_to_string(path)?;
            let records: Vec<HistoricalIdeaRecord> = ron::from_str(&contents)?;
            history.extend(records);
        }

        Ok(IdeaEngine {
            catalog,
            history,
            guard: DuplicateGuard::new(),
            sequence: SeededSequence::new(),
            reference_date: self.reference_date,
        })
    }
}
