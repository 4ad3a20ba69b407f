//! Template catalog: event-keyed tables plus the cross-cutting twist,
//! theme, and trend tables, with the ordered fallback chain that
//! guarantees every lookup produces something usable.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::schema::event::{EventType, MediaType, Venue};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Media types used when an event entry names none.
const DEFAULT_MEDIA: &[MediaType] = &[MediaType::LiveSkit];
/// Timing phrase used when an event entry names none.
const DEFAULT_TIMING: &str = "Enter, perform, engage, exit with energy";

/// Template tables for one event type.
#[derive(Debug, Clone, Default)]
pub struct EventTemplates {
    pub settings: Vec<String>,
    pub mechanics: Vec<String>,
    pub props_indoor: Vec<String>,
    pub props_outdoor: Vec<String>,
    pub chants: Vec<String>,
    pub timing: String,
    pub costume_clause: Option<String>,
    pub media_types: Vec<MediaType>,
}

/// Phrases and costume guidance for a named theme. A `trend` theme
/// additionally attaches a trend source to generated ideas.
#[derive(Debug, Clone, Default)]
pub struct ThemeTemplates {
    pub phrases: Vec<String>,
    pub costume_clause: Option<String>,
    pub trend: bool,
}

/// The full template catalog. Immutable once built; construct it at
/// process start and share it by reference.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub events: HashMap<EventType, EventTemplates>,
    pub twists: Vec<String>,
    pub themes: HashMap<String, ThemeTemplates>,
    pub trend_sources: Vec<String>,
    pub base_costume: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Settings for an event, falling back to `Other`.
    pub fn settings_for(&self, ty: EventType) -> &[String] {
        self.resolve_list(ty, |e| &e.settings)
    }

    /// Mechanics for an event, falling back to `Other`.
    pub fn mechanics_for(&self, ty: EventType) -> &[String] {
        self.resolve_list(ty, |e| &e.mechanics)
    }

    /// Crowd chants for an event, falling back to `Other`.
    pub fn chants_for(&self, ty: EventType) -> &[String] {
        self.resolve_list(ty, |e| &e.chants)
    }

    /// Prop list for an event and venue. The chain is
    /// event[venue], then Other[venue], then Other indoor, then empty;
    /// with the builtin tables it never reaches empty.
    pub fn props_for(&self, ty: EventType, venue: Venue) -> &[String] {
        if let Some(entry) = self.events.get(&ty) {
            let list = venue_props(entry, venue);
            if !list.is_empty() {
                return list;
            }
        }
        if let Some(other) = self.events.get(&EventType::Other) {
            let list = venue_props(other, venue);
            if !list.is_empty() {
                return list;
            }
            if !other.props_indoor.is_empty() {
                return &other.props_indoor;
            }
        }
        &[]
    }

    /// Timing phrase for an event's delivery plan.
    pub fn timing_for(&self, ty: EventType) -> &str {
        if let Some(entry) = self.events.get(&ty) {
            if !entry.timing.is_empty() {
                return &entry.timing;
            }
        }
        if let Some(other) = self.events.get(&EventType::Other) {
            if !other.timing.is_empty() {
                return &other.timing;
            }
        }
        DEFAULT_TIMING
    }

    /// Event-specific costume clause, if any.
    pub fn costume_clause_for(&self, ty: EventType) -> Option<&str> {
        self.events
            .get(&ty)
            .and_then(|e| e.costume_clause.as_deref())
            .or_else(|| {
                self.events
                    .get(&EventType::Other)
                    .and_then(|e| e.costume_clause.as_deref())
            })
    }

    /// Preferred media types for an event.
    pub fn media_types_for(&self, ty: EventType) -> &[MediaType] {
        if let Some(entry) = self.events.get(&ty) {
            if !entry.media_types.is_empty() {
                return &entry.media_types;
            }
        }
        if let Some(other) = self.events.get(&EventType::Other) {
            if !other.media_types.is_empty() {
                return &other.media_types;
            }
        }
        DEFAULT_MEDIA
    }

    /// Look up a named theme. Unknown names resolve to `None` and the
    /// composer simply skips theme decoration.
    pub fn theme_for(&self, name: &str) -> Option<&ThemeTemplates> {
        self.themes.get(name.trim())
    }

    fn resolve_list(
        &self,
        ty: EventType,
        pick: impl Fn(&EventTemplates) -> &Vec<String>,
    ) -> &[String] {
        if let Some(entry) = self.events.get(&ty) {
            let list = pick(entry);
            if !list.is_empty() {
                return list;
            }
        }
        if let Some(other) = self.events.get(&EventType::Other) {
            let list = pick(other);
            if !list.is_empty() {
                return list;
            }
        }
        &[]
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Catalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON string. Event keys that are not in
    /// the known set fold into `Other`.
    pub fn parse_ron(input: &str) -> Result<Catalog, CatalogError> {
        let raw: RonCatalog = ron::from_str(input)?;

        let mut events = HashMap::new();
        for (name, entry) in raw.events {
            let ty = EventType::resolve(&name);
            if ty == EventType::Other && name.trim() != "Other" {
                debug!(key = %name, "unknown event key in catalog file, folding into Other");
            }
            events.insert(
                ty,
                EventTemplates {
                    settings: entry.settings,
                    mechanics: entry.mechanics,
                    props_indoor: entry.props_indoor,
                    props_outdoor: entry.props_outdoor,
                    chants: entry.chants,
                    timing: entry.timing,
                    costume_clause: entry.costume_clause,
                    media_types: entry.media_types,
                },
            );
        }

        let themes = raw
            .themes
            .into_iter()
            .map(|(name, theme)| {
                (
                    name,
                    ThemeTemplates {
                        phrases: theme.phrases,
                        costume_clause: theme.costume_clause,
                        trend: theme.trend,
                    },
                )
            })
            .collect();

        Ok(Catalog {
            events,
            twists: raw.twists,
            themes,
            trend_sources: raw.trend_sources,
            base_costume: raw.base_costume,
        })
    }

    /// Merge another catalog into this one. Event entries and themes
    /// from `other` replace same-keyed entries wholesale; non-empty
    /// cross-cutting tables replace their counterparts.
    pub fn merge(&mut self, other: Catalog) {
        for (ty, entry) in other.events {
            self.events.insert(ty, entry);
        }
        for (name, theme) in other.themes {
            self.themes.insert(name, theme);
        }
        if !other.twists.is_empty() {
            self.twists = other.twists;
        }
        if !other.trend_sources.is_empty() {
            self.trend_sources = other.trend_sources;
        }
        if !other.base_costume.is_empty() {
            self.base_costume = other.base_costume;
        }
    }

    /// The compiled-in catalog. Every event type has an entry, so the
    /// fallback chain always terminates at a non-empty table.
    pub fn builtin() -> Catalog {
        let mut events = HashMap::new();

        events.insert(
            EventType::Football,
            EventTemplates {
                settings: strs(&[
                    "50-yard line",
                    "end zone",
                    "home sideline",
                    "entrance tunnel",
                    "student section",
                ]),
                mechanics: strs(&[
                    "touchdown dance",
                    "flag sprint",
                    "field goal challenge",
                    "tailgate tour",
                    "chain gang shuffle",
                ]),
                props_indoor: strs(&["signs", "foam fingers", "pom poms", "banners"]),
                props_outdoor: strs(&[
                    "giant flag",
                    "t-shirt cannon",
                    "smoke machines",
                    "giant inflatable helmet",
                    "confetti cannons",
                ]),
                chants: strs(&[
                    "First down, touchdown!",
                    "Defense! Defense!",
                    "Bring out the boom!",
                ]),
                timing: "Pregame through halftime, with the big moment at the third-quarter break"
                    .to_string(),
                costume_clause: Some("home jersey worn over the suit".to_string()),
                media_types: vec![MediaType::LiveSkit, MediaType::TikTok, MediaType::Reel],
            },
        );

        events.insert(
            EventType::Basketball,
            EventTemplates {
                settings: strs(&[
                    "center court",
                    "baseline",
                    "scorer's table",
                    "upper concourse stairs",
                    "tunnel",
                ]),
                mechanics: strs(&[
                    "halftime dance-off",
                    "trampoline dunk",
                    "free-throw challenge",
                    "t-shirt toss",
                    "dribble gag",
                ]),
                props_indoor: strs(&[
                    "t-shirt cannon",
                    "giant foam head",
                    "signs",
                    "pom poms",
                    "confetti poppers",
                ]),
                props_outdoor: strs(&["banners", "giant inflatable hoop", "flags"]),
                chants: strs(&["De-fense! De-fense!", "Three! Three! Three!", "Make some noise!"]),
                timing: "Media timeouts and halftime, 90-second windows".to_string(),
                costume_clause: Some("sleeveless warmup jersey".to_string()),
                media_types: vec![
                    MediaType::LiveSkit,
                    MediaType::TikTok,
                    MediaType::InstagramPost,
                ],
            },
        );

        events.insert(
            EventType::Volleyball,
            EventTemplates {
                settings: strs(&[
                    "net post",
                    "service line",
                    "front row bleachers",
                    "scorer's corner",
                ]),
                mechanics: strs(&[
                    "serve gag",
                    "net dance",
                    "rally towel wave",
                    "libero shuffle",
                ]),
                props_indoor: strs(&["rally towels", "signs", "pom poms", "thundersticks"]),
                props_outdoor: strs(&["flags", "banners"]),
                chants: strs(&["Side out! Side out!", "Ace! Ace! Ace!"]),
                timing: "Between sets, two-minute windows".to_string(),
                costume_clause: None,
                media_types: vec![MediaType::LiveSkit, MediaType::Reel],
            },
        );

        events.insert(
            EventType::Soccer,
            EventTemplates {
                settings: strs(&[
                    "midfield circle",
                    "supporters' section",
                    "goal mouth",
                    "touchline",
                ]),
                mechanics: strs(&[
                    "goal celebration sprint",
                    "scarf wave",
                    "juggling bit",
                    "corner flag dance",
                ]),
                props_indoor: strs(&["signs", "scarves", "pom poms"]),
                props_outdoor: strs(&["giant flag", "smoke machines", "scarves", "drum"]),
                chants: strs(&["Ole, ole, ole!", "Here we go!"]),
                timing: "Pre-kickoff and halftime".to_string(),
                costume_clause: Some("team scarf".to_string()),
                media_types: vec![MediaType::LiveSkit, MediaType::TikTok, MediaType::Reel],
            },
        );

        events.insert(
            EventType::Baseball,
            EventTemplates {
                settings: strs(&["home plate", "dugout roof", "outfield berm", "concourse"]),
                mechanics: strs(&[
                    "seventh-inning stretch lead",
                    "race around the bases",
                    "hot dog toss",
                    "umpire impression",
                ]),
                props_indoor: strs(&["signs", "foam fingers"]),
                props_outdoor: strs(&[
                    "t-shirt launcher",
                    "giant foam bat",
                    "hot dog costume",
                    "confetti cannons",
                ]),
                chants: strs(&["Charge!", "Take me out to the ball game!"]),
                timing: "Between innings, with the anchor bit at the seventh-inning stretch"
                    .to_string(),
                costume_clause: Some("batting helmet".to_string()),
                media_types: vec![MediaType::LiveSkit, MediaType::InstagramPost],
            },
        );

        events.insert(
            EventType::PepRally,
            EventTemplates {
                settings: strs(&["gym stage", "center floor", "bleacher aisles", "spirit line"]),
                mechanics: strs(&[
                    "hype entrance",
                    "spirit battle",
                    "teacher cameo bit",
                    "class-versus-class countdown",
                ]),
                props_indoor: strs(&[
                    "megaphone",
                    "spirit flags",
                    "confetti poppers",
                    "glow sticks",
                    "banners",
                ]),
                props_outdoor: strs(&["smoke machines", "giant flag", "confetti cannons"]),
                chants: strs(&["We've got spirit, yes we do!", "Louder! Louder!"]),
                timing: "Single 15-minute block, energy front-loaded".to_string(),
                costume_clause: Some("spirit cape".to_string()),
                media_types: vec![MediaType::LiveSkit, MediaType::TikTok],
            },
        );

        events.insert(
            EventType::CommunityEvent,
            EventTemplates {
                settings: strs(&["main stage", "vendor row", "kids' zone", "welcome arch"]),
                mechanics: strs(&[
                    "meet-and-greet loop",
                    "photo booth bit",
                    "dance lesson",
                    "high-five tunnel",
                ]),
                props_indoor: strs(&["photo frames", "stickers", "signs", "bubble machine"]),
                props_outdoor: strs(&[
                    "balloon arch",
                    "bubble machine",
                    "giant inflatables",
                    "parade banner",
                ]),
                chants: strs(&["Say cheese!", "Who wants a high five?"]),
                timing: "Rolling 20-minute appearances across the afternoon".to_string(),
                costume_clause: Some("softer gloves for close interaction".to_string()),
                media_types: vec![MediaType::InstagramPost, MediaType::Reel],
            },
        );

        events.insert(
            EventType::CampusActivation,
            EventTemplates {
                settings: strs(&[
                    "quad",
                    "library steps",
                    "dining hall entrance",
                    "campus bus stop",
                ]),
                mechanics: strs(&[
                    "pop-up study break",
                    "flash dance",
                    "free swag drop",
                    "club fair takeover",
                ]),
                props_indoor: strs(&["signs", "stickers", "pop-up banner"]),
                props_outdoor: strs(&[
                    "giant inflatables",
                    "pop-up tent",
                    "t-shirt cannon",
                    "sidewalk chalk",
                ]),
                chants: strs(&["Class is out!", "Swag drop!"]),
                timing: "Class-change windows, ten minutes each".to_string(),
                costume_clause: None,
                media_types: vec![MediaType::TikTok, MediaType::Reel, MediaType::InstagramPost],
            },
        );

        events.insert(
            EventType::Other,
            EventTemplates {
                settings: strs(&[
                    "stadium",
                    "courtside",
                    "field center",
                    "crowd",
                    "entrance tunnel",
                ]),
                mechanics: strs(&["dance", "run", "jump", "wave", "chant", "throw", "catch"]),
                props_indoor: strs(&[
                    "signs",
                    "foam fingers",
                    "pom poms",
                    "banners",
                    "confetti poppers",
                ]),
                props_outdoor: strs(&[
                    "flags",
                    "smoke bombs",
                    "fireworks",
                    "giant inflatables",
                    "parachutes",
                ]),
                chants: strs(&[
                    "Stand up and roar!",
                    "Wave your hands!",
                    "Make some noise!",
                    "Show your spirit!",
                ]),
                timing: DEFAULT_TIMING.to_string(),
                costume_clause: None,
                media_types: vec![
                    MediaType::LiveSkit,
                    MediaType::TikTok,
                    MediaType::Reel,
                    MediaType::InstagramPost,
                ],
            },
        );

        let mut themes = HashMap::new();
        themes.insert(
            "Retro".to_string(),
            ThemeTemplates {
                phrases: strs(&["Retro Rewind", "Throwback Night", "8-Bit Edition"]),
                costume_clause: Some("vintage letterman jacket".to_string()),
                trend: false,
            },
        );
        themes.insert(
            "Holiday".to_string(),
            ThemeTemplates {
                phrases: strs(&["Holiday Spectacular", "Winter Wonderland"]),
                costume_clause: Some("festive scarf and hat".to_string()),
                trend: false,
            },
        );
        themes.insert(
            "Neon".to_string(),
            ThemeTemplates {
                phrases: strs(&["Neon Glow", "Blacklight Edition"]),
                costume_clause: Some("glow-in-the-dark accents".to_string()),
                trend: false,
            },
        );
        themes.insert(
            "Superhero".to_string(),
            ThemeTemplates {
                phrases: strs(&["Hero Cape Edition", "Secret Identity"]),
                costume_clause: Some("cape and mask over the suit".to_string()),
                trend: false,
            },
        );
        themes.insert(
            "Meme".to_string(),
            ThemeTemplates {
                phrases: strs(&["Meme Remix", "Trend Takeover"]),
                costume_clause: Some("oversized novelty sunglasses".to_string()),
                trend: true,
            },
        );

        Catalog {
            events,
            twists: strs(&[
                "backward",
                "in slow motion",
                "synchronized",
                "with the opposing mascot",
                "crowd participation",
                "blindfolded",
                "in a freeze-frame tableau",
                "relay style",
            ]),
            themes,
            trend_sources: strs(&[
                "Trending short-form dance audio",
                "Viral stadium-cam moment",
                "Current hashtag challenge",
                "Popular reaction-clip format",
            ]),
            base_costume: "Standard mascot costume".to_string(),
        }
    }
}

fn venue_props(entry: &EventTemplates, venue: Venue) -> &[String] {
    match venue {
        Venue::Indoor => &entry.props_indoor,
        Venue::Outdoor => &entry.props_outdoor,
    }
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// RON deserialization helpers. The file format is keyed by event-name
// strings, so intermediate structs convert into the typed tables.

#[derive(Debug, Deserialize)]
struct RonCatalog {
    #[serde(default)]
    events: HashMap<String, RonEventEntry>,
    #[serde(default)]
    twists: Vec<String>,
    #[serde(default)]
    themes: HashMap<String, RonTheme>,
    #[serde(default)]
    trend_sources: Vec<String>,
    #[serde(default)]
    base_costume: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Event")]
struct RonEventEntry {
    #[serde(default)]
    settings: Vec<String>,
    #[serde(default)]
    mechanics: Vec<String>,
    #[serde(default)]
    props_indoor: Vec<String>,
    #[serde(default)]
    props_outdoor: Vec<String>,
    #[serde(default)]
    chants: Vec<String>,
    #[serde(default)]
    timing: String,
    #[serde(default)]
    costume_clause: Option<String>,
    #[serde(default)]
    media_types: Vec<MediaType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Theme")]
struct RonTheme {
    #[serde(default)]
    phrases: Vec<String>,
    #[serde(default)]
    costume_clause: Option<String>,
    #[serde(default)]
    trend: bool,
}
