/// Preview: one-shot generation run for exercising catalogs and history.
///
/// Usage: preview --event <type> --venue <Indoor|Outdoor> [--theme <name>]
///                [--catalog <path>] [--history <path>] [--date <YYYY-MM-DD>]
///
/// Prints the three generated ideas, including originality notes and
/// the suggested alternative for anything the recurrence rule blocks.

use activation_engine::core::pipeline::IdeaEngine;
use activation_engine::schema::event::Venue;
use activation_engine::schema::idea::GeneratedIdea;
use chrono::{NaiveDate, TimeZone, Utc};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut event = None;
    let mut venue = Venue::Indoor;
    let mut theme = None;
    let mut catalog_path = None;
    let mut history_path = None;
    let mut date = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--event" if i + 1 < args.len() => {
                i += 1;
                event = Some(args[i].clone());
            }
            "--venue" if i + 1 < args.len() => {
                i += 1;
                venue = match parse_venue(&args[i]) {
                    Some(v) => v,
                    None => {
                        eprintln!("Unknown venue '{}', expected Indoor or Outdoor", args[i]);
                        std::process::exit(1);
                    }
                };
            }
            "--theme" if i + 1 < args.len() => {
                i += 1;
                theme = Some(args[i].clone());
            }
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalog_path = Some(args[i].clone());
            }
            "--history" if i + 1 < args.len() => {
                i += 1;
                history_path = Some(args[i].clone());
            }
            "--date" if i + 1 < args.len() => {
                i += 1;
                date = match NaiveDate::parse_from_str(&args[i], "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(_) => {
                        eprintln!("Invalid date '{}', expected YYYY-MM-DD", args[i]);
                        std::process::exit(1);
                    }
                };
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let event = match event {
        Some(e) => e,
        None => {
            eprintln!("--event is required");
            print_usage();
            std::process::exit(1);
        }
    };

    let mut builder = IdeaEngine::builder();
    if let Some(ref path) = catalog_path {
        builder = builder.catalog_path(path);
    }
    if let Some(ref path) = history_path {
        builder = builder.history_path(path);
    }
    if let Some(d) = date {
        if let Some(ndt) = d.and_hms_opt(12, 0, 0) {
            builder = builder.reference_date(Utc.from_utc_datetime(&ndt));
        }
    }

    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR building engine: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Generating for event={} venue={} theme={}",
        event,
        venue.label(),
        theme.as_deref().unwrap_or("(none)")
    );
    println!("History records: {}\n", engine.history().len());

    let ideas = engine.generate(&event, venue, theme.as_deref());
    for (i, idea) in ideas.iter().enumerate() {
        print_idea(i + 1, idea);
    }
}

fn print_idea(index: usize, idea: &GeneratedIdea) {
    println!("--- Idea {} [{:?}] {} ---", index, idea.status, idea.id);
    println!("  Title:   {}", idea.idea_title);
    println!("  Summary: {}", idea.summary);
    println!("  Media:   {}", idea.media_type.label());
    println!("  Props:   {}", idea.props_list.join(", "));
    println!("  Costume: {}", idea.costume_notes);
    println!("  Crowd:   {}", idea.crowd_callouts);
    println!("  Risks:   {}", idea.risk_checks.join("; "));
    println!("  Timing:  {}", idea.delivery_plan.timing);
    for (n, beat) in idea.delivery_plan.beats.iter().enumerate() {
        println!("    {}. {}", n + 1, beat);
    }
    if let Some(ref source) = idea.trend_source {
        println!("  Trend:   {}", source);
    }
    if let Some(ref notes) = idea.originality_notes {
        println!("  BLOCKED: {}", notes);
    }
    if let Some(ref alt) = idea.alternative {
        println!("  Try instead: {}", alt.idea_title);
        println!("    {}", alt.summary);
    }
    println!();
}

fn parse_venue(s: &str) -> Option<Venue> {
    match s.to_lowercase().as_str() {
        "indoor" => Some(Venue::Indoor),
        "outdoor" => Some(Venue::Outdoor),
        _ => None,
    }
}

fn print_usage() {
    println!("Preview: one-shot generation run for exercising catalogs and history.");
    println!();
    println!("Usage: preview --event <type> --venue <Indoor|Outdoor> [--theme <name>]");
    println!("               [--catalog <path>] [--history <path>] [--date <YYYY-MM-DD>]");
    println!();
    println!("  --event <type>     Event type (unknown types use the Other tables)");
    println!("  --venue <v>        Indoor or Outdoor (default: Indoor)");
    println!("  --theme <name>     Optional theme, e.g. Retro, Holiday, Meme");
    println!("  --catalog <path>   RON catalog overrides merged over the builtin tables");
    println!("  --history <path>   RON list of historical idea records");
    println!("  --date <date>      Fix the generation date (default: today)");
}
