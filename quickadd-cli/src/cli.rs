use chrono::NaiveDateTime;
use clap::Parser;

/// quickadd — free-text task command parser
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Pin the reference instant for reproducible output
    /// (e.g., `quickadd --now 2026-04-15T10:00 "search tomorrow"`).
    /// Defaults to the local wall clock.
    #[arg(long, env = "QUICKADD_NOW", value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,

    /// Free text to parse (e.g., `quickadd remind mom tomorrow 3pm to 5pm`).
    #[arg()]
    pub text: Vec<String>,
}

fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .map_err(|e| format!("invalid datetime {s:?}: {e}"))
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}
