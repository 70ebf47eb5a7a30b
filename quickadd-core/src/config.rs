use anyhow::{Context, Result};
use chrono::NaiveTime;
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::command::Commands;
use crate::parse_input::default_end_of_day;

#[derive(Debug, Clone)]
pub struct Config {
    /// The synthetic time-of-day given to a date that arrives without a time
    /// (e.g. `add taxes friday`). Valid format is "%H:%M". Default is 23:59.
    pub end_of_day: NaiveTime,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    end_of_day: Option<String>,
    /// Optional table of command aliases:
    /// [synonyms]
    /// nuke = "remove"
    /// lookup = "search"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native),
    /// apply defaults, and extend the global command registry with
    /// user-defined synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|_| FileConfig {
            end_of_day: None,
            synonyms: None,
        });

        let end_of_day = file_config
            .end_of_day
            .as_deref()
            .and_then(Self::parse_end_of_day)
            .unwrap_or_else(default_end_of_day);

        // Extend global command registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Ok(Self { end_of_day })
    }

    /// Parse a "%H:%M" string into NaiveTime.
    fn parse_end_of_day(time: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(time, "%H:%M").ok()
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("quickadd")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("quickadd").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig {
            end_of_day: None,
            synonyms: None,
        })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global command registry.
    /// Omits aliases that collide with a canonical command name (eg. "add").
    /// Lowercases both alias and target for case-insensitive behavior.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Commands::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Commands::extend(&pairs);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::command::Command;
    use chrono::NaiveTime;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("quickadd")
                .join("config.toml");
            let expected_native = b.config_dir().join("quickadd").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_end_of_day() {
        let toml = r#"
            end_of_day = "18:30"
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(
            fc.end_of_day.as_deref().and_then(Config::parse_end_of_day),
            NaiveTime::from_hms_opt(18, 30, 0)
        );
    }

    #[test]
    fn invalid_end_of_day_is_ignored() {
        assert_eq!(Config::parse_end_of_day("25:99"), None);
        assert_eq!(Config::parse_end_of_day("evening"), None);
    }

    #[test]
    fn reads_a_config_file_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "end_of_day = \"17:00\"\n").unwrap();

        let s = fs::read_to_string(&path).unwrap();
        let fc = super::Config::parse_file(&s).unwrap();
        assert_eq!(fc.end_of_day.as_deref(), Some("17:00"));
    }

    #[test]
    fn parse_file_accepts_synonyms_and_extends_registry() {
        let toml = r#"
            [synonyms]
            zap = "remove"
            LOCATE = "search"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        super::Config::load_synonyms(&fc.synonyms);

        assert_eq!(Commands::lookup("zap"), Some(Command::Remove));
        assert_eq!(Commands::lookup("locate"), Some(Command::Search));
    }

    #[test]
    fn parse_file_no_accepts_canonical_synonyms() {
        let toml = r#"
            [synonyms]
            add = "remove"
            obliterate = "remove"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        super::Config::load_synonyms(&fc.synonyms);

        assert_eq!(Commands::lookup("add"), Some(Command::Add));
        assert_eq!(Commands::lookup("obliterate"), Some(Command::Remove));
    }
}
