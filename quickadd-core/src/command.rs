use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// The closed set of canonical commands the parser can emit.
///
/// Every surface form a user may type (including synonyms registered at
/// startup) maps onto exactly one of these. A leading token that matches
/// nothing resolves to [`Command::Add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Add,
    Remove,
    Search,
    Edit,
    Sync,
    Undo,
    Redo,
    Rename,
    Login,
    Logout,
    Help,
    Mark,
    Unmark,
    Previous,
    Next,
    Floating,
    Deadline,
    Timed,
    Home,
    Exit,
    Minimize,
}

impl Command {
    /// Commands that carry no payload: name, dates and index are always
    /// cleared for these, regardless of what else was typed on the line.
    pub fn is_no_parameter(self) -> bool {
        matches!(
            self,
            Command::Help
                | Command::Login
                | Command::Logout
                | Command::Redo
                | Command::Sync
                | Command::Home
                | Command::Previous
                | Command::Next
                | Command::Floating
                | Command::Deadline
                | Command::Timed
                | Command::Exit
                | Command::Minimize
        )
    }
}

pub struct Commands;

impl Commands {
    /// Returns the global command registry (surface form → canonical).
    ///
    /// Initialized once on first access, wrapped in an [`RwLock`] so config
    /// loading can merge user synonyms while parses read concurrently. All
    /// keys are stored lowercased for case-insensitive lookups.
    fn registry() -> &'static RwLock<HashMap<String, Command>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Command>>> = Lazy::new(|| {
            let mut m = HashMap::new();
            for cmd in Command::iter() {
                m.insert(cmd.as_ref().to_string(), cmd);
            }
            // Built-in synonyms.
            m.insert("del".to_string(), Command::Remove);
            m.insert("delete".to_string(), Command::Remove);
            m.insert("rm".to_string(), Command::Remove);
            m.insert("find".to_string(), Command::Search);
            m.insert("display".to_string(), Command::Search);
            m.insert("show".to_string(), Command::Search);
            m.insert("modify".to_string(), Command::Edit);
            m.insert("done".to_string(), Command::Mark);
            m.insert("undone".to_string(), Command::Unmark);
            m.insert("prev".to_string(), Command::Previous);
            m.insert("quit".to_string(), Command::Exit);
            m.insert("min".to_string(), Command::Minimize);

            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined synonyms.
    ///
    /// Each pair is `(alias, target)`. The `target` must resolve to a known
    /// command already in the registry; pairs with an unknown target are
    /// ignored silently. Keys are lowercased to keep lookups
    /// case-insensitive.
    ///
    /// Typical call site: `Config::load()`, after reading `[synonyms]` from
    /// `config.toml`.
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = Self::registry().write().unwrap();
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.insert(alias.to_ascii_lowercase(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is the canonical spelling of a command.
    pub fn is_canonical(word: &str) -> bool {
        Command::iter().any(|cmd| cmd.as_ref() == word)
    }

    /// Returns the canonical command for a recognized surface form, `None`
    /// otherwise. Case-insensitive.
    pub fn lookup(token: &str) -> Option<Command> {
        let reg = Self::registry().read().unwrap();
        reg.get(&token.to_ascii_lowercase()).copied()
    }

    /// Classifies the leading token of a line.
    ///
    /// Total: an unrecognized, empty or absent token resolves to
    /// [`Command::Add`]. Absence of a match is a valid outcome, not an
    /// error.
    pub fn classify(token: Option<&str>) -> Command {
        token
            .and_then(Self::lookup)
            .unwrap_or(Command::Add)
    }
}
