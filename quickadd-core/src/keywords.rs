use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

/// Connective keywords that separate date/time phrases from the task name.
///
/// These are reserved during the token scan unless folded back into the name
/// by the lookahead rules in [`crate::scan`]. `To` is never folded: it is the
/// range connective ("3pm to 5pm").
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Connective {
    At,
    By,
    From,
    To,
    On,
}

impl Connective {
    /// Case-insensitive classification of a single token.
    pub fn classify(token: &str) -> Option<Connective> {
        Connective::iter().find(|c| c.as_ref().eq_ignore_ascii_case(token))
    }
}

/// Relative-day keywords resolved by the token scan against the reference
/// date. These sit outside the date extractor's four grammars: the extractor
/// only sees concrete calendar tokens, while "today"/"tomorrow" need the
/// injected reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RelativeDay {
    Today,
    Tomorrow,
    Yesterday,
}

impl RelativeDay {
    /// Case-insensitive classification of a single token.
    pub fn classify(token: &str) -> Option<RelativeDay> {
        RelativeDay::iter().find(|d| d.as_ref().eq_ignore_ascii_case(token))
    }

    /// Offset in days relative to the reference date.
    pub fn offset(self) -> i64 {
        match self {
            RelativeDay::Today => 0,
            RelativeDay::Tomorrow => 1,
            RelativeDay::Yesterday => -1,
        }
    }
}
