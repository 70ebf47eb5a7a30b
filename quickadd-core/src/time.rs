use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// 24-hour clock: `H:MM` or `HH:MM`.
static TIME_24H: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap());

/// Parses a single token into a time of day.
///
/// The two grammars are mutually exclusive and checked in order:
/// 1. **24-hour**: `H:MM`/`HH:MM`, hour 0–23, minute 0–59.
/// 2. **12-hour**: `h[:.]?mm?` followed by `am`/`pm` (case-insensitive,
///    optional space before the suffix, minutes optional). `12am` is
///    midnight, `12pm` is noon.
///
/// A token matching neither grammar is not a time; that is a valid outcome,
/// never an error.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveTime;
/// # use quickadd_core::time::parse_time_token;
/// assert_eq!(parse_time_token("14:30"), NaiveTime::from_hms_opt(14, 30, 0));
/// assert_eq!(parse_time_token("3pm"), NaiveTime::from_hms_opt(15, 0, 0));
/// assert_eq!(parse_time_token("3.15pm"), NaiveTime::from_hms_opt(15, 15, 0));
/// assert_eq!(parse_time_token("noonish"), None);
/// ```
pub fn parse_time_token(token: &str) -> Option<NaiveTime> {
    if let Some(caps) = TIME_24H.captures(token) {
        let h: u32 = caps[1].parse().ok()?;
        let m: u32 = caps[2].parse().ok()?;
        return NaiveTime::from_hms_opt(h, m, 0);
    }
    parse_12h(token)
}

/// Returns `true` if the token matches either time grammar.
pub fn is_time_token(token: &str) -> bool {
    parse_time_token(token).is_some()
}

fn parse_12h(token: &str) -> Option<NaiveTime> {
    let lower = token.trim().to_ascii_lowercase();
    let (core, is_pm) = if let Some(rest) = lower.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = lower.strip_suffix("am") {
        (rest, false)
    } else {
        return None;
    };
    let core = core.trim();

    let (h, m): (u32, u32) = if let Some(sep) = core.find(|c: char| c == ':' || c == '.') {
        let (h_str, m_str) = core.split_at(sep);
        let m_str = &m_str[1..];
        if m_str.is_empty() || m_str.len() > 2 {
            return None;
        }
        (h_str.parse().ok()?, m_str.parse().ok()?)
    } else if !core.is_empty() && core.bytes().all(|b| b.is_ascii_digit()) {
        // Undelimited digits: "5", "11", "530", "1130".
        match core.len() {
            1 | 2 => (core.parse().ok()?, 0),
            3 => (core[..1].parse().ok()?, core[1..].parse().ok()?),
            4 => (core[..2].parse().ok()?, core[2..].parse().ok()?),
            _ => return None,
        }
    } else {
        return None;
    };

    if h == 0 || h > 12 || m > 59 {
        return None;
    }
    let h24 = match (h, is_pm) {
        (12, false) => 0, // 12am is midnight
        (12, true) => 12, // 12pm is noon
        (_, true) => h + 12,
        (_, false) => h,
    };
    NaiveTime::from_hms_opt(h24, m, 0)
}
