use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

/// Day-first numeric date: `D<sep>M<sep>YYYY`, separator is any non-digit
/// run, year restricted to `20xx`.
static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\D+(\d{1,2})\D+(20\d{2})$").unwrap());

/// Classification of a single token by the date grammars.
///
/// Only [`DateToken::Full`] is a complete calendar date; the other variants
/// identify a fragment that the caller's token scan combines with its
/// neighbours (a month with a surrounding day/year, a weekday with the
/// reference date).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    /// Bare integer 1–31: a day in the reference month/year.
    DayOfMonth(u32),
    /// Explicit day/month/year.
    Full(NaiveDate),
    /// Spelled month name, 1–12.
    Month(u32),
    /// Day-of-week name.
    Weekday(Weekday),
}

/// Classifies a single token against the four date grammars, in fixed
/// priority order: bare day-of-month integer, numeric `D<sep>M<sep>YYYY`,
/// spelled month name, day-of-week name. First match wins.
///
/// A token matching none of the grammars is not a date; that is a valid
/// outcome, never an error.
///
/// # Examples
///
/// ```
/// # use chrono::{NaiveDate, Weekday};
/// # use quickadd_core::date::{classify_date_token, DateToken};
/// assert_eq!(classify_date_token("15"), Some(DateToken::DayOfMonth(15)));
/// assert_eq!(
///     classify_date_token("24/12/2026"),
///     Some(DateToken::Full(NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()))
/// );
/// assert_eq!(classify_date_token("dec"), Some(DateToken::Month(12)));
/// assert_eq!(classify_date_token("friday"), Some(DateToken::Weekday(Weekday::Fri)));
/// assert_eq!(classify_date_token("lunch"), None);
/// ```
pub fn classify_date_token(token: &str) -> Option<DateToken> {
    if let Ok(day) = token.parse::<u32>() {
        if (1..=31).contains(&day) {
            return Some(DateToken::DayOfMonth(day));
        }
        return None;
    }

    if let Some(caps) = NUMERIC_DATE.captures(token) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).map(DateToken::Full);
    }

    if let Some(month) = month_from_name(token) {
        return Some(DateToken::Month(month));
    }

    weekday_from_name(token).map(DateToken::Weekday)
}

/// Returns `true` if the token matches any of the four date grammars.
pub fn is_date_token(token: &str) -> bool {
    classify_date_token(token).is_some()
}

/// Month number for a full month name or its standard 3–4 letter
/// abbreviation, case-insensitive.
pub fn month_from_name(token: &str) -> Option<u32> {
    let m = match token.to_ascii_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(m)
}

/// Weekday for a full day name or a common abbreviation, case-insensitive.
pub fn weekday_from_name(token: &str) -> Option<Weekday> {
    let wd = match token.to_ascii_lowercase().as_str() {
        "mon" | "monday" => Weekday::Mon,
        "tue" | "tues" | "tuesday" => Weekday::Tue,
        "wed" | "wednesday" => Weekday::Wed,
        "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
        "fri" | "friday" => Weekday::Fri,
        "sat" | "saturday" => Weekday::Sat,
        "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(wd)
}

/// Resolves a day-of-month against the reference month/year.
///
/// Days past the end of the reference month (e.g. 31 in April) do not form a
/// valid date and yield `None`.
pub fn resolve_day_of_month(day: u32, reference: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), day)
}

/// Next occurrence of `weekday` strictly after the reference date: "friday"
/// typed on a Friday means the following week.
pub fn next_weekday(weekday: Weekday, reference: NaiveDate) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() + 7
        - reference.weekday().num_days_from_monday())
        % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    reference + Duration::days(ahead as i64)
}
