use chrono::{Local, NaiveDateTime, NaiveTime};

use crate::resolve::{CommandInfo, resolve};
use crate::scan::scan_line;

/// Configuration options for parsing functions.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions {
    /// The instant to use as "now" for relative dates and rollover rules.
    /// Injected rather than read from a global clock, so parsing stays
    /// deterministic and testable.
    pub reference: Option<NaiveDateTime>,
    /// The synthetic time given to a date that arrives without one.
    /// Defaults to 23:59.
    pub end_of_day: Option<NaiveTime>,
}

/// The main entry point: parses one free-text line into a fully-formed
/// [`CommandInfo`].
///
/// Total over all inputs: any text resolves to *some* command (worst case,
/// `add` with the whole line as the name), so callers never special-case a
/// parse failure. A blank line yields an empty `add` with no fields set.
///
/// Each call is a pure function of `(input, reference)`: no state is shared
/// or retained between calls, so concurrent parses need no locking.
///
/// # Arguments
///
/// * `input` - The raw line typed by the user (e.g. `"remind mom birthday
///   tomorrow 3pm to 5pm"`).
/// * `options` - An optional [`ParseOptions`] to pin the reference instant.
///   If `None`, the local wall clock is used.
///
/// # Examples
///
/// ```
/// # use chrono::{NaiveDate, NaiveDateTime};
/// # use quickadd_core::{Command, parse_command, ParseOptions};
/// let opts = ParseOptions {
///     reference: NaiveDate::from_ymd_opt(2026, 4, 15)
///         .unwrap()
///         .and_hms_opt(10, 0, 0),
///     ..Default::default()
/// };
///
/// let info = parse_command("buy milk tomorrow 3pm", Some(opts));
///
/// assert_eq!(info.command, Command::Add);
/// assert_eq!(info.task_name.as_deref(), Some("buy milk"));
/// assert_eq!(
///     info.start,
///     NaiveDate::from_ymd_opt(2026, 4, 16).unwrap().and_hms_opt(15, 0, 0)
/// );
/// ```
pub fn parse_command(input: &str, options: Option<ParseOptions>) -> CommandInfo {
    let options = options.unwrap_or_default();
    let now = options
        .reference
        .unwrap_or_else(|| Local::now().naive_local());
    let end_of_day = options.end_of_day.unwrap_or_else(default_end_of_day);

    if input.trim().is_empty() {
        return CommandInfo::empty();
    }
    let outcome = scan_line(input, now.date());
    resolve(outcome, now, end_of_day)
}

pub(crate) fn default_end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("valid time")
}
