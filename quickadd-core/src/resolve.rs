//! The resolution engine: turns a [`ScanOutcome`] into the final
//! [`CommandInfo`]. This is the only place with defaulting authority; every
//! missing field has a defined default, so resolution never fails.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::command::Command;
use crate::scan::ScanOutcome;

/// The final structured command, owned by the caller.
///
/// Invariants, enforced here:
/// - `start <= end` whenever both are present;
/// - no-parameter commands carry no name, no timestamps and index 0;
/// - the value is immutable once built and created fresh per parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub command: Command,
    pub task_name: Option<String>,
    /// Replacement name for `edit`/`rename` (the second name segment).
    pub edited_name: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub index: usize,
}

impl CommandInfo {
    /// The empty result a blank input line short-circuits to.
    pub(crate) fn empty() -> Self {
        Self {
            command: Command::Add,
            task_name: None,
            edited_name: None,
            start: None,
            end: None,
            index: 0,
        }
    }
}

/// Stage 1 + Stage 2: date/time defaulting, then per-command reshaping.
pub(crate) fn resolve(
    outcome: ScanOutcome,
    now: NaiveDateTime,
    end_of_day: NaiveTime,
) -> CommandInfo {
    let today = now.date();
    let start_date = outcome.dates.first().copied();
    let end_date = outcome.dates.get(1).copied();
    let start_time = outcome.times.first().copied();
    let end_time = outcome.times.get(1).copied();

    // Stage 1, start side.
    let (mut start, mut start_defaulted) = match (start_date, start_time) {
        (None, None) => (None, false),
        (None, Some(t)) => {
            // Time without a date means today, rolled forward if already past.
            let mut dt = today.and_time(t);
            if dt <= now {
                dt += Duration::days(1);
            }
            (Some(dt), false)
        }
        (Some(d), None) => (Some(d.and_time(end_of_day)), true),
        (Some(d), Some(t)) => (Some(d.and_time(t)), false),
    };

    // Stage 1, end side.
    let (mut end, mut end_defaulted) = match (end_date, end_time) {
        (None, None) => (None, false),
        (None, Some(t)) => {
            // The end inherits the start's date when one was resolved.
            let base = start.map_or(today, |s| s.date());
            let mut dt = base.and_time(t);
            if dt <= now {
                dt += Duration::days(1);
            }
            (Some(dt), false)
        }
        (Some(d), None) => (Some(d.and_time(end_of_day)), true),
        (Some(d), Some(t)) => (Some(d.and_time(t)), false),
    };

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            start = Some(e);
            end = Some(s);
            std::mem::swap(&mut start_defaulted, &mut end_defaulted);
        }
    }

    let mut names = outcome.segments.into_iter();
    let task_name = names.next();
    let rest: Vec<String> = names.collect();
    let edited_name = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    let mut info = CommandInfo {
        command: outcome.command,
        task_name,
        edited_name,
        start,
        end,
        index: outcome.index.unwrap_or(0),
    };

    // Stage 2.
    match info.command {
        Command::Add => {
            // A stray second segment is part of the task name for add.
            if let Some(extra) = info.edited_name.take() {
                info.task_name = Some(match info.task_name.take() {
                    Some(name) => format!("{name} {extra}"),
                    None => extra,
                });
            }
            // A date-only input is a lookup, not a blank task.
            if info.task_name.as_deref().is_none_or(str::is_empty) && info.start.is_some() {
                info.command = Command::Search;
                apply_search_defaults(&mut info, start_defaulted);
            }
        }
        Command::Search => {
            apply_search_defaults(&mut info, start_defaulted);
        }
        Command::Mark | Command::Unmark | Command::Remove => {
            info.edited_name = None;
            info.start = None;
            info.end = None;
        }
        Command::Rename => {
            info.start = None;
            info.end = None;
        }
        cmd if cmd.is_no_parameter() => {
            info.task_name = None;
            info.edited_name = None;
            info.start = None;
            info.end = None;
            info.index = 0;
        }
        // edit and undo keep everything the scan produced.
        _ => {}
    }

    info
}

/// Search looks at whole days: a start that was synthesized to 23:59 is
/// pulled back to midnight, and a missing end becomes start + 1 day.
fn apply_search_defaults(info: &mut CommandInfo, start_defaulted: bool) {
    if start_defaulted {
        if let Some(s) = info.start {
            info.start = s.date().and_hms_opt(0, 0, 0);
        }
    }
    if info.end.is_none() {
        if let Some(s) = info.start {
            info.end = Some(s + Duration::days(1));
        }
    }
    info.edited_name = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        // Wednesday, mid-morning.
        NaiveDate::from_ymd_opt(2026, 4, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn eod() -> NaiveTime {
        NaiveTime::from_hms_opt(23, 59, 0).unwrap()
    }

    fn outcome(command: Command) -> ScanOutcome {
        ScanOutcome {
            command,
            segments: Vec::new(),
            dates: Vec::new(),
            times: Vec::new(),
            index: None,
        }
    }

    fn at(d: (i32, u32, u32), t: (u32, u32)) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(d.0, d.1, d.2)
            .unwrap()
            .and_hms_opt(t.0, t.1, 0)
            .unwrap()
    }

    #[test]
    fn no_date_no_time_stays_empty() {
        let mut o = outcome(Command::Add);
        o.segments.push("task".into());
        let info = resolve(o, now(), eod());
        assert_eq!(info.start, None);
        assert_eq!(info.end, None);
    }

    #[test]
    fn future_time_today_is_kept() {
        let mut o = outcome(Command::Add);
        o.segments.push("task".into());
        o.times.push(NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.start, Some(at((2026, 4, 15), (15, 0))));
    }

    #[test]
    fn past_time_rolls_to_tomorrow() {
        let mut o = outcome(Command::Add);
        o.segments.push("task".into());
        o.times.push(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.start, Some(at((2026, 4, 16), (9, 0))));
    }

    #[test]
    fn date_without_time_gets_end_of_day() {
        let mut o = outcome(Command::Add);
        o.segments.push("task".into());
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 20).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.start, Some(at((2026, 4, 20), (23, 59))));
    }

    #[test]
    fn end_time_inherits_start_date() {
        let mut o = outcome(Command::Add);
        o.segments.push("task".into());
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 20).unwrap());
        o.times.push(NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        o.times.push(NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.start, Some(at((2026, 4, 20), (15, 0))));
        assert_eq!(info.end, Some(at((2026, 4, 20), (17, 0))));
    }

    #[test]
    fn reversed_timestamps_are_swapped() {
        let mut o = outcome(Command::Add);
        o.segments.push("task".into());
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 22).unwrap());
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 20).unwrap());
        let info = resolve(o, now(), eod());
        assert!(info.start.unwrap() <= info.end.unwrap());
        assert_eq!(info.start, Some(at((2026, 4, 20), (23, 59))));
    }

    #[test]
    fn add_merges_second_segment_into_name() {
        let mut o = outcome(Command::Add);
        o.segments.push("call mom".into());
        o.segments.push("about dinner".into());
        let info = resolve(o, now(), eod());
        assert_eq!(info.task_name.as_deref(), Some("call mom about dinner"));
        assert_eq!(info.edited_name, None);
    }

    #[test]
    fn nameless_add_with_date_becomes_search() {
        let mut o = outcome(Command::Add);
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 20).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.command, Command::Search);
        assert_eq!(info.start, Some(at((2026, 4, 20), (0, 0))));
        assert_eq!(info.end, Some(at((2026, 4, 21), (0, 0))));
    }

    #[test]
    fn nameless_add_without_date_stays_add() {
        let o = outcome(Command::Add);
        let info = resolve(o, now(), eod());
        assert_eq!(info.command, Command::Add);
        assert_eq!(info.start, None);
    }

    #[test]
    fn search_corrects_defaulted_start_to_midnight() {
        let mut o = outcome(Command::Search);
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 16).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.start, Some(at((2026, 4, 16), (0, 0))));
        assert_eq!(info.end, Some(at((2026, 4, 17), (0, 0))));
    }

    #[test]
    fn search_keeps_explicit_times() {
        let mut o = outcome(Command::Search);
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 16).unwrap());
        o.times.push(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.start, Some(at((2026, 4, 16), (9, 0))));
        assert_eq!(info.end, Some(at((2026, 4, 17), (9, 0))));
    }

    #[test]
    fn mark_discards_timestamps_and_second_segment() {
        let mut o = outcome(Command::Mark);
        o.segments.push("laundry".into());
        o.segments.push("again".into());
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 16).unwrap());
        o.times.push(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.task_name.as_deref(), Some("laundry"));
        assert_eq!(info.edited_name, None);
        assert_eq!(info.start, None);
        assert_eq!(info.end, None);
    }

    #[test]
    fn rename_keeps_names_and_index_only() {
        let mut o = outcome(Command::Rename);
        o.segments.push("old".into());
        o.segments.push("new".into());
        o.index = Some(3);
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 16).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.task_name.as_deref(), Some("old"));
        assert_eq!(info.edited_name.as_deref(), Some("new"));
        assert_eq!(info.index, 3);
        assert_eq!(info.start, None);
        assert_eq!(info.end, None);
    }

    #[test]
    fn no_parameter_commands_are_stripped_bare() {
        for cmd in [Command::Help, Command::Redo, Command::Exit, Command::Sync] {
            let mut o = outcome(cmd);
            o.segments.push("noise".into());
            o.index = Some(7);
            o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 16).unwrap());
            o.times.push(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
            let info = resolve(o, now(), eod());
            assert_eq!(info.command, cmd);
            assert_eq!(info.task_name, None);
            assert_eq!(info.edited_name, None);
            assert_eq!(info.start, None);
            assert_eq!(info.end, None);
            assert_eq!(info.index, 0);
        }
    }

    #[test]
    fn edit_keeps_everything() {
        let mut o = outcome(Command::Edit);
        o.segments.push("old".into());
        o.segments.push("new".into());
        o.dates.push(NaiveDate::from_ymd_opt(2026, 4, 20).unwrap());
        let info = resolve(o, now(), eod());
        assert_eq!(info.task_name.as_deref(), Some("old"));
        assert_eq!(info.edited_name.as_deref(), Some("new"));
        assert!(info.start.is_some());
    }
}
