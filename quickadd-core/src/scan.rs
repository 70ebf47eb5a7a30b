//! Line scanning: splits a raw input line into the pieces the resolution
//! engine consumes. Quoted literals are lifted out first, then the remaining
//! whitespace-delimited tokens are claimed by the command, time and date
//! grammars in that order; whatever is left becomes the task name.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::command::{Command, Commands};
use crate::date::{self, DateToken};
use crate::keywords::{Connective, RelativeDay};
use crate::time;

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).unwrap());
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// Everything the scan extracted from one line, in left-to-right order.
/// Intermediate only: the resolution engine turns this into a `CommandInfo`.
#[derive(Debug)]
pub struct ScanOutcome {
    pub command: Command,
    /// Ordered name segments (primary first, then the replacement name).
    pub segments: Vec<String>,
    /// Resolved calendar dates, left to right.
    pub dates: Vec<NaiveDate>,
    /// Times of day, left to right ("3pm to 5pm" yields two).
    pub times: Vec<NaiveTime>,
    /// Trailing numeric index, if one was captured.
    pub index: Option<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Claim {
    Free,
    Command,
    Date,
    Time,
    Index,
}

struct Segment {
    pos: usize,
    text: String,
    quoted: bool,
}

/// Scans one line against all token grammars.
///
/// `reference` anchors relative dates (bare day-of-month, weekday names,
/// "today"/"tomorrow"). The scan never fails: a line with no recognizable
/// structure comes back as a single name segment under [`Command::Add`].
pub fn scan_line(input: &str, reference: NaiveDate) -> ScanOutcome {
    let (working, mut segments) = extract_quoted(input);

    let tokens: Vec<(usize, &str)> = TOKEN
        .find_iter(&working)
        .map(|m| (m.start(), m.as_str()))
        .collect();
    let mut claim = vec![Claim::Free; tokens.len()];

    // The leading token is the only command position. An unrecognized
    // leading token stays in play for the other grammars.
    let command = match tokens.first().and_then(|(_, tok)| Commands::lookup(tok)) {
        Some(cmd) => {
            claim[0] = Claim::Command;
            cmd
        }
        None => Command::Add,
    };

    let times = claim_times(&tokens, &mut claim);
    let dates = claim_dates(&tokens, &mut claim, reference);
    let (scanned, rule_index) = claim_names(&tokens, &mut claim);
    segments.extend(scanned);
    segments.sort_by_key(|s| s.pos);

    // A pass-B segment that is a single integer is the index, not a name.
    // Quoted literals are exempt: they are names verbatim.
    let mut index = rule_index;
    let mut names = Vec::new();
    for seg in segments {
        if !seg.quoted {
            if let Ok(n) = seg.text.parse::<usize>() {
                index = Some(n);
                continue;
            }
        }
        names.push(seg.text);
    }

    ScanOutcome {
        command,
        segments: names,
        dates,
        times,
        index,
    }
}

/// Pass A: lift every double-quoted substring out of the line so its content
/// can never be claimed by the date/time/command grammars. The quoted region
/// is blanked in place (byte-for-byte) so later token positions stay
/// comparable with segment positions.
fn extract_quoted(input: &str) -> (String, Vec<Segment>) {
    let mut working = String::with_capacity(input.len());
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in QUOTED.captures_iter(input) {
        let m = caps.get(0).expect("whole match");
        working.push_str(&input[last..m.start()]);
        working.extend(std::iter::repeat(' ').take(m.len()));
        last = m.end();

        let text = caps[1].trim().to_string();
        if !text.is_empty() {
            segments.push(Segment {
                pos: m.start(),
                text,
                quoted: true,
            });
        }
    }
    working.push_str(&input[last..]);
    (working, segments)
}

/// Claims clock-time tokens, left to right. A bare `5 pm` spread over two
/// tokens is joined before classification.
fn claim_times(tokens: &[(usize, &str)], claim: &mut [Claim]) -> Vec<NaiveTime> {
    let mut times = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if claim[i] != Claim::Free {
            i += 1;
            continue;
        }
        let tok = tokens[i].1;
        if let Some(t) = time::parse_time_token(tok) {
            times.push(t);
            claim[i] = Claim::Time;
            i += 1;
            continue;
        }
        if i + 1 < tokens.len() && claim[i + 1] == Claim::Free {
            let next = tokens[i + 1].1;
            if next.eq_ignore_ascii_case("am") || next.eq_ignore_ascii_case("pm") {
                if let Some(t) = time::parse_time_token(&format!("{tok} {next}")) {
                    times.push(t);
                    claim[i] = Claim::Time;
                    claim[i + 1] = Claim::Time;
                    i += 2;
                    continue;
                }
            }
        }
        i += 1;
    }
    times
}

/// Claims date tokens, left to right, resolving each against the reference
/// date. A spelled month pulls in an adjacent day-of-month token (either
/// side) and a trailing `20xx` year token.
fn claim_dates(
    tokens: &[(usize, &str)],
    claim: &mut [Claim],
    reference: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for i in 0..tokens.len() {
        if claim[i] != Claim::Free {
            continue;
        }
        let tok = tokens[i].1;

        if let Some(rel) = RelativeDay::classify(tok) {
            dates.push(reference + Duration::days(rel.offset()));
            claim[i] = Claim::Date;
            continue;
        }

        match date::classify_date_token(tok) {
            Some(DateToken::Full(d)) => {
                dates.push(d);
                claim[i] = Claim::Date;
            }
            Some(DateToken::Weekday(wd)) => {
                dates.push(date::next_weekday(wd, reference));
                claim[i] = Claim::Date;
            }
            Some(DateToken::Month(month)) => {
                if let Some(d) = assemble_month_date(tokens, claim, i, month, reference) {
                    dates.push(d);
                }
            }
            // A lone day-of-month integer is settled by the name-scan rules:
            // it may be part of the name, or the trailing index.
            Some(DateToken::DayOfMonth(_)) | None => {}
        }
    }
    dates
}

/// Combines a month-name token at `idx` with its neighbours into a concrete
/// date. The day comes from an adjacent bare integer (preceding token first),
/// the year from a `20xx` token after them; both default to the reference
/// year / day 1.
fn assemble_month_date(
    tokens: &[(usize, &str)],
    claim: &mut [Claim],
    idx: usize,
    month: u32,
    reference: NaiveDate,
) -> Option<NaiveDate> {
    let mut day: Option<(usize, u32)> = None;
    if idx > 0 && claim[idx - 1] == Claim::Free {
        if let Some(DateToken::DayOfMonth(d)) = date::classify_date_token(tokens[idx - 1].1) {
            day = Some((idx - 1, d));
        }
    }
    let mut next = idx + 1;
    if day.is_none() && next < tokens.len() && claim[next] == Claim::Free {
        if let Some(DateToken::DayOfMonth(d)) = date::classify_date_token(tokens[next].1) {
            day = Some((next, d));
            next += 1;
        }
    }
    let mut year: Option<(usize, i32)> = None;
    if next < tokens.len() && claim[next] == Claim::Free {
        if let Some(y) = parse_year(tokens[next].1) {
            year = Some((next, y));
        }
    }

    let y = year.map_or(reference.year(), |(_, y)| y);
    let d = day.map_or(1, |(_, d)| d);
    if let Some(resolved) = NaiveDate::from_ymd_opt(y, month, d) {
        claim[idx] = Claim::Date;
        if let Some((di, _)) = day {
            claim[di] = Claim::Date;
        }
        if let Some((yi, _)) = year {
            claim[yi] = Claim::Date;
        }
        return Some(resolved);
    }
    // Day does not exist in that month; keep the month itself and leave the
    // day token for the name scan.
    if let Some(resolved) = NaiveDate::from_ymd_opt(y, month, 1) {
        claim[idx] = Claim::Date;
        if let Some((yi, _)) = year {
            claim[yi] = Claim::Date;
        }
        return Some(resolved);
    }
    None
}

fn parse_year(token: &str) -> Option<i32> {
    if token.len() == 4 && token.starts_with("20") && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// Pass B of name extraction: walks the unclaimed tokens, folding connectives
/// and small integers back into the name where the lookahead rules allow, and
/// capturing a trailing numeric index. Contiguous eligible tokens join into
/// one segment; claimed tokens break segments apart.
fn claim_names(tokens: &[(usize, &str)], claim: &mut [Claim]) -> (Vec<Segment>, Option<usize>) {
    let mut segments = Vec::new();
    let mut current: Option<Segment> = None;
    let mut index = None;

    for i in 0..tokens.len() {
        if claim[i] != Claim::Free {
            flush(&mut current, &mut segments);
            continue;
        }
        let (pos, tok) = tokens[i];

        if let Some(conn) = Connective::classify(tok) {
            // "to" is always the range connective; the others are folded into
            // the name when the next token is itself name-eligible ("back at
            // school"), otherwise dropped as separators.
            if conn != Connective::To && name_eligible(tokens, claim, i + 1) {
                append(&mut current, pos, tok);
            } else {
                flush(&mut current, &mut segments);
            }
            continue;
        }

        if tok.parse::<usize>().is_ok() {
            // An integer directly before a date token is the index
            // ("remove 2 friday"); anywhere else it belongs to the name
            // ("buy 2 tickets").
            if i + 1 < tokens.len() && is_date_like(tokens, claim, i + 1) {
                index = tok.parse().ok();
                claim[i] = Claim::Index;
                flush(&mut current, &mut segments);
            } else {
                append(&mut current, pos, tok);
            }
            continue;
        }

        append(&mut current, pos, tok);
    }
    flush(&mut current, &mut segments);
    (segments, index)
}

/// Name-eligible: unclaimed and outside every competing grammar.
fn name_eligible(tokens: &[(usize, &str)], claim: &[Claim], i: usize) -> bool {
    if i >= tokens.len() || claim[i] != Claim::Free {
        return false;
    }
    let tok = tokens[i].1;
    Connective::classify(tok).is_none()
        && RelativeDay::classify(tok).is_none()
        && !date::is_date_token(tok)
        && !time::is_time_token(tok)
}

fn is_date_like(tokens: &[(usize, &str)], claim: &[Claim], i: usize) -> bool {
    claim[i] == Claim::Date
        || date::is_date_token(tokens[i].1)
        || RelativeDay::classify(tokens[i].1).is_some()
}

fn append(current: &mut Option<Segment>, pos: usize, tok: &str) {
    match current {
        Some(seg) => {
            seg.text.push(' ');
            seg.text.push_str(tok);
        }
        None => {
            *current = Some(Segment {
                pos,
                text: tok.to_string(),
                quoted: false,
            });
        }
    }
}

fn flush(current: &mut Option<Segment>, segments: &mut Vec<Segment>) {
    if let Some(seg) = current.take() {
        segments.push(seg);
    }
}
