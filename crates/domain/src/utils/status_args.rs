//! Free-form status argument parser.
//!
//! Pulls an optional duration and an optional emoji out of the positional
//! command line arguments so that `slack-status 5m :coffee: Brewing` and
//! `slack-status :coffee: Brewing for 5m` both work without flags.
//!
//! Only fixed positions are inspected: a duration is taken from the first
//! argument, or from a trailing `for <duration>` pair, never from the middle.

use std::time::Duration;

use crate::types::StatusRequest;

const FOR_KEYWORD: &str = "for";

/// Accepted units, two-letter ones first so `ms` is not read as `m`.
const UNITS: [&str; 8] = ["ns", "us", "\u{b5}s", "\u{3bc}s", "ms", "h", "m", "s"];

/// Parse a duration literal such as `5m`, `90s`, `1.5h` or `1h30m`.
///
/// Only the units `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h` are accepted,
/// so words like `5min` or `2weeks` and units like `d` or `M` stay text.
/// A bare `0` is the one literal allowed without a unit.
pub fn parse_duration_literal(input: &str) -> Option<Duration> {
    if input == "0" {
        return Some(Duration::ZERO);
    }

    let mut rest = input;
    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let (segment, tail) = split_segment(rest)?;
        total = total.checked_add(segment)?;
        rest = tail;
    }
    (!input.is_empty()).then_some(total)
}

/// Read one `<number><unit>` segment off the front of `input`.
fn split_segment(input: &str) -> Option<(Duration, &str)> {
    let number_len = input.find(|c: char| !(c.is_ascii_digit() || c == '.')).unwrap_or(input.len());
    let (number, tail) = input.split_at(number_len);
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return None;
    }

    let unit = UNITS.iter().copied().find(|unit| tail.starts_with(unit))?;
    let tail = &tail[unit.len()..];
    // humantime spells microseconds `us` only.
    let canonical = match unit {
        "\u{b5}s" | "\u{3bc}s" => "us",
        other => other,
    };

    let mut segment = if whole.is_empty() {
        Duration::ZERO
    } else {
        humantime::parse_duration(&format!("{whole}{canonical}")).ok()?
    };
    if !fraction.is_empty() {
        let base = humantime::parse_duration(&format!("1{canonical}")).ok()?;
        let ratio: f64 = format!("0.{fraction}").parse().ok()?;
        segment = segment.checked_add(base.mul_f64(ratio))?;
    }
    Some((segment, tail))
}

/// Find a duration as a prefix or as a `for <duration>` suffix.
///
/// Returns the remaining arguments and the duration, if one was found. The
/// prefix form wins when both are present.
pub fn extract_duration(args: &[String]) -> (&[String], Option<Duration>) {
    let Some((first, rest)) = args.split_first() else {
        return (args, None);
    };

    if let Some(duration) = parse_duration_literal(first) {
        return (rest, Some(duration));
    }

    if let [head @ .., keyword, last] = args {
        if keyword.eq_ignore_ascii_case(FOR_KEYWORD) {
            if let Some(duration) = parse_duration_literal(last) {
                return (head, Some(duration));
            }
        }
    }

    (args, None)
}

/// Take the first argument as an emoji when it looks like `:name:`.
pub fn extract_emoji(args: &[String]) -> (&[String], Option<&str>) {
    match args.split_first() {
        Some((first, rest)) if is_emoji_token(first) => (rest, Some(first.as_str())),
        _ => (args, None),
    }
}

fn is_emoji_token(token: &str) -> bool {
    token.len() >= 2 && token.starts_with(':') && token.ends_with(':')
}

/// Build a [`StatusRequest`] from positional arguments and explicit flags.
///
/// Heuristics only run for values the flags left unset; the duration is
/// extracted before the emoji and the leftovers become the status text.
pub fn parse_status_args(
    args: &[String],
    flag_duration: Option<Duration>,
    flag_emoji: Option<String>,
    snooze: bool,
) -> StatusRequest {
    let mut remaining = args;

    let duration = match flag_duration.filter(|duration| !duration.is_zero()) {
        Some(duration) => Some(duration),
        None => {
            let (rest, found) = extract_duration(remaining);
            remaining = rest;
            found
        }
    };

    let emoji = match flag_emoji.filter(|emoji| !emoji.is_empty()) {
        Some(emoji) => Some(emoji),
        None => {
            let (rest, found) = extract_emoji(remaining);
            remaining = rest;
            found.map(str::to_string)
        }
    };

    StatusRequest { duration, emoji, status_text: remaining.join(" "), snooze }
}
