//! Timestamp and duration display formatting.
//!
//! Header timestamps use the original UI's pattern vocabulary ("M/D/YY
//! h:mm A") translated to chrono specifiers, rendered in the viewer's
//! timezone. Durations are bucketed human strings; all math floors, never
//! rounds.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

const NS_PER_MS: i64 = 1_000_000;
const NS_PER_SEC: i64 = NS_PER_MS * 1000;
const NS_PER_MINUTE: i64 = NS_PER_SEC * 60;
const NS_PER_HOUR: i64 = NS_PER_MINUTE * 60;
const NS_PER_DAY: i64 = NS_PER_HOUR * 24;

/// A fixed-offset viewer timezone.
///
/// Parses "UTC", "Z", "±HH:MM" and "±HHMM". Anything else falls back to
/// UTC rather than erroring: a bad timezone identifier should never take
/// down the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(FixedOffset);

impl Timezone {
    pub fn utc() -> Self {
        Timezone(FixedOffset::east_opt(0).unwrap())
    }

    /// Parse a timezone identifier, falling back to UTC on anything
    /// unrecognized.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input == "UTC" || input == "Z" {
            return Timezone::utc();
        }
        parse_offset(input).map(Timezone).unwrap_or_else(Timezone::utc)
    }

    pub fn offset(&self) -> FixedOffset {
        self.0
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::utc()
    }
}

impl FromStr for Timezone {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Timezone::parse(s))
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.local_minus_utc() == 0 {
            write!(f, "UTC")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn parse_offset(input: &str) -> Option<FixedOffset> {
    let (sign, rest) = match input.as_bytes().first()? {
        b'+' => (1, &input[1..]),
        b'-' => (-1, &input[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        _ => return None,
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Format a timestamp in the viewer's timezone using the original UI's
/// pattern tokens (M, D, YY, YYYY, h, HH, mm, ss, A).
///
/// "M/D/YY h:mm A" renders as "5/7/96 1:15 AM".
pub fn format_timestamp(instant: DateTime<Utc>, tz: Timezone, pattern: &str) -> String {
    let local = instant.with_timezone(&tz.offset());
    local.format(&translate_pattern(pattern)).to_string()
}

/// Format a nanosecond epoch timestamp; for data sources that carry raw
/// int64 clocks instead of RFC3339 strings.
pub fn format_timestamp_nanos(nanos: i64, tz: Timezone, pattern: &str) -> String {
    let instant = Utc
        .timestamp_opt(nanos.div_euclid(NS_PER_SEC), nanos.rem_euclid(NS_PER_SEC) as u32)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap());
    format_timestamp(instant, tz, pattern)
}

/// Translate moment-style pattern tokens into a chrono format string.
/// Unrecognized characters pass through literally; '%' is escaped.
fn translate_pattern(pattern: &str) -> String {
    // Longest tokens first so "YYYY" does not parse as two "YY"s.
    const TOKENS: [(&str, &str); 13] = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("M", "%-m"),
        ("DD", "%d"),
        ("D", "%-d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("h", "%-I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("A", "%p"),
        ("a", "%P"),
    ];

    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    'outer: while !rest.is_empty() {
        for (token, spec) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }
        let ch = rest.chars().next().unwrap();
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Format a nanosecond count as a human-readable duration string.
///
/// Thresholds, in order: 0 → "0 seconds"; under 1ms → "< 1 ms"; under 1s →
/// "< 1 second" (or "<N> ms" when `allow_sub_second`); under 1min →
/// "<N> seconds"; under 1hr → "<M>m <S>s"; under 24hr or `allow_over_day` →
/// "<H>h <M>m <S>s"; otherwise ">= 1 day". Negative input clamps to zero.
pub fn format_duration(nanos: i64, allow_over_day: bool, allow_sub_second: bool) -> String {
    let nanos = nanos.max(0);

    if nanos == 0 {
        "0 seconds".to_string()
    } else if nanos < NS_PER_MS {
        "< 1 ms".to_string()
    } else if nanos < NS_PER_SEC {
        if allow_sub_second {
            format!("{} ms", nanos / NS_PER_MS)
        } else {
            "< 1 second".to_string()
        }
    } else if nanos < NS_PER_MINUTE {
        format!("{} seconds", nanos / NS_PER_SEC)
    } else if nanos < NS_PER_HOUR {
        format!(
            "{}m {}s",
            nanos / NS_PER_MINUTE,
            (nanos % NS_PER_MINUTE) / NS_PER_SEC
        )
    } else if nanos < NS_PER_DAY || allow_over_day {
        format!(
            "{}h {}m {}s",
            nanos / NS_PER_HOUR,
            (nanos % NS_PER_HOUR) / NS_PER_MINUTE,
            (nanos % NS_PER_MINUTE) / NS_PER_SEC
        )
    } else {
        ">= 1 day".to_string()
    }
}

/// Format an optional duration, rendering `None` as "unknown".
pub fn format_duration_or_unknown(
    nanos: Option<i64>,
    allow_over_day: bool,
    allow_sub_second: bool,
) -> String {
    match nanos {
        Some(nanos) => format_duration(nanos, allow_over_day, allow_sub_second),
        None => "unknown".to_string(),
    }
}

/// Strip everything up to the last path separator, leaving the file name.
///
/// Looks for `/` first, then `\`. Returns the input unchanged when no
/// separator exists or the separator is the final character.
pub fn basename(input: &str) -> &str {
    match input.rfind('/') {
        Some(idx) if idx != input.len() - 1 => &input[idx + 1..],
        _ => match input.rfind('\\') {
            Some(idx) if idx != input.len() - 1 => &input[idx + 1..],
            _ => input,
        },
    }
}
