//! Work span parsing, formatting and serde adapters.
//!
//! The portal renders spans either as Go-style durations (`2h`, `1h30m`) or
//! as clock-like `H:MM` values (`2:30`, `2:30h`).

use chrono::TimeDelta;

/// Parse a span as rendered by the portal or typed on the command line.
///
/// Accepts `2h`, `1h30m`, `45m`, `1.5h`, `90s`, `2:30` and `2:30h`.
/// Returns `None` for empty or malformed input.
#[must_use]
pub fn parse_span(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some((hours, minutes)) = text.split_once(':') {
        let hours: i64 = hours.trim().parse().ok()?;
        let minutes: i64 = minutes.trim().trim_end_matches(['h', 'm']).parse().ok()?;
        return TimeDelta::try_hours(hours)?.checked_add(&TimeDelta::try_minutes(minutes)?);
    }

    let mut seconds = 0.0_f64;
    let mut number = String::new();
    let mut seen_unit = false;

    for ch in text.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            number.push(ch);
            continue;
        }

        let unit = match ch {
            'h' => 3600.0,
            'm' => 60.0,
            's' => 1.0,
            _ => return None,
        };
        let value: f64 = number.parse().ok()?;
        number.clear();
        seconds += value * unit;
        seen_unit = true;
    }

    if !number.is_empty() || !seen_unit {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)]
    TimeDelta::try_seconds(seconds.round() as i64)
}

/// Render a span as `2h`, `1h30m` or `45m`.
#[must_use]
pub fn format_span(span: TimeDelta) -> String {
    let minutes = span.num_minutes();
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    let (hours, rest) = (minutes / 60, minutes % 60);

    match (hours, rest) {
        (0, m) => format!("{sign}{m}m"),
        (h, 0) => format!("{sign}{h}h"),
        (h, m) => format!("{sign}{h}h{m}m"),
    }
}

/// Serialize a [`TimeDelta`] as whole minutes.
pub mod minutes {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(span: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(span.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let minutes = i64::deserialize(deserializer)?;
        TimeDelta::try_minutes(minutes).ok_or_else(|| D::Error::custom("span out of range"))
    }
}
