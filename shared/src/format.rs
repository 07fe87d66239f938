//! Pure formatting helpers turning raw server numbers into display strings.

use chrono::{DateTime, Local, TimeZone, Utc};

const MINUTE_MS: f64 = 60_000.0;
const HOUR_MS: f64 = 3_600_000.0;
const DAY_MS: f64 = 86_400_000.0;
const WEEK_MS: f64 = 604_800_000.0;

/// A numeric value that may be missing. Missing values format as `-`.
pub trait Metric {
    fn metric(self) -> Option<f64>;
}

impl Metric for f64 {
    fn metric(self) -> Option<f64> {
        Some(self)
    }
}

macro_rules! impl_metric_for_int {
    ($($t:ty),*) => {
        $(impl Metric for $t {
            fn metric(self) -> Option<f64> {
                Some(self as f64)
            }
        })*
    };
}

impl_metric_for_int!(i32, i64, u32, u64, usize);

impl<T: Metric> Metric for Option<T> {
    fn metric(self) -> Option<f64> {
        self.and_then(Metric::metric)
    }
}

/// Rounds half-up, the way a browser's `Math.round` does.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// One fractional digit, ties rounded away from zero like `toFixed(1)`.
pub(crate) fn fixed_one(value: f64) -> String {
    let scaled = value * 10.0;
    // Only quarter values are exact decimal ties at one digit.
    if value >= 0.0 && (value * 4.0).fract() == 0.0 && scaled.fract() == 0.5 {
        return format!("{:.1}", (scaled.floor() + 1.0) / 10.0);
    }
    format!("{:.1}", value)
}

/// en-US digit grouping with at most three fractional digits.
fn group_thousands(value: f64) -> String {
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// `1.2M`, `3.4K`, or a grouped plain number.
pub fn format_number(value: impl Metric) -> String {
    let Some(n) = value.metric() else {
        return "-".to_string();
    };
    if n >= 1_000_000.0 {
        format!("{}M", fixed_one(n / 1_000_000.0))
    } else if n >= 1_000.0 {
        format!("{}K", fixed_one(n / 1_000.0))
    } else {
        group_thousands(n)
    }
}

/// Whole days from 24 hours upwards, otherwise whole hours.
pub fn format_hours(hours: impl Metric) -> String {
    let Some(h) = hours.metric() else {
        return "-".to_string();
    };
    if h >= 24.0 {
        format!("{}d", round_half_up(h / 24.0) as i64)
    } else {
        format!("{}h", round_half_up(h) as i64)
    }
}

/// Millisecond duration as `Nd Nh`, `Nh Nm` or `Nm`.
pub fn format_duration(ms: impl Metric) -> String {
    let ms = match ms.metric() {
        Some(ms) if ms != 0.0 && !ms.is_nan() => ms,
        _ => return "-".to_string(),
    };
    let hours = (ms / HOUR_MS).floor() as i64;
    let minutes = ((ms % HOUR_MS) / MINUTE_MS).floor() as i64;

    if hours >= 24 {
        return format!("{}d {}h", hours / 24, hours % 24);
    }
    if hours > 0 {
        return format!("{}h {}m", hours, minutes);
    }
    format!("{}m", minutes)
}

/// Relative age of an epoch-millisecond timestamp, in the local time zone.
pub fn format_timestamp(ts: Option<i64>, now: DateTime<Utc>) -> String {
    format_timestamp_in(ts, now, &Local)
}

/// [`format_timestamp`] with an explicit zone for the absolute date fallback.
pub fn format_timestamp_in<Tz: TimeZone>(ts: Option<i64>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let ts = match ts {
        Some(ts) if ts != 0 => ts,
        _ => return "-".to_string(),
    };
    let diff = (now.timestamp_millis() - ts) as f64;

    if diff < MINUTE_MS {
        return "Just now".to_string();
    }
    if diff < HOUR_MS {
        return format!("{}m ago", (diff / MINUTE_MS).floor() as i64);
    }
    if diff < DAY_MS {
        return format!("{}h ago", (diff / HOUR_MS).floor() as i64);
    }
    if diff < WEEK_MS {
        return format!("{}d ago", (diff / DAY_MS).floor() as i64);
    }

    match DateTime::<Utc>::from_timestamp_millis(ts) {
        Some(date) => date.with_timezone(tz).format("%-m/%-d/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Escapes text the way a DOM text node serialises it.
///
/// Yew text nodes escape on their own; callers that build raw markup (for
/// example `Html::from_html_unchecked`) must pass untrusted text through this.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `minecraft:dark_forest` becomes `Dark Forest`.
pub fn format_biome_name(biome: &str) -> String {
    biome
        .strip_prefix("minecraft:")
        .unwrap_or(biome)
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
