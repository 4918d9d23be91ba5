//! Human-readable formatting helpers for the derived artifacts.
//!
//! Sizes use binary units (1024 base) with one decimal; timestamps are
//! always rendered in UTC.

use chrono::{DateTime, SecondsFormat, Utc};

const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary units and one decimal place.
///
/// Values beyond the TB range stay in TB.
///
/// # Examples
///
/// ```
/// use ki_core::fmt::human_bytes;
///
/// assert_eq!(human_bytes(0), "0.0 B");
/// assert_eq!(human_bytes(1536), "1.5 KB");
/// assert_eq!(human_bytes(5 * 1024 * 1024), "5.0 MB");
/// ```
#[must_use]
pub fn human_bytes(n: u64) -> String {
    #[allow(clippy::cast_precision_loss)] // display only
    let mut size = n as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size * 1024.0)
}

/// Formats a fractional-seconds epoch timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Out-of-range timestamps render as the epoch origin rather than failing;
/// they come from untrusted filesystem metadata.
///
/// # Examples
///
/// ```
/// use ki_core::fmt::mtime_utc;
///
/// assert_eq!(mtime_utc(0.0), "1970-01-01 00:00:00 UTC");
/// ```
#[must_use]
pub fn mtime_utc(mtime: f64) -> String {
    let datetime = datetime_from_epoch(mtime).unwrap_or_default();
    datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// The current time as a `YYYY-MM-DDTHH:MM:SSZ` generation stamp.
#[must_use]
pub fn utc_now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn datetime_from_epoch(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)] // range-checked by chrono below
    let secs = seconds.trunc() as i64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let nanos = (seconds.fract().abs() * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(secs, nanos)
}
