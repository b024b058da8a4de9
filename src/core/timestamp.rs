// Logtally - core/timestamp.rs
//
// Timezone-aware timestamp resolution.
//
// Headers carry a local date-time with millisecond precision plus a signed
// HH:MM zone offset. Both parts resolve to one absolute UTC instant so that
// entries originating from files with different offsets compare correctly.
//
// Sign convention: the offset is the standard UTC-offset reading. The
// literal is local wall-clock time and the offset is how far local is ahead
// of UTC, so the absolute instant is local minus offset.
// `2025-04-17 08:21:24.838 +02:00` resolves to `2025-04-17 06:21:24.838Z`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// chrono format for the header date-time literal (millisecond precision).
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Resolve a date-time literal and a signed `HH:MM` zone offset into a UTC
/// instant. Returns `None` if either component is malformed or the local
/// time does not exist under the offset (impossible calendar dates).
pub fn resolve(datetime: &str, offset: &str) -> Option<DateTime<Utc>> {
    let local = NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT).ok()?;
    let zone = parse_offset(offset)?;
    local
        .and_local_timezone(zone)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a signed `HH:MM` offset into a `FixedOffset`.
///
/// Accepts exactly the grammar's shape: a mandatory `+` or `-`, two hour
/// digits, a colon, two minute digits. Out-of-range components (minutes > 59
/// or a magnitude of a full day or more) are rejected.
fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let bytes = offset.as_bytes();
    if bytes.len() != 6 || !offset.is_ascii() || bytes[3] != b':' {
        return None;
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours: i32 = offset[1..3].parse().ok()?;
    let minutes: i32 = offset[4..6].parse().ok()?;
    if minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Positive offsets subtract: local 08:21 at +02:00 is 06:21 UTC.
    #[test]
    fn test_resolve_positive_offset() {
        let ts = resolve("2025-04-17 08:21:24.838", "+02:00").unwrap();
        assert_eq!(
            ts,
            Utc.with_ymd_and_hms(2025, 4, 17, 6, 21, 24).unwrap()
                + chrono::Duration::milliseconds(838)
        );
    }

    /// Negative offsets add: local 08:00 at -05:00 is 13:00 UTC.
    #[test]
    fn test_resolve_negative_offset() {
        let ts = resolve("2025-04-17 08:00:00.000", "-05:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 4, 17, 13, 0, 0).unwrap());
    }

    /// The same instant written under two different offsets compares equal.
    #[test]
    fn test_resolve_cross_offset_equality() {
        let a = resolve("2025-04-17 08:21:24.838", "+02:00").unwrap();
        let b = resolve("2025-04-17 06:21:24.838", "+00:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_zero_offset() {
        let ts = resolve("2025-04-17 06:21:24.000", "+00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 4, 17, 6, 21, 24).unwrap());
    }

    #[test]
    fn test_resolve_half_hour_offset() {
        // +05:30 (India): 12:00 local is 06:30 UTC.
        let ts = resolve("2025-04-17 12:00:00.000", "+05:30").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 4, 17, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_resolve_malformed_datetime() {
        assert!(resolve("not-a-date", "+02:00").is_none());
        assert!(resolve("2025-02-30 08:00:00.000", "+02:00").is_none()); // impossible date
        assert!(resolve("2025-04-17 25:00:00.000", "+02:00").is_none()); // impossible hour
    }

    #[test]
    fn test_resolve_malformed_offset() {
        assert!(resolve("2025-04-17 08:00:00.000", "02:00").is_none()); // missing sign
        assert!(resolve("2025-04-17 08:00:00.000", "+2:00").is_none()); // short hours
        assert!(resolve("2025-04-17 08:00:00.000", "+02-00").is_none()); // wrong separator
        assert!(resolve("2025-04-17 08:00:00.000", "+02:75").is_none()); // minutes out of range
        assert!(resolve("2025-04-17 08:00:00.000", "+24:00").is_none()); // a full day
    }
}
