use chrono::{DateTime, LocalResult, TimeZone, Utc};

/// Convert unix seconds into a UTC timestamp.
///
/// Zero is treated as "no data" and maps to `None`, matching how the store
/// reports `min()`/`max()` over empty tables.
pub fn unix_to_utc(ts: u64) -> Option<DateTime<Utc>> {
    if ts == 0 {
        return None;
    }
    match Utc.timestamp_opt(i64::try_from(ts).ok()?, 0) {
        LocalResult::Single(dt) => Some(dt),
        _ => None,
    }
}

/// Format unix seconds as an RFC 3339 string.
pub fn unix_to_rfc3339(ts: u64) -> Option<String> {
    unix_to_utc(ts).map(|dt| dt.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_none() {
        assert_eq!(unix_to_utc(0), None);
        assert_eq!(unix_to_rfc3339(0), None);
    }

    #[test]
    fn formats_rfc3339() {
        assert_eq!(unix_to_rfc3339(1_666_742_400).as_deref(), Some("2022-10-26T00:00:00+00:00"));
    }

    #[test]
    fn out_of_range_is_none() {
        assert_eq!(unix_to_utc(u64::MAX), None);
    }
}
