use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};

/// Half-open UTC range `[start, end)` covering one calendar day under a
/// fixed offset. "Today's" ledger entry is the one whose `created_at` falls
/// inside the window containing now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The window of the calendar day containing `now`, where days roll over
    /// at local midnight under `offset`.
    pub fn containing(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let midnight = now.with_timezone(&offset).date_naive().and_time(NaiveTime::MIN);
        // Local midnight back to UTC: subtract the offset's eastward seconds.
        let start = (midnight - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc();
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_window_spans_one_utc_day_at_zero_offset() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let w = DayWindow::containing(utc("2025-03-14T13:45:00Z"), offset);
        assert_eq!(w.start, utc("2025-03-14T00:00:00Z"));
        assert_eq!(w.end, utc("2025-03-15T00:00:00Z"));
    }

    #[test]
    fn test_last_second_and_first_second_fall_in_different_windows() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let before = DayWindow::containing(utc("2025-03-14T23:59:59Z"), offset);
        let after = DayWindow::containing(utc("2025-03-15T00:00:01Z"), offset);

        assert_ne!(before, after);
        assert!(before.contains(utc("2025-03-14T23:59:59Z")));
        assert!(!before.contains(utc("2025-03-15T00:00:01Z")));
        assert!(after.contains(utc("2025-03-15T00:00:01Z")));
        assert_eq!(before.end, after.start);
    }

    #[test]
    fn test_positive_offset_shifts_the_boundary() {
        // 19:00 UTC on the 14th is already 00:30 on the 15th at +05:30.
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let w = DayWindow::containing(utc("2025-03-14T19:00:00Z"), offset);
        assert_eq!(w.start, utc("2025-03-14T18:30:00Z"));
        assert_eq!(w.end, utc("2025-03-15T18:30:00Z"));
    }

    #[test]
    fn test_negative_offset_shifts_the_boundary() {
        // 02:00 UTC on the 15th is still 18:00 on the 14th at -08:00.
        let offset = FixedOffset::west_opt(8 * 3600).unwrap();
        let w = DayWindow::containing(utc("2025-03-15T02:00:00Z"), offset);
        assert_eq!(w.start, utc("2025-03-14T08:00:00Z"));
        assert_eq!(w.end, utc("2025-03-15T08:00:00Z"));
    }

    #[test]
    fn test_window_boundaries_are_half_open() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let w = DayWindow::containing(utc("2025-03-14T12:00:00Z"), offset);
        assert!(w.contains(w.start));
        assert!(!w.contains(w.end));
    }
}
