//! Reporting period — the previous 7 full days ending yesterday, in the
//! fixed local timezone, with URL-ready UTC filter forms.

use chrono::{DateTime, Days, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::{Europe, Tz};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::ReportError;

/// Fixed local timezone for the report (display dates, booking dates).
pub static LOCAL_TZ: Tz = Europe::Berlin;

/// Percent-encode everything except unreserved characters and `/`.
/// In the timestamp values this only touches `:` (→ `%3A`).
const FILTER_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

const FILTER_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// The computed reporting period. Immutable, one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Start date, `YYYY-MM-DD` local (for display and the CSV filename).
    pub start_date: String,
    /// End date, `YYYY-MM-DD` local.
    pub end_date: String,
    /// Start instant in UTC, percent-encoded for the query string.
    pub start_filter: String,
    /// End instant in UTC, percent-encoded for the query string.
    pub end_filter: String,
}

impl TimeWindow {
    /// Compute the window from wall-clock `now`: start is local midnight
    /// seven days back, end is yesterday at local 23:59:59.999999.
    pub fn compute(now: DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
            .expect("23:59:59.999999 is a valid wall-clock time");

        let start = local_at((today - Days::new(7)).and_time(NaiveTime::MIN));
        let end = local_at((today - Days::new(1)).and_time(end_of_day));

        TimeWindow {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            start_filter: encode_filter(&start),
            end_filter: encode_filter(&end),
        }
    }
}

/// Resolve a local wall-clock time in `LOCAL_TZ`. Midnight and end-of-day
/// never fall inside a Berlin DST transition (02:00–03:00).
fn local_at(naive: NaiveDateTime) -> DateTime<Tz> {
    LOCAL_TZ
        .from_local_datetime(&naive)
        .single()
        .expect("window bounds are unambiguous in Europe/Berlin")
}

fn encode_filter(local: &DateTime<Tz>) -> String {
    let utc = local.with_timezone(&Utc).format(FILTER_TIMESTAMP).to_string();
    utf8_percent_encode(&utc, FILTER_ENCODE).to_string()
}

/// Convert an API UTC timestamp (`YYYY-MM-DDTHH:MM:SS.ffffffZ`) to the
/// local `YYYY-MM-DD HH:MM:SS` form used in summary lines and booking dates.
pub fn to_local(timestamp: &str) -> Result<String, ReportError> {
    let naive = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.fZ")
        .map_err(|_| ReportError::DateParse { value: timestamp.to_string() })?;
    let local = Utc.from_utc_datetime(&naive).with_timezone(&LOCAL_TZ);
    Ok(local.format("%Y-%m-%d %H:%M:%S").to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Tz> {
        LOCAL_TZ.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn summer_window() {
        // Berlin is UTC+2 across the whole window
        let w = TimeWindow::compute(at(2026, 8, 30, 10, 0, 0));
        assert_eq!(w.start_date, "2026-08-23");
        assert_eq!(w.end_date, "2026-08-29");
        assert_eq!(w.start_filter, "2026-08-22T22%3A00%3A00.000000Z");
        assert_eq!(w.end_filter, "2026-08-29T21%3A59%3A59.999999Z");
    }

    #[test]
    fn winter_window() {
        // Berlin is UTC+1 across the whole window
        let w = TimeWindow::compute(at(2026, 1, 15, 8, 30, 0));
        assert_eq!(w.start_date, "2026-01-08");
        assert_eq!(w.end_date, "2026-01-14");
        assert_eq!(w.start_filter, "2026-01-07T23%3A00%3A00.000000Z");
        assert_eq!(w.end_filter, "2026-01-14T22%3A59%3A59.999999Z");
    }

    #[test]
    fn window_straddles_dst_start() {
        // DST began 2026-03-29 02:00 in Berlin: start is CET (+1),
        // end is CEST (+2), so the UTC offsets differ inside one window.
        let w = TimeWindow::compute(at(2026, 4, 1, 12, 0, 0));
        assert_eq!(w.start_date, "2026-03-25");
        assert_eq!(w.end_date, "2026-03-31");
        assert_eq!(w.start_filter, "2026-03-24T23%3A00%3A00.000000Z");
        assert_eq!(w.end_filter, "2026-03-31T21%3A59%3A59.999999Z");
    }

    #[test]
    fn filters_roundtrip_through_percent_decoding() {
        let w = TimeWindow::compute(at(2026, 8, 30, 10, 0, 0));
        for filter in [&w.start_filter, &w.end_filter] {
            let decoded = percent_decode_str(filter).decode_utf8().unwrap();
            // Decoded form parses back with the same format
            assert!(NaiveDateTime::parse_from_str(&decoded, FILTER_TIMESTAMP).is_ok());
            assert!(!decoded.contains('%'));
        }
    }

    #[test]
    fn window_length_is_constant() {
        // Wall-clock length is 6 days 23:59:59.999999. With a fixed UTC
        // offset that equals the absolute length; a DST-straddling window
        // is an hour shorter in UTC (covered by window_straddles_dst_start).
        for now in [at(2026, 8, 30, 10, 0, 0), at(2026, 1, 15, 8, 30, 0)] {
            let w = TimeWindow::compute(now);
            let parse = |filter: &str| {
                let decoded = percent_decode_str(filter).decode_utf8().unwrap();
                NaiveDateTime::parse_from_str(&decoded, FILTER_TIMESTAMP).unwrap()
            };
            let length = parse(&w.end_filter) - parse(&w.start_filter);
            // 6 days 23:59:59.999999, measured in absolute (UTC) time
            assert_eq!(length.num_microseconds().unwrap(), 604_799_999_999);
        }
    }

    #[test]
    fn to_local_converts_from_utc() {
        // Summer: +2
        assert_eq!(
            to_local("2026-08-14T10:06:38.000Z").unwrap(),
            "2026-08-14 12:06:38",
        );
        // Winter: +1
        assert_eq!(
            to_local("2026-01-14T23:30:00.000Z").unwrap(),
            "2026-01-15 00:30:00",
        );
        // Fractional seconds optional
        assert_eq!(
            to_local("2026-08-14T10:06:38Z").unwrap(),
            "2026-08-14 12:06:38",
        );
    }

    #[test]
    fn to_local_rejects_garbage() {
        let err = to_local("yesterday").unwrap_err();
        assert_eq!(err, ReportError::DateParse { value: "yesterday".into() });
    }
}
