use crate::core::dataset::Dataset;
use crate::domain::record::QueryParams;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;

/// Schedules are published in San Francisco local time, independent of
/// the machine's clock settings.
pub const SF_TZ: Tz = chrono_tz::US::Pacific;

/// Mobile food facility schedule published on DataSF
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileFoodSchedule;

impl MobileFoodSchedule {
    pub const SERVER: &'static str = "data.sfgov.org";
    pub const DATASET_NAME: &'static str = "mobile_food_schedule";
    pub const DATASET_ID: &'static str = "jjew-r69b";
    pub const DATASET_ALIAS: &'static str = "mfs";
    pub const WIDTH: usize = 200;
    pub const FIELDS: [&'static str; 2] = ["applicant", "location"];
    pub const HEADERS: [&'static str; 2] = ["NAME", "ADDRESS"];

    pub fn new() -> Self {
        Self
    }

    /// Current day (0 = Sunday) and `HH:MM` time in San Francisco
    pub fn current_day_and_time() -> (u8, String) {
        Self::day_and_time_at(Utc::now())
    }

    /// Day (0 = Sunday) and `HH:MM` time in San Francisco at `instant`
    pub fn day_and_time_at<Z: TimeZone>(instant: DateTime<Z>) -> (u8, String) {
        let local = instant.with_timezone(&SF_TZ);
        let day = local.weekday().num_days_from_sunday() as u8;
        (day, local.format("%H:%M").to_string())
    }
}

impl Dataset for MobileFoodSchedule {
    fn name(&self) -> &'static str {
        Self::DATASET_NAME
    }

    fn alias(&self) -> &'static str {
        Self::DATASET_ALIAS
    }

    fn dataset_id(&self) -> &'static str {
        Self::DATASET_ID
    }

    fn host(&self) -> &'static str {
        Self::SERVER
    }

    fn description(&self) -> &'static str {
        "Food trucks open at a given day and time"
    }

    fn fields(&self) -> &'static [&'static str] {
        &Self::FIELDS
    }

    fn headers(&self) -> &'static [&'static str] {
        &Self::HEADERS
    }

    fn width(&self) -> usize {
        Self::WIDTH
    }

    fn resolve_defaults(&self, day: Option<u8>, time: Option<String>) -> (u8, String) {
        match (day, time) {
            (Some(day), Some(time)) => (day, time),
            (day, time) => {
                let (today, now) = Self::current_day_and_time();
                (day.unwrap_or(today), time.unwrap_or(now))
            }
        }
    }

    // Values are interpolated without escaping; day and time are validated
    // when the command line is parsed.
    fn build_query(&self, params: &QueryParams) -> String {
        format!(
            "SELECT {} WHERE (dayorder={} AND start24<='{}' AND end24 > '{}') \
             ORDER BY applicant LIMIT {} OFFSET {}",
            Self::FIELDS.join(", "),
            params.day,
            params.time,
            params.time,
            params.page_size,
            params.page_offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DataSfError;
    use crate::domain::record::Record;
    use chrono::NaiveDate;

    fn params(day: u8, time: &str, page_size: u32, page_offset: u64) -> QueryParams {
        QueryParams {
            day,
            time: time.to_string(),
            page_size,
            page_offset,
        }
    }

    #[test]
    fn test_build_query() {
        let query = MobileFoodSchedule.build_query(&params(3, "12:30", 10, 20));
        assert_eq!(
            query,
            "SELECT applicant, location WHERE (dayorder=3 AND start24<='12:30' AND end24 > '12:30') \
             ORDER BY applicant LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_day_and_time_sunday() {
        // 2024-06-09 is a Sunday; 19:05 UTC is 12:05 PDT
        let instant = NaiveDate::from_ymd_opt(2024, 6, 9)
            .unwrap()
            .and_hms_opt(19, 5, 0)
            .unwrap()
            .and_utc();
        assert_eq!(
            MobileFoodSchedule::day_and_time_at(instant),
            (0, "12:05".to_string())
        );
    }

    #[test]
    fn test_day_and_time_crosses_midnight() {
        // Sunday 2024-01-07 03:30 UTC is Saturday 19:30 PST
        let instant = NaiveDate::from_ymd_opt(2024, 1, 7)
            .unwrap()
            .and_hms_opt(3, 30, 0)
            .unwrap()
            .and_utc();
        assert_eq!(
            MobileFoodSchedule::day_and_time_at(instant),
            (6, "19:30".to_string())
        );
    }

    #[test]
    fn test_day_and_time_from_other_zone() {
        // Monday 09:00 in Berlin (CEST) is Monday 00:00 in San Francisco
        let instant = chrono_tz::Europe::Berlin
            .with_ymd_and_hms(2024, 6, 10, 9, 0, 0)
            .unwrap();
        assert_eq!(
            MobileFoodSchedule::day_and_time_at(instant),
            (1, "00:00".to_string())
        );
    }

    #[test]
    fn test_resolve_defaults_keeps_explicit_values() {
        let resolved = MobileFoodSchedule.resolve_defaults(Some(4), Some("08:15".to_string()));
        assert_eq!(resolved, (4, "08:15".to_string()));
    }

    #[test]
    fn test_resolve_defaults_fills_missing() {
        let (day, time) = MobileFoodSchedule.resolve_defaults(None, Some("08:15".to_string()));
        assert!(day <= 6);
        assert_eq!(time, "08:15");

        let (day, time) = MobileFoodSchedule.resolve_defaults(Some(2), None);
        assert_eq!(day, 2);
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    }

    #[test]
    fn test_format_page_none() {
        assert_eq!(MobileFoodSchedule.format_page(None).unwrap(), None);
    }

    #[test]
    fn test_format_page_columns() {
        let records = vec![
            Record::from_pairs([("applicant", "Taco Co"), ("location", "Market St")]),
            Record::from_pairs([("applicant", "Bao Bros"), ("location", "Mission St")]),
        ];
        let text = MobileFoodSchedule
            .format_page(Some(records.as_slice()))
            .unwrap()
            .unwrap();
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line.chars().count(), 200);
        }
        assert_eq!(lines[0][..100].trim_end(), "Taco Co");
        assert_eq!(lines[0][100..].trim_end(), "Market St");
        assert!(lines[0].starts_with("Taco Co "));
        assert_eq!(lines[1][..100].trim_end(), "Bao Bros");
        assert_eq!(lines[1][100..].trim_end(), "Mission St");
    }

    #[test]
    fn test_format_page_empty() {
        assert_eq!(
            MobileFoodSchedule.format_page(Some(&[][..])).unwrap(),
            Some(String::new())
        );
    }

    #[test]
    fn test_format_page_long_value_not_truncated() {
        let long_name = "X".repeat(120);
        let records = vec![Record::from_pairs([
            ("applicant", long_name.as_str()),
            ("location", "Pier 39"),
        ])];
        let text = MobileFoodSchedule
            .format_page(Some(records.as_slice()))
            .unwrap()
            .unwrap();
        assert!(text.starts_with(&long_name));
        assert!(text.contains("XPier 39"));
    }

    #[test]
    fn test_format_page_missing_field() {
        let records = vec![
            Record::from_pairs([("applicant", "Taco Co"), ("location", "Market St")]),
            Record::from_pairs([("applicant", "No Address")]),
        ];
        let err = MobileFoodSchedule.format_page(Some(records.as_slice())).unwrap_err();
        match err {
            DataSfError::MalformedRecord { index, field } => {
                assert_eq!(index, 1);
                assert_eq!(field, "location");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_format_header() {
        let header = MobileFoodSchedule.format_header().unwrap();
        assert_eq!(header.len(), 200);
        assert_eq!(header[..100].trim_end(), "NAME");
        assert_eq!(header[100..].trim_end(), "ADDRESS");
    }
}
