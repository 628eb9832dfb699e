use chrono::{DateTime, Datelike, Days, FixedOffset, Local, TimeZone};

pub const DAYS_IN_RANGE: u64 = 6;
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Source of "now" for the date calculation.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<FixedOffset>,
{
    fn now(&self) -> DateTime<FixedOffset> {
        self()
    }
}

/// Monday to Saturday of the week starting on the first Monday at or after
/// `now`, formatted as `YYYYMMDD`. The date is taken in `now`'s own timezone.
pub fn week_range<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<String> {
    let today = now.date_naive();
    let days_to_monday = (7 - today.weekday().num_days_from_monday()) % 7;
    let monday = today + Days::new(days_to_monday as u64);

    (0..DAYS_IN_RANGE)
        .map(|i| (monday + Days::new(i)).format(DATE_FORMAT).to_string())
        .collect()
}

pub fn next_week_dates(clock: &impl Clock) -> Vec<String> {
    week_range(&clock.now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc, Weekday};
    use test_case::test_case;

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap().fixed_offset()
    }

    fn parse(day: &str) -> NaiveDate {
        NaiveDate::parse_from_str(day, DATE_FORMAT).unwrap()
    }

    #[test]
    fn saturday_rolls_to_next_week() {
        let clock = FixedClock(at(2024, 6, 22));
        assert_eq!(
            next_week_dates(&clock),
            vec!["20240624", "20240625", "20240626", "20240627", "20240628", "20240629"]
        );
    }

    #[test]
    fn monday_stays_put() {
        let dates = week_range(&at(2024, 6, 24));
        assert_eq!(dates[0], "20240624");
    }

    #[test]
    fn closures_are_clocks() {
        let clock = || at(2024, 6, 23);
        assert_eq!(next_week_dates(&clock)[0], "20240624");
    }

    #[test]
    fn timezone_of_now_decides_the_day() {
        // Sunday 23:30 UTC is already Monday in UTC+2.
        let late_sunday = Utc.with_ymd_and_hms(2024, 6, 23, 23, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(week_range(&late_sunday)[0], "20240624");
        assert_eq!(week_range(&late_sunday.with_timezone(&plus_two))[0], "20240624");

        let sunday_noon = Utc.with_ymd_and_hms(2024, 6, 23, 12, 0, 0).unwrap();
        let minus_thirteen = FixedOffset::west_opt(13 * 3600).unwrap();
        // 23:00 Saturday in UTC-13, still rolls forward to the 24th.
        assert_eq!(week_range(&sunday_noon.with_timezone(&minus_thirteen))[0], "20240624");
    }

    #[test_case(2024, 6, 17 ; "monday")]
    #[test_case(2024, 6, 19 ; "wednesday")]
    #[test_case(2024, 6, 23 ; "sunday")]
    #[test_case(2024, 12, 29 ; "across new year")]
    #[test_case(2024, 2, 27 ; "across leap day")]
    #[test_case(2023, 2, 27 ; "across february end")]
    fn six_consecutive_days_from_monday(y: i32, m: u32, d: u32) {
        let dates = week_range(&at(y, m, d));
        assert_eq!(dates.len(), DAYS_IN_RANGE as usize);

        let days: Vec<NaiveDate> = dates.iter().map(|s| parse(s)).collect();
        assert_eq!(days[0].weekday(), Weekday::Mon);
        assert!(days[0] >= NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert!(days[0] - NaiveDate::from_ymd_opt(y, m, d).unwrap() < chrono::Duration::days(7));
        for pair in days.windows(2) {
            assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }
        assert_eq!(days[5].weekday(), Weekday::Sat);
    }

    #[test]
    fn year_boundary_dates() {
        assert_eq!(
            week_range(&at(2024, 12, 29)),
            vec!["20241230", "20241231", "20250101", "20250102", "20250103", "20250104"]
        );
    }

    #[test]
    fn formatted_monday_parses_back() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 24).unwrap();
        let formatted = monday.format(DATE_FORMAT).to_string();
        assert_eq!(parse(&formatted), monday);
    }
}
