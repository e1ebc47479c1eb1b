use chrono::{Datelike, NaiveDate};

/// Calendar attributes of a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateDimension {
    pub date: NaiveDate,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub quarter: i32,
    /// ISO-8601 week number
    pub week_number: i32,
    /// 1 = Monday .. 7 = Sunday
    pub day_number_of_week: i32,
    pub day_of_year: i32,
    pub leap_year: bool,
    /// ISO-8601 week numbering year, differs from `year` around new year
    pub week_numbering_year: i32,
    /// Midnight UTC as a unix timestamp
    pub unix_time: i64,
}

impl DateDimension {
    pub fn from_date(date: NaiveDate) -> Self {
        let iso_week = date.iso_week();
        let month = date.month() as i32;

        Self {
            date,
            year: date.year(),
            month,
            day: date.day() as i32,
            quarter: (month - 1) / 3 + 1,
            week_number: iso_week.week() as i32,
            day_number_of_week: date.weekday().number_from_monday() as i32,
            day_of_year: date.ordinal() as i32,
            leap_year: date.leap_year(),
            week_numbering_year: iso_week.year(),
            unix_time: date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_calendar_attributes() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let dimension = DateDimension::from_date(date);

        assert_eq!(dimension.year, 2024);
        assert_eq!(dimension.month, 2);
        assert_eq!(dimension.day, 29);
        assert_eq!(dimension.quarter, 1);
        assert_eq!(dimension.week_number, 9);
        assert_eq!(dimension.day_number_of_week, 4);
        assert_eq!(dimension.day_of_year, 60);
        assert!(dimension.leap_year);
        assert_eq!(dimension.week_numbering_year, 2024);
        assert_eq!(dimension.unix_time, 1_709_164_800);
    }

    #[test]
    fn week_numbering_year_differs_at_year_boundary() {
        // Sunday 1 January 2023 belongs to ISO week 52 of 2022
        let dimension = DateDimension::from_date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());

        assert_eq!(dimension.year, 2023);
        assert_eq!(dimension.week_number, 52);
        assert_eq!(dimension.week_numbering_year, 2022);
        assert_eq!(dimension.day_number_of_week, 7);
        assert!(!dimension.leap_year);
    }
}
