use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Calendar-boundary helpers shared by the range calculator and renderers.
pub trait NaiveDateExt {
    /// Midnight at the start of this day.
    fn at_midnight(self) -> NaiveDateTime;
    /// Most recent day (possibly this one) falling on `week_start`.
    fn start_of_week(self, week_start: Weekday) -> NaiveDate;
    /// First day of this date's month.
    fn first_of_month(self) -> NaiveDate;
    /// First day of the following month (handles year rollover).
    fn first_of_next_month(self) -> NaiveDate;
}

impl NaiveDateExt for NaiveDate {
    fn at_midnight(self) -> NaiveDateTime {
        self.and_hms_opt(0, 0, 0)
            .unwrap_or_else(|| NaiveDateTime::from(self))
    }

    fn start_of_week(self, week_start: Weekday) -> NaiveDate {
        let back = (7 + self.weekday().num_days_from_sunday()
            - week_start.num_days_from_sunday())
            % 7;
        self - Duration::days(back as i64)
    }

    fn first_of_month(self) -> NaiveDate {
        self.with_day(1).unwrap_or(self)
    }

    fn first_of_next_month(self) -> NaiveDate {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(self)
    }
}
