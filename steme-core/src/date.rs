//! Calendar dates and month pages.

use std::fmt;

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{StemeError, StemeResult};

/// A calendar day with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        CalendarDate(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> StemeResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or_else(|| StemeError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Parse YYYY-MM-DD
    pub fn parse(s: &str) -> StemeResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(CalendarDate)
            .map_err(|_| StemeError::InvalidDate(s.to_string()))
    }

    /// Key used by the marked-dates map.
    pub fn iso_key(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn weekday_index(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month_page(&self) -> MonthPage {
        MonthPage {
            month: self.0.month(),
            year: self.0.year(),
        }
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iso_key())
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = StemeError;

    fn try_from(s: String) -> StemeResult<Self> {
        CalendarDate::parse(&s)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.iso_key()
    }
}

/// Wall-clock "today" in the local timezone.
pub fn today_local() -> CalendarDate {
    CalendarDate(Local::now().date_naive())
}

/// The month currently visible in the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthPage {
    month: u32,
    year: i32,
}

impl MonthPage {
    pub fn new(month: u32, year: i32) -> StemeResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(StemeError::InvalidMonth(month));
        }
        Ok(MonthPage { month, year })
    }

    /// Parse YYYY-MM
    pub fn parse(s: &str) -> StemeResult<Self> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| StemeError::InvalidDate(s.to_string()))?;
        let year = year
            .parse()
            .map_err(|_| StemeError::InvalidDate(s.to_string()))?;
        let month = month
            .parse()
            .map_err(|_| StemeError::InvalidDate(s.to_string()))?;
        MonthPage::new(month, year)
    }

    /// 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> CalendarDate {
        // month is validated at construction
        CalendarDate(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default())
    }

    pub fn next(&self) -> MonthPage {
        self.first_day()
            .0
            .checked_add_months(Months::new(1))
            .map_or(*self, |d| CalendarDate(d).month_page())
    }

    pub fn prev(&self) -> MonthPage {
        self.first_day()
            .0
            .checked_sub_months(Months::new(1))
            .map_or(*self, |d| CalendarDate(d).month_page())
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.month_page() == *self
    }

    /// Every day of this month, in order.
    pub fn days(self) -> impl Iterator<Item = CalendarDate> {
        let month = self.month;
        self.first_day()
            .0
            .iter_days()
            .take_while(move |d| d.month() == month)
            .map(CalendarDate)
    }
}

impl fmt::Display for MonthPage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
