use chrono::{Datelike, NaiveDate, Weekday};

use std::collections::{BTreeMap, BTreeSet};

use crate::ISO_FORMAT_DATE;

use super::{error::CalendarError, status::BusinessStatus};

/// Holidays of a single year, kept both as a set for status lookups and
/// grouped by two-digit month key for the listing endpoints.
#[derive(Debug)]
struct YearCalendar {
    holidays: BTreeSet<NaiveDate>,
    months: BTreeMap<String, Vec<String>>,
}

/// The Calendar Year Table.
///
/// Built once at startup and only read afterwards. Every lookup is a pure
/// function of its arguments, so the table can be shared behind an `Arc` by
/// any number of connections.
#[derive(Debug, Default)]
pub struct CalendarTable {
    years: BTreeMap<String, YearCalendar>,
}

impl CalendarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the holidays of `year`, given as `YYYY-MM-DD` strings.
    ///
    /// Fails if an entry does not parse or belongs to another year. Adding a
    /// year twice merges the two lists.
    pub fn add_year(&mut self, year: i32, holidays: &[&str]) -> Result<(), CalendarError> {
        let mut dates = BTreeSet::new();
        for holiday in holidays {
            let date = NaiveDate::parse_from_str(holiday, ISO_FORMAT_DATE).map_err(|err| {
                CalendarError::InvalidTable(format!("'{}' is not a date: {}", holiday, err))
            })?;
            if date.year() != year {
                return Err(CalendarError::InvalidTable(format!(
                    "'{}' listed under year {}",
                    holiday, year
                )));
            }
            dates.insert(date);
        }

        let calendar = self
            .years
            .entry(year.to_string())
            .or_insert_with(|| YearCalendar {
                holidays: BTreeSet::new(),
                months: BTreeMap::new(),
            });
        calendar.holidays.extend(dates);

        // Rebuild so that merged lists stay ordered
        calendar.months.clear();
        for date in &calendar.holidays {
            calendar
                .months
                .entry(format!("{:02}", date.month()))
                .or_default()
                .push(date.format(ISO_FORMAT_DATE).to_string());
        }
        Ok(())
    }

    /// Business status of a date.
    ///
    /// The triple is validated first, so Feb 30 or month 13 is an
    /// `InvalidDate` even for years the table does not cover.
    pub fn status(&self, year: i32, month: u32, day: u32) -> Result<BusinessStatus, CalendarError> {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            return Err(CalendarError::InvalidDate(format!(
                "{}-{}-{} is not a valid date",
                year, month, day
            )));
        };

        let Some(calendar) = self.years.get(&year.to_string()) else {
            return Ok(BusinessStatus::Undefined);
        };

        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Ok(BusinessStatus::Closed);
        }
        if calendar.holidays.contains(&date) {
            return Ok(BusinessStatus::Closed);
        }
        Ok(BusinessStatus::Open)
    }

    /// Holidays of one month, in date order.
    pub fn holidays_for_month(&self, year: &str, month: &str) -> Result<&[String], CalendarError> {
        let calendar = self.year(year)?;
        match calendar.months.get(month) {
            Some(holidays) => Ok(holidays.as_slice()),
            None => Err(CalendarError::NotFound(format!(
                "No holiday data available for month {} in year {}",
                month, year
            ))),
        }
    }

    /// Holidays of a whole year keyed by two-digit month.
    pub fn holidays_for_year(&self, year: &str) -> Result<&BTreeMap<String, Vec<String>>, CalendarError> {
        Ok(&self.year(year)?.months)
    }

    fn year(&self, year: &str) -> Result<&YearCalendar, CalendarError> {
        self.years.get(year).ok_or_else(|| {
            CalendarError::NotFound(format!("No holiday data available for year {}", year))
        })
    }
}
