use super::{error::CalendarError, table::CalendarTable};

pub const SUPPORTED_YEAR: i32 = 2025;

/// Days the Sanjo-Tsubame location is closed in 2025, on top of weekends.
/// Substitute holidays are listed explicitly.
const HOLIDAYS_2025: [&str; 20] = [
    "2025-01-01", // New Year's Day
    "2025-01-13", // Coming of Age Day
    "2025-02-11", // National Foundation Day
    "2025-02-23", // Emperor's Birthday
    "2025-02-24", // Emperor's Birthday, substitute
    "2025-03-21", // Vernal Equinox Day
    "2025-04-29", // Showa Day
    "2025-05-03", // Constitution Memorial Day
    "2025-05-04", // Greenery Day
    "2025-05-05", // Children's Day
    "2025-05-06", // Children's Day, substitute
    "2025-07-21", // Marine Day
    "2025-08-11", // Mountain Day
    "2025-09-15", // Respect for the Aged Day
    "2025-09-23", // Autumnal Equinox Day
    "2025-10-13", // Sports Day
    "2025-11-03", // Culture Day
    "2025-11-23", // Labour Thanksgiving Day
    "2025-11-24", // Labour Thanksgiving Day, substitute
    "2025-12-23",
];

/// Build the table served for the Sanjo-Tsubame location.
pub fn sanjo_tsubame_table() -> Result<CalendarTable, CalendarError> {
    let mut table = CalendarTable::new();
    table.add_year(SUPPORTED_YEAR, &HOLIDAYS_2025)?;
    Ok(table)
}
