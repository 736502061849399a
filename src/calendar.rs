use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One slot of the month grid. Blanks serialize as `null`, days as their number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Blank,
    Day(u32),
}

#[derive(Debug, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<Cell>,
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}

/// Sunday-first weekday index (0..=6) of the first day of `reference`'s month.
pub fn first_weekday(reference: NaiveDate) -> u32 {
    month_start(reference).weekday().num_days_from_sunday()
}

/// Leading blanks for the weekdays before day 1, then one cell per day.
pub fn grid(reference: NaiveDate) -> Vec<Cell> {
    let blanks = first_weekday(reference);
    let days = days_in_month(reference.year(), reference.month());

    let mut cells = Vec::with_capacity((blanks + days) as usize);
    cells.extend((0..blanks).map(|_| Cell::Blank));
    cells.extend((1..=days).map(Cell::Day));
    cells
}

pub fn month_grid(reference: NaiveDate) -> MonthGrid {
    MonthGrid {
        year: reference.year(),
        month: reference.month(),
        label: month_label(reference),
        weekdays: WEEKDAYS,
        cells: grid(reference),
    }
}

pub fn month_label(reference: NaiveDate) -> String {
    reference.format("%B %Y").to_string()
}

/// First day of the month `offset` whole months away. Out-of-range targets
/// leave the month where it was.
pub fn change_month(reference: NaiveDate, offset: i32) -> NaiveDate {
    let start = month_start(reference);
    let months = Months::new(offset.unsigned_abs());
    let moved = if offset >= 0 {
        start.checked_add_months(months)
    } else {
        start.checked_sub_months(months)
    };
    moved.unwrap_or(start)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[derive(Debug, Clone)]
pub struct CalendarView {
    displayed_month: NaiveDate,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            displayed_month: month_start(today),
        }
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn change_month(&mut self, offset: i32) -> MonthGrid {
        self.displayed_month = change_month(self.displayed_month, offset);
        self.grid()
    }

    pub fn grid(&self) -> MonthGrid {
        month_grid(self.displayed_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn thirty_day_month_starting_wednesday() {
        // April 2026 starts on a Wednesday.
        let reference = date(2026, 4, 17);
        assert_eq!(first_weekday(reference), 3);

        let cells = grid(reference);
        assert_eq!(cells.len(), 33);
        assert!(cells[..3].iter().all(|cell| *cell == Cell::Blank));
        assert_eq!(cells[3], Cell::Day(1));
        assert_eq!(cells[32], Cell::Day(30));
    }

    #[test]
    fn sunday_start_has_no_blanks() {
        // February 2026 starts on a Sunday and fills exactly four weeks.
        let cells = grid(date(2026, 2, 10));
        assert_eq!(cells.len(), 28);
        assert_eq!(cells[0], Cell::Day(1));
    }

    #[test]
    fn february_follows_gregorian_leap_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn change_month_rolls_over_years() {
        assert_eq!(change_month(date(2025, 12, 31), 1), date(2026, 1, 1));
        assert_eq!(change_month(date(2026, 1, 31), -1), date(2025, 12, 1));
        assert_eq!(change_month(date(2026, 1, 31), 1), date(2026, 2, 1));
    }

    #[test]
    fn twelve_steps_forward_lands_on_same_month_next_year() {
        for (year, month, day) in [(2024, 1, 31), (2025, 2, 28), (2026, 10, 18), (1999, 12, 1)] {
            let mut view = CalendarView::new(date(year, month, day));
            for _ in 0..12 {
                view.change_month(1);
            }
            assert_eq!(view.displayed_month(), date(year + 1, month, 1));
        }
    }

    #[test]
    fn month_grid_labels_and_serializes_blanks_as_null() {
        let grid = month_grid(date(2026, 4, 1));
        assert_eq!(grid.label, "April 2026");
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["cells"][0], serde_json::Value::Null);
        assert_eq!(json["cells"][3], serde_json::json!(1));
        assert_eq!(json["weekdays"][0], "Sun");
    }
}
