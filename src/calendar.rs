use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Granularity of a calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Lenient query-string parse. Unknown values fall back to the week
    /// view, matching the tracker's default rather than rejecting.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "month" => Period::Month,
            "year" => Period::Year,
            _ => Period::Week,
        }
    }
}

/// A contiguous, ordered run of calendar dates selected by period and
/// anchor. Windows are transient: rebuilt on every request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarWindow {
    pub period: Period,
    pub anchor: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub label: String,
}

impl CalendarWindow {
    pub fn build(period: Period, anchor: NaiveDate) -> Self {
        let (start, end) = match period {
            Period::Week => {
                let start = monday_of(anchor);
                (start, start + Days::new(6))
            }
            Period::Month => {
                let start = first_of_month(anchor);
                (start, last_of_month(anchor))
            }
            Period::Year => (
                ymd(anchor.year(), 1, 1),
                ymd(anchor.year(), 12, 31),
            ),
        };

        let dates = date_run(start, end);
        let label = match period {
            Period::Week => format!("{} - {}", short_label(start), short_label(end)),
            Period::Month => start.format("%B %Y").to_string(),
            Period::Year => start.format("%Y").to_string(),
        };

        CalendarWindow {
            period,
            anchor,
            dates,
            label,
        }
    }

    /// Rebuild the window one period unit forward (+1) or back (-1).
    ///
    /// Month and year moves operate on the window start rather than the raw
    /// anchor day-of-month, so a Jan 31 anchor steps Jan -> Feb -> Mar
    /// without skipping February.
    pub fn shift(&self, direction: i32) -> Self {
        debug_assert!(direction == 1 || direction == -1);
        let next_anchor = match self.period {
            Period::Week => {
                if direction >= 0 {
                    self.anchor + Days::new(7)
                } else {
                    self.anchor - Days::new(7)
                }
            }
            Period::Month => {
                let first = first_of_month(self.anchor);
                if direction >= 0 {
                    first + Months::new(1)
                } else {
                    first - Months::new(1)
                }
            }
            Period::Year => ymd(self.anchor.year() + direction, 1, 1),
        };
        CalendarWindow::build(self.period, next_anchor)
    }
}

/// Every date of the calendar month containing `anchor`. Achieved counts
/// are always taken over this span, whatever window is on display.
pub fn month_span(anchor: NaiveDate) -> Vec<NaiveDate> {
    date_run(first_of_month(anchor), last_of_month(anchor))
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.weekday().num_days_from_monday() as u64)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    ymd(date.year(), date.month(), 1)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Months::new(1) - Days::new(1)
}

fn date_run(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

fn short_label(date: NaiveDate) -> String {
    // "Mar 3" rather than "Mar 03"
    format!("{} {}", date.format("%b"), date.day())
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Only called with components we produced ourselves
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
