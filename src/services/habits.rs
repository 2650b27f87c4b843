use serde::Serialize;
use uuid::Uuid;

use crate::calendar::{month_span, CalendarWindow};
use crate::error::AppResult;
use crate::models::habit::Habit;
use crate::store::Store;

/// One habit row of the tracker grid: completion flags aligned 1:1 with the
/// window's dates, plus goal progress.
#[derive(Debug, Serialize)]
pub struct HabitAggregate {
    pub id: Uuid,
    pub name: String,
    pub goal: i32,
    pub logs: Vec<bool>,
    pub achieved: i64,
}

/// Aggregates each habit against the window, preserving input order.
///
/// `achieved` is always the completion count across the full calendar month
/// containing the window's anchor — goal tracking is monthly, so a week or
/// year view still reports that month's progress, not the visible slice.
/// `achieved` may exceed `goal`; the comparison is display data only.
pub async fn aggregate(
    store: &dyn Store,
    owner: &str,
    habits: &[Habit],
    window: &CalendarWindow,
) -> AppResult<Vec<HabitAggregate>> {
    let month = month_span(window.anchor);

    let mut rows = Vec::with_capacity(habits.len());
    for habit in habits {
        let logs: Vec<bool> = store
            .log_entries(owner, habit.id, &window.dates)
            .await?
            .into_iter()
            .map(|(_, completed)| completed)
            .collect();

        let achieved = store
            .log_entries(owner, habit.id, &month)
            .await?
            .iter()
            .filter(|(_, completed)| *completed)
            .count() as i64;

        rows.push(HabitAggregate {
            id: habit.id,
            name: habit.name.clone(),
            goal: habit.goal,
            logs,
            achieved,
        });
    }
    Ok(rows)
}
