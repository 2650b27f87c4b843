use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::habit::Habit;
use crate::models::mood::MoodEntry;
use crate::store::Store;

/// Weekly summary combining recent mood volume with the habits currently
/// being tracked.
#[derive(Debug, Serialize)]
pub struct WeeklyInsight {
    pub summary: String,
    pub mood_entries_analyzed: usize,
    pub habits_tracked: Vec<String>,
}

/// Per-day slice of the trailing week: that day's mood (if logged) and the
/// habits completed on it.
#[derive(Debug, Serialize)]
pub struct DailyInsight {
    pub date: NaiveDate,
    pub mood: Option<String>,
    pub habits: Vec<String>,
}

/// Builds the weekly insight for `today`. The clock is a parameter so the
/// trailing window is testable; zero mood entries in the window is a valid
/// result, not an error.
pub fn weekly_insight(moods: &[MoodEntry], habits: &[Habit], today: NaiveDate) -> WeeklyInsight {
    let week_ago = today - Days::new(7);
    let mood_entries_analyzed = moods.iter().filter(|m| m.date >= week_ago).count();
    let habits_tracked: Vec<String> = habits.iter().map(|h| h.name.clone()).collect();

    let summary = format!(
        "You logged {} mood {} over the past 7 days while tracking {} {}.",
        mood_entries_analyzed,
        plural(mood_entries_analyzed, "entry", "entries"),
        habits_tracked.len(),
        plural(habits_tracked.len(), "habit", "habits"),
    );

    WeeklyInsight {
        summary,
        mood_entries_analyzed,
        habits_tracked,
    }
}

/// The trailing 7 days (oldest first), each with its mood entry and the
/// names of habits completed that day.
pub async fn raw_insight_data(
    store: &dyn Store,
    owner: &str,
    today: NaiveDate,
) -> AppResult<Vec<DailyInsight>> {
    let days: Vec<NaiveDate> = (0..7)
        .rev()
        .map(|offset| today - Days::new(offset))
        .collect();

    let mood_by_date: HashMap<NaiveDate, String> = store
        .list_moods(owner)
        .await?
        .into_iter()
        .map(|m| (m.date, m.mood))
        .collect();

    let habits = store.list_habits(owner).await?;
    let mut completed: HashMap<NaiveDate, Vec<String>> = HashMap::new();
    for habit in &habits {
        for (date, done) in store.log_entries(owner, habit.id, &days).await? {
            if done {
                completed.entry(date).or_default().push(habit.name.clone());
            }
        }
    }

    Ok(days
        .into_iter()
        .map(|date| DailyInsight {
            date,
            mood: mood_by_date.get(&date).cloned(),
            habits: completed.remove(&date).unwrap_or_default(),
        })
        .collect())
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
