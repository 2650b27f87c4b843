use chrono::NaiveDate;
use serde::Serialize;

use crate::models::mood::{Mood, MoodEntry};

/// One point of the recent-trend chart.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MoodTrendPoint {
    pub date: NaiveDate,
    pub mood_level: u8,
    pub mood: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MoodFrequency {
    pub sad: usize,
    pub neutral: usize,
    pub happy: usize,
}

impl MoodFrequency {
    fn get(&self, mood: Mood) -> usize {
        match mood {
            Mood::Sad => self.sad,
            Mood::Neutral => self.neutral,
            Mood::Happy => self.happy,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MostFrequentMood {
    pub mood: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MoodSummary {
    pub recent_trend: Vec<MoodTrendPoint>,
    pub frequency: MoodFrequency,
    pub most_frequent: MostFrequentMood,
}

/// Pure aggregation over a mood-entry sequence in storage order.
///
/// Entries whose mood value fails to parse are dropped from every derived
/// figure. The trend is the last 7 valid entries; the frequency covers the
/// whole valid set. Most-frequent ties resolve to the first kind reaching
/// the maximum in [`Mood::TIEBREAK_ORDER`].
pub fn aggregate_moods(entries: &[MoodEntry]) -> MoodSummary {
    let valid: Vec<(NaiveDate, Mood)> = entries
        .iter()
        .filter_map(|e| Mood::parse(&e.mood).map(|m| (e.date, m)))
        .collect();

    let recent_trend = valid[valid.len().saturating_sub(7)..]
        .iter()
        .map(|(date, mood)| MoodTrendPoint {
            date: *date,
            mood_level: mood.level(),
            mood: mood.label().to_string(),
        })
        .collect();

    let mut frequency = MoodFrequency {
        sad: 0,
        neutral: 0,
        happy: 0,
    };
    for (_, mood) in &valid {
        match mood {
            Mood::Sad => frequency.sad += 1,
            Mood::Neutral => frequency.neutral += 1,
            Mood::Happy => frequency.happy += 1,
        }
    }

    let mut best = Mood::TIEBREAK_ORDER[0];
    for kind in Mood::TIEBREAK_ORDER {
        if frequency.get(kind) > frequency.get(best) {
            best = kind;
        }
    }
    let most_frequent = MostFrequentMood {
        mood: best.label().to_string(),
        count: frequency.get(best),
    };

    MoodSummary {
        recent_trend,
        frequency,
        most_frequent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(day: u32, mood: &str) -> MoodEntry {
        MoodEntry {
            id: Uuid::new_v4(),
            owner: "default".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            mood: mood.into(),
            note: None,
        }
    }

    #[test]
    fn test_frequency_and_most_frequent() {
        let entries = vec![entry(1, "sad"), entry(2, "sad"), entry(3, "happy")];
        let summary = aggregate_moods(&entries);

        assert_eq!(
            summary.frequency,
            MoodFrequency {
                sad: 2,
                neutral: 0,
                happy: 1
            }
        );
        assert_eq!(
            summary.most_frequent,
            MostFrequentMood {
                mood: "😢 Sad".into(),
                count: 2
            }
        );
    }

    #[test]
    fn test_all_invalid_input_resolves_to_sad_without_error() {
        let entries = vec![entry(1, "ecstatic"), entry(2, ""), entry(3, "angry")];
        let summary = aggregate_moods(&entries);

        assert_eq!(
            summary.frequency,
            MoodFrequency {
                sad: 0,
                neutral: 0,
                happy: 0
            }
        );
        assert_eq!(summary.most_frequent.mood, "😢 Sad");
        assert_eq!(summary.most_frequent.count, 0);
        assert!(summary.recent_trend.is_empty());
    }

    #[test]
    fn test_tie_breaks_follow_fixed_order() {
        // neutral and happy tied: neutral precedes happy in the scan order.
        let entries = vec![entry(1, "neutral"), entry(2, "happy")];
        let summary = aggregate_moods(&entries);
        assert_eq!(summary.most_frequent.mood, "😐 Neutral");
        assert_eq!(summary.most_frequent.count, 1);
    }

    #[test]
    fn test_invalid_entries_are_excluded_everywhere() {
        let entries = vec![entry(1, "sad"), entry(2, "furious"), entry(3, "HAPPY")];
        let summary = aggregate_moods(&entries);

        assert_eq!(summary.frequency.sad, 1);
        assert_eq!(summary.frequency.happy, 1);
        assert_eq!(summary.recent_trend.len(), 2);
        assert_eq!(summary.recent_trend[1].mood_level, 3);
    }

    #[test]
    fn test_recent_trend_is_last_seven_in_storage_order() {
        let entries: Vec<MoodEntry> = (1..=10).map(|d| entry(d, "happy")).collect();
        let summary = aggregate_moods(&entries);

        assert_eq!(summary.recent_trend.len(), 7);
        assert_eq!(
            summary.recent_trend[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert_eq!(
            summary.recent_trend[6].date,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }
}
