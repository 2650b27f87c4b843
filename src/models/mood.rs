use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three canonical mood kinds.
///
/// Entries are stored as their canonical lowercase string (see
/// [`Mood::as_str`]); parsing back through [`Mood::parse`] is the only
/// string-to-enum path, so anything malformed in storage is simply dropped
/// by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sad,
    Neutral,
    Happy,
}

impl Mood {
    /// Scan order for the most-frequent reduction. Ties resolve to the
    /// first kind reaching the maximum count in this order.
    pub const TIEBREAK_ORDER: [Mood; 3] = [Mood::Sad, Mood::Neutral, Mood::Happy];

    /// Case-insensitive parse of a stored or submitted mood value.
    pub fn parse(s: &str) -> Option<Mood> {
        match s.to_ascii_lowercase().as_str() {
            "sad" => Some(Mood::Sad),
            "neutral" => Some(Mood::Neutral),
            "happy" => Some(Mood::Happy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
        }
    }

    /// Ordinal used by the trend chart: sad=1, neutral=2, happy=3.
    pub fn level(&self) -> u8 {
        match self {
            Mood::Sad => 1,
            Mood::Neutral => 2,
            Mood::Happy => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Sad => "😢 Sad",
            Mood::Neutral => "😐 Neutral",
            Mood::Happy => "😊 Happy",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub owner: String,
    pub date: NaiveDate,
    pub mood: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertMoodRequest {
    pub date: NaiveDate,
    pub mood: String,
    pub note: Option<String>,
}
