// Mood Categories - Coarse buckets for free-text moods and detected emotions
// Used by hosts to group songs; independent of rhythm pattern selection

use serde::{Deserialize, Serialize};

/// Mood values that mean "no preference"
const UNSET_MOODS: [&str; 2] = ["N/A", "any"];

/// Keyword groups, checked in order; the first group with a substring hit wins
const MOOD_KEYWORDS: [(MoodCategory, &[&str]); 4] = [
    (
        MoodCategory::RomanticHappy,
        &["romantic", "happy", "joyful", "loving", "sweet", "cheerful"],
    ),
    (
        MoodCategory::MotivationalEnergetic,
        &["motivational", "energetic", "powerful", "upbeat", "inspirational", "epic"],
    ),
    (
        MoodCategory::LustDisgust,
        &["lust", "disgust", "dark", "intense", "angry", "seductive", "rebellious"],
    ),
    (
        MoodCategory::Sad,
        &["sad", "melancholic", "somber", "heartbroken", "gloomy", "pensive"],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodCategory {
    RomanticHappy,
    MotivationalEnergetic,
    LustDisgust,
    Sad,
    Others,
}

impl MoodCategory {
    /// Categorize a free-text mood. `None` when no mood was given.
    pub fn from_mood(mood: &str) -> Option<Self> {
        if mood.is_empty() || UNSET_MOODS.contains(&mood) {
            return None;
        }

        let mood = mood.to_lowercase();
        let category = MOOD_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| mood.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(MoodCategory::Others);

        Some(category)
    }

    /// Categorize an emotion label from a classifier (joy, anger, sadness, ...)
    pub fn from_emotion(emotion: &str) -> Self {
        match emotion.trim().to_lowercase().as_str() {
            "joy" => MoodCategory::RomanticHappy,
            "anger" | "surprise" | "fear" => MoodCategory::MotivationalEnergetic,
            "disgust" => MoodCategory::LustDisgust,
            "sadness" => MoodCategory::Sad,
            _ => MoodCategory::Others,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::RomanticHappy => "Romantic / Happy",
            MoodCategory::MotivationalEnergetic => "Motivational / Energetic",
            MoodCategory::LustDisgust => "Lust / Disgust",
            MoodCategory::Sad => "Sad",
            MoodCategory::Others => "Others",
        }
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
