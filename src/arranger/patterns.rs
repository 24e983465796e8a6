// Rhythm Patterns - Keyword-driven choice of accompaniment style
// Mood keywords win over genre; anything unmatched plays block chords

use serde::{Deserialize, Serialize};

/// Moods that call for broken chords
const ARPEGGIO_MOODS: [&str; 5] = ["sad", "melancholic", "romantic", "pensive", "somber"];

/// Genres that call for the syncopated pattern (exact match)
const SYNCOPATED_GENRES: [&str; 2] = ["pop", "rock"];

/// Moods that call for the syncopated pattern
const SYNCOPATED_MOODS: [&str; 4] = ["happy", "energetic", "motivational", "upbeat"];

/// Accompaniment style for a chord progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmPattern {
    /// Arpeggio - root, third, fifth, third as quarter notes
    /// Ballads and slower, reflective moods
    Arpeggio,

    /// Syncopated - sustained bass plus off-beat chord stabs
    /// Pop/rock and upbeat moods
    Syncopated,

    /// Block - whole chord held for the bar
    Block,
}

impl RhythmPattern {
    /// Pick a pattern from free-text genre and mood labels (case-insensitive).
    ///
    /// Mood keywords are substring matches ("very sad" counts as sad);
    /// genres must equal "pop" or "rock".
    pub fn select(genre: &str, mood: &str) -> Self {
        let mood = mood.to_lowercase();
        let genre = genre.to_lowercase();

        if ARPEGGIO_MOODS.iter().any(|m| mood.contains(m)) {
            RhythmPattern::Arpeggio
        } else if SYNCOPATED_GENRES.contains(&genre.as_str())
            || SYNCOPATED_MOODS.iter().any(|m| mood.contains(m))
        {
            RhythmPattern::Syncopated
        } else {
            RhythmPattern::Block
        }
    }

    /// Convert from string representation
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "arpeggio" => RhythmPattern::Arpeggio,
            "syncopated" => RhythmPattern::Syncopated,
            "block" => RhythmPattern::Block,
            _ => RhythmPattern::Block, // Default
        }
    }

    /// String representation, matching the serde names
    pub fn as_str(&self) -> &'static str {
        match self {
            RhythmPattern::Arpeggio => "arpeggio",
            RhythmPattern::Syncopated => "syncopated",
            RhythmPattern::Block => "block",
        }
    }
}
