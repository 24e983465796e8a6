// Arranger - Pattern-driven accompaniment and melody layout
// Converts chord progressions and tunes into absolute-tick note events

pub mod mood;
pub mod patterns;
pub mod rhythm;
pub mod tune;

// Re-export main types
pub use mood::MoodCategory;
pub use patterns::RhythmPattern;
pub use rhythm::synthesize;
pub use tune::{parse_tune_json, tune_events, TimedNote, TuneError};
