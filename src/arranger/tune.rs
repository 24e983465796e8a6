// Tunes - Melody lines given as named notes with beat timing
// Accepts the analysis service's JSON note list as well as direct input

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::midi::events::{note_span, push_note, NoteEvent};
use crate::theory::{is_rest, resolve_note_name};

/// Attack and release velocities for tune notes
const TUNE_ON_VELOCITY: u8 = 100;
const TUNE_OFF_VELOCITY: u8 = 64;

/// Errors that can occur while reading a tune
#[derive(Debug, Error)]
pub enum TuneError {
    #[error("Invalid tune JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tune contains no notes")]
    Empty,
}

/// One melody note: scientific pitch name (or "rest") with beat timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedNote {
    /// Note name, e.g. "C4", "F#5", or "rest"
    #[serde(alias = "note")]
    pub pitch: String,

    /// Start time in beats from the beginning of the tune
    #[serde(alias = "time")]
    pub start_beat: f64,

    /// Length in beats
    #[serde(alias = "duration")]
    pub duration_beat: f64,
}

impl TimedNote {
    pub fn new(pitch: impl Into<String>, start_beat: f64, duration_beat: f64) -> Self {
        TimedNote {
            pitch: pitch.into(),
            start_beat,
            duration_beat,
        }
    }

    fn has_valid_timing(&self) -> bool {
        self.start_beat.is_finite()
            && self.start_beat >= 0.0
            && self.duration_beat.is_finite()
            && self.duration_beat > 0.0
    }
}

/// Parse a JSON array of tune notes.
/// Both `{pitch, startBeat, durationBeat}` and `{note, time, duration}` keys are accepted.
pub fn parse_tune_json(json: &str) -> Result<Vec<TimedNote>, TuneError> {
    let notes: Vec<TimedNote> = serde_json::from_str(json.trim())?;
    if notes.is_empty() {
        return Err(TuneError::Empty);
    }
    Ok(notes)
}

/// Turn tune notes into note events.
///
/// Rests, unresolvable names and notes with unusable timing (including
/// positions too late to fit in a track) are dropped; they never shift the
/// notes around them.
pub fn tune_events(notes: &[TimedNote], ticks_per_beat: u16) -> Vec<NoteEvent> {
    let mut events = Vec::with_capacity(notes.len() * 2);

    for note in notes {
        let Some(midi_note) = resolve_note_name(&note.pitch) else {
            if !is_rest(&note.pitch) {
                log::debug!("Dropping unrecognized note name '{}'", note.pitch);
            }
            continue;
        };

        let span = note
            .has_valid_timing()
            .then(|| note_span(note.start_beat, note.duration_beat, ticks_per_beat))
            .flatten();

        let Some((start, end)) = span else {
            log::warn!(
                "Dropping note '{}' with start {} and duration {}",
                note.pitch,
                note.start_beat,
                note.duration_beat
            );
            continue;
        };

        push_note(&mut events, midi_note, start, end, TUNE_ON_VELOCITY, TUNE_OFF_VELOCITY);
    }

    events
}
