// Host Commands
// Serde-facing entry points for an embedding app; every error becomes a message
use serde::{Deserialize, Serialize};

use crate::arranger::{parse_tune_json, MoodCategory, RhythmPattern, TimedNote, TuneError};
use crate::midi::{MidiExportOptions, Tempo};
use crate::pipeline::{self, MidiArtifact, ProgressionSheet};
use crate::theory;

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E: std::fmt::Display> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

type CommandResult<T> = Result<T, CommandError>;

// ==================== TRANSPOSE COMMANDS ====================

#[derive(Debug, Deserialize)]
pub struct TransposeInput {
    pub text: String,
    pub semitones: i32,
}

/// Shift every chord in the text, re-spelled with sharps
pub fn transpose_command(input: TransposeInput) -> CommandResult<String> {
    Ok(theory::transpose(&input.text, input.semitones))
}

// ==================== MIDI COMMANDS ====================

#[derive(Debug, Deserialize)]
pub struct ChordMidiInput {
    pub text: String,
    pub options: Option<MidiExportOptions>,
}

/// Chord text as block chords at 120 BPM
pub fn chord_midi_command(input: ChordMidiInput) -> CommandResult<MidiArtifact> {
    let options = input.options.unwrap_or_default();
    let artifact = pipeline::generate_chord_midi_with_options(&input.text, &options)?;
    Ok(artifact)
}

#[derive(Debug, Deserialize)]
pub struct SampleMidiInput {
    pub text: String,
    pub bpm: f64,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub mood: String,
    /// Force "arpeggio", "syncopated" or "block" instead of picking from genre and mood
    pub pattern: Option<String>,
    pub ppq: Option<u16>,
}

/// Chord text in the rhythm pattern that fits the genre and mood
pub fn sample_midi_command(input: SampleMidiInput) -> CommandResult<MidiArtifact> {
    let tempo = Tempo::from_bpm(input.bpm)?;

    let pattern = match input.pattern.as_deref() {
        Some(name) => RhythmPattern::from_string(name),
        None => RhythmPattern::select(&input.genre, &input.mood),
    };

    let mut options = MidiExportOptions::default();
    if let Some(ppq) = input.ppq {
        options.ticks_per_beat = ppq;
    }

    let artifact =
        pipeline::generate_sample_midi_with_options(&input.text, tempo, pattern, &options)?;
    Ok(artifact)
}

#[derive(Debug, Deserialize)]
pub struct TuneMidiInput {
    /// Notes given directly
    pub notes: Option<Vec<TimedNote>>,
    /// Notes as the JSON text returned by the melody service
    pub notes_json: Option<String>,
    pub bpm: f64,
}

/// Melody notes as a single-voice MIDI file
pub fn tune_midi_command(input: TuneMidiInput) -> CommandResult<MidiArtifact> {
    let tempo = Tempo::from_bpm(input.bpm)?;

    let notes = match (input.notes, input.notes_json) {
        (Some(notes), _) => notes,
        (None, Some(json)) => parse_tune_json(&json).map_err(|e| CommandError {
            message: format!("Failed to read tune: {}", e),
        })?,
        (None, None) => return Err(CommandError::from(TuneError::Empty)),
    };

    Ok(pipeline::generate_tune_midi(&notes, tempo))
}

// ==================== SHEET COMMANDS ====================

#[derive(Debug, Deserialize)]
pub struct SheetInput {
    pub text: String,
    #[serde(default)]
    pub semitones: i32,
}

/// A parsed sheet plus the derived values a host displays
#[derive(Debug, Serialize)]
pub struct SheetSummary {
    #[serde(flatten)]
    pub sheet: ProgressionSheet,
    pub display_scale: String,
    pub mood_category: Option<MoodCategory>,
}

pub fn parse_sheet_command(input: SheetInput) -> CommandResult<SheetSummary> {
    let sheet = ProgressionSheet::parse(&input.text, input.semitones);
    let mood_category = sheet.mood.as_deref().and_then(MoodCategory::from_mood);

    Ok(SheetSummary {
        display_scale: sheet.display_scale(),
        mood_category,
        sheet,
    })
}

/// Sample MIDI straight from sheet text, using its own BPM, genre and mood
pub fn sheet_midi_command(input: SheetInput) -> CommandResult<MidiArtifact> {
    let sheet = ProgressionSheet::parse(&input.text, input.semitones);
    let artifact = pipeline::render_sample(&sheet)?;
    Ok(artifact)
}

// ==================== MOOD COMMANDS ====================

/// Display label for a free-text mood; `None` when no mood was chosen
pub fn mood_category_command(mood: String) -> CommandResult<Option<String>> {
    Ok(MoodCategory::from_mood(&mood).map(|category| category.label().to_string()))
}

/// Display label for a detected emotion
pub fn emotion_category_command(emotion: String) -> CommandResult<String> {
    Ok(MoodCategory::from_emotion(&emotion).label().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transpose_command() {
        let input: TransposeInput =
            serde_json::from_value(json!({"text": "C G Am F", "semitones": 2})).unwrap();
        assert_eq!(transpose_command(input).unwrap(), "D A Bm G");
    }

    #[test]
    fn test_chord_midi_command() {
        let input: ChordMidiInput =
            serde_json::from_value(json!({"text": "C - G - Am - F"})).unwrap();
        let artifact = chord_midi_command(input).unwrap();

        assert_eq!(artifact.len(), 133);
        assert_eq!(artifact.file_name, "chords.mid");
    }

    #[test]
    fn test_chord_midi_command_with_options() {
        let input: ChordMidiInput = serde_json::from_value(json!({
            "text": "C",
            "options": {"ticks_per_beat": 96}
        }))
        .unwrap();
        let artifact = chord_midi_command(input).unwrap();
        assert_eq!(&artifact.bytes[12..14], &[0x00, 0x60]);
    }

    #[test]
    fn test_division_out_of_range_is_reported() {
        for ppq in [0, 0xFFFF] {
            let input: SampleMidiInput =
                serde_json::from_value(json!({"text": "C G", "bpm": 120, "ppq": ppq})).unwrap();
            let error = sample_midi_command(input).unwrap_err();
            assert!(error.message().starts_with("Ticks per beat must be between 1 and 32767"));
        }

        let input: ChordMidiInput = serde_json::from_value(json!({
            "text": "C G",
            "options": {"ticks_per_beat": 0}
        }))
        .unwrap();
        assert_eq!(
            chord_midi_command(input).unwrap_err().message(),
            "Ticks per beat must be between 1 and 32767, got 0"
        );
    }

    #[test]
    fn test_sample_midi_command() {
        let input: SampleMidiInput = serde_json::from_value(json!({
            "text": "Am F C G",
            "bpm": 90,
            "genre": "pop",
            "mood": "sad"
        }))
        .unwrap();
        let artifact = sample_midi_command(input).unwrap();
        assert_eq!(artifact.file_name, "chord_sample.mid");

        // Forcing block chords gives the same file as an unmatched genre and mood
        let forced: SampleMidiInput = serde_json::from_value(json!({
            "text": "Am F C G",
            "bpm": 90,
            "pattern": "block"
        }))
        .unwrap();
        let plain: SampleMidiInput =
            serde_json::from_value(json!({"text": "Am F C G", "bpm": 90})).unwrap();
        assert_eq!(
            sample_midi_command(forced).unwrap(),
            sample_midi_command(plain).unwrap()
        );
    }

    #[test]
    fn test_invalid_bpm_is_reported() {
        let input: SampleMidiInput =
            serde_json::from_value(json!({"text": "C", "bpm": 0})).unwrap();
        let error = sample_midi_command(input).unwrap_err();
        assert!(error.message().contains("BPM"));
    }

    #[test]
    fn test_tune_midi_command_from_list() {
        let input: TuneMidiInput = serde_json::from_value(json!({
            "notes": [{"pitch": "C4", "startBeat": 0, "durationBeat": 1}],
            "bpm": 120
        }))
        .unwrap();
        let artifact = tune_midi_command(input).unwrap();

        assert_eq!(artifact.file_name, "tune.mid");
        // one note pair on top of the empty track
        assert_eq!(artifact.len(), 33 + 9);
    }

    #[test]
    fn test_tune_midi_command_from_json() {
        let input = TuneMidiInput {
            notes: None,
            notes_json: Some(r#"[{"note": "rest", "time": 0, "duration": 2}]"#.to_string()),
            bpm: 120.0,
        };
        assert_eq!(tune_midi_command(input).unwrap().len(), 33);

        let broken = TuneMidiInput {
            notes: None,
            notes_json: Some("[{".to_string()),
            bpm: 120.0,
        };
        let error = tune_midi_command(broken).unwrap_err();
        assert!(error.message().starts_with("Failed to read tune"));

        let missing = TuneMidiInput {
            notes: None,
            notes_json: None,
            bpm: 120.0,
        };
        assert_eq!(tune_midi_command(missing).unwrap_err().message(), "Tune contains no notes");
    }

    #[test]
    fn test_parse_sheet_command() {
        let input: SheetInput = serde_json::from_value(json!({
            "text": "Scale: C major\nBPM: 110\nMood: Upbeat\nGenre: Funk\nC Am F G",
            "semitones": -1
        }))
        .unwrap();
        let summary = parse_sheet_command(input).unwrap();

        assert_eq!(summary.display_scale, "Scale: B major");
        assert_eq!(summary.sheet.chords, "B G#m E F#");
        assert_eq!(summary.mood_category, Some(MoodCategory::MotivationalEnergetic));

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["bpm"], 110);
        assert_eq!(value["mood_category"], "motivational_energetic");
    }

    #[test]
    fn test_sheet_midi_command() {
        let ok: SheetInput = serde_json::from_value(json!({
            "text": "BPM: 120\nMood: calm\nGenre: jazz\nC G"
        }))
        .unwrap();
        assert_eq!(sheet_midi_command(ok).unwrap().file_name, "chord_sample.mid");

        let missing: SheetInput =
            serde_json::from_value(json!({"text": "Mood: calm\nGenre: jazz\nC G"})).unwrap();
        assert_eq!(
            sheet_midi_command(missing).unwrap_err().message(),
            "Progression sheet has no BPM"
        );
    }

    #[test]
    fn test_mood_commands() {
        assert_eq!(
            mood_category_command("Heartbroken".to_string()).unwrap(),
            Some("Sad".to_string())
        );
        assert_eq!(mood_category_command("N/A".to_string()).unwrap(), None);
        assert_eq!(emotion_category_command("joy".to_string()).unwrap(), "Romantic / Happy");
    }
}
