// Progression Sheets - Chord sheets with scale, tempo, mood and genre headers
// The text format returned by the chord-suggestion service, transposed on read

use serde::Serialize;
use thiserror::Error;

use super::artifact::MidiArtifact;
use super::generate::generate_sample_midi;
use crate::midi::{Tempo, TempoError};
use crate::theory::transpose;

const SCALE_PREFIX: &str = "scale:";
const BPM_PREFIX: &str = "bpm:";
const MOOD_PREFIX: &str = "mood:";
const GENRE_PREFIX: &str = "genre:";

const HEADER_PREFIXES: [&str; 4] = [SCALE_PREFIX, BPM_PREFIX, MOOD_PREFIX, GENRE_PREFIX];

/// Errors that can occur when rendering a sheet
#[derive(Debug, Error, PartialEq)]
pub enum SheetError {
    #[error("Progression sheet has no BPM")]
    MissingBpm,

    #[error("Progression sheet has no genre")]
    MissingGenre,

    #[error("Progression sheet has no mood")]
    MissingMood,

    #[error(transparent)]
    Tempo(#[from] TempoError),
}

/// A parsed chord sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressionSheet {
    /// Scale name, transposed along with the chords
    pub scale: Option<String>,
    pub bpm: Option<u32>,
    pub mood: Option<String>,
    pub genre: Option<String>,
    /// Every non-header line, transposed
    pub chords: String,
    /// The scale header as written, shown when it names no scale
    #[serde(skip)]
    scale_line: Option<String>,
}

impl ProgressionSheet {
    /// Parse sheet text and transpose it by `semitones`.
    ///
    /// Header lines are recognized by a case-insensitive prefix; when a header
    /// repeats, the first one wins and the rest are still kept out of the chords.
    pub fn parse(text: &str, semitones: i32) -> Self {
        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let find = |prefix: &str| lines.iter().copied().find(|line| has_prefix(line, prefix));

        let scale_line = find(SCALE_PREFIX);
        let scale = scale_line
            .map(|line| line[SCALE_PREFIX.len()..].trim())
            .filter(|scale| !scale.is_empty())
            .map(|scale| transpose(scale, semitones));

        let bpm = find(BPM_PREFIX).and_then(|line| field_value(line)).and_then(leading_bpm);
        let mood = find(MOOD_PREFIX).and_then(field_value).map(str::to_string);
        let genre = find(GENRE_PREFIX).and_then(field_value).map(str::to_string);

        let chord_lines: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| !HEADER_PREFIXES.iter().any(|prefix| has_prefix(line, prefix)))
            .collect();
        let chords = transpose(&chord_lines.join("\n"), semitones);

        ProgressionSheet {
            scale,
            bpm,
            mood,
            genre,
            chords,
            scale_line: scale_line.map(str::to_string),
        }
    }

    /// Scale line for display; a blank scale header is shown as written
    pub fn display_scale(&self) -> String {
        match (&self.scale, &self.scale_line) {
            (Some(scale), _) => format!("Scale: {}", scale),
            (None, Some(line)) => line.clone(),
            (None, None) => "Scale: Not found".to_string(),
        }
    }
}

/// Render a sheet's chords as the sample MIDI for its tempo, genre and mood
pub fn render_sample(sheet: &ProgressionSheet) -> Result<MidiArtifact, SheetError> {
    let bpm = sheet.bpm.ok_or(SheetError::MissingBpm)?;
    let genre = sheet.genre.as_deref().ok_or(SheetError::MissingGenre)?;
    let mood = sheet.mood.as_deref().ok_or(SheetError::MissingMood)?;

    let tempo = Tempo::from_bpm(f64::from(bpm))?;
    Ok(generate_sample_midi(&sheet.chords, tempo, genre, mood))
}

fn has_prefix(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Trimmed text between the first and second ':'; `None` when blank
fn field_value(line: &str) -> Option<&str> {
    line.split(':')
        .nth(1)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Leading integer of a BPM field ("92 (moderate)" -> 92); only positive values count
fn leading_bpm(value: &str) -> Option<u32> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<u32>() {
        Ok(0) | Err(_) => {
            log::debug!("Ignoring BPM value '{}'", value);
            None
        }
        Ok(bpm) => Some(bpm),
    }
}
