// MIDI Generation - Entry points from chord text or tunes to finished files
// Each call builds a fresh track and hands back an in-memory artifact

use super::artifact::MidiArtifact;
use crate::arranger::{synthesize, tune_events, RhythmPattern, TimedNote};
use crate::midi::{MidiExportOptions, NoteEvent, OptionsError, Tempo, Track};
use crate::theory::scan_chords;

/// File names handed to hosts for download
pub const CHORD_FILE_NAME: &str = "chords.mid";
pub const SAMPLE_FILE_NAME: &str = "chord_sample.mid";
pub const TUNE_FILE_NAME: &str = "tune.mid";

/// Chord text as held block chords at 120 BPM
pub fn generate_chord_midi(text: &str) -> MidiArtifact {
    render_chords(
        text,
        Tempo::default(),
        RhythmPattern::Block,
        &MidiExportOptions::default(),
        CHORD_FILE_NAME,
    )
}

pub fn generate_chord_midi_with_options(
    text: &str,
    options: &MidiExportOptions,
) -> Result<MidiArtifact, OptionsError> {
    options.validate()?;
    Ok(render_chords(
        text,
        Tempo::default(),
        RhythmPattern::Block,
        options,
        CHORD_FILE_NAME,
    ))
}

/// Chord text rendered in the pattern that fits the genre and mood
pub fn generate_sample_midi(text: &str, tempo: Tempo, genre: &str, mood: &str) -> MidiArtifact {
    let pattern = RhythmPattern::select(genre, mood);
    log::debug!("Genre '{}' / mood '{}' -> {} pattern", genre, mood, pattern.as_str());
    render_chords(text, tempo, pattern, &MidiExportOptions::default(), SAMPLE_FILE_NAME)
}

pub fn generate_sample_midi_with_options(
    text: &str,
    tempo: Tempo,
    pattern: RhythmPattern,
    options: &MidiExportOptions,
) -> Result<MidiArtifact, OptionsError> {
    options.validate()?;
    Ok(render_chords(text, tempo, pattern, options, SAMPLE_FILE_NAME))
}

/// Melody notes as a single-voice track
pub fn generate_tune_midi(notes: &[TimedNote], tempo: Tempo) -> MidiArtifact {
    render_tune(notes, tempo, &MidiExportOptions::default())
}

pub fn generate_tune_midi_with_options(
    notes: &[TimedNote],
    tempo: Tempo,
    options: &MidiExportOptions,
) -> Result<MidiArtifact, OptionsError> {
    options.validate()?;
    Ok(render_tune(notes, tempo, options))
}

fn render_chords(
    text: &str,
    tempo: Tempo,
    pattern: RhythmPattern,
    options: &MidiExportOptions,
    file_name: &str,
) -> MidiArtifact {
    let chords = scan_chords(text);
    let events = synthesize(&chords, pattern, options);
    finish(events, tempo, options, file_name)
}

fn render_tune(notes: &[TimedNote], tempo: Tempo, options: &MidiExportOptions) -> MidiArtifact {
    let events = tune_events(notes, options.ticks_per_beat);
    finish(events, tempo, options, TUNE_FILE_NAME)
}

fn finish(
    events: Vec<NoteEvent>,
    tempo: Tempo,
    options: &MidiExportOptions,
    file_name: &str,
) -> MidiArtifact {
    let track = Track::new(events, tempo, options.ticks_per_beat);
    let bytes = track.to_bytes();

    log::info!(
        "Generated {}: {} note events at {:.1} BPM, {} ticks per beat, {} bytes",
        file_name,
        track.events().len(),
        track.tempo().bpm(),
        track.ticks_per_beat(),
        bytes.len()
    );

    MidiArtifact::new(bytes, file_name)
}
