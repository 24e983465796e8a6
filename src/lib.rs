// Chordsmith - Chord text and melodies to Standard MIDI Files
// Module declarations

pub mod arranger;
pub mod commands;
pub mod midi;
pub mod pipeline;
pub mod theory;

pub use arranger::{MoodCategory, RhythmPattern, TimedNote};
pub use midi::{MidiExportOptions, OptionsError, Tempo};
pub use pipeline::{
    generate_chord_midi, generate_sample_midi, generate_tune_midi, render_sample, MidiArtifact,
    ProgressionSheet,
};
pub use theory::transpose;
