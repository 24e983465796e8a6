// Generation pipeline module
// Chord text, sheets and tunes in; finished MIDI artifacts out

pub mod artifact;
pub mod generate;
pub mod sheet;

pub use artifact::{calculate_sha256, ArtifactError, MidiArtifact, MIDI_MIME_TYPE};
pub use generate::{
    generate_chord_midi, generate_chord_midi_with_options, generate_sample_midi,
    generate_sample_midi_with_options, generate_tune_midi, generate_tune_midi_with_options,
};
pub use sheet::{render_sample, ProgressionSheet, SheetError};
