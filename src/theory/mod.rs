// Music Theory - Pitch lexicon, chord symbols, transposition and note names
// Pure functions over read-only tables; safe to call from any thread

pub mod chords;
pub mod note_name;
pub mod pitch;
pub mod transpose;

pub use chords::{scan_chords, tokenize, voice, ChordSymbol, ChordToken, Triad};
pub use note_name::{is_rest, resolve_note_name};
pub use pitch::{PitchClass, FLAT_NAMES, SHARP_NAMES};
pub use transpose::{transpose, transpose_symbol};
