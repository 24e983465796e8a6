// MIDI Encoding - Note events, delta sequencing, VLQ and file assembly
// Output is always a single-track Type 0 file

pub mod events;
pub mod sequencer;
pub mod tempo;
pub mod vlq;
pub mod writer;

pub use events::{DeltaEvent, NoteEvent, NoteKind};
pub use sequencer::sequence;
pub use tempo::{Tempo, TempoError};
pub use writer::{assemble, MidiExportOptions, OptionsError, Track};
