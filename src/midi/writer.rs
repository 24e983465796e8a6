// MIDI Export - Assemble note events into a Standard MIDI File (format 0)
// Produces a single-track file: tempo meta event, note events, end of track

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::events::{DeltaEvent, NoteEvent};
use super::sequencer::sequence;
use super::tempo::Tempo;
use super::vlq;

/// Header chunk magic
const HEADER_MAGIC: &[u8; 4] = b"MThd";

/// Track chunk magic
const TRACK_MAGIC: &[u8; 4] = b"MTrk";

/// Tempo meta event prefix: delta 0, meta marker, type 0x51, length 3
const TEMPO_PREFIX: [u8; 4] = [0x00, 0xFF, 0x51, 0x03];

/// End of track: delta 1, meta marker, type 0x2F, length 0
const END_OF_TRACK: [u8; 4] = [0x01, 0xFF, 0x2F, 0x00];

/// Largest metrical division; the top bit of the field selects SMPTE timing
const MAX_TICKS_PER_BEAT: u16 = 0x7FFF;

/// Rejected export options
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("Ticks per beat must be between 1 and 32767, got {0}")]
    TicksPerBeat(u16),

    #[error("Beats per bar must be at least 1")]
    BeatsPerBar,
}

/// MIDI export options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MidiExportOptions {
    /// Pulses per quarter note (PPQ)
    pub ticks_per_beat: u16,

    /// Beats each chord occupies (one chord per bar, 4/4)
    pub beats_per_bar: u32,

    /// Octave used to voice chords (`pitch class + 12 * octave`)
    pub chord_octave: i32,

    /// Octave used for bass notes in the syncopated pattern
    pub bass_octave: i32,
}

impl MidiExportOptions {
    /// Check the options before any tick math, so the header division and the
    /// event positions always agree
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.ticks_per_beat == 0 || self.ticks_per_beat > MAX_TICKS_PER_BEAT {
            return Err(OptionsError::TicksPerBeat(self.ticks_per_beat));
        }
        if self.beats_per_bar == 0 {
            return Err(OptionsError::BeatsPerBar);
        }
        Ok(())
    }
}

impl Default for MidiExportOptions {
    fn default() -> Self {
        MidiExportOptions {
            ticks_per_beat: 480,
            beats_per_bar: 4,
            chord_octave: 4,
            bass_octave: 2,
        }
    }
}

/// A single sequenced track, ready to serialize
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    events: Vec<DeltaEvent>,
    tempo: Tempo,
    ticks_per_beat: u16,
}

impl Track {
    /// Sequence absolute-tick events into a track
    pub fn new(events: Vec<NoteEvent>, tempo: Tempo, ticks_per_beat: u16) -> Self {
        Track {
            events: sequence(events),
            tempo,
            ticks_per_beat,
        }
    }

    pub fn events(&self) -> &[DeltaEvent] {
        &self.events
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn ticks_per_beat(&self) -> u16 {
        self.ticks_per_beat
    }

    /// Serialize header and track chunks
    pub fn to_bytes(&self) -> Vec<u8> {
        assemble(&self.events, self.tempo, self.ticks_per_beat)
    }
}

/// Build the complete MIDI file bytes for a delta-encoded event stream
pub fn assemble(events: &[DeltaEvent], tempo: Tempo, ticks_per_beat: u16) -> Vec<u8> {
    // 14 header bytes + 8 chunk header + 7 tempo + 4 per event (typical) + 4 end of track
    let mut bytes = Vec::with_capacity(33 + events.len() * 4);

    write_header(&mut bytes, ticks_per_beat);
    write_track(&mut bytes, events, tempo);

    bytes
}

/// Write the fixed 14-byte header chunk: format 0, one track
fn write_header(bytes: &mut Vec<u8>, ticks_per_beat: u16) {
    let division = ticks_per_beat.min(MAX_TICKS_PER_BEAT);

    bytes.extend_from_slice(HEADER_MAGIC);
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes());
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&division.to_be_bytes());
}

/// Write the track chunk, back-patching its length once the body is known
fn write_track(bytes: &mut Vec<u8>, events: &[DeltaEvent], tempo: Tempo) {
    bytes.extend_from_slice(TRACK_MAGIC);
    let length_at = bytes.len();
    bytes.extend_from_slice(&[0; 4]);
    let body_start = bytes.len();

    bytes.extend_from_slice(&TEMPO_PREFIX);
    bytes.extend_from_slice(&tempo.to_be_bytes());

    for event in events {
        vlq::write(event.delta, bytes);
        bytes.extend_from_slice(&event.message_bytes());
    }

    bytes.extend_from_slice(&END_OF_TRACK);

    let length = (bytes.len() - body_start) as u32;
    bytes[length_at..body_start].copy_from_slice(&length.to_be_bytes());
}
