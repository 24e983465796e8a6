// MIDI Note Events - Absolute-tick and delta-time note instructions
// Channel 1 only; every note-on is paired with a note-off

use midly::num::u7;

/// Note-on / note-off tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    On,
    Off,
}

impl NoteKind {
    /// Channel voice status byte on channel 1
    pub fn status_byte(&self) -> u8 {
        match self {
            NoteKind::On => 0x90,
            NoteKind::Off => 0x80,
        }
    }
}

/// A note instruction at an absolute tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    /// Absolute time in ticks from the start of the track
    pub tick: u32,
    pub kind: NoteKind,
    pub note: u7,
    pub velocity: u7,
}

impl NoteEvent {
    pub fn on(tick: u32, note: u7, velocity: u8) -> Self {
        NoteEvent {
            tick,
            kind: NoteKind::On,
            note,
            velocity: u7::new(velocity),
        }
    }

    pub fn off(tick: u32, note: u7, velocity: u8) -> Self {
        NoteEvent {
            tick,
            kind: NoteKind::Off,
            note,
            velocity: u7::new(velocity),
        }
    }
}

/// A note instruction positioned relative to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaEvent {
    /// Ticks since the previous event in the track
    pub delta: u32,
    pub kind: NoteKind,
    pub note: u7,
    pub velocity: u7,
}

impl DeltaEvent {
    /// The three channel-message bytes (status, note, velocity)
    pub fn message_bytes(&self) -> [u8; 3] {
        [
            self.kind.status_byte(),
            u8::from(self.note),
            u8::from(self.velocity),
        ]
    }
}

/// Push a note-on / note-off pair.
/// Pairs are kept adjacent so equal-tick ordering stays reproducible.
pub fn push_note(
    events: &mut Vec<NoteEvent>,
    note: u7,
    start_tick: u32,
    end_tick: u32,
    on_velocity: u8,
    off_velocity: u8,
) {
    events.push(NoteEvent::on(start_tick, note, on_velocity));
    events.push(NoteEvent::off(end_tick, note, off_velocity));
}

/// Largest absolute tick written to a track; keeps every delta within the
/// 28 bits a variable-length quantity may carry
pub const MAX_TICK: u32 = 0x0FFF_FFFF;

/// Convert a position in beats to ticks, rounding to the nearest tick.
/// `None` when the result is negative, not finite, or past `MAX_TICK`.
pub fn beats_to_ticks(beats: f64, ticks_per_beat: u16) -> Option<u32> {
    let ticks = (beats * f64::from(ticks_per_beat)).round();
    if ticks.is_finite() && (0.0..=f64::from(MAX_TICK)).contains(&ticks) {
        Some(ticks as u32)
    } else {
        None
    }
}

/// Start and end ticks of a note starting at `start_beats` and lasting `length_beats`
pub fn note_span(
    start_beats: f64,
    length_beats: f64,
    ticks_per_beat: u16,
) -> Option<(u32, u32)> {
    let start = beats_to_ticks(start_beats, ticks_per_beat)?;
    let end = start.checked_add(beats_to_ticks(length_beats, ticks_per_beat)?)?;
    (end <= MAX_TICK).then_some((start, end))
}
