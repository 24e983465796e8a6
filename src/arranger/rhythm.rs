// Rhythm Synthesis - Lays a chord progression out as timed note events
// One chord per bar; each pattern decides which tones sound and when

use midly::num::u7;

use super::patterns::RhythmPattern;
use crate::midi::events::{beats_to_ticks, note_span, push_note, NoteEvent};
use crate::midi::MidiExportOptions;
use crate::theory::ChordSymbol;

/// Release velocity used by every pattern
const OFF_VELOCITY: u8 = 64;

/// Block chords: attack velocity
const BLOCK_VELOCITY: u8 = 100;

/// Arpeggio: chord-tone indices per beat (root, third, fifth, third)
const ARPEGGIO_STEPS: [usize; 4] = [0, 1, 2, 1];

/// Arpeggio: first note velocity, rising by `ARPEGGIO_VELOCITY_STEP` per note
const ARPEGGIO_VELOCITY: u8 = 80;
const ARPEGGIO_VELOCITY_STEP: u8 = 5;

/// Arpeggio: each quarter note sounds for this fraction of a beat
const ARPEGGIO_GATE_BEATS: f64 = 0.9;

/// Syncopated: bass velocity
const BASS_VELOCITY: u8 = 100;

/// Syncopated: the bass releases this many ticks before the bar line
const BASS_RELEASE_TICKS: u32 = 1;

/// Syncopated: stab offsets within the bar, in beats
const STAB_BEATS: [f64; 3] = [1.5, 2.5, 3.5];

/// Syncopated: stab length in beats and velocity
const STAB_LENGTH_BEATS: f64 = 0.4;
const STAB_VELOCITY: u8 = 90;

/// Render a progression with the given pattern.
///
/// Chords whose root cannot be voiced still take up a bar, so later chords
/// stay on their bar lines.
pub fn synthesize(
    chords: &[ChordSymbol<'_>],
    pattern: RhythmPattern,
    options: &MidiExportOptions,
) -> Vec<NoteEvent> {
    let bar_beats = f64::from(options.beats_per_bar);
    let mut events = Vec::new();
    let mut bar_start = 0.0;

    for chord in chords {
        let tones = chord.voice(options.chord_octave);

        if tones.is_empty() {
            log::debug!("No voicing for '{}', leaving bar silent", chord.text);
        } else {
            let placed = match pattern {
                RhythmPattern::Arpeggio => arpeggiate(&mut events, &tones, bar_start, options),
                RhythmPattern::Syncopated => {
                    let bass = chord.voice(options.bass_octave).first().copied();
                    syncopate(&mut events, &tones, bass, bar_start, options)
                }
                RhythmPattern::Block => block(&mut events, &tones, bar_start, bar_beats, options),
            };
            if placed.is_none() {
                log::warn!(
                    "Bar at beat {} is past the end of the track, dropping '{}'",
                    bar_start,
                    chord.text
                );
            }
        }

        bar_start += bar_beats;
    }

    events
}

/// Whole chord held for the full bar
fn block(
    events: &mut Vec<NoteEvent>,
    tones: &[u7],
    bar_start: f64,
    bar_beats: f64,
    options: &MidiExportOptions,
) -> Option<()> {
    let (start, end) = note_span(bar_start, bar_beats, options.ticks_per_beat)?;

    for &note in tones {
        push_note(events, note, start, end, BLOCK_VELOCITY, OFF_VELOCITY);
    }
    Some(())
}

/// Broken chord, one tone per beat with a short gap before the next
fn arpeggiate(
    events: &mut Vec<NoteEvent>,
    tones: &[u7],
    bar_start: f64,
    options: &MidiExportOptions,
) -> Option<()> {
    for (step, &tone_index) in ARPEGGIO_STEPS.iter().enumerate() {
        // Tones dropped for range leave their beat silent
        let Some(&note) = tones.get(tone_index) else {
            continue;
        };
        let (start, end) = note_span(
            bar_start + step as f64,
            ARPEGGIO_GATE_BEATS,
            options.ticks_per_beat,
        )?;
        let velocity = ARPEGGIO_VELOCITY + ARPEGGIO_VELOCITY_STEP * step as u8;
        push_note(events, note, start, end, velocity, OFF_VELOCITY);
    }
    Some(())
}

/// Sustained bass under three off-beat chord stabs
fn syncopate(
    events: &mut Vec<NoteEvent>,
    tones: &[u7],
    bass: Option<u7>,
    bar_start: f64,
    options: &MidiExportOptions,
) -> Option<()> {
    let tpb = options.ticks_per_beat;

    if let Some(bass) = bass {
        let start = beats_to_ticks(bar_start, tpb)?;
        let end = beats_to_ticks(bar_start + f64::from(options.beats_per_bar), tpb)?
            .saturating_sub(BASS_RELEASE_TICKS);
        push_note(events, bass, start, end, BASS_VELOCITY, OFF_VELOCITY);
    }

    for offset in STAB_BEATS {
        let (start, end) = note_span(bar_start + offset, STAB_LENGTH_BEATS, tpb)?;
        for &note in tones {
            push_note(events, note, start, end, STAB_VELOCITY, OFF_VELOCITY);
        }
    }
    Some(())
}
