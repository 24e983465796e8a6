// Event Sequencer - Orders note events and converts them to delta times
// Equal-tick events keep their insertion order so output is reproducible

use super::events::{DeltaEvent, NoteEvent};

/// Sort events by absolute tick (stable) and replace ticks with deltas.
/// The first delta is the first event's absolute tick.
pub fn sequence(mut events: Vec<NoteEvent>) -> Vec<DeltaEvent> {
    events.sort_by_key(|event| event.tick);

    let mut last_tick = 0;
    events
        .into_iter()
        .map(|event| {
            let delta = event.tick - last_tick;
            last_tick = event.tick;
            DeltaEvent {
                delta,
                kind: event.kind,
                note: event.note,
                velocity: event.velocity,
            }
        })
        .collect()
}
