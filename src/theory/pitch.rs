// Pitch Lexicon - Pitch classes and their sharp/flat spellings
// Read-only tables shared by the tokenizer, voicer, transposer and note-name resolver

use midly::num::u7;
use std::fmt;

/// Sharp spellings, indexed by pitch class (C = 0)
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings, indexed by pitch class (C = 0)
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// One of the twelve chroma values, always reduced mod 12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const A: PitchClass = PitchClass(9);

    /// Create a pitch class from any integer, using floor-mod so negative
    /// values wrap upward (-1 -> B)
    pub fn new(value: i64) -> Self {
        PitchClass(value.rem_euclid(12) as u8)
    }

    /// Look up a root spelling ("C", "F#", "Bb").
    /// Sharp spellings are checked first, then flats. Spellings outside the
    /// tables (Cb, E#, Fb, B#) are not recognized.
    pub fn from_name(name: &str) -> Option<Self> {
        SHARP_NAMES
            .iter()
            .position(|n| *n == name)
            .or_else(|| FLAT_NAMES.iter().position(|n| *n == name))
            .map(|index| PitchClass(index as u8))
    }

    /// Semitones above C (0-11)
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Shift by a signed number of semitones, wrapping around the octave
    pub fn transpose(&self, semitones: i32) -> Self {
        PitchClass::new(i64::from(self.0) + i64::from(semitones))
    }

    /// Sharp spelling ("C#" rather than "Db")
    pub fn sharp_name(&self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sharp_name())
    }
}

/// Split a leading root spelling (letter A-G plus optional '#' or 'b') off a
/// symbol. Returns the root text and the remainder.
pub fn split_root(symbol: &str) -> Option<(&str, &str)> {
    let bytes = symbol.as_bytes();
    if !matches!(bytes.first(), Some(b'A'..=b'G')) {
        return None;
    }
    let len = match bytes.get(1) {
        Some(b'#') | Some(b'b') => 2,
        _ => 1,
    };
    Some(symbol.split_at(len))
}

/// Convert a computed note number to a MIDI note, rejecting anything
/// outside 0-127
pub fn midi_note(value: i64) -> Option<u7> {
    if (0..=127).contains(&value) {
        Some(u7::new(value as u8))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_mod_wraps_negative() {
        assert_eq!(PitchClass::new(-1).value(), 11);
        assert_eq!(PitchClass::new(-13).value(), 11);
        assert_eq!(PitchClass::new(24).value(), 0);
    }

    #[test]
    fn test_sharp_and_flat_lookup() {
        assert_eq!(PitchClass::from_name("C#"), PitchClass::from_name("Db"));
        assert_eq!(PitchClass::from_name("Bb").map(|pc| pc.value()), Some(10));
        assert_eq!(PitchClass::from_name("A"), Some(PitchClass::A));
        assert_eq!(PitchClass::from_name("Cb"), None);
        assert_eq!(PitchClass::from_name("E#"), None);
        assert_eq!(PitchClass::from_name("H"), None);
    }

    #[test]
    fn test_respelling() {
        let eb = PitchClass::from_name("Eb").unwrap();
        assert_eq!(eb.sharp_name(), "D#");
        assert_eq!(eb.to_string(), "D#");
    }

    #[test]
    fn test_transpose_wraps() {
        let b = PitchClass::new(11);
        assert_eq!(b.transpose(1), PitchClass::C);
        assert_eq!(PitchClass::C.transpose(-3), PitchClass::A);
        // -2147483648 = -178956971 * 12 + 4
        assert_eq!(PitchClass::C.transpose(i32::MIN).value(), 4);
    }

    #[test]
    fn test_split_root() {
        assert_eq!(split_root("F#m7"), Some(("F#", "m7")));
        assert_eq!(split_root("Bbmaj7"), Some(("Bb", "maj7")));
        assert_eq!(split_root("G"), Some(("G", "")));
        assert_eq!(split_root("x"), None);
        assert_eq!(split_root(""), None);
    }

    #[test]
    fn test_midi_note_range() {
        assert_eq!(midi_note(60).map(u8::from), Some(60));
        assert_eq!(midi_note(127).map(u8::from), Some(127));
        assert!(midi_note(128).is_none());
        assert!(midi_note(-1).is_none());
    }
}
