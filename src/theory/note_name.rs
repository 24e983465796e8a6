// Note Names - Scientific pitch notation to MIDI note numbers
// "C4" is middle C (60); "rest" marks silence

use midly::num::u7;

use super::pitch::{midi_note, split_root, PitchClass};

/// True for the rest marker (any letter case)
pub fn is_rest(name: &str) -> bool {
    name.eq_ignore_ascii_case("rest")
}

/// Resolve a note name such as "C4", "F#5" or "Bb3" to a MIDI note number.
///
/// Returns None for rests, for anything not shaped
/// `<letter A-G><optional # or b><octave digits>`, for spellings outside the
/// pitch lexicon, and for results above 127.
pub fn resolve_note_name(name: &str) -> Option<u7> {
    if is_rest(name) {
        return None;
    }

    let (root, octave) = split_root(name)?;
    if octave.is_empty() || !octave.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let pitch_class = PitchClass::from_name(root)?;
    let octave: i64 = octave.parse().ok()?;
    let value = octave
        .checked_add(1)?
        .checked_mul(12)?
        .checked_add(i64::from(pitch_class.value()))?;
    midi_note(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(name: &str) -> Option<u8> {
        resolve_note_name(name).map(u8::from)
    }

    #[test]
    fn test_middle_c() {
        assert_eq!(resolve("C4"), Some(60));
        assert_eq!(resolve("A4"), Some(69));
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(resolve("F#5"), Some(78));
        assert_eq!(resolve("Bb3"), Some(58));
        assert_eq!(resolve("Db0"), Some(13));
    }

    #[test]
    fn test_rest() {
        assert!(is_rest("rest"));
        assert!(is_rest("REST"));
        assert!(is_rest("Rest"));
        assert_eq!(resolve("rest"), None);
    }

    #[test]
    fn test_malformed_names() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("C"), None);
        assert_eq!(resolve("H4"), None);
        assert_eq!(resolve("c4"), None);
        assert_eq!(resolve("C-1"), None);
        assert_eq!(resolve("C4 "), None);
        assert_eq!(resolve("Cb4"), None);
        assert_eq!(resolve("C#x"), None);
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(resolve("G9"), Some(127));
        assert_eq!(resolve("G#9"), None);
        assert_eq!(resolve("C99999999999999999999999"), None);
        assert_eq!(resolve("B9223372036854775807"), None);
    }
}
