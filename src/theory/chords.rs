// Chords - Chord-symbol scanning and triad voicing
// Finds chord symbols in free text and turns them into MIDI note numbers

use midly::num::u7;
use std::collections::HashSet;

use super::pitch::{midi_note, split_root, PitchClass};

/// Quality tokens a chord symbol may carry after its root, in match priority
/// order. Any number of them may follow the root ("maj7", "m7add9", "7+").
pub const QUALITY_TOKENS: [&str; 19] = [
    "maj", "min", "m", "dim", "aug", "sus", "add", "M", "m7", "maj7", "7", "9", "11", "13", "6",
    "5", "°", "ø", "+",
];

/// A chord-like substring found in text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordSymbol<'a> {
    /// Full matched text ("F#m7")
    pub text: &'a str,

    /// Byte offset of the match in the scanned text
    pub start: usize,

    /// Byte offset one past the end of the match
    pub end: usize,
}

impl<'a> ChordSymbol<'a> {
    /// Root spelling ("F#")
    pub fn root_name(&self) -> &'a str {
        split_root(self.text).map(|(root, _)| root).unwrap_or(self.text)
    }

    /// Quality suffix after the root ("m7"), possibly empty
    pub fn quality(&self) -> &'a str {
        split_root(self.text).map(|(_, quality)| quality).unwrap_or("")
    }

    /// Resolve the root against the pitch lexicon.
    /// Returns None for spellings the lexicon does not know (Cb, E#, ...).
    pub fn token(&self) -> Option<ChordToken> {
        ChordToken::parse(self.text)
    }

    /// Voice this symbol at an octave; empty if the root is unknown
    pub fn voice(&self, octave: i32) -> Vec<u7> {
        match self.token() {
            Some(token) => token.voice(octave),
            None => Vec::new(),
        }
    }
}

/// A parsed chord: root pitch class plus the raw quality suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordToken {
    pub root: PitchClass,
    pub quality: String,
}

impl ChordToken {
    pub fn new(root: PitchClass, quality: impl Into<String>) -> Self {
        ChordToken {
            root,
            quality: quality.into(),
        }
    }

    /// Parse a single chord symbol ("Am", "Bbmaj7")
    pub fn parse(symbol: &str) -> Option<Self> {
        let (root, quality) = split_root(symbol)?;
        let root = PitchClass::from_name(root)?;
        Some(ChordToken::new(root, quality))
    }

    pub fn triad(&self) -> Triad {
        Triad::from_quality(&self.quality)
    }

    pub fn voice(&self, octave: i32) -> Vec<u7> {
        voice_triad(self.root, self.triad(), octave)
    }
}

/// Triad shape chosen from a quality suffix.
/// Sevenths and extensions beyond the triad are not voiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triad {
    /// Root, perfect fourth, perfect fifth
    Sus4,

    /// Root, major second, perfect fifth
    Sus2,

    /// Root, minor third, perfect fifth
    Minor,

    /// Root, major third, perfect fifth
    Major,
}

impl Triad {
    /// Classify a quality suffix; first matching rule wins
    pub fn from_quality(quality: &str) -> Self {
        if quality.contains("sus4") {
            Triad::Sus4
        } else if quality.contains("sus2") {
            Triad::Sus2
        } else if quality.starts_with('m') && !quality.starts_with("maj") {
            Triad::Minor
        } else {
            Triad::Major
        }
    }

    /// Semitone offsets above the root
    pub fn intervals(&self) -> [i64; 3] {
        match self {
            Triad::Sus4 => [0, 5, 7],
            Triad::Sus2 => [0, 2, 7],
            Triad::Minor => [0, 3, 7],
            Triad::Major => [0, 4, 7],
        }
    }
}

/// Voice a chord as MIDI note numbers: `root + 12 * octave` plus the triad
/// intervals. Tones that fall outside 0-127 are dropped.
pub fn voice(root: PitchClass, quality: &str, octave: i32) -> Vec<u7> {
    voice_triad(root, Triad::from_quality(quality), octave)
}

fn voice_triad(root: PitchClass, triad: Triad, octave: i32) -> Vec<u7> {
    let base = i64::from(root.value()) + 12 * i64::from(octave);
    let mut notes = Vec::with_capacity(3);

    for interval in triad.intervals() {
        match midi_note(base + interval) {
            Some(note) => notes.push(note),
            None => log::warn!(
                "Dropping out-of-range tone {} of {} {:?} at octave {}",
                base + interval,
                root,
                triad,
                octave
            ),
        }
    }

    notes
}

/// Find every chord symbol in `text`, in order of appearance.
/// Text that does not look like a chord is skipped; this never fails.
pub fn scan_chords(text: &str) -> Vec<ChordSymbol<'_>> {
    let bytes = text.as_bytes();
    let mut symbols = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match match_at(bytes, pos) {
            Some(end) => {
                symbols.push(ChordSymbol {
                    text: &text[pos..end],
                    start: pos,
                    end,
                });
                pos = end;
            }
            None => pos += 1,
        }
    }

    symbols
}

/// Chord symbol substrings of `text`, in order
pub fn tokenize(text: &str) -> Vec<&str> {
    scan_chords(text).into_iter().map(|s| s.text).collect()
}

/// ASCII word characters; everything else (including all non-ASCII text)
/// counts as a separator
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True when `pos` sits between a word character and a non-word character
fn is_boundary(bytes: &[u8], pos: usize) -> bool {
    let before = pos > 0 && is_word_byte(bytes[pos - 1]);
    let after = pos < bytes.len() && is_word_byte(bytes[pos]);
    before != after
}

/// Try to match a chord symbol starting exactly at `start`
fn match_at(bytes: &[u8], start: usize) -> Option<usize> {
    if !matches!(bytes[start], b'A'..=b'G') || !is_boundary(bytes, start) {
        return None;
    }

    let after_letter = start + 1;
    if matches!(bytes.get(after_letter), Some(b'#') | Some(b'b')) {
        if let Some(end) = match_qualities(bytes, after_letter + 1) {
            return Some(end);
        }
    }
    match_qualities(bytes, after_letter)
}

/// Greedily consume quality tokens from `from`, backtracking until the match
/// ends on a word boundary. Alternatives are tried in `QUALITY_TOKENS` order
/// and longer runs are preferred over shorter ones.
fn match_qualities(bytes: &[u8], from: usize) -> Option<usize> {
    // Positions from which no boundary-terminated run exists
    let mut dead: HashSet<usize> = HashSet::new();
    // (position, index of the next alternative to try)
    let mut stack: Vec<(usize, usize)> = vec![(from, 0)];

    while let Some(frame) = stack.last_mut() {
        let (pos, next) = *frame;
        let rest = &bytes[pos..];

        let candidate = QUALITY_TOKENS[next..].iter().position(|token| {
            rest.starts_with(token.as_bytes()) && !dead.contains(&(pos + token.len()))
        });

        if let Some(offset) = candidate {
            let index = next + offset;
            frame.1 = index + 1;
            stack.push((pos + QUALITY_TOKENS[index].len(), 0));
            continue;
        }

        if is_boundary(bytes, pos) {
            return Some(pos);
        }
        dead.insert(pos);
        stack.pop();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(values: &[u7]) -> Vec<u8> {
        values.iter().map(|n| u8::from(*n)).collect()
    }

    #[test]
    fn test_tokenize_simple_progression() {
        assert_eq!(tokenize("C - G - Am - F"), vec!["C", "G", "Am", "F"]);
    }

    #[test]
    fn test_tokenize_qualities() {
        assert_eq!(
            tokenize("Cmaj7 | Dm7 | G7 | Bbadd9 | F#m"),
            vec!["Cmaj7", "Dm7", "G7", "Bbadd9", "F#m"]
        );
    }

    #[test]
    fn test_tokenize_skips_words() {
        // "Bridge" and "Chorus" start with chord letters but continue as words
        assert_eq!(tokenize("Bridge: Em C\nChorus: D"), vec!["Em", "C", "D"]);
        assert!(tokenize("the quick brown fox").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_word_boundary_rules() {
        // Unknown suffix digits make the whole word unmatched
        assert!(tokenize("Csus4").is_empty());
        // A trailing non-word symbol backs the match off to the bare root
        assert_eq!(tokenize("C# G"), vec!["C", "G"]);
        assert_eq!(tokenize("C+ E°"), vec!["C", "E"]);
        // ... unless a word character follows it
        assert_eq!(tokenize("(C#m)"), vec!["C#m"]);
    }

    #[test]
    fn test_tokenize_symbol_qualities_mid_word() {
        // Multi-byte quality symbols followed by an extension stay in one symbol
        assert_eq!(tokenize("Bø7 C°7"), vec!["Bø7", "C°7"]);
        let symbols = scan_chords("Bø7 C°7");
        assert_eq!(symbols[0].quality(), "ø7");
        assert_eq!(symbols[1].start, "Bø7 ".len());
    }

    #[test]
    fn test_tokenize_prefers_longest_run() {
        assert_eq!(tokenize("Am7 Bm7b5"), vec!["Am7"]);
        assert_eq!(tokenize("Gmaj7,Cm7"), vec!["Gmaj7", "Cm7"]);
    }

    #[test]
    fn test_tokenize_long_ambiguous_run_terminates() {
        let text = format!("C{}x", "m7".repeat(2000));
        assert!(tokenize(&text).is_empty());
    }

    #[test]
    fn test_scan_offsets() {
        let text = "Am é F";
        let symbols = scan_chords(text);
        assert_eq!(symbols.len(), 2);
        assert_eq!(&text[symbols[1].start..symbols[1].end], "F");
        assert_eq!(symbols[0].root_name(), "A");
        assert_eq!(symbols[0].quality(), "m");
    }

    #[test]
    fn test_voice_a_minor() {
        assert_eq!(notes(&voice(PitchClass::A, "m", 4)), vec![57, 60, 64]);
        let token = ChordToken::parse("Am").unwrap();
        assert_eq!(notes(&token.voice(5)), vec![69, 72, 76]);
    }

    #[test]
    fn test_voice_triad_rules() {
        assert_eq!(notes(&voice(PitchClass::C, "", 4)), vec![48, 52, 55]);
        assert_eq!(notes(&voice(PitchClass::C, "maj7", 4)), vec![48, 52, 55]);
        assert_eq!(notes(&voice(PitchClass::C, "m7", 4)), vec![48, 51, 55]);
        assert_eq!(notes(&voice(PitchClass::C, "sus4", 4)), vec![48, 53, 55]);
        assert_eq!(notes(&voice(PitchClass::C, "sus2", 4)), vec![48, 50, 55]);
        assert_eq!(notes(&voice(PitchClass::C, "msus4", 4)), vec![48, 53, 55]);
        assert_eq!(notes(&voice(PitchClass::C, "dim", 4)), vec![48, 52, 55]);
    }

    #[test]
    fn test_voice_drops_out_of_range() {
        // B at octave 10: 131 and up are not MIDI notes
        assert_eq!(notes(&voice(PitchClass::new(11), "", 10)), Vec::<u8>::new());
        // G at octave 10: 127 fits, the third and fifth do not
        assert_eq!(notes(&voice(PitchClass::new(7), "", 10)), vec![127]);
    }

    #[test]
    fn test_unknown_root_voices_nothing() {
        let symbols = scan_chords("Cb");
        assert_eq!(symbols.len(), 1);
        assert!(symbols[0].token().is_none());
        assert!(symbols[0].voice(4).is_empty());
    }

    #[test]
    fn test_triad_classification() {
        assert_eq!(Triad::from_quality("min"), Triad::Minor);
        assert_eq!(Triad::from_quality("maj"), Triad::Major);
        assert_eq!(Triad::from_quality("M7"), Triad::Major);
        assert_eq!(Triad::from_quality("sus"), Triad::Major);
        assert_eq!(ChordToken::parse("Ebm7").map(|t| t.triad()), Some(Triad::Minor));
    }
}
