// Transposition - Shift chord roots in free text by a number of semitones
// Roots are re-spelled with sharps; quality suffixes and surrounding text are kept as-is

use super::chords::scan_chords;
use super::pitch::{split_root, PitchClass};

/// Transpose every chord symbol in `text` by `semitones`.
///
/// The shift wraps with floor-mod, so negative amounts work the same as
/// their positive equivalent (-1 == 11). Text outside chord symbols is copied
/// through unchanged. Symbols whose root is not in the pitch lexicon
/// (e.g. "Cb") are left as written.
pub fn transpose(text: &str, semitones: i32) -> String {
    if semitones == 0 || text.is_empty() {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len() + 8);
    let mut copied_to = 0;

    for symbol in scan_chords(text) {
        output.push_str(&text[copied_to..symbol.start]);
        output.push_str(&transpose_symbol(symbol.text, semitones));
        copied_to = symbol.end;
    }
    output.push_str(&text[copied_to..]);

    output
}

/// Transpose a single chord symbol ("Bbm7" + 2 -> "Cm7")
pub fn transpose_symbol(symbol: &str, semitones: i32) -> String {
    let Some((root, quality)) = split_root(symbol) else {
        return symbol.to_string();
    };

    match PitchClass::from_name(root) {
        Some(pc) => format!("{}{}", pc.transpose(semitones).sharp_name(), quality),
        None => {
            log::debug!("Leaving chord '{}' untransposed: unknown root '{}'", symbol, root);
            symbol.to_string()
        }
    }
}
