// Tempo - Microseconds per quarter note, as carried by the tempo meta event
// Validated at construction so the writer can stay infallible

use midly::num::u24;
use thiserror::Error;

/// Tempo construction errors
#[derive(Debug, Error, PartialEq)]
pub enum TempoError {
    #[error("BPM must be a positive finite number, got {0}")]
    InvalidBpm(f64),

    #[error("Tempo of {0} microseconds per beat does not fit in 24 bits")]
    OutOfRange(f64),
}

/// Microseconds per beat, limited to the 24 bits the tempo meta event holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo(u24);

impl Tempo {
    /// Default tempo: 120 BPM
    pub const DEFAULT_MICROS_PER_BEAT: u32 = 500_000;

    /// Tempo from beats per minute: `round(60_000_000 / bpm)`
    pub fn from_bpm(bpm: f64) -> Result<Self, TempoError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(TempoError::InvalidBpm(bpm));
        }
        let micros = (60_000_000.0 / bpm).round();
        if micros < 1.0 || micros > f64::from(0x00FF_FFFFu32) {
            return Err(TempoError::OutOfRange(micros));
        }
        Ok(Tempo(u24::new(micros as u32)))
    }

    /// Tempo from an explicit microseconds-per-beat value
    pub fn from_micros_per_beat(micros: u32) -> Result<Self, TempoError> {
        if micros == 0 || micros > 0x00FF_FFFF {
            return Err(TempoError::OutOfRange(f64::from(micros)));
        }
        Ok(Tempo(u24::new(micros)))
    }

    pub fn micros_per_beat(&self) -> u32 {
        u32::from(self.0)
    }

    pub fn bpm(&self) -> f64 {
        60_000_000.0 / f64::from(self.micros_per_beat())
    }

    /// Big-endian 24-bit payload of the tempo meta event
    pub fn to_be_bytes(&self) -> [u8; 3] {
        let [_, a, b, c] = self.micros_per_beat().to_be_bytes();
        [a, b, c]
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo(u24::new(Self::DEFAULT_MICROS_PER_BEAT))
    }
}
