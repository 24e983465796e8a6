// Variable-Length Quantities - MIDI's 7-bits-per-byte integer encoding
// Most significant group first; every byte but the last has bit 7 set

/// Encode a value as a variable-length quantity
pub fn encode(value: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(5);
    write(value, &mut bytes);
    bytes
}

/// Append the variable-length encoding of `value` to `buffer`
pub fn write(value: u32, buffer: &mut Vec<u8>) {
    // Collect groups least significant first, then emit in reverse
    let mut groups = [0u8; 5];
    let mut count = 0;
    let mut remaining = value;

    groups[count] = (remaining & 0x7F) as u8;
    count += 1;
    remaining >>= 7;

    while remaining != 0 {
        groups[count] = (remaining & 0x7F) as u8 | 0x80;
        count += 1;
        remaining >>= 7;
    }

    buffer.extend(groups[..count].iter().rev());
}

/// Decode a variable-length quantity from the start of `bytes`.
///
/// Returns the value and the number of bytes consumed, or None if the input
/// ends before a terminating byte, runs past five bytes, or overflows u32.
pub fn decode(bytes: &[u8]) -> Option<(u32, usize)> {
    let mut value: u64 = 0;

    for (index, &byte) in bytes.iter().take(5).enumerate() {
        value = (value << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return u32::try_from(value).ok().map(|v| (v, index + 1));
        }
    }

    None
}
