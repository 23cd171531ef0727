//! Byte buffer to field element chunking.

use alloy_primitives::U256;

/// Width in bytes of one field element.
pub const FIELD_ELEMENT_BYTES: usize = 32;

/// Splits `data` into 32-byte windows and reads each window as an unsigned 256-bit integer.
///
/// The last window is zero-padded on the right when `data` is not a multiple of 32 bytes.
/// With `little_endian` set, each padded window is read least-significant byte first, which is
/// the layout the on-chain verifier expects for proofs and instances.
///
/// Empty input yields an empty vector.
pub fn chunk_to_field_elements(data: &[u8], little_endian: bool) -> Vec<U256> {
    data.chunks(FIELD_ELEMENT_BYTES)
        .map(|chunk| {
            let mut window = [0u8; FIELD_ELEMENT_BYTES];
            window[..chunk.len()].copy_from_slice(chunk);
            if little_endian {
                U256::from_le_bytes(window)
            } else {
                U256::from_be_bytes(window)
            }
        })
        .collect()
}
