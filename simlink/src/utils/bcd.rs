//! Nibble-swapped BCD as stored in SIM elementary files (ICCID, IMSI,
//! dialling numbers, LAI). Each byte keeps its first digit in the low nibble.

use super::hex::bytes_to_hex;

/// Swap the two nibbles of every byte.
pub fn swap_nibbles(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b.rotate_left(4)).collect()
}

/// Hex digits of `bytes` in storage order (low nibble first), padding
/// nibbles (`f`) included.
pub fn swapped_hex(bytes: &[u8]) -> String {
    bytes_to_hex(&swap_nibbles(bytes))
}

/// Decode a nibble-swapped digit string, dropping `f` pad nibbles.
pub fn decode_bcd_digits(bytes: &[u8]) -> String {
    swapped_hex(bytes).chars().filter(|&c| c != 'f').collect()
}
