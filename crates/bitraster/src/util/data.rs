//! # Static lookup tables
//!
//! Tables that make turning packed bits into gray pixels a single lookup
//! per byte.

/// Gray value for a bit that is not set (white, no ink)
pub const NO_INK: u8 = 0xFF;
/// Gray value for a bit that is set (black, ink)
pub const INK: u8 = 0x00;

const fn projection() -> [[u8; 8]; 256] {
    let mut table = [[NO_INK; 8]; 256];
    let mut byte = 0;
    while byte < 256 {
        let mut bit = 0;
        while bit < 8 {
            if byte & (0x80 >> bit) != 0 {
                table[byte][bit] = INK;
            }
            bit += 1;
        }
        byte += 1;
    }
    table
}

/// Lookup table for bytes as a byte array of [`NO_INK`] (0) and [`INK`] (1)
pub const BIT_PROJECTION: [[u8; 8]; 256] = projection();

#[cfg(test)]
mod tests {
    use super::BIT_PROJECTION;

    #[test]
    fn test_pattern() {
        assert_eq!(
            BIT_PROJECTION[0b00010111],
            [0xFF, 0xFF, 0xFF, 0x00, 0xFF, 0x00, 0x00, 0x00]
        );
        assert_eq!(BIT_PROJECTION[0b11111111], [0x00; 8]);
        assert_eq!(BIT_PROJECTION[0], [0xFF; 8]);
    }
}
