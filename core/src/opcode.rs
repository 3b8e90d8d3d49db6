/// Extracts `length` bits of `word` starting at `start`, where bit 0 is the most significant bit.
///
/// ```
/// use vip8_core::opcode::field;
/// assert_eq!(field(0xABCD, 0, 4), 0xA);
/// assert_eq!(field(0xABCD, 4, 12), 0xBCD);
/// assert_eq!(field(0xABCD, 8, 8), 0xCD);
/// ```
pub fn field(word: u16, start: u32, length: u32) -> u16 {
    debug_assert!(start < 16 && length >= 1 && start + length <= 16);
    let mask = ((1u32 << length) - 1) as u16;
    (word >> (16 - (start + length))) & mask
}

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble.
    /// `[g___]`
    fn group(&self) -> u8;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> usize;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> usize;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.group(), self.x() as u8, self.y() as u8, self.n())
    }

    fn group(&self) -> u8 {
        field(*self, 0, 4) as u8
    }

    fn x(&self) -> usize {
        field(*self, 4, 4) as usize
    }

    fn y(&self) -> usize {
        field(*self, 8, 4) as usize
    }

    fn n(&self) -> u8 {
        field(*self, 12, 4) as u8
    }

    fn kk(&self) -> u8 {
        field(*self, 8, 8) as u8
    }

    fn addr(&self) -> u16 {
        field(*self, 4, 12)
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_field_single_bits() {
        let op: u16 = 0b1000_0000_0000_0001;
        assert_eq!(field(op, 0, 1), 1);
        assert_eq!(field(op, 1, 1), 0);
        assert_eq!(field(op, 15, 1), 1);
    }

    #[test]
    fn test_field_whole_word() {
        assert_eq!(field(0xBEEF, 0, 16), 0xBEEF);
    }

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        let op: u16 = 0xABCD;
        assert_eq!(op.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let op: u16 = 0xABCD;
        assert_eq!(op.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let op: u16 = 0xABCD;
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        let op: u16 = 0xABCD;
        assert_eq!(op.kk(), 0xCD);
    }

    #[test]
    fn test_addr() {
        let op: u16 = 0xABCD;
        assert_eq!(op.addr(), 0x0BCD);
    }

    #[test]
    fn test_every_word_reassembles() {
        for word in 0..=u16::MAX {
            let nibbles = (u16::from(word.group()) << 12)
                | ((word.x() as u16) << 8)
                | ((word.y() as u16) << 4)
                | u16::from(word.n());
            assert_eq!(nibbles, word);
            assert_eq!(u16::from(word.group()) << 12 | word.addr(), word);
            assert_eq!(field(word, 0, 8) << 8 | u16::from(word.kk()), word);
        }
    }

    proptest! {
        #[test]
        fn prop_adjacent_fields_concatenate(word: u16, start in 0u32..15, split in 1u32..15) {
            prop_assume!(start + split < 16);
            let rest = 16 - start - split;
            let joined = (field(word, start, split) << rest) | field(word, start + split, rest);
            prop_assert_eq!(joined, field(word, start, 16 - start));
        }
    }
}
