use sdl2::keyboard::Keycode;

/// The hex keypad row by row, each key next to the keyboard key standing in for it
const KEYPAD: [[(u8, Keycode); 4]; 4] = [
    [(0x1, Keycode::Num1), (0x2, Keycode::Num2), (0x3, Keycode::Num3), (0xC, Keycode::Num4)],
    [(0x4, Keycode::Q), (0x5, Keycode::W), (0x6, Keycode::E), (0xD, Keycode::R)],
    [(0x7, Keycode::A), (0x8, Keycode::S), (0x9, Keycode::D), (0xE, Keycode::F)],
    [(0xA, Keycode::Z), (0x0, Keycode::X), (0xB, Keycode::C), (0xF, Keycode::V)],
];

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The keypad is laid over the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: Keycode) -> Option<u8> {
    KEYPAD
        .iter()
        .flatten()
        .find(|(_, keycode)| *keycode == key)
        .map(|&(hex, _)| hex)
}

#[cfg(test)]
mod test_keymap {
    use super::*;

    #[test]
    fn test_corners() {
        assert_eq!(keymap(Keycode::Num1), Some(0x1));
        assert_eq!(keymap(Keycode::Num4), Some(0xC));
        assert_eq!(keymap(Keycode::Z), Some(0xA));
        assert_eq!(keymap(Keycode::V), Some(0xF));
    }

    #[test]
    fn test_every_hex_digit_has_one_key() {
        let mut seen = [0; 16];
        for (hex, _) in KEYPAD.iter().flatten() {
            seen[*hex as usize] += 1;
        }
        assert_eq!(seen, [1; 16]);
    }

    #[test]
    fn test_unmapped_keys() {
        for key in [Keycode::Num5, Keycode::T, Keycode::Space, Keycode::Escape] {
            assert_eq!(keymap(key), None);
        }
    }
}
