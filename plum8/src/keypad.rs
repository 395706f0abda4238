//! State of the 16-key hexadecimal keypad and its physical bindings
//!
//! ```text
//! |1|2|3|C|      |1|2|3|4|
//! |4|5|6|D|  ->  |Q|W|E|R|
//! |7|8|9|E|  ->  |A|S|D|F|
//! |A|0|B|F|      |Z|X|C|V|
//! ```

pub const KEYS: usize = 16;

/// Key codes laid out the way they sit on the 4x4 keypad, indexed by `[row][column]`
pub const MATRIX: [[u8; 4]; 4] = [
    [0x1, 0x2, 0x3, 0xC],
    [0x4, 0x5, 0x6, 0xD],
    [0x7, 0x8, 0x9, 0xE],
    [0xA, 0x0, 0xB, 0xF],
];

/// Left-hand side of a qwerty keyboard, position for position with `MATRIX`
pub const QWERTY: [[char; 4]; 4] = [
    ['1', '2', '3', '4'],
    ['q', 'w', 'e', 'r'],
    ['a', 's', 'd', 'f'],
    ['z', 'x', 'c', 'v'],
];

/// Key code at a keypad scan position
pub fn bind_matrix(row: usize, col: usize) -> Option<u8> {
    MATRIX.get(row).and_then(|keys| keys.get(col)).copied()
}

/// Key code bound to a qwerty character, case insensitive
pub fn bind_qwerty(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    QWERTY.iter().enumerate().find_map(|(row, chars)| {
        chars
            .iter()
            .position(|&bound| bound == c)
            .and_then(|col| bind_matrix(row, col))
    })
}

/// Pressed state of each key plus a latch of keys that went down
///
/// The latch is what resolves a pending wait for key: only a transition from
/// released to pressed counts, holding a key down does not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEYS],
    newly_pressed: u16,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&mut self, key: u8, pressed: bool) {
        let key = (key & 0x0F) as usize;
        if pressed && !self.keys[key] {
            self.newly_pressed |= 1 << key;
        }
        self.keys[key] = pressed;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0x0F) as usize]
    }

    /// Update every key from a snapshot of the keyboard
    pub fn latch(&mut self, snapshot: &[bool; KEYS]) {
        snapshot
            .iter()
            .enumerate()
            .for_each(|(key, &pressed)| self.set_pressed(key as u8, pressed));
    }

    /// Consume the lowest key that went down since the latch was last cleared
    pub fn take_newly_pressed(&mut self) -> Option<u8> {
        if self.newly_pressed == 0 {
            return None;
        }
        let key = self.newly_pressed.trailing_zeros() as u8;
        self.newly_pressed &= !(1 << key);
        Some(key)
    }

    pub fn clear_newly_pressed(&mut self) {
        self.newly_pressed = 0;
    }

    pub fn as_array(&self) -> &[bool; KEYS] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[rustfmt::skip]
    fn qwerty_bindings() {
        let expected = [
            ('1', 0x1), ('2', 0x2), ('3', 0x3), ('4', 0xC),
            ('q', 0x4), ('w', 0x5), ('e', 0x6), ('r', 0xD),
            ('a', 0x7), ('s', 0x8), ('d', 0x9), ('f', 0xE),
            ('z', 0xA), ('x', 0x0), ('c', 0xB), ('v', 0xF),
        ];
        for &(c, key) in &expected {
            assert_eq!(bind_qwerty(c), Some(key), "binding of {:?}", c);
        }
        assert_eq!(bind_qwerty('V'), Some(0xF));
        assert_eq!(bind_qwerty('5'), None);
        assert_eq!(bind_qwerty(' '), None);
    }

    #[test]
    fn matrix_covers_every_key_once() {
        let mut seen = [false; KEYS];
        for row in 0..4 {
            for col in 0..4 {
                let key = bind_matrix(row, col).unwrap() as usize;
                assert!(!seen[key]);
                seen[key] = true;
            }
        }
        assert!(seen.iter().all(|&k| k));
        assert_eq!(bind_matrix(4, 0), None);
        assert_eq!(bind_matrix(0, 4), None);
    }

    #[test]
    fn press_and_release() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x1, true);
        keypad.set_pressed(0xF, true);
        assert_eq!(keypad.as_array().iter().filter(|&&k| k).count(), 2);
        assert!(keypad.is_pressed(0x1) && keypad.is_pressed(0xF));

        keypad.set_pressed(0xF, false);
        assert!(keypad.is_pressed(0x1));
        assert!(!keypad.is_pressed(0xF));
    }

    #[test]
    fn newly_pressed_is_a_transition() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x7, true);
        keypad.clear_newly_pressed();
        // held key does not count again
        keypad.set_pressed(0x7, true);
        assert_eq!(keypad.take_newly_pressed(), None);

        keypad.set_pressed(0x7, false);
        keypad.set_pressed(0x7, true);
        assert_eq!(keypad.take_newly_pressed(), Some(0x7));
        assert_eq!(keypad.take_newly_pressed(), None);
    }

    #[test]
    fn newly_pressed_lowest_first() {
        let mut keypad = Keypad::new();
        let mut snapshot = [false; KEYS];
        snapshot[0xB] = true;
        snapshot[0x3] = true;
        keypad.latch(&snapshot);
        assert_eq!(keypad.take_newly_pressed(), Some(0x3));
        assert_eq!(keypad.take_newly_pressed(), Some(0xB));
        assert_eq!(keypad.take_newly_pressed(), None);
    }

    #[test]
    fn key_codes_are_masked() {
        let mut keypad = Keypad::new();
        keypad.set_pressed(0x1A, true);
        assert!(keypad.is_pressed(0xA));
        assert!(keypad.is_pressed(0xFA));
    }
}
