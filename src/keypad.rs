use crate::constants::KEY_COUNT;

/// # Keypad
///
/// The pressed/released latch for the 16-key hexadecimal pad. The external
/// input collaborator writes it through [`set`]; instructions only read it.
///
/// Key indices are taken modulo the pad size, so a register holding a value
/// above 0xF still selects a real latch entry.
///
/// [`set`]: Keypad::set
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            pressed: [false; KEY_COUNT],
        }
    }

    /// Latch the pressed status of a key.
    pub fn set(&mut self, key: u8, pressed: bool) {
        self.pressed[(key & 0xF) as usize] = pressed;
    }

    /// Whether a key is currently latched as pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[(key & 0xF) as usize]
    }

    /// The lowest-indexed pressed key, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT as u8).find(|&key| self.pressed[key as usize])
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
