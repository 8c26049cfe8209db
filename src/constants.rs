/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Address at which program images are loaded and execution begins.
/// Everything below this is reserved for the interpreter.
pub const PROGRAM_START: u16 = 0x200;

/// Number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 16;

/// Maximum number of return addresses the call stack holds.
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Display geometry in pixels.
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes per hexadecimal font glyph.
pub const FONT_GLYPH_SIZE: usize = 5;

/// Nanoseconds per CPU cycle; approximates the traditional 500Hz clock.
pub const CLOCK_SPEED: usize = 2_000_000;

/// The 16 hexadecimal font glyphs resident at the bottom of memory.
///
/// Each glyph is 5 rows of 8 pixels with only the high nibble populated,
/// so the glyph for digit `d` starts at address `d * 5`.
pub const FONT_SET: [u8; KEY_COUNT * FONT_GLYPH_SIZE] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
