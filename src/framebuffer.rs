use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The pixel grid, indexed as `[row][column]` with 1 for on and 0 for off.
pub type Frame = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Frame buffer
///
/// The 64x32 one-bit display. Pixels are mutated exclusively by XOR through
/// [`flip`] (the sprite-draw path) or wiped by [`clear`]; a changed flag
/// tells the external renderer when the grid is worth re-reading.
///
/// [`flip`]: FrameBuffer::flip
/// [`clear`]: FrameBuffer::clear
pub struct FrameBuffer {
    grid: Frame,
    changed: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            grid: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            changed: false,
        }
    }

    /// Turn every pixel off and flag the frame for redraw.
    pub fn clear(&mut self) {
        self.grid = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.changed = true;
    }

    /// XOR a set bit into the pixel at `row`, `col`; true if it was erased.
    pub fn flip(&mut self, row: usize, col: usize) -> bool {
        let erased = self.grid[row][col] == 1;
        self.grid[row][col] ^= 1;
        erased
    }

    /// Whether the pixel at `row`, `col` is on.
    pub fn pixel_at(&self, row: usize, col: usize) -> bool {
        self.grid[row][col] == 1
    }

    /// Flag the frame for redraw without touching any pixel.
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Read and clear the redraw flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }

    /// The whole grid, for rendering.
    pub fn grid(&self) -> &Frame {
        &self.grid
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
