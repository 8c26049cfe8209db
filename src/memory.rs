use crate::constants::{FONT_SET, MEMORY_SIZE, PROGRAM_START};
use crate::error::ExecutionError;

// Addresses are u16 as on the Chip-8; lengths are usize to avoid endless casting.

/// # Memory
///
/// The Chip-8's flat 4096-byte store. Addresses 0x000-0x1FF are reserved for
/// the interpreter and hold the font glyphs; program images load at 0x200.
///
/// Every access is validated against the 4096-byte extent. An out-of-range
/// address is a [`MemoryOverflow`] carrying the base address of the rejected
/// access, never a silent wrap.
///
/// [`MemoryOverflow`]: ExecutionError::MemoryOverflow
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..FONT_SET.len()].copy_from_slice(&FONT_SET);
        Memory { bytes }
    }

    /// The byte at `addr`.
    pub fn read_byte(&self, addr: u16) -> Result<u8, ExecutionError> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(ExecutionError::MemoryOverflow { address: addr })
    }

    /// Overwrite the byte at `addr`.
    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        match self.bytes.get_mut(addr as usize) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(ExecutionError::MemoryOverflow { address: addr }),
        }
    }

    /// The big-endian 16-bit word whose first byte is at `addr`.
    ///
    /// Memory is stored as bytes but opcodes are 16 bits, so two subsequent
    /// bytes are combined.
    pub fn read_word(&self, addr: u16) -> Result<u16, ExecutionError> {
        let word = self.read_range(addr, 2)?;
        Ok(u16::from(word[0]) << 8 | u16::from(word[1]))
    }

    /// The `len` bytes starting at `addr`.
    pub fn read_range(&self, addr: u16, len: usize) -> Result<&[u8], ExecutionError> {
        let start = addr as usize;
        self.bytes
            .get(start..start + len)
            .ok_or(ExecutionError::MemoryOverflow { address: addr })
    }

    /// Overwrite the bytes starting at `addr` with `data`.
    pub fn write_range(&mut self, addr: u16, data: &[u8]) -> Result<(), ExecutionError> {
        let start = addr as usize;
        match self.bytes.get_mut(start..start + data.len()) {
            Some(range) => {
                range.copy_from_slice(data);
                Ok(())
            }
            None => Err(ExecutionError::MemoryOverflow { address: addr }),
        }
    }

    /// Write a program image verbatim into program space.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), ExecutionError> {
        let capacity = MEMORY_SIZE - PROGRAM_START as usize;
        if image.len() > capacity {
            return Err(ExecutionError::RomTooLarge {
                size: image.len(),
                capacity,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + image.len()].copy_from_slice(image);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
