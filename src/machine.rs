use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{PROGRAM_START, REGISTER_COUNT};
use crate::error::{CycleOutcome, ExecutionError};
use crate::framebuffer::{Frame, FrameBuffer};
use crate::instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::stack::CallStack;
use crate::timers::Timers;

/// # Machine
/// One complete Chip-8 virtual machine.
///
/// Tracks:
/// - `memory` holding the font set and the loaded program
/// - the register file `v`, index register `i`, and program counter `pc`
/// - the subroutine call `stack`
/// - the delay and sound `timers`
/// - the `keypad` latch written by the external input collaborator
/// - the `framebuffer` read by the external renderer
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one cycle at a time
/// - inspecting the frame buffer, timers, and registers
pub struct Machine {
    pub(crate) memory: Memory,
    pub(crate) v: [u8; REGISTER_COUNT],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) stack: CallStack,
    pub(crate) timers: Timers,
    pub(crate) keypad: Keypad,
    pub(crate) framebuffer: FrameBuffer,
    pub(crate) awaiting_key: Option<u8>,
    rng: StdRng,
}

impl Machine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A machine whose random draws are reproducible across runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Machine {
            memory: Memory::new(),
            v: [0; REGISTER_COUNT],
            i: 0x0,
            pc: PROGRAM_START,
            stack: CallStack::new(),
            timers: Timers::new(),
            keypad: Keypad::new(),
            framebuffer: FrameBuffer::new(),
            awaiting_key: None,
            rng,
        }
    }

    /// Load a rom into program space.
    ///
    /// # Arguments
    /// * `rom` the program bytes, copied verbatim to PROGRAM_START
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), ExecutionError> {
        self.memory.load_program(rom)
    }

    /// Advances the machine by a single cycle.
    ///
    /// A cycle is one atomic fetch-decode-execute step followed by one timer
    /// tick. While a keypress is awaited the cycle reduces to polling the
    /// keypad instead: nothing is fetched and the timers hold until the
    /// pending register has been written and a further cycle resumes the
    /// program.
    ///
    /// Errors abort the cycle where they arise. State the failing stage had
    /// not yet reached is left as it was and the timers do not tick; the
    /// caller decides whether to halt or reset.
    pub fn execute_cycle(&mut self) -> Result<CycleOutcome, ExecutionError> {
        if let Some(register) = self.awaiting_key {
            return Ok(match self.keypad.first_pressed() {
                Some(key) => {
                    self.v[register as usize] = key;
                    self.awaiting_key = None;
                    CycleOutcome::Continued
                }
                None => CycleOutcome::AwaitingKeyInput,
            });
        }

        let op = self.memory.read_word(self.pc)?;
        self.pc += 2;
        let outcome = instruction::decode(op)?(self, op)?;
        self.timers.tick();
        Ok(outcome)
    }

    /// Set the pressed status of a key.
    ///
    /// # Arguments
    /// * `key` the key's index on the 16-key pad; only the low nibble is
    ///   significant
    /// * `pressed` whether the key is down
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set(key, pressed);
    }

    /// Whether the pixel at (row, col) is lit.
    pub fn pixel_at(&self, row: usize, col: usize) -> bool {
        self.framebuffer.pixel_at(row, col)
    }

    /// Whether the frame changed since this was last asked; asking clears it.
    pub fn take_changed_flag(&mut self) -> bool {
        self.framebuffer.take_changed()
    }

    /// The frame as drawn, row major.
    pub fn frame(&self) -> &Frame {
        self.framebuffer.grid()
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.timers.delay = value;
    }

    pub fn program_counter(&self) -> u16 {
        self.pc
    }

    pub fn index_register(&self) -> u16 {
        self.i
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub(crate) fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_roms_at_program_start() {
        let mut machine = Machine::new();
        machine.load_rom(&[0xAA, 0xBB]).unwrap();
        assert_eq!(machine.memory.read_word(PROGRAM_START).unwrap(), 0xAABB);
    }

    #[test]
    fn test_rejects_oversized_roms() {
        let mut machine = Machine::new();
        let rom = vec![0x0; 0xE01];
        assert_eq!(
            machine.load_rom(&rom),
            Err(ExecutionError::RomTooLarge {
                size: 0xE01,
                capacity: 0xE00,
            })
        );
    }

    #[test]
    fn test_runs_a_two_instruction_program() {
        let mut machine = Machine::new();
        // V0 = 5 then V0 += 3
        machine.load_rom(&[0x60, 0x05, 0x70, 0x03]).unwrap();
        assert_eq!(machine.execute_cycle(), Ok(CycleOutcome::Continued));
        assert_eq!(machine.execute_cycle(), Ok(CycleOutcome::Continued));
        assert_eq!(machine.v[0x0], 0x8);
        assert_eq!(machine.pc, 0x204);
    }

    #[test]
    fn test_clear_screen_blanks_every_pixel_and_flags_the_frame() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x00, 0xE0]).unwrap();
        machine.framebuffer.flip(10, 20);
        machine.framebuffer.take_changed();
        machine.execute_cycle().unwrap();
        assert!(machine
            .frame()
            .iter()
            .all(|row| row.iter().all(|&pixel| pixel == 0)));
        assert!(machine.take_changed_flag());
    }

    #[test]
    fn test_timers_tick_once_per_cycle() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x60, 0x05]).unwrap();
        machine.timers.delay = 0x2;
        machine.timers.sound = 0x1;
        machine.execute_cycle().unwrap();
        assert_eq!(machine.delay_timer(), 0x1);
        assert_eq!(machine.sound_timer(), 0x0);
    }

    #[test]
    fn test_delay_timer_can_be_preloaded() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x60, 0x05]).unwrap();
        machine.set_delay_timer(0x9);
        assert_eq!(machine.delay_timer(), 0x9);
        machine.execute_cycle().unwrap();
        assert_eq!(machine.delay_timer(), 0x8);
    }

    #[test]
    fn test_fetch_past_memory_end_mutates_nothing() {
        let mut machine = Machine::new();
        machine.pc = 0xFFF;
        machine.timers.delay = 0x5;
        assert_eq!(machine.execute_cycle(), Err(ExecutionError::MemoryOverflow { address: 0xFFF }));
        assert_eq!(machine.pc, 0xFFF);
        assert_eq!(machine.delay_timer(), 0x5);
    }

    #[test]
    fn test_unrecognized_words_are_decode_errors() {
        let mut machine = Machine::new();
        machine.load_rom(&[0xFF, 0xFF]).unwrap();
        machine.timers.delay = 0x5;
        assert_eq!(machine.execute_cycle(), Err(ExecutionError::DecodeError { opcode: 0xFFFF }));
        // The fetch completed; the cycle died at decode with no tick
        assert_eq!(machine.pc, 0x202);
        assert_eq!(machine.delay_timer(), 0x5);
    }

    #[test]
    fn test_cycles_while_no_key_is_awaited() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x00, 0xE0]).unwrap();
        machine.execute_cycle().unwrap();
        assert_eq!(machine.pc, PROGRAM_START + 0x2);
    }

    #[test]
    fn test_doesnt_cycle_while_awaiting_a_key() {
        let mut machine = Machine::new();
        machine.load_rom(&[0xF5, 0x0A, 0x00, 0xE0]).unwrap();
        machine.timers.delay = 0x3;
        assert_eq!(machine.execute_cycle(), Ok(CycleOutcome::AwaitingKeyInput));
        // The instruction itself was a full cycle and ticked the timers
        assert_eq!(machine.pc, 0x202);
        assert_eq!(machine.delay_timer(), 0x2);
        // With no key down the machine only polls
        for _ in 0..3 {
            assert_eq!(machine.execute_cycle(), Ok(CycleOutcome::AwaitingKeyInput));
        }
        assert_eq!(machine.pc, 0x202);
        assert_eq!(machine.delay_timer(), 0x2);
    }

    #[test]
    fn test_captures_the_lowest_pressed_key_and_resumes() {
        let mut machine = Machine::new();
        machine.load_rom(&[0xF5, 0x0A, 0x00, 0xE0]).unwrap();
        machine.execute_cycle().unwrap();
        machine.set_key(0xB, true);
        machine.set_key(0x4, true);
        machine.timers.delay = 0x3;
        // The resolving cycle consumes key state but fetches nothing
        assert_eq!(machine.execute_cycle(), Ok(CycleOutcome::Continued));
        assert_eq!(machine.v[0x5], 0x4);
        assert_eq!(machine.awaiting_key, None);
        assert_eq!(machine.pc, 0x202);
        assert_eq!(machine.delay_timer(), 0x3);
        // The one after picks the program back up
        assert_eq!(machine.execute_cycle(), Ok(CycleOutcome::Continued));
        assert_eq!(machine.pc, 0x204);
    }

    #[test]
    fn test_call_depth_is_bounded() {
        let mut machine = Machine::new();
        // A chain of 17 calls, each into the instruction after itself
        let mut rom = Vec::new();
        for frame in 0..17u16 {
            let target = PROGRAM_START + 0x2 * (frame + 1);
            rom.push(0x20 | (target >> 8) as u8);
            rom.push(target as u8);
        }
        machine.load_rom(&rom).unwrap();
        for _ in 0..16 {
            assert_eq!(machine.execute_cycle(), Ok(CycleOutcome::Continued));
        }
        let parked_pc = machine.pc;
        assert_eq!(machine.execute_cycle(), Err(ExecutionError::StackOverflow));
        // The fetch advance stands but control was not redirected and the
        // sixteen stored return addresses survived
        assert_eq!(machine.pc, parked_pc + 0x2);
        assert_eq!(machine.stack.depth(), 16);
        for frame in (0..16u16).rev() {
            assert_eq!(machine.stack.pop(), Ok(PROGRAM_START + 0x2 * (frame + 1)));
        }
    }

    #[test]
    fn test_return_without_a_caller_is_an_error() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x00, 0xEE]).unwrap();
        assert_eq!(machine.execute_cycle(), Err(ExecutionError::StackUnderflow));
    }

    #[test]
    fn test_seeded_machines_agree() {
        let rom = [0xC0, 0xFF, 0xC1, 0x0F];
        let mut first = Machine::with_seed(0x8);
        first.load_rom(&rom).unwrap();
        let mut second = Machine::with_seed(0x8);
        second.load_rom(&rom).unwrap();
        for _ in 0..2 {
            first.execute_cycle().unwrap();
            second.execute_cycle().unwrap();
        }
        assert_eq!(first.v, second.v);
    }
}
